use std::process::Command;

/// Stand-in for the video surface: holds the embed URL of the loaded video
/// and optionally opens it in the system browser. Loading a new video
/// replaces the previous one; stopping blanks the frame.
#[derive(Debug)]
pub struct EmbedFrame {
    src: Option<String>,
    open_external: bool,
}

impl EmbedFrame {
    pub fn new(open_external: bool) -> Self {
        Self {
            src: None,
            open_external,
        }
    }

    pub fn load(&mut self, embed_url: String) {
        if self.open_external {
            if let Err(err) = Command::new("xdg-open").arg(&embed_url).spawn() {
                log::warn!("could not open {embed_url}: {err}");
            }
        }
        self.src = Some(embed_url);
    }

    pub fn stop(&mut self) {
        self.src = None;
    }

    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.src.is_some()
    }
}
