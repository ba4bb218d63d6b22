use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One logged focus session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkLogEntry {
    pub id: String,
    pub date: String,
    pub time: String,
    pub content: String,
    pub duration_minutes: u32,
    /// Name of the track playing when the session was logged.
    pub track: String,
}

/// Append-only record of completed sessions, newest first.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct WorkLog {
    pub entries: Vec<WorkLogEntry>,
}

impl WorkLog {
    /// Record a session, stamped with the local date and time.
    pub fn record(&mut self, content: &str, duration_minutes: u32, track: Option<String>) {
        let now = Local::now();
        self.entries.insert(
            0,
            WorkLogEntry {
                id: Uuid::new_v4().to_string(),
                date: now.format("%a %b %e %Y").to_string(),
                time: now.format("%H:%M:%S").to_string(),
                content: content.to_string(),
                duration_minutes,
                track: track.unwrap_or_else(|| "No music".to_string()),
            },
        );
    }

    pub fn total_minutes(&self) -> u32 {
        self.entries.iter().map(|e| e.duration_minutes).sum()
    }

    pub fn summary(&self) -> String {
        if self.entries.is_empty() {
            "No work logged yet".to_string()
        } else {
            format!(
                "{} sessions \u{2022} {} min total",
                self.entries.len(),
                self.total_minutes()
            )
        }
    }
}
