use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::player::{AudioPlayer, PlaybackEngine};
use crate::storage::Storage;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let storage = Storage::open(settings.storage.data_dir.clone())?;
    let mut app = App::new(storage, &settings);

    let (audio_player, player_events) = AudioPlayer::spawn();
    let mut engine = PlaybackEngine::new(&audio_player, audio_player.playback_handle(), true);

    startup::apply_playback_defaults(&mut engine, &app);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new();
        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &mut engine,
            &player_events,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Whatever ended the loop, an in-flight session still gets logged.
    app.flush_unfinished_session();
    audio_player.quit();

    run_result
}
