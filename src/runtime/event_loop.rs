use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Prompt};
use crate::config;
use crate::controller::Advance;
use crate::player::{AudioControl, BackendKind, PlaybackEngine, PlayerEvent};
use crate::queue::Filter;
use crate::session::{SessionError, Tick, TimerPhase};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// When the countdown last ticked; ticks fire on whole seconds.
    last_tick: Instant,
    /// Whether the audio backend is paused (the engine itself is
    /// fire-and-forget about pause/resume).
    music_paused: bool,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            music_paused: false,
        }
    }
}

/// Main terminal event loop: handles input, UI drawing, the session
/// countdown and end-of-track advancement. Returns `Ok(())` when shutdown
/// is requested.
pub fn run<A: AudioControl>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    engine: &mut PlaybackEngine<A>,
    player_events: &Receiver<PlayerEvent>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Countdown ticks once per wall-clock second while running.
        while state.last_tick.elapsed() >= Duration::from_secs(1) {
            state.last_tick += Duration::from_secs(1);
            if app.timer.is_running() && app.timer.tick() == Tick::Completed {
                let minutes = app.timer.complete_natural();
                app.finish_session(minutes);
            }
        }

        // The audio thread reports track ends; what plays next is decided
        // here, against the live library.
        while let Ok(ev) = player_events.try_recv() {
            match ev {
                PlayerEvent::Ended { id } => {
                    // The 200 ms end poll can race a newer selection; end
                    // reports for anything but the current track are stale.
                    if app.controller.is_current(&id) {
                        engine.track_ended();
                        state.music_paused = false;
                        let advance = app.controller.decide_after_end(
                            &mut rand::rng(),
                            &app.library,
                            &app.playlists,
                        );
                        apply_advance(advance, app, engine);
                    }
                }
                PlayerEvent::Unavailable { id, reason } => {
                    let name = app
                        .library
                        .get(&id)
                        .map(|t| t.name().to_string())
                        .unwrap_or(id);
                    app.notice = Some(format!("cannot play {name}: {reason}"));
                }
            }
        }

        let position = engine.position();
        let active = engine.active();
        terminal.draw(|f| ui::draw(f, app, position, active, &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, engine, state)? {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn apply_advance<A: AudioControl>(advance: Advance, app: &mut App, engine: &mut PlaybackEngine<A>) {
    match advance {
        Advance::Replay => {
            if let Some(track) = app.controller.current().cloned() {
                if let Err(err) = engine.play(&track, &app.library) {
                    app.notice = Some(err.to_string());
                }
            }
        }
        Advance::Play(track) => {
            if let Err(err) = engine.play(&track, &app.library) {
                app.notice = Some(err.to_string());
            }
        }
        Advance::Stop => engine.stop(),
        Advance::Hold => {}
    }
}

fn handle_key_event<A: AudioControl>(
    key: KeyEvent,
    app: &mut App,
    engine: &mut PlaybackEngine<A>,
    state: &mut EventLoopState,
) -> Result<bool, Box<dyn std::error::Error>> {
    if app.prompt.is_some() {
        handle_prompt_key(key, app);
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') => return Ok(true),

        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),

        KeyCode::Enter => {
            if let Some(track) = app.selected_track() {
                app.controller.select(track.clone());
                state.music_paused = false;
                if let Err(err) = engine.play(&track, &app.library) {
                    app.notice = Some(err.to_string());
                }
            }
        }

        KeyCode::Char('p') => match engine.active() {
            Some(BackendKind::Audio) => {
                if state.music_paused {
                    engine.resume();
                } else {
                    engine.pause();
                }
                state.music_paused = !state.music_paused;
            }
            Some(BackendKind::Video) => {
                // Videos have no pause; blanking the frame is the only stop.
                engine.pause();
                app.controller.clear_current();
            }
            None => {}
        },

        KeyCode::Char(' ') => match app.timer.phase() {
            TimerPhase::Running => app.timer.pause(),
            TimerPhase::Idle | TimerPhase::Paused => match app.start_timer() {
                Ok(()) => {}
                Err(SessionError::MissingWorkDescription) => {
                    open_prompt(app, Prompt::WorkDescription);
                }
                Err(err) => app.notice = Some(err.to_string()),
            },
        },

        KeyCode::Char('w') => {
            open_prompt(app, Prompt::WorkDescription);
            app.prompt_input = app.work_input.clone();
        }

        KeyCode::Char(c @ '1'..='4') => {
            let slot = (c as usize) - ('1' as usize);
            if let Some(&minutes) = app.timer_presets.get(slot) {
                app.configure_timer(minutes);
            }
        }

        KeyCode::Char('c') => open_prompt(app, Prompt::CustomMinutes),

        KeyCode::Char('e') => app.confirm_early_completion(),

        KeyCode::Char('f') => app.cycle_filter(),

        KeyCode::Char('s') => {
            app.controller.shuffle = !app.controller.shuffle;
        }

        KeyCode::Char('r') => {
            app.controller.loop_on = !app.controller.loop_on;
        }

        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.controller.volume = (app.controller.volume + 0.05).min(1.0);
            engine.set_volume(app.controller.volume);
        }
        KeyCode::Char('-') => {
            app.controller.volume = (app.controller.volume - 0.05).max(0.0);
            engine.set_volume(app.controller.volume);
        }

        KeyCode::Char('H') => seek_by(engine, -5),
        KeyCode::Char('L') => seek_by(engine, 5),

        KeyCode::Char('i') => open_prompt(app, Prompt::ImportAudioPath),
        KeyCode::Char('a') => open_prompt(app, Prompt::AddVideoUrl),
        KeyCode::Char('x') => app.remove_selected(),
        KeyCode::Char('m') => app.toggle_mark(),

        KeyCode::Char('P') => {
            if app.marked.is_empty() {
                app.notice = Some("mark at least one track first".to_string());
            } else {
                open_prompt(app, Prompt::PlaylistName);
                if let Some(id) = app.editing_playlist.clone() {
                    if let Some(pl) = app.playlists.get(&id) {
                        app.prompt_input = pl.name.clone();
                    }
                }
            }
        }

        KeyCode::Char('E') => {
            if let Filter::Playlist(id) = app.controller.filter().clone() {
                app.edit_playlist(&id);
                app.notice = Some("editing playlist; mark tracks, then P saves".to_string());
            }
        }

        KeyCode::Char('o') => {
            if let Filter::Playlist(id) = app.controller.filter().clone() {
                if let Some(track) = app.play_playlist(&id) {
                    state.music_paused = false;
                    if let Err(err) = engine.play(&track, &app.library) {
                        app.notice = Some(err.to_string());
                    }
                }
            }
        }

        KeyCode::Char('D') => {
            if let Filter::Playlist(id) = app.controller.filter().clone() {
                open_prompt(app, Prompt::ConfirmDeletePlaylist(id));
            }
        }

        _ => {}
    }

    Ok(false)
}

fn seek_by<A: AudioControl>(engine: &mut PlaybackEngine<A>, secs: i64) {
    if !engine.supports_seek() {
        return;
    }
    if let Some((elapsed, Some(total))) = engine.position() {
        if total.is_zero() {
            return;
        }
        let target = (elapsed.as_secs() as i64 + secs).max(0) as u64;
        let fraction = target as f32 / total.as_secs() as f32;
        engine.seek_fraction(fraction);
    }
}

fn open_prompt(app: &mut App, prompt: Prompt) {
    app.prompt = Some(prompt);
    app.prompt_input.clear();
}

fn handle_prompt_key(key: KeyEvent, app: &mut App) {
    let Some(prompt) = app.prompt.clone() else {
        return;
    };

    // Confirmation prompts only take y/n.
    match prompt {
        Prompt::ConfirmEarlyComplete => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    let minutes = app.timer.complete_early();
                    app.finish_session(minutes);
                    close_prompt(app);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => close_prompt(app),
                _ => {}
            }
            return;
        }
        Prompt::ConfirmDeletePlaylist(id) => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    app.delete_playlist(&id);
                    close_prompt(app);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => close_prompt(app),
                _ => {}
            }
            return;
        }
        _ => {}
    }

    match key.code {
        KeyCode::Esc => close_prompt(app),
        KeyCode::Backspace => {
            app.prompt_input.pop();
        }
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.prompt_input);
            app.prompt = None;
            match prompt {
                Prompt::WorkDescription => app.work_input = input.trim().to_string(),
                Prompt::ImportAudioPath => app.import_audio(&input),
                Prompt::AddVideoUrl => app.add_video(&input),
                Prompt::PlaylistName => app.save_playlist(&input),
                Prompt::CustomMinutes => app.configure_custom(&input),
                Prompt::ConfirmEarlyComplete | Prompt::ConfirmDeletePlaylist(_) => {}
            }
        }
        KeyCode::Char(c) => app.prompt_input.push(c),
        _ => {}
    }
}

fn close_prompt(app: &mut App) {
    app.prompt = None;
    app.prompt_input.clear();
}
