//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, Prompt};
use crate::config::UiSettings;
use crate::player::BackendKind;
use crate::session::TimerPhase;

/// Render the controls help text.
fn controls_text() -> String {
    [
        "[j/k] up/down",
        "[enter] play",
        "[p] pause/resume",
        "[space] timer",
        "[w] work text",
        "[1-4] presets",
        "[c] custom",
        "[e] finish early",
        "[f] filter",
        "[s] shuffle",
        "[r] loop",
        "[-/+] volume",
        "[H/L] seek",
        "[i] import",
        "[a] add video",
        "[x] remove",
        "[m] mark",
        "[P] save playlist",
        "[E] edit playlist",
        "[o] play playlist",
        "[D] delete playlist",
        "[q] quit",
    ]
    .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn prompt_title(prompt: &Prompt) -> &'static str {
    match prompt {
        Prompt::WorkDescription => " what are you working on? ",
        Prompt::ImportAudioPath => " path to audio file ",
        Prompt::AddVideoUrl => " youtube url ",
        Prompt::PlaylistName => " playlist name ",
        Prompt::CustomMinutes => " session length (minutes) ",
        Prompt::ConfirmEarlyComplete => " finish session early? (y/n) ",
        Prompt::ConfirmDeletePlaylist(_) => " delete this playlist? (y/n) ",
    }
}

/// Render the entire UI into the provided `frame` using `app` state.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    position: Option<(Duration, Option<Duration>)>,
    active_backend: Option<BackendKind>,
    ui_settings: &UiSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" andante ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Timer box
    let timer = {
        let (minutes, seconds) = app.timer.remaining();
        let phase = match app.timer.phase() {
            TimerPhase::Idle => "idle",
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
        };
        let work = if app.work_input.trim().is_empty() {
            "(no work description)".to_string()
        } else {
            app.work_input.clone()
        };
        format!(
            "{minutes:02}:{seconds:02}  [{phase}]\nWork: {work}\nLog: {}",
            app.work_log.summary()
        )
    };
    let timer_par = Paragraph::new(timer)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" session "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(timer_par, chunks[1]);

    // Status box
    let status = {
        let mut parts: Vec<String> = Vec::new();

        parts.push(format!(
            "FILTER: {}",
            app.controller.filter().label(&app.playlists)
        ));
        parts.push(format!(
            "LOOP: {}",
            if app.controller.loop_on { "ON" } else { "OFF" }
        ));
        parts.push(format!(
            "SHUFFLE: {}",
            if app.controller.shuffle { "ON" } else { "OFF" }
        ));

        match app.controller.current() {
            Some(track) => {
                // Video playback reports no position; show a sentinel.
                let time = match (active_backend, position) {
                    (Some(BackendKind::Audio), Some((elapsed, Some(total)))) => {
                        format!("{} / {}", format_mmss(elapsed), format_mmss(total))
                    }
                    (Some(BackendKind::Audio), Some((elapsed, None))) => format_mmss(elapsed),
                    _ => "--:--".to_string(),
                };
                parts.push(format!("Track: {} [{}]", track.name(), time));
            }
            None => parts.push("Stopped".to_string()),
        }

        parts.push(format!(
            "VOL: {}",
            (app.controller.volume * 100.0).round() as u32
        ));

        if !app.marked.is_empty() {
            parts.push(format!("MARKED: {}", app.marked.len()));
        }
        if let Some(notice) = &app.notice {
            parts.push(notice.clone());
        }

        parts.join(" \u{2022} ")
    };
    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[2]);

    // Track list
    {
        let tracks = app.visible_tracks();
        let playing_id = app.controller.current().map(|t| t.id().to_string());

        // Center the selected item when possible by creating a visible window.
        let total = tracks.len();
        let list_height = chunks[3].height as usize;
        let sel_pos = app.selected.min(total.saturating_sub(1));
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = if sel_pos > half { sel_pos - half } else { 0 };
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let visible_items: Vec<ListItem> = tracks[start..end]
            .iter()
            .map(|track| {
                let playing = playing_id.as_deref() == Some(track.id());
                let marked = app.marked.iter().any(|id| id == track.id());
                let line = format!(
                    "{}{}[{}] {}",
                    if playing { "\u{25b6} " } else { "  " },
                    if marked { "* " } else { "  " },
                    track.category().as_str(),
                    track.name()
                );
                ListItem::new(line)
            })
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if total > 0 {
            state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, chunks[3], &mut state);
    }

    // Footer
    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);

    // Prompt overlay (keeps the list visible under it)
    if let Some(prompt) = &app.prompt {
        let popup_area = centered_rect_sized(60, 5, chunks[3]);
        frame.render_widget(Clear, popup_area);

        let body = match prompt {
            Prompt::ConfirmEarlyComplete | Prompt::ConfirmDeletePlaylist(_) => String::new(),
            _ => format!("> {}", app.prompt_input),
        };
        let prompt_par = Paragraph::new(body)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(prompt_title(prompt))
                    .padding(Padding {
                        left: 1,
                        right: 0,
                        top: 0,
                        bottom: 0,
                    }),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(prompt_par, popup_area);
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mmss_formats_minutes_and_seconds() {
        assert_eq!(format_mmss(Duration::from_secs(0)), "00:00");
        assert_eq!(format_mmss(Duration::from_secs(65)), "01:05");
        assert_eq!(format_mmss(Duration::from_secs(600)), "10:00");
    }

    #[test]
    fn footer_lists_the_playlist_keys() {
        let text = controls_text();
        assert!(text.contains("[P] save playlist"));
        assert!(text.contains("[E] edit playlist"));
        assert!(text.contains("[o] play playlist"));
        assert!(text.contains("[D] delete playlist"));
    }

    #[test]
    fn centered_rect_stays_inside_the_parent() {
        let parent = Rect {
            x: 2,
            y: 2,
            width: 40,
            height: 12,
        };
        let popup = centered_rect_sized(60, 5, parent);
        assert!(popup.width <= parent.width);
        assert!(popup.x >= parent.x);
        assert!(popup.y >= parent.y);
    }
}
