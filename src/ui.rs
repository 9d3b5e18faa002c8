//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::App;
use crate::config::UiSettings;
use crate::cursor::PlaybackState;
use crate::playlist::{TrackRecord, format_duration_label};
use crate::session::SnapshotRow;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    BTreeMap::from([
        ("j/k", "down/up"),
        ("gg/G", "top/bottom"),
        ("enter", "play selected"),
        ("space/p", "play/pause"),
        ("h/l", "prev/next track"),
        ("d", "delete"),
        ("y", "yank"),
        ("I/A", "paste at top/bottom"),
        ("o/O", "paste below/above"),
        ("[n]P", "paste (at n)"),
        ("zz", "jump to current"),
        ("K", "metadata"),
        ("q", "quit"),
    ])
});

/// Render the controls help text.
pub(crate) fn controls_text() -> String {
    // Keep the rendered order stable and human-friendly.
    let order = [
        "j/k", "h/l", "enter", "space/p", "gg/G", "zz", "d", "y", "I/A", "o/O", "[n]P", "K", "q",
    ];
    order
        .iter()
        .filter_map(|k| CONTROLS_MAP.get(k).map(|v| format!("[{k}] {v}")))
        .collect::<Vec<String>>()
        .join(" | ")
}

fn playback_text(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Stopped => "Stopped",
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
    }
}

/// Build the status line: playback state, now playing and directory.
pub(crate) fn status_text(app: &App) -> String {
    let mut parts: Vec<String> = Vec::new();

    if app.follow_current {
        parts.push(" CURSOR: Follow".to_string());
    } else {
        parts.push(" CURSOR: Free-roam".to_string());
    }

    match app.session.now_playing() {
        Some(record) => {
            parts.push(format!(
                "Track: {} [{}/{}]",
                record.display(),
                format_duration_label(app.elapsed),
                record.duration_label()
            ));
            parts.push(playback_text(app.playback()).to_string());
        }
        None => parts.push("Empty playlist".to_string()),
    }

    parts.push(format!("Tracks: {}", app.session.len()));

    if let Some(dir) = &app.current_dir {
        parts.push(format!("Dir: {dir}"));
    }

    if let Some(msg) = &app.status {
        parts.push(msg.clone());
    }

    parts.join(" • ")
}

/// Build the "prev / next" preview line around the current track.
pub(crate) fn neighbors_text(app: &App) -> String {
    let (prev, next) = app.session.neighbors();
    let name = |r: Option<&TrackRecord>| {
        r.map(|r| r.display()).unwrap_or_else(|| "-".to_string())
    };
    format!(" prev: {} • next: {}", name(prev), name(next))
}

fn row_text(row: &SnapshotRow) -> String {
    let marker = if row.is_current { "♪ " } else { "  " };
    format!(
        "{marker}{} ({})",
        row.record.display(),
        row.record.duration_label()
    )
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

fn metadata_text(app: &App) -> String {
    let Some(record) = app.selected.and_then(|n| app.session.record(n)) else {
        return "No track selected".to_string();
    };
    let media = record
        .media()
        .map(|m| m.path().display().to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "Id: {}\nName: {}\nArtist: {}\nDuration: {}\nMedia: {}",
        record.id(),
        record.name(),
        record.artist(),
        record.duration_label(),
        media
    )
}

fn left_padded(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) {
    let neighbors_height = if ui_settings.show_neighbors { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(neighbors_height),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" segue ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status_par = Paragraph::new(status_text(app))
        .slow_blink()
        .block(left_padded(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    if ui_settings.show_neighbors {
        let neighbors = Paragraph::new(neighbors_text(app))
            .block(Block::bordered().title(" up next "));
        frame.render_widget(neighbors, chunks[2]);
    }

    // Main list
    let list_area = chunks[3];
    {
        let rows = app.session.snapshot();

        // Center the selected item when possible by creating a visible window.
        let total = rows.len();
        let list_height = list_area.height.saturating_sub(2) as usize;
        let sel_pos = app
            .selected
            .and_then(|sel| rows.iter().position(|r| r.node == sel))
            .unwrap_or(0);
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = sel_pos.saturating_sub(half);
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let visible_items: Vec<ListItem> = rows[start..end]
            .iter()
            .map(|row| {
                let item = ListItem::new(row_text(row));
                if row.is_current {
                    item.style(Style::default().add_modifier(Modifier::BOLD))
                } else {
                    item
                }
            })
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" playlist "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if total > 0 {
            state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, list_area, &mut state);
    }

    // Overlay metadata popup (keeps list visible under it)
    if app.metadata_window {
        let popup_area = centered_rect_sized(72, 9, list_area);
        frame.render_widget(Clear, popup_area);

        let meta_paragraph = Paragraph::new(metadata_text(app))
            .block(left_padded(" metadata (K closes) "))
            .wrap(Wrap { trim: true });
        frame.render_widget(meta_paragraph, popup_area);
    }

    let footer = Paragraph::new(controls_text())
        .block(left_padded(" controls "))
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[4]);
}
