//! Application model: `App` and the editing operations bound to keys.
//!
//! The `App` struct wraps a playlist session together with the UI-only state
//! (selected row, yank register, status line, elapsed clock).

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::InsertModeSetting;
use crate::cursor::PlaybackState;
use crate::playlist::{NodeId, TrackDraft, parse_duration_label};
use crate::session::{Placement, PlaylistSession};

/// The main application model.
pub struct App {
    pub session: PlaylistSession,
    /// Row under the selection bar; independent from the playback cursor.
    pub selected: Option<NodeId>,
    /// Last yanked or deleted track, ready to be pasted.
    pub register: Option<TrackDraft>,
    pub status: Option<String>,
    /// Time spent playing the current track.
    pub elapsed: Duration,

    pub follow_current: bool,
    pub clamp_positions: bool,
    pub insert_mode: InsertModeSetting,

    pub current_dir: Option<String>,
    pub metadata_window: bool,
}

impl App {
    /// Create a new `App` around `session`, selecting its current track.
    pub fn new(session: PlaylistSession) -> Self {
        let selected = session.current();
        Self {
            session,
            selected,
            register: None,
            status: None,
            elapsed: Duration::ZERO,

            follow_current: true,
            clamp_positions: true,
            insert_mode: InsertModeSetting::End,

            current_dir: None,
            metadata_window: false,
        }
    }

    pub fn toggle_metadata_window(&mut self) {
        self.metadata_window = !self.metadata_window;
    }

    /// Record the current directory in the app state.
    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    pub fn has_tracks(&self) -> bool {
        !self.session.is_empty()
    }

    pub fn playback(&self) -> PlaybackState {
        self.session.playback()
    }

    /// Zero-based index of the selected row.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
            .and_then(|node| self.session.list().position_of(node))
    }

    /// Move the selection to the playing track when following is on.
    fn follow(&mut self) {
        if self.follow_current {
            if let Some(current) = self.session.current() {
                self.selected = Some(current);
            }
        }
    }

    /// Drop a selection that no longer points into the list.
    fn ensure_selection(&mut self) {
        let list = self.session.list();
        if !self.selected.is_some_and(|node| list.contains(node)) {
            self.selected = self.session.current().or(list.head());
        }
    }

    /// Move selection to the next row. Stops at the tail.
    pub fn select_next(&mut self) {
        self.ensure_selection();
        if let Some(node) = self.selected {
            if let Some(next) = self.session.list().node(node).next() {
                self.selected = Some(next);
            }
        }
    }

    /// Move selection to the previous row. Stops at the head.
    pub fn select_prev(&mut self) {
        self.ensure_selection();
        if let Some(node) = self.selected {
            if let Some(prev) = self.session.list().node(node).prev() {
                self.selected = Some(prev);
            }
        }
    }

    pub fn select_first(&mut self) {
        self.selected = self.session.list().head();
    }

    pub fn select_last(&mut self) {
        self.selected = self.session.list().tail();
    }

    /// Jump the selection back to the playing track.
    pub fn select_current(&mut self) {
        if let Some(current) = self.session.current() {
            self.selected = Some(current);
        }
    }

    /// Start playing the selected row.
    pub fn play_selected(&mut self) {
        self.ensure_selection();
        let Some(node) = self.selected else {
            return;
        };
        let already_playing = self.session.current() == Some(node)
            && self.session.playback() == PlaybackState::Playing;
        if !already_playing {
            self.session.play_node(node);
            self.elapsed = Duration::ZERO;
        }
    }

    pub fn toggle_play_pause(&mut self) {
        if self.session.toggle_play_pause() {
            return;
        }
        let msg = match self.session.now_playing() {
            None => "nothing to play".to_string(),
            Some(record) => format!("no media attached to {}", record.display()),
        };
        self.set_status(msg);
    }

    pub fn next_track(&mut self) {
        if self.session.next() {
            self.elapsed = Duration::ZERO;
            self.follow();
        }
    }

    pub fn previous_track(&mut self) {
        if self.session.previous() {
            self.elapsed = Duration::ZERO;
            self.follow();
        }
    }

    /// Delete the selected row into the register.
    ///
    /// The selection moves to the following row, or the preceding one when
    /// the tail was removed.
    pub fn remove_selected(&mut self) {
        self.ensure_selection();
        let Some(node) = self.selected else {
            return;
        };
        let (prev, next) = {
            let n = self.session.list().node(node);
            (n.prev(), n.next())
        };
        let was_current = self.session.current() == Some(node);

        let record = self.session.remove(node);
        self.selected = next.or(prev);
        if was_current {
            self.elapsed = Duration::ZERO;
        }
        self.set_status(format!("removed {}", record.display()));
        self.register = Some(record.to_draft());
    }

    /// Copy the selected row into the register.
    pub fn yank_selected(&mut self) {
        self.ensure_selection();
        let Some(record) = self.selected.and_then(|node| self.session.record(node)) else {
            return;
        };
        let msg = format!("yanked {}", record.display());
        self.register = Some(record.to_draft());
        self.set_status(msg);
    }

    /// Paste the register at `placement`, selecting the new row.
    pub fn paste(&mut self, placement: Placement) {
        let Some(draft) = self.register.clone() else {
            self.set_status("nothing yanked");
            return;
        };
        match self.session.add(draft, placement) {
            Ok(node) => {
                debug!(?placement, "pasted track");
                self.selected = Some(node);
                if let Some(record) = self.session.record(node) {
                    let msg = format!("pasted {}", record.display());
                    self.set_status(msg);
                }
            }
            Err(e) => {
                warn!("paste refused: {e}");
                self.set_status(e.to_string());
            }
        }
    }

    /// Paste at a zero-based `position`, clamped into range when configured.
    pub fn paste_at(&mut self, position: isize) {
        let placement = if self.clamp_positions {
            Placement::clamped(position, self.session.len())
        } else {
            Placement::At(position)
        };
        self.paste(placement);
    }

    pub fn paste_after_selection(&mut self) {
        match self.selected_index() {
            Some(idx) => self.paste_at(to_position(idx + 1)),
            None => self.paste(Placement::Tail),
        }
    }

    pub fn paste_before_selection(&mut self) {
        match self.selected_index() {
            Some(idx) => self.paste_at(to_position(idx)),
            None => self.paste(Placement::Head),
        }
    }

    /// Paste where `insert_mode` says.
    pub fn paste_by_mode(&mut self) {
        match self.insert_mode {
            InsertModeSetting::Start => self.paste(Placement::Head),
            InsertModeSetting::End => self.paste(Placement::Tail),
            InsertModeSetting::Position => self.paste_before_selection(),
        }
    }

    /// Advance the elapsed clock by `dt` while playing. When the current
    /// track runs past its length, either move on or stop.
    pub fn tick(&mut self, dt: Duration, auto_advance: bool) {
        if self.session.playback() != PlaybackState::Playing {
            return;
        }
        self.elapsed += dt;

        let total = self
            .session
            .now_playing()
            .and_then(|r| parse_duration_label(r.duration_label()))
            .filter(|d| !d.is_zero());
        let Some(total) = total else {
            return;
        };
        if self.elapsed < total {
            return;
        }

        self.elapsed = Duration::ZERO;
        if !auto_advance {
            self.session.stop();
            return;
        }
        if self.session.track_ended() {
            self.follow();
        } else {
            self.set_status("end of playlist");
        }
    }
}

fn to_position(idx: usize) -> isize {
    isize::try_from(idx).unwrap_or(isize::MAX)
}
