//! Playlist session: owns the track list and its playback cursor.
//!
//! Every structural change goes through here so the cursor hears about it in
//! the right order: positioned when the list first fills up, retargeted
//! before a node is detached.

use tracing::{debug, info};

use crate::cursor::{PlaybackCursor, PlaybackState};
use crate::error::{PlaylistError, PlaylistResult};
use crate::playlist::{MediaHandle, NodeId, OrderedTrackList, TrackDraft, TrackId, TrackRecord};

/// Where a new track goes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    Head,
    Tail,
    /// Zero-based index the new track should occupy.
    At(isize),
}

impl Placement {
    /// Caller-side clamping: pull `position` into `0..=len`.
    pub fn clamped(position: isize, len: usize) -> Self {
        let max = isize::try_from(len).unwrap_or(isize::MAX);
        Placement::At(position.clamp(0, max))
    }
}

/// Read-only row of a playlist snapshot, for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRow {
    pub node: NodeId,
    pub record: TrackRecord,
    pub has_prev: bool,
    pub has_next: bool,
    pub is_current: bool,
}

/// Summary of the playlist ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistInfo {
    pub len: usize,
    pub head: Option<TrackRecord>,
    pub tail: Option<TrackRecord>,
}

#[derive(Debug)]
pub struct PlaylistSession {
    list: OrderedTrackList,
    cursor: PlaybackCursor,
    next_id: u64,
}

impl Default for PlaylistSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaylistSession {
    pub fn new() -> Self {
        Self {
            list: OrderedTrackList::new(),
            cursor: PlaybackCursor::new(),
            next_id: 1,
        }
    }

    /// Build a session holding `drafts` in order, skipping invalid ones.
    pub fn from_drafts(drafts: impl IntoIterator<Item = TrackDraft>) -> Self {
        let mut session = Self::new();
        for draft in drafts {
            if let Err(e) = session.add(draft, Placement::Tail) {
                debug!("skipping track: {e}");
            }
        }
        info!(tracks = session.len(), "playlist loaded");
        session
    }

    pub fn list(&self) -> &OrderedTrackList {
        &self.list
    }

    pub fn cursor(&self) -> &PlaybackCursor {
        &self.cursor
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn current(&self) -> Option<NodeId> {
        self.cursor.current()
    }

    pub fn playback(&self) -> PlaybackState {
        self.cursor.playback()
    }

    /// Validate `draft`, give it an id and insert it.
    pub fn add(&mut self, draft: TrackDraft, placement: Placement) -> PlaylistResult<NodeId> {
        if draft.name.trim().is_empty() {
            return Err(PlaylistError::MissingField("name"));
        }
        if draft.artist.trim().is_empty() {
            return Err(PlaylistError::MissingField("artist"));
        }

        let id = TrackId::new(self.next_id);
        let record = TrackRecord::from_draft(id, draft);
        let node = match placement {
            Placement::Head => self.list.insert_at_head(record),
            Placement::Tail => self.list.insert_at_tail(record),
            Placement::At(position) => self.list.insert_at_position(record, position)?,
        };
        self.next_id += 1;

        if self.list.len() == 1 {
            self.cursor.on_list_became_non_empty(node);
        }
        Ok(node)
    }

    /// Remove a node, retargeting the cursor first.
    ///
    /// # Panics
    ///
    /// Panics when `node` is not a live member of this playlist.
    #[track_caller]
    pub fn remove(&mut self, node: NodeId) -> TrackRecord {
        self.cursor.on_node_removed(node, &self.list);
        self.list.remove(node)
    }

    /// Remove the track with id `track`, if present.
    pub fn remove_track(&mut self, track: TrackId) -> PlaylistResult<TrackRecord> {
        let node = self
            .list
            .find_by_track(track)
            .ok_or(PlaylistError::TrackNotFound(track))?;
        Ok(self.remove(node))
    }

    pub fn track(&self, track: TrackId) -> Option<&TrackRecord> {
        self.list
            .find_by_track(track)
            .map(|node| self.list.node(node).record())
    }

    pub fn record(&self, node: NodeId) -> Option<&TrackRecord> {
        self.list.get(node).map(|n| n.record())
    }

    /// Attach playable media to an existing track.
    pub fn attach_media(&mut self, track: TrackId, media: MediaHandle) -> PlaylistResult<()> {
        let node = self
            .list
            .find_by_track(track)
            .ok_or(PlaylistError::TrackNotFound(track))?;
        if let Some(record) = self.list.record_mut(node) {
            record.set_media(media);
        }
        Ok(())
    }

    pub fn info(&self) -> PlaylistInfo {
        let record = |node: Option<NodeId>| node.map(|n| self.list.node(n).record().clone());
        PlaylistInfo {
            len: self.list.len(),
            head: record(self.list.head()),
            tail: record(self.list.tail()),
        }
    }

    /// Materialize the playlist in order for rendering.
    pub fn snapshot(&self) -> Vec<SnapshotRow> {
        let current = self.cursor.current();
        self.list
            .iter()
            .map(|(node, n)| SnapshotRow {
                node,
                record: n.record().clone(),
                has_prev: n.prev().is_some(),
                has_next: n.next().is_some(),
                is_current: current == Some(node),
            })
            .collect()
    }

    pub fn now_playing(&self) -> Option<&TrackRecord> {
        self.cursor.current().map(|n| self.list.node(n).record())
    }

    /// Records before and after the current node.
    pub fn neighbors(&self) -> (Option<&TrackRecord>, Option<&TrackRecord>) {
        let Some(current) = self.cursor.current() else {
            return (None, None);
        };
        let node = self.list.node(current);
        let record = |id: Option<NodeId>| id.map(|n| self.list.node(n).record());
        (record(node.prev()), record(node.next()))
    }

    /// Skip to the next track and play it.
    pub fn next(&mut self) -> bool {
        let moved = self.cursor.advance(&self.list);
        if moved {
            self.cursor.play();
        }
        moved
    }

    /// Go back to the previous track and play it.
    pub fn previous(&mut self) -> bool {
        let moved = self.cursor.retreat(&self.list);
        if moved {
            self.cursor.play();
        }
        moved
    }

    /// The current track finished playing.
    pub fn track_ended(&mut self) -> bool {
        self.cursor.on_track_ended(&self.list)
    }

    /// Make `node` current and start playing it.
    ///
    /// # Panics
    ///
    /// Panics when `node` is not a live member of this playlist.
    #[track_caller]
    pub fn play_node(&mut self, node: NodeId) {
        self.cursor.set_current(node, &self.list);
        self.cursor.play();
    }

    /// Toggle between playing and paused.
    ///
    /// Refused when nothing is current or the current track has no media.
    pub fn toggle_play_pause(&mut self) -> bool {
        let has_media = self.now_playing().is_some_and(|r| r.media().is_some());
        if !has_media {
            return false;
        }
        match self.cursor.playback() {
            PlaybackState::Playing => self.cursor.pause(),
            PlaybackState::Paused | PlaybackState::Stopped => {
                self.cursor.play();
            }
        }
        true
    }

    pub fn stop(&mut self) {
        self.cursor.stop();
    }
}
