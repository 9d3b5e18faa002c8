//! Playback cursor: which node is "current" and whether it is playing.
//!
//! The cursor is a small state machine over `CursorState` driven by list
//! mutation callbacks and explicit navigation. It never stores a removed node:
//! the owner must call `on_node_removed` before detaching a node.

use tracing::debug;

use crate::playlist::{Node, NodeId, OrderedTrackList};

/// Which node, if any, is selected for playback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum CursorState {
    #[default]
    Empty,
    Positioned(NodeId),
}

/// The playback state of the current node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Stopped
    }
}

#[derive(Debug, Default)]
pub struct PlaybackCursor {
    state: CursorState,
    playback: PlaybackState,
}

impl PlaybackCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    pub fn current(&self) -> Option<NodeId> {
        match self.state {
            CursorState::Empty => None,
            CursorState::Positioned(id) => Some(id),
        }
    }

    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    pub fn is_playing(&self) -> bool {
        self.playback == PlaybackState::Playing
    }

    /// Position on `first` after an insertion took the list from 0 to 1 node.
    pub fn on_list_became_non_empty(&mut self, first: NodeId) {
        debug_assert_eq!(self.state, CursorState::Empty);
        self.state = CursorState::Positioned(first);
        debug!(node = ?first, "cursor positioned on first node");
    }

    /// Move to the next node. Returns `false` at the tail or when empty.
    pub fn advance(&mut self, list: &OrderedTrackList) -> bool {
        self.step(list, |node| node.next())
    }

    /// Move to the previous node. Returns `false` at the head or when empty.
    pub fn retreat(&mut self, list: &OrderedTrackList) -> bool {
        self.step(list, |node| node.prev())
    }

    fn step(
        &mut self,
        list: &OrderedTrackList,
        neighbor: impl Fn(&Node) -> Option<NodeId>,
    ) -> bool {
        let Some(current) = self.current() else {
            return false;
        };
        match neighbor(list.node(current)) {
            Some(target) => {
                self.state = CursorState::Positioned(target);
                debug!(from = ?current, to = ?target, "cursor moved");
                true
            }
            None => false,
        }
    }

    /// Auto-advance after the current track finished.
    ///
    /// Plays the next node when there is one; at the tail playback stops and
    /// the cursor stays put (no wraparound). Does nothing when empty.
    pub fn on_track_ended(&mut self, list: &OrderedTrackList) -> bool {
        if self.state == CursorState::Empty {
            return false;
        }
        if self.advance(list) {
            self.playback = PlaybackState::Playing;
            true
        } else {
            self.playback = PlaybackState::Stopped;
            debug!("reached end of playlist, stopping");
            false
        }
    }

    /// Re-target before `removed` is detached from `list`.
    ///
    /// Prefers the following node, then the preceding one; with neither the
    /// list is about to become empty and the cursor clears. Retargeting pauses
    /// playback, clearing stops it.
    ///
    /// # Panics
    ///
    /// Panics when `removed` is not a live member of `list`.
    #[track_caller]
    pub fn on_node_removed(&mut self, removed: NodeId, list: &OrderedTrackList) {
        let node = list.node(removed);
        if self.current() != Some(removed) {
            return;
        }

        match node.next().or(node.prev()) {
            Some(target) => {
                self.state = CursorState::Positioned(target);
                self.playback = PlaybackState::Paused;
                debug!(removed = ?removed, to = ?target, "current node removed, cursor retargeted");
            }
            None => {
                self.state = CursorState::Empty;
                self.playback = PlaybackState::Stopped;
                debug!(removed = ?removed, "last node removed, cursor cleared");
            }
        }
    }

    /// Jump straight to `node` (for example "play this track").
    ///
    /// # Panics
    ///
    /// Panics when `node` is not a live member of `list`.
    #[track_caller]
    pub fn set_current(&mut self, node: NodeId, list: &OrderedTrackList) {
        list.node(node);
        self.state = CursorState::Positioned(node);
        debug!(node = ?node, "cursor set");
    }

    /// Start playing the current node. Refused when nothing is selected.
    pub fn play(&mut self) -> bool {
        if self.state == CursorState::Empty {
            return false;
        }
        self.playback = PlaybackState::Playing;
        true
    }

    pub fn pause(&mut self) {
        if self.playback == PlaybackState::Playing {
            self.playback = PlaybackState::Paused;
        }
    }

    pub fn stop(&mut self) {
        self.playback = PlaybackState::Stopped;
    }
}

#[cfg(test)]
mod tests;
