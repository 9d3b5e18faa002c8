//! Error types surfaced by the playlist core.
//!
//! Only refused operations live here. Boundary conditions (empty list, cursor
//! at an end) are reported through `bool`/`Option` results, and stale node
//! references are programming errors that panic instead.

use thiserror::Error;

use crate::playlist::TrackId;

/// Errors returned by playlist and session operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistError {
    /// `insert_at_position` called outside `0..=len`; the list is unchanged.
    #[error("invalid position {position}: expected a value between 0 and {len}")]
    InvalidPosition { position: isize, len: usize },

    /// No track with this id is currently in the playlist.
    #[error("track {0} not found")]
    TrackNotFound(TrackId),

    /// A required track field was blank.
    #[error("track {0} is required")]
    MissingField(&'static str),
}

/// Result type for playlist operations
pub type PlaylistResult<T> = Result<T, PlaylistError>;
