//! segue: a playlist manager built on a doubly linked track list and a
//! playback cursor, with a small Vim-flavoured TUI on top.

pub mod app;
pub mod config;
pub mod cursor;
pub mod error;
pub mod library;
pub mod logging;
pub mod playlist;
pub mod runtime;
pub mod session;
pub mod ui;

pub use cursor::{CursorState, PlaybackCursor, PlaybackState};
pub use error::{PlaylistError, PlaylistResult};
pub use playlist::{MediaHandle, NodeId, OrderedTrackList, TrackDraft, TrackId, TrackRecord};
pub use session::{Placement, PlaylistInfo, PlaylistSession, SnapshotRow};
