//! Music folder scanning.
//!
//! Walks a directory and turns every audio file it finds into a
//! [`TrackDraft`](crate::playlist::TrackDraft) ready to be added to a playlist.

mod scan;

pub use scan::scan;
