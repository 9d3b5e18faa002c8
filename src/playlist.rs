//! Playlist storage: the ordered track list and the records it holds.
//!
//! `OrderedTrackList` knows nothing about playback; the cursor and session
//! layers build on its node identity and adjacency guarantees.

mod list;
mod node;
mod track;

pub use list::{Iter, OrderedTrackList};
pub use node::{Node, NodeId};
pub use track::*;

#[cfg(test)]
mod tests;
