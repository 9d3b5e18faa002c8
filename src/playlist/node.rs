use std::fmt;

use super::track::TrackRecord;

/// Identity of a node inside one `OrderedTrackList`.
///
/// Ids carry the tag of the list that issued them and the generation of the
/// arena slot, so ids from another list or from a removed node never resolve.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(super) list: u32,
    pub(super) slot: u32,
    pub(super) generation: u32,
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}:{}v{})", self.list, self.slot, self.generation)
    }
}

/// One track record plus its adjacency within the list.
///
/// `prev`/`next` only navigate; the list arena owns every node.
#[derive(Debug, Clone)]
pub struct Node {
    pub(super) record: TrackRecord,
    pub(super) prev: Option<NodeId>,
    pub(super) next: Option<NodeId>,
}

impl Node {
    pub(super) fn detached(record: TrackRecord) -> Self {
        Self {
            record,
            prev: None,
            next: None,
        }
    }

    pub fn record(&self) -> &TrackRecord {
        &self.record
    }

    pub fn prev(&self) -> Option<NodeId> {
        self.prev
    }

    pub fn next(&self) -> Option<NodeId> {
        self.next
    }
}
