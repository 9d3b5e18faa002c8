use std::iter::FusedIterator;
use std::sync::atomic::{AtomicU32, Ordering};

use tracing::debug;

use super::node::{Node, NodeId};
use super::track::{TrackId, TrackRecord};
use crate::error::{PlaylistError, PlaylistResult};

static NEXT_LIST_TAG: AtomicU32 = AtomicU32::new(1);

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Doubly-linked ordered collection of track records.
///
/// Nodes are arena-allocated and addressed by `NodeId`. Head/tail insertion
/// and removal by id are O(1); positional insertion and lookups walk from the
/// head.
#[derive(Debug)]
pub struct OrderedTrackList {
    tag: u32,
    slots: Vec<Slot>,
    free: Vec<u32>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl Default for OrderedTrackList {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderedTrackList {
    pub fn new() -> Self {
        Self {
            tag: NEXT_LIST_TAG.fetch_add(1, Ordering::Relaxed),
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    pub fn tail(&self) -> Option<NodeId> {
        self.tail
    }

    /// Resolve `id` if it is a live member of this list.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.list != self.tag {
            return None;
        }
        let slot = self.slots.get(id.slot as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Resolve a node the caller guarantees is live.
    ///
    /// # Panics
    ///
    /// Panics when `id` was removed or belongs to another list.
    #[track_caller]
    pub fn node(&self, id: NodeId) -> &Node {
        match self.get(id) {
            Some(node) => node,
            None => panic!("stale or foreign node reference {id:?}"),
        }
    }

    #[track_caller]
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        let live = id.list == self.tag
            && self
                .slots
                .get(id.slot as usize)
                .is_some_and(|s| s.generation == id.generation && s.node.is_some());
        if !live {
            panic!("stale or foreign node reference {id:?}");
        }
        match self.slots[id.slot as usize].node.as_mut() {
            Some(node) => node,
            None => unreachable!(),
        }
    }

    /// Mutable access to a live node's record, for field updates such as
    /// attaching media. Adjacency is not reachable from here.
    pub fn record_mut(&mut self, id: NodeId) -> Option<&mut TrackRecord> {
        if !self.contains(id) {
            return None;
        }
        Some(&mut self.node_mut(id).record)
    }

    fn allocate(&mut self, record: TrackRecord) -> NodeId {
        let node = Node::detached(record);
        if let Some(slot) = self.free.pop() {
            let entry = &mut self.slots[slot as usize];
            entry.node = Some(node);
            NodeId {
                list: self.tag,
                slot,
                generation: entry.generation,
            }
        } else {
            let slot = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId {
                list: self.tag,
                slot,
                generation: 0,
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Node {
        let entry = &mut self.slots[id.slot as usize];
        let node = match entry.node.take() {
            Some(node) => node,
            None => unreachable!("released an empty slot"),
        };
        // Bumping the generation invalidates every outstanding copy of `id`.
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(id.slot);
        node
    }

    /// Insert `record` as the new head.
    pub fn insert_at_head(&mut self, record: TrackRecord) -> NodeId {
        let track = record.id();
        let id = self.allocate(record);
        match self.head {
            None => {
                self.head = Some(id);
                self.tail = Some(id);
            }
            Some(old_head) => {
                self.node_mut(id).next = Some(old_head);
                self.node_mut(old_head).prev = Some(id);
                self.head = Some(id);
            }
        }
        self.len += 1;
        debug!(%track, node = ?id, len = self.len, "inserted at head");
        id
    }

    /// Insert `record` as the new tail.
    pub fn insert_at_tail(&mut self, record: TrackRecord) -> NodeId {
        let track = record.id();
        let id = self.allocate(record);
        match self.tail {
            None => {
                self.head = Some(id);
                self.tail = Some(id);
            }
            Some(old_tail) => {
                self.node_mut(id).prev = Some(old_tail);
                self.node_mut(old_tail).next = Some(id);
                self.tail = Some(id);
            }
        }
        self.len += 1;
        debug!(%track, node = ?id, len = self.len, "inserted at tail");
        id
    }

    /// Insert `record` so that it ends up at index `position`.
    ///
    /// `0` behaves like `insert_at_head`, `len()` like `insert_at_tail`.
    /// Anything outside `0..=len()` is refused and the list is left untouched.
    pub fn insert_at_position(
        &mut self,
        record: TrackRecord,
        position: isize,
    ) -> PlaylistResult<NodeId> {
        let len = self.len;
        let index = usize::try_from(position)
            .ok()
            .filter(|&i| i <= len)
            .ok_or(PlaylistError::InvalidPosition { position, len })?;

        if index == 0 {
            return Ok(self.insert_at_head(record));
        }
        if index == len {
            return Ok(self.insert_at_tail(record));
        }

        let Some(at) = self.nth(index) else {
            unreachable!("list shorter than its length counter");
        };
        let Some(before) = self.node(at).prev else {
            unreachable!("interior node without a predecessor");
        };

        let track = record.id();
        let id = self.allocate(record);
        {
            let node = self.node_mut(id);
            node.prev = Some(before);
            node.next = Some(at);
        }
        self.node_mut(before).next = Some(id);
        self.node_mut(at).prev = Some(id);
        self.len += 1;
        debug!(%track, node = ?id, index, len = self.len, "inserted at position");
        Ok(id)
    }

    /// Detach `id` in O(1) and hand its record back.
    ///
    /// # Panics
    ///
    /// Panics when `id` is not a live member of this list.
    #[track_caller]
    pub fn remove(&mut self, id: NodeId) -> TrackRecord {
        let (prev, next) = {
            let node = self.node(id);
            (node.prev, node.next)
        };

        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }
        self.len -= 1;

        let record = self.release(id).record;
        debug!(track = %record.id(), node = ?id, len = self.len, "removed");
        record
    }

    /// Node ids in head-to-tail order, materialized once.
    pub fn to_snapshot(&self) -> Vec<NodeId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Borrowing walk; `.rev()` follows `prev` from the tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Id of the node at `index`, walking from the head.
    pub fn nth(&self, index: usize) -> Option<NodeId> {
        self.iter().nth(index).map(|(id, _)| id)
    }

    /// Zero-based index of `id`, if it is in the list.
    pub fn position_of(&self, id: NodeId) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        self.iter().position(|(n, _)| n == id)
    }

    pub fn find_by_track(&self, track: TrackId) -> Option<NodeId> {
        self.iter()
            .find(|(_, node)| node.record.id() == track)
            .map(|(id, _)| id)
    }
}

/// Iterator over `(NodeId, &Node)` pairs of an `OrderedTrackList`.
pub struct Iter<'a> {
    list: &'a OrderedTrackList,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        let node = self.list.node(id);
        self.front = node.next;
        self.remaining -= 1;
        Some((id, node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        let node = self.list.node(id);
        self.back = node.prev;
        self.remaining -= 1;
        Some((id, node))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
