use super::*;
use crate::error::PlaylistError;
use proptest::prelude::*;
use std::time::Duration;

fn rec(id: u64) -> TrackRecord {
    TrackRecord::new(TrackId::new(id), format!("song {id}"), "artist")
}

fn ids(list: &OrderedTrackList) -> Vec<u64> {
    list.iter().map(|(_, n)| n.record().id().get()).collect()
}

fn assert_invariants(list: &OrderedTrackList) {
    let forward: Vec<NodeId> = list.iter().map(|(id, _)| id).collect();
    let mut backward: Vec<NodeId> = list.iter().rev().map(|(id, _)| id).collect();
    backward.reverse();
    assert_eq!(forward, backward);
    assert_eq!(forward.len(), list.len());

    match (list.head(), list.tail()) {
        (None, None) => assert_eq!(list.len(), 0),
        (Some(h), Some(t)) => {
            assert!(list.node(h).prev().is_none());
            assert!(list.node(t).next().is_none());
            if list.len() == 1 {
                assert_eq!(h, t);
            }
        }
        other => panic!("head/tail out of sync: {other:?}"),
    }

    for (id, node) in list.iter() {
        if let Some(next) = node.next() {
            assert_eq!(list.node(next).prev(), Some(id));
        }
    }

    let mut seen = std::collections::HashSet::new();
    for id in &forward {
        assert!(seen.insert(*id), "node visited twice");
    }
}

#[test]
fn new_list_is_empty() {
    let list = OrderedTrackList::new();
    assert!(list.is_empty());
    assert_eq!(list.head(), None);
    assert_eq!(list.tail(), None);
    assert!(list.to_snapshot().is_empty());
}

#[test]
fn single_insert_is_both_head_and_tail() {
    let mut list = OrderedTrackList::new();
    let a = list.insert_at_tail(rec(1));
    assert_eq!(list.head(), Some(a));
    assert_eq!(list.tail(), Some(a));
    assert!(list.node(a).prev().is_none());
    assert!(list.node(a).next().is_none());
    assert_invariants(&list);
}

#[test]
fn head_and_tail_inserts_order_records() {
    let mut list = OrderedTrackList::new();
    list.insert_at_tail(rec(2));
    list.insert_at_head(rec(1));
    list.insert_at_tail(rec(3));
    assert_eq!(ids(&list), vec![1, 2, 3]);
    assert_invariants(&list);
}

#[test]
fn insert_at_position_splices_before_current_index() {
    let mut list = OrderedTrackList::new();
    list.insert_at_tail(rec(1));
    list.insert_at_tail(rec(2));
    list.insert_at_tail(rec(3));

    let x = list.insert_at_position(rec(9), 1).unwrap();
    assert_eq!(ids(&list), vec![1, 9, 2, 3]);
    assert_eq!(list.position_of(x), Some(1));
    assert_invariants(&list);

    list.insert_at_position(rec(8), 3).unwrap();
    assert_eq!(ids(&list), vec![1, 9, 2, 8, 3]);
    assert_invariants(&list);
}

#[test]
fn insert_at_position_zero_on_empty_matches_head_insert() {
    let mut list = OrderedTrackList::new();
    let a = list.insert_at_position(rec(1), 0).unwrap();
    assert_eq!(list.head(), Some(a));
    assert_eq!(list.tail(), Some(a));
    assert_eq!(list.len(), 1);
}

#[test]
fn insert_at_position_len_matches_tail_insert() {
    let mut list = OrderedTrackList::new();
    list.insert_at_tail(rec(1));
    list.insert_at_tail(rec(2));
    let c = list.insert_at_position(rec(3), 2).unwrap();
    assert_eq!(list.tail(), Some(c));
    assert_eq!(ids(&list), vec![1, 2, 3]);
    assert_invariants(&list);
}

#[test]
fn insert_at_position_out_of_range_is_refused_without_changes() {
    let mut list = OrderedTrackList::new();
    list.insert_at_tail(rec(1));
    list.insert_at_tail(rec(2));

    assert_eq!(
        list.insert_at_position(rec(3), -1),
        Err(PlaylistError::InvalidPosition {
            position: -1,
            len: 2
        })
    );
    assert_eq!(
        list.insert_at_position(rec(3), 3),
        Err(PlaylistError::InvalidPosition { position: 3, len: 2 })
    );
    assert_eq!(ids(&list), vec![1, 2]);
    assert_invariants(&list);
}

#[test]
fn remove_middle_head_tail_and_last() {
    let mut list = OrderedTrackList::new();
    let a = list.insert_at_tail(rec(1));
    let b = list.insert_at_tail(rec(2));
    let c = list.insert_at_tail(rec(3));
    let d = list.insert_at_tail(rec(4));

    assert_eq!(list.remove(b).id().get(), 2);
    assert_eq!(list.node(a).next(), Some(c));
    assert_eq!(list.node(c).prev(), Some(a));
    assert_invariants(&list);

    list.remove(a);
    assert_eq!(list.head(), Some(c));
    assert!(list.node(c).prev().is_none());
    assert_invariants(&list);

    list.remove(d);
    assert_eq!(list.tail(), Some(c));
    assert!(list.node(c).next().is_none());
    assert_invariants(&list);

    list.remove(c);
    assert!(list.is_empty());
    assert_eq!(list.head(), None);
    assert_eq!(list.tail(), None);
}

#[test]
fn removing_all_in_insertion_order_returns_to_empty() {
    let mut list = OrderedTrackList::new();
    let nodes: Vec<NodeId> = (1..=5).map(|i| list.insert_at_tail(rec(i))).collect();
    for id in nodes {
        list.remove(id);
        assert_invariants(&list);
    }
    assert_eq!(list.len(), 0);
    assert_eq!(list.head(), None);
    assert_eq!(list.tail(), None);
}

#[test]
fn removed_ids_stay_dead_after_slot_reuse() {
    let mut list = OrderedTrackList::new();
    let a = list.insert_at_tail(rec(1));
    list.remove(a);
    let b = list.insert_at_tail(rec(2));

    assert!(!list.contains(a));
    assert!(list.contains(b));
    assert!(list.get(a).is_none());
}

#[test]
fn ids_from_another_list_do_not_resolve() {
    let mut one = OrderedTrackList::new();
    let mut two = OrderedTrackList::new();
    let a = one.insert_at_tail(rec(1));
    two.insert_at_tail(rec(1));
    assert!(!two.contains(a));
    assert_eq!(two.position_of(a), None);
}

#[test]
#[should_panic(expected = "stale or foreign node reference")]
fn removing_a_stale_id_panics() {
    let mut list = OrderedTrackList::new();
    let a = list.insert_at_tail(rec(1));
    list.insert_at_tail(rec(2));
    list.remove(a);
    list.remove(a);
}

#[test]
#[should_panic(expected = "stale or foreign node reference")]
fn removing_a_foreign_id_panics() {
    let mut one = OrderedTrackList::new();
    let mut two = OrderedTrackList::new();
    let a = one.insert_at_tail(rec(1));
    two.insert_at_tail(rec(2));
    two.remove(a);
}

#[test]
fn snapshot_does_not_follow_later_mutations() {
    let mut list = OrderedTrackList::new();
    let a = list.insert_at_tail(rec(1));
    let snap = list.to_snapshot();
    list.insert_at_tail(rec(2));
    assert_eq!(snap, vec![a]);
    assert_eq!(list.to_snapshot().len(), 2);
}

#[test]
fn nth_find_and_record_mut() {
    let mut list = OrderedTrackList::new();
    list.insert_at_tail(rec(10));
    let b = list.insert_at_tail(rec(20));

    assert_eq!(list.nth(1), Some(b));
    assert_eq!(list.nth(2), None);
    assert_eq!(list.find_by_track(TrackId::new(20)), Some(b));
    assert_eq!(list.find_by_track(TrackId::new(99)), None);

    list.record_mut(b)
        .unwrap()
        .set_media(MediaHandle::new("/music/b.flac"));
    assert_eq!(
        list.node(b).record().media().map(|m| m.path().to_path_buf()),
        Some(std::path::PathBuf::from("/music/b.flac"))
    );
}

#[test]
fn iter_reports_exact_size_from_both_ends() {
    let mut list = OrderedTrackList::new();
    for i in 1..=4 {
        list.insert_at_tail(rec(i));
    }
    let mut it = list.iter();
    assert_eq!(it.len(), 4);
    assert_eq!(it.next().map(|(_, n)| n.record().id().get()), Some(1));
    assert_eq!(it.next_back().map(|(_, n)| n.record().id().get()), Some(4));
    assert_eq!(it.len(), 2);
    let rest: Vec<u64> = it.map(|(_, n)| n.record().id().get()).collect();
    assert_eq!(rest, vec![2, 3]);
}

#[test]
fn duration_labels_format_and_parse() {
    assert_eq!(format_duration_label(Duration::from_secs(0)), "0:00");
    assert_eq!(format_duration_label(Duration::from_millis(65_900)), "1:05");
    assert_eq!(format_duration_label(Duration::from_secs(3_600)), "60:00");

    assert_eq!(parse_duration_label("3:07"), Some(Duration::from_secs(187)));
    assert_eq!(parse_duration_label(" 0:00 "), Some(Duration::ZERO));
    assert_eq!(parse_duration_label("3:7"), None);
    assert_eq!(parse_duration_label("3:75"), None);
    assert_eq!(parse_duration_label("abc"), None);
}

#[test]
fn record_from_draft_keeps_metadata() {
    let draft = TrackDraft::new("Song", "Band")
        .with_duration(Duration::from_secs(200))
        .with_media(MediaHandle::new("/m/song.mp3"));
    let record = TrackRecord::from_draft(TrackId::new(7), draft.clone());

    assert_eq!(record.id(), TrackId::new(7));
    assert_eq!(record.duration_label(), "3:20");
    assert_eq!(record.display(), "Band - Song");
    assert_eq!(record.to_draft(), draft);

    let bare = TrackRecord::new(TrackId::new(8), "Solo", "  ");
    assert_eq!(bare.duration_label(), UNKNOWN_DURATION_LABEL);
    assert_eq!(bare.display(), "Solo");
}

#[derive(Debug, Clone)]
enum Op {
    Head,
    Tail,
    At(isize),
    Remove(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Head),
        Just(Op::Tail),
        (-2isize..12).prop_map(Op::At),
        (0usize..12).prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn adjacency_invariants_hold_after_random_ops(ops in proptest::collection::vec(op(), 1..150)) {
        let mut list = OrderedTrackList::new();
        let mut model: Vec<u64> = Vec::new();
        let mut next_id = 1u64;

        for op in ops {
            match op {
                Op::Head => {
                    list.insert_at_head(rec(next_id));
                    model.insert(0, next_id);
                    next_id += 1;
                }
                Op::Tail => {
                    list.insert_at_tail(rec(next_id));
                    model.push(next_id);
                    next_id += 1;
                }
                Op::At(p) => {
                    let ok = p >= 0 && (p as usize) <= model.len();
                    let res = list.insert_at_position(rec(next_id), p);
                    prop_assert_eq!(res.is_ok(), ok);
                    if ok {
                        model.insert(p as usize, next_id);
                        next_id += 1;
                    }
                }
                Op::Remove(i) => {
                    if let Some(id) = list.nth(i) {
                        let removed = list.remove(id);
                        prop_assert_eq!(removed.id().get(), model.remove(i));
                    }
                }
            }
            assert_invariants(&list);
            prop_assert_eq!(ids(&list), model.clone());
        }
    }
}
