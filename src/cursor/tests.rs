use super::*;
use crate::playlist::{TrackId, TrackRecord};

fn rec(id: u64) -> TrackRecord {
    TrackRecord::new(TrackId::new(id), format!("song {id}"), "artist")
}

fn abc() -> (OrderedTrackList, NodeId, NodeId, NodeId) {
    let mut list = OrderedTrackList::new();
    let a = list.insert_at_tail(rec(1));
    let b = list.insert_at_tail(rec(2));
    let c = list.insert_at_tail(rec(3));
    (list, a, b, c)
}

#[test]
fn empty_cursor_refuses_navigation() {
    let (list, ..) = abc();
    let mut cursor = PlaybackCursor::new();
    assert!(!cursor.advance(&list));
    assert!(!cursor.retreat(&list));
    assert!(!cursor.on_track_ended(&list));
    assert_eq!(cursor.state(), CursorState::Empty);
    assert_eq!(cursor.playback(), PlaybackState::Stopped);
    assert!(!cursor.play());
}

#[test]
fn advance_walks_to_tail_and_stops_there() {
    let (list, a, b, c) = abc();
    let mut cursor = PlaybackCursor::new();
    cursor.on_list_became_non_empty(a);

    assert!(cursor.advance(&list));
    assert_eq!(cursor.current(), Some(b));
    assert!(cursor.advance(&list));
    assert_eq!(cursor.current(), Some(c));
    assert!(!cursor.advance(&list));
    assert_eq!(cursor.current(), Some(c));
}

#[test]
fn retreat_stops_at_head() {
    let (list, a, b, _) = abc();
    let mut cursor = PlaybackCursor::new();
    cursor.set_current(b, &list);

    assert!(cursor.retreat(&list));
    assert_eq!(cursor.current(), Some(a));
    assert!(!cursor.retreat(&list));
    assert_eq!(cursor.current(), Some(a));
}

#[test]
fn track_ended_plays_next_then_stops_without_wrapping() {
    let (list, _, b, c) = abc();
    let mut cursor = PlaybackCursor::new();
    cursor.set_current(b, &list);
    cursor.play();

    assert!(cursor.on_track_ended(&list));
    assert_eq!(cursor.current(), Some(c));
    assert_eq!(cursor.playback(), PlaybackState::Playing);

    assert!(!cursor.on_track_ended(&list));
    assert_eq!(cursor.current(), Some(c));
    assert_eq!(cursor.playback(), PlaybackState::Stopped);
}

#[test]
fn removing_current_prefers_next_and_pauses() {
    let (mut list, a, b, c) = abc();
    let mut cursor = PlaybackCursor::new();
    cursor.set_current(b, &list);
    cursor.play();

    cursor.on_node_removed(b, &list);
    list.remove(b);

    assert_eq!(cursor.current(), Some(c));
    assert_eq!(cursor.playback(), PlaybackState::Paused);
    assert_eq!(list.node(a).next(), Some(c));
    assert_eq!(list.node(c).prev(), Some(a));
}

#[test]
fn removing_current_tail_falls_back_to_prev() {
    let mut list = OrderedTrackList::new();
    let a = list.insert_at_tail(rec(1));
    let b = list.insert_at_tail(rec(2));
    let mut cursor = PlaybackCursor::new();
    cursor.set_current(b, &list);

    cursor.on_node_removed(b, &list);
    list.remove(b);

    assert_eq!(cursor.current(), Some(a));
    assert_eq!(list.len(), 1);
}

#[test]
fn removing_sole_current_node_clears_cursor_and_stops() {
    let mut list = OrderedTrackList::new();
    let a = list.insert_at_tail(rec(1));
    let mut cursor = PlaybackCursor::new();
    cursor.on_list_became_non_empty(a);
    cursor.play();

    cursor.on_node_removed(a, &list);
    list.remove(a);

    assert_eq!(cursor.state(), CursorState::Empty);
    assert_eq!(cursor.playback(), PlaybackState::Stopped);
    assert!(list.is_empty());
}

#[test]
fn removing_another_node_leaves_cursor_alone() {
    let (mut list, a, b, _) = abc();
    let mut cursor = PlaybackCursor::new();
    cursor.set_current(b, &list);
    cursor.play();

    cursor.on_node_removed(a, &list);
    list.remove(a);

    assert_eq!(cursor.current(), Some(b));
    assert_eq!(cursor.playback(), PlaybackState::Playing);
}

#[test]
fn pause_only_applies_while_playing() {
    let (list, a, ..) = abc();
    let mut cursor = PlaybackCursor::new();
    cursor.pause();
    assert_eq!(cursor.playback(), PlaybackState::Stopped);

    cursor.set_current(a, &list);
    assert!(cursor.play());
    cursor.pause();
    assert_eq!(cursor.playback(), PlaybackState::Paused);
    cursor.stop();
    assert_eq!(cursor.playback(), PlaybackState::Stopped);
}

#[test]
#[should_panic(expected = "stale or foreign node reference")]
fn set_current_rejects_removed_node() {
    let (mut list, a, ..) = abc();
    list.remove(a);
    let mut cursor = PlaybackCursor::new();
    cursor.set_current(a, &list);
}

#[test]
#[should_panic(expected = "stale or foreign node reference")]
fn on_node_removed_rejects_already_detached_node() {
    let (mut list, a, ..) = abc();
    let mut cursor = PlaybackCursor::new();
    cursor.set_current(a, &list);
    list.remove(a);
    cursor.on_node_removed(a, &list);
}
