//! Property-based tests for the play queue
//!
//! Uses proptest to verify the structural invariants across many random
//! inputs: the active ordering is always a permutation of the canonical one,
//! and the current position is always valid.

use chorus_core::types::{Track, TrackId};
use chorus_playback::{NavigationContext, PlayQueue, RepeatMode};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::HashMap;

// ===== Helpers =====

fn create_track(id: TrackId) -> Track {
    let mut track = Track::new(1, format!("Track {id}"), format!("https://cdn.example/{id}.mp3"));
    track.id = id;
    track
}

fn build_queue(ids: &[TrackId], offset: usize) -> PlayQueue {
    let mut queue = PlayQueue::new();
    let tracks: Vec<Track> = ids.iter().map(|&id| create_track(id)).collect();
    let context = NavigationContext::from_general("Feed", ids.to_vec(), offset);
    queue.set_queue(tracks, context);
    queue
}

fn id_multiset(tracks: &[Track]) -> HashMap<TrackId, usize> {
    let mut counts = HashMap::new();
    for track in tracks {
        *counts.entry(track.id).or_insert(0) += 1;
    }
    counts
}

fn check_invariants(queue: &PlayQueue) -> Result<(), TestCaseError> {
    prop_assert_eq!(
        id_multiset(queue.active_tracks()),
        id_multiset(queue.canonical_tracks()),
        "active must be a permutation of canonical"
    );
    match queue.current_index() {
        Some(index) => prop_assert!(index < queue.len(), "current index out of range"),
        None => prop_assert!(queue.is_empty(), "only an empty queue may have no position"),
    }
    Ok(())
}

fn arbitrary_ids() -> impl Strategy<Value = Vec<TrackId>> {
    prop::collection::vec(1i64..200, 1..40)
}

#[derive(Debug, Clone)]
enum Op {
    Next,
    Previous,
    JumpTo(usize),
    Add(TrackId),
    Remove(usize),
    Move(usize, usize),
    ToggleShuffle,
    CycleRepeat,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Next),
        Just(Op::Previous),
        (0usize..64).prop_map(Op::JumpTo),
        (200i64..300).prop_map(Op::Add),
        (0usize..64).prop_map(Op::Remove),
        ((0usize..64), (0usize..64)).prop_map(|(from, to)| Op::Move(from, to)),
        Just(Op::ToggleShuffle),
        Just(Op::CycleRepeat),
    ]
}

// ===== Property Tests =====

proptest! {
    /// Invariants survive arbitrary operation sequences
    #[test]
    fn invariants_hold_under_arbitrary_operations(
        ids in arbitrary_ids(),
        offset in 0usize..40,
        ops in prop::collection::vec(arbitrary_op(), 1..60)
    ) {
        let mut queue = build_queue(&ids, offset);
        check_invariants(&queue)?;

        for op in ops {
            match op {
                Op::Next => { queue.next(); }
                Op::Previous => { queue.previous(); }
                Op::JumpTo(index) => { queue.jump_to_index(index); }
                Op::Add(id) => queue.add_track(create_track(id)),
                Op::Remove(index) => { queue.remove_track(index); }
                Op::Move(from, to) => { queue.move_track(from, to); }
                Op::ToggleShuffle => { queue.toggle_shuffle(); }
                Op::CycleRepeat => { queue.cycle_repeat_mode(); }
            }
            check_invariants(&queue)?;
        }
    }

    /// Shuffle on/off round-trips to exactly the canonical ordering with the
    /// same track current
    #[test]
    fn shuffle_round_trip_restores_canonical(
        ids in arbitrary_ids(),
        offset in 0usize..40,
    ) {
        let mut queue = build_queue(&ids, offset);
        let before: Vec<TrackId> = queue.active_tracks().iter().map(|t| t.id).collect();
        let current_before = queue.current_track().map(|t| t.id);

        queue.set_shuffle(true);
        check_invariants(&queue)?;
        prop_assert_eq!(queue.current_track().map(|t| t.id), current_before);

        queue.set_shuffle(false);
        check_invariants(&queue)?;
        let after: Vec<TrackId> = queue.active_tracks().iter().map(|t| t.id).collect();
        prop_assert_eq!(after, before);
        prop_assert_eq!(queue.current_track().map(|t| t.id), current_before);
    }

    /// Under RepeatMode::One navigation never changes the current track
    #[test]
    fn repeat_one_is_a_fixed_point(
        ids in arbitrary_ids(),
        offset in 0usize..40,
        steps in 1usize..20,
    ) {
        let mut queue = build_queue(&ids, offset);
        queue.set_repeat(RepeatMode::One);
        let pinned = queue.current_track().map(|t| t.id);

        for _ in 0..steps {
            prop_assert_eq!(queue.next().map(|t| t.id), pinned);
            prop_assert_eq!(queue.previous().map(|t| t.id), pinned);
        }
        prop_assert_eq!(queue.current_track().map(|t| t.id), pinned);
    }

    /// Under RepeatMode::All repeated next() visits every position
    #[test]
    fn repeat_all_cycles_through_every_position(
        ids in prop::collection::vec(1i64..100, 1..15),
    ) {
        let mut queue = build_queue(&ids, 0);
        queue.set_repeat(RepeatMode::All);

        let len = queue.len();
        let mut seen = std::collections::HashSet::new();
        seen.insert(queue.current_index().unwrap());
        for _ in 0..len {
            queue.next();
            seen.insert(queue.current_index().unwrap());
        }
        prop_assert_eq!(seen.len(), len);
    }
}
