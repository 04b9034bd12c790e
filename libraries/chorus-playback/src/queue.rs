//! Playback queue
//!
//! Holds a canonical (insertion-order) track list and a derived active list
//! used for navigation. The active list equals the canonical list, or a
//! shuffled permutation of it; either way it is always a permutation of the
//! canonical list (same id multiset). Next/previous/jump requests resolve
//! under the repeat-mode policy.
//!
//! All operations on empty or out-of-range input are no-ops returning
//! `None`/`false`; nothing here panics.

use crate::navigation::{ContextKind, NavigationContext};
use crate::snapshot::QueueInfo;
use crate::types::RepeatMode;
use chorus_core::types::{Track, TrackId};
use rand::seq::SliceRandom;
use rand::thread_rng;

/// Queue with canonical and active orderings
#[derive(Debug, Clone, Default)]
pub struct PlayQueue {
    /// Insertion-order track list, unaffected by shuffle
    canonical: Vec<Track>,

    /// Ordering used for navigation (canonical, or a permutation of it)
    active: Vec<Track>,

    /// Current position in the active ordering; `None` when empty
    current: Option<usize>,

    /// Whether the active ordering is currently a shuffle permutation
    shuffled: bool,

    /// Navigation edge policy
    repeat: RepeatMode,

    /// How the user arrived at this queue
    context: Option<NavigationContext>,
}

impl PlayQueue {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Queue management =====

    /// Replace the queue contents from a browsing context
    ///
    /// The current position comes from the context offset (clamped). With
    /// shuffle on, a fresh permutation is drawn and the position relocated so
    /// it still points at the requested track.
    pub fn set_queue(&mut self, tracks: Vec<Track>, context: NavigationContext) {
        self.canonical = tracks;
        let offset = context.offset();
        self.context = Some(context);

        if self.canonical.is_empty() {
            self.active.clear();
            self.current = None;
            return;
        }

        let clamped = offset.min(self.canonical.len() - 1);
        let requested = self.canonical[clamped].id;

        if self.shuffled {
            self.active = Self::permutation_of(&self.canonical);
            self.current = self
                .active
                .iter()
                .position(|t| t.id == requested)
                .or(Some(0));
        } else {
            self.active = self.canonical.clone();
            self.current = Some(clamped);
        }
    }

    /// Append a track to the end of the canonical list
    pub fn add_track(&mut self, track: Track) {
        let end = self.canonical.len();
        self.insert_track(end, track);
    }

    /// Insert a track at a canonical position
    ///
    /// The current position shifts forward when the insertion lands at or
    /// before it. While shuffle is active the new track joins the END of the
    /// active ordering; the permutation already played out is not redrawn.
    pub fn insert_track(&mut self, position: usize, track: Track) -> bool {
        if position > self.canonical.len() {
            return false;
        }

        self.canonical.insert(position, track.clone());

        if self.shuffled {
            self.active.push(track);
        } else {
            if let Some(current) = self.current {
                if position <= current {
                    self.current = Some(current + 1);
                }
            }
            self.active = self.canonical.clone();
        }

        if self.current.is_none() {
            self.current = Some(0);
        }
        true
    }

    /// Remove the track at a canonical position
    pub fn remove_track(&mut self, position: usize) -> Option<Track> {
        if position >= self.canonical.len() {
            return None;
        }

        let removed = self.canonical.remove(position);

        // Locate the removal in the active ordering. Without shuffle the
        // orderings are identical, so the index carries over; with shuffle we
        // resolve by id (first match keeps the multiset invariant intact even
        // for duplicate ids).
        let active_idx = if self.shuffled {
            self.active
                .iter()
                .position(|t| t.id == removed.id)
                .unwrap_or(0)
        } else {
            position
        };
        self.active.remove(active_idx);

        self.current = match self.current {
            None => None,
            Some(current) if active_idx < current => Some(current - 1),
            Some(current) if active_idx == current => {
                if self.active.is_empty() {
                    None
                } else {
                    Some(current.min(self.active.len() - 1))
                }
            }
            Some(current) => Some(current),
        };

        Some(removed)
    }

    /// Move a track between canonical positions
    ///
    /// The current position follows the moved item when it is current, and
    /// shifts by one when the move interval brackets it from either side.
    /// While shuffled the active ordering is independent of canonical order,
    /// so only the canonical list changes.
    pub fn move_track(&mut self, from: usize, to: usize) -> bool {
        let len = self.canonical.len();
        if from >= len || to >= len {
            return false;
        }
        if from == to {
            return true;
        }

        let track = self.canonical.remove(from);
        self.canonical.insert(to, track);

        if self.shuffled {
            return true;
        }

        self.active = self.canonical.clone();
        self.current = match self.current {
            None => None,
            Some(current) if current == from => Some(to),
            Some(current) if from < current && to >= current => Some(current - 1),
            Some(current) if from > current && to <= current => Some(current + 1),
            Some(current) => Some(current),
        };
        true
    }

    /// Clear the queue and its context
    ///
    /// Shuffle and repeat settings survive a clear.
    pub fn clear(&mut self) {
        self.canonical.clear();
        self.active.clear();
        self.current = None;
        self.context = None;
    }

    // ===== Navigation =====

    /// Advance under the repeat policy
    ///
    /// `One` returns the current track unchanged; `All` wraps at the end;
    /// `Off` advances only while in range, else returns `None` without
    /// moving.
    pub fn next(&mut self) -> Option<Track> {
        if self.active.is_empty() {
            return None;
        }

        match self.repeat {
            RepeatMode::One => self.current_track().cloned(),
            RepeatMode::All => {
                let len = self.active.len();
                let next = self.current.map_or(0, |c| (c + 1) % len);
                self.move_current_to(next)
            }
            RepeatMode::Off => {
                if self.has_next() {
                    let next = self.current.map_or(0, |c| c + 1);
                    self.move_current_to(next)
                } else {
                    None
                }
            }
        }
    }

    /// Retreat under the repeat policy (mirror of [`Self::next`])
    pub fn previous(&mut self) -> Option<Track> {
        if self.active.is_empty() {
            return None;
        }

        match self.repeat {
            RepeatMode::One => self.current_track().cloned(),
            RepeatMode::All => {
                let len = self.active.len();
                let prev = self
                    .current
                    .map_or(0, |c| if c == 0 { len - 1 } else { c - 1 });
                self.move_current_to(prev)
            }
            RepeatMode::Off => {
                if self.has_previous() {
                    let prev = self.current.map_or(0, |c| c - 1);
                    self.move_current_to(prev)
                } else {
                    None
                }
            }
        }
    }

    /// Jump to a position in the active ordering
    pub fn jump_to_index(&mut self, index: usize) -> Option<Track> {
        if index >= self.active.len() {
            return None;
        }
        self.move_current_to(index)
    }

    /// Jump to a track by id, searching the active ordering
    pub fn jump_to_track(&mut self, track_id: TrackId) -> Option<Track> {
        let index = self.active.iter().position(|t| t.id == track_id)?;
        self.move_current_to(index)
    }

    fn move_current_to(&mut self, index: usize) -> Option<Track> {
        let track = self.active.get(index)?.clone();
        self.current = Some(index);
        self.sync_context();
        Some(track)
    }

    /// Keep the context offset pointing at the current track, so that
    /// provenance stepping and the shuffle-off restore agree with wherever
    /// navigation has taken us.
    fn sync_context(&mut self) {
        let Some(track_id) = self.current_track().map(|t| t.id) else {
            return;
        };
        let Some(ctx) = self.context.as_ref() else {
            return;
        };
        let Some(pos) = ctx.track_ids().iter().position(|&id| id == track_id) else {
            return;
        };
        if pos != ctx.offset() {
            let stepped = ctx.at_offset(pos);
            self.context = Some(stepped);
        }
    }

    // ===== Shuffle & repeat =====

    /// Flip the shuffle flag, returning the new state
    pub fn toggle_shuffle(&mut self) -> bool {
        self.set_shuffle(!self.shuffled);
        self.shuffled
    }

    /// Set the shuffle flag
    ///
    /// Enabling draws a uniform random permutation of the canonical list as
    /// the new active ordering while keeping the current track current.
    /// Disabling restores the canonical ordering, again preserving the
    /// current track's identity.
    pub fn set_shuffle(&mut self, enabled: bool) {
        if self.shuffled == enabled {
            return;
        }
        self.shuffled = enabled;

        if self.canonical.is_empty() {
            self.active.clear();
            self.current = None;
            return;
        }

        let current_id = self.current_track().map(|t| t.id);

        if enabled {
            self.active = Self::permutation_of(&self.canonical);
            self.current = current_id
                .and_then(|id| self.active.iter().position(|t| t.id == id))
                .or(Some(0));
        } else {
            self.active = self.canonical.clone();
            self.current = current_id
                .and_then(|id| self.canonical.iter().position(|t| t.id == id))
                .or_else(|| {
                    self.context
                        .as_ref()
                        .map(|c| c.offset().min(self.canonical.len() - 1))
                })
                .or(Some(0));
        }
    }

    fn permutation_of(tracks: &[Track]) -> Vec<Track> {
        let mut permuted = tracks.to_vec();
        permuted.shuffle(&mut thread_rng());
        permuted
    }

    /// Cycle the repeat mode: Off → All → One → Off
    pub fn cycle_repeat_mode(&mut self) -> RepeatMode {
        self.repeat = self.repeat.cycled();
        self.repeat
    }

    /// Set the repeat mode directly
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.repeat = mode;
    }

    // ===== Getters =====

    /// Track at the current position
    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|c| self.active.get(c))
    }

    /// Current position in the active ordering; `None` when empty
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Whether a later active position exists
    pub fn has_next(&self) -> bool {
        self.current
            .is_some_and(|c| c + 1 < self.active.len())
    }

    /// Whether an earlier active position exists
    pub fn has_previous(&self) -> bool {
        self.current.is_some_and(|c| c > 0)
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// The active (navigation) ordering
    pub fn active_tracks(&self) -> &[Track] {
        &self.active
    }

    /// The canonical (insertion) ordering
    pub fn canonical_tracks(&self) -> &[Track] {
        &self.canonical
    }

    /// Whether the active ordering is a shuffle permutation
    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    /// Current repeat mode
    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat
    }

    /// The browsing context the queue was built from
    pub fn context(&self) -> Option<&NavigationContext> {
        self.context.as_ref()
    }

    /// Display projection for queue screens
    pub fn queue_info(&self) -> QueueInfo {
        QueueInfo {
            current_index: self.current,
            total: self.active.len(),
            has_previous: self.has_previous(),
            has_next: self.has_next(),
            title: self
                .context
                .as_ref()
                .map_or_else(|| "Queue".to_string(), |c| c.title().to_string()),
            kind: self
                .context
                .as_ref()
                .map_or(ContextKind::General, NavigationContext::kind),
        }
    }
}
