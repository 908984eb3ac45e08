// Copyright 2026 the Chronogrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena storage for tracks and intervals with allocation, ordering, and
//! revision management.

use alloc::vec::Vec;

use understory_dirty::{CycleHandling, DirtyTracker};

use super::id::{INVALID, IntervalId, TrackId};
use super::traverse::Intervals;
use crate::dirty;
use crate::time::Millis;

/// Arena storage for all tracks and intervals of one annotation sheet.
///
/// Tracks and intervals are addressed by [`TrackId`] and [`IntervalId`]
/// handles. Internally each occupies a slot in parallel arrays. Destroyed
/// slots are recycled via free lists, and generation counters prevent stale
/// handle access.
///
/// Every mutating method increments the [revision](Self::revision) counter.
/// Methods that would not change anything (hiding an already hidden track,
/// setting a time to its current value) leave it untouched.
#[derive(Debug)]
pub struct Sheet {
    // -- Tracks --
    pub(crate) track_generation: Vec<u32>,
    pub(crate) track_alive: Vec<bool>,
    pub(crate) track_hidden: Vec<bool>,
    pub(crate) track_members: Vec<Vec<u32>>,
    pub(crate) track_next_ordinal: Vec<u64>,
    pub(crate) track_free: Vec<u32>,
    pub(crate) track_len: u32,
    /// Live track slots in display order.
    pub(crate) display_order: Vec<u32>,

    // -- Intervals --
    pub(crate) start: Vec<Millis>,
    pub(crate) end: Vec<Millis>,
    pub(crate) ordinal: Vec<u64>,
    pub(crate) owner: Vec<u32>,
    pub(crate) interval_generation: Vec<u32>,
    pub(crate) interval_free: Vec<u32>,
    pub(crate) interval_len: u32,
    pub(crate) live_intervals: u32,

    // -- Change tracking --
    pub(crate) revision: u64,
    pub(crate) dirty: DirtyTracker<u32>,
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}

impl Sheet {
    /// Creates an empty sheet at revision 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            track_generation: Vec::new(),
            track_alive: Vec::new(),
            track_hidden: Vec::new(),
            track_members: Vec::new(),
            track_next_ordinal: Vec::new(),
            track_free: Vec::new(),
            track_len: 0,
            display_order: Vec::new(),
            start: Vec::new(),
            end: Vec::new(),
            ordinal: Vec::new(),
            owner: Vec::new(),
            interval_generation: Vec::new(),
            interval_free: Vec::new(),
            interval_len: 0,
            live_intervals: 0,
            revision: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
        }
    }

    /// Returns the revision counter.
    ///
    /// Starts at 0 and increases by one for every mutation. It is never
    /// reset.
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // -- Track allocation API --

    /// Creates a new visible, empty track at the end of the display order.
    pub fn create_track(&mut self) -> TrackId {
        let position = self.display_order.len();
        self.insert_track(position)
    }

    /// Creates a new visible, empty track at display `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is greater than [`track_count`](Self::track_count).
    pub fn insert_track(&mut self, position: usize) -> TrackId {
        assert!(
            position <= self.display_order.len(),
            "track position {position} out of range (count {})",
            self.display_order.len()
        );

        let idx = if let Some(idx) = self.track_free.pop() {
            // Reuse a freed slot.
            let i = idx as usize;
            self.track_generation[i] += 1;
            self.track_alive[i] = true;
            self.track_hidden[i] = false;
            self.track_members[i].clear();
            self.track_next_ordinal[i] = 0;
            idx
        } else {
            let idx = self.track_len;
            self.track_len += 1;
            self.track_generation.push(0);
            self.track_alive.push(true);
            self.track_hidden.push(false);
            self.track_members.push(Vec::new());
            self.track_next_ordinal.push(0);
            idx
        };

        self.display_order.insert(position, idx);
        self.bump();
        self.dirty.mark(idx, dirty::TOPOLOGY);

        TrackId {
            idx,
            generation: self.track_generation[idx as usize],
        }
    }

    /// Destroys a track and every interval it holds.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_track(&mut self, id: TrackId) {
        self.validate_track(id);
        let t = id.idx as usize;

        let members = core::mem::take(&mut self.track_members[t]);
        for idx in members {
            self.free_interval_slot(idx);
        }

        if let Some(pos) = self.display_order.iter().position(|&s| s == id.idx) {
            self.display_order.remove(pos);
        }

        // Bump generation so old handles immediately fail validation.
        self.track_generation[t] += 1;
        self.track_alive[t] = false;
        self.track_free.push(id.idx);

        self.dirty.remove_key(id.idx);
        self.bump();
        self.dirty.mark(id.idx, dirty::TOPOLOGY);
    }

    /// Returns whether the given handle refers to a live track.
    #[must_use]
    pub fn is_track_alive(&self, id: TrackId) -> bool {
        id.idx < self.track_len
            && self.track_generation[id.idx as usize] == id.generation
            && self.track_alive[id.idx as usize]
    }

    // -- Track ordering and visibility --

    /// Moves a track to display `position`, shifting the tracks in between.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `position` is not less than
    /// [`track_count`](Self::track_count).
    pub fn move_track(&mut self, id: TrackId, position: usize) {
        self.validate_track(id);
        assert!(
            position < self.display_order.len(),
            "track position {position} out of range (count {})",
            self.display_order.len()
        );
        let current = self.track_position(id);
        if current == position {
            return;
        }
        let idx = self.display_order.remove(current);
        self.display_order.insert(position, idx);
        self.bump();
        self.dirty.mark(id.idx, dirty::TOPOLOGY);
    }

    /// Hides or unhides a track.
    ///
    /// Hidden tracks keep their intervals but are excluded from
    /// [`visible_tracks`](Self::visible_tracks).
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_track_hidden(&mut self, id: TrackId, hidden: bool) {
        self.validate_track(id);
        if self.track_hidden[id.idx as usize] == hidden {
            return;
        }
        self.track_hidden[id.idx as usize] = hidden;
        self.bump();
        self.dirty.mark(id.idx, dirty::TOPOLOGY);
    }

    /// Returns whether a track is hidden.
    #[must_use]
    pub fn is_track_hidden(&self, id: TrackId) -> bool {
        self.validate_track(id);
        self.track_hidden[id.idx as usize]
    }

    /// Returns the display position of a track among all live tracks.
    #[must_use]
    pub fn track_position(&self, id: TrackId) -> usize {
        self.validate_track(id);
        self.display_order
            .iter()
            .position(|&s| s == id.idx)
            .unwrap_or_else(|| unreachable!("live track {id:?} missing from display order"))
    }

    /// Returns the number of live tracks, hidden ones included.
    #[must_use]
    pub fn track_count(&self) -> usize {
        self.display_order.len()
    }

    /// Returns one past the highest track slot index ever allocated.
    ///
    /// Every live [`TrackId::index`] is below this bound.
    #[must_use]
    pub fn track_capacity(&self) -> u32 {
        self.track_len
    }

    /// Returns every live track in display order, hidden ones included.
    #[must_use]
    pub fn tracks(&self) -> Vec<TrackId> {
        self.display_order
            .iter()
            .map(|&idx| self.track_handle(idx))
            .collect()
    }

    /// Returns the visible tracks in display order.
    ///
    /// A track's index in this list is its layout column.
    #[must_use]
    pub fn visible_tracks(&self) -> Vec<TrackId> {
        self.display_order
            .iter()
            .filter(|&&idx| !self.track_hidden[idx as usize])
            .map(|&idx| self.track_handle(idx))
            .collect()
    }

    // -- Interval allocation API --

    /// Adds an interval to the end of a track and returns its handle.
    ///
    /// The interval receives the track's next ordinal. `end` may be less
    /// than, equal to, or greater than `start`.
    ///
    /// # Panics
    ///
    /// Panics if the track handle is stale.
    pub fn add_interval(&mut self, track: TrackId, start: Millis, end: Millis) -> IntervalId {
        self.validate_track(track);
        let t = track.idx as usize;
        let ordinal = self.next_ordinal(t);

        let idx = if let Some(idx) = self.interval_free.pop() {
            let i = idx as usize;
            self.interval_generation[i] += 1;
            self.start[i] = start;
            self.end[i] = end;
            self.ordinal[i] = ordinal;
            self.owner[i] = track.idx;
            idx
        } else {
            let idx = self.interval_len;
            self.interval_len += 1;
            self.start.push(start);
            self.end.push(end);
            self.ordinal.push(ordinal);
            self.owner.push(track.idx);
            self.interval_generation.push(0);
            idx
        };

        self.track_members[t].push(idx);
        self.live_intervals += 1;
        self.bump();
        self.dirty.mark(track.idx, dirty::MEMBERSHIP);

        IntervalId {
            idx,
            generation: self.interval_generation[idx as usize],
        }
    }

    /// Removes an interval from its track, freeing its slot for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn remove_interval(&mut self, id: IntervalId) {
        self.validate_interval(id);
        let owner = self.owner[id.idx as usize];
        self.unlink_from_track(id.idx);
        self.free_interval_slot(id.idx);
        self.bump();
        self.dirty.mark(owner, dirty::MEMBERSHIP);
    }

    /// Moves an interval to the end of another track.
    ///
    /// The interval keeps its identity and times but takes the destination
    /// track's next ordinal. Moving to the track it already belongs to does
    /// nothing.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn move_interval(&mut self, id: IntervalId, to: TrackId) {
        self.validate_interval(id);
        self.validate_track(to);
        let from = self.owner[id.idx as usize];
        if from == to.idx {
            return;
        }

        self.unlink_from_track(id.idx);
        let ordinal = self.next_ordinal(to.idx as usize);
        self.ordinal[id.idx as usize] = ordinal;
        self.owner[id.idx as usize] = to.idx;
        self.track_members[to.idx as usize].push(id.idx);

        self.bump();
        self.dirty.mark(from, dirty::MEMBERSHIP);
        self.dirty.mark(to.idx, dirty::MEMBERSHIP);
    }

    /// Returns whether the given handle refers to a live interval.
    #[must_use]
    pub fn is_interval_alive(&self, id: IntervalId) -> bool {
        id.idx < self.interval_len
            && self.interval_generation[id.idx as usize] == id.generation
            && self.owner[id.idx as usize] != INVALID
    }

    /// Returns the total number of live intervals, including those in
    /// hidden tracks.
    #[must_use]
    pub fn interval_count(&self) -> usize {
        self.live_intervals as usize
    }

    /// Returns one past the highest interval slot index ever allocated.
    ///
    /// Every live [`IntervalId::index`] is below this bound, which lets
    /// callers size slot-indexed side tables.
    #[must_use]
    pub fn interval_capacity(&self) -> u32 {
        self.interval_len
    }

    // -- Interval property getters --

    /// Returns an interval's start time.
    #[must_use]
    pub fn start(&self, id: IntervalId) -> Millis {
        self.validate_interval(id);
        self.start[id.idx as usize]
    }

    /// Returns an interval's end time.
    #[must_use]
    pub fn end(&self, id: IntervalId) -> Millis {
        self.validate_interval(id);
        self.end[id.idx as usize]
    }

    /// Returns an interval's ordinal within its track.
    #[must_use]
    pub fn ordinal(&self, id: IntervalId) -> u64 {
        self.validate_interval(id);
        self.ordinal[id.idx as usize]
    }

    /// Returns the track that owns an interval.
    #[must_use]
    pub fn track_of(&self, id: IntervalId) -> TrackId {
        self.validate_interval(id);
        self.track_handle(self.owner[id.idx as usize])
    }

    // -- Interval time edits --

    /// Sets an interval's start time.
    pub fn set_start(&mut self, id: IntervalId, start: Millis) {
        let end = self.end(id);
        self.set_times(id, start, end);
    }

    /// Sets an interval's end time.
    pub fn set_end(&mut self, id: IntervalId, end: Millis) {
        let start = self.start(id);
        self.set_times(id, start, end);
    }

    /// Sets both times of an interval.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_times(&mut self, id: IntervalId, start: Millis, end: Millis) {
        self.validate_interval(id);
        let i = id.idx as usize;
        if self.start[i] == start && self.end[i] == end {
            return;
        }
        self.start[i] = start;
        self.end[i] = end;
        self.bump();
        self.dirty.mark(self.owner[i], dirty::TIMING);
    }

    // -- Track contents --

    /// Returns an iterator over a track's intervals in insertion order.
    #[must_use]
    pub fn intervals(&self, track: TrackId) -> Intervals<'_> {
        self.validate_track(track);
        Intervals::new(self, &self.track_members[track.idx as usize])
    }

    /// Returns the number of intervals in a track.
    #[must_use]
    pub fn track_len(&self, track: TrackId) -> usize {
        self.validate_track(track);
        self.track_members[track.idx as usize].len()
    }

    /// Returns a track's intervals ordered by `(start, end, ordinal)`.
    ///
    /// Ordinals are unique within a track, so the order is total and
    /// deterministic.
    #[must_use]
    pub fn sorted_intervals(&self, track: TrackId) -> Vec<IntervalId> {
        let mut ids: Vec<IntervalId> = self.intervals(track).collect();
        ids.sort_unstable_by_key(|id| {
            let i = id.idx as usize;
            (self.start[i], self.end[i], self.ordinal[i])
        });
        ids
    }

    // -- Internal helpers --

    fn bump(&mut self) {
        self.revision += 1;
    }

    fn next_ordinal(&mut self, track_slot: usize) -> u64 {
        let ordinal = self.track_next_ordinal[track_slot];
        self.track_next_ordinal[track_slot] += 1;
        ordinal
    }

    fn track_handle(&self, idx: u32) -> TrackId {
        TrackId {
            idx,
            generation: self.track_generation[idx as usize],
        }
    }

    /// Removes `idx` from its owner's member list without touching dirty
    /// state.
    fn unlink_from_track(&mut self, idx: u32) {
        let owner = self.owner[idx as usize] as usize;
        let members = &mut self.track_members[owner];
        if let Some(pos) = members.iter().position(|&m| m == idx) {
            members.remove(pos);
        }
    }

    /// Releases an interval slot. The caller handles membership and dirty
    /// marking.
    fn free_interval_slot(&mut self, idx: u32) {
        let i = idx as usize;
        self.interval_generation[i] += 1;
        self.owner[i] = INVALID;
        self.interval_free.push(idx);
        self.live_intervals -= 1;
    }

    /// Panics if the handle is stale.
    fn validate_track(&self, id: TrackId) {
        assert!(
            self.is_track_alive(id),
            "stale TrackId: {id:?} (current gen: {})",
            if id.idx < self.track_len {
                self.track_generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Panics if the handle is stale.
    fn validate_interval(&self, id: IntervalId) {
        assert!(
            self.is_interval_alive(id),
            "stale IntervalId: {id:?} (current gen: {})",
            if id.idx < self.interval_len {
                self.interval_generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }
}
