// Copyright 2026 the Chronogrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change draining.
//!
//! [`SheetChanges`] uses raw track slot indices (`u32`) rather than
//! [`TrackId`](super::TrackId) handles: a drained slot may belong to a track
//! that has since been destroyed, and damage computation only needs the slot.

use alloc::vec::Vec;

use super::store::Sheet;
use crate::dirty;

/// The set of changes accumulated since the previous
/// [`Sheet::drain_changes`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SheetChanges {
    /// Track slots containing intervals whose times changed.
    pub timing: Vec<u32>,
    /// Track slots that gained or lost intervals.
    pub membership: Vec<u32>,
    /// Whether any track was created, destroyed, reordered, hidden, or
    /// unhidden.
    pub topology_changed: bool,
}

impl SheetChanges {
    /// Returns whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timing.is_empty() && self.membership.is_empty() && !self.topology_changed
    }

    /// Returns the sorted, deduplicated union of `timing` and `membership`.
    #[must_use]
    pub fn touched_tracks(&self) -> Vec<u32> {
        let mut out: Vec<u32> = self
            .timing
            .iter()
            .chain(self.membership.iter())
            .copied()
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.timing.clear();
        self.membership.clear();
        self.topology_changed = false;
    }
}

impl Sheet {
    /// Drains every dirty channel and returns what changed since the last
    /// call.
    ///
    /// Draining has no effect on the revision counter; layout recomputation
    /// is gated on the revision alone.
    pub fn drain_changes(&mut self) -> SheetChanges {
        let mut changes = SheetChanges::default();
        self.drain_changes_into(&mut changes);
        changes
    }

    /// Like [`drain_changes`](Self::drain_changes), but reuses a
    /// caller-provided buffer.
    pub fn drain_changes_into(&mut self, changes: &mut SheetChanges) {
        changes.clear();

        changes.timing = self
            .dirty
            .drain(dirty::TIMING)
            .deterministic()
            .run()
            .collect();

        changes.membership = self
            .dirty
            .drain(dirty::MEMBERSHIP)
            .deterministic()
            .run()
            .collect();

        let topology: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();
        changes.topology_changed = !topology.is_empty();
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::time::Millis;

    #[test]
    fn fresh_sheet_has_no_changes() {
        let mut sheet = Sheet::new();
        assert!(sheet.drain_changes().is_empty());
    }

    #[test]
    fn create_track_is_topology() {
        let mut sheet = Sheet::new();
        let _ = sheet.create_track();
        let changes = sheet.drain_changes();
        assert!(changes.topology_changed);
        assert!(changes.timing.is_empty());
        assert!(sheet.drain_changes().is_empty(), "second drain is empty");
    }

    #[test]
    fn time_edit_marks_timing_channel() {
        let mut sheet = Sheet::new();
        let t = sheet.create_track();
        let i = sheet.add_interval(t, Millis(0), Millis(100));
        let _ = sheet.drain_changes();

        sheet.set_end(i, Millis(200));
        let changes = sheet.drain_changes();
        assert_eq!(changes.timing, vec![t.index()]);
        assert!(changes.membership.is_empty());
        assert!(!changes.topology_changed);
    }

    #[test]
    fn move_marks_both_tracks() {
        let mut sheet = Sheet::new();
        let a = sheet.create_track();
        let b = sheet.create_track();
        let i = sheet.add_interval(a, Millis(0), Millis(100));
        let _ = sheet.drain_changes();

        sheet.move_interval(i, b);
        let changes = sheet.drain_changes();
        assert!(changes.membership.contains(&a.index()));
        assert!(changes.membership.contains(&b.index()));
    }

    #[test]
    fn touched_tracks_is_deduplicated() {
        let changes = SheetChanges {
            timing: vec![3, 1],
            membership: vec![1, 2],
            topology_changed: false,
        };
        assert_eq!(changes.touched_tracks(), vec![1, 2, 3]);
    }
}
