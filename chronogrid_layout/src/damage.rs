// Copyright 2026 the Chronogrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Repaint damage derived from drained sheet changes.

use alloc::vec::Vec;

use chronogrid_core::config::Strategy;
use chronogrid_core::sheet::{Sheet, SheetChanges};
use chronogrid_core::trace::Tracer;
use kurbo::Rect;

use crate::cache::LayoutCache;

/// A region of the grid that needs repainting.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DamageRegion {
    /// The whole grid needs repainting.
    #[default]
    Full,
    /// Axis-aligned rectangles in content coordinates.
    Rects(Vec<Rect>),
    /// Nothing changed; the previous paint can be reused.
    None,
}

impl DamageRegion {
    /// Returns `true` if no region needs repainting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Merges another damage region into this one.
    pub fn merge(&mut self, other: &Self) {
        match (&*self, other) {
            (Self::Full, _) | (_, Self::Full) => *self = Self::Full,
            (Self::None, _) => *self = other.clone(),
            (_, Self::None) => {}
            (Self::Rects(a), Self::Rects(b)) => {
                let mut merged = a.clone();
                merged.extend_from_slice(b);
                *self = Self::Rects(merged);
            }
        }
    }
}

impl LayoutCache {
    /// Computes the repaint region for `changes`, bringing the layout up to
    /// date first.
    ///
    /// Under the time-aligned strategy any edit can move a shared band, so
    /// every non-empty change set damages the whole grid. Under the ordinal
    /// strategy each touched visible track damages its own column, from the
    /// header down to the tallest content height seen since the previous
    /// call. Track creation, removal, reordering, and visibility changes
    /// always give [`DamageRegion::Full`].
    pub fn damage(&mut self, sheet: &Sheet, changes: &SheetChanges) -> DamageRegion {
        self.damage_traced(sheet, changes, &mut Tracer::none())
    }

    /// Like [`damage`](Self::damage), emitting trace events.
    pub fn damage_traced(
        &mut self,
        sheet: &Sheet,
        changes: &SheetChanges,
        tracer: &mut Tracer<'_>,
    ) -> DamageRegion {
        self.update_traced(sheet, tracer);
        let height = self.damage_high_water.max(self.bounds().height);
        self.damage_high_water = self.bounds().height;

        if changes.is_empty() {
            return DamageRegion::None;
        }
        if changes.topology_changed || self.config().strategy == Strategy::TimeAligned {
            return DamageRegion::Full;
        }

        let width = self.config().track_width;
        let top = self.config().header_height;
        let rects: Vec<Rect> = changes
            .touched_tracks()
            .into_iter()
            .filter_map(|slot| self.track_column_slot(slot))
            .map(|col| {
                let x0 = f64::from(col) * width;
                Rect::new(x0, top, x0 + width, height.max(top))
            })
            .collect();

        #[cfg(feature = "trace-rich")]
        tracer.damage_rects(self.pass_index(), &rects);

        if rects.is_empty() {
            DamageRegion::None
        } else {
            DamageRegion::Rects(rects)
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use chronogrid_core::config::LayoutConfig;
    use chronogrid_core::time::Millis;

    use super::*;

    fn ordinal() -> LayoutConfig {
        LayoutConfig {
            min_block_height: 10.0,
            track_width: 100.0,
            header_height: 20.0,
            ..LayoutConfig::ordinal()
        }
    }

    #[test]
    fn merge_rules() {
        let r = Rect::new(0.0, 0.0, 1.0, 1.0);
        let mut d = DamageRegion::None;
        d.merge(&DamageRegion::Rects(vec![r]));
        assert_eq!(d, DamageRegion::Rects(vec![r]));
        d.merge(&DamageRegion::Rects(vec![r]));
        assert_eq!(d, DamageRegion::Rects(vec![r, r]));
        d.merge(&DamageRegion::None);
        assert!(!d.is_empty());
        d.merge(&DamageRegion::Full);
        assert_eq!(d, DamageRegion::Full);
    }

    #[test]
    fn nothing_drained_is_no_damage() {
        let mut sheet = Sheet::new();
        let t = sheet.create_track();
        let _ = sheet.add_interval(t, Millis(0), Millis(1));
        let _ = sheet.drain_changes();

        let mut cache = LayoutCache::new(ordinal());
        let changes = sheet.drain_changes();
        assert!(cache.damage(&sheet, &changes).is_empty());
    }

    #[test]
    fn topology_change_is_full() {
        let mut sheet = Sheet::new();
        let _ = sheet.create_track();
        let mut cache = LayoutCache::new(ordinal());
        let changes = sheet.drain_changes();
        assert!(changes.topology_changed);
        assert_eq!(cache.damage(&sheet, &changes), DamageRegion::Full);
    }

    #[test]
    fn time_aligned_edits_are_full() {
        let mut sheet = Sheet::new();
        let t = sheet.create_track();
        let i = sheet.add_interval(t, Millis(0), Millis(1));
        let mut cache = LayoutCache::new(LayoutConfig::time_aligned());
        let changes = sheet.drain_changes();
        let _ = cache.damage(&sheet, &changes);

        sheet.set_end(i, Millis(5));
        let changes = sheet.drain_changes();
        assert!(!changes.topology_changed);
        assert_eq!(cache.damage(&sheet, &changes), DamageRegion::Full);
    }

    #[test]
    fn ordinal_edit_damages_its_column() {
        let mut sheet = Sheet::new();
        let a = sheet.create_track();
        let b = sheet.create_track();
        let _ = sheet.add_interval(a, Millis(0), Millis(1));
        let ib = sheet.add_interval(b, Millis(0), Millis(1));
        let mut cache = LayoutCache::new(ordinal());
        let changes = sheet.drain_changes();
        let _ = cache.damage(&sheet, &changes);

        let _ = sheet.add_interval(b, Millis(5), Millis(6));
        let changes = sheet.drain_changes();
        assert_eq!(
            cache.damage(&sheet, &changes),
            DamageRegion::Rects(vec![Rect::new(100.0, 20.0, 200.0, 40.0)])
        );

        sheet.remove_interval(ib);
        let changes = sheet.drain_changes();
        assert_eq!(
            cache.damage(&sheet, &changes),
            DamageRegion::Rects(vec![Rect::new(100.0, 20.0, 200.0, 40.0)]),
            "covers the taller previous content"
        );
    }

    #[test]
    fn edits_in_hidden_tracks_are_no_damage() {
        let mut sheet = Sheet::new();
        let a = sheet.create_track();
        let _ = sheet.create_track();
        let i = sheet.add_interval(a, Millis(0), Millis(1));
        sheet.set_track_hidden(a, true);
        let mut cache = LayoutCache::new(ordinal());
        let changes = sheet.drain_changes();
        let _ = cache.damage(&sheet, &changes);

        sheet.set_start(i, Millis(-5));
        let changes = sheet.drain_changes();
        assert_eq!(cache.damage(&sheet, &changes), DamageRegion::None);
    }
}
