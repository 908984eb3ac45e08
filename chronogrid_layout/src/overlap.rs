// Copyright 2026 the Chronogrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlap resolution for the time-aligned strategy.
//!
//! The resolver walks one track at a time, in display order, over intervals
//! sorted by `(start, end, ordinal)`. It keeps two pieces of state:
//!
//! - a **local** copy of the time index's start offsets, reset for every
//!   track. Placing an interval advances the offset of its start time by the
//!   chosen height, so a later interval of the same track with the same
//!   start lands below it instead of on top of it.
//! - a **running** end-offset index shared by all tracks of the pass. For
//!   each end time it records the lowest bottom edge of any interval ending
//!   there; an interval that neither clashes with nor abuts its successor
//!   extends down to that edge.
//!
//! For interval `i` with successor `n` in the same track, the first matching
//! rule decides the height:
//!
//! | condition                  | height                    | flag          |
//! |----------------------------|---------------------------|---------------|
//! | `i.start > i.end`          | minimum                   | `Inverted`    |
//! | `n.start == i.start`       | minimum                   | `SharedStart` if both occupy the start |
//! | `i.end > n.start`          | `local(n.start) - top`    | `Clash`       |
//! | `i.end == n.start`         | `local(n.start) - top`    | none          |
//! | otherwise                  | `end_offset(i.end) - top` | none          |
//!
//! In the last row the bottom never passes `local(n.start)` when a successor
//! exists, so an end band deepened by another track cannot push `i` into its
//! own successor.
//!
//! Heights are always floored to the minimum block height. When an unflagged
//! predecessor ended exactly one millisecond before `i` starts, it is snapped
//! so its bottom meets `i`'s top; back-to-back intervals then never render
//! as one merged block. The snap only looks within the current track.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use chronogrid_core::config::LayoutConfig;
use chronogrid_core::overlap::Overlap;
use chronogrid_core::time::Millis;

use crate::column::Entry;
use crate::time_index::TimeIndex;

/// Vertical placement of one interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Placement {
    pub(crate) top: f64,
    pub(crate) height: f64,
    pub(crate) overlap: Option<Overlap>,
}

impl Placement {
    pub(crate) fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Places the intervals of successive tracks against one [`TimeIndex`].
#[derive(Debug)]
pub(crate) struct Resolver<'a> {
    index: &'a TimeIndex,
    min_height: f64,
    fallback_top: f64,
    end_offsets: BTreeMap<Millis, f64>,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(index: &'a TimeIndex, config: &LayoutConfig) -> Self {
        Self {
            index,
            min_height: config.min_block_height,
            fallback_top: config.header_height,
            end_offsets: BTreeMap::new(),
        }
    }

    /// Places one track's sorted entries.
    ///
    /// Tracks must be resolved in display order: the running end-offset index
    /// carries over from one call to the next.
    pub(crate) fn resolve(&mut self, entries: &[Entry]) -> Vec<Placement> {
        let mut local = self.index.local_offsets();
        let mut out: Vec<Placement> = Vec::with_capacity(entries.len());

        for (k, entry) in entries.iter().enumerate() {
            let top = local
                .get(&entry.start)
                .copied()
                .unwrap_or(self.fallback_top);
            let next = entries.get(k + 1);

            let (raw, overlap) = if entry.start > entry.end {
                (self.min_height, Some(Overlap::Inverted))
            } else if let Some(n) = next.filter(|n| n.start == entry.start) {
                let clash = entry.end == n.end || entry.end > entry.start;
                (self.min_height, clash.then_some(Overlap::SharedStart))
            } else if let Some(n) = next.filter(|n| entry.end >= n.start) {
                let next_top = local.get(&n.start).copied().unwrap_or(top);
                let clash = entry.end > n.start;
                (next_top - top, clash.then_some(Overlap::Clash))
            } else {
                let mut bottom = self.end_offset(entry.end).unwrap_or(top);
                // Another track may have pushed this end band below our successor.
                if let Some(next_top) = next.and_then(|n| local.get(&n.start).copied()) {
                    bottom = bottom.min(next_top);
                }
                (bottom - top, None)
            };
            let height = raw.max(self.min_height);

            if k > 0 {
                let prev_end = entries[k - 1].end;
                if let Some(prev) = out.last_mut() {
                    if prev.overlap.is_none() && prev_end.immediately_precedes(entry.start) {
                        prev.height = (top - prev.top).max(self.min_height);
                        let bottom = prev.bottom();
                        self.raise_end(prev_end, bottom);
                    }
                }
            }

            if let Some(offset) = local.get_mut(&entry.start) {
                *offset += height;
            }
            self.raise_end(entry.end, top + height);

            out.push(Placement {
                top,
                height,
                overlap,
            });
        }

        out
    }

    /// Lowest recorded bottom for intervals ending at `time`, else the
    /// band offset of `time`.
    fn end_offset(&self, time: Millis) -> Option<f64> {
        self.end_offsets
            .get(&time)
            .copied()
            .or_else(|| self.index.offset(time))
    }

    fn raise_end(&mut self, time: Millis, bottom: f64) {
        let seed = self.index.offset(time).unwrap_or(bottom);
        let slot = self.end_offsets.entry(time).or_insert(seed);
        if bottom > *slot {
            *slot = bottom;
        }
    }
}

#[cfg(test)]
mod tests {
    use chronogrid_core::sheet::Sheet;

    use super::*;
    use crate::column::{Column, snapshot};

    fn config() -> LayoutConfig {
        LayoutConfig {
            min_block_height: 100.0,
            track_width: 200.0,
            band_gap: 0.0,
            header_height: 50.0,
            ..LayoutConfig::time_aligned()
        }
    }

    fn resolve_all(columns: &[Column], config: &LayoutConfig) -> Vec<Vec<Placement>> {
        let index = TimeIndex::build(columns, config);
        let mut resolver = Resolver::new(&index, config);
        columns.iter().map(|c| resolver.resolve(&c.entries)).collect()
    }

    fn one_track(intervals: &[(i64, i64)]) -> Vec<Column> {
        let mut sheet = Sheet::new();
        let t = sheet.create_track();
        for &(s, e) in intervals {
            let _ = sheet.add_interval(t, Millis(s), Millis(e));
        }
        snapshot(&sheet)
    }

    #[test]
    fn abutting_intervals_meet_without_flag() {
        let placed = resolve_all(&one_track(&[(0, 500), (500, 1000)]), &config());
        let p = &placed[0];
        assert_eq!(p[0].top, 50.0);
        assert_eq!(p[0].bottom(), p[1].top, "first stops where second begins");
        assert_eq!(p[0].overlap, None);
        assert_eq!(p[1].overlap, None);
    }

    #[test]
    fn containing_interval_clashes() {
        let placed = resolve_all(&one_track(&[(0, 1000), (200, 300)]), &config());
        let p = &placed[0];
        assert_eq!(p[0].overlap, Some(Overlap::Clash));
        assert_eq!(p[1].top, p[0].bottom(), "second placed directly below");
        assert_eq!(p[1].overlap, None);
    }

    #[test]
    fn inverted_gets_minimum_and_flag() {
        let placed = resolve_all(&one_track(&[(500, 100)]), &config());
        assert_eq!(placed[0][0].height, 100.0);
        assert_eq!(placed[0][0].overlap, Some(Overlap::Inverted));
    }

    #[test]
    fn shared_start_stacks_downward() {
        let placed = resolve_all(&one_track(&[(0, 100), (0, 300)]), &config());
        let p = &placed[0];
        assert_eq!(p[0].top, 50.0);
        assert_eq!(p[0].height, 100.0);
        assert_eq!(p[0].overlap, Some(Overlap::SharedStart));
        assert_eq!(p[1].top, 150.0, "second consumes the next sub-offset");
    }

    #[test]
    fn zero_length_marker_before_same_start_is_not_flagged() {
        let placed = resolve_all(&one_track(&[(200, 200), (200, 400)]), &config());
        assert_eq!(placed[0][0].overlap, None);
    }

    #[test]
    fn long_interval_spans_bands_of_other_tracks() {
        let mut sheet = Sheet::new();
        let a = sheet.create_track();
        let b = sheet.create_track();
        let _ = sheet.add_interval(a, Millis(0), Millis(300));
        let _ = sheet.add_interval(b, Millis(0), Millis(100));
        let _ = sheet.add_interval(b, Millis(150), Millis(200));
        let _ = sheet.add_interval(b, Millis(250), Millis(300));
        let placed = resolve_all(&snapshot(&sheet), &config());

        // Bands: 0→50, 100→150, 150→150, 200→250, 250→250, 300→350.
        assert_eq!(placed[0][0].top, 50.0);
        assert_eq!(placed[0][0].bottom(), 350.0);
        assert_eq!(placed[1][2].bottom(), 350.0, "both tracks end on one band");
    }

    #[test]
    fn contiguous_predecessor_snaps_to_successor() {
        let config = LayoutConfig {
            band_gap: 10.0,
            ..config()
        };
        let placed = resolve_all(&one_track(&[(0, 499), (500, 1000)]), &config);
        let p = &placed[0];
        // Bands: 0→50, 499→160, 500→170, 1000→280.
        assert_eq!(p[1].top, 170.0);
        assert_eq!(p[0].bottom(), 170.0, "gap closed by the snap");
        assert_eq!(p[0].overlap, None);
    }

    #[test]
    fn end_offsets_carry_across_tracks() {
        let mut sheet = Sheet::new();
        let a = sheet.create_track();
        let b = sheet.create_track();
        let _ = sheet.add_interval(a, Millis(500), Millis(100));
        let _ = sheet.add_interval(b, Millis(0), Millis(100));
        let placed = resolve_all(&snapshot(&sheet), &config());

        // Bands: 0→50, 100→150, 500→150. The inverted interval in track a
        // reaches 250, deepening the end band of time 100 for track b.
        assert_eq!(placed[0][0].bottom(), 250.0);
        assert_eq!(placed[1][0].top, 50.0);
        assert_eq!(placed[1][0].bottom(), 250.0);
    }

    #[test]
    fn deepened_end_band_stops_at_successor() {
        let mut sheet = Sheet::new();
        let a = sheet.create_track();
        let b = sheet.create_track();
        let _ = sheet.add_interval(a, Millis(500), Millis(100));
        let _ = sheet.add_interval(b, Millis(0), Millis(100));
        let _ = sheet.add_interval(b, Millis(200), Millis(300));
        let placed = resolve_all(&snapshot(&sheet), &config());

        // Bands: 0→50, 100→150, 200→150, 300→250, 500→250. Track a raises
        // the end band of time 100 to 350.
        assert_eq!(placed[0][0].bottom(), 350.0);
        let b = &placed[1];
        assert_eq!(b[0].top, 50.0);
        assert_eq!(b[0].bottom(), 150.0, "capped at the successor's top");
        assert_eq!(b[1].top, 150.0);
        assert!(b[0].bottom() <= b[1].top, "no unflagged overlap: {b:?}");
        assert_eq!(b[0].overlap, None);
        assert_eq!(b[1].overlap, None);
    }

    #[test]
    fn contiguity_snap_ignores_other_tracks() {
        let config = LayoutConfig {
            band_gap: 10.0,
            ..config()
        };
        let mut sheet = Sheet::new();
        let a = sheet.create_track();
        let b = sheet.create_track();
        let _ = sheet.add_interval(a, Millis(0), Millis(499));
        let _ = sheet.add_interval(b, Millis(500), Millis(1000));
        let placed = resolve_all(&snapshot(&sheet), &config);

        // Bands: 0→50, 499→160, 500→170, 1000→280.
        assert_eq!(placed[0][0].top, 50.0);
        assert_eq!(placed[0][0].bottom(), 160.0, "keeps its end-band height");
        assert_eq!(placed[1][0].top, 170.0);
        assert_eq!(placed[1][0].bottom(), 280.0);
        assert_eq!(placed[0][0].overlap, None);
        assert_eq!(placed[1][0].overlap, None);
    }

    #[test]
    fn heights_never_below_minimum() {
        let placed = resolve_all(
            &one_track(&[(0, 0), (0, 0), (10, 5), (20, 21), (21, 30), (30, 30)]),
            &config(),
        );
        for p in &placed[0] {
            assert!(p.height >= 100.0, "height {} below minimum", p.height);
        }
    }

    #[test]
    fn tops_never_decrease_within_a_track() {
        let placed = resolve_all(
            &one_track(&[(0, 1000), (0, 10), (5, 7), (5, 900), (300, 200), (800, 1200)]),
            &config(),
        );
        let tops: Vec<f64> = placed[0].iter().map(|p| p.top).collect();
        for pair in tops.windows(2) {
            assert!(pair[0] <= pair[1], "tops out of order: {tops:?}");
        }
        assert_eq!(placed[0].len(), 6);
    }
}
