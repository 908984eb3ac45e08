// Copyright 2026 the Chronogrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared time axis.
//!
//! Every distinct start or end time across the visible tracks becomes one
//! *band*. A band's slot height is the largest demand any single track
//! places on it: each interval starting at that time asks for
//! `min_block_height`, and intervals of one track with the same start stack
//! additively. Demands are merged across tracks by maximum, not sum, so all
//! tracks stay aligned on the same bands.
//!
//! Offsets accumulate top to bottom starting below the header:
//!
//! ```text
//! offset(t0) = header_height
//! offset(tn) = offset(tn-1) + slot(tn-1) + band_gap
//! ```
//!
//! Times that only ever appear as end times have a zero slot.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use chronogrid_core::config::LayoutConfig;
use chronogrid_core::sheet::Sheet;
use chronogrid_core::time::Millis;

use crate::column::{self, Column};

/// Vertical offset of every distinct time value in a pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeIndex {
    offsets: BTreeMap<Millis, f64>,
    slots: BTreeMap<Millis, f64>,
}

impl TimeIndex {
    /// Builds the index for the visible tracks of `sheet`.
    #[must_use]
    pub fn from_sheet(sheet: &Sheet, config: &LayoutConfig) -> Self {
        Self::build(&column::snapshot(sheet), config)
    }

    pub(crate) fn build(columns: &[Column], config: &LayoutConfig) -> Self {
        let mut slots: BTreeMap<Millis, f64> = BTreeMap::new();
        let mut times: BTreeSet<Millis> = BTreeSet::new();
        let mut demand: BTreeMap<Millis, f64> = BTreeMap::new();

        for column in columns {
            demand.clear();
            for entry in &column.entries {
                *demand.entry(entry.start).or_insert(0.0) += config.min_block_height;
                times.insert(entry.start);
                times.insert(entry.end);
            }
            for (&time, &needed) in &demand {
                let slot = slots.entry(time).or_insert(0.0);
                if needed > *slot {
                    *slot = needed;
                }
            }
        }

        let mut offsets = BTreeMap::new();
        let mut y = config.header_height;
        for &time in &times {
            offsets.insert(time, y);
            y += slots.get(&time).copied().unwrap_or(0.0) + config.band_gap;
        }

        Self { offsets, slots }
    }

    /// Returns the offset of a time value, if it appears in any visible
    /// track.
    #[must_use]
    pub fn offset(&self, time: Millis) -> Option<f64> {
        self.offsets.get(&time).copied()
    }

    /// Returns the slot height of a time value (zero for end-only or unknown
    /// times).
    #[must_use]
    pub fn slot(&self, time: Millis) -> f64 {
        self.slots.get(&time).copied().unwrap_or(0.0)
    }

    /// Returns the number of bands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Returns whether no visible track holds an interval.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Returns `(time, offset)` pairs in ascending time order.
    #[must_use]
    pub fn bands(&self) -> Vec<(Millis, f64)> {
        self.offsets.iter().map(|(&t, &y)| (t, y)).collect()
    }

    /// Returns a mutable working copy of the offsets, for per-track
    /// sub-offset bookkeeping.
    pub(crate) fn local_offsets(&self) -> BTreeMap<Millis, f64> {
        self.offsets.clone()
    }
}
