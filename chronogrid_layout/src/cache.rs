// Copyright 2026 the Chronogrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout cache and its invalidation gate.
//!
//! [`LayoutCache`] owns the records of the most recent pass. Every query
//! takes the [`Sheet`] it answers for and first compares the sheet's
//! revision with the revision captured after the last pass; only a mismatch
//! triggers a full recomputation. Between passes the cache keeps two
//! slot-indexed side tables so that handle lookups never scan:
//!
//! - interval slot → record index
//! - track slot → layout column

use alloc::vec::Vec;

use chronogrid_core::config::{LayoutConfig, Strategy};
use chronogrid_core::sheet::{INVALID, IntervalId, Sheet, TrackId};
use chronogrid_core::trace::{CacheHitEvent, PassBeginEvent, PassEndEvent, Tracer};
use kurbo::{Point, Rect};

use crate::column::{self, Column};
use crate::record::{ContentBounds, LayoutRecord, Placed};
use crate::{ordinal, time_aligned};

/// Cached layout of one [`Sheet`].
///
/// # Usage
///
/// ```rust,ignore
/// let mut cache = LayoutCache::new(LayoutConfig::time_aligned());
/// let bounds = cache.content_bounds(&sheet);
/// for record in cache.visible_records(&sheet, viewport) {
///     // ... draw record.rect, with a warning border if record.is_flagged() ...
/// }
/// ```
///
/// A cache belongs to one sheet. The gate compares revisions only, so two
/// sheets at the same revision look identical to it; call
/// [`invalidate`](Self::invalidate) before querying a different sheet.
#[derive(Clone, Debug)]
pub struct LayoutCache {
    config: LayoutConfig,
    records: Vec<LayoutRecord>,
    /// `column_starts[c]..column_starts[c + 1]` is column `c` in `records`.
    column_starts: Vec<usize>,
    interval_slots: Vec<u32>,
    track_columns: Vec<u32>,
    bounds: ContentBounds,
    /// Tallest content height since damage was last reported.
    pub(crate) damage_high_water: f64,
    bands: u32,
    overlaps: u32,
    revision: Option<u64>,
    pass_index: u64,
}

impl LayoutCache {
    /// Creates an empty cache. The first query runs a pass.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`LayoutConfig::validate`].
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        config.validate();
        Self {
            config,
            records: Vec::new(),
            column_starts: Vec::new(),
            interval_slots: Vec::new(),
            track_columns: Vec::new(),
            bounds: ContentBounds::default(),
            damage_high_water: 0.0,
            bands: 0,
            overlaps: 0,
            revision: None,
            pass_index: 0,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Replaces the configuration, including the strategy, and invalidates
    /// the cache.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`LayoutConfig::validate`].
    pub fn set_config(&mut self, config: LayoutConfig) {
        config.validate();
        self.config = config;
        self.invalidate();
    }

    /// Forces the next query to recompute regardless of revision.
    pub fn invalidate(&mut self) {
        self.revision = None;
    }

    /// Returns whether the cached layout belongs to the sheet's current
    /// revision.
    #[must_use]
    pub fn is_current(&self, sheet: &Sheet) -> bool {
        self.revision == Some(sheet.revision())
    }

    /// Returns the revision the cached layout was computed for, if any.
    #[must_use]
    pub fn revision(&self) -> Option<u64> {
        self.revision
    }

    /// Returns how many passes this cache has run.
    #[must_use]
    pub fn pass_index(&self) -> u64 {
        self.pass_index
    }

    /// Recomputes the layout if the sheet has changed since the last pass.
    ///
    /// Returns `true` when a pass ran.
    pub fn update(&mut self, sheet: &Sheet) -> bool {
        self.update_traced(sheet, &mut Tracer::none())
    }

    /// Like [`update`](Self::update), emitting trace events.
    pub fn update_traced(&mut self, sheet: &Sheet, tracer: &mut Tracer<'_>) -> bool {
        let revision = sheet.revision();
        if self.revision == Some(revision) {
            tracer.cache_hit(&CacheHitEvent {
                pass_index: self.pass_index,
                revision,
            });
            return false;
        }

        self.pass_index += 1;
        let columns = column::snapshot(sheet);
        tracer.pass_begin(&PassBeginEvent {
            pass_index: self.pass_index,
            revision,
            strategy: self.config.strategy,
            visible_tracks: count(columns.len()),
        });

        let placed = match self.config.strategy {
            Strategy::TimeAligned => time_aligned::layout(&columns, &self.config),
            Strategy::Ordinal => ordinal::layout(&columns, &self.config),
        };
        self.install(sheet, &columns, placed);
        self.revision = Some(revision);

        tracer.pass_end(&PassEndEvent {
            pass_index: self.pass_index,
            revision,
            records: count(self.records.len()),
            overlaps: self.overlaps,
            bands: self.bands,
            content_width: self.bounds.width,
            content_height: self.bounds.height,
        });

        #[cfg(feature = "trace-rich")]
        if tracer.is_active() {
            let notes: Vec<chronogrid_core::trace::OverlapNote> = self
                .records
                .iter()
                .filter_map(|r| {
                    r.overlap.map(|kind| chronogrid_core::trace::OverlapNote {
                        interval_index: r.interval.index(),
                        column: r.column,
                        kind,
                    })
                })
                .collect();
            tracer.overlaps(self.pass_index, &notes);
        }

        true
    }

    fn install(&mut self, sheet: &Sheet, columns: &[Column], placed: Placed) {
        self.records = placed.records;
        self.bands = placed.bands;
        self.overlaps = count(self.records.iter().filter(|r| r.is_flagged()).count());

        self.column_starts.clear();
        self.column_starts.push(0);
        let mut end = 0;
        for column in columns {
            end += column.entries.len();
            self.column_starts.push(end);
        }

        self.interval_slots.clear();
        self.interval_slots
            .resize(sheet.interval_capacity() as usize, INVALID);
        for (i, record) in (0_u32..).zip(&self.records) {
            self.interval_slots[record.interval.index() as usize] = i;
        }

        self.track_columns.clear();
        self.track_columns
            .resize(sheet.track_capacity() as usize, INVALID);
        for (col, column) in (0_u32..).zip(columns) {
            self.track_columns[column.track.index() as usize] = col;
        }

        let previous_height = self.bounds.height;
        self.bounds = ContentBounds {
            width: f64::from(count(columns.len())) * self.config.track_width,
            height: placed.content_height,
        };
        self.damage_high_water = self
            .damage_high_water
            .max(previous_height)
            .max(self.bounds.height);
    }

    // -- Queries --

    /// Returns the placement of `interval` in `track`.
    ///
    /// Returns `None` when the interval was removed, belongs to another
    /// track, or its track is hidden.
    pub fn position_of(
        &mut self,
        sheet: &Sheet,
        track: TrackId,
        interval: IntervalId,
    ) -> Option<&LayoutRecord> {
        self.update(sheet);
        let slot = *self.interval_slots.get(interval.index() as usize)?;
        if slot == INVALID {
            return None;
        }
        let record = &self.records[slot as usize];
        (record.interval == interval && record.track == track).then_some(record)
    }

    /// Returns the layout column of a visible track.
    pub fn column_of(&mut self, sheet: &Sheet, track: TrackId) -> Option<u32> {
        self.update(sheet);
        if !sheet.is_track_alive(track) {
            return None;
        }
        self.track_column_slot(track.index())
    }

    /// Returns the records of one layout column in position order.
    ///
    /// Out-of-range columns give an empty slice.
    pub fn column(&mut self, sheet: &Sheet, column: u32) -> &[LayoutRecord] {
        self.update(sheet);
        let c = column as usize;
        match (self.column_starts.get(c), self.column_starts.get(c + 1)) {
            (Some(&start), Some(&end)) => &self.records[start..end],
            _ => &[],
        }
    }

    /// Looks up a record by its `(column, position)` index.
    pub fn record_at(&mut self, sheet: &Sheet, column: u32, position: u32) -> Option<&LayoutRecord> {
        self.column(sheet, column).get(position as usize)
    }

    /// Returns every record, column by column.
    pub fn records(&mut self, sheet: &Sheet) -> &[LayoutRecord] {
        self.update(sheet);
        &self.records
    }

    /// Returns the records whose rectangles intersect `region` with
    /// positive area.
    pub fn visible_records(&mut self, sheet: &Sheet, region: Rect) -> Vec<LayoutRecord> {
        self.update(sheet);
        self.records
            .iter()
            .filter(|r| r.rect.intersect(region).area() > 0.0)
            .copied()
            .collect()
    }

    /// Returns the record under `point`.
    ///
    /// Where records overlap, the later record in column order wins,
    /// matching paint order.
    pub fn hit_test(&mut self, sheet: &Sheet, point: Point) -> Option<&LayoutRecord> {
        self.update(sheet);
        self.records.iter().rev().find(|r| r.rect.contains(point))
    }

    /// Returns the size of the laid-out grid.
    pub fn content_bounds(&mut self, sheet: &Sheet) -> ContentBounds {
        self.update(sheet);
        self.bounds
    }

    /// Returns how many records carry an overlap flag.
    pub fn overlap_count(&mut self, sheet: &Sheet) -> u32 {
        self.update(sheet);
        self.overlaps
    }

    /// Returns the number of time bands in the current pass (zero for the
    /// ordinal strategy).
    pub fn band_count(&mut self, sheet: &Sheet) -> u32 {
        self.update(sheet);
        self.bands
    }

    pub(crate) fn track_column_slot(&self, track_slot: u32) -> Option<u32> {
        self.track_columns
            .get(track_slot as usize)
            .copied()
            .filter(|&c| c != INVALID)
    }

    pub(crate) fn bounds(&self) -> ContentBounds {
        self.bounds
    }
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
