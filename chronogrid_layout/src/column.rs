// Copyright 2026 the Chronogrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pass snapshot of the visible tracks.

use alloc::vec::Vec;

use chronogrid_core::sheet::{IntervalId, Sheet, TrackId};
use chronogrid_core::time::Millis;

/// One interval as seen by a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Entry {
    pub(crate) id: IntervalId,
    pub(crate) start: Millis,
    pub(crate) end: Millis,
}

/// One visible track, intervals ordered by `(start, end, ordinal)`.
#[derive(Clone, Debug)]
pub(crate) struct Column {
    pub(crate) track: TrackId,
    pub(crate) entries: Vec<Entry>,
}

/// Copies the visible tracks of `sheet` in display order.
pub(crate) fn snapshot(sheet: &Sheet) -> Vec<Column> {
    sheet
        .visible_tracks()
        .into_iter()
        .map(|track| Column {
            track,
            entries: sheet
                .sorted_intervals(track)
                .into_iter()
                .map(|id| Entry {
                    id,
                    start: sheet.start(id),
                    end: sheet.end(id),
                })
                .collect(),
        })
        .collect()
}
