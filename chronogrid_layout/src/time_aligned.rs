// Copyright 2026 the Chronogrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-aligned strategy: a shared time axis plus per-track overlap
//! resolution.

use alloc::vec::Vec;

use chronogrid_core::config::LayoutConfig;
use kurbo::Rect;

use crate::column::Column;
use crate::overlap::Resolver;
use crate::record::{LayoutRecord, Placed};
use crate::time_index::TimeIndex;

pub(crate) fn layout(columns: &[Column], config: &LayoutConfig) -> Placed {
    let index = TimeIndex::build(columns, config);
    let mut resolver = Resolver::new(&index, config);
    let mut records = Vec::with_capacity(columns.iter().map(|c| c.entries.len()).sum());
    let mut content_height = config.header_height;

    for (col, column) in (0_u32..).zip(columns) {
        let x0 = f64::from(col) * config.track_width;
        let x1 = x0 + config.track_width;
        let placements = resolver.resolve(&column.entries);
        for ((position, entry), placement) in (0_u32..).zip(&column.entries).zip(placements) {
            let rect = Rect::new(x0, placement.top, x1, placement.bottom());
            content_height = content_height.max(rect.y1);
            records.push(LayoutRecord {
                interval: entry.id,
                track: column.track,
                column: col,
                position,
                rect,
                overlap: placement.overlap,
            });
        }
    }

    Placed {
        records,
        content_height,
        bands: u32::try_from(index.len()).unwrap_or(u32::MAX),
    }
}
