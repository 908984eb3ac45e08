// Copyright 2026 the Chronogrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordinal strategy: fixed-height stacking in sort order.
//!
//! Time values only decide the order. Interval `k` of a track sits at
//! `header_height + k * min_block_height`; nothing is flagged.

use alloc::vec::Vec;

use chronogrid_core::config::LayoutConfig;
use kurbo::Rect;

use crate::column::Column;
use crate::record::{LayoutRecord, Placed};

pub(crate) fn layout(columns: &[Column], config: &LayoutConfig) -> Placed {
    let h = config.min_block_height;
    let mut records = Vec::with_capacity(columns.iter().map(|c| c.entries.len()).sum());
    let mut content_height = config.header_height;

    for (col, column) in (0_u32..).zip(columns) {
        let x0 = f64::from(col) * config.track_width;
        for (position, entry) in (0_u32..).zip(&column.entries) {
            let y0 = config.header_height + f64::from(position) * h;
            let rect = Rect::new(x0, y0, x0 + config.track_width, y0 + h);
            content_height = content_height.max(rect.y1);
            records.push(LayoutRecord {
                interval: entry.id,
                track: column.track,
                column: col,
                position,
                rect,
                overlap: None,
            });
        }
    }

    Placed {
        records,
        content_height,
        bands: 0,
    }
}

#[cfg(test)]
mod tests {
    use chronogrid_core::sheet::Sheet;
    use chronogrid_core::time::Millis;

    use super::*;
    use crate::column::snapshot;

    fn config() -> LayoutConfig {
        LayoutConfig {
            min_block_height: 30.0,
            track_width: 100.0,
            header_height: 20.0,
            ..LayoutConfig::ordinal()
        }
    }

    #[test]
    fn stacks_at_fixed_pitch() {
        let mut sheet = Sheet::new();
        let t = sheet.create_track();
        let _ = sheet.add_interval(t, Millis(5_000), Millis(0));
        let _ = sheet.add_interval(t, Millis(0), Millis(99_999));
        let _ = sheet.add_interval(t, Millis(0), Millis(1));

        let placed = layout(&snapshot(&sheet), &config());
        let ys: Vec<f64> = placed.records.iter().map(|r| r.rect.y0).collect();
        assert_eq!(ys, [20.0, 50.0, 80.0]);
        assert!(placed.records.iter().all(|r| r.rect.height() == 30.0));
        assert!(placed.records.iter().all(|r| r.overlap.is_none()));
        assert_eq!(placed.content_height, 110.0);
    }

    #[test]
    fn tallest_track_sets_content_height() {
        let mut sheet = Sheet::new();
        let a = sheet.create_track();
        let b = sheet.create_track();
        let _ = sheet.add_interval(a, Millis(0), Millis(1));
        for i in 0..4 {
            let _ = sheet.add_interval(b, Millis(i), Millis(i + 1));
        }

        let placed = layout(&snapshot(&sheet), &config());
        assert_eq!(placed.content_height, 20.0 + 4.0 * 30.0);
        assert_eq!(placed.records[1].rect.x0, 100.0);
    }

    #[test]
    fn no_tracks_gives_header_only() {
        let placed = layout(&[], &config());
        assert!(placed.records.is_empty());
        assert_eq!(placed.content_height, 20.0);
    }
}
