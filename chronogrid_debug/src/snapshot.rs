// Copyright 2026 the Chronogrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON dumps of a computed layout.
//!
//! [`snapshot`] brings a [`LayoutCache`] up to date and renders its bounds
//! and records as a [`serde_json::Value`]:
//!
//! ```text
//! {
//!   "revision": 7,
//!   "strategy": "time-aligned",
//!   "bounds": { "width": 320.0, "height": 150.0 },
//!   "records": [
//!     { "interval": [0, 0], "track": [0, 0], "column": 0, "position": 0,
//!       "x": 0.0, "y": 32.0, "width": 160.0, "height": 24.0,
//!       "overlap": null },
//!     ...
//!   ]
//! }
//! ```
//!
//! Handles are written as `[index, generation]` pairs.

use std::io::{self, Write};

use chronogrid_core::sheet::Sheet;
use chronogrid_layout::LayoutCache;
use serde_json::{Value, json};

/// Renders the current layout of `sheet` as JSON.
pub fn snapshot(cache: &mut LayoutCache, sheet: &Sheet) -> Value {
    let bounds = cache.content_bounds(sheet);
    let strategy = cache.config().strategy.as_str();
    let records: Vec<Value> = cache
        .records(sheet)
        .iter()
        .map(|r| {
            json!({
                "interval": [r.interval.index(), r.interval.generation()],
                "track": [r.track.index(), r.track.generation()],
                "column": r.column,
                "position": r.position,
                "x": r.rect.x0,
                "y": r.rect.y0,
                "width": r.rect.width(),
                "height": r.rect.height(),
                "overlap": r.overlap.map(|o| o.as_str()),
            })
        })
        .collect();

    json!({
        "revision": sheet.revision(),
        "strategy": strategy,
        "bounds": { "width": bounds.width, "height": bounds.height },
        "records": records,
    })
}

/// Writes [`snapshot`] as pretty-printed JSON.
pub fn write_snapshot(
    cache: &mut LayoutCache,
    sheet: &Sheet,
    writer: &mut dyn Write,
) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &snapshot(cache, sheet))?;
    writeln!(writer)
}
