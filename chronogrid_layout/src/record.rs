// Copyright 2026 the Chronogrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout output types.

use alloc::vec::Vec;

use chronogrid_core::overlap::Overlap;
use chronogrid_core::sheet::{IntervalId, TrackId};
use kurbo::{Rect, Size};

/// The placement of one visible interval.
///
/// Records are derived and never authoritative: each pass discards the
/// previous generation. `(column, position)` is a stable two-part index for
/// the duration of a pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutRecord {
    /// The placed interval.
    pub interval: IntervalId,
    /// The track holding the interval.
    pub track: TrackId,
    /// Index of the track among visible tracks.
    pub column: u32,
    /// Index of the interval in its track's `(start, end, ordinal)` order.
    pub position: u32,
    /// Placement in content coordinates. `rect.x0` is always
    /// `column * track_width`.
    pub rect: Rect,
    /// Set when the interval is inverted or clashes with its neighbor.
    pub overlap: Option<Overlap>,
}

impl LayoutRecord {
    /// Returns whether the renderer should draw this record as
    /// inconsistent.
    #[inline]
    #[must_use]
    pub fn is_flagged(&self) -> bool {
        self.overlap.is_some()
    }
}

/// Size of the laid-out content, for scroll-region sizing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContentBounds {
    /// Visible track count times track width.
    pub width: f64,
    /// Lowest bottom edge of any record; the header height when empty.
    pub height: f64,
}

impl ContentBounds {
    /// Returns the bounds as a [`Size`].
    #[inline]
    #[must_use]
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the bounds as a rectangle anchored at the origin.
    #[inline]
    #[must_use]
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Output of one strategy run, before the cache indexes it.
#[derive(Clone, Debug, Default)]
pub(crate) struct Placed {
    /// Records in column order, then position order.
    pub(crate) records: Vec<LayoutRecord>,
    pub(crate) content_height: f64,
    /// Band count of the time index; zero for the ordinal strategy.
    pub(crate) bands: u32,
}
