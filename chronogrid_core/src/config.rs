// Copyright 2026 the Chronogrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout configuration.
//!
//! [`LayoutConfig`] carries the read-only constants a layout pass consumes:
//! block and band dimensions plus the active [`Strategy`]. All lengths are in
//! the same logical units as the produced rectangles.

/// Which placement strategy a layout pass runs.
///
/// The two strategies share only the cache and invalidation gate; they place
/// intervals by unrelated rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Align every track on a shared time axis.
    ///
    /// Each distinct start or end time gets one horizontal band whose height
    /// is dictated by the track that needs the most room at that time.
    #[default]
    TimeAligned,
    /// Stack each track's intervals in sort order, one fixed-height slot
    /// each, ignoring time values.
    Ordinal,
}

impl Strategy {
    /// Returns a short lowercase label for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TimeAligned => "time-aligned",
            Self::Ordinal => "ordinal",
        }
    }
}

/// Constants consumed by a layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Minimum height of a placed interval, and the height an interval
    /// contributes to its start band.
    pub min_block_height: f64,
    /// Width of one track column.
    pub track_width: f64,
    /// Vertical gap inserted after every band of the time index.
    pub band_gap: f64,
    /// Height of the header band above the first interval.
    pub header_height: f64,
    /// Active placement strategy.
    pub strategy: Strategy,
}

impl LayoutConfig {
    /// Default configuration for the time-aligned strategy.
    #[must_use]
    pub const fn time_aligned() -> Self {
        Self {
            min_block_height: 24.0,
            track_width: 160.0,
            band_gap: 2.0,
            header_height: 32.0,
            strategy: Strategy::TimeAligned,
        }
    }

    /// Default configuration for the ordinal strategy.
    #[must_use]
    pub const fn ordinal() -> Self {
        Self {
            min_block_height: 24.0,
            track_width: 160.0,
            band_gap: 0.0,
            header_height: 32.0,
            strategy: Strategy::Ordinal,
        }
    }

    /// Returns a copy of this configuration with a different strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Checks that every dimension is usable.
    ///
    /// # Panics
    ///
    /// Panics if any dimension is non-finite or negative, or if
    /// `min_block_height` or `track_width` is zero.
    pub fn validate(&self) {
        assert!(
            self.min_block_height.is_finite() && self.min_block_height > 0.0,
            "min_block_height must be finite and positive, got {}",
            self.min_block_height
        );
        assert!(
            self.track_width.is_finite() && self.track_width > 0.0,
            "track_width must be finite and positive, got {}",
            self.track_width
        );
        assert!(
            self.band_gap.is_finite() && self.band_gap >= 0.0,
            "band_gap must be finite and non-negative, got {}",
            self.band_gap
        );
        assert!(
            self.header_height.is_finite() && self.header_height >= 0.0,
            "header_height must be finite and non-negative, got {}",
            self.header_height
        );
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::time_aligned()
    }
}
