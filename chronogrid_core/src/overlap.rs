// Copyright 2026 the Chronogrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlap flags for placed intervals.

/// Why an interval was flagged as temporally inconsistent.
///
/// Flags never change whether an interval is laid out; they only tell the
/// renderer to draw it with a distinct treatment (e.g. a warning border).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Overlap {
    /// The interval ends before it starts.
    Inverted,
    /// The interval shares its start time with the next interval in its
    /// track and both occupy that time.
    SharedStart,
    /// The interval runs past the start of the next interval in its track.
    Clash,
}

impl Overlap {
    /// Returns a short lowercase label for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inverted => "inverted",
            Self::SharedStart => "shared-start",
            Self::Clash => "clash",
        }
    }
}
