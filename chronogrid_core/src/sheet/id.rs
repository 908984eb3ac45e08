// Copyright 2026 the Chronogrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Track and interval identity types.

use core::fmt;

/// Sentinel value indicating "no track" or "no interval" in index fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to a track in a [`Sheet`](super::Sheet).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after a track is destroyed and the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl TrackId {
    /// Returns the raw slot index (for diagnostics and damage lookups).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrackId({}@gen{})", self.idx, self.generation)
    }
}

/// A handle to an interval in a [`Sheet`](super::Sheet).
///
/// Interval identity is the arena slot plus its generation; it survives time
/// edits and moves between tracks.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntervalId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl IntervalId {
    /// Returns the raw slot index.
    ///
    /// Slot indices are dense, so callers may use them to index side tables.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for IntervalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntervalId({}@gen{})", self.idx, self.generation)
    }
}
