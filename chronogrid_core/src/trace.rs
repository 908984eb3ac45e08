// Copyright 2026 the Chronogrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for layout passes.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! layout cache calls as it decides whether to recompute and as each pass
//! runs. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`): gates [`OverlapNote`] and damage-rect
//!   events plus the corresponding `TraceSink` methods.

use crate::config::Strategy;
#[cfg(feature = "trace-rich")]
use crate::overlap::Overlap;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a layout pass starts.
#[derive(Clone, Copy, Debug)]
pub struct PassBeginEvent {
    /// Monotonic pass counter of the emitting cache.
    pub pass_index: u64,
    /// Sheet revision being laid out.
    pub revision: u64,
    /// Strategy the pass runs.
    pub strategy: Strategy,
    /// Number of visible tracks (layout columns).
    pub visible_tracks: u32,
}

/// Emitted when a layout pass finishes.
#[derive(Clone, Copy, Debug)]
pub struct PassEndEvent {
    /// Monotonic pass counter of the emitting cache.
    pub pass_index: u64,
    /// Sheet revision that was laid out.
    pub revision: u64,
    /// Number of placed intervals.
    pub records: u32,
    /// Number of placed intervals carrying an overlap flag.
    pub overlaps: u32,
    /// Distinct time values in the time index (0 for the ordinal strategy).
    pub bands: u32,
    /// Content width.
    pub content_width: f64,
    /// Content height.
    pub content_height: f64,
}

/// Emitted when a query finds the cache already current.
#[derive(Clone, Copy, Debug)]
pub struct CacheHitEvent {
    /// Pass counter of the pass that produced the cached layout.
    pub pass_index: u64,
    /// Sheet revision the cached layout belongs to.
    pub revision: u64,
}

/// A flagged interval in a finished pass.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct OverlapNote {
    /// Slot index of the flagged interval.
    pub interval_index: u32,
    /// Layout column of the interval's track.
    pub column: u32,
    /// Why the interval was flagged.
    pub kind: Overlap,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the layout cache.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a layout pass starts.
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        _ = e;
    }

    /// Called when a layout pass finishes.
    fn on_pass_end(&mut self, e: &PassEndEvent) {
        _ = e;
    }

    /// Called when a query is served from an up-to-date cache.
    fn on_cache_hit(&mut self, e: &CacheHitEvent) {
        _ = e;
    }

    /// Called with the flagged intervals of a pass (requires `trace-rich`).
    #[cfg(feature = "trace-rich")]
    fn on_overlaps(&mut self, pass_index: u64, notes: &[OverlapNote]) {
        _ = (pass_index, notes);
    }

    /// Called with computed damage rectangles (requires `trace-rich`).
    #[cfg(feature = "trace-rich")]
    fn on_damage_rects(&mut self, pass_index: u64, rects: &[kurbo::Rect]) {
        _ = (pass_index, rects);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`PassBeginEvent`].
    #[inline]
    pub fn pass_begin(&mut self, e: &PassBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pass_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PassEndEvent`].
    #[inline]
    pub fn pass_end(&mut self, e: &PassEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pass_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CacheHitEvent`].
    #[inline]
    pub fn cache_hit(&mut self, e: &CacheHitEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_cache_hit(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Returns whether events reach a sink.
    ///
    /// Lets callers skip building rich event payloads nobody will read.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        #[cfg(feature = "trace")]
        {
            self.sink.is_some()
        }
        #[cfg(not(feature = "trace"))]
        {
            false
        }
    }

    /// Emits the flagged intervals of a pass (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn overlaps(&mut self, pass_index: u64, notes: &[OverlapNote]) {
        if let Some(s) = &mut self.sink {
            s.on_overlaps(pass_index, notes);
        }
    }

    /// Emits damage rectangles (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn damage_rects(&mut self, pass_index: u64, rects: &[kurbo::Rect]) {
        if let Some(s) = &mut self.sink {
            s.on_damage_rects(pass_index, rects);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
