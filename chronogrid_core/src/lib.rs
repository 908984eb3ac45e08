// Copyright 2026 the Chronogrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Record model and shared types for timeline-aligned grid layout.
//!
//! `chronogrid_core` owns the data that the layout engine reads: a [`Sheet`]
//! of parallel tracks, each holding time-coded intervals. It is `no_std`
//! compatible (with `alloc`) and stores tracks and intervals in flat arenas
//! addressed by generational index handles.
//!
//! # Architecture
//!
//! ```text
//!   editing operations
//!       │  (add / remove / move / time edit)
//!       ▼
//!   Sheet ──► revision() ──────────────┐
//!     │                                 ▼
//!     ├──► visible_tracks()       LayoutCache::update()   (chronogrid_layout)
//!     │    sorted_intervals()  ──►      │
//!     │                                 ▼
//!     └──► drain_changes() ──► SheetChanges ──► LayoutCache::damage()
//! ```
//!
//! **[`sheet`]**: Arena storage for tracks and intervals with generational
//! handles. Every mutation bumps the sheet's revision counter and marks the
//! matching dirty channel.
//!
//! **[`dirty`]**: Change channels via `understory_dirty`, drained into
//! [`SheetChanges`](sheet::SheetChanges) for damage computation.
//!
//! **[`config`]**: [`LayoutConfig`](config::LayoutConfig) constants and the
//! [`Strategy`](config::Strategy) selector.
//!
//! **[`overlap`]**: The [`Overlap`](overlap::Overlap) flag attached to
//! placed intervals.
//!
//! **[`time`]**: [`Millis`](time::Millis), the signed millisecond timestamp.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! layout-pass instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-interval
//!   overlap and damage-rect events.
//!
//! [`Sheet`]: sheet::Sheet

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod config;
pub mod dirty;
pub mod overlap;
pub mod sheet;
pub mod time;
pub mod trace;
