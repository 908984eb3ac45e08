// Copyright 2026 the Chronogrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timeline-aligned grid layout for parallel annotation tracks.
//!
//! This crate turns the tracks of a [`Sheet`] into concrete rectangles. It
//! provides:
//!
//! - [`LayoutCache`]: runs the active strategy when the sheet's revision
//!   has advanced and answers position, region, and bounds queries
//! - [`LayoutRecord`]: the placement of one visible interval
//! - [`ContentBounds`]: scroll-region size of the whole grid
//! - [`TimeIndex`]: the shared vertical offset of every distinct time value
//! - [`DamageRegion`]: which parts of the grid need repainting after edits
//!
//! # Pipeline
//!
//! ```text
//!   Sheet ──► snapshot (visible tracks, sorted intervals)
//!                 │
//!      ┌──────────┴──────────────┐
//!      ▼ TimeAligned              ▼ Ordinal
//!   TimeIndex ──► overlap     fixed-height stacking
//!                 resolver        │
//!      └──────────┬──────────────┘
//!                 ▼
//!           LayoutCache ──► queries
//! ```
//!
//! Every pass is a full recomputation; nothing is patched incrementally.
//!
//! [`Sheet`]: chronogrid_core::sheet::Sheet

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod cache;
mod column;
mod damage;
mod ordinal;
mod overlap;
mod record;
mod time_aligned;
mod time_index;

pub use cache::LayoutCache;
pub use damage::DamageRegion;
pub use record::{ContentBounds, LayoutRecord};
pub use time_index::TimeIndex;
