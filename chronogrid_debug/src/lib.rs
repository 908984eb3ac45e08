// Copyright 2026 the Chronogrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing, binary recording, and JSON snapshots for chronogrid
//! layout diagnostics.
//!
//! This crate provides [`TraceSink`](chronogrid_core::trace::TraceSink)
//! implementations for development and post-mortem analysis, plus a layout
//! dump:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`snapshot::snapshot`]: the records and bounds of a layout as JSON.

pub mod pretty;
pub mod recorder;
pub mod snapshot;
