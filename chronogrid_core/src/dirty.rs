// Copyright 2026 the Chronogrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The [`Sheet`](crate::sheet::Sheet) uses multi-channel dirty tracking (via
//! [`understory_dirty`]) keyed by track slot index. Each channel represents an
//! independent category of change:
//!
//! - [`TIMING`]: an interval's start or end changed.
//! - [`MEMBERSHIP`]: an interval was added to, removed from, or moved
//!   between tracks. Both the source and destination tracks are marked.
//! - [`TOPOLOGY`]: a track was created, destroyed, reordered, hidden, or
//!   unhidden. Column positions of other tracks may have shifted.
//!
//! All channels are local-only: tracks have no dependency edges.
//!
//! # Consumption
//!
//! Dirty state does not decide whether layout recomputes; the sheet's
//! revision counter does. The channels are drained by
//! [`Sheet::drain_changes`](crate::sheet::Sheet::drain_changes) and used to
//! compute which parts of the rendered grid need repainting.

use understory_dirty::Channel;

/// Interval start or end changed.
pub const TIMING: Channel = Channel::new(0);

/// Interval added, removed, or moved between tracks.
pub const MEMBERSHIP: Channel = Channel::new(1);

/// Track created, destroyed, reordered, or its visibility changed.
pub const TOPOLOGY: Channel = Channel::new(2);
