// Copyright 2026 the Chronogrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Track and interval record model.
//!
//! A [`Sheet`] owns an ordered list of *tracks* (parallel annotation columns)
//! and the *intervals* inside them. Each interval has:
//!
//! - An identity ([`IntervalId`]): a generational handle that becomes stale
//!   when the interval is removed, so a removed interval can never be
//!   confused with a later one that reuses its slot.
//! - A `start` and `end` ([`Millis`](crate::time::Millis)). Any relative
//!   order is legal, including `end < start`.
//! - An `ordinal`: a per-track insertion counter used only to break ties
//!   when sorting.
//!
//! Tracks ([`TrackId`]) have a display position and a `hidden` flag. Hidden
//! tracks keep their intervals but are skipped by
//! [`visible_tracks`](Sheet::visible_tracks), so layout treats them as absent.
//!
//! # Revisions and dirty tracking
//!
//! Every mutation increments [`revision`](Sheet::revision); the layout cache
//! recomputes when the revision it last saw differs. Mutations also mark the
//! matching dirty channel (see [`dirty`](crate::dirty)), which
//! [`drain_changes`](Sheet::drain_changes) surfaces as [`SheetChanges`] for
//! damage computation.

mod changes;
mod id;
mod store;
mod traverse;

pub use changes::SheetChanges;
pub use id::{INVALID, IntervalId, TrackId};
pub use store::Sheet;
pub use traverse::Intervals;
