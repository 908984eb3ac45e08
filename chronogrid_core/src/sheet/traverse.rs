// Copyright 2026 the Chronogrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Track traversal utilities.

use core::slice;

use super::id::IntervalId;
use super::store::Sheet;

/// An iterator over the intervals of a track, in insertion order.
///
/// Created by [`Sheet::intervals`].
#[derive(Debug)]
pub struct Intervals<'a> {
    sheet: &'a Sheet,
    slots: slice::Iter<'a, u32>,
}

impl<'a> Intervals<'a> {
    pub(crate) fn new(sheet: &'a Sheet, slots: &'a [u32]) -> Self {
        Self {
            sheet,
            slots: slots.iter(),
        }
    }
}

impl Iterator for Intervals<'_> {
    type Item = IntervalId;

    fn next(&mut self) -> Option<IntervalId> {
        let idx = *self.slots.next()?;
        Some(IntervalId {
            idx,
            generation: self.sheet.interval_generation[idx as usize],
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl ExactSizeIterator for Intervals<'_> {}
