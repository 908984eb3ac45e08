// Copyright 2026 the Chronogrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Millisecond timestamps.
//!
//! [`Millis`] is the time unit of every interval in a
//! [`Sheet`](crate::sheet::Sheet). Values are signed: annotations may be
//! placed before the media origin, and an interval's end may precede its
//! start (see [`Overlap::Inverted`](crate::overlap::Overlap::Inverted)).

use core::fmt;
use core::ops::Sub;

/// A point on the shared time axis, in whole milliseconds.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Millis(pub i64);

impl Millis {
    /// The time-axis origin.
    pub const ZERO: Self = Self(0);

    /// Returns the raw millisecond value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Returns `self + delta`, saturating at the numeric bounds.
    #[inline]
    #[must_use]
    pub const fn saturating_add(self, delta: i64) -> Self {
        Self(self.0.saturating_add(delta))
    }

    /// Returns whether `self` lies exactly one millisecond before `later`.
    ///
    /// Used to detect back-to-back intervals that share no instant.
    #[inline]
    #[must_use]
    pub const fn immediately_precedes(self, later: Self) -> bool {
        match self.0.checked_add(1) {
            Some(next) => next == later.0,
            None => false,
        }
    }
}

impl Sub for Millis {
    type Output = i64;

    /// Signed distance in milliseconds, saturating on overflow.
    #[inline]
    fn sub(self, rhs: Self) -> i64 {
        self.0.saturating_sub(rhs.0)
    }
}

impl From<i64> for Millis {
    #[inline]
    fn from(ms: i64) -> Self {
        Self(ms)
    }
}

impl fmt::Debug for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_value() {
        assert!(Millis(-5) < Millis(0));
        assert!(Millis(500) < Millis(1000));
    }

    #[test]
    fn immediately_precedes_is_exact() {
        assert!(Millis(499).immediately_precedes(Millis(500)));
        assert!(!Millis(500).immediately_precedes(Millis(500)));
        assert!(!Millis(498).immediately_precedes(Millis(500)));
        assert!(
            !Millis(i64::MAX).immediately_precedes(Millis(i64::MIN)),
            "no wrap-around at the numeric bound"
        );
    }

    #[test]
    fn difference_saturates() {
        assert_eq!(Millis(1000) - Millis(250), 750);
        assert_eq!(Millis(i64::MIN) - Millis(1), i64::MIN);
    }
}
