/**
 * Time handling for playback.
 * Hosts hand us millisecond readings (`performance.now()`, `Instant` deltas),
 * we keep them as integer nanoseconds so comparisons stay exact.
 */
use serde::{Deserialize, Serialize};

/// Length of one game tick in milliseconds.
pub const TICK_MILLIS: u64 = 50;

/// A moment (or span) on the host's monotonic clock.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash, Serialize, Deserialize, Default)]
pub struct AnimationTime(u64);

impl AnimationTime {
    #[inline]
    pub fn from_nanos(nanoseconds: u64) -> Self {
        Self(nanoseconds)
    }

    /// Negative or non-finite readings collapse to zero.
    #[inline]
    pub fn from_millis(milliseconds: f64) -> Self {
        if !milliseconds.is_finite() || milliseconds <= 0.0 {
            return Self(0);
        }
        Self((milliseconds * 1_000_000.0) as u64)
    }

    #[inline]
    pub fn zero() -> Self {
        Self(0)
    }

    #[inline]
    pub fn as_millis(&self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    #[inline]
    pub fn as_nanos(&self) -> u64 {
        self.0
    }

    /// Time elapsed since `earlier`; zero if the host clock went backwards.
    #[inline]
    pub fn saturating_since(&self, earlier: AnimationTime) -> AnimationTime {
        Self(self.0.saturating_sub(earlier.0))
    }
}

impl std::ops::Add for AnimationTime {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_conversion() {
        let t = AnimationTime::from_millis(1500.0);
        assert_eq!(t.as_millis(), 1500.0);
        assert_eq!(t.as_nanos(), 1_500_000_000);
    }

    #[test]
    fn test_invalid_millis_collapse_to_zero() {
        assert_eq!(AnimationTime::from_millis(-3.0), AnimationTime::zero());
        assert_eq!(AnimationTime::from_millis(f64::NAN), AnimationTime::zero());
    }

    #[test]
    fn test_saturating_since() {
        let a = AnimationTime::from_millis(100.0);
        let b = AnimationTime::from_millis(40.0);
        assert_eq!(a.saturating_since(b).as_millis(), 60.0);
        assert_eq!(b.saturating_since(a), AnimationTime::zero());
    }
}
