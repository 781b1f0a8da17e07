//! Wall-clock instants for the Spheres core
//!
//! Time is injected by the embedding host at every call site that needs it.
//! The core never reads an ambient clock; deterministic tests pass literal
//! instants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Milliseconds per second
pub const MS_PER_SECOND: u64 = 1_000;
/// Milliseconds per minute
pub const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
/// Milliseconds per hour
pub const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
/// Milliseconds per day
pub const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

/// A wall-clock instant in milliseconds since the Unix epoch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a timestamp from milliseconds since the Unix epoch
    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Milliseconds since the Unix epoch
    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Saturating addition of a millisecond offset
    pub fn saturating_add_millis(&self, millis: u64) -> Self {
        Self(self.0.saturating_add(millis))
    }

    /// Milliseconds elapsed from `earlier` to `self`, zero if `earlier` is later.
    pub fn saturating_since(&self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// True if this instant is strictly before `other`
    pub fn is_before(&self, other: Timestamp) -> bool {
        self.0 < other.0
    }

    /// True if this instant is at or after `other`
    pub fn has_reached(&self, other: Timestamp) -> bool {
        self.0 >= other.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

impl From<u64> for Timestamp {
    fn from(millis: u64) -> Self {
        Self(millis)
    }
}

impl From<Timestamp> for u64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        let earlier = Timestamp::from_millis(1_000);
        let later = Timestamp::from_millis(2_000);
        assert!(earlier.is_before(later));
        assert!(!later.is_before(earlier));
        assert!(later.has_reached(earlier));
        assert!(later.has_reached(later));
    }

    #[test]
    fn test_saturating_since() {
        let earlier = Timestamp::from_millis(1_000);
        let later = Timestamp::from_millis(3_500);
        assert_eq!(later.saturating_since(earlier), 2_500);
        assert_eq!(earlier.saturating_since(later), 0);
    }

    #[test]
    fn test_saturating_add() {
        let ts = Timestamp::from_millis(u64::MAX - 1);
        assert_eq!(ts.saturating_add_millis(100).as_millis(), u64::MAX);
    }
}
