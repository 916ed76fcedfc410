//! A single timelock constraint
//!
//! A [`TimeLock`] is a kind-tagged slot: two locks are equal when their kinds
//! match, whatever their values. This lets a [`TimeLockManager`] look a lock up
//! by kind and replace its value in place.
//!
//! [`TimeLockManager`]: crate::manager::TimeLockManager

use bitcoin::{absolute, relative};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::TimeLockError;
use crate::kind::TimeLockKind;

/// Boundary between height-based and time-based absolute locktimes
pub const LOCKTIME_THRESHOLD: u32 = absolute::LOCK_TIME_THRESHOLD;

/// A timelock constraint: a kind plus an optional bound.
///
/// Only [`TimeLockKind::NoTimelocks`] is expected to carry no value. [`TimeLock::new`]
/// does not enforce this; use [`TimeLock::try_new`] when the input is untrusted.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TimeLock {
    kind: TimeLockKind,
    #[serde(default)]
    value: Option<u32>,
}

impl TimeLock {
    /// Create a lock without checking that the value matches the kind
    pub fn new(kind: TimeLockKind, value: Option<u32>) -> Self {
        Self { kind, value }
    }

    /// Create a lock, rejecting a value on `NoTimelocks` and a missing value elsewhere
    pub fn try_new(kind: TimeLockKind, value: Option<u32>) -> Result<Self, TimeLockError> {
        match (kind.is_bounded(), value) {
            (false, Some(_)) => Err(TimeLockError::UnexpectedValue(kind)),
            (true, None) => Err(TimeLockError::MissingValue(kind)),
            _ => Ok(Self { kind, value }),
        }
    }

    /// A path that needs no timelock at all
    pub fn unconstrained() -> Self {
        Self::new(TimeLockKind::NoTimelocks, None)
    }

    /// Relative lock of `blocks` confirmations (BIP68 height)
    pub fn sequence_depth(blocks: u32) -> Self {
        Self::new(TimeLockKind::SequenceDepth, Some(blocks))
    }

    /// Relative lock of `intervals` units of 512 seconds (BIP68 time)
    pub fn sequence_mtp(intervals: u32) -> Self {
        Self::new(TimeLockKind::SequenceMTP, Some(intervals))
    }

    /// Absolute lock at block `height`
    pub fn locktime_height(height: u32) -> Self {
        Self::new(TimeLockKind::LocktimeHeight, Some(height))
    }

    /// Absolute lock at median-time-past `timestamp`
    pub fn locktime_mtp(timestamp: u32) -> Self {
        Self::new(TimeLockKind::LocktimeMTP, Some(timestamp))
    }

    /// The kind this lock constrains
    pub fn kind(&self) -> TimeLockKind {
        self.kind
    }

    /// The raw stored value, including a stray one on `NoTimelocks`
    pub fn value(&self) -> Option<u32> {
        self.value
    }

    /// The value, ignored for kinds that carry no bound
    fn bound(&self) -> Option<u32> {
        self.value.filter(|_| self.kind.is_bounded())
    }

    /// Convert back to a consensus absolute locktime.
    ///
    /// `None` for relative kinds, missing values, or a value on the wrong side
    /// of [`LOCKTIME_THRESHOLD`] for its kind.
    pub fn to_absolute(&self) -> Option<absolute::LockTime> {
        let value = self.value?;
        match self.kind {
            TimeLockKind::LocktimeHeight => absolute::Height::from_consensus(value)
                .ok()
                .map(absolute::LockTime::Blocks),
            TimeLockKind::LocktimeMTP => absolute::Time::from_consensus(value)
                .ok()
                .map(absolute::LockTime::Seconds),
            _ => None,
        }
    }

    /// Convert back to a BIP68 relative locktime.
    ///
    /// `None` for absolute kinds, missing values, or values above 16 bits.
    pub fn to_relative(&self) -> Option<relative::LockTime> {
        let value = u16::try_from(self.value?).ok()?;
        match self.kind {
            TimeLockKind::SequenceDepth => Some(relative::LockTime::from_height(value)),
            TimeLockKind::SequenceMTP => {
                Some(relative::LockTime::from_512_second_intervals(value))
            }
            _ => None,
        }
    }
}

impl PartialEq for TimeLock {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for TimeLock {}

impl Hash for TimeLock {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
    }
}

impl Ord for TimeLock {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind.cmp(&other.kind)
    }
}

impl PartialOrd for TimeLock {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<absolute::LockTime> for TimeLock {
    fn from(lock_time: absolute::LockTime) -> Self {
        let kind = if lock_time.is_block_height() {
            TimeLockKind::LocktimeHeight
        } else {
            TimeLockKind::LocktimeMTP
        };
        Self::new(kind, Some(lock_time.to_consensus_u32()))
    }
}

impl From<relative::LockTime> for TimeLock {
    fn from(lock_time: relative::LockTime) -> Self {
        match lock_time {
            relative::LockTime::Blocks(height) => Self::sequence_depth(u32::from(height.value())),
            relative::LockTime::Time(time) => Self::sequence_mtp(u32::from(time.value())),
        }
    }
}

impl Serialize for TimeLock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let bound = self.bound();
        let mut state = serializer.serialize_struct("TimeLock", 1 + usize::from(bound.is_some()))?;
        state.serialize_field("kind", &self.kind)?;
        if let Some(value) = bound {
            state.serialize_field("value", &value)?;
        }
        state.end()
    }
}

impl fmt::Display for TimeLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bound() {
            Some(value) => write!(f, "{}({})", self.kind, value),
            None => write!(f, "{}", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_ignores_value() {
        assert_eq!(TimeLock::locktime_height(100), TimeLock::locktime_height(150));
        assert_eq!(
            TimeLock::new(TimeLockKind::SequenceMTP, None),
            TimeLock::sequence_mtp(7)
        );
        assert_ne!(TimeLock::locktime_height(100), TimeLock::locktime_mtp(100));
    }

    #[test]
    fn test_hash_and_order_follow_kind() {
        let set: HashSet<TimeLock> = [TimeLock::sequence_depth(1), TimeLock::sequence_depth(2)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 1);

        assert!(TimeLock::unconstrained() < TimeLock::sequence_depth(0));
        assert!(TimeLock::locktime_height(u32::MAX) < TimeLock::locktime_mtp(0));
    }

    #[test]
    fn test_try_new() {
        assert!(TimeLock::try_new(TimeLockKind::NoTimelocks, None).is_ok());
        assert_eq!(
            TimeLock::try_new(TimeLockKind::NoTimelocks, Some(1)),
            Err(TimeLockError::UnexpectedValue(TimeLockKind::NoTimelocks))
        );
        assert_eq!(
            TimeLock::try_new(TimeLockKind::LocktimeHeight, None),
            Err(TimeLockError::MissingValue(TimeLockKind::LocktimeHeight))
        );

        let lock = TimeLock::try_new(TimeLockKind::SequenceDepth, Some(144)).unwrap();
        assert_eq!(lock.value(), Some(144));
    }

    #[test]
    fn test_unchecked_constructor_keeps_stray_value() {
        let lock = TimeLock::new(TimeLockKind::NoTimelocks, Some(5));
        assert_eq!(lock.value(), Some(5));
        assert_eq!(lock, TimeLock::unconstrained());
    }

    #[test]
    fn test_from_absolute_locktime() {
        let height = absolute::LockTime::from_consensus(840_000);
        let lock = TimeLock::from(height);
        assert_eq!(lock.kind(), TimeLockKind::LocktimeHeight);
        assert_eq!(lock.value(), Some(840_000));
        assert_eq!(lock.to_absolute(), Some(height));

        let time = absolute::LockTime::from_consensus(LOCKTIME_THRESHOLD + 100);
        let lock = TimeLock::from(time);
        assert_eq!(lock.kind(), TimeLockKind::LocktimeMTP);
        assert_eq!(lock.value(), Some(LOCKTIME_THRESHOLD + 100));
        assert_eq!(lock.to_absolute(), Some(time));
    }

    #[test]
    fn test_from_relative_locktime() {
        let lock = TimeLock::from(relative::LockTime::from_height(26_280));
        assert_eq!(lock.kind(), TimeLockKind::SequenceDepth);
        assert_eq!(lock.value(), Some(26_280));
        assert_eq!(lock.to_relative(), Some(relative::LockTime::from_height(26_280)));

        let lock = TimeLock::from(relative::LockTime::from_512_second_intervals(10));
        assert_eq!(lock.kind(), TimeLockKind::SequenceMTP);
        assert_eq!(lock.value(), Some(10));
    }

    #[test]
    fn test_conversion_rejects_mismatched_values() {
        // Height kind holding a timestamp-sized value
        assert_eq!(TimeLock::locktime_height(LOCKTIME_THRESHOLD).to_absolute(), None);
        assert_eq!(TimeLock::locktime_mtp(100).to_absolute(), None);
        assert_eq!(TimeLock::sequence_depth(70_000).to_relative(), None);
        assert_eq!(TimeLock::sequence_depth(10).to_absolute(), None);
        assert_eq!(TimeLock::locktime_height(10).to_relative(), None);
        assert_eq!(TimeLock::unconstrained().to_absolute(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(TimeLock::unconstrained().to_string(), "no_timelocks");
        assert_eq!(TimeLock::locktime_height(150).to_string(), "locktime_height(150)");
    }

    #[test]
    fn test_stray_value_is_not_rendered() {
        let stray = TimeLock::new(TimeLockKind::NoTimelocks, Some(5));
        assert_eq!(stray.to_string(), "no_timelocks");
        assert_eq!(serde_json::to_string(&stray).unwrap(), r#"{"kind":"no_timelocks"}"#);
        assert_eq!(
            serde_json::to_string(&TimeLock::sequence_depth(144)).unwrap(),
            r#"{"kind":"sequence_depth","value":144}"#
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&TimeLock::unconstrained()).unwrap();
        assert_eq!(json, r#"{"kind":"no_timelocks"}"#);

        let lock: TimeLock =
            serde_json::from_str(r#"{"kind":"locktime_mtp","value":500000100}"#).unwrap();
        assert_eq!(lock.kind(), TimeLockKind::LocktimeMTP);
        assert_eq!(lock.value(), Some(500_000_100));
    }
}
