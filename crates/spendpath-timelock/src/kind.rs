//! Timelock categories
//!
//! A spending path is constrained by at most one bound of each kind. Kinds are
//! unrelated categories: values are only ever compared within the same kind.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TimeLockError;

/// The category of a timelock constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeLockKind {
    /// Spendable without any time constraint
    NoTimelocks = 0,
    /// Relative lock in blocks (BIP68)
    SequenceDepth = 1,
    /// Relative lock in 512-second units of median-time-past (BIP68)
    #[serde(rename = "sequence_mtp")]
    SequenceMTP = 2,
    /// Absolute lock at a block height
    LocktimeHeight = 3,
    /// Absolute lock at a median-time-past timestamp
    #[serde(rename = "locktime_mtp")]
    LocktimeMTP = 4,
}

impl TimeLockKind {
    /// Every kind, in storage order.
    pub const ALL: [TimeLockKind; 5] = [
        TimeLockKind::NoTimelocks,
        TimeLockKind::SequenceDepth,
        TimeLockKind::SequenceMTP,
        TimeLockKind::LocktimeHeight,
        TimeLockKind::LocktimeMTP,
    ];

    /// Slot index of this kind (its discriminant)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Relative (nSequence) lock
    pub fn is_relative(self) -> bool {
        matches!(self, TimeLockKind::SequenceDepth | TimeLockKind::SequenceMTP)
    }

    /// Absolute (nLockTime) lock
    pub fn is_absolute(self) -> bool {
        matches!(self, TimeLockKind::LocktimeHeight | TimeLockKind::LocktimeMTP)
    }

    /// Whether locks of this kind carry a numeric bound
    pub fn is_bounded(self) -> bool {
        self != TimeLockKind::NoTimelocks
    }

    /// Lowercase name used by `Display`, `FromStr` and serde
    pub fn as_str(self) -> &'static str {
        match self {
            TimeLockKind::NoTimelocks => "no_timelocks",
            TimeLockKind::SequenceDepth => "sequence_depth",
            TimeLockKind::SequenceMTP => "sequence_mtp",
            TimeLockKind::LocktimeHeight => "locktime_height",
            TimeLockKind::LocktimeMTP => "locktime_mtp",
        }
    }
}

impl fmt::Display for TimeLockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeLockKind {
    type Err = TimeLockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeLockKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| TimeLockError::UnknownKind(s.to_string()))
    }
}
