//! Timelock facts for one spending path
//!
//! A [`TimeLockManager`] holds at most one [`TimeLock`] per kind. Merging a
//! lock into it keeps the larger bound, since a later height or timestamp is
//! the stricter requirement.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::kind::TimeLockKind;
use crate::lock::TimeLock;

/// The set of timelock constraints that hold together on one spending path
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<TimeLock>", into = "Vec<TimeLock>")]
pub struct TimeLockManager {
    slots: [Option<TimeLock>; 5],
}

impl TimeLockManager {
    /// Create an empty manager (no known spending path)
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any timelock fact is recorded.
    ///
    /// An empty manager means nothing is known about the path; callers treat
    /// it as having no usable spending path.
    pub fn has_spending_path(&self) -> bool {
        self.slots.iter().any(Option::is_some)
    }

    pub fn has_type(&self, kind: TimeLockKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    /// The stored lock for `kind`, if any
    pub fn get_type(&self, kind: TimeLockKind) -> Option<TimeLock> {
        self.slots[kind.index()]
    }

    /// Merge a lock in, keeping the larger bound for its kind.
    ///
    /// An existing entry is replaced only when the new value is greater than
    /// or equal to it. Absent values order below present ones.
    pub fn update(&mut self, lock: TimeLock) {
        let slot = &mut self.slots[lock.kind().index()];
        if let Some(existing) = slot {
            if existing.value() >= lock.value() {
                return;
            }
        }
        *slot = Some(lock);
    }

    /// Merge every lock of `other` in, in kind order
    pub fn update_from(&mut self, other: &TimeLockManager) {
        for lock in other.iter() {
            self.update(lock);
        }
    }

    /// Stored locks in kind order
    pub fn iter(&self) -> impl Iterator<Item = TimeLock> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn kinds(&self) -> impl Iterator<Item = TimeLockKind> + '_ {
        self.iter().map(|lock| lock.kind())
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_spending_path()
    }
}

impl FromIterator<TimeLock> for TimeLockManager {
    fn from_iter<I: IntoIterator<Item = TimeLock>>(iter: I) -> Self {
        let mut manager = Self::new();
        manager.extend(iter);
        manager
    }
}

impl Extend<TimeLock> for TimeLockManager {
    fn extend<I: IntoIterator<Item = TimeLock>>(&mut self, iter: I) {
        for lock in iter {
            self.update(lock);
        }
    }
}

impl From<TimeLock> for TimeLockManager {
    fn from(lock: TimeLock) -> Self {
        std::iter::once(lock).collect()
    }
}

impl From<Vec<TimeLock>> for TimeLockManager {
    fn from(locks: Vec<TimeLock>) -> Self {
        locks.into_iter().collect()
    }
}

impl From<TimeLockManager> for Vec<TimeLock> {
    fn from(manager: TimeLockManager) -> Self {
        manager.iter().collect()
    }
}

impl fmt::Display for TimeLockManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, lock) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", lock)?;
        }
        f.write_str("}")
    }
}
