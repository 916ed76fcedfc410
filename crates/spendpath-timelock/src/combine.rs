//! Threshold combination of spending paths
//!
//! Given n alternative spending paths, [`TimeLockManager::thresh`] computes the
//! timelocks that must hold when any m of them are used together. A kind is
//! kept when at least m paths require it, and its bound is the largest one
//! seen on any path.
//!
//! A path carrying `NoTimelocks` is always satisfiable, so it counts towards
//! every bounded kind that some other path requires and it lacks. The credit
//! is applied once per such path and per kind; credited counts do not feed
//! further credits.

use crate::kind::TimeLockKind;
use crate::manager::TimeLockManager;

/// Per-kind presence counts and max-merged bounds over a set of paths
#[derive(Debug, Clone, Default)]
pub(crate) struct Tally {
    counts: [usize; 5],
    merged: TimeLockManager,
}

impl Tally {
    /// Count each kind and fold every lock through the max-merge rule
    pub(crate) fn observe(managers: &[TimeLockManager]) -> Self {
        let mut tally = Self::default();
        for manager in managers {
            for lock in manager.iter() {
                tally.merged.update(lock);
                tally.counts[lock.kind().index()] += 1;
            }
        }
        tally
    }

    /// Credit `NoTimelocks` paths towards the bounded kinds they lack
    pub(crate) fn credit_unconstrained(&mut self, managers: &[TimeLockManager]) {
        let observed = self.counts;
        for manager in managers
            .iter()
            .filter(|manager| manager.has_type(TimeLockKind::NoTimelocks))
        {
            for kind in TimeLockKind::ALL.into_iter().filter(|kind| kind.is_bounded()) {
                if observed[kind.index()] > 0 && !manager.has_type(kind) {
                    self.counts[kind.index()] += 1;
                }
            }
        }
    }

    pub(crate) fn count(&self, kind: TimeLockKind) -> usize {
        self.counts[kind.index()]
    }

    /// Keep the merged locks whose count reaches `m`
    pub(crate) fn select(&self, m: usize) -> TimeLockManager {
        self.merged
            .iter()
            .filter(|lock| self.count(lock.kind()) >= m)
            .collect()
    }
}

impl TimeLockManager {
    /// Combine `managers` under an m-of-n threshold.
    ///
    /// The inputs are left untouched. An empty input or `m` above the number
    /// of paths gives an empty manager; `m == 0` keeps every kind seen.
    pub fn thresh(managers: &[TimeLockManager], m: usize) -> TimeLockManager {
        let mut tally = Tally::observe(managers);
        tally.credit_unconstrained(managers);

        log::trace!(
            "thresh {}-of-{}: counts {:?}, merged {}",
            m,
            managers.len(),
            tally.counts,
            tally.merged
        );

        tally.select(m)
    }

    /// Both paths must hold
    pub fn and(&self, other: &TimeLockManager) -> TimeLockManager {
        Self::thresh(&[self.clone(), other.clone()], 2)
    }

    /// Either path suffices
    pub fn or(&self, other: &TimeLockManager) -> TimeLockManager {
        Self::thresh(&[self.clone(), other.clone()], 1)
    }
}
