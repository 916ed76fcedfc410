//! Lifting miniscript policies into timelock facts
//!
//! A concrete policy is a tree of alternative spending conditions. Its
//! timelock obligations fold bottom-up through the threshold algebra:
//!
//! ```text
//! or(pk(OWNER), and(pk(HEIR), older(26280)))
//!   -> {no_timelocks, sequence_depth(26280)}
//! ```
//!
//! Keys, hash preimages and `TRIVIAL` need no timelock. `UNSATISFIABLE`
//! yields no spending path at all.

use bitcoin::{absolute, relative};
use miniscript::policy::Concrete;
use miniscript::MiniscriptKey;
use std::str::FromStr;

use crate::error::TimeLockError;
use crate::lock::TimeLock;
use crate::manager::TimeLockManager;

/// Fold a concrete policy into the timelocks required to satisfy it
///
/// `and` is lifted as an n-of-n threshold over its children, so a bounded
/// kind survives only when every conjunct carries it (keys count towards
/// any kind another conjunct carries). Same-kind conjuncts keep the larger
/// bound, `and(after(100),after(200))` lifts to `{locktime_height(200)}`,
/// but two different bounded kinds cancel each other out:
/// `and(after(100),older(10))` lifts to an empty manager, which reports no
/// spending path even though the policy itself can be satisfied.
pub fn lift_policy<Pk: MiniscriptKey>(policy: &Concrete<Pk>) -> TimeLockManager {
    match policy {
        Concrete::Unsatisfiable => TimeLockManager::new(),
        Concrete::After(lock_time) => {
            TimeLock::from(absolute::LockTime::from(*lock_time)).into()
        }
        Concrete::Older(lock_time) => {
            TimeLock::from(relative::LockTime::from(*lock_time)).into()
        }
        Concrete::And(subs) => {
            let lifted: Vec<_> = subs.iter().map(|sub| lift_policy(sub)).collect();
            TimeLockManager::thresh(&lifted, lifted.len())
        }
        Concrete::Or(subs) => {
            let lifted: Vec<_> = subs.iter().map(|(_, sub)| lift_policy(sub)).collect();
            TimeLockManager::thresh(&lifted, 1)
        }
        Concrete::Thresh(thresh) => {
            let lifted: Vec<_> = thresh.iter().map(|sub| lift_policy(sub)).collect();
            TimeLockManager::thresh(&lifted, thresh.k())
        }
        // Trivial, keys and hash locks
        _ => TimeLock::unconstrained().into(),
    }
}

/// Parse a policy with string keys (e.g. `and(pk(A),after(100))`) and lift it
pub fn lift_policy_str(policy: &str) -> Result<TimeLockManager, TimeLockError> {
    let policy = Concrete::<String>::from_str(policy)
        .map_err(|e| TimeLockError::Policy(e.to_string()))?;
    let manager = lift_policy(&policy);
    log::debug!("lifted policy {} -> {}", policy, manager);
    Ok(manager)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::TimeLockKind;
    use crate::lock::LOCKTIME_THRESHOLD;
    use miniscript::RelLockTime;
    use std::sync::Arc;

    fn entries(manager: &TimeLockManager) -> Vec<(TimeLockKind, Option<u32>)> {
        manager.iter().map(|l| (l.kind(), l.value())).collect()
    }

    #[test]
    fn test_key_needs_no_timelock() {
        let locks = lift_policy_str("pk(A)").unwrap();
        assert_eq!(entries(&locks), vec![(TimeLockKind::NoTimelocks, None)]);
    }

    #[test]
    fn test_leaf_locks() {
        let locks = lift_policy_str("after(100)").unwrap();
        assert_eq!(entries(&locks), vec![(TimeLockKind::LocktimeHeight, Some(100))]);

        let locks = lift_policy_str(&format!("after({})", LOCKTIME_THRESHOLD + 100)).unwrap();
        assert_eq!(
            entries(&locks),
            vec![(TimeLockKind::LocktimeMTP, Some(LOCKTIME_THRESHOLD + 100))]
        );

        let locks = lift_policy_str("older(144)").unwrap();
        assert_eq!(entries(&locks), vec![(TimeLockKind::SequenceDepth, Some(144))]);
    }

    #[test]
    fn test_inheritance_policy() {
        let locks = lift_policy_str("or(pk(OWNER),and(pk(HEIR),older(26280)))").unwrap();
        assert_eq!(
            entries(&locks),
            vec![
                (TimeLockKind::NoTimelocks, None),
                (TimeLockKind::SequenceDepth, Some(26280))
            ]
        );
    }

    #[test]
    fn test_and_of_key_and_lock_drops_no_timelocks() {
        let locks = lift_policy_str("and(pk(A),after(800000))").unwrap();
        assert_eq!(entries(&locks), vec![(TimeLockKind::LocktimeHeight, Some(800000))]);
    }

    #[test]
    fn test_thresh_policy() {
        let locks = lift_policy_str("thresh(2,pk(A),older(10),older(20))").unwrap();
        assert_eq!(entries(&locks), vec![(TimeLockKind::SequenceDepth, Some(20))]);
    }

    #[test]
    fn test_unsatisfiable_branch() {
        let locks = lift_policy(&Concrete::<String>::Unsatisfiable);
        assert!(!locks.has_spending_path());

        let policy = Concrete::<String>::Or(vec![
            (1, Arc::new(Concrete::Unsatisfiable)),
            (1, Arc::new(Concrete::Older(RelLockTime::from_height(5)))),
        ]);
        let locks = lift_policy(&policy);
        assert_eq!(entries(&locks), vec![(TimeLockKind::SequenceDepth, Some(5))]);

        let policy = Concrete::<String>::And(vec![
            Arc::new(Concrete::Key("A".into())),
            Arc::new(Concrete::Unsatisfiable),
        ]);
        assert!(!lift_policy(&policy).has_spending_path());
    }

    #[test]
    fn test_invalid_policy() {
        assert!(matches!(
            lift_policy_str("and(pk(A)"),
            Err(TimeLockError::Policy(_))
        ));
    }

    #[test]
    fn test_and_of_distinct_locks_cancels() {
        let locks = lift_policy_str("and(after(100),after(200))").unwrap();
        assert_eq!(entries(&locks), vec![(TimeLockKind::LocktimeHeight, Some(200))]);

        let locks = lift_policy_str("and(after(100),older(10))").unwrap();
        assert!(locks.is_empty());
        assert!(!locks.has_spending_path());

        let locks = lift_policy_str("and(pk(A),and(after(100),older(10)))").unwrap();
        assert!(locks.is_empty());
        assert!(!locks.has_spending_path());
    }
}
