//! SpendPath Timelock Algebra
//!
//! Combine the timelock constraints of alternative Bitcoin spending paths.
//!
//! # Concepts
//!
//! - **TimeLock**: one constraint, a kind (relative/absolute, height/time, or
//!   none) plus a bound. Locks compare by kind only.
//! - **TimeLockManager**: the constraints known to hold on one spending path,
//!   at most one per kind, merged by keeping the larger bound.
//! - **Threshold**: for n alternative paths, the constraints that bind when
//!   any m of them are used. `and` is 2-of-2, `or` is 1-of-2.
//!
//! # Example
//!
//! ```
//! use spendpath_timelock::{TimeLock, TimeLockKind, TimeLockManager};
//!
//! let owner: TimeLockManager = [TimeLock::unconstrained()].into_iter().collect();
//! let heir: TimeLockManager = [TimeLock::sequence_depth(26_280)].into_iter().collect();
//!
//! let either = owner.or(&heir);
//! assert!(either.has_type(TimeLockKind::NoTimelocks));
//! assert_eq!(
//!     either.get_type(TimeLockKind::SequenceDepth).and_then(|l| l.value()),
//!     Some(26_280)
//! );
//! ```

mod combine;
pub mod error;
pub mod kind;
pub mod lock;
pub mod manager;
pub mod policy;

pub use error::TimeLockError;
pub use kind::TimeLockKind;
pub use lock::{TimeLock, LOCKTIME_THRESHOLD};
pub use manager::TimeLockManager;
pub use policy::{lift_policy, lift_policy_str};
