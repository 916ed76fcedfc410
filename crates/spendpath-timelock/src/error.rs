//! Errors for the checked constructors and parsers.
//!
//! The combination algebra itself is total and never returns these.

use thiserror::Error;

use crate::kind::TimeLockKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeLockError {
    #[error("Unknown timelock kind: {0}")]
    UnknownKind(String),

    #[error("Timelock kind {0} does not carry a value")]
    UnexpectedValue(TimeLockKind),

    #[error("Timelock kind {0} requires a value")]
    MissingValue(TimeLockKind),

    #[error("Policy error: {0}")]
    Policy(String),
}
