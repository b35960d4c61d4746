//! Error types for task assignment.

use thiserror::Error;

/// Why a task selection could not be applied.
///
/// Never fatal: the sleeve is left idle and the caller carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("invalid/unrecognized task kind: {0:?}")]
    UnrecognizedKind(String),
    #[error("unknown crime: {0:?}")]
    UnknownCrime(String),
}
