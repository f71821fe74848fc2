use crate::BoxError;
use thiserror::Error;

/// Failures reported by the [`UndoStack`](crate::UndoStack) and the
/// [`UndoableTransaction`](crate::UndoableTransaction).
///
/// By the time one of these is returned, the stack has already finished its own
/// bookkeeping and logged the failure, so further undo and redo calls keep working.
#[derive(Debug, Error)]
pub enum Error {
    /// An operation failed while being undone.
    #[error("failed to undo `{label}`: {source}")]
    Undo {
        /// Display name of the operation.
        label: String,
        /// The error returned by the operation.
        #[source]
        source: BoxError,
    },
    /// An operation failed while being redone.
    #[error("failed to redo `{label}`: {source}")]
    Redo {
        /// Display name of the operation.
        label: String,
        /// The error returned by the operation.
        #[source]
        source: BoxError,
    },
    /// An open compound operation could not be fully unwound.
    #[error("failed to roll back `{label}`: {source}")]
    Rollback {
        /// Display name of the compound operation.
        label: String,
        /// The error returned by the sub-operation.
        #[source]
        source: BoxError,
    },
    /// The body of a transaction failed and its changes were rolled back.
    #[error("`{label}` failed and was rolled back: {source}")]
    Transaction {
        /// Display name of the transaction.
        label: String,
        /// The error returned by the transaction body.
        #[source]
        source: BoxError,
    },
}

impl Error {
    /// Returns the display name of the operation or transaction that failed.
    pub fn label(&self) -> &str {
        match self {
            Error::Undo { label, .. }
            | Error::Redo { label, .. }
            | Error::Rollback { label, .. }
            | Error::Transaction { label, .. } => label,
        }
    }
}
