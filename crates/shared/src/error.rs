//! Ledger error taxonomy.
//!
//! Every operation on every component returns one of these on failure. The
//! `error_code` tag is what crosses the dispatch boundary to the host.

use thiserror::Error;

/// Result type alias using `LedgerError`.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors returned by ledger operations.
///
/// All errors are terminal for the call that produced them. A failed call
/// leaves no partial writes behind and advances no id sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Caller lacks the required identity or role.
    ///
    /// Also used where "missing" and "not yours" are deliberately reported
    /// as one cause so existence is not leaked to non-owners.
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// Referenced entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transfer exceeds the sender's balance.
    #[error("Insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance {
        /// Sender balance at the time of the call.
        available: u64,
        /// Amount the sender tried to move.
        requested: u64,
    },

    /// Non-positive or out-of-range quantity.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Listing missing, inactive, or smaller than the requested purchase.
    #[error("Invalid purchase: {0}")]
    InvalidPurchase(String),

    /// Unknown operation at the dispatch boundary.
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Call arguments missing, extra, or of the wrong shape.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Returns the machine-checkable tag carried in call results.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::InvalidPurchase(_) => "INVALID_PURCHASE",
            Self::MethodNotFound(_) => "METHOD_NOT_FOUND",
            Self::InvalidArguments(_) => "INVALID_ARGUMENTS",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the error was raised by the dispatch boundary rather
    /// than by a component operation.
    #[must_use]
    pub const fn is_dispatch_error(&self) -> bool {
        matches!(self, Self::MethodNotFound(_) | Self::InvalidArguments(_))
    }
}
