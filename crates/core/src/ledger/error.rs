//! Ledger error types.

use dompet_shared::{AppError, types::AmountError};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while mutating a balance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Payment is larger than what is still owed.
    #[error("Payment amount exceeds remaining amount")]
    PaymentExceedsRemaining {
        /// Requested payment.
        payment: Decimal,
        /// Balance at the time of the request.
        remaining: Decimal,
    },

    /// Savings total would no longer fit the storage range.
    #[error("Savings amount exceeds the supported range")]
    SavingsOverflow,

    /// A computed balance is not a valid amount.
    #[error("invalid balance: {0}")]
    InvalidBalance(#[from] AmountError),
}

impl LedgerError {
    /// Returns the error code for structured logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::PaymentExceedsRemaining { .. } => "PAYMENT_EXCEEDS_REMAINING",
            Self::SavingsOverflow => "SAVINGS_OVERFLOW",
            Self::InvalidBalance(_) => "INVALID_BALANCE",
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::PaymentExceedsRemaining { .. } => Self::Conflict(err.to_string()),
            LedgerError::SavingsOverflow => Self::Validation(err.to_string()),
            LedgerError::InvalidBalance(_) => Self::Internal(err.to_string()),
        }
    }
}
