//! Balance ledger rules for debts and savings goals.
//!
//! This module implements:
//! - Debt classification and settlement status
//! - Partial payments against a remaining balance
//! - Incremental savings accumulation

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::LedgerError;
pub use service::LedgerService;
pub use types::{DebtKind, DebtStatus, InvalidDebtKind, InvalidDebtStatus, PaymentOutcome};
