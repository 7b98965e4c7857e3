//! Ledger domain types.

use std::fmt;
use std::str::FromStr;

use dompet_shared::{AppError, types::NonNegativeAmount};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which side of the obligation the owner is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtKind {
    /// The owner owes the counterparty.
    Debt,
    /// The counterparty owes the owner.
    Receivable,
}

/// Unknown debt type string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("type must be either debt or receivable")]
pub struct InvalidDebtKind;

impl DebtKind {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debt => "debt",
            Self::Receivable => "receivable",
        }
    }
}

impl FromStr for DebtKind {
    type Err = InvalidDebtKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debt" => Ok(Self::Debt),
            "receivable" => Ok(Self::Receivable),
            _ => Err(InvalidDebtKind),
        }
    }
}

impl fmt::Display for DebtKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settlement status of a debt.
///
/// `Paid` holds exactly when the remaining amount is zero, except after a
/// full-record update that sets the status explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtStatus {
    /// Balance outstanding.
    #[default]
    Active,
    /// Settled.
    Paid,
}

/// Unknown debt status string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("status must be either active or paid")]
pub struct InvalidDebtStatus;

impl DebtStatus {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paid => "paid",
        }
    }
}

impl FromStr for DebtStatus {
    type Err = InvalidDebtStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "paid" => Ok(Self::Paid),
            _ => Err(InvalidDebtStatus),
        }
    }
}

impl fmt::Display for DebtStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Balance and status after a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentOutcome {
    /// What is still owed.
    pub remaining_amount: NonNegativeAmount,
    /// Status derived from the remaining amount.
    pub status: DebtStatus,
}

impl From<InvalidDebtKind> for AppError {
    fn from(err: InvalidDebtKind) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<InvalidDebtStatus> for AppError {
    fn from(err: InvalidDebtStatus) -> Self {
        Self::Validation(err.to_string())
    }
}
