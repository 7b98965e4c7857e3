//! Income and expense classification.

use std::fmt;
use std::str::FromStr;

use dompet_shared::AppError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Direction of a money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money received.
    Income,
    /// Money spent.
    Expense,
}

/// Unknown transaction type string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Type must be either income or expense")]
pub struct InvalidTransactionKind;

impl TransactionKind {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = InvalidTransactionKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(InvalidTransactionKind),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<InvalidTransactionKind> for AppError {
    fn from(err: InvalidTransactionKind) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_kinds() {
        assert_eq!("income".parse::<TransactionKind>(), Ok(TransactionKind::Income));
        assert_eq!("expense".parse::<TransactionKind>(), Ok(TransactionKind::Expense));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(
            "Income".parse::<TransactionKind>(),
            Err(InvalidTransactionKind)
        );
        assert!("transfer".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for kind in [TransactionKind::Income, TransactionKind::Expense] {
            assert_eq!(kind.to_string().parse::<TransactionKind>(), Ok(kind));
        }
    }
}
