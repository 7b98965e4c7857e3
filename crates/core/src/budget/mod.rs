//! Budget periods.

use std::fmt;
use std::str::FromStr;

use dompet_shared::AppError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How often a budget limit resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    /// Resets every week.
    Weekly,
    /// Resets every month.
    Monthly,
    /// Resets every year.
    Yearly,
}

/// Unknown budget period string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid period value")]
pub struct InvalidBudgetPeriod;

impl BudgetPeriod {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl FromStr for BudgetPeriod {
    type Err = InvalidBudgetPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(InvalidBudgetPeriod),
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<InvalidBudgetPeriod> for AppError {
    fn from(err: InvalidBudgetPeriod) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("weekly", BudgetPeriod::Weekly)]
    #[case("monthly", BudgetPeriod::Monthly)]
    #[case("yearly", BudgetPeriod::Yearly)]
    fn test_parse_period(#[case] input: &str, #[case] expected: BudgetPeriod) {
        assert_eq!(input.parse::<BudgetPeriod>(), Ok(expected));
        assert_eq!(expected.as_str(), input);
    }

    #[rstest]
    #[case("daily")]
    #[case("")]
    #[case("MONTHLY")]
    fn test_invalid_period(#[case] input: &str) {
        let err = input.parse::<BudgetPeriod>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid period value");
    }
}
