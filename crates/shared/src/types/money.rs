//! Validated monetary amounts.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! These types wrap `rust_decimal::Decimal` and carry the sign guarantee the
//! ledger rules rely on. Storage is `NUMERIC(15,2)`, so amounts are limited to
//! two decimal places and thirteen integer digits.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest amount a `NUMERIC(15,2)` column can hold.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_319, 232_830, 0, false, 2);

/// Reasons a decimal is not a valid amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Zero or negative where a positive amount is required.
    #[error("amount must be positive")]
    NotPositive,

    /// Negative where zero is allowed.
    #[error("amount must not be negative")]
    Negative,

    /// More than two decimal places.
    #[error("amount must have at most 2 decimal places")]
    TooPrecise,

    /// Exceeds the storage range.
    #[error("amount is too large")]
    TooLarge,
}

fn check_range(value: Decimal) -> Result<Decimal, AmountError> {
    let value = value.normalize();
    if value.scale() > 2 {
        return Err(AmountError::TooPrecise);
    }
    if value.abs() > MAX_AMOUNT {
        return Err(AmountError::TooLarge);
    }
    Ok(value)
}

/// An amount strictly greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct PositiveAmount(Decimal);

impl PositiveAmount {
    /// Validates a decimal as a positive amount.
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value <= Decimal::ZERO {
            return Err(AmountError::NotPositive);
        }
        check_range(value).map(Self)
    }

    /// Returns the inner decimal.
    #[must_use]
    pub const fn get(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for PositiveAmount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PositiveAmount> for Decimal {
    fn from(amount: PositiveAmount) -> Self {
        amount.0
    }
}

impl fmt::Display for PositiveAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// An amount greater than or equal to zero.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct NonNegativeAmount(Decimal);

impl NonNegativeAmount {
    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Validates a decimal as a non-negative amount.
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(AmountError::Negative);
        }
        check_range(value).map(|v| Self(v.abs()))
    }

    /// Returns the inner decimal.
    #[must_use]
    pub const fn get(self) -> Decimal {
        self.0
    }

    /// Returns true for zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl TryFrom<Decimal> for NonNegativeAmount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonNegativeAmount> for Decimal {
    fn from(amount: NonNegativeAmount) -> Self {
        amount.0
    }
}

impl From<PositiveAmount> for NonNegativeAmount {
    fn from(amount: PositiveAmount) -> Self {
        Self(amount.0)
    }
}

impl fmt::Display for NonNegativeAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<AmountError> for crate::AppError {
    fn from(err: AmountError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_max_amount_constant() {
        assert_eq!(MAX_AMOUNT, dec!(9999999999999.99));
    }

    #[rstest]
    #[case(dec!(0.01))]
    #[case(dec!(1))]
    #[case(dec!(150.50))]
    #[case(dec!(9999999999999.99))]
    fn test_positive_accepts(#[case] value: Decimal) {
        assert_eq!(PositiveAmount::new(value).unwrap().get(), value);
    }

    #[rstest]
    #[case(dec!(0), AmountError::NotPositive)]
    #[case(dec!(-5), AmountError::NotPositive)]
    #[case(dec!(1.005), AmountError::TooPrecise)]
    #[case(dec!(10000000000000), AmountError::TooLarge)]
    fn test_positive_rejects(#[case] value: Decimal, #[case] expected: AmountError) {
        assert_eq!(PositiveAmount::new(value), Err(expected));
    }

    #[test]
    fn test_trailing_zeros_are_not_precision() {
        assert!(PositiveAmount::new(dec!(12.5000)).is_ok());
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(42.10))]
    fn test_non_negative_accepts(#[case] value: Decimal) {
        let amount = NonNegativeAmount::new(value).unwrap();
        assert_eq!(amount.get(), value.abs());
        assert!(!amount.get().is_sign_negative() || amount.is_zero());
    }

    #[test]
    fn test_non_negative_rejects_negative() {
        assert_eq!(
            NonNegativeAmount::new(dec!(-0.01)),
            Err(AmountError::Negative)
        );
    }

    #[test]
    fn test_display_two_places() {
        assert_eq!(PositiveAmount::new(dec!(5)).unwrap().to_string(), "5.00");
        assert_eq!(NonNegativeAmount::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: PositiveAmount = serde_json::from_str("\"25.50\"").unwrap();
        assert_eq!(ok.get(), dec!(25.50));
        assert!(serde_json::from_str::<PositiveAmount>("0").is_err());
        assert!(serde_json::from_str::<NonNegativeAmount>("-1").is_err());
    }

    #[test]
    fn test_serialize_as_string() {
        let amount = NonNegativeAmount::new(dec!(80)).unwrap();
        assert_eq!(serde_json::to_string(&amount).unwrap(), "\"80\"");
    }
}
