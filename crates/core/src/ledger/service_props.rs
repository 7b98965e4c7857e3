//! Property-based tests for LedgerService.
//!
//! - Payments reduce the balance by exactly the payment
//! - Settlement happens exactly at zero
//! - Overpayments and non-positive amounts never mutate anything
//! - Savings grow by exactly the added amount, uncapped by target

use dompet_shared::types::{NonNegativeAmount, PositiveAmount};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::service::LedgerService;
use super::types::DebtStatus;

/// Strategy to generate positive decimal amounts (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate zero or negative amounts.
fn non_positive_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(-cents, 2))
}

/// Strategy for a balance and a payment that does not exceed it.
fn balance_and_valid_payment() -> impl Strategy<Value = (Decimal, Decimal)> {
    (1i64..100_000_000i64)
        .prop_flat_map(|balance| (Just(balance), 1i64..=balance))
        .prop_map(|(balance, payment)| (Decimal::new(balance, 2), Decimal::new(payment, 2)))
}

/// Strategy for a balance and a payment strictly above it.
fn balance_and_overpayment() -> impl Strategy<Value = (Decimal, Decimal)> {
    (0i64..100_000_000i64, 1i64..100_000_000i64)
        .prop_map(|(balance, extra)| (Decimal::new(balance, 2), Decimal::new(balance + extra, 2)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* payment p with 0 < p <= remaining, the new remaining is
    /// remaining - p and the status is paid iff it reached zero.
    #[test]
    fn prop_valid_payment_subtracts_exactly((balance, payment) in balance_and_valid_payment()) {
        let remaining = NonNegativeAmount::new(balance).unwrap();
        let payment = PositiveAmount::new(payment).unwrap();

        let outcome = LedgerService::apply_payment(remaining, payment).unwrap();

        prop_assert_eq!(outcome.remaining_amount.get(), balance - payment.get());
        prop_assert_eq!(
            outcome.status == DebtStatus::Paid,
            outcome.remaining_amount.get().is_zero()
        );
    }

    /// Paying exactly the remaining balance always settles the debt.
    #[test]
    fn prop_exact_payment_settles(balance in positive_amount()) {
        let outcome = LedgerService::apply_payment(
            NonNegativeAmount::new(balance).unwrap(),
            PositiveAmount::new(balance).unwrap(),
        )
        .unwrap();

        prop_assert!(outcome.remaining_amount.is_zero());
        prop_assert_eq!(outcome.status, DebtStatus::Paid);
    }

    /// Paying more than the remaining balance is rejected.
    #[test]
    fn prop_overpayment_rejected((balance, payment) in balance_and_overpayment()) {
        let result = LedgerService::apply_payment(
            NonNegativeAmount::new(balance).unwrap(),
            PositiveAmount::new(payment).unwrap(),
        );

        let is_rejected = matches!(result, Err(LedgerError::PaymentExceedsRemaining { .. }));
        prop_assert!(is_rejected);
    }

    /// Zero or negative amounts never become a `PositiveAmount`, so they can
    /// never reach a mutation.
    #[test]
    fn prop_non_positive_amount_rejected(amount in non_positive_amount()) {
        prop_assert!(PositiveAmount::new(amount).is_err());
    }

    /// *For any* addition a > 0, the new savings total is current + a,
    /// with no rejection relative to a target.
    #[test]
    fn prop_savings_add_exactly(current in 0i64..100_000_000i64, amount in positive_amount()) {
        let current = Decimal::new(current, 2);
        let after = LedgerService::add_to_savings(
            NonNegativeAmount::new(current).unwrap(),
            PositiveAmount::new(amount).unwrap(),
        )
        .unwrap();

        prop_assert_eq!(after.get(), current + amount);
    }
}
