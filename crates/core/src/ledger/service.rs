//! Ledger service: pure balance mutation rules.

use dompet_shared::types::{NonNegativeAmount, PositiveAmount};

use super::error::LedgerError;
use super::types::{DebtStatus, PaymentOutcome};

/// Ledger service for debt payments and savings accumulation.
///
/// This service contains pure business logic with no database dependencies.
/// Repositories call it between reading a locked row and writing it back.
pub struct LedgerService;

impl LedgerService {
    /// Derives the status implied by a remaining balance.
    #[must_use]
    pub fn status_for(remaining: NonNegativeAmount) -> DebtStatus {
        if remaining.is_zero() {
            DebtStatus::Paid
        } else {
            DebtStatus::Active
        }
    }

    /// Opening balance of a newly recorded debt: nothing paid yet.
    #[must_use]
    pub fn open_debt(amount: PositiveAmount) -> PaymentOutcome {
        PaymentOutcome {
            remaining_amount: amount.into(),
            status: DebtStatus::Active,
        }
    }

    /// Applies a payment to a remaining balance.
    ///
    /// The result is `Paid` only when the payment settles the balance exactly.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::PaymentExceedsRemaining` when the payment is
    /// larger than the balance. The caller must then leave the record untouched.
    pub fn apply_payment(
        remaining: NonNegativeAmount,
        payment: PositiveAmount,
    ) -> Result<PaymentOutcome, LedgerError> {
        if payment.get() > remaining.get() {
            return Err(LedgerError::PaymentExceedsRemaining {
                payment: payment.get(),
                remaining: remaining.get(),
            });
        }

        let remaining_amount = NonNegativeAmount::new(remaining.get() - payment.get())?;

        Ok(PaymentOutcome {
            remaining_amount,
            status: Self::status_for(remaining_amount),
        })
    }

    /// Adds to a savings balance.
    ///
    /// There is no cap at the goal's target; reaching or passing it is allowed.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::SavingsOverflow` when the total leaves the
    /// storable range.
    pub fn add_to_savings(
        current: NonNegativeAmount,
        amount: PositiveAmount,
    ) -> Result<NonNegativeAmount, LedgerError> {
        NonNegativeAmount::new(current.get() + amount.get())
            .map_err(|_| LedgerError::SavingsOverflow)
    }
}
