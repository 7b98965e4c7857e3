//! Integration tests for debt payments and savings contributions.
//!
//! The concurrent cases fire many requests at one record and check that no
//! update is lost.

mod common;

use dompet_core::ledger::{DebtKind, LedgerError};
use dompet_db::{
    DebtRepository, SavingsRepository,
    entities::sea_orm_active_enums::DebtStatus,
    repositories::{CreateDebtInput, DebtError, SavingsGoalInput},
};
use dompet_shared::types::{DebtId, NonNegativeAmount, PositiveAmount, SavingsGoalId};
use futures::future::join_all;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn positive(value: Decimal) -> PositiveAmount {
    PositiveAmount::new(value).unwrap()
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_debt_payment_lifecycle() {
    let db = common::setup().await;
    let owner = common::create_user(&db).await;
    let repo = DebtRepository::new(db);

    let debt = repo
        .create(
            owner,
            CreateDebtInput {
                kind: DebtKind::Receivable,
                person_name: "Sari".to_string(),
                amount: positive(dec!(100)),
                due_date: None,
                description: None,
            },
        )
        .await
        .unwrap();
    let id = DebtId::from_uuid(debt.id);
    assert_eq!(debt.remaining_amount, dec!(100));
    assert_eq!(debt.status, DebtStatus::Active);

    let partial = repo.apply_payment(owner, id, positive(dec!(40))).await.unwrap();
    assert_eq!(partial.remaining_amount, dec!(60));
    assert_eq!(partial.status, DebtStatus::Active);

    let rejected = repo.apply_payment(owner, id, positive(dec!(60.01))).await;
    assert!(matches!(
        rejected,
        Err(DebtError::Ledger(LedgerError::PaymentExceedsRemaining { .. }))
    ));

    let settled = repo.apply_payment(owner, id, positive(dec!(60))).await.unwrap();
    assert_eq!(settled.remaining_amount, Decimal::ZERO);
    assert_eq!(settled.status, DebtStatus::Paid);
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_concurrent_payments_do_not_lose_updates() {
    let db = common::setup().await;
    let owner = common::create_user(&db).await;
    let repo = DebtRepository::new(db);

    let debt = repo
        .create(
            owner,
            CreateDebtInput {
                kind: DebtKind::Debt,
                person_name: "Budi".to_string(),
                amount: positive(dec!(100)),
                due_date: None,
                description: None,
            },
        )
        .await
        .unwrap();
    let id = DebtId::from_uuid(debt.id);

    // 25 payments of 5 against a balance of 100: exactly 20 can succeed.
    let results = join_all((0..25).map(|_| {
        let repo = repo.clone();
        async move { repo.apply_payment(owner, id, positive(dec!(5))).await }
    }))
    .await;

    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    let rejected = results
        .iter()
        .filter(|r| matches!(r, Err(DebtError::Ledger(_))))
        .count();
    assert_eq!(succeeded, 20);
    assert_eq!(rejected, 5);

    let after = repo
        .list(owner)
        .await
        .unwrap()
        .into_iter()
        .find(|d| d.id == debt.id)
        .unwrap();
    assert_eq!(after.remaining_amount, Decimal::ZERO);
    assert_eq!(after.status, DebtStatus::Paid);
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_concurrent_savings_contributions_add_up() {
    let db = common::setup().await;
    let owner = common::create_user(&db).await;
    let repo = SavingsRepository::new(db);

    let goal = repo
        .create(
            owner,
            SavingsGoalInput {
                name: "Motor".to_string(),
                target_amount: positive(dec!(1000)),
                current_amount: NonNegativeAmount::ZERO,
                deadline: None,
            },
        )
        .await
        .unwrap();
    let id = SavingsGoalId::from_uuid(goal.id);

    let results = join_all((0..30).map(|_| {
        let repo = repo.clone();
        async move { repo.add_amount(owner, id, positive(dec!(12.50))).await }
    }))
    .await;
    assert!(results.iter().all(Result::is_ok));

    let after = repo
        .list(owner)
        .await
        .unwrap()
        .into_iter()
        .find(|g| g.id == goal.id)
        .unwrap();
    assert_eq!(after.current_amount, dec!(375.00));
}
