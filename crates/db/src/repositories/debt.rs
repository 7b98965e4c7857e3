//! Debt repository for debts and receivables.
//!
//! Payments run inside a database transaction with the debt row locked, so
//! concurrent payments against the same record serialize instead of losing
//! updates.

use std::sync::Arc;

use chrono::NaiveDate;
use dompet_core::ledger::{DebtKind, DebtStatus, LedgerError, LedgerService};
use dompet_shared::AppError;
use dompet_shared::types::{DebtId, NonNegativeAmount, PositiveAmount, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;

use crate::entities::debts;

/// Error types for debt operations.
#[derive(Debug, thiserror::Error)]
pub enum DebtError {
    /// Debt not found for this owner.
    #[error("Debt not found")]
    NotFound,

    /// A ledger rule rejected the mutation.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for recording a new debt or receivable.
#[derive(Debug, Clone)]
pub struct CreateDebtInput {
    /// Debt or receivable.
    pub kind: DebtKind,
    /// Counterparty.
    pub person_name: String,
    /// Original amount.
    pub amount: PositiveAmount,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Optional note.
    pub description: Option<String>,
}

/// Input for a full-record update.
///
/// Remaining amount and status are written as given, without checking them
/// against the original amount.
#[derive(Debug, Clone)]
pub struct UpdateDebtInput {
    /// Debt or receivable.
    pub kind: DebtKind,
    /// Counterparty.
    pub person_name: String,
    /// Original amount.
    pub amount: PositiveAmount,
    /// Outstanding balance.
    pub remaining_amount: NonNegativeAmount,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Optional note.
    pub description: Option<String>,
    /// Settlement status.
    pub status: DebtStatus,
}

/// Debt repository.
#[derive(Debug, Clone)]
pub struct DebtRepository {
    db: Arc<DatabaseConnection>,
}

impl DebtRepository {
    /// Creates a new debt repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists a user's debts and receivables, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<debts::Model>, DebtError> {
        Ok(debts::Entity::find()
            .filter(debts::Column::UserId.eq(user_id.into_inner()))
            .order_by_desc(debts::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?)
    }

    /// Records a debt with its full amount outstanding.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        user_id: UserId,
        input: CreateDebtInput,
    ) -> Result<debts::Model, DebtError> {
        let opening = LedgerService::open_debt(input.amount);
        let now = chrono::Utc::now().into();

        let debt = debts::ActiveModel {
            id: Set(DebtId::new().into_inner()),
            user_id: Set(user_id.into_inner()),
            kind: Set(input.kind.into()),
            person_name: Set(input.person_name),
            amount: Set(input.amount.get()),
            remaining_amount: Set(opening.remaining_amount.get()),
            description: Set(input.description),
            due_date: Set(input.due_date),
            status: Set(opening.status.into()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(debt.insert(self.db.as_ref()).await?)
    }

    /// Overwrites every mutable field.
    ///
    /// # Errors
    ///
    /// Returns `DebtError::NotFound` if no such debt belongs to the user.
    pub async fn update(
        &self,
        user_id: UserId,
        id: DebtId,
        input: UpdateDebtInput,
    ) -> Result<debts::Model, DebtError> {
        let changes = debts::ActiveModel {
            kind: Set(input.kind.into()),
            person_name: Set(input.person_name),
            amount: Set(input.amount.get()),
            remaining_amount: Set(input.remaining_amount.get()),
            description: Set(input.description),
            due_date: Set(input.due_date),
            status: Set(input.status.into()),
            ..Default::default()
        };

        debts::Entity::update_many()
            .set(changes)
            .filter(debts::Column::Id.eq(id.into_inner()))
            .filter(debts::Column::UserId.eq(user_id.into_inner()))
            .exec_with_returning(self.db.as_ref())
            .await?
            .into_iter()
            .next()
            .ok_or(DebtError::NotFound)
    }

    /// Applies a payment and returns the updated record.
    ///
    /// The row is read with `FOR UPDATE` and written back in the same
    /// transaction. A rejected payment rolls back without touching the row.
    ///
    /// # Errors
    ///
    /// Returns `DebtError::NotFound` if no such debt belongs to the user.
    /// Returns `DebtError::Ledger` if the payment exceeds the remaining amount.
    pub async fn apply_payment(
        &self,
        user_id: UserId,
        id: DebtId,
        payment: PositiveAmount,
    ) -> Result<debts::Model, DebtError> {
        let txn = self.db.begin().await?;

        let debt = debts::Entity::find_by_id(id.into_inner())
            .filter(debts::Column::UserId.eq(user_id.into_inner()))
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(DebtError::NotFound)?;

        let remaining = NonNegativeAmount::new(debt.remaining_amount).map_err(LedgerError::from)?;
        let outcome = LedgerService::apply_payment(remaining, payment)?;

        let mut active: debts::ActiveModel = debt.into();
        active.remaining_amount = Set(outcome.remaining_amount.get());
        active.status = Set(outcome.status.into());
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        info!(
            debt_id = %updated.id,
            payment = %payment,
            remaining = %updated.remaining_amount,
            status = %outcome.status,
            "Debt payment applied"
        );

        Ok(updated)
    }

    /// Deletes a debt.
    ///
    /// # Errors
    ///
    /// Returns `DebtError::NotFound` if no such debt belongs to the user.
    pub async fn delete(&self, user_id: UserId, id: DebtId) -> Result<(), DebtError> {
        let result = debts::Entity::delete_many()
            .filter(debts::Column::Id.eq(id.into_inner()))
            .filter(debts::Column::UserId.eq(user_id.into_inner()))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(DebtError::NotFound);
        }
        Ok(())
    }
}

impl From<DebtError> for AppError {
    fn from(err: DebtError) -> Self {
        match err {
            DebtError::NotFound => Self::NotFound(err.to_string()),
            DebtError::Ledger(e) => e.into(),
            DebtError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums::{DebtKind as DbDebtKind, DebtStatus as DbDebtStatus};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use uuid::Uuid;

    fn debt(owner: Uuid, remaining: Decimal, status: DbDebtStatus) -> debts::Model {
        let now = chrono::Utc::now().into();
        debts::Model {
            id: Uuid::new_v4(),
            user_id: owner,
            kind: DbDebtKind::Debt,
            person_name: "Budi".to_string(),
            amount: dec!(100),
            remaining_amount: remaining,
            description: None,
            due_date: None,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    fn pay(amount: Decimal) -> PositiveAmount {
        PositiveAmount::new(amount).unwrap()
    }

    #[tokio::test]
    async fn test_payment_settles_debt() {
        let owner = Uuid::new_v4();
        let before = debt(owner, dec!(100), DbDebtStatus::Active);
        let after = debts::Model {
            remaining_amount: dec!(0),
            status: DbDebtStatus::Paid,
            ..before.clone()
        };
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![before.clone()], vec![after.clone()]])
                .into_connection(),
        );

        let updated = DebtRepository::new(Arc::clone(&db))
            .apply_payment(UserId::from_uuid(owner), DebtId::from_uuid(before.id), pay(dec!(100)))
            .await
            .unwrap();
        assert_eq!(updated.status, DbDebtStatus::Paid);

        let log = Arc::into_inner(db).unwrap().into_transaction_log();
        let statements: Vec<_> = log.iter().flat_map(|t| t.statements()).collect();

        let lock = statements
            .iter()
            .find(|s| s.sql.starts_with("SELECT"))
            .unwrap();
        assert!(lock.sql.contains("FOR UPDATE"));

        let write = statements
            .iter()
            .find(|s| s.sql.starts_with("UPDATE"))
            .unwrap();
        let values = &write.values.as_ref().unwrap().0;
        assert!(values.contains(&Value::from(dec!(0))));
        assert!(values.contains(&Value::from("paid")));
        assert!(values.contains(&Value::from(before.id)));

        assert_eq!(statements.last().unwrap().sql, "COMMIT");
    }

    #[tokio::test]
    async fn test_partial_payment_stays_active() {
        let owner = Uuid::new_v4();
        let before = debt(owner, dec!(100), DbDebtStatus::Active);
        let after = debts::Model {
            remaining_amount: dec!(60),
            ..before.clone()
        };
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![before.clone()], vec![after]])
                .into_connection(),
        );

        DebtRepository::new(Arc::clone(&db))
            .apply_payment(UserId::from_uuid(owner), DebtId::from_uuid(before.id), pay(dec!(40)))
            .await
            .unwrap();

        let log = Arc::into_inner(db).unwrap().into_transaction_log();
        let write = log
            .iter()
            .flat_map(|t| t.statements())
            .find(|s| s.sql.starts_with("UPDATE"))
            .unwrap();
        let values = &write.values.as_ref().unwrap().0;
        assert!(values.contains(&Value::from(dec!(60))));
        assert!(values.contains(&Value::from("active")));
    }

    #[tokio::test]
    async fn test_overpayment_rejected_before_write() {
        let owner = Uuid::new_v4();
        let before = debt(owner, dec!(100), DbDebtStatus::Active);
        // Only the locking read is scripted; a write would find no result.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![before.clone()]])
            .into_connection();

        let result = DebtRepository::new(Arc::new(db))
            .apply_payment(UserId::from_uuid(owner), DebtId::from_uuid(before.id), pay(dec!(150)))
            .await;

        assert!(matches!(
            result,
            Err(DebtError::Ledger(LedgerError::PaymentExceedsRemaining { .. }))
        ));
    }

    #[tokio::test]
    async fn test_payment_on_foreign_debt_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<debts::Model>::new()])
            .into_connection();

        let result = DebtRepository::new(Arc::new(db))
            .apply_payment(UserId::new(), DebtId::new(), pay(dec!(10)))
            .await;

        assert!(matches!(result, Err(DebtError::NotFound)));
    }

    #[tokio::test]
    async fn test_create_starts_active_with_full_balance() {
        let owner = Uuid::new_v4();
        let created = debt(owner, dec!(100), DbDebtStatus::Active);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![created.clone()]])
            .into_connection();

        let result = DebtRepository::new(Arc::new(db))
            .create(
                UserId::from_uuid(owner),
                CreateDebtInput {
                    kind: DebtKind::Debt,
                    person_name: "Budi".to_string(),
                    amount: pay(dec!(100)),
                    due_date: None,
                    description: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(result.remaining_amount, result.amount);
        assert_eq!(result.status, DbDebtStatus::Active);
    }
}
