//! Transaction repository for income and expense records.

use std::sync::Arc;

use chrono::NaiveDate;
use dompet_core::transaction::TransactionKind;
use dompet_shared::AppError;
use dompet_shared::types::{PositiveAmount, TransactionId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::{sea_orm_active_enums::TransactionType, transactions};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found for this owner.
    #[error("Transaction not found")]
    NotFound,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating or fully replacing a transaction.
#[derive(Debug, Clone)]
pub struct TransactionInput {
    /// Income or expense.
    pub kind: TransactionKind,
    /// Amount moved.
    pub amount: PositiveAmount,
    /// Free-form category.
    pub category: String,
    /// Optional note.
    pub description: Option<String>,
    /// Day the money moved.
    pub date: NaiveDate,
}

/// Filter options for listing transactions. All bounds are inclusive.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Earliest date.
    pub start_date: Option<NaiveDate>,
    /// Latest date.
    pub end_date: Option<NaiveDate>,
    /// Income or expense only.
    pub kind: Option<TransactionKind>,
    /// Exact category.
    pub category: Option<String>,
}

/// Transaction repository.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: Arc<DatabaseConnection>,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists a user's transactions, newest date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        user_id: UserId,
        filter: TransactionFilter,
    ) -> Result<Vec<transactions::Model>, TransactionError> {
        let mut query = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id.into_inner()));

        if let Some(start_date) = filter.start_date {
            query = query.filter(transactions::Column::Date.gte(start_date));
        }

        if let Some(end_date) = filter.end_date {
            query = query.filter(transactions::Column::Date.lte(end_date));
        }

        if let Some(kind) = filter.kind {
            query = query.filter(transactions::Column::Kind.eq(TransactionType::from(kind)));
        }

        if let Some(category) = filter.category {
            query = query.filter(transactions::Column::Category.eq(category));
        }

        let transactions = query
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(transactions)
    }

    /// Gets one of a user's transactions.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::NotFound` if no such transaction belongs to the user.
    pub async fn find(
        &self,
        user_id: UserId,
        id: TransactionId,
    ) -> Result<transactions::Model, TransactionError> {
        transactions::Entity::find_by_id(id.into_inner())
            .filter(transactions::Column::UserId.eq(user_id.into_inner()))
            .one(self.db.as_ref())
            .await?
            .ok_or(TransactionError::NotFound)
    }

    /// Records a new transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        user_id: UserId,
        input: TransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        let now = chrono::Utc::now().into();
        let transaction = transactions::ActiveModel {
            id: Set(TransactionId::new().into_inner()),
            user_id: Set(user_id.into_inner()),
            kind: Set(input.kind.into()),
            amount: Set(input.amount.get()),
            category: Set(input.category),
            description: Set(input.description),
            date: Set(input.date),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(transaction.insert(self.db.as_ref()).await?)
    }

    /// Overwrites every mutable field of a transaction.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::NotFound` if no such transaction belongs to the user.
    pub async fn update(
        &self,
        user_id: UserId,
        id: TransactionId,
        input: TransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        let changes = transactions::ActiveModel {
            kind: Set(input.kind.into()),
            amount: Set(input.amount.get()),
            category: Set(input.category),
            description: Set(input.description),
            date: Set(input.date),
            ..Default::default()
        };

        transactions::Entity::update_many()
            .set(changes)
            .filter(transactions::Column::Id.eq(id.into_inner()))
            .filter(transactions::Column::UserId.eq(user_id.into_inner()))
            .exec_with_returning(self.db.as_ref())
            .await?
            .into_iter()
            .next()
            .ok_or(TransactionError::NotFound)
    }

    /// Deletes a transaction.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::NotFound` if no such transaction belongs to the user.
    pub async fn delete(&self, user_id: UserId, id: TransactionId) -> Result<(), TransactionError> {
        let result = transactions::Entity::delete_many()
            .filter(transactions::Column::Id.eq(id.into_inner()))
            .filter(transactions::Column::UserId.eq(user_id.into_inner()))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(TransactionError::NotFound);
        }
        Ok(())
    }
}

impl From<TransactionError> for AppError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::NotFound => Self::NotFound(err.to_string()),
            TransactionError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use uuid::Uuid;

    fn transaction(user_id: Uuid) -> transactions::Model {
        let now = chrono::Utc::now().into();
        transactions::Model {
            id: Uuid::new_v4(),
            user_id,
            kind: TransactionType::Expense,
            amount: dec!(12.50),
            category: "food".to_string(),
            description: None,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    fn input() -> TransactionInput {
        TransactionInput {
            kind: TransactionKind::Income,
            amount: PositiveAmount::new(dec!(100)).unwrap(),
            category: "salary".to_string(),
            description: Some("March".to_string()),
            date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_find_other_users_transaction_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<transactions::Model>::new()])
            .into_connection();

        let result = TransactionRepository::new(Arc::new(db))
            .find(UserId::new(), TransactionId::new())
            .await;

        assert!(matches!(result, Err(TransactionError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<transactions::Model>::new()])
            .into_connection();

        let result = TransactionRepository::new(Arc::new(db))
            .update(UserId::new(), TransactionId::new(), input())
            .await;

        assert!(matches!(result, Err(TransactionError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_reports_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = TransactionRepository::new(Arc::new(db));

        assert!(repo.delete(UserId::new(), TransactionId::new()).await.is_ok());
        assert!(matches!(
            repo.delete(UserId::new(), TransactionId::new()).await,
            Err(TransactionError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_returns_rows() {
        let owner = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![transaction(owner), transaction(owner)]])
            .into_connection();

        let rows = TransactionRepository::new(Arc::new(db))
            .list(
                UserId::from_uuid(owner),
                TransactionFilter {
                    kind: Some(TransactionKind::Expense),
                    ..TransactionFilter::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|t| t.user_id == owner));
    }
}
