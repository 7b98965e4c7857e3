//! Budget repository for per-category spending limits.

use std::sync::Arc;

use dompet_core::budget::BudgetPeriod;
use dompet_shared::AppError;
use dompet_shared::types::{BudgetId, PositiveAmount, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::budgets;

/// Error types for budget operations.
#[derive(Debug, thiserror::Error)]
pub enum BudgetError {
    /// Budget not found for this owner.
    #[error("Budget not found")]
    NotFound,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating or fully replacing a budget.
#[derive(Debug, Clone)]
pub struct BudgetInput {
    /// Category the limit applies to.
    pub category: String,
    /// Limit per period.
    pub amount: PositiveAmount,
    /// Reset period.
    pub period: BudgetPeriod,
}

/// Budget repository.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: Arc<DatabaseConnection>,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists a user's budgets, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<budgets::Model>, BudgetError> {
        Ok(budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id.into_inner()))
            .order_by_desc(budgets::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?)
    }

    /// Creates a budget.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        user_id: UserId,
        input: BudgetInput,
    ) -> Result<budgets::Model, BudgetError> {
        let now = chrono::Utc::now().into();
        let budget = budgets::ActiveModel {
            id: Set(BudgetId::new().into_inner()),
            user_id: Set(user_id.into_inner()),
            category: Set(input.category),
            amount: Set(input.amount.get()),
            period: Set(input.period.into()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(budget.insert(self.db.as_ref()).await?)
    }

    /// Overwrites category, amount and period.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` if no such budget belongs to the user.
    pub async fn update(
        &self,
        user_id: UserId,
        id: BudgetId,
        input: BudgetInput,
    ) -> Result<budgets::Model, BudgetError> {
        let changes = budgets::ActiveModel {
            category: Set(input.category),
            amount: Set(input.amount.get()),
            period: Set(input.period.into()),
            ..Default::default()
        };

        budgets::Entity::update_many()
            .set(changes)
            .filter(budgets::Column::Id.eq(id.into_inner()))
            .filter(budgets::Column::UserId.eq(user_id.into_inner()))
            .exec_with_returning(self.db.as_ref())
            .await?
            .into_iter()
            .next()
            .ok_or(BudgetError::NotFound)
    }

    /// Deletes a budget.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` if no such budget belongs to the user.
    pub async fn delete(&self, user_id: UserId, id: BudgetId) -> Result<(), BudgetError> {
        let result = budgets::Entity::delete_many()
            .filter(budgets::Column::Id.eq(id.into_inner()))
            .filter(budgets::Column::UserId.eq(user_id.into_inner()))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(BudgetError::NotFound);
        }
        Ok(())
    }
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        match err {
            BudgetError::NotFound => Self::NotFound(err.to_string()),
            BudgetError::Database(e) => Self::Database(e.to_string()),
        }
    }
}
