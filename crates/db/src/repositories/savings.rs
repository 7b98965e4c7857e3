//! Savings goal repository.

use std::sync::Arc;

use chrono::NaiveDate;
use dompet_core::ledger::{LedgerError, LedgerService};
use dompet_shared::AppError;
use dompet_shared::types::{
    NonNegativeAmount, PositiveAmount, SavingsGoalId, UserId, money::MAX_AMOUNT,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, sea_query::Expr,
};
use tracing::info;

use crate::entities::savings_goals;

/// Error types for savings operations.
#[derive(Debug, thiserror::Error)]
pub enum SavingsError {
    /// Savings goal not found for this owner.
    #[error("Savings goal not found")]
    NotFound,

    /// A ledger rule rejected the mutation.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating or fully replacing a savings goal.
#[derive(Debug, Clone)]
pub struct SavingsGoalInput {
    /// Goal name.
    pub name: String,
    /// Target to save toward.
    pub target_amount: PositiveAmount,
    /// Saved so far.
    pub current_amount: NonNegativeAmount,
    /// Optional deadline.
    pub deadline: Option<NaiveDate>,
}

/// Savings goal repository.
#[derive(Debug, Clone)]
pub struct SavingsRepository {
    db: Arc<DatabaseConnection>,
}

impl SavingsRepository {
    /// Creates a new savings repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists a user's savings goals, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<savings_goals::Model>, SavingsError> {
        Ok(savings_goals::Entity::find()
            .filter(savings_goals::Column::UserId.eq(user_id.into_inner()))
            .order_by_desc(savings_goals::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?)
    }

    /// Creates a savings goal.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        user_id: UserId,
        input: SavingsGoalInput,
    ) -> Result<savings_goals::Model, SavingsError> {
        let now = chrono::Utc::now().into();
        let goal = savings_goals::ActiveModel {
            id: Set(SavingsGoalId::new().into_inner()),
            user_id: Set(user_id.into_inner()),
            name: Set(input.name),
            target_amount: Set(input.target_amount.get()),
            current_amount: Set(input.current_amount.get()),
            deadline: Set(input.deadline),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(goal.insert(self.db.as_ref()).await?)
    }

    /// Overwrites every mutable field.
    ///
    /// # Errors
    ///
    /// Returns `SavingsError::NotFound` if no such goal belongs to the user.
    pub async fn update(
        &self,
        user_id: UserId,
        id: SavingsGoalId,
        input: SavingsGoalInput,
    ) -> Result<savings_goals::Model, SavingsError> {
        let changes = savings_goals::ActiveModel {
            name: Set(input.name),
            target_amount: Set(input.target_amount.get()),
            current_amount: Set(input.current_amount.get()),
            deadline: Set(input.deadline),
            ..Default::default()
        };

        savings_goals::Entity::update_many()
            .set(changes)
            .filter(savings_goals::Column::Id.eq(id.into_inner()))
            .filter(savings_goals::Column::UserId.eq(user_id.into_inner()))
            .exec_with_returning(self.db.as_ref())
            .await?
            .into_iter()
            .next()
            .ok_or(SavingsError::NotFound)
    }

    /// Adds to the saved amount and returns the updated goal.
    ///
    /// Runs as one `UPDATE ... SET current_amount = current_amount + $1`
    /// guarded against leaving the storable range.
    ///
    /// # Errors
    ///
    /// Returns `SavingsError::NotFound` if no such goal belongs to the user.
    /// Returns `SavingsError::Ledger` if the total would overflow.
    pub async fn add_amount(
        &self,
        user_id: UserId,
        id: SavingsGoalId,
        amount: PositiveAmount,
    ) -> Result<savings_goals::Model, SavingsError> {
        let updated = savings_goals::Entity::update_many()
            .col_expr(
                savings_goals::Column::CurrentAmount,
                Expr::col(savings_goals::Column::CurrentAmount).add(amount.get()),
            )
            .filter(savings_goals::Column::Id.eq(id.into_inner()))
            .filter(savings_goals::Column::UserId.eq(user_id.into_inner()))
            .filter(savings_goals::Column::CurrentAmount.lte(MAX_AMOUNT - amount.get()))
            .exec_with_returning(self.db.as_ref())
            .await?;

        if let Some(goal) = updated.into_iter().next() {
            info!(
                savings_goal_id = %goal.id,
                added = %amount,
                current = %goal.current_amount,
                "Savings amount added"
            );
            return Ok(goal);
        }

        // Nothing matched: either the goal is missing or the guard tripped.
        let goal = savings_goals::Entity::find_by_id(id.into_inner())
            .filter(savings_goals::Column::UserId.eq(user_id.into_inner()))
            .one(self.db.as_ref())
            .await?
            .ok_or(SavingsError::NotFound)?;

        let current = NonNegativeAmount::new(goal.current_amount).map_err(LedgerError::from)?;
        LedgerService::add_to_savings(current, amount)?;

        // The guard tripped but the balance now fits: it changed in between.
        Err(SavingsError::Database(DbErr::RecordNotUpdated))
    }

    /// Deletes a savings goal.
    ///
    /// # Errors
    ///
    /// Returns `SavingsError::NotFound` if no such goal belongs to the user.
    pub async fn delete(&self, user_id: UserId, id: SavingsGoalId) -> Result<(), SavingsError> {
        let result = savings_goals::Entity::delete_many()
            .filter(savings_goals::Column::Id.eq(id.into_inner()))
            .filter(savings_goals::Column::UserId.eq(user_id.into_inner()))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(SavingsError::NotFound);
        }
        Ok(())
    }
}

impl From<SavingsError> for AppError {
    fn from(err: SavingsError) -> Self {
        match err {
            SavingsError::NotFound => Self::NotFound(err.to_string()),
            SavingsError::Ledger(e) => e.into(),
            SavingsError::Database(e) => Self::Database(e.to_string()),
        }
    }
}
