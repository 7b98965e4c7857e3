//! Repository abstractions for data access.
//!
//! Every query is scoped by the owning user. A record that exists but
//! belongs to someone else is reported the same way as a missing one.

pub mod budget;
pub mod debt;
pub mod savings;
pub mod transaction;
pub mod user;

pub use budget::{BudgetError, BudgetInput, BudgetRepository};
pub use debt::{CreateDebtInput, DebtError, DebtRepository, UpdateDebtInput};
pub use savings::{SavingsError, SavingsGoalInput, SavingsRepository};
pub use transaction::{TransactionError, TransactionFilter, TransactionInput, TransactionRepository};
pub use user::{CreateUserInput, UserError, UserRepository};
