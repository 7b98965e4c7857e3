//! Postgres enum types and their mapping to core domain enums.

use dompet_core::budget::BudgetPeriod as CoreBudgetPeriod;
use dompet_core::ledger::{DebtKind as CoreDebtKind, DebtStatus as CoreDebtStatus};
use dompet_core::transaction::TransactionKind;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_type")]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    #[sea_orm(string_value = "income")]
    Income,
    #[sea_orm(string_value = "expense")]
    Expense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "budget_period")]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    #[sea_orm(string_value = "weekly")]
    Weekly,
    #[sea_orm(string_value = "monthly")]
    Monthly,
    #[sea_orm(string_value = "yearly")]
    Yearly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "debt_kind")]
#[serde(rename_all = "lowercase")]
pub enum DebtKind {
    #[sea_orm(string_value = "debt")]
    Debt,
    #[sea_orm(string_value = "receivable")]
    Receivable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "debt_status")]
#[serde(rename_all = "lowercase")]
pub enum DebtStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "paid")]
    Paid,
}

impl From<TransactionKind> for TransactionType {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => Self::Income,
            TransactionKind::Expense => Self::Expense,
        }
    }
}

impl From<CoreBudgetPeriod> for BudgetPeriod {
    fn from(period: CoreBudgetPeriod) -> Self {
        match period {
            CoreBudgetPeriod::Weekly => Self::Weekly,
            CoreBudgetPeriod::Monthly => Self::Monthly,
            CoreBudgetPeriod::Yearly => Self::Yearly,
        }
    }
}

impl From<CoreDebtKind> for DebtKind {
    fn from(kind: CoreDebtKind) -> Self {
        match kind {
            CoreDebtKind::Debt => Self::Debt,
            CoreDebtKind::Receivable => Self::Receivable,
        }
    }
}

impl From<CoreDebtStatus> for DebtStatus {
    fn from(status: CoreDebtStatus) -> Self {
        match status {
            CoreDebtStatus::Active => Self::Active,
            CoreDebtStatus::Paid => Self::Paid,
        }
    }
}

impl From<DebtStatus> for CoreDebtStatus {
    fn from(status: DebtStatus) -> Self {
        match status {
            DebtStatus::Active => Self::Active,
            DebtStatus::Paid => Self::Paid,
        }
    }
}
