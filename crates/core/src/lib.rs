//! Core business logic for Dompet.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain rules and classifications live here.
//!
//! # Modules
//!
//! - `ledger` - Debt payment and savings accumulation rules
//! - `auth` - Password hashing and registration checks
//! - `transaction` - Income/expense classification
//! - `budget` - Budget periods

pub mod auth;
pub mod budget;
pub mod ledger;
pub mod transaction;
