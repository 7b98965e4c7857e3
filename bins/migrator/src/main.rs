//! Database migration runner for Dompet.
//!
//! Reads `DATABASE_URL` (from the environment or `.env`).
//!
//! Usage:
//!   migrator up      - Create the enums, tables, indexes and triggers
//!   migrator down    - Drop everything the last migration created
//!   migrator status  - Show which migrations have been applied
//!   migrator fresh   - Drop all tables and re-run migrations

use dompet_db::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The CLI installs its own tracing subscriber.
    cli::run_cli(Migrator).await;
}
