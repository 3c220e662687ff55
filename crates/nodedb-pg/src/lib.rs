//! nodedb-pg - PostgreSQL connector and migration runner for nodedb
//!
//! This crate opens pooled connections from a [`DbConfig`], and applies,
//! reverts, or checks the versioned schema migrations of the `state` and
//! `pool` databases.

pub mod connection;
pub mod error;
pub mod migration;
pub mod plan;
pub mod records;
pub mod registry;

pub use connection::{open_connection, open_pool, ping, PoolDescriptor};
pub use error::{DbError, DbResult};
pub use migration::MigrationRunner;
pub use nodedb_core::config::{POOL_MIGRATION_SET, STATE_MIGRATION_SET};
pub use nodedb_core::{DbConfig, MigrationDirection};
pub use plan::{plan_migrations, MigrationInfo, PlannedMigration, MAX_PLAN_MIGRATIONS};
pub use records::MigrationRecord;
pub use registry::{MigrationProvider, MigrationRegistry};
pub use sqlx::PgPool;
