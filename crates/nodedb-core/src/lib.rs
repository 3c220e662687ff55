//! nodedb-core - Core library for nodedb
//!
//! This crate provides the configuration types shared by the connector and
//! the migration runner: per-database connection settings, the file-level
//! node configuration, connection-string building, and the migration
//! direction.

pub mod config;
pub mod direction;
pub mod error;
pub(crate) mod serde_helpers;

pub use config::{DbConfig, NodeConfig};
pub use direction::MigrationDirection;
pub use error::{CoreError, CoreResult};
