//! Named migration sets.
//!
//! The runner never reaches for a global table of migrations; it is handed a
//! [`MigrationProvider`] instead. [`MigrationRegistry`] is the provider used
//! in production (scripts embedded at compile time with `sqlx::migrate!`)
//! and in tests (scripts loaded from a fixture directory).

use crate::error::{DbError, DbResult};
use nodedb_core::config::{POOL_MIGRATION_SET, STATE_MIGRATION_SET};
use sqlx::migrate::Migrator;
use std::collections::BTreeMap;
use std::path::Path;

/// Source of ordered migration scripts, keyed by set name.
pub trait MigrationProvider {
    /// The migrator registered under `set_name`, if any.
    fn migrator(&self, set_name: &str) -> Option<&Migrator>;

    /// Names of every registered set, sorted.
    fn set_names(&self) -> Vec<&str>;
}

/// Explicit map from set name to migrator.
#[derive(Debug, Default)]
pub struct MigrationRegistry {
    sets: BTreeMap<String, Migrator>,
}

impl MigrationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the `state` and `pool` sets embedded in this crate.
    pub fn embedded() -> Self {
        let mut registry = Self::new();
        registry.register(STATE_MIGRATION_SET, sqlx::migrate!("./migrations/state"));
        registry.register(POOL_MIGRATION_SET, sqlx::migrate!("./migrations/pool"));
        registry
    }

    /// Register `migrator` under `name`, returning the set it replaced.
    pub fn register(&mut self, name: impl Into<String>, migrator: Migrator) -> Option<Migrator> {
        self.sets.insert(name.into(), migrator)
    }

    /// Load the scripts in `dir` and register them under `name`.
    ///
    /// Files follow the sqlx naming scheme,
    /// `<version>_<description>.sql` or `<version>_<description>.{up,down}.sql`.
    pub async fn register_dir(&mut self, name: impl Into<String>, dir: &Path) -> DbResult<()> {
        let name = name.into();
        let migrator = Migrator::new(dir).await.map_err(|e| DbError::SourceError {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;
        log::debug!(
            "Loaded {} migration scripts for set '{name}' from {}",
            migrator.iter().count(),
            dir.display()
        );
        self.register(name, migrator);
        Ok(())
    }

    /// Number of registered sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// True when no set is registered.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl MigrationProvider for MigrationRegistry {
    fn migrator(&self, set_name: &str) -> Option<&Migrator> {
        self.sets.get(set_name)
    }

    fn set_names(&self) -> Vec<&str> {
        self.sets.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
