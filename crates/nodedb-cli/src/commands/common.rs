//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use nodedb_core::{DbConfig, NodeConfig};
use nodedb_pg::{DbError, MigrationRegistry, MigrationRunner};
use std::path::Path;

use crate::cli::{GlobalArgs, SetArgs};

/// Install the process logger. `RUST_LOG` wins over `--verbose`.
pub(crate) fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();
}

/// Load nodedb.yml from the path given on the command line.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<NodeConfig> {
    let path = Path::new(&global.config);
    let config = if path.is_dir() {
        NodeConfig::load_from_dir(path)
    } else {
        NodeConfig::load(path)
    };
    config.with_context(|| format!("Failed to load config from {}", path.display()))
}

/// Connection settings of the database behind `set_name`.
pub(crate) fn database_for<'a>(config: &'a NodeConfig, set_name: &str) -> Result<&'a DbConfig> {
    config
        .database(set_name)
        .ok_or_else(|| DbError::MigrationSetNotFound(set_name.to_string()).into())
}

/// Runner over the embedded sets, with `--migrations-dir` swapped in.
pub(crate) async fn build_runner(target: &SetArgs) -> Result<MigrationRunner> {
    let mut registry = MigrationRegistry::embedded();
    if let Some(dir) = &target.migrations_dir {
        registry
            .register_dir(target.set.as_str(), Path::new(dir))
            .await?;
        log::info!("Using migrations for '{}' from {dir}", target.set);
    }
    Ok(MigrationRunner::new(registry))
}
