//! Migration runner.
//!
//! [`MigrationRunner`] applies, reverts, plans, and checks a named migration
//! set against the database described by a [`DbConfig`]. Each call opens a
//! single, non-pooled connection; execution itself is delegated to sqlx's
//! [`Migrator`], which records progress in `_sqlx_migrations`.

use crate::connection::open_connection;
use crate::error::{DbError, DbResult};
use crate::plan::{plan_migrations, MigrationInfo, PlannedMigration, MAX_PLAN_MIGRATIONS};
use crate::records::{applied_versions, read_records, MigrationRecord};
use crate::registry::{MigrationProvider, MigrationRegistry};
use nodedb_core::{DbConfig, MigrationDirection};
use sqlx::migrate::Migrator;
use sqlx::postgres::PgConnection;
use sqlx::Connection;

/// Reverting "down to" this version reverts every applied migration.
const REVERT_ALL_TARGET: i64 = 0;

/// Runs named migration sets through an injected [`MigrationProvider`].
#[derive(Debug)]
pub struct MigrationRunner<P = MigrationRegistry> {
    provider: P,
}

impl MigrationRunner<MigrationRegistry> {
    /// Runner over the `state` and `pool` sets embedded in this crate.
    pub fn embedded() -> Self {
        Self::new(MigrationRegistry::embedded())
    }
}

impl<P: MigrationProvider> MigrationRunner<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn migrator(&self, set_name: &str) -> DbResult<&Migrator> {
        self.provider
            .migrator(set_name)
            .ok_or_else(|| DbError::MigrationSetNotFound(set_name.to_string()))
    }

    /// Apply every pending migration of `set_name`.
    pub async fn run_up(&self, config: &DbConfig, set_name: &str) -> DbResult<usize> {
        self.run(config, set_name, MigrationDirection::Up).await
    }

    /// Revert every applied reversible migration of `set_name`.
    pub async fn run_down(&self, config: &DbConfig, set_name: &str) -> DbResult<usize> {
        self.run(config, set_name, MigrationDirection::Down).await
    }

    /// Execute the plan for `direction` and return how many migrations ran.
    pub async fn run(
        &self,
        config: &DbConfig,
        set_name: &str,
        direction: MigrationDirection,
    ) -> DbResult<usize> {
        let migrator = self.migrator(set_name)?;
        let mut conn = open_connection(config).await?;

        let executed = match self
            .execute(&mut conn, migrator, set_name, direction)
            .await
        {
            Ok(n) => n,
            Err(e) => {
                close_quietly(conn).await;
                return Err(e);
            }
        };
        close_quietly(conn).await;

        log::info!("successfully ran {executed} migrations");
        Ok(executed)
    }

    async fn execute(
        &self,
        conn: &mut PgConnection,
        migrator: &Migrator,
        set_name: &str,
        direction: MigrationDirection,
    ) -> DbResult<usize> {
        let records = read_records(conn).await?;
        let plan = plan_for(migrator, &records, direction, usize::MAX)?;
        for step in &plan {
            log::debug!(
                "Planned to {} {set_name} migration v{} ({})",
                direction.verb(),
                step.version,
                step.description
            );
        }

        let result = match direction {
            MigrationDirection::Up => migrator.run(&mut *conn).await,
            MigrationDirection::Down => migrator.undo(&mut *conn, REVERT_ALL_TARGET).await,
        };
        result.map_err(|e| DbError::MigrationError(format!("{set_name} ({direction}): {e}")))?;
        Ok(plan.len())
    }

    /// Compute, without executing, what a run in `direction` would do.
    ///
    /// At most [`MAX_PLAN_MIGRATIONS`] entries are returned.
    pub async fn plan(
        &self,
        config: &DbConfig,
        set_name: &str,
        direction: MigrationDirection,
    ) -> DbResult<Vec<PlannedMigration>> {
        let migrator = self.migrator(set_name)?;
        let mut conn = open_connection(config).await?;
        let result = read_records(&mut conn)
            .await
            .and_then(|records| plan_for(migrator, &records, direction, MAX_PLAN_MIGRATIONS));
        close_quietly(conn).await;
        result
    }

    /// Fail unless the plan for `direction` is empty.
    ///
    /// Used at startup to refuse running against an out-of-date schema. The
    /// database is never modified.
    pub async fn check(
        &self,
        config: &DbConfig,
        set_name: &str,
        direction: MigrationDirection,
    ) -> DbResult<()> {
        let migrator = self.migrator(set_name)?;
        let mut conn = open_connection(config).await?;
        let records = read_records(&mut conn).await;
        close_quietly(conn).await;
        let records = records.map_err(|e| {
            log::error!("error getting migration records. Error: {e}");
            e
        })?;

        let plan = plan_for(migrator, &records, direction, MAX_PLAN_MIGRATIONS).map_err(|e| {
            log::error!("error planning migrations. Error: {e}");
            e
        })?;

        if !plan.is_empty() {
            log::error!(
                "error the component needs to run {} migrations before starting",
                plan.len()
            );
            return Err(DbError::PendingMigrations {
                pending: plan.len(),
                applied: records.len(),
            });
        }
        Ok(())
    }

    /// Applied migration records for the database of `set_name`.
    pub async fn records(&self, config: &DbConfig, set_name: &str) -> DbResult<Vec<MigrationRecord>> {
        self.migrator(set_name)?;
        let mut conn = open_connection(config).await?;
        let result = read_records(&mut conn).await;
        close_quietly(conn).await;
        result
    }
}

fn plan_for(
    migrator: &Migrator,
    records: &[MigrationRecord],
    direction: MigrationDirection,
    limit: usize,
) -> DbResult<Vec<PlannedMigration>> {
    let available: Vec<MigrationInfo> = migrator.iter().map(MigrationInfo::from).collect();
    let applied = applied_versions(records)?;
    plan_migrations(&available, &applied, direction, limit)
}

async fn close_quietly(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        log::debug!("Failed to close migration connection cleanly: {e}");
    }
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
