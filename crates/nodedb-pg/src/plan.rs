//! Dry-run planning of migrations.
//!
//! A plan is the ordered list of scripts a run would execute for a
//! direction. Planning is a pure function of the scripts in a set and the
//! versions recorded as applied, so it can be computed without touching the
//! schema.

use crate::error::{DbError, DbResult};
use nodedb_core::MigrationDirection;
use serde::Serialize;
use sqlx::migrate::Migration;
use std::collections::BTreeSet;

/// Upper bound on the length of a plan returned by checks.
pub const MAX_PLAN_MIGRATIONS: usize = 1000;

/// The parts of a migration script that planning looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationInfo {
    pub version: i64,
    pub description: String,
    /// True for the `.down.sql` half of a reversible migration
    pub reversible_down: bool,
}

impl From<&Migration> for MigrationInfo {
    fn from(migration: &Migration) -> Self {
        Self {
            version: migration.version,
            description: migration.description.to_string(),
            reversible_down: migration.migration_type.is_down_migration(),
        }
    }
}

/// One step of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedMigration {
    pub version: i64,
    pub description: String,
}

impl From<&MigrationInfo> for PlannedMigration {
    fn from(info: &MigrationInfo) -> Self {
        Self {
            version: info.version,
            description: info.description.clone(),
        }
    }
}

/// Compute which scripts a run in `direction` would execute, at most `limit`.
///
/// Up: every up/simple script whose version is not applied, oldest first.
/// Down: every reversible down script whose version is applied, newest first.
/// Simple scripts have no down half and are never planned for down.
///
/// Fails when the database records a version the set does not know about.
pub fn plan_migrations(
    available: &[MigrationInfo],
    applied: &BTreeSet<i64>,
    direction: MigrationDirection,
    limit: usize,
) -> DbResult<Vec<PlannedMigration>> {
    let known: BTreeSet<i64> = available.iter().map(|m| m.version).collect();
    if let Some(unknown) = applied.iter().find(|v| !known.contains(v)) {
        return Err(DbError::PlanError(format!(
            "migration {unknown} is recorded as applied but is not part of the migration set"
        )));
    }

    let mut candidates: Vec<&MigrationInfo> = match direction {
        MigrationDirection::Up => available
            .iter()
            .filter(|m| !m.reversible_down && !applied.contains(&m.version))
            .collect(),
        MigrationDirection::Down => available
            .iter()
            .filter(|m| m.reversible_down && applied.contains(&m.version))
            .collect(),
    };

    candidates.sort_by_key(|m| m.version);
    if direction == MigrationDirection::Down {
        candidates.reverse();
    }

    Ok(candidates
        .into_iter()
        .take(limit)
        .map(PlannedMigration::from)
        .collect())
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
