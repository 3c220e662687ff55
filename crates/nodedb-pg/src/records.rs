//! Read-only access to the migration bookkeeping table.
//!
//! The table is created and written by sqlx's migrator. Nothing here
//! creates it: when it does not exist yet, no migration has been applied.

use crate::error::{DbError, DbResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::postgres::PgConnection;
use std::collections::BTreeSet;

/// Bookkeeping table maintained by sqlx.
pub const MIGRATIONS_TABLE: &str = "_sqlx_migrations";

/// One row of the bookkeeping table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct MigrationRecord {
    pub version: i64,
    pub description: String,
    /// False when the migration failed part-way and left the schema dirty
    pub success: bool,
    pub installed_on: DateTime<Utc>,
    /// Execution time in nanoseconds
    pub execution_time: i64,
}

/// Read every record, ordered by version.
pub async fn read_records(conn: &mut PgConnection) -> DbResult<Vec<MigrationRecord>> {
    let exists: bool = sqlx::query_scalar("SELECT to_regclass($1) IS NOT NULL")
        .bind(MIGRATIONS_TABLE)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| DbError::RecordsError(e.to_string()))?;
    if !exists {
        return Ok(Vec::new());
    }

    let sql = format!(
        "SELECT version, description, success, installed_on, execution_time \
         FROM {MIGRATIONS_TABLE} ORDER BY version"
    );
    sqlx::query_as::<_, MigrationRecord>(&sql)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| DbError::RecordsError(e.to_string()))
}

/// Versions of successfully applied migrations.
///
/// A failed record means a previous run stopped half-way; planning on top
/// of it would be meaningless, so it is reported instead.
pub fn applied_versions(records: &[MigrationRecord]) -> DbResult<BTreeSet<i64>> {
    if let Some(dirty) = records.iter().find(|r| !r.success) {
        return Err(DbError::PlanError(format!(
            "migration {} ({}) is partially applied; fix the schema manually",
            dirty.version, dirty.description
        )));
    }
    Ok(records.iter().map(|r| r.version).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(version: i64, success: bool) -> MigrationRecord {
        MigrationRecord {
            version,
            description: format!("v{version}"),
            success,
            installed_on: Utc::now(),
            execution_time: 1_000,
        }
    }

    #[test]
    fn test_applied_versions() {
        let versions = applied_versions(&[record(1, true), record(2, true)]).unwrap();
        assert_eq!(versions.into_iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_dirty_record_is_reported() {
        let err = applied_versions(&[record(1, true), record(2, false)]).unwrap_err();
        assert!(err.to_string().contains("partially applied"));
    }
}
