//! PostgreSQL connection setup.
//!
//! Connection strings are built from [`DbConfig`] and parsed back into a
//! [`PoolDescriptor`] before anything touches the network, so configuration
//! mistakes surface as [`DbError::ConfigError`] and unreachable servers as
//! [`DbError::ConnectionError`].

use crate::error::{DbError, DbResult};
use log::LevelFilter;
use nodedb_core::config::POOL_MAX_CONNS_PARAM;
use nodedb_core::DbConfig;
use sqlx::postgres::{PgConnectOptions, PgConnection, PgPool, PgPoolOptions};
use sqlx::{ConnectOptions, Connection};
use std::time::Duration;
use url::Url;

/// Statements slower than this are logged at warn level when statement
/// logging is enabled.
const SLOW_STATEMENT_THRESHOLD: Duration = Duration::from_secs(1);

/// A parsed connection string: driver options plus the pool size, if the
/// string carried one.
#[derive(Debug, Clone)]
pub struct PoolDescriptor {
    /// Options handed to the driver
    pub connect_options: PgConnectOptions,
    /// Value of `pool_max_conns`, when present
    pub max_conns: Option<u32>,
}

impl PoolDescriptor {
    /// Parse a `postgres://` connection string.
    ///
    /// `pool_max_conns` is consumed here; every other query parameter is
    /// passed through to the driver.
    pub fn parse(conn_str: &str) -> DbResult<Self> {
        let mut url = Url::parse(conn_str)
            .map_err(|e| DbError::ConfigError(format!("cannot parse connection string: {e}")))?;

        if !matches!(url.scheme(), "postgres" | "postgresql") {
            return Err(DbError::ConfigError(format!(
                "unsupported connection string scheme '{}'",
                url.scheme()
            )));
        }

        let mut max_conns = None;
        let mut passthrough = Vec::new();
        for (key, value) in url.query_pairs() {
            if key == POOL_MAX_CONNS_PARAM {
                let n: u32 = value.parse().map_err(|_| {
                    DbError::ConfigError(format!("invalid {POOL_MAX_CONNS_PARAM} '{value}'"))
                })?;
                if n == 0 {
                    return Err(DbError::ConfigError(format!(
                        "{POOL_MAX_CONNS_PARAM} too small: {n}"
                    )));
                }
                max_conns = Some(n);
            } else {
                passthrough.push((key.into_owned(), value.into_owned()));
            }
        }

        url.set_query(None);
        if !passthrough.is_empty() {
            url.query_pairs_mut().extend_pairs(passthrough);
        }

        let connect_options = PgConnectOptions::from_url(&url)
            .map_err(|e| DbError::ConfigError(format!("invalid connection string: {e}")))?;

        Ok(Self {
            connect_options,
            max_conns,
        })
    }
}

/// Attach or detach the pass-through statement logger.
fn with_statement_logging(options: PgConnectOptions, enable_log: bool) -> PgConnectOptions {
    if enable_log {
        options
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, SLOW_STATEMENT_THRESHOLD)
    } else {
        options.disable_statement_logging()
    }
}

fn parse_descriptor(config: &DbConfig, pooled: bool) -> DbResult<PoolDescriptor> {
    let conn_str = if pooled {
        config.pool_url()
    } else {
        config.connection_url()
    };
    conn_str
        .map_err(DbError::from)
        .and_then(|s| PoolDescriptor::parse(&s))
        .map_err(|e| {
            log::error!("Unable to parse DB config: {e}");
            e
        })
}

/// Open a connection pool for `config`.
pub async fn open_pool(config: &DbConfig) -> DbResult<PgPool> {
    let descriptor = parse_descriptor(config, true)?;
    let max_conns = descriptor.max_conns.unwrap_or(config.max_conns);
    let options = with_statement_logging(descriptor.connect_options, config.enable_log);

    let pool = PgPoolOptions::new()
        .max_connections(max_conns)
        .connect_with(options)
        .await
        .map_err(|e| {
            log::error!("Unable to connect to database: {e}");
            DbError::ConnectionError(format!("{}: {e}", config.redacted_url()))
        })?;

    log::debug!(
        "Opened pool to {} (max {max_conns} connections)",
        config.redacted_url()
    );
    Ok(pool)
}

/// Open a single, non-pooled connection for `config`.
///
/// Used for migrations, which run once at startup on one connection.
pub async fn open_connection(config: &DbConfig) -> DbResult<PgConnection> {
    let descriptor = parse_descriptor(config, false)?;
    let options = with_statement_logging(descriptor.connect_options, config.enable_log);

    PgConnection::connect_with(&options).await.map_err(|e| {
        log::error!("Unable to connect to database: {e}");
        DbError::ConnectionError(format!("{}: {e}", config.redacted_url()))
    })
}

/// Round-trip a trivial query through the pool.
pub async fn ping(pool: &PgPool) -> DbResult<()> {
    let one: i32 = sqlx::query_scalar("SELECT 1").fetch_one(pool).await?;
    if one != 1 {
        return Err(DbError::ConnectionError(format!(
            "unexpected ping result: {one}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "connection_test.rs"]
mod tests;
