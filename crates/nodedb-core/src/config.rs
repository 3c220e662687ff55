//! Configuration types and parsing for nodedb.yml

use crate::error::{CoreError, CoreResult};
use crate::serde_helpers::{default_max_conns, default_port, port_from_str_or_int};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use url::Url;

/// Symbolic name of the state database and its migration set.
pub const STATE_MIGRATION_SET: &str = "state";

/// Symbolic name of the pool database and its migration set.
pub const POOL_MIGRATION_SET: &str = "pool";

/// Query parameter carrying the pool size in a pooled connection string.
pub const POOL_MAX_CONNS_PARAM: &str = "pool_max_conns";

/// Connection settings for a single PostgreSQL database
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DbConfig {
    /// Database server host name or address
    pub host: String,

    /// Database server port.
    ///
    /// Kept as text so that a malformed value is reported when the
    /// connection string is built rather than when the file is read.
    #[serde(default = "default_port", deserialize_with = "port_from_str_or_int")]
    pub port: String,

    /// Role used to authenticate
    pub user: String,

    /// Password for `user` (may be empty for trust/peer authentication)
    #[serde(default)]
    pub password: String,

    /// Database name
    pub name: String,

    /// Maximum number of pooled connections
    #[serde(default = "default_max_conns")]
    pub max_conns: u32,

    /// Forward every statement executed through the pool to the logger
    #[serde(default)]
    pub enable_log: bool,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("name", &self.name)
            .field("max_conns", &self.max_conns)
            .field("enable_log", &self.enable_log)
            .finish()
    }
}

impl DbConfig {
    /// Check that every field needed for a connection string is present.
    pub fn validate(&self) -> CoreResult<()> {
        for (field, value) in [
            ("host", &self.host),
            ("port", &self.port),
            ("user", &self.user),
            ("name", &self.name),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::invalid(format!(
                    "database field '{field}' is required"
                )));
            }
        }

        if matches!(self.name.as_str(), "." | "..") {
            return Err(CoreError::invalid(format!(
                "invalid database name '{}'",
                self.name
            )));
        }

        match self.port.parse::<u16>() {
            Ok(0) | Err(_) => Err(CoreError::invalid(format!(
                "invalid port '{}': expected a number between 1 and 65535",
                self.port
            ))),
            Ok(_) => Ok(()),
        }
    }

    /// Connection string for a single, non-pooled connection:
    /// `postgres://<user>:<password>@<host>:<port>/<name>`.
    pub fn connection_url(&self) -> CoreResult<String> {
        Ok(self.base_url()?.into())
    }

    /// Connection string for a pool:
    /// `postgres://<user>:<password>@<host>:<port>/<name>?pool_max_conns=<n>`.
    pub fn pool_url(&self) -> CoreResult<String> {
        if self.max_conns == 0 {
            return Err(CoreError::invalid(
                "max_conns must be at least 1 for a connection pool",
            ));
        }
        let mut url = self.base_url()?;
        url.query_pairs_mut()
            .append_pair(POOL_MAX_CONNS_PARAM, &self.max_conns.to_string());
        Ok(url.into())
    }

    /// Connection string with the password masked, safe for log output.
    pub fn redacted_url(&self) -> String {
        format!(
            "postgres://{}:***@{}:{}/{}",
            self.user, self.host, self.port, self.name
        )
    }

    fn base_url(&self) -> CoreResult<Url> {
        self.validate()?;

        // Setters percent-encode the name and reject reserved host characters.
        let mut url = Url::parse("postgres://localhost")
            .map_err(|e| CoreError::invalid(format!("cannot build connection string: {e}")))?;
        let bracketed = self.host.starts_with('[') && self.host.ends_with(']');
        if !bracketed && self.host.contains(':') {
            return Err(CoreError::invalid(format!(
                "invalid host '{}': put the port in the 'port' field",
                self.host
            )));
        }
        url.set_host(Some(&self.host))
            .map_err(|e| CoreError::invalid(format!("invalid host '{}': {e}", self.host)))?;
        let port = self
            .port
            .parse::<u16>()
            .map_err(|e| CoreError::invalid(format!("invalid port '{}': {e}", self.port)))?;
        url.set_port(Some(port))
            .map_err(|()| CoreError::invalid("connection string cannot carry a port"))?;
        url.path_segments_mut()
            .map_err(|()| CoreError::invalid("connection string cannot carry a database name"))?
            .pop_if_empty()
            .push(&self.name);

        url.set_username(&self.user)
            .map_err(|()| CoreError::invalid("connection string cannot carry a user name"))?;
        if !self.password.is_empty() {
            url.set_password(Some(&self.password))
                .map_err(|()| CoreError::invalid("connection string cannot carry a password"))?;
        }
        Ok(url)
    }
}

/// File-level configuration from nodedb.yml
///
/// Holds one [`DbConfig`] per logical database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeConfig {
    /// State database
    pub state_db: DbConfig,

    /// Pool database
    pub pool_db: DbConfig,
}

impl NodeConfig {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: NodeConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a directory
    /// Looks for nodedb.yml or nodedb.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("nodedb.yml");
        let yaml_path = dir.join("nodedb.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Database settings for a migration set name (`state` or `pool`).
    pub fn database(&self, set_name: &str) -> Option<&DbConfig> {
        match set_name {
            STATE_MIGRATION_SET => Some(&self.state_db),
            POOL_MIGRATION_SET => Some(&self.pool_db),
            _ => None,
        }
    }

    fn validate(&self) -> CoreResult<()> {
        for (section, db) in [("state_db", &self.state_db), ("pool_db", &self.pool_db)] {
            db.validate().map_err(|e| match e {
                CoreError::ConfigInvalid { message } => {
                    CoreError::invalid(format!("{section}: {message}"))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
