//! Migration direction

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which way a migration set is moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MigrationDirection {
    /// Apply pending migrations, oldest first
    #[default]
    Up,
    /// Revert applied migrations, newest first
    Down,
}

impl MigrationDirection {
    /// Verb used in log lines and CLI output.
    pub fn verb(self) -> &'static str {
        match self {
            MigrationDirection::Up => "apply",
            MigrationDirection::Down => "revert",
        }
    }
}

impl fmt::Display for MigrationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationDirection::Up => write!(f, "up"),
            MigrationDirection::Down => write!(f, "down"),
        }
    }
}
