//! Shared serde helper functions for configuration fields.

use serde::{Deserialize, Deserializer};

/// Default PostgreSQL port.
pub fn default_port() -> String {
    "5432".to_string()
}

/// Default upper bound on pooled connections.
pub fn default_max_conns() -> u32 {
    10
}

/// Accept a port written either as a YAML integer or as a string.
///
/// The value is kept as text; it is validated when the connection string
/// is built so that a malformed port surfaces as a config error.
pub fn port_from_str_or_int<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u64),
        Text(String),
    }

    Ok(match Port::deserialize(deserializer)? {
        Port::Number(n) => n.to_string(),
        Port::Text(s) => s,
    })
}
