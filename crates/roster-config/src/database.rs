//! Database configuration.

use serde::{Deserialize, Serialize};

/// Default on-disk database path.
fn default_path() -> String {
    ".roster/roster.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the libSQL database file. `:memory:` is accepted for
    /// ephemeral use.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    /// Whether the database is purely in-memory.
    #[must_use]
    pub fn is_ephemeral(&self) -> bool {
        self.path == ":memory:"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = DatabaseConfig::default();
        assert_eq!(config.path, ".roster/roster.db");
        assert!(!config.is_ephemeral());
    }

    #[test]
    fn memory_path_is_ephemeral() {
        let config = DatabaseConfig {
            path: ":memory:".into(),
        };
        assert!(config.is_ephemeral());
    }
}
