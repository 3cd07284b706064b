//! Local database configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// In-memory database path understood by libSQL.
pub const MEMORY_PATH: &str = ":memory:";

fn default_path() -> String {
    ".acre/acre.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database file, or `:memory:` for a throwaway database.
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
    pub fn is_memory(&self) -> bool {
        self.path == MEMORY_PATH
    }

    /// Directory that must exist before the file can be opened.
    ///
    /// `None` for in-memory databases and bare file names.
    pub fn parent_dir(&self) -> Option<PathBuf> {
        if self.is_memory() {
            return None;
        }
        PathBuf::from(&self.path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_is_project_local() {
        let config = DatabaseConfig::default();
        assert_eq!(config.path, ".acre/acre.db");
        assert!(!config.is_memory());
        assert_eq!(config.parent_dir(), Some(PathBuf::from(".acre")));
    }

    #[test]
    fn memory_has_no_parent() {
        let config = DatabaseConfig {
            path: MEMORY_PATH.into(),
        };
        assert!(config.is_memory());
        assert_eq!(config.parent_dir(), None);
    }

    #[test]
    fn bare_file_has_no_parent() {
        let config = DatabaseConfig {
            path: "acre.db".into(),
        };
        assert_eq!(config.parent_dir(), None);
    }
}
