use serde::{Deserialize, Serialize};

/// Database configuration for the monitored-domain store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to SQLite database file (default: "./certwatch.db")
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Maximum pooled connections (default: 5)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        format!("sqlite:{}", self.path)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_db_path() -> String {
    "./certwatch.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}
