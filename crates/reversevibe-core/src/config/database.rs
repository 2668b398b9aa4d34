//! Document store configuration.

use serde::{Deserialize, Serialize};

/// Document store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string reported by diagnostics. The bundled store is in-process.
    #[serde(default = "default_uri")]
    pub uri: String,
    /// Seed demo data at startup regardless of environment.
    #[serde(default)]
    pub seed: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            seed: false,
        }
    }
}

fn default_uri() -> String {
    "mongodb://localhost:27017/reversevibe".to_string()
}
