//! Share link configuration.

use serde::{Deserialize, Serialize};

/// Settings for generated share links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Public base URL that share links are built against, without a
    /// trailing query string (e.g. `https://wish.example.com/list`).
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}
