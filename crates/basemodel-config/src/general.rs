//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_log_level() -> String {
    "warn".to_string()
}

const fn default_pretty() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Tracing filter used when `BASEMODEL_LOG` is unset and no CLI flag
    /// overrides it (e.g. "warn", "basemodel_core=trace").
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Pretty-print JSON output.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            pretty: default_pretty(),
        }
    }
}
