//! Fetch settings loaded from an optional YAML file.
//!
//! ```yaml
//! user_agent: "Mozilla/5.0 ..."
//! timeout_secs: 15
//! max_retries: 3
//! base_delay_ms: 500
//! max_delay_ms: 10000
//! ```
//!
//! Every key is optional; missing keys keep their defaults.

use serde::{Deserialize, Serialize};
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Browser-like agent string; several sources refuse obvious bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Retries after the first attempt.
    pub max_retries: usize,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 15,
            max_retries: 3,
            base_delay_ms: 500,
            max_delay_ms: 10_000,
        }
    }
}

impl FetchConfig {
    /// Parse configuration from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Load configuration from `path`, or defaults when no path is given.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&str>) -> Result<Self, Box<dyn Error>> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let yaml = fs::read_to_string(path).await?;
        let config = Self::from_yaml(&yaml)?;
        info!(path, ?config, "Loaded configuration");
        Ok(config)
    }
}
