//! Runtime configuration
//!
//! Settings come from the environment with sensible defaults, mirroring how
//! the tool is deployed: refinement API keys are optional, the workspace
//! base directory defaults to a dockgen-owned folder under the system temp
//! dir.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const ENV_WORKSPACE_DIR: &str = "DOCKGEN_WORKSPACE_DIR";
const ENV_HTTP_TIMEOUT: &str = "DOCKGEN_HTTP_TIMEOUT_SECS";
const ENV_OPENROUTER_KEY: &str = "OPENROUTER_API_KEY";
const ENV_GOOGLE_KEY: &str = "GOOGLE_API_KEY";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {variable}: {value}")]
    InvalidValue { variable: String, value: String },
}

#[derive(Debug, Clone)]
pub struct DockgenConfig {
    /// Where materialized repositories live; one subdirectory per workspace.
    pub workspace_dir: PathBuf,
    /// Timeout applied to refinement provider requests.
    pub http_timeout: Duration,
    pub openrouter_api_key: Option<String>,
    pub google_api_key: Option<String>,
}

impl DockgenConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let workspace_dir = match std::env::var(ENV_WORKSPACE_DIR) {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => std::env::temp_dir().join("dockgen-workspaces"),
        };

        let http_timeout = match std::env::var(ENV_HTTP_TIMEOUT) {
            Ok(raw) => {
                let secs = raw
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidValue {
                        variable: ENV_HTTP_TIMEOUT.to_string(),
                        value: raw.clone(),
                    })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Self {
            workspace_dir,
            http_timeout,
            openrouter_api_key: non_empty_env(ENV_OPENROUTER_KEY),
            google_api_key: non_empty_env(ENV_GOOGLE_KEY),
        })
    }

    pub fn has_refinement_provider(&self) -> bool {
        self.openrouter_api_key.is_some() || self.google_api_key.is_some()
    }
}

impl Default for DockgenConfig {
    fn default() -> Self {
        Self {
            workspace_dir: std::env::temp_dir().join("dockgen-workspaces"),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            openrouter_api_key: None,
            google_api_key: None,
        }
    }
}

fn non_empty_env(variable: &str) -> Option<String> {
    std::env::var(variable).ok().filter(|v| !v.is_empty())
}
