use crate::config::ServiceConfig;
use crate::utils::error::{Result, SimplifyError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional TOML overlay for the CLI configuration. Every field is
/// optional; present values override the flag/default values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerSection>,
    pub upstream: Option<UpstreamSection>,
    pub limits: Option<LimitsSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpstreamSection {
    pub api_base: Option<String>,
    pub model: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LimitsSection {
    pub max_input_chars: Option<usize>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SimplifyError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SimplifyError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Overlay onto a parsed CLI config.
    pub fn apply(self, config: &mut ServiceConfig) {
        if let Some(server) = self.server {
            if let Some(bind) = server.bind {
                config.bind = bind;
            }
        }
        if let Some(upstream) = self.upstream {
            if let Some(api_base) = upstream.api_base {
                config.api_base = api_base;
            }
            if let Some(model) = upstream.model {
                config.model = model;
            }
            if let Some(timeout) = upstream.request_timeout_secs {
                config.request_timeout_secs = timeout;
            }
        }
        if let Some(limits) = self.limits {
            if let Some(max) = limits.max_input_chars {
                config.max_input_chars = max;
            }
        }
    }
}

/// Substitute `${VAR_NAME}` references from the environment. Unset
/// variables are left as-is so the TOML error points at them.
fn substitute_env_vars(content: &str) -> String {
    static ENV_VAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

    ENV_VAR
        .replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
}
