pub mod file;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "policy-simplifier")]
#[command(about = "A plain-language summarizer proxy for government policy documents")]
pub struct ServiceConfig {
    #[arg(long, default_value = "127.0.0.1:8787")]
    pub bind: String,

    #[arg(long, default_value = "https://api.openai.com")]
    pub api_base: String,

    #[arg(long, default_value = "gpt-4o-mini")]
    pub model: String,

    #[arg(long, default_value = "32000")]
    pub max_input_chars: usize,

    #[arg(long, default_value = "120")]
    pub request_timeout_secs: u64,

    #[arg(long, help = "Optional TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log in JSON format")]
    pub log_json: bool,
}

impl ConfigProvider for ServiceConfig {
    fn bind_addr(&self) -> &str {
        &self.bind
    }

    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
    }

    fn max_input_chars(&self) -> usize {
        self.max_input_chars
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_base", &self.api_base)?;
        validate_non_empty_string("model", &self.model)?;
        validate_non_empty_string("bind", &self.bind)?;
        validate_positive_number("max_input_chars", self.max_input_chars, 1)?;
        validate_range("request_timeout_secs", self.request_timeout_secs, 1, 600)?;
        Ok(())
    }
}
