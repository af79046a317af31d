pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod routes;
pub mod server;
pub mod utils;

pub use crate::adapters::OpenAiClient;
pub use crate::config::{file::FileConfig, ServiceConfig};
pub use crate::core::engine::SimplifierEngine;
pub use crate::domain::model::{SimplificationRequest, SimplificationResult};
pub use crate::utils::error::{Result, SimplifyError};
