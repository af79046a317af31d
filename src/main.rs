use clap::Parser;
use policy_simplifier::server::{self, AppState};
use policy_simplifier::utils::{logger, validation::Validate};
use policy_simplifier::{FileConfig, OpenAiClient, ServiceConfig, SimplifierEngine};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = ServiceConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_server_logger(config.verbose);
    }

    tracing::info!("Starting policy-simplifier");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Some(path) = config.config.clone() {
        let file_config = FileConfig::from_file(&path)?;
        file_config.apply(&mut config);
        tracing::info!("Loaded configuration overrides from {}", path);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    // The API key is resolved once here and injected; a missing key only
    // fails the first summarize call, never startup.
    let client = OpenAiClient::from_env(&config)?;
    let engine = SimplifierEngine::new(Arc::new(client), config.max_input_chars);

    server::run(&config, AppState::new(engine)).await
}
