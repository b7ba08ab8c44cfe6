use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use clap_serde_derive::ClapSerde;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::api::AppState;
use crate::config::Config;
use crate::generation::EmailGenerator;
use crate::provider::openai::OpenAiProvider;
use crate::telemetry::init_telemetry;

mod api;
mod config;
mod error;
mod generation;
mod provider;
mod telemetry;

const DEFAULT_CONFIG_FILE: &str = "MailDrafter.toml";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, env, default_value = DEFAULT_CONFIG_FILE)]
    config_file: String,

    /// Configuration options
    #[command(flatten)]
    pub opt_config: <Config as ClapSerde>::Opt,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = match Config::load(&args.config_file, DEFAULT_CONFIG_FILE) {
        Ok(conf) => conf.merge(args.opt_config),
        Err(err) => {
            // Logging is not initialised yet
            eprintln!("{:#}", err);
            std::process::exit(1);
        }
    };

    let telemetry = init_telemetry(config.otlp_endpoint(), config.console_log)?;

    if config.provider_api_key.is_empty() {
        info!("No provider API key configured, requests are sent unauthenticated");
    }
    let provider = OpenAiProvider::new(config.provider_settings())?;
    let generator = EmailGenerator::new(Arc::new(provider), config.provider_timeout());
    info!(
        "Using model {} at {} with a {} ms timeout",
        config.provider_model,
        config.provider_base_url,
        generator.timeout().as_millis()
    );

    let state = AppState {
        generator: Arc::new(generator),
    };
    let router = api::router(state, &config.static_dir);

    let listener = TcpListener::bind(format!("{}:{}", config.address, config.port)).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    telemetry.shutdown();
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down..."),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}
