//! Account Service - Main Application Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use config::{ConfigLoader, ConfigValidator, LoggingConfig};
use std::{env, path::PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod store;

use app::Application;

/// In-memory REST service for account records
#[derive(Debug, Parser)]
#[command(name = "account_api", version, about)]
struct Cli {
    /// Path to the YAML configuration file (falls back to CONFIG_PATH, then config.yaml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the default configuration to PATH and exit
    #[arg(long, value_name = "PATH")]
    print_default_config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logging is configured from the loaded config, so report .env status afterwards
    let dotenv_result = dotenv::dotenv();

    let cli = Cli::parse();

    if let Some(path) = cli.print_default_config {
        ConfigLoader::create_example(&path)?;
        println!("Default configuration written to {}", path.display());
        return Ok(());
    }

    let config_path = cli
        .config
        .or_else(|| env::var("CONFIG_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("config.yaml"));
    let config = ConfigLoader::load(&config_path)
        .context("Failed to load configuration")?;

    init_logging(&config.logging)?;

    match dotenv_result {
        Ok(path) => info!("Loaded environment variables from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Could not load .env file: {}", e),
    }

    info!("Starting Account Service v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded from: {}", config_path.display());

    let report = ConfigValidator::validate(&config);
    for issue in &report.warnings {
        warn!(field = %issue.field, "{}", issue.message);
    }
    info!("{}", report.summary());

    // Create and start the application
    let mut app = Application::new(config).await
        .context("Failed to create application")?;

    // Setup signal handling
    let shutdown_signal = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install CTRL+C signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    // Run the application until the signal fires and in-flight requests drain
    info!("Application starting...");
    if let Err(e) = app.run(shutdown_signal).await {
        error!("Application error: {:#}", e);
        return Err(e);
    }
    app.shutdown().await?;

    info!("Account Service shutdown complete");
    Ok(())
}

/// Initialize logging from configuration, with `RUST_LOG` and `LOG_FORMAT` taking precedence
fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match log_format.as_str() {
        "pretty" => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()
                .context("Failed to initialize pretty logging")?;
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()
                .context("Failed to initialize JSON logging")?;
        }
    }

    info!("Logging initialized");
    info!("Log level: {}", logging.level);
    info!("Log format: {}", log_format);

    Ok(())
}
