//! Store service CLI server
//!
//! ```sh
//! # Run with default config (~/.config/store-service/config.toml)
//! store-service
//!
//! # Custom config path, throwaway in-memory data
//! store-service --config ./config.toml --in-memory
//!
//! # Validate config without starting
//! store-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use storehub::config::AppConfig;
use storehub::server::{init_tracing, ServerHandle, ServerOptions};

/// REST service for store registration, lifecycle and proximity search.
#[derive(Parser, Debug)]
#[command(
    name = "store-service",
    version,
    about = "Store registry with category enrichment and proximity search",
    long_about = "Store service: REST API for registering stores, moving them through \
                  their lifecycle and listing them by category, owner, status, tags \
                  or distance.\n\n\
                  Default config: ~/.config/store-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "STORE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Override the database URL.
    #[arg(long)]
    database_url: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Keep all data in memory instead of the database.
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(storehub::default_config_path);

    let loaded = AppConfig::load(&config_path);
    let mut config = loaded.as_ref().cloned().unwrap_or_default();
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    // Init tracing first so subsequent logs are formatted properly
    init_tracing(&config);
    match loaded {
        Ok(_) => info!("Configuration loaded from {}", config_path.display()),
        Err(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }
    if let Some(url) = cli.database_url {
        info!("CLI override: database_url = {}", url);
        config.database.url = url;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        if cli.in_memory {
            println!("   Database    : in-memory");
        } else {
            println!("   Database    : {}", config.database.url);
        }
        println!("   Log level   : {}", config.logging.level);
        println!("   Timeout     : {}s", config.usecase.timeout_secs);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        in_memory: cli.in_memory,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
