//! X-ray Calculation Server
//!
//! REST API for edge energies, cross sections and atomic weights.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use xray_core::{XrayDatabase, XrayLibrary};
use xray_server::config::{build_config, CliArgs as ConfigCliArgs, ServerConfig};
use xray_server::server::Server;

/// X-ray Calculation Server - REST API for X-ray physics lookups
#[derive(Parser, Debug)]
#[command(name = "xray_server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Host address to bind to
    #[arg(long, env = "XRAY_SERVER_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "XRAY_SERVER_PORT")]
    port: Option<u16>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, env = "XRAY_LOG_LEVEL")]
    log_level: Option<String>,

    /// Element dataset (TOML) to load instead of the bundled one
    #[arg(long, value_name = "FILE", env = "XRAY_DATA_FILE")]
    data_file: Option<PathBuf>,
}

impl From<Args> for ConfigCliArgs {
    fn from(args: Args) -> Self {
        ConfigCliArgs {
            config_file: args.config,
            host: args.host,
            port: args.port,
            log_level: args.log_level,
            data_file: args.data_file,
        }
    }
}

fn init_tracing(config: &ServerConfig) {
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(config.log_level.into())
        .from_env_lossy();
    let registry = tracing_subscriber::registry().with(filter);

    if config.environment.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn load_library(config: &ServerConfig) -> anyhow::Result<XrayDatabase> {
    match &config.data_file {
        Some(path) => XrayDatabase::from_file(path)
            .with_context(|| format!("failed to load element dataset from {}", path.display())),
        None => XrayDatabase::bundled().context("failed to load bundled element dataset"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cli_args: ConfigCliArgs = args.into();
    let config = build_config(&cli_args)?;

    init_tracing(&config);

    tracing::info!("X-ray Calculation Server v{}", xray_server::VERSION);
    tracing::info!(
        host = %config.host,
        port = %config.port,
        log_level = %config.log_level,
        environment = %config.environment,
        shutdown_timeout_secs = config.shutdown_timeout_secs,
        "Server configuration loaded"
    );

    let library = load_library(&config)?;
    tracing::info!(
        version = library.version(),
        elements = library.dataset().max_z(),
        source = %config
            .data_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "bundled".to_string()),
        "Physics library loaded"
    );

    let server = Server::new(config, Arc::new(library));
    tracing::info!(address = %server.config().socket_addr(), "Starting server");

    server.run().await?;

    tracing::info!("Server stopped");
    Ok(())
}
