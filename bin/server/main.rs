//! Retro Portal Server
//!
//! Runs the citizen portal as a standalone HTTP server: qualification,
//! registration, and eligibility lookups for the registration wizard.

use anyhow::Result;
use clap::Parser;
use retro_portal::{CitizenRegistry, PortalConfig, PortalServerState, RegistrySnapshot};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "retro-server")]
#[command(about = "Retro Funding citizen portal server")]
struct Args {
    /// Server port
    #[arg(short, long, default_value = "8080", env = "PORTAL_PORT")]
    port: u16,

    /// Server host
    #[arg(long, default_value = "0.0.0.0", env = "PORTAL_HOST")]
    host: String,

    /// Portal configuration file (TOML)
    #[arg(short, long, env = "PORTAL_CONFIG")]
    config: Option<PathBuf>,

    /// Registry snapshot file (JSON: eligible wallets, priority/block lists)
    #[arg(short, long, env = "PORTAL_SNAPSHOT")]
    snapshot: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("retro_portal=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PortalConfig::load(path)?,
        None => PortalConfig::default(),
    };

    info!("Starting Retro Portal Server");
    info!("  Listening on: {}:{}", args.host, args.port);
    info!(
        "  Qualification threshold: {}",
        config.trust.qualification_threshold
    );

    let mut registry = CitizenRegistry::new(config.registration.clone(), config.trust.clone());
    if let Some(path) = &args.snapshot {
        let raw = std::fs::read_to_string(path)?;
        let snapshot: RegistrySnapshot = serde_json::from_str(&raw)?;
        registry.apply_snapshot(snapshot);
    }

    let state = Arc::new(PortalServerState::new(registry));
    retro_portal::server::run(state, &args.host, args.port).await
}
