//! Duel server entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use coexistence::server::{DuelServer, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Two-player card duel server
#[derive(Parser, Debug)]
#[command(name = "coexistence-server")]
#[command(about = "Pairs incoming TCP connections into card duels", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML config file; missing keys use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    port: Option<u16>,

    /// Milliseconds to keep connections open after a duel ends
    #[arg(long)]
    grace_period_ms: Option<u64>,

    /// Fixed base seed for reproducible duels
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn into_config(self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load_from(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => ServerConfig::default(),
        };

        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(ms) = self.grace_period_ms {
            config = config.with_grace_period_ms(ms);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_config()?;
    let server = DuelServer::bind(config.clone())
        .await
        .with_context(|| format!("binding {}", config.bind_addr()))?;

    tokio::select! {
        result = server.run() => result.context("accept loop failed")?,
        _ = tokio::signal::ctrl_c() => info!("shutting down"),
    }

    Ok(())
}
