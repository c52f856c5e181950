//! Terminal duel client entry point.

use anyhow::{Context, Result};
use clap::Parser;
use coexistence::client::DuelClient;
use coexistence::server::DEFAULT_PORT;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

/// Play a card duel from the terminal
#[derive(Parser, Debug)]
#[command(name = "coexistence-client")]
#[command(version)]
struct Cli {
    /// Server host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Frames go to stdout, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let addr = format!("{}:{}", cli.host, cli.port);

    let mut client = DuelClient::connect(&addr)
        .await
        .with_context(|| format!("connecting to {addr}"))?;

    println!("Commands: two columns (e.g. AB = your A attacks their B), or PS to pass.");
    let verdict = client
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
        .context("connection failed")?;

    if verdict.is_none() {
        println!("Duel ended without a result.");
    }
    Ok(())
}
