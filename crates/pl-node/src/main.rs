//! `pl-node` executable.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pl_01_blob_store::FlatDirectoryClient;
use pl_node::commands::{demo, fetch, serve, shutdown_signal};
use pl_node::container::config::store_from_lookup;
use pl_node::{init_tracing, NodeConfig, NodeContainer, TelemetryConfig};
use std::path::PathBuf;
use tracing::info;

/// Proofline node: verifiable generation with an activity log in a blob store
#[derive(Parser, Debug)]
#[command(name = "pl-node", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Generate one response and log one info entry
    Demo,
    /// Download a file from the directory
    Fetch {
        /// File key, e.g. `0xabc...-1.json`
        key: String,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&TelemetryConfig::from_env())?;
    info!(version = pl_node::VERSION, "[pl-node] Starting");

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let container = NodeContainer::new(load_config()?)?;
            serve::run(
                container.config.gateway.clone(),
                container.agent.clone(),
                shutdown_signal(),
            )
            .await
        }
        Command::Demo => {
            let container = NodeContainer::new(load_config()?)?;
            container
                .agent
                .initialize()
                .await
                .context("Failed to initialize agent")?;
            let report = demo::run(container.agent.as_ref()).await?;
            println!("Response: {}", report.response.content);
            println!("Proof available: {}", !report.response.proof.is_null());
            container.agent.tracker().wait_idle().await;
            Ok(())
        }
        Command::Fetch { key, output } => {
            let config = store_from_lookup(&|name: &str| std::env::var(name).ok())
                .context("Invalid configuration")?;
            let client = FlatDirectoryClient::new(config).context("Failed to create blob store client")?;
            fetch::run(&client, &key, output.as_deref()).await
        }
    }
}

fn load_config() -> Result<NodeConfig> {
    NodeConfig::from_env().context("Invalid configuration")
}
