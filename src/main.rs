//! Tune-In Graph - Main Server
//!
//! Social graph service for tune-in relationships, backed by Neo4j.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tune_in_graph::neo4j::IdentityNode;
use tune_in_graph::social::TuneInManager;
use tune_in_graph::{AppState, Config};

#[derive(Parser)]
#[command(name = "tune-in-graph")]
#[command(about = "Tune-in social graph server")]
struct Cli {
    /// Path to the YAML config file
    #[arg(short, long, global = true, env = "TUNE_IN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Upsert identity projections from a JSON array file
    ImportIdentities {
        /// JSON file: [{"id": "...", "display_name": "...", "avatar_url": "..."}]
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print crew/following counts for a user
    Counts {
        /// User ID
        user_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tune_in_graph=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_yaml_and_env(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server_port = port;
            }
            tune_in_graph::start_server(config).await
        }
        Commands::ImportIdentities { file } => run_import(config, &file).await,
        Commands::Counts { user_id } => run_counts(config, &user_id).await,
    }
}

async fn run_import(config: Config, file: &std::path::Path) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let identities: Vec<IdentityNode> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse identities in {}", file.display()))?;

    let state = AppState::new(config).await?;
    tracing::info!("Importing {} identities", identities.len());

    for identity in &identities {
        state.store.upsert_identity(identity).await?;
    }

    tracing::info!("Import complete: {} identities", identities.len());
    Ok(())
}

async fn run_counts(config: Config, user_id: &str) -> Result<()> {
    let state = AppState::new(config).await?;
    let manager = TuneInManager::new(state.store.clone());

    let counts = manager.counts(user_id).await?;
    println!("{}", serde_json::to_string_pretty(&counts)?);
    Ok(())
}
