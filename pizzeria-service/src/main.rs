use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use pizzeria_service::config::Config;
use tracing_subscriber::EnvFilter;

pub mod app;

#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API, applying pending migrations first
    Serve {
        #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:5555")]
        listen: SocketAddr,
    },
    /// Apply pending migrations and exit
    Migrate,
    /// Replace the catalog with sample restaurants, pizzas and prices
    Seed,
}

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { listen } => app::serve::main(&cli.config, listen).await,
        Commands::Migrate => app::migrate::main(&cli.config),
        Commands::Seed => app::seed::main(&cli.config).await,
    }
}
