//! STAXXIT CLI - Command-line interface
//!
//! Commands:
//! - serve: Start the game server

use clap::{Parser, Subcommand};
use staxxit_server::{run_server, ServerConfig};

#[derive(Parser)]
#[command(name = "staxxit")]
#[command(about = "STAXXIT hex stack game server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the game server
    Serve {
        #[arg(long, default_value = "3000")]
        port: u16,
        #[arg(long, default_value = "static")]
        static_dir: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, static_dir } => run_server(ServerConfig { port, static_dir }).await,
    }
}
