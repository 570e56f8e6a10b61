//! Loyalty card manager CLI - database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! loyalty-cli migrate
//!
//! # Insert clients from a YAML file
//! loyalty-cli seed clients.yaml
//!
//! # Print every client with its point balance
//! loyalty-cli clients list
//! ```
//!
//! # Environment Variables
//!
//! - `LOYALTY_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "loyalty-cli")]
#[command(author, version, about = "Loyalty card manager CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert clients from a YAML file
    Seed {
        /// Path to a YAML list of `{name, phone, address?, loyaltyPoints?}`
        file: String,
    },
    /// Inspect clients
    Clients {
        #[command(subcommand)]
        action: ClientsAction,
    },
}

#[derive(Subcommand)]
enum ClientsAction {
    /// List all clients with their point balance
    List,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { file } => commands::seed::clients(&file).await?,
        Commands::Clients { action } => match action {
            ClientsAction::List => commands::clients::list().await?,
        },
    }
    Ok(())
}
