//! Royal Trust CLI - Database migrations and seeding.
//!
//! # Usage
//!
//! ```bash
//! # Create or update the schema (including the session table)
//! rt-cli migrate
//!
//! # Create the default admin, settings and sample catalogue
//! rt-cli seed
//! ```
//!
//! Both commands read `DATABASE_URL` (and `.env`). `seed` also reads
//! `ADMIN_USERNAME` and `ADMIN_PASSWORD`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "rt-cli")]
#[command(author, version, about = "Royal Trust BD CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed default data into empty tables
    Seed,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    dotenvy::dotenv().ok();

    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed => commands::seed::run().await,
    }
}
