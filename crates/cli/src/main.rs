//! Arcadia CLI - data directory seeding and inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed the data directory with the default catalog and admin account
//! arcadia seed
//!
//! # Re-seed, discarding existing records
//! arcadia seed --force
//!
//! # Inspect state
//! arcadia catalog list
//! arcadia sales list
//! ```
//!
//! # Commands
//!
//! - `seed` - Initialize the data directory
//! - `catalog list` - Print the product catalog
//! - `sales list` - Print recorded sales
//!
//! The data directory and admin bootstrap credential come from the
//! environment (see `arcadia_engine::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]
// CLI output belongs on stdout
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "arcadia")]
#[command(author, version, about = "Arcadia CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory with the default catalog and admin
    Seed {
        /// Discard existing records and re-seed
        #[arg(long)]
        force: bool,
    },
    /// Inspect the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Inspect recorded sales
    Sales {
        #[command(subcommand)]
        action: SalesAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Print all products
    List,
}

#[derive(Subcommand)]
enum SalesAction {
    /// Print all sales, oldest first
    List,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { force } => commands::seed::run(force)?,
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list()?,
        },
        Commands::Sales { action } => match action {
            SalesAction::List => commands::sales::list()?,
        },
    }
    Ok(())
}
