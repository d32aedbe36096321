//! Modesta CLI - Terminal storefront and catalog tools.
//!
//! # Usage
//!
//! ```bash
//! # Browse, fill a cart and check out from the terminal
//! modesta shop
//!
//! # List the catalog, optionally for one category
//! modesta catalog
//! modesta catalog --category Niqabs
//!
//! # Show the order number a customer name produces
//! modesta order-number "Amina Hassan"
//! ```
//!
//! # Commands
//!
//! - `shop` - Interactive storefront on stdin/stdout
//! - `catalog` - Print the product catalog
//! - `order-number` - Derive a `MOD-NNNNN` order number

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "modesta")]
#[command(author, version, about = "Modesta storefront tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shop interactively in the terminal
    Shop,
    /// Print the product catalog
    Catalog {
        /// Only list this category (Abayas, Khimars, Niqabs, Accessories)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Print the order number for a customer name
    OrderNumber {
        /// Customer full name
        name: String,
    },
}

fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "modesta_cli=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Shop => commands::shop::run(io::stdin().lock(), &mut out)?,
        Commands::Catalog { category } => commands::catalog::list(category.as_deref(), &mut out)?,
        Commands::OrderNumber { name } => commands::order_number::print(&name, &mut out)?,
    }
    Ok(())
}
