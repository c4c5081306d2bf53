//! Catalog Browser CLI - Seeding and browsing tools.
//!
//! # Usage
//!
//! ```bash
//! # Write a synthetic catalog of 1000 products
//! catalog-cli seed --output catalog.json
//!
//! # Show page 2 of products priced 100-300, cheapest first
//! catalog-cli browse --catalog catalog.json --min-price 100 --max-price 300 \
//!     --sort price --order asc --page 2
//!
//! # Interactive session (type `help` for commands)
//! catalog-cli session --catalog catalog.json
//! ```
//!
//! # Commands
//!
//! - `seed` - Generate a synthetic catalog as JSON
//! - `browse` - Apply filters, sort and page once and print the result
//! - `session` - Line-oriented browsing and cart session over stdin

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use catalog_browser_core::{SortDirection, SortKey};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod render;

use config::CliConfig;
use error::CliError;

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(author, version, about = "Catalog browser CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a synthetic catalog
    Seed {
        /// Number of products (default: `CATALOG_SEED_COUNT` or 1000)
        #[arg(short, long)]
        count: Option<u32>,

        /// RNG seed for a reproducible catalog (default: `CATALOG_RNG_SEED`)
        #[arg(long)]
        rng_seed: Option<u64>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print one page of the filtered, sorted catalog
    Browse(BrowseArgs),
    /// Interactive browsing and cart session
    Session {
        #[command(flatten)]
        source: CatalogSource,
    },
}

/// Where the catalog comes from.
#[derive(Args, Clone)]
pub struct CatalogSource {
    /// JSON catalog file (a synthetic catalog is generated when omitted)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// RNG seed used when generating the catalog
    #[arg(long)]
    pub rng_seed: Option<u64>,
}

#[derive(Args)]
pub struct BrowseArgs {
    #[command(flatten)]
    pub source: CatalogSource,

    /// Case-insensitive name search
    #[arg(short, long, default_value = "")]
    pub search: String,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub min_price: Option<Decimal>,

    #[arg(long)]
    pub max_price: Option<Decimal>,

    /// Accepted brand (repeatable)
    #[arg(short, long = "brand")]
    pub brands: Vec<String>,

    #[arg(long)]
    pub min_rating: Option<Decimal>,

    /// Sort key (`default`, `price`, `rating`, `sales`, `createdAt`)
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Sort direction (`asc`, `desc`)
    #[arg(long, default_value = "desc")]
    pub order: SortDirection,

    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Products per page (default: `CATALOG_PAGE_SIZE` or 10)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

fn main() {
    let config = CliConfig::from_env();
    init_tracing(config.as_ref().is_ok_and(|config| config.log_json));

    let result = config
        .map_err(CliError::from)
        .and_then(|config| run(Cli::parse(), &config));

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(cli: Cli, config: &CliConfig) -> Result<(), CliError> {
    match cli.command {
        Commands::Seed {
            count,
            rng_seed,
            output,
        } => commands::seed::run(
            count.unwrap_or(config.seed_count),
            rng_seed.or(config.rng_seed),
            output.as_deref(),
        ),
        Commands::Browse(args) => commands::browse::run(&args, config),
        Commands::Session { source } => commands::session::run(&source, config),
    }
}
