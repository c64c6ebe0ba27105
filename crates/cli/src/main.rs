//! Sunstone CLI - catalog queries and store inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # List the category table
//! sun-cli catalog categories
//!
//! # Query the catalog like the listing page does
//! sun-cli catalog query --category microphones --sort price-low --page 1
//!
//! # Walk a cart through add/update/total against file-backed storage
//! sun-cli cart demo
//! ```
//!
//! # Commands
//!
//! - `catalog query` - Run the filter/sort/paginate pipeline
//! - `catalog categories` - List categories
//! - `cart demo` - Exercise the cart store end to end

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sun-cli")]
#[command(author, version, about = "Sunstone CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and query the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Exercise the cart store
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Run the catalog query pipeline and print one page of results
    Query {
        /// Category slug (e.g., `microphones`, `smart-home`)
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive text search over name, brand, description
        #[arg(long)]
        search: Option<String>,

        /// Brand filter; repeat for multiple brands (OR)
        #[arg(long = "brand")]
        brands: Vec<String>,

        /// Inclusive minimum price (e.g., 19.99)
        #[arg(long)]
        min_price: Option<String>,

        /// Inclusive maximum price
        #[arg(long)]
        max_price: Option<String>,

        /// Minimum rating threshold; repeat for multiple (OR)
        #[arg(long = "rating")]
        ratings: Vec<f64>,

        /// Only flash deals
        #[arg(long)]
        flash_deals: bool,

        /// Only limited-stock products
        #[arg(long)]
        limited_stock: bool,

        /// Sort key: featured, price-low, price-high, rating, newest, popular
        #[arg(long, default_value = "featured")]
        sort: String,

        /// 1-indexed page number
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// List the category table
    Categories,
}

#[derive(Subcommand)]
enum CartAction {
    /// Scripted add/update/total walkthrough against file storage
    Demo,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load .env if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Query {
                category,
                search,
                brands,
                min_price,
                max_price,
                ratings,
                flash_deals,
                limited_stock,
                sort,
                page,
            } => commands::catalog::query(&commands::catalog::QueryArgs {
                category,
                search,
                brands,
                min_price,
                max_price,
                ratings,
                flash_deals,
                limited_stock,
                sort,
                page,
            })?,
            CatalogAction::Categories => commands::catalog::categories()?,
        },
        Commands::Cart { action } => match action {
            CartAction::Demo => commands::cart::demo()?,
        },
    }
    Ok(())
}
