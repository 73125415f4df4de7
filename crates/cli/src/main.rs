//! Nâu storefront CLI - browse the catalog and manage the local cart.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! nau products
//! nau product 12
//! nau banners
//!
//! # Manage the cart
//! nau cart add 12 --variant 120 --quantity 2
//! nau cart update 120 3
//! nau cart remove 120
//! nau cart show
//! nau cart clear
//! ```
//!
//! # Commands
//!
//! - `products` / `product` / `banners` - Read from the admin catalog API
//! - `cart` - Inspect and change the cart persisted under the data directory

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use nau_core::{LineItemId, ProductId, VariantId};
use nau_storefront::cart::Cart;
use nau_storefront::catalog::CatalogClient;
use nau_storefront::config::StorefrontConfig;
use nau_storefront::error::Result;
use tracing_subscriber::EnvFilter;

mod commands;

const DEFAULT_LOG_FILTER: &str = "nau_storefront=info,nau_cli=info";

#[derive(Parser)]
#[command(name = "nau")]
#[command(author, version, about = "Nâu storefront in the terminal")]
struct Cli {
    /// Directory holding the persisted cart (overrides `NAU_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products,
    /// Show one product with its variants
    Product {
        /// Product ID
        id: ProductId,
    },
    /// List home-page banners
    Banners,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add a product to the cart
    Add {
        /// Product ID
        product_id: ProductId,

        /// Variant ID (defaults to the product's first variant)
        #[arg(short, long)]
        variant: Option<VariantId>,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: i64,
    },
    /// Set the quantity of a cart line
    Update {
        /// Cart line ID
        line_id: LineItemId,

        /// New quantity
        quantity: i64,
    },
    /// Remove a cart line
    Remove {
        /// Cart line ID
        line_id: LineItemId,
    },
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            #[allow(clippy::print_stdout)]
            {
                print!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<String> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    match cli.command {
        Commands::Products => {
            let client = CatalogClient::new(config.catalog()?)?;
            commands::catalog::products(&client).await
        }
        Commands::Product { id } => {
            let client = CatalogClient::new(config.catalog()?)?;
            commands::catalog::product(&client, id).await
        }
        Commands::Banners => {
            let client = CatalogClient::new(config.catalog()?)?;
            commands::catalog::banners(&client).await
        }
        Commands::Cart { action } => {
            let mut cart = Cart::open(&config.data_dir);
            match action {
                CartAction::Show => Ok(commands::cart::show(&cart)),
                CartAction::Add {
                    product_id,
                    variant,
                    quantity,
                } => {
                    let client = CatalogClient::new(config.catalog()?)?;
                    commands::cart::add(&mut cart, &client, product_id, variant, quantity).await
                }
                CartAction::Update { line_id, quantity } => {
                    commands::cart::update(&mut cart, &line_id, quantity)
                }
                CartAction::Remove { line_id } => commands::cart::remove(&mut cart, &line_id),
                CartAction::Clear => Ok(commands::cart::clear(&mut cart)),
            }
        }
    }
}
