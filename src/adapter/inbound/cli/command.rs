//! Command-line interface definitions.
//!
//! Operator CLI over the SQLite catalog: manage products and their fallback
//! lists, and preview what a visitor would see.

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::domain::StockStatus;

/// Substitute in-stock products for out-of-stock ones
#[derive(Parser, Debug)]
#[command(name = "product-fallbacks")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, short, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage catalog products
    #[command(subcommand)]
    Product(ProductCommand),

    /// Manage a product's ordered fallback list
    #[command(subcommand)]
    Fallbacks(FallbacksCommand),

    /// Print the fallback that currently applies to a product
    Resolve(ProductArg),

    /// List every out-of-stock product
    Stock,

    /// Preview what a visitor requesting a product would get
    View(ViewArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `product-fallbacks product`.
#[derive(Subcommand, Debug)]
pub enum ProductCommand {
    /// Create or replace a product.
    Add(ProductAddArgs),
    /// Change a product's stock status.
    Stock(ProductStockArgs),
    /// Show one product.
    Show(ProductArg),
    /// List products as a public listing would.
    List(ProductListArgs),
}

/// Subcommands for `product-fallbacks fallbacks`.
#[derive(Subcommand, Debug)]
pub enum FallbacksCommand {
    /// Replace the fallback list with comma-separated ids, in priority order.
    Set(FallbacksSetArgs),
    /// Show the stored fallback list.
    Show(ProductArg),
    /// Remove the fallback list.
    Clear(ProductArg),
}

/// Subcommands for `product-fallbacks config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate the configuration file.
    Validate,
}

/// A single product id.
#[derive(Args, Debug)]
pub struct ProductArg {
    /// Product id
    pub id: u64,
}

/// Arguments for `product add`.
#[derive(Args, Debug)]
pub struct ProductAddArgs {
    /// Product id
    pub id: u64,

    /// Display name
    #[arg(long)]
    pub name: String,

    /// URL slug
    #[arg(long)]
    pub slug: String,

    /// Price
    #[arg(long, default_value = "0")]
    pub price: Decimal,

    /// Short description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Stock status
    #[arg(long, value_enum, default_value_t = StockArg::Instock)]
    pub stock: StockArg,
}

/// Arguments for `product stock`.
#[derive(Args, Debug)]
pub struct ProductStockArgs {
    /// Product id
    pub id: u64,

    /// New stock status
    #[arg(value_enum)]
    pub status: StockArg,
}

/// Arguments for `product list`.
#[derive(Args, Debug)]
pub struct ProductListArgs {
    /// List as a back-office screen (no listing exclusions)
    #[arg(long)]
    pub admin: bool,
}

/// Arguments for `fallbacks set`.
#[derive(Args, Debug)]
pub struct FallbacksSetArgs {
    /// Product id
    pub id: u64,

    /// Comma-separated fallback ids, e.g. "101, 102"
    #[arg(allow_hyphen_values = true)]
    pub ids: String,
}

/// Arguments for `view`.
#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Product id
    pub id: u64,

    /// Render as a listing entry instead of the product's own page
    #[arg(long)]
    pub listing: bool,
}

/// Stock status values accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StockArg {
    /// In stock
    Instock,
    /// Out of stock
    Outofstock,
    /// On backorder
    Onbackorder,
}

impl From<StockArg> for StockStatus {
    fn from(arg: StockArg) -> Self {
        match arg {
            StockArg::Instock => Self::InStock,
            StockArg::Outofstock => Self::OutOfStock,
            StockArg::Onbackorder => Self::OnBackorder,
        }
    }
}
