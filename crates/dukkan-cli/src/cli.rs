//! CLI argument definitions using Clap v4

use std::path::PathBuf;
use std::str::FromStr;

use clap::{ArgAction, Parser, Subcommand};
use dukkan::error::ValidationError;

/// Dukkan - right-to-left invoices from the command line
#[derive(Parser, Debug)]
#[command(name = "dukkan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the products on sale
    Catalog,

    /// Print text the way it is drawn on an invoice
    Shape(ShapeArgs),

    /// Place an order and write its invoice
    #[command(alias = "o")]
    Order(OrderArgs),

    /// Print the pages and text lines of an invoice PDF
    Inspect(InspectArgs),

    /// Delete all but the newest invoices
    Prune(PruneArgs),
}

#[derive(Parser, Debug)]
pub struct ShapeArgs {
    /// Text to shape
    pub text: String,

    /// Keep Arabic diacritics
    #[arg(long)]
    pub keep_harakat: bool,

    /// Do not fuse lam-alef pairs
    #[arg(long)]
    pub no_ligatures: bool,
}

#[derive(Parser, Debug)]
pub struct OrderArgs {
    /// Customer full name
    #[arg(long)]
    pub name: String,

    /// Customer phone number
    #[arg(long)]
    pub phone: String,

    /// Delivery address
    #[arg(long)]
    pub address: String,

    /// Catalog item as <INDEX>:<QTY>, repeatable
    #[arg(short, long = "item", value_name = "INDEX:QTY")]
    pub items: Vec<ItemSpec>,

    /// Font file with Arabic coverage (overrides DUKKAN_FONT)
    #[arg(short, long)]
    pub font: Option<PathBuf>,

    /// Directory invoices are written to (overrides DUKKAN_INVOICE_DIR)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Invoice PDF to read
    pub path: PathBuf,
}

#[derive(Parser, Debug)]
pub struct PruneArgs {
    /// How many of the newest invoices to keep
    #[arg(short, long)]
    pub keep: usize,

    /// Directory to prune (overrides DUKKAN_INVOICE_DIR)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}

/// One `--item` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSpec {
    pub index: usize,
    pub quantity: u32,
}

impl FromStr for ItemSpec {
    type Err = ValidationError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidItemSpec(spec.to_string());
        let (index, quantity) = spec.split_once(':').ok_or_else(invalid)?;
        Ok(Self {
            index: index.trim().parse().map_err(|_| invalid())?,
            quantity: quantity.trim().parse().map_err(|_| invalid())?,
        })
    }
}
