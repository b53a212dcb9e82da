//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;

use clap::{Args, Subcommand};
use kemazon_cart::Money;

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product ID.
    #[arg(long)]
    pub id: String,

    /// Product name.
    #[arg(long)]
    pub name: String,

    /// Unit price in major units (e.g. 49.99).
    #[arg(long)]
    pub price: Money,

    /// Image reference; repeat for several, first is the cover.
    #[arg(long = "image")]
    pub images: Vec<String>,

    /// Seller ID.
    #[arg(long)]
    pub seller: Option<String>,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the quantity command.
#[derive(Args)]
pub struct QuantityArgs {
    /// Product ID.
    pub id: String,

    /// New quantity. Values below 1 are ignored; use `remove` instead.
    #[arg(allow_negative_numbers = true)]
    pub quantity: i64,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the settle command.
#[derive(Args)]
pub struct SettleArgs {
    /// Status returned by the payment provider (approved, pending, rejected, ...).
    pub status: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
