//! Kemazon CLI - the marketplace cart from the command line.
//!
//! Commands:
//! - `kemazon add` - Add a product to the cart
//! - `kemazon remove` - Remove a product
//! - `kemazon quantity` - Set a product's quantity
//! - `kemazon clear` - Empty the cart
//! - `kemazon show` - List the cart with its total
//! - `kemazon count` - Print the item count
//! - `kemazon checkout` - Print the payment request for the cart
//! - `kemazon settle` - Apply a payment status returned by the provider
//! - `kemazon config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AddArgs, ClearArgs, ConfigArgs, QuantityArgs, RemoveArgs, SettleArgs};

/// Kemazon CLI - manage the marketplace shopping cart
#[derive(Parser)]
#[command(name = "kemazon")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product to the cart
    Add(AddArgs),

    /// Remove a product from the cart
    Remove(RemoveArgs),

    /// Set the quantity of a product already in the cart
    Quantity(QuantityArgs),

    /// Empty the cart
    Clear(ClearArgs),

    /// Show the cart contents and total
    Show,

    /// Print the number of items in the cart
    Count,

    /// Print the payment request for the current cart
    Checkout,

    /// Apply the payment status returned by the provider
    Settle(SettleArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Add(args) => commands::cart::add(args, &ctx),
        Commands::Remove(args) => commands::cart::remove(args, &ctx),
        Commands::Quantity(args) => commands::cart::quantity(args, &ctx),
        Commands::Clear(args) => commands::cart::clear(args, &ctx),
        Commands::Show => commands::cart::show(&ctx),
        Commands::Count => commands::cart::count(&ctx),
        Commands::Checkout => commands::checkout::checkout(&ctx),
        Commands::Settle(args) => commands::checkout::settle(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` when set.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
