//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    ctx.output.info("[storage]");
    ctx.output.kv("dir", &ctx.config.storage.dir);
    ctx.output.kv("key", &ctx.config.storage.key);
    ctx.output
        .kv("resolved", &ctx.storage_dir().display().to_string());

    ctx.output.info("[display]");
    ctx.output.kv("currency", ctx.config.display.currency.code());

    ctx.output.info("[checkout]");
    ctx.output
        .kv("asset_base_url", &ctx.config.checkout.asset_base_url);

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    let errors = ctx.config.validate();

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "valid": errors.is_empty(), "errors": errors }));
    } else {
        ctx.output.header("Validating configuration");
        for error in &errors {
            ctx.output.list_item(error);
        }
    }

    if !errors.is_empty() {
        bail!("{} configuration error(s)", errors.len());
    }
    ctx.output.success("Configuration is valid");
    Ok(())
}
