//! Checkout commands.

use anyhow::{Context as _, Result};
use kemazon_cart::checkout::{self, PaymentRequest, PaymentStatus};

use super::SettleArgs;
use crate::context::Context;

/// Print the payment request the cart would be checked out with.
pub fn checkout(ctx: &Context) -> Result<()> {
    let store = ctx.open_cart()?;
    let request = PaymentRequest::from_lines(store.lines(), &ctx.config.checkout.asset_base_url)
        .context("Cannot start checkout")?;

    if !ctx.output.is_json() {
        ctx.output.header("Payment request");
        ctx.output.kv(
            "total",
            &request.total().display(ctx.config.display.currency),
        );
    }
    ctx.output.json(&request);
    Ok(())
}

/// Apply the provider's payment status, clearing the cart on approval.
pub fn settle(args: SettleArgs, ctx: &Context) -> Result<()> {
    let status: PaymentStatus = match args.status.parse() {
        Ok(status) => status,
        Err(never) => match never {},
    };

    let mut store = ctx.open_cart()?;
    match checkout::settle(&mut store, &status) {
        Some(event) => {
            ctx.output.success("Purchase completed");
            ctx.output.event(&event);
        }
        None if ctx.output.is_json() => ctx
            .output
            .json(&serde_json::json!({ "status": status.as_str(), "cleared": false })),
        None => ctx.output.warn(&format!(
            "Payment was not approved (status: {}); cart kept",
            status
        )),
    }
    Ok(())
}
