//! Cart commands.

use anyhow::{bail, Result};
use kemazon_cart::{CartLine, Money, ProductId, ProductSnapshot};
use serde::Serialize;

use super::{AddArgs, ClearArgs, QuantityArgs, RemoveArgs};
use crate::context::Context;

/// Add one unit of a product.
pub fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut snapshot = ProductSnapshot::new(args.id, args.name, args.price);
    snapshot.images = args.images;
    if let Some(seller) = args.seller {
        snapshot = snapshot.with_seller(seller);
    }

    let mut store = ctx.open_cart()?;
    let existed = store.get(&snapshot.product_id).is_some();
    let event = store.add_line(snapshot);

    if existed {
        ctx.output
            .debug("product already in cart; kept the original name and price");
    }
    ctx.output.event(&event);
    Ok(())
}

/// Remove a product.
pub fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_cart()?;
    let event = store.remove_line(&ProductId::new(args.id));
    ctx.output.event(&event);
    Ok(())
}

/// Set a product's quantity.
pub fn quantity(args: QuantityArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_cart()?;
    let id = ProductId::new(args.id);

    match store.set_quantity(&id, args.quantity) {
        Some(event) => ctx.output.event(&event),
        None if args.quantity < 1 => ctx
            .output
            .warn("Quantity must be at least 1; use `remove` to drop the product"),
        None => ctx.output.warn(&format!("Product {} is not in the cart", id)),
    }
    Ok(())
}

/// Empty the cart, asking first unless `--yes`.
pub fn clear(args: ClearArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_cart()?;
    if store.is_empty() {
        ctx.output.info("Cart is already empty");
        return Ok(());
    }

    if !args.yes {
        if ctx.output.is_json() {
            bail!("Refusing to clear the cart without --yes in JSON mode");
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Remove all {} products from the cart?", store.lines().len()))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.info("Cart left unchanged");
            return Ok(());
        }
    }

    let event = store.clear();
    ctx.output.event(&event);
    Ok(())
}

#[derive(Serialize)]
struct CartView<'a> {
    lines: &'a [CartLine],
    count: u64,
    total: Money,
}

/// List the cart with its total.
pub fn show(ctx: &Context) -> Result<()> {
    let store = ctx.open_cart()?;
    let currency = ctx.config.display.currency;

    if ctx.output.is_json() {
        ctx.output.json(&CartView {
            lines: store.lines(),
            count: store.derived_count(),
            total: store.derived_total(),
        });
        return Ok(());
    }

    if store.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    ctx.output.header("Cart");
    let widths = [10, 28, 12, 5, 12];
    ctx.output
        .table_row(&["ID", "PRODUCT", "PRICE", "QTY", "SUBTOTAL"], &widths);
    for line in store.lines() {
        let price = line.price.display(currency);
        let quantity = line.quantity.to_string();
        let subtotal = line.subtotal().display(currency);
        ctx.output.table_row(
            &[line.product_id.as_str(), &line.name, &price, &quantity, &subtotal],
            &widths,
        );
    }

    ctx.output.kv("items", &store.derived_count().to_string());
    ctx.output.kv("total", &store.derived_total().display(currency));

    let sellers = store.cart().sellers().len();
    if sellers > 1 {
        ctx.output.warn(&format!(
            "Cart holds products from {} sellers; checkout accepts one seller per payment",
            sellers
        ));
    }
    Ok(())
}

/// Print the item count, as shown on the header badge.
pub fn count(ctx: &Context) -> Result<()> {
    let store = ctx.open_cart()?;
    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "count": store.derived_count() }));
    } else {
        println!("{}", store.derived_count());
    }
    Ok(())
}
