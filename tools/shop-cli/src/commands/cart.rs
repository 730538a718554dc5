//! Stored cart commands.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use serde::Serialize;
use shop_commerce::{Catalog, Money};
use shop_core::views::{CatalogView, CART_KEY};

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::price_cell;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CartCommand::Show => show_cart(ctx),
        CartCommand::Clear { yes } => clear_cart(yes, ctx),
    }
}

#[derive(Serialize)]
struct CartReport<'a> {
    lines: Vec<LineReport<'a>>,
    total: Money,
}

#[derive(Serialize)]
struct LineReport<'a> {
    id: u32,
    name: &'a str,
    unit_price: Money,
    quantity: u32,
    subtotal: Money,
}

fn show_cart(ctx: &Context) -> Result<()> {
    let cache = ctx.open_cache()?;
    let view = CatalogView::mount(
        Arc::new(Catalog::builtin()),
        cache,
        ctx.config.notice_delay(),
    );
    let cart = view.cart();
    let total = view.total_cost().context("Failed to compute cart total")?;

    if ctx.output.is_json() {
        let lines = cart
            .lines()
            .iter()
            .map(|line| {
                Ok(LineReport {
                    id: line.id().get(),
                    name: &line.product.name,
                    unit_price: line.product.price,
                    quantity: line.quantity,
                    subtotal: line.subtotal()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        ctx.output.json(&CartReport { lines, total });
        return Ok(());
    }

    ctx.output.header("Shopping Cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty!");
        return Ok(());
    }

    let widths = [4, 14, 9, 5, 10];
    ctx.output.table_row(&["ID", "NAME", "PRICE", "QTY", "SUBTOTAL"], &widths);
    for line in cart.lines() {
        let subtotal = line.subtotal()?;
        ctx.output.table_row(
            &[
                &line.id().to_string(),
                &line.product.name,
                &price_cell(&line.product.price, widths[2]),
                &line.quantity.to_string(),
                &price_cell(&subtotal, widths[4]),
            ],
            &widths,
        );
    }
    ctx.output.kv("Total Cost", &total.display());

    Ok(())
}

fn clear_cart(yes: bool, ctx: &Context) -> Result<()> {
    let cache = ctx.open_cache()?;

    if !cache.exists(CART_KEY)? {
        ctx.output.info("Cart is already empty");
        return Ok(());
    }

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt("Empty the stored cart?")
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }

    cache
        .delete(CART_KEY)
        .with_context(|| format!("Failed to update {}", ctx.storage_path().display()))?;
    tracing::info!("stored cart cleared");
    ctx.output.success("Cart cleared");
    Ok(())
}
