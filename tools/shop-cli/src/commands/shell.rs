//! Interactive storefront.

use anyhow::{bail, Result};
use dialoguer::{Input, Password, Select};
use shop_auth::FormErrors;
use shop_cache::Cache;
use shop_commerce::ProductId;
use shop_core::prelude::*;

use super::ShellArgs;
use crate::context::Context;
use crate::output::{cart_badge, price_cell};

/// What the loop does after a screen returns.
enum Step {
    Continue,
    Quit,
}

/// Run the shell command.
pub async fn run(args: ShellArgs, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        bail!("The shell is interactive and has no JSON output");
    }

    let cache = if args.ephemeral {
        ctx.output.debug("Using in-memory storage");
        Cache::memory()
    } else {
        ctx.open_cache()?
    };

    let mut app = Storefront::new(ctx.config.clone(), cache);
    if args.start != Route::Root.path() {
        app.navigate(&args.start);
    }

    loop {
        let step = match app.screen() {
            Screen::Register => register_screen(&mut app, ctx).await?,
            Screen::Login => login_screen(&mut app, ctx).await?,
            Screen::Catalog => catalog_screen(&mut app, ctx)?,
            Screen::NotFound => not_found_screen(&mut app, ctx)?,
        };
        if let Step::Quit = step {
            break;
        }
    }

    ctx.output.info("Goodbye!");
    Ok(())
}

async fn register_screen(app: &mut Storefront, ctx: &Context) -> Result<Step> {
    ctx.output.header("Sign Up");

    let choice = Select::new()
        .with_prompt("What next?")
        .items(&["Create account", "I already have an account", "Go to path...", "Quit"])
        .default(0)
        .interact()?;
    match choice {
        0 => {}
        1 => {
            app.navigate(Route::Login.path());
            return Ok(Step::Continue);
        }
        2 => return go_to_path(app, ctx),
        _ => return Ok(Step::Quit),
    }

    let name: String = Input::new()
        .with_prompt("Full Name")
        .allow_empty(true)
        .interact_text()?;
    let email: String = Input::new()
        .with_prompt("Email Address")
        .allow_empty(true)
        .interact_text()?;
    let password = Password::new()
        .with_prompt("Password")
        .allow_empty_password(true)
        .interact()?;

    let form = app.register_view()?;
    form.set_name(name);
    form.set_email(email);
    form.set_password(password);

    let outcome = app.submit()?;
    report_submission(app, ctx, outcome).await?;
    Ok(Step::Continue)
}

async fn login_screen(app: &mut Storefront, ctx: &Context) -> Result<Step> {
    ctx.output.header(Screen::Login.title());

    let choice = Select::new()
        .with_prompt("What next?")
        .items(&["Log in", "Sign up", "Go to path...", "Quit"])
        .default(0)
        .interact()?;
    match choice {
        0 => {}
        1 => {
            app.navigate(Route::Register.path());
            return Ok(Step::Continue);
        }
        2 => return go_to_path(app, ctx),
        _ => return Ok(Step::Quit),
    }

    let email: String = Input::new()
        .with_prompt("Email Address")
        .allow_empty(true)
        .interact_text()?;
    let password = Password::new()
        .with_prompt("Password")
        .allow_empty_password(true)
        .interact()?;

    let form = app.login_view()?;
    form.set_email(email);
    form.set_password(password);

    let outcome = app.submit()?;
    report_submission(app, ctx, outcome).await?;
    Ok(Step::Continue)
}

/// Print the form's feedback and, on success, wait out the redirect.
async fn report_submission(app: &mut Storefront, ctx: &Context, outcome: SubmitOutcome) -> Result<()> {
    let (errors, flash) = form_feedback(app);

    match outcome {
        SubmitOutcome::Invalid => {
            for (field, message) in errors.iter() {
                ctx.output.field_error(field.as_str(), message);
            }
        }
        SubmitOutcome::Rejected(_) => {
            if let Some(flash) = flash {
                ctx.output.error(&flash.text);
            }
            app.dismiss_flash();
        }
        SubmitOutcome::Accepted { redirect } => {
            if let Some(flash) = flash {
                ctx.output.success(&flash.text);
            }
            ctx.output
                .countdown(&format!("Redirecting to {redirect}..."), ctx.config.redirect_delay())
                .await;
            app.wait_for_redirect().await;
        }
    }
    Ok(())
}

fn form_feedback(app: &Storefront) -> (FormErrors, Option<Flash>) {
    match app.view() {
        ActiveView::Register(view) => (view.errors().clone(), view.flash().cloned()),
        ActiveView::Login(view) => (view.errors().clone(), view.flash().cloned()),
        _ => (FormErrors::new(), None),
    }
}

fn catalog_screen(app: &mut Storefront, ctx: &Context) -> Result<Step> {
    let profile = app.current_user().map(|user| {
        let since = user
            .registered_at()
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M");
        (user.name().to_string(), user.email().to_string(), since.to_string())
    });

    let view = app.catalog_view()?;

    ctx.output.header(Screen::Catalog.title());
    if let Some((name, email, since)) = profile {
        ctx.output.kv("user", &format!("{name} <{email}>"));
        ctx.output.kv("member since", &since);
    }
    ctx.output.kv("basket", &cart_badge(view.badge_count()));
    if let Some(notice) = view.notice() {
        ctx.output.success(&notice);
    }
    render_filters(view, ctx);
    render_products(view, ctx);

    let choice = Select::new()
        .with_prompt("What next?")
        .items(&[
            "Add to cart",
            "View cart",
            "Search by name",
            "Filter by category",
            "Set max price",
            "Clear filters",
            "Go to path...",
            "Log out",
            "Quit",
        ])
        .default(0)
        .interact()?;

    match choice {
        0 => add_to_cart(view, ctx)?,
        1 => cart_modal(view, ctx)?,
        2 => {
            let text: String = Input::new()
                .with_prompt("Search Products")
                .allow_empty(true)
                .interact_text()?;
            view.set_search(text);
        }
        3 => {
            let mut options = vec!["All categories".to_string()];
            options.extend(view.categories().into_iter().map(str::to_string));
            let picked = Select::new()
                .with_prompt("Category")
                .items(&options)
                .default(0)
                .interact()?;
            let category = if picked == 0 { String::new() } else { options[picked].clone() };
            view.set_category(category);
        }
        4 => {
            let input: String = Input::new()
                .with_prompt("Max price (blank for any)")
                .allow_empty(true)
                .interact_text()?;
            if let Err(e) = view.set_max_price_text(&input) {
                ctx.output.error(&e.to_string());
            }
        }
        5 => view.clear_filters(),
        6 => return go_to_path(app, ctx),
        7 => {
            app.logout();
            ctx.output.success("Logged out");
        }
        _ => return Ok(Step::Quit),
    }
    Ok(Step::Continue)
}

fn render_filters(view: &CatalogView, ctx: &Context) {
    let query = view.query();
    if query.is_empty() {
        return;
    }
    if let Some(text) = &query.text {
        ctx.output.kv("search", text);
    }
    if let Some(category) = &query.category {
        ctx.output.kv("category", category);
    }
    if let Some(max) = &query.max_price {
        ctx.output.kv("max price", &max.display_compact());
    }
}

fn render_products(view: &CatalogView, ctx: &Context) {
    let products = view.visible_products();
    if products.is_empty() {
        ctx.output.info("No products match the current filters");
        return;
    }

    let widths = [4, 14, 12, 9];
    ctx.output.table_row(&["ID", "NAME", "CATEGORY", "PRICE"], &widths);
    for product in products {
        ctx.output.table_row(
            &[
                &product.id.to_string(),
                &product.name,
                &product.category,
                &price_cell(&product.price, widths[3]),
            ],
            &widths,
        );
    }
}

fn add_to_cart(view: &mut CatalogView, ctx: &Context) -> Result<()> {
    let choices: Vec<(ProductId, String)> = view
        .visible_products()
        .iter()
        .map(|p| (p.id, format!("{} ({})", p.name, p.price.display_compact())))
        .collect();
    if choices.is_empty() {
        ctx.output.warn("Nothing to add");
        return Ok(());
    }

    let labels: Vec<&str> = choices.iter().map(|(_, label)| label.as_str()).collect();
    let picked = Select::new()
        .with_prompt("Add which product?")
        .items(&labels)
        .default(0)
        .interact()?;

    view.add_to_cart(choices[picked].0)?;
    if let Some(notice) = view.notice() {
        ctx.output.success(&notice);
    }
    Ok(())
}

fn cart_modal(view: &mut CatalogView, ctx: &Context) -> Result<()> {
    view.open_cart();

    while view.is_cart_open() {
        ctx.output.header("Shopping Cart");
        if view.cart().is_empty() {
            ctx.output.info("Your cart is empty!");
            view.close_cart();
            break;
        }

        let mut labels: Vec<String> = view
            .cart()
            .lines()
            .iter()
            .map(|line| {
                format!(
                    "{}  {} x {}",
                    line.product.name,
                    line.product.price.display_compact(),
                    line.quantity
                )
            })
            .collect();
        ctx.output.kv("Total Cost", &view.total_cost()?.display());
        labels.push("Close".to_string());

        let picked = Select::new()
            .with_prompt("Select an item")
            .items(&labels)
            .default(labels.len() - 1)
            .interact()?;
        let Some(line) = view.cart().lines().get(picked) else {
            view.close_cart();
            break;
        };
        let id = line.id();

        let action = Select::new()
            .with_prompt(line.product.name.as_str())
            .items(&["+", "-", "Remove", "Back"])
            .default(0)
            .interact()?;
        match action {
            0 => {
                view.update_quantity(id, 1);
            }
            1 => {
                view.update_quantity(id, -1);
            }
            2 => {
                view.remove_from_cart(id);
            }
            _ => {}
        }
    }
    Ok(())
}

fn not_found_screen(app: &mut Storefront, ctx: &Context) -> Result<Step> {
    ctx.output.header(Screen::NotFound.title());
    if let ActiveView::NotFound(path) = app.view() {
        ctx.output.warn(&format!("Nothing lives at {path}"));
    }

    let choice = Select::new()
        .with_prompt("What next?")
        .items(&["Go to login", "Go to path...", "Quit"])
        .default(0)
        .interact()?;
    match choice {
        0 => {
            app.navigate(Route::Login.path());
            Ok(Step::Continue)
        }
        1 => go_to_path(app, ctx),
        _ => Ok(Step::Quit),
    }
}

fn go_to_path(app: &mut Storefront, ctx: &Context) -> Result<Step> {
    let path: String = Input::new()
        .with_prompt("Path")
        .with_initial_text("/")
        .interact_text()?;
    if let Some(to) = app.navigate(path.trim()).landing() {
        ctx.output.warn(&format!("Redirected to {to}"));
    }
    Ok(Step::Continue)
}
