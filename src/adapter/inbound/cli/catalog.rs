//! Handlers for `product` commands.

use serde_json::json;

use super::command::{ProductAddArgs, ProductCommand, ProductListArgs, ProductStockArgs};
use super::output;
use crate::adapter::inbound::hooks::HookRegistry;
use crate::domain::{Product, ProductId, StockStatus};
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap::{self, Services};
use crate::infrastructure::config::settings::Config;
use crate::port::{Catalog, CollectionQuery};

pub fn execute(command: &ProductCommand, config: &Config) -> Result<()> {
    let services = bootstrap::build(config)?;
    match command {
        ProductCommand::Add(args) => add(args, &services),
        ProductCommand::Stock(args) => stock(args, &services),
        ProductCommand::Show(args) => show(ProductId::try_new(args.id)?, &services),
        ProductCommand::List(args) => list(args, &services),
    }
}

fn add(args: &ProductAddArgs, services: &Services) -> Result<()> {
    let product = Product::try_new(
        ProductId::try_new(args.id)?,
        args.name.trim(),
        args.slug.trim(),
        args.price,
        StockStatus::from(args.stock),
    )?
    .with_description(args.description.trim());

    services.catalog.save_product(&product)?;
    output::success(&format!("Saved product #{} ({})", product.id, product.name));
    Ok(())
}

fn stock(args: &ProductStockArgs, services: &Services) -> Result<()> {
    let id = ProductId::try_new(args.id)?;
    let status = StockStatus::from(args.status);
    services.catalog.set_stock_status(id, &status)?;
    output::success(&format!("Product #{id} is now {status}"));
    Ok(())
}

fn show(id: ProductId, services: &Services) -> Result<()> {
    let product = services
        .catalog
        .product(id)?
        .ok_or(Error::ProductNotFound(id.value()))?;
    let fallbacks = services.store.get_fallbacks(id)?;
    let permalink = services.catalog.permalink(id)?;

    if output::is_json() {
        output::data(
            "product",
            json!({
                "product": product,
                "permalink": permalink.as_ref().map(url::Url::as_str),
                "fallbacks": fallbacks,
            }),
            "",
        );
        return Ok(());
    }

    output::rendered(&product, None);
    if let Some(permalink) = permalink {
        output::field("URL", permalink);
    }
    output::field("Fallbacks", describe(fallbacks.as_slice()));
    Ok(())
}

fn list(args: &ProductListArgs, services: &Services) -> Result<()> {
    let mut query = CollectionQuery {
        admin: args.admin,
        ..CollectionQuery::products()
    };

    let mut registry = HookRegistry::new();
    bootstrap::register_hooks(&mut registry, services.catalog.as_ref(), services.view.clone());
    registry.pre_get_posts(&mut query);

    let products = services.catalog.list(&query)?;
    output::products(&products);
    Ok(())
}

/// Comma-separated ids, or "none".
pub(super) fn describe(ids: &[ProductId]) -> String {
    if ids.is_empty() {
        return "none".to_string();
    }
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
