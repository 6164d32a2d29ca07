//! Handlers for `view`, `resolve` and `stock`.
//!
//! `view` replays one storefront request through the registered hooks:
//! `template_redirect` first, then `the_post` on the product slot.

use serde_json::json;

use super::catalog::describe;
use super::command::{ProductArg, ViewArgs};
use super::output;
use crate::adapter::inbound::hooks::HookRegistry;
use crate::application::RequestScope;
use crate::domain::{ProductId, ProductSlot};
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::{Catalog, RenderDecision, ViewRequest};

pub fn execute(args: &ViewArgs, config: &Config) -> Result<()> {
    let services = bootstrap::build(config)?;
    let id = ProductId::try_new(args.id)?;

    let mut registry = HookRegistry::new();
    bootstrap::register_hooks(&mut registry, services.catalog.as_ref(), services.view.clone());

    let request = if args.listing {
        ViewRequest::listing(id)
    } else {
        ViewRequest::single(id)
    };
    let scope = RequestScope::new();

    if let RenderDecision::Redirect(redirect) = registry.template_redirect(&request, &scope) {
        output::redirect(redirect.status, redirect.location.as_str());
        return Ok(());
    }

    let product = services
        .catalog
        .product(id)?
        .ok_or(Error::ProductNotFound(id.value()))?;
    let mut slot = ProductSlot::new(product);
    registry.the_post(&mut slot, request.context, &scope);

    let requested = slot.is_substituted().then(|| slot.requested_id().value());
    output::rendered(slot.current(), requested);
    Ok(())
}

pub fn resolve(args: &ProductArg, config: &Config) -> Result<()> {
    let services = bootstrap::build(config)?;
    let id = ProductId::try_new(args.id)?;

    let fallbacks = services.store.get_fallbacks(id)?;
    let status = services
        .catalog
        .stock_status(id)?
        .ok_or(Error::ProductNotFound(id.value()))?;
    let winner = services.resolver.resolve_fallback(id)?;
    // The view layer ignores fallbacks it cannot load.
    let loadable = match winner {
        Some(winner) => services.catalog.product(winner)?.is_some(),
        None => false,
    };

    if output::verbosity() > 0 && !output::is_json() {
        output::field("Stock", &status);
        output::field("Fallbacks", describe(fallbacks.as_slice()));
    }

    let applies = !status.is_in_stock() && loadable;
    let human = match winner {
        Some(winner) if applies => winner.to_string(),
        Some(winner) if !loadable => format!("{winner} (inactive: #{winner} is not in the catalog)"),
        Some(winner) => format!("{winner} (inactive: #{id} is in stock)"),
        None => "none".to_string(),
    };
    output::data(
        "resolve",
        json!({
            "product": id,
            "stock_status": status,
            "fallback": winner,
            "applies": applies,
        }),
        human,
    );
    Ok(())
}

pub fn stock(config: &Config) -> Result<()> {
    let services = bootstrap::build(config)?;
    let snapshot = services.resolver.get_out_of_stock_set()?;
    let ids = snapshot.sorted();

    output::data(
        "out_of_stock",
        json!({ "products": ids }),
        describe(&ids),
    );
    Ok(())
}

