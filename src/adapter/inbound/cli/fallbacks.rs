//! Handlers for `fallbacks` commands.

use serde_json::json;

use super::catalog::describe;
use super::command::{FallbacksCommand, FallbacksSetArgs};
use super::output;
use crate::application::FallbackStore;
use crate::domain::ProductId;
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap::{self, Services};
use crate::infrastructure::config::settings::Config;
use crate::port::Catalog;

pub fn execute(command: &FallbacksCommand, config: &Config) -> Result<()> {
    let services = bootstrap::build(config)?;
    match command {
        FallbacksCommand::Set(args) => set(args, &services),
        FallbacksCommand::Show(args) => show(ProductId::try_new(args.id)?, &services.store),
        FallbacksCommand::Clear(args) => clear(ProductId::try_new(args.id)?, &services.store),
    }
}

fn set(args: &FallbacksSetArgs, services: &Services) -> Result<()> {
    let id = ProductId::try_new(args.id)?;
    if services.catalog.product(id)?.is_none() {
        return Err(Error::ProductNotFound(id.value()));
    }

    let stored = services.store.set_fallbacks(id, &args.ids)?;
    output::success(&format!(
        "Fallbacks for #{id}: {}",
        describe(stored.as_slice())
    ));

    for candidate in stored.iter() {
        if candidate == id {
            output::warning(&format!("#{id} lists itself; it is skipped when resolving"));
        } else if services.catalog.product(candidate)?.is_none() {
            output::warning(&format!("#{candidate} is not in the catalog"));
        }
    }
    Ok(())
}

fn show(id: ProductId, store: &FallbackStore) -> Result<()> {
    let fallbacks = store.get_fallbacks(id)?;
    output::data(
        "fallbacks",
        json!({ "product": id, "fallbacks": fallbacks }),
        describe(fallbacks.as_slice()),
    );
    Ok(())
}

fn clear(id: ProductId, store: &FallbackStore) -> Result<()> {
    if store.clear_fallbacks(id)? {
        output::success(&format!("Cleared fallbacks for #{id}"));
    } else {
        output::warning(&format!("#{id} had no fallbacks"));
    }
    Ok(())
}
