//! Startup wiring.
//!
//! Builds the fallback component once from configuration and registers its
//! hooks with the storefront, guarded by the host precondition. Nothing here
//! is global: callers own what [`build`] returns.

use std::sync::Arc;

use tracing::{info, warn};

use super::config::settings::Config;
use crate::adapter::inbound::hooks::{attach, ExtensionPoint, HookRegistry};
use crate::adapter::outbound::sqlite::{open, DbPool, SqliteCatalog, SqliteMetadataStore};
use crate::application::{FallbackResolver, FallbackStore, ViewSubstitution};
use crate::error::Result;
use crate::port::HostEnvironment;

/// Everything a storefront process needs, built once at startup.
pub struct Services {
    pub pool: DbPool,
    pub catalog: Arc<SqliteCatalog>,
    pub store: FallbackStore,
    pub resolver: FallbackResolver,
    pub view: Arc<ViewSubstitution>,
}

/// Open the database and assemble the fallback component.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or migrated, or the
/// storefront URL is invalid.
pub fn build(config: &Config) -> Result<Services> {
    let pool = open(&config.database)?;
    let catalog = Arc::new(SqliteCatalog::new(pool.clone(), config.product_base_url()?));
    let metadata = Arc::new(SqliteMetadataStore::new(pool.clone()));

    let store = FallbackStore::new(metadata);
    let resolver = FallbackResolver::new(store.clone(), catalog.clone());
    let view = Arc::new(ViewSubstitution::new(
        resolver.clone(),
        catalog.clone(),
        config.substitution_policy(),
    ));

    info!(database = %config.database, "Fallback services ready");
    Ok(Services {
        pool,
        catalog,
        store,
        resolver,
        view,
    })
}

/// Register the view hooks when the host's commerce catalog is active.
///
/// Returns the number of callbacks registered; zero when the guard fails.
pub fn register_hooks(
    registry: &mut HookRegistry,
    host: &dyn HostEnvironment,
    view: Arc<ViewSubstitution>,
) -> usize {
    if !host.commerce_active() {
        warn!("Commerce catalog inactive, fallback hooks not registered");
        return 0;
    }

    let before: usize = ExtensionPoint::ALL
        .iter()
        .map(|point| registry.registered(*point))
        .sum();
    attach(registry, view);
    let after: usize = ExtensionPoint::ALL
        .iter()
        .map(|point| registry.registered(*point))
        .sum();

    info!(hooks = after - before, "Fallback hooks registered");
    after - before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::database::connection::MEMORY_URL;
    use crate::testkit::memory::MemoryCatalog;

    fn memory_config() -> Config {
        Config {
            database: MEMORY_URL.to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn build_opens_migrated_database() {
        let services = build(&memory_config()).unwrap();
        assert!(services.catalog.commerce_active());
        assert!(services.store.get_fallbacks(crate::testkit::domain::id(1)).unwrap().is_empty());
    }

    #[test]
    fn hooks_register_only_when_commerce_is_active() {
        let services = build(&memory_config()).unwrap();

        let inactive = MemoryCatalog::new();
        inactive.set_active(false);
        let mut registry = HookRegistry::new();
        assert_eq!(register_hooks(&mut registry, &inactive, services.view.clone()), 0);
        assert!(registry.is_empty());

        assert_eq!(
            register_hooks(&mut registry, services.catalog.as_ref(), services.view.clone()),
            3
        );
        assert_eq!(registry.registered(ExtensionPoint::TemplateRedirect), 1);
    }
}
