//! View substitution: the redirect and content hooks.
//!
//! Per single-product request:
//!
//! ```text
//! Viewing-Requested-Product
//!   ├─ in stock ──────────────────────────▶ render
//!   └─ not in stock ─▶ resolve
//!        ├─ none / target unloadable ─────▶ render (original product)
//!        └─ fallback ─────────────────────▶ Redirecting (302 to fallback)
//! ```
//!
//! Content substitution runs the same check independently while a product
//! is populated for display and overwrites the slot in place.

use std::sync::Arc;

use tracing::{debug, info};

use super::resolver::FallbackResolver;
use super::scope::RequestScope;
use crate::domain::{ProductId, ProductSlot};
use crate::error::Result;
use crate::port::{
    Catalog, CollectionQuery, Redirect, RenderDecision, ViewContext, ViewHooks, ViewRequest,
};

/// Which hooks act, and what listings leave out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionPolicy {
    /// Redirect single-product views of out-of-stock products.
    pub redirect: bool,
    /// Overwrite populated products with their fallback's content.
    pub substitute_content: bool,
    /// Products hidden from public product listings.
    pub listing_exclude: Vec<ProductId>,
}

impl Default for SubstitutionPolicy {
    fn default() -> Self {
        Self {
            redirect: true,
            substitute_content: true,
            listing_exclude: Vec::new(),
        }
    }
}

/// The component wired into a storefront's rendering pipeline.
pub struct ViewSubstitution {
    resolver: FallbackResolver,
    catalog: Arc<dyn Catalog>,
    policy: SubstitutionPolicy,
}

impl ViewSubstitution {
    #[must_use]
    pub fn new(
        resolver: FallbackResolver,
        catalog: Arc<dyn Catalog>,
        policy: SubstitutionPolicy,
    ) -> Self {
        Self {
            resolver,
            catalog,
            policy,
        }
    }

    #[must_use]
    pub const fn resolver(&self) -> &FallbackResolver {
        &self.resolver
    }

    #[must_use]
    pub const fn policy(&self) -> &SubstitutionPolicy {
        &self.policy
    }

    /// Fallback that applies to `product`, if any.
    ///
    /// `None` for unknown products, in-stock products, and products whose
    /// list yields no candidate.
    pub fn applicable_fallback(
        &self,
        product: ProductId,
        scope: &RequestScope,
    ) -> Result<Option<ProductId>> {
        match self.catalog.stock_status(product)? {
            None => {
                debug!(product_id = %product, "Requested product not in catalog");
                Ok(None)
            }
            Some(status) if status.is_in_stock() => Ok(None),
            Some(status) => {
                debug!(product_id = %product, stock_status = %status, "Product not in stock");
                self.resolver.resolve_in(product, scope)
            }
        }
    }
}

impl ViewHooks for ViewSubstitution {
    fn before_render(
        &self,
        request: &ViewRequest,
        scope: &RequestScope,
    ) -> Result<RenderDecision> {
        if !self.policy.redirect || request.context != ViewContext::SingleProduct {
            return Ok(RenderDecision::Render);
        }
        let Some(product) = request.product else {
            return Ok(RenderDecision::Render);
        };
        let Some(fallback) = self.applicable_fallback(product, scope)? else {
            return Ok(RenderDecision::Render);
        };
        let Some(location) = self.catalog.permalink(fallback)? else {
            debug!(product_id = %product, fallback_id = %fallback, "Fallback has no permalink");
            return Ok(RenderDecision::Render);
        };

        info!(
            product_id = %product,
            fallback_id = %fallback,
            location = %location,
            "Redirecting to fallback"
        );
        Ok(RenderDecision::Redirect(Redirect::temporary(location)))
    }

    fn populate(
        &self,
        slot: &mut ProductSlot,
        context: ViewContext,
        scope: &RequestScope,
    ) -> Result<bool> {
        if !self.policy.substitute_content || context == ViewContext::Admin || slot.is_substituted()
        {
            return Ok(false);
        }

        let requested = slot.requested_id();
        let Some(fallback) = self.applicable_fallback(requested, scope)? else {
            return Ok(false);
        };
        let Some(substitute) = self.catalog.product(fallback)? else {
            debug!(product_id = %requested, fallback_id = %fallback, "Fallback product not found");
            return Ok(false);
        };

        debug!(product_id = %requested, fallback_id = %fallback, "Substituting product content");
        slot.overwrite_with(substitute);
        Ok(true)
    }

    fn filter_collection(&self, query: &mut CollectionQuery) {
        if query.admin || !query.selects_products() {
            return;
        }
        for id in &self.policy.listing_exclude {
            if !query.exclude.contains(id) {
                query.exclude.push(*id);
            }
        }
    }
}
