//! Rendering-pipeline extension points exposed by the fallback core.
//!
//! A storefront calls these at three named points of its request
//! lifecycle. The adapter in `adapter::inbound::hooks` does the wiring.

use serde::Serialize;
use url::Url;

use crate::application::scope::RequestScope;
use crate::domain::{ProductId, ProductSlot};
use crate::error::Result;

/// Where a product is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewContext {
    /// The product's own page; the canonical single-item view.
    SingleProduct,
    /// Embedded in a listing, search result or widget.
    Listing,
    /// Back-office screens. Never rewritten.
    Admin,
}

/// An incoming content request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRequest {
    /// Product the request targets, if any.
    pub product: Option<ProductId>,
    pub context: ViewContext,
}

impl ViewRequest {
    #[must_use]
    pub const fn single(product: ProductId) -> Self {
        Self {
            product: Some(product),
            context: ViewContext::SingleProduct,
        }
    }

    #[must_use]
    pub const fn listing(product: ProductId) -> Self {
        Self {
            product: Some(product),
            context: ViewContext::Listing,
        }
    }
}

/// HTTP redirect issued instead of rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub location: Url,
    pub status: u16,
}

impl Redirect {
    /// Temporary redirect status. Stock changes, so the target is not permanent.
    pub const TEMPORARY: u16 = 302;

    #[must_use]
    pub const fn temporary(location: Url) -> Self {
        Self {
            location,
            status: Self::TEMPORARY,
        }
    }
}

/// Outcome of the pre-render hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderDecision {
    /// Render the requested product as normal.
    Render,
    /// Stop handling the request and redirect.
    Redirect(Redirect),
}

/// Listing query under construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollectionQuery {
    /// Post type the listing selects, if restricted.
    pub post_type: Option<String>,
    /// Ids to leave out of the results.
    pub exclude: Vec<ProductId>,
    /// Whether the query serves a back-office screen.
    pub admin: bool,
}

impl CollectionQuery {
    /// Post type of catalog products.
    pub const PRODUCT: &'static str = "product";

    /// Public listing of catalog products.
    #[must_use]
    pub fn products() -> Self {
        Self {
            post_type: Some(Self::PRODUCT.to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn selects_products(&self) -> bool {
        self.post_type.as_deref() == Some(Self::PRODUCT)
    }
}

/// Extension points a storefront invokes during rendering.
///
/// Each hook re-checks stock and re-resolves on its own; the only state
/// shared between them is the per-request [`RequestScope`].
pub trait ViewHooks {
    /// Before the primary render of a request. May ask for a redirect.
    fn before_render(&self, request: &ViewRequest, scope: &RequestScope)
        -> Result<RenderDecision>;

    /// While a product's display representation is populated. Returns
    /// `true` when the slot content was replaced by a fallback.
    fn populate(
        &self,
        slot: &mut ProductSlot,
        context: ViewContext,
        scope: &RequestScope,
    ) -> Result<bool>;

    /// While a listing query is built.
    fn filter_collection(&self, query: &mut CollectionQuery);
}
