//! Named extension points of the storefront rendering pipeline.
//!
//! The storefront owns a [`HookRegistry`] and fires its extension points at
//! fixed moments of each request. [`attach`] wires any [`ViewHooks`]
//! implementation to those points and makes every callback fail open: an
//! error is logged and the original product renders untouched.

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::application::RequestScope;
use crate::domain::ProductSlot;
use crate::port::{CollectionQuery, RenderDecision, ViewContext, ViewHooks, ViewRequest};

/// Moments of the request lifecycle that accept callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionPoint {
    /// Before the primary render of a single-item request.
    TemplateRedirect,
    /// While an item's display representation is populated.
    ThePost,
    /// While a collection query is built.
    PreGetPosts,
}

impl ExtensionPoint {
    pub const ALL: [Self; 3] = [Self::TemplateRedirect, Self::ThePost, Self::PreGetPosts];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TemplateRedirect => "template_redirect",
            Self::ThePost => "the_post",
            Self::PreGetPosts => "pre_get_posts",
        }
    }
}

impl fmt::Display for ExtensionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type RedirectHook = Box<dyn Fn(&ViewRequest, &RequestScope) -> RenderDecision>;
type PopulateHook = Box<dyn Fn(&mut ProductSlot, ViewContext, &RequestScope)>;
type QueryHook = Box<dyn Fn(&mut CollectionQuery)>;

/// Callbacks registered per extension point, run in registration order.
#[derive(Default)]
pub struct HookRegistry {
    redirect: Vec<RedirectHook>,
    populate: Vec<PopulateHook>,
    query: Vec<QueryHook>,
}

impl HookRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_template_redirect<F>(&mut self, hook: F)
    where
        F: Fn(&ViewRequest, &RequestScope) -> RenderDecision + 'static,
    {
        self.redirect.push(Box::new(hook));
    }

    pub fn on_the_post<F>(&mut self, hook: F)
    where
        F: Fn(&mut ProductSlot, ViewContext, &RequestScope) + 'static,
    {
        self.populate.push(Box::new(hook));
    }

    pub fn on_pre_get_posts<F>(&mut self, hook: F)
    where
        F: Fn(&mut CollectionQuery) + 'static,
    {
        self.query.push(Box::new(hook));
    }

    /// Number of callbacks registered at `point`.
    #[must_use]
    pub fn registered(&self, point: ExtensionPoint) -> usize {
        match point {
            ExtensionPoint::TemplateRedirect => self.redirect.len(),
            ExtensionPoint::ThePost => self.populate.len(),
            ExtensionPoint::PreGetPosts => self.query.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        ExtensionPoint::ALL
            .iter()
            .all(|point| self.registered(*point) == 0)
    }

    /// Fire `template_redirect`. The first callback asking for a redirect
    /// halts the chain.
    #[must_use]
    pub fn template_redirect(&self, request: &ViewRequest, scope: &RequestScope) -> RenderDecision {
        for hook in &self.redirect {
            if let decision @ RenderDecision::Redirect(_) = hook(request, scope) {
                return decision;
            }
        }
        RenderDecision::Render
    }

    /// Fire `the_post` for one populated item.
    pub fn the_post(&self, slot: &mut ProductSlot, context: ViewContext, scope: &RequestScope) {
        for hook in &self.populate {
            hook(slot, context, scope);
        }
    }

    /// Fire `pre_get_posts` for a collection query.
    pub fn pre_get_posts(&self, query: &mut CollectionQuery) {
        for hook in &self.query {
            hook(query);
        }
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("template_redirect", &self.redirect.len())
            .field("the_post", &self.populate.len())
            .field("pre_get_posts", &self.query.len())
            .finish()
    }
}

/// Register `hooks` at all three extension points, failing open.
pub fn attach<H>(registry: &mut HookRegistry, hooks: Arc<H>)
where
    H: ViewHooks + 'static,
{
    let redirect = Arc::clone(&hooks);
    registry.on_template_redirect(move |request, scope| {
        match redirect.before_render(request, scope) {
            Ok(decision) => decision,
            Err(e) => {
                warn!(
                    product_id = ?request.product.map(|id| id.value()),
                    error = %e,
                    "Fallback redirect failed, rendering requested product"
                );
                RenderDecision::Render
            }
        }
    });

    let populate = Arc::clone(&hooks);
    registry.on_the_post(move |slot, context, scope| {
        if let Err(e) = populate.populate(slot, context, scope) {
            warn!(
                product_id = %slot.requested_id(),
                error = %e,
                "Fallback substitution failed, rendering requested product"
            );
        }
    });

    registry.on_pre_get_posts(move |query| hooks.filter_collection(query));
}
