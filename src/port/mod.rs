//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the seams between the fallback logic and the hosting
//! storefront. Adapters implement them for a concrete catalog backend.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!     render hooks   │      Application        │
//!   ───────────────▶ │  store · resolver ·     │
//!     (inbound)      │  view substitution      │
//!                    └───────────┬─────────────┘
//!                                │ (outbound)
//!            ┌───────────────────┼────────────────────┐
//!            ▼                   ▼                    ▼
//!      ┌───────────┐      ┌─────────────┐      ┌─────────────┐
//!      │ Metadata  │      │   Catalog   │      │    Host     │
//!      │   Store   │      │             │      │ Environment │
//!      └───────────┘      └─────────────┘      └─────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`MetadataStore`] - Per-product key/value metadata
//! - [`Catalog`] - Product lookup, permalinks and the bulk stock query
//! - [`HostEnvironment`] - Startup precondition for hook registration
//! - [`ViewHooks`] - Rendering-pipeline extension points exposed by the core

pub mod inbound;
pub mod outbound;

pub use inbound::view::{
    CollectionQuery, RenderDecision, Redirect, ViewContext, ViewHooks, ViewRequest,
};
pub use outbound::catalog::Catalog;
pub use outbound::host::HostEnvironment;
pub use outbound::metadata::MetadataStore;
