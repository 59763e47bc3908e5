//! # SWAPI Proxy
//!
//! A read-only HTTP proxy over the Star Wars API that adds query-driven
//! response shaping on top of the upstream catalog.
//!
//! ## Features
//!
//! - **Field Projection**: `fields=name,height` keeps only the listed keys
//! - **Sorting**: `sort=height` or `sort=-height`, stable, missing keys rank lowest
//! - **Limiting**: `limit=1..50` caps collection size and related expansion
//! - **Related Expansion**: `related=characters` resolves an item's reference URLs
//! - **Uniform Envelope**: every answer is `{"success", "data", "meta"}` or
//!   `{"success": false, "error": {...}}`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use swapi_proxy::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ServerBuilder::new(ProxyConfig::default_config())
//!         .serve("0.0.0.0:8080")
//!         .await
//! }
//!
//! // GET /?resource=films&id=1&related=characters&fields=name&limit=2
//! ```

pub mod config;
pub mod core;
pub mod proxy;
pub mod related;
pub mod server;
pub mod upstream;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ApiResponse, ParamError, ProxyError, ProxyQuery, ProxyResponse, ProxyResult,
        QueryParams, ResourceType, SortSpec,
    };

    // === Pipeline ===
    pub use crate::proxy::ProxyService;
    pub use crate::related::resolve_related;
    pub use crate::upstream::{CatalogClient, HttpCatalogClient, UpstreamRequest, build_request};

    // === Config ===
    pub use crate::config::ProxyConfig;

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
}
