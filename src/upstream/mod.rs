//! Upstream catalog access
//!
//! [`build_request`] turns a resource and optional identifiers into an
//! [`UpstreamRequest`]; a [`CatalogClient`] performs it and classifies the
//! outcome into the proxy's error taxonomy.

pub mod client;

pub use client::HttpCatalogClient;

use crate::core::ResourceType;
use crate::core::error::ProxyResult;
use async_trait::async_trait;
use serde_json::Value;

/// A fully-addressed upstream GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub url: String,

    /// Query parameters, in the order they are sent
    pub params: Vec<(String, String)>,
}

/// Build the upstream request for a resource
///
/// With an item identifier the URL addresses that single item and carries no
/// query parameters (`search`/`page` are ignored). Otherwise it addresses the
/// collection and forwards `search` and `page` when non-empty.
pub fn build_request(
    base_url: &str,
    resource: ResourceType,
    item_id: Option<&str>,
    search: Option<&str>,
    page: Option<&str>,
) -> UpstreamRequest {
    let base_url = base_url.trim_end_matches('/');

    if let Some(id) = item_id.filter(|id| !id.is_empty()) {
        return UpstreamRequest {
            url: format!("{}/{}/{}/", base_url, resource, id),
            params: Vec::new(),
        };
    }

    let mut params = Vec::new();
    if let Some(search) = search.filter(|s| !s.is_empty()) {
        params.push(("search".to_string(), search.to_string()));
    }
    if let Some(page) = page.filter(|p| !p.is_empty()) {
        params.push(("page".to_string(), page.to_string()));
    }

    UpstreamRequest {
        url: format!("{}/{}/", base_url, resource),
        params,
    }
}

/// Trait for fetching JSON documents from the upstream catalog
///
/// One call per request, no retries: a failed call is surfaced immediately.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Perform the request and return the parsed JSON body
    ///
    /// # Errors
    /// - `UpstreamUnavailable` on transport failure (timeout, connect, DNS)
    /// - `NotFound` on upstream 404
    /// - `UpstreamError` on any other status >= 400
    async fn fetch(&self, request: &UpstreamRequest) -> ProxyResult<Value>;
}
