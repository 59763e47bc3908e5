//! Request orchestration
//!
//! [`ProxyService`] runs one request from raw query parameters to a success
//! envelope or a [`ProxyError`]. It is independent of the HTTP framework; the
//! axum handler in `server` only adapts its input and output.
//!
//! Each request is a single sequential pass: the primary upstream fetch
//! completes before any related-item fetch starts, and nothing is retained
//! between requests.

use crate::config::ProxyConfig;
use crate::core::error::{ProxyError, ProxyResult};
use crate::core::query::{ProxyQuery, QueryParams};
use crate::core::response::{
    ApiResponse, CollectionMeta, ItemMeta, ItemWithRelated, ProxyResponse,
};
use crate::core::shape::{apply_limit, filter_item_fields, filter_list_fields, sort_items};
use crate::related::resolve_related;
use crate::upstream::{CatalogClient, build_request};
use axum::http::Method;
use serde_json::Value;
use std::sync::Arc;

/// Page token reported when the caller did not ask for one
const DEFAULT_PAGE: &str = "1";

/// The request pipeline: validate, fetch, shape, expand
#[derive(Clone)]
pub struct ProxyService {
    config: Arc<ProxyConfig>,
    client: Arc<dyn CatalogClient>,
}

impl ProxyService {
    pub fn new(config: Arc<ProxyConfig>, client: Arc<dyn CatalogClient>) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Handle one inbound request
    ///
    /// Errors on the primary fetch are returned as-is; errors while resolving
    /// related items are absorbed.
    pub async fn handle(&self, method: &Method, params: &QueryParams) -> ProxyResult<ProxyResponse> {
        if *method != Method::GET {
            return Err(ProxyError::MethodNotAllowed {
                method: method.to_string(),
            });
        }

        let query = ProxyQuery::parse(params, &self.config)?;

        tracing::debug!(
            resource = %query.resource,
            id = ?query.id,
            related = ?query.related,
            "dispatching catalog request"
        );

        match query.id.clone() {
            Some(id) => self.fetch_item(&query, id).await,
            None => self.fetch_collection(&query).await,
        }
    }

    async fn fetch_item(&self, query: &ProxyQuery, id: String) -> ProxyResult<ProxyResponse> {
        let request = build_request(
            &self.config.upstream.base_url,
            query.resource,
            Some(&id),
            None,
            None,
        );
        let raw = self.client.fetch(&request).await?;

        let meta = ItemMeta {
            resource: query.resource,
            id,
            related: query.related.clone(),
        };

        let Some(related_field) = query.related.as_deref() else {
            let item = filter_item_fields(raw, query.fields());
            return Ok(ProxyResponse::Item(ApiResponse::ok(item, meta)));
        };

        // Reference URLs are read from the unprojected item
        let related = match raw.get(related_field) {
            Some(Value::Array(urls)) if !urls.is_empty() => {
                resolve_related(
                    self.client.as_ref(),
                    &self.config,
                    urls,
                    query.fields(),
                    query.limit,
                )
                .await
            }
            _ => Vec::new(),
        };

        let item = filter_item_fields(raw, query.fields());

        Ok(ProxyResponse::ItemWithRelated(ApiResponse::ok(
            ItemWithRelated { item, related },
            meta,
        )))
    }

    async fn fetch_collection(&self, query: &ProxyQuery) -> ProxyResult<ProxyResponse> {
        let request = build_request(
            &self.config.upstream.base_url,
            query.resource,
            None,
            query.search.as_deref(),
            query.page.as_deref(),
        );
        let mut page = self.client.fetch(&request).await?;

        let results = match page.get_mut("results").map(Value::take) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };

        // Order matters: sort reads the projected items
        let results = filter_list_fields(results, query.fields());
        let results = sort_items(results, query.sort.as_deref());
        let results = apply_limit(results, query.limit);

        let meta = CollectionMeta {
            resource: query.resource,
            count: take_field(&mut page, "count"),
            next: take_field(&mut page, "next"),
            previous: take_field(&mut page, "previous"),
            page: query.page.clone().unwrap_or_else(|| DEFAULT_PAGE.to_string()),
            limit: query.limit,
            sort: query.sort.clone(),
            fields: query.fields.clone(),
        };

        Ok(ProxyResponse::Collection(ApiResponse::ok(results, meta)))
    }
}

fn take_field(page: &mut Value, key: &str) -> Value {
    page.get_mut(key).map(Value::take).unwrap_or(Value::Null)
}
