//! HTTP handlers for the proxy endpoint
//!
//! The handler only adapts axum extractors to [`ProxyService::handle`] and
//! renders the result; all request semantics live in the service.

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    http::Method,
    response::{IntoResponse, Response},
};

use crate::core::error::{ParamError, ProxyError};
use crate::core::query::QueryParams;
use crate::proxy::ProxyService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: ProxyService,
}

/// Proxy a catalog request
///
/// ANY / and ANY /swapi
///
/// Examples:
/// - GET /?resource=people&search=sky&fields=name,height&sort=-height&limit=5
/// - GET /?resource=films&id=1&related=characters&fields=name&limit=2
///
/// Every verb is routed here so non-GET requests receive the JSON 405 envelope.
pub async fn proxy_request(
    State(state): State<AppState>,
    method: Method,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let params = match query {
        Ok(Query(pairs)) => QueryParams::from_pairs(pairs),
        // The method check takes precedence over query decoding
        Err(_) if method != Method::GET => QueryParams::default(),
        Err(rejection) => {
            return ProxyError::from(ParamError::MalformedQuery {
                reason: rejection.body_text(),
            })
            .into_response();
        }
    };

    match state.service.handle(&method, &params).await {
        Ok(response) => response.into_response(),
        Err(e) => {
            tracing::debug!(code = e.error_code(), message = %e, "request failed");
            e.into_response()
        }
    }
}
