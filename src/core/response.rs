//! Success envelope and JSON response rendering

use crate::core::ResourceType;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

/// Content type of every body the proxy emits
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Render a serializable value as a JSON response with an explicit charset
pub fn json_body<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => (
            status,
            [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize response body");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
                r#"{"success":false,"error":{"code":"INTERNAL_ERROR","message":"Serialization failed","details":{}}}"#,
            )
                .into_response()
        }
    }
}

/// Success envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<D, M> {
    pub success: bool,
    pub data: D,
    pub meta: M,
}

impl<D, M> ApiResponse<D, M> {
    pub fn ok(data: D, meta: M) -> Self {
        Self {
            success: true,
            data,
            meta,
        }
    }
}

/// Metadata for single-item responses
#[derive(Debug, Clone, Serialize)]
pub struct ItemMeta {
    pub resource: ResourceType,
    pub id: String,

    /// Name of the expanded field, present only when expansion was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<String>,
}

/// An item together with its resolved related items
#[derive(Debug, Clone, Serialize)]
pub struct ItemWithRelated {
    pub item: Value,
    pub related: Vec<Value>,
}

/// Metadata for collection responses
///
/// `count`, `next` and `previous` are echoed from the upstream page as-is
/// (null when the upstream omits them).
#[derive(Debug, Clone, Serialize)]
pub struct CollectionMeta {
    pub resource: ResourceType,
    pub count: Value,
    pub next: Value,
    pub previous: Value,

    /// Effective page token ("1" when the caller gave none)
    pub page: String,
    pub limit: Option<usize>,
    pub sort: Option<String>,
    pub fields: Option<Vec<String>>,
}

/// Every success shape the proxy can answer with
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ProxyResponse {
    Item(ApiResponse<Value, ItemMeta>),
    ItemWithRelated(ApiResponse<ItemWithRelated, ItemMeta>),
    Collection(ApiResponse<Vec<Value>, CollectionMeta>),
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        json_body(StatusCode::OK, &self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_meta_omits_related_when_absent() {
        let response = ProxyResponse::Item(ApiResponse::ok(
            json!({"name": "Luke Skywalker"}),
            ItemMeta {
                resource: ResourceType::People,
                id: "1".to_string(),
                related: None,
            },
        ));

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "success": true,
                "data": {"name": "Luke Skywalker"},
                "meta": {"resource": "people", "id": "1"}
            })
        );
    }

    #[test]
    fn test_collection_meta_serializes_nulls() {
        let meta = CollectionMeta {
            resource: ResourceType::Planets,
            count: json!(60),
            next: Value::Null,
            previous: Value::Null,
            page: "1".to_string(),
            limit: None,
            sort: None,
            fields: None,
        };
        let value = serde_json::to_value(&meta).unwrap();

        assert_eq!(value["resource"], "planets");
        assert_eq!(value["page"], "1");
        assert!(value["limit"].is_null());
        assert!(value["fields"].is_null());
    }

    #[test]
    fn test_json_body_sets_charset() {
        let response = json_body(StatusCode::OK, &json!({"ok": true}));
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            JSON_CONTENT_TYPE
        );
    }
}
