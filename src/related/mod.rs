//! Related-item expansion
//!
//! Resolves the reference URLs found on an item (e.g. a film's `characters`)
//! into the items they point to. Failures never propagate: a URL that points
//! outside the allowed resources, or whose fetch fails for any reason, is
//! simply left out of the result.

use crate::config::ProxyConfig;
use crate::core::ResourceType;
use crate::core::shape::filter_item_fields;
use crate::upstream::{CatalogClient, build_request};
use serde_json::Value;

/// Split a reference URL into its last two path segments
///
/// `https://swapi.dev/api/people/1/` → `("people", "1")`. Empty segments are
/// ignored, so trailing slashes do not matter.
pub fn extract_resource_and_id(url: &str) -> Option<(&str, &str)> {
    let mut segments = url.split('/').filter(|s| !s.is_empty()).rev();
    let id = segments.next()?;
    let resource = segments.next()?;
    Some((resource, id))
}

/// Resolve related URLs into projected items
///
/// At most `limit` URLs are consumed (`related.default_cap` when no limit is
/// given), in input order and one at a time. Skipped URLs still count toward
/// the cap. Every resolved item is projected through `fields`.
pub async fn resolve_related(
    client: &dyn CatalogClient,
    config: &ProxyConfig,
    urls: &[Value],
    fields: Option<&[String]>,
    limit: Option<usize>,
) -> Vec<Value> {
    let cap = limit.unwrap_or(config.related.default_cap);
    let mut related = Vec::new();

    for entry in urls.iter().take(cap) {
        let Some((resource, id)) = entry.as_str().and_then(|url| allowed_target(config, url))
        else {
            tracing::debug!(url = %entry, "skipping related reference outside allowed resources");
            continue;
        };

        let request = build_request(&config.upstream.base_url, resource, Some(id), None, None);

        match client.fetch(&request).await {
            Ok(item) => related.push(filter_item_fields(item, fields)),
            Err(e) => {
                tracing::warn!(
                    url = %request.url,
                    code = e.error_code(),
                    "dropping related item that failed to resolve"
                );
            }
        }
    }

    related
}

/// Parse a reference URL, keeping it only if it names an allowed resource and an id
fn allowed_target<'a>(config: &ProxyConfig, url: &'a str) -> Option<(ResourceType, &'a str)> {
    let (resource, id) = extract_resource_and_id(url)?;
    let resource = resource.parse::<ResourceType>().ok()?;
    config.is_allowed(resource).then_some((resource, id))
}
