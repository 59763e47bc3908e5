//! Query parameters and validation

use crate::config::ProxyConfig;
use crate::core::ResourceType;
use crate::core::error::ParamError;
use serde::Deserialize;
use std::borrow::Cow;
use std::num::IntErrorKind;

/// Raw query parameters, exactly as they arrive on the URL
///
/// # Example
/// ```text
/// GET /?resource=people&search=sky&fields=name,height&sort=-height&limit=5
/// GET /?resource=films&id=1&related=characters&fields=name&limit=2
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct QueryParams {
    /// Resource type (required)
    pub resource: Option<String>,

    /// Item identifier; switches to single-item mode
    pub id: Option<String>,

    /// Free-text search, forwarded upstream in collection mode
    pub search: Option<String>,

    /// Upstream page token, forwarded in collection mode
    pub page: Option<String>,

    /// Comma-separated field list for projection
    pub fields: Option<String>,

    /// Sort key; a leading `-` means descending
    pub sort: Option<String>,

    /// Result-count limit
    pub limit: Option<String>,

    /// Name of a field holding reference URLs to expand
    pub related: Option<String>,
}

impl QueryParams {
    /// Build from decoded query pairs
    ///
    /// When a key repeats, the first occurrence wins. Unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "resource" => &mut params.resource,
                "id" => &mut params.id,
                "search" => &mut params.search,
                "page" => &mut params.page,
                "fields" => &mut params.fields,
                "sort" => &mut params.sort,
                "limit" => &mut params.limit,
                "related" => &mut params.related,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

/// Validated request parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyQuery {
    pub resource: ResourceType,
    pub id: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub fields: Option<Vec<String>>,
    pub sort: Option<String>,
    pub limit: Option<usize>,
    pub related: Option<String>,
}

impl ProxyQuery {
    /// Trim, drop blanks, then validate `resource` and `limit`
    pub fn parse(params: &QueryParams, config: &ProxyConfig) -> Result<Self, ParamError> {
        let resource = parse_resource(non_blank(&params.resource), config)?;
        let fields = parse_fields(non_blank(&params.fields));
        let limit = parse_limit(non_blank(&params.limit), config)?;

        Ok(Self {
            resource,
            id: non_blank(&params.id).map(str::to_string),
            search: non_blank(&params.search).map(str::to_string),
            page: non_blank(&params.page).map(str::to_string),
            fields,
            sort: non_blank(&params.sort).map(str::to_string),
            limit,
            related: non_blank(&params.related).map(str::to_string),
        })
    }

    /// Field list as a slice, if one was given
    pub fn fields(&self) -> Option<&[String]> {
        self.fields.as_deref()
    }
}

/// Trimmed value, or None when missing or blank
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_resource(raw: Option<&str>, config: &ProxyConfig) -> Result<ResourceType, ParamError> {
    raw.and_then(|s| s.parse::<ResourceType>().ok())
        .filter(|r| config.is_allowed(*r))
        .ok_or_else(|| ParamError::InvalidResource {
            allowed: config.allowed_list(),
        })
}

/// Split a comma-separated list, dropping empty entries
pub fn parse_fields(raw: Option<&str>) -> Option<Vec<String>> {
    let fields: Vec<String> = raw?
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect();

    if fields.is_empty() { None } else { Some(fields) }
}

/// Parse `limit` as an integer within the configured bounds
pub fn parse_limit(raw: Option<&str>, config: &ProxyConfig) -> Result<Option<usize>, ParamError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let out_of_range = ParamError::LimitOutOfRange {
        min: config.limits.min,
        max: config.limits.max,
    };

    let Some(digits) = strip_digit_separators(raw) else {
        return Err(ParamError::LimitNotANumber);
    };

    let n = match digits.parse::<i64>() {
        Ok(n) => n,
        // Still an integer, just too large to represent
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            return Err(out_of_range);
        }
        Err(_) => return Err(ParamError::LimitNotANumber),
    };

    match usize::try_from(n) {
        Ok(n) if (config.limits.min..=config.limits.max).contains(&n) => Ok(Some(n)),
        _ => Err(out_of_range),
    }
}

/// Remove `_` separators, which are only allowed singly between two digits
fn strip_digit_separators(raw: &str) -> Option<Cow<'_, str>> {
    if !raw.contains('_') {
        return Some(Cow::Borrowed(raw));
    }

    let bytes = raw.as_bytes();
    let well_placed = bytes
        .iter()
        .enumerate()
        .filter(|(_, b)| **b == b'_')
        .all(|(i, _)| {
            i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)
        });

    well_placed.then(|| Cow::Owned(raw.replace('_', "")))
}
