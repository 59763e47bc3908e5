//! Response shaping: field projection, sorting and limiting
//!
//! Collection results pass through these steps in a fixed order:
//! [`filter_list_fields`], then [`sort_items`], then [`apply_limit`].
//! Sorting reads from the already-projected items.

use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Keep only the keys named in `fields`
///
/// Returns the item unchanged when no field list is given or the item is
/// not a JSON object. Never adds keys.
pub fn filter_item_fields(item: Value, fields: Option<&[String]>) -> Value {
    let Some(fields) = fields.filter(|f| !f.is_empty()) else {
        return item;
    };

    match item {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(k, _)| fields.iter().any(|f| f == k))
                .collect::<Map<String, Value>>(),
        ),
        other => other,
    }
}

/// Project every item, preserving order
pub fn filter_list_fields(items: Vec<Value>, fields: Option<&[String]>) -> Vec<Value> {
    items
        .into_iter()
        .map(|item| filter_item_fields(item, fields))
        .collect()
}

/// A parsed sort expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: String,
    pub descending: bool,
}

impl SortSpec {
    /// Parse `key` or `-key`; None when the key is empty
    pub fn parse(spec: &str) -> Option<Self> {
        let (key, descending) = match spec.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (spec, false),
        };

        if key.is_empty() {
            return None;
        }

        Some(Self {
            key: key.to_string(),
            descending,
        })
    }

    /// Compare two items by this key
    ///
    /// The key is compared as `(present, value)`: an item whose key is
    /// missing or null ranks below every item that has it. Descending order
    /// reverses the whole comparison, so absent items come last.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        let ordering = compare_keyed(a.get(&self.key), b.get(&self.key));
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Stable sort by a `key` / `-key` expression; no-op when empty
pub fn sort_items(mut items: Vec<Value>, sort: Option<&str>) -> Vec<Value> {
    let Some(spec) = sort.and_then(SortSpec::parse) else {
        return items;
    };

    items.sort_by(|a, b| spec.compare(a, b));
    items
}

/// Keep the first `limit` items
pub fn apply_limit(mut items: Vec<Value>, limit: Option<usize>) -> Vec<Value> {
    if let Some(n) = limit {
        items.truncate(n);
    }
    items
}

fn compare_keyed(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_values(a, b),
    }
}

/// Total order over non-null JSON values
///
/// Same-typed values compare naturally (strings lexicographically, numbers
/// numerically). Mixed types order by kind: bool < number < string < array < object.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => {
            for (l, r) in x.iter().zip(y.iter()) {
                let ord = compare_keyed(Some(l), Some(r));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        (Value::Object(x), Value::Object(y)) => x.len().cmp(&y.len()),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
