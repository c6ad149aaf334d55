//! URL composition for Atlas resources.
//!
//! Atlas nests resources by plain path concatenation: an entity lives at
//! `{api_root}/entity/guid/{guid}`, its classifications at
//! `{entity_url}/classifications`, and a single classification at
//! `{entity_url}/classification/{typeName}`. Unique-attribute lookups add a
//! query of `attr:`-prefixed pairs.
//!
//! # Example
//!
//! ```rust
//! use atlas_client::rest::{resource_url, unique_attribute_url};
//!
//! let entity = resource_url(
//!     "http://localhost:21000/api/atlas/v2",
//!     "entity/guid",
//!     Some("8bbea92b-d98c-4613-ae6e-1a9d0b4f344b"),
//! );
//! assert_eq!(
//!     entity,
//!     "http://localhost:21000/api/atlas/v2/entity/guid/8bbea92b-d98c-4613-ae6e-1a9d0b4f344b"
//! );
//!
//! let lookup = unique_attribute_url(
//!     "http://localhost:21000/api/atlas/v2/entity/uniqueAttribute/type",
//!     "hive_table",
//!     &[("qualifiedName".to_string(), "db.t@cl".to_string())],
//! );
//! assert_eq!(
//!     lookup,
//!     "http://localhost:21000/api/atlas/v2/entity/uniqueAttribute/type/hive_table?attr:qualifiedName=db.t%40cl"
//! );
//! ```

use serde_json::{Map, Value};

use crate::clients::HttpMethod;

/// Operations that can be performed on a REST resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Load a single resource (GET {url}).
    Fetch,
    /// List a collection with filters (GET {collection}?{filters}).
    Filter,
    /// Create a resource (POST).
    Create,
    /// Update a resource (PUT).
    Update,
    /// Delete a resource (DELETE).
    Delete,
}

impl ResourceOperation {
    /// Returns the default HTTP method for this operation.
    #[must_use]
    pub const fn default_http_method(&self) -> HttpMethod {
        match self {
            Self::Fetch | Self::Filter => HttpMethod::Get,
            Self::Create => HttpMethod::Post,
            Self::Update => HttpMethod::Put,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Filter => "filter",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Joins an owner URL, a path segment and an optional identity.
///
/// Empty segments are skipped so a kind without a path resolves to its
/// owner's URL.
#[must_use]
pub fn resource_url(owner_url: &str, segment: &str, identity: Option<&str>) -> String {
    let mut url = owner_url.trim_end_matches('/').to_string();
    for part in [Some(segment), identity].into_iter().flatten() {
        let part = part.trim_matches('/');
        if part.is_empty() {
            continue;
        }
        url.push('/');
        url.push_str(part);
    }
    url
}

/// Builds a unique-attribute URL: `{collection}/{type_name}?attr:k=v&...`.
///
/// Keys are written literally after the `attr:` prefix, values are
/// percent-encoded, and the caller's order is preserved.
#[must_use]
pub fn unique_attribute_url(
    collection_url: &str,
    type_name: &str,
    attributes: &[(String, String)],
) -> String {
    let base = resource_url(collection_url, type_name, None);
    if attributes.is_empty() {
        return base;
    }
    let query = attributes
        .iter()
        .map(|(key, value)| format!("attr:{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{base}?{query}")
}

/// Flattens a JSON object of filters into query pairs.
///
/// Arrays become one pair per element (so `{"guid": ["A", "B"]}` encodes as
/// `guid=A&guid=B`), nulls are dropped, strings are used verbatim and any
/// other value is written as compact JSON.
#[must_use]
pub fn query_pairs(params: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in params {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = scalar_text(item) {
                        pairs.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = scalar_text(other) {
                    pairs.push((key.clone(), text));
                }
            }
        }
    }
    pairs
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

// Verify types are Send + Sync
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ROOT: &str = "http://localhost:21000/api/atlas/v2";

    #[test]
    fn test_operation_default_http_methods() {
        assert_eq!(ResourceOperation::Fetch.default_http_method(), HttpMethod::Get);
        assert_eq!(ResourceOperation::Filter.default_http_method(), HttpMethod::Get);
        assert_eq!(ResourceOperation::Create.default_http_method(), HttpMethod::Post);
        assert_eq!(ResourceOperation::Update.default_http_method(), HttpMethod::Put);
        assert_eq!(ResourceOperation::Delete.default_http_method(), HttpMethod::Delete);
    }

    #[test]
    fn test_operation_as_str() {
        assert_eq!(ResourceOperation::Fetch.as_str(), "fetch");
        assert_eq!(ResourceOperation::Delete.as_str(), "delete");
    }

    #[test]
    fn test_resource_url_joins_segments() {
        assert_eq!(
            resource_url(ROOT, "entity/guid", Some("abc")),
            format!("{ROOT}/entity/guid/abc")
        );
        assert_eq!(resource_url(ROOT, "types/typedefs", None), format!("{ROOT}/types/typedefs"));
    }

    #[test]
    fn test_resource_url_skips_empty_parts() {
        assert_eq!(resource_url(ROOT, "", None), ROOT);
        assert_eq!(resource_url(&format!("{ROOT}/"), "lineage", Some("g")), format!("{ROOT}/lineage/g"));
    }

    #[test]
    fn test_nested_resource_url() {
        let entity = resource_url(ROOT, "entity/guid", Some("g1"));
        assert_eq!(
            resource_url(&entity, "classification", Some("PII")),
            format!("{ROOT}/entity/guid/g1/classification/PII")
        );
    }

    #[test]
    fn test_unique_attribute_url_encodes_values_only() {
        let url = unique_attribute_url(
            &format!("{ROOT}/entity/uniqueAttribute/type"),
            "hive_db",
            &[
                ("qualifiedName".to_string(), "sales@primary".to_string()),
                ("name".to_string(), "a b".to_string()),
            ],
        );
        assert_eq!(
            url,
            format!(
                "{ROOT}/entity/uniqueAttribute/type/hive_db?attr:qualifiedName=sales%40primary&attr:name=a%20b"
            )
        );
    }

    #[test]
    fn test_query_pairs_repeats_arrays() {
        let params = json!({"guid": ["A", "B"]});
        let pairs = query_pairs(params.as_object().unwrap());
        assert_eq!(
            pairs,
            vec![
                ("guid".to_string(), "A".to_string()),
                ("guid".to_string(), "B".to_string())
            ]
        );
    }

    #[test]
    fn test_query_pairs_stringifies_scalars_and_drops_nulls() {
        let params = json!({"limit": 10, "excludeDeletedEntities": true, "skip": null});
        let pairs = query_pairs(params.as_object().unwrap());
        assert!(pairs.contains(&("limit".to_string(), "10".to_string())));
        assert!(pairs.contains(&("excludeDeletedEntities".to_string(), "true".to_string())));
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_query_pairs_keep_caller_order() {
        let params = json!({"typeName": "hive_table", "query": "sales*", "limit": 5});
        let keys: Vec<String> = query_pairs(params.as_object().unwrap())
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, vec!["typeName", "query", "limit"]);
    }
}
