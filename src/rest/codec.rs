//! JSON shaping between resource payloads and the wire.
//!
//! Atlas wraps some payloads under a kind-specific key (for example
//! `{"classifications": ...}`) and expects request bodies in the same shape.
//! These helpers apply and strip that envelope, assemble create/update
//! bodies, and send composed requests through a [`Transport`].

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::clients::{HttpError, HttpMethod, HttpRequest, ResponseBody, Transport};
use crate::rest::collection::ModelCollection;
use crate::rest::errors::ResourceError;
use crate::rest::kind::ResourceKind;
use crate::rest::model::Model;

/// Strips the kind's envelope from a response body.
///
/// Bodies without the envelope key are returned unchanged.
#[must_use]
pub fn unwrap_envelope(kind: &ResourceKind, value: Value) -> Value {
    match (kind.data_key, value) {
        (Some(key), Value::Object(mut map)) if map.contains_key(key) => {
            map.remove(key).unwrap_or(Value::Null)
        }
        (_, value) => value,
    }
}

/// Wraps a payload in the kind's envelope, if it has one.
#[must_use]
pub fn wrap_envelope(kind: &ResourceKind, payload: Map<String, Value>) -> Value {
    match kind.data_key {
        Some(key) => {
            let mut outer = Map::new();
            outer.insert(key.to_string(), Value::Object(payload));
            Value::Object(outer)
        }
        None => Value::Object(payload),
    }
}

/// Builds a create or update body from the current payload and the caller's fields.
///
/// For enveloped kinds, recognised fields go inside the envelope and any
/// other arguments travel at the top level beside it. Otherwise the body is
/// the current payload overlaid with the arguments.
#[must_use]
pub fn input_body(
    kind: &ResourceKind,
    current: &Map<String, Value>,
    fields: Map<String, Value>,
) -> Value {
    let Some(key) = kind.data_key else {
        let mut body = current.clone();
        body.extend(fields);
        return Value::Object(body);
    };

    let mut inner: Map<String, Value> = current
        .iter()
        .filter(|(name, _)| kind.is_field(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();
    let mut outer = Map::new();
    for (name, value) in fields {
        if kind.is_field(&name) {
            inner.insert(name, value);
        } else {
            outer.insert(name, value);
        }
    }
    outer.insert(key.to_string(), Value::Object(inner));
    Value::Object(outer)
}

/// Keeps the recognised fields of a payload.
///
/// Kinds that declare no fields keep everything.
#[must_use]
pub fn project(kind: &ResourceKind, payload: &Map<String, Value>) -> Value {
    if kind.fields.is_empty() {
        return Value::Object(payload.clone());
    }
    Value::Object(
        kind.fields
            .iter()
            .filter_map(|field| {
                payload
                    .get(*field)
                    .map(|value| ((*field).to_string(), value.clone()))
            })
            .collect(),
    )
}

/// Composes a request and sends it through `transport`.
pub(crate) async fn send(
    transport: &dyn Transport,
    method: HttpMethod,
    url: &str,
    query: &[(String, String)],
    body: Option<Value>,
) -> Result<ResponseBody, ResourceError> {
    let mut builder = HttpRequest::builder(method, url).query(query.to_vec());
    if let Some(body) = body {
        builder = builder.body(body);
    }
    let request = builder.build().map_err(HttpError::from)?;
    tracing::debug!("Sending {}", request);
    Ok(transport.request(request).await?)
}

/// Requires a JSON object body, after stripping the kind's envelope.
pub(crate) fn object_body(
    kind: &ResourceKind,
    body: ResponseBody,
) -> Result<Map<String, Value>, ResourceError> {
    let value = body
        .into_json()
        .ok_or_else(|| ResourceError::unexpected(kind.name, "expected JSON, got an archive"))?;
    match unwrap_envelope(kind, value) {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(ResourceError::unexpected(
            kind.name,
            format!("expected a JSON object, got {other}"),
        )),
    }
}

impl Serialize for Model {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl Serialize for ModelCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::kind::Operations;
    use serde_json::json;

    static ENVELOPED: ResourceKind = ResourceKind {
        name: "Classification",
        data_key: Some("classifications"),
        primary_key: Some("typeName"),
        fields: &["typeName", "attributes"],
        operations: Operations::ALL,
        ..ResourceKind::BLANK
    };

    static BARE: ResourceKind = ResourceKind {
        name: "Bare",
        ..ResourceKind::BLANK
    };

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_unwrap_envelope() {
        let body = json!({"classifications": {"typeName": "PII"}});
        assert_eq!(unwrap_envelope(&ENVELOPED, body), json!({"typeName": "PII"}));
    }

    #[test]
    fn test_unwrap_envelope_falls_back_to_whole_body() {
        let body = json!({"typeName": "PII"});
        assert_eq!(unwrap_envelope(&ENVELOPED, body.clone()), body);
        assert_eq!(unwrap_envelope(&BARE, body.clone()), body);
    }

    #[test]
    fn test_wrap_envelope() {
        let payload = object(json!({"typeName": "PII"}));
        assert_eq!(
            wrap_envelope(&ENVELOPED, payload.clone()),
            json!({"classifications": {"typeName": "PII"}})
        );
        assert_eq!(wrap_envelope(&BARE, payload), json!({"typeName": "PII"}));
    }

    #[test]
    fn test_input_body_splits_fields_and_arguments() {
        let body = input_body(
            &ENVELOPED,
            &Map::new(),
            object(json!({
                "typeName": "classtype2",
                "attributes": {"property1": {"name": "property1_name"}},
                "propagate": true
            })),
        );
        assert_eq!(
            body,
            json!({
                "classifications": {
                    "typeName": "classtype2",
                    "attributes": {"property1": {"name": "property1_name"}}
                },
                "propagate": true
            })
        );
    }

    #[test]
    fn test_input_body_merges_current_payload() {
        let current = object(json!({"typeName": "PII", "entityGuid": "g"}));
        let body = input_body(&ENVELOPED, &current, object(json!({"attributes": {}})));
        assert_eq!(
            body,
            json!({"classifications": {"typeName": "PII", "attributes": {}}})
        );
    }

    #[test]
    fn test_input_body_without_envelope_overlays_payload() {
        let current = object(json!({"a": 1, "b": 2}));
        let body = input_body(&BARE, &current, object(json!({"b": 3})));
        assert_eq!(body, json!({"a": 1, "b": 3}));
    }

    #[test]
    fn test_project_keeps_declared_fields() {
        let payload = object(json!({"typeName": "PII", "entityGuid": "g"}));
        assert_eq!(project(&ENVELOPED, &payload), json!({"typeName": "PII"}));
        assert_eq!(project(&BARE, &payload), Value::Object(payload));
    }

    #[test]
    fn test_object_body_rejects_archives_and_scalars() {
        assert!(matches!(
            object_body(&BARE, ResponseBody::Archive(vec![1])),
            Err(ResourceError::UnexpectedBody { .. })
        ));
        assert!(matches!(
            object_body(&BARE, ResponseBody::Json(json!([1]))),
            Err(ResourceError::UnexpectedBody { .. })
        ));
        assert_eq!(
            object_body(&ENVELOPED, json!({"classifications": {"typeName": "x"}}).into()).unwrap(),
            object(json!({"typeName": "x"}))
        );
    }
}
