//! HTTP response types for the Atlas client.
//!
//! This module provides [`HttpResponse`], the raw status/headers/body triple
//! produced by [`HttpClient`](crate::clients::HttpClient), and
//! [`ResponseBody`], the decoded body every transport hands back.

use std::collections::HashMap;

use serde_json::Value;

/// Content type Atlas uses for exported archives.
pub const ARCHIVE_CONTENT_TYPE: &str = "application/x-ustar";

/// A decoded response body.
///
/// Atlas answers with JSON almost everywhere; export endpoints stream a tar
/// archive instead, which is handed back untouched.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseBody {
    /// A JSON document. An empty 2xx body decodes to an empty object.
    Json(Value),
    /// Raw bytes of an `application/x-ustar` archive.
    Archive(Vec<u8>),
}

impl ResponseBody {
    /// Returns an empty JSON object body.
    #[must_use]
    pub fn empty() -> Self {
        Self::Json(Value::Object(serde_json::Map::new()))
    }

    /// Returns the JSON value, if this is a JSON body.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Archive(_) => None,
        }
    }

    /// Consumes the body and returns the JSON value, if any.
    #[must_use]
    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Archive(_) => None,
        }
    }

    /// Returns `true` if this is an archive body.
    #[must_use]
    pub const fn is_archive(&self) -> bool {
        matches!(self, Self::Archive(_))
    }
}

impl From<Value> for ResponseBody {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// An HTTP response from an Atlas server.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The decoded response body.
    pub body: ResponseBody,
    /// Seconds to wait before retrying (from `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the `Retry-After` header.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: ResponseBody) -> Self {
        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|seconds| seconds.is_finite() && *seconds >= 0.0);

        Self {
            code,
            headers,
            body,
            retry_request_after,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the `Content-Type` header value, if present.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get("content-type")
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns `true` if the `Content-Type` header names a tar archive.
    #[must_use]
    pub fn is_archive_content(&self) -> bool {
        self.content_type()
            .is_some_and(|ct| ct.starts_with(ARCHIVE_CONTENT_TYPE))
    }

    /// Returns a top-level string field of a JSON body.
    #[must_use]
    pub fn json_str(&self, field: &str) -> Option<&str> {
        self.body.as_json()?.get(field)?.as_str()
    }
}
