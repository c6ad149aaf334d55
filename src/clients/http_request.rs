//! HTTP request types for the Atlas client.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests against an Atlas server.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the Atlas REST API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Fetch a resource, a collection or a search result.
    Get,
    /// Create, including bulk and literal-body creates.
    Post,
    /// Update a resource or a whole collection document.
    Put,
    /// Delete, optionally carrying a body.
    Delete,
    /// Existence checks.
    Head,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
            Self::Head => write!(f, "head"),
        }
    }
}

/// An HTTP request to be sent to an Atlas server.
///
/// `url` is absolute; the resource layer composes it from the server root.
/// Query parameters are an ordered list so that repeated names
/// (`guid=A&guid=B`) survive.
///
/// # Example
///
/// ```rust
/// use atlas_client::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let get_request = HttpRequest::builder(
///     HttpMethod::Get,
///     "http://localhost:21000/api/atlas/v2/entity/bulk",
/// )
/// .query_param("guid", "A")
/// .query_param("guid", "B")
/// .build()
/// .unwrap();
/// assert_eq!(get_request.query_string().as_deref(), Some("guid=A&guid=B"));
///
/// let post_request = HttpRequest::builder(
///     HttpMethod::Post,
///     "http://localhost:21000/api/atlas/v2/entity",
/// )
/// .body(json!({"entity": {"typeName": "hive_table"}}))
/// .build()
/// .unwrap();
/// assert!(post_request.body.is_some());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The absolute URL for this request.
    pub url: String,
    /// The JSON request body, if any.
    pub body: Option<serde_json::Value>,
    /// Query parameters to append to the URL, in order.
    pub query: Option<Vec<(String, String)>>,
    /// Additional headers to include in the request.
    pub extra_headers: Option<HashMap<String, String>>,
    /// Number of attempts for this request, overriding the client default.
    pub tries: Option<u32>,
    /// Timeout for this request, overriding the client default.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `url` is not an absolute `http://` or `https://` URL
    /// - `http_method` is `Post` or `Put` but `body` is `None`
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(InvalidHttpRequestError::InvalidUrl {
                url: self.url.clone(),
            });
        }

        if matches!(self.http_method, HttpMethod::Post | HttpMethod::Put) && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }

    /// Returns the query parameters percent-encoded and `&`-joined.
    ///
    /// Returns `None` when the request has no query parameters.
    #[must_use]
    pub fn query_string(&self) -> Option<String> {
        let query = self.query.as_ref().filter(|q| !q.is_empty())?;
        Some(
            query
                .iter()
                .map(|(key, value)| {
                    format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
                })
                .collect::<Vec<_>>()
                .join("&"),
        )
    }

    /// Returns `Some(value)` for the first query parameter named `name`.
    #[must_use]
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .as_ref()?
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Display for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = self.http_method.to_string().to_uppercase();
        match self.query_string() {
            Some(query) => write!(f, "{method} {}?{query}", self.url),
            None => write!(f, "{method} {}", self.url),
        }
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    url: String,
    body: Option<serde_json::Value>,
    query: Option<Vec<(String, String)>>,
    extra_headers: Option<HashMap<String, String>>,
    tries: Option<u32>,
    timeout: Option<Duration>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            http_method: method,
            url: url.into(),
            body: None,
            query: None,
            extra_headers: None,
            tries: None,
            timeout: None,
        }
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets all query parameters at once.
    ///
    /// An empty list leaves the request without a query string.
    #[must_use]
    pub fn query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = if query.is_empty() { None } else { Some(query) };
        self
    }

    /// Appends a single query parameter. Repeated names are kept.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(Vec::new)
            .push((key.into(), value.into()));
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets the number of times to attempt the request.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    /// Sets the timeout for this request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            url: self.url,
            body: self.body,
            query: self.query,
            extra_headers: self.extra_headers,
            tries: self.tries,
            timeout: self.timeout,
        };
        request.verify()?;
        Ok(request)
    }
}
