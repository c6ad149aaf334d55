//! HTTP-specific error types for the Atlas client.
//!
//! Transports report every failure as an [`HttpError`]. Server rejections
//! keep the status code and the Atlas `errorCode`, so callers can branch on
//! either without parsing messages:
//!
//! ```rust,ignore
//! use atlas_client::clients::{HttpError, Transport};
//!
//! match transport.request(request).await {
//!     Ok(body) => handle(body),
//!     Err(HttpError::Response(e)) if e.error_code.as_deref() == Some("ATLAS-404-00-005") => {
//!         tracing::info!("entity is gone");
//!     }
//!     Err(HttpError::MaxRetries(e)) => {
//!         tracing::warn!("Atlas kept answering {} after {} tries", e.code, e.tries);
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```

use thiserror::Error;

/// A non-2xx answer from Atlas.
///
/// The message field contains JSON built from the Atlas error body. Atlas
/// reports failures as `{"errorCode": "...", "errorMessage": "..."}`; both
/// fields are carried over when present. Bodies that are not JSON are kept
/// under `raw_body`.
///
/// # Example
///
/// ```rust
/// use atlas_client::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: r#"{"errorCode":"ATLAS-404-00-005","errorMessage":"not found"}"#.to_string(),
///     error_code: Some("ATLAS-404-00-005".to_string()),
/// };
///
/// println!("Status {}: {}", error.code, error.message);
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// Response status.
    pub code: u16,
    /// The error body, re-serialized as compact JSON.
    pub message: String,
    /// The Atlas `errorCode` from the response body, if present.
    pub error_code: Option<String>,
}

/// Every attempt at a request failed with a retryable status.
///
/// Raised when a request keeps failing with 429, 500 or 503 responses after
/// all configured attempts have been made.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// Status of the last attempt.
    pub code: u16,
    /// Attempts made, including the first.
    pub tries: u32,
    /// The last error body, re-serialized as compact JSON.
    pub message: String,
    /// The Atlas `errorCode` from the last response body, if present.
    pub error_code: Option<String>,
}

/// A request rejected before it was sent.
///
/// ```rust
/// use atlas_client::clients::{HttpMethod, HttpRequest, InvalidHttpRequestError};
///
/// let result = HttpRequest::builder(HttpMethod::Get, "entity/guid/abc").build();
/// assert!(matches!(result, Err(InvalidHttpRequestError::InvalidUrl { .. })));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The request URL is not absolute.
    #[error("Invalid request URL '{url}'. Expected an absolute http(s) URL.")]
    InvalidUrl {
        /// The URL that was provided.
        url: String,
    },

    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Unified error type for all HTTP-related errors.
///
/// Every [`Transport`](crate::clients::Transport) reports failures through
/// this type, so callers can tell server rejections apart from connection
/// problems.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A 2xx response whose body could not be decoded.
    #[error("Invalid response body from {url}: {reason}")]
    InvalidBody {
        /// The URL that produced the body.
        url: String,
        /// Why decoding failed.
        reason: String,
    },
}

impl HttpError {
    /// Returns the HTTP status code if the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            _ => None,
        }
    }
}
