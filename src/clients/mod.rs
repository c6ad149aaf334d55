//! HTTP client types for Atlas server communication.
//!
//! This module provides the transport layer the resource layer sits on.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`Transport`]: The async trait every model and collection sends requests through
//! - [`HttpClient`]: The reqwest-backed transport with authentication and retries
//! - [`HttpRequest`]: A request to be sent to the server
//! - [`HttpResponse`]: A raw response with status and headers
//! - [`ResponseBody`]: The decoded body a transport returns (JSON or archive bytes)
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE, HEAD)
//!
//! # Example
//!
//! ```rust,ignore
//! use atlas_client::{AtlasConfig, BaseUrl};
//! use atlas_client::clients::{HttpClient, HttpMethod, HttpRequest, Transport};
//!
//! let config = AtlasConfig::builder()
//!     .base_url(BaseUrl::new("localhost", None, Some(21000)).unwrap())
//!     .build()
//!     .unwrap();
//! let client = HttpClient::new(&config)?;
//!
//! let request = HttpRequest::builder(
//!     HttpMethod::Get,
//!     "http://localhost:21000/api/atlas/v2/entity/guid/8bbea92b-d98c-4613-ae6e-1a9d0b4f344b",
//! )
//! .build()?;
//!
//! let body = client.request(request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)**: Retries using `Retry-After` header value, or 1 second if not present
//! - **500 / 503**: Retries with fixed 1-second delay
//! - **Other errors (4xx)**: Returns immediately without retry
//!
//! The number of attempts is `max_retries + 1` from the configuration, and can
//! be overridden per request with `.tries(n)`.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, RETRY_WAIT_TIME, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, ResponseBody, ARCHIVE_CONTENT_TYPE};
pub use transport::Transport;
