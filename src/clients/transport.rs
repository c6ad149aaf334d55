//! The transport seam between the resource layer and the network.
//!
//! Models and collections never talk to reqwest directly. They hold an
//! `Arc<dyn Transport>` and hand it fully-composed [`HttpRequest`]s. The
//! production implementation is [`HttpClient`](crate::clients::HttpClient);
//! tests substitute a scripted in-memory transport.

use std::fmt;

use async_trait::async_trait;

use crate::clients::errors::HttpError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::ResponseBody;

/// Sends one request and returns its decoded body.
///
/// # Contract
///
/// - Non-2xx responses are reported as an [`HttpError`], never as a body.
/// - A 2xx response with an empty body yields an empty JSON object.
/// - JSON bodies are decoded; `application/x-ustar` bodies are returned as
///   [`ResponseBody::Archive`].
/// - Retries, timeouts, TLS and authentication are the transport's business.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends `request` and returns the decoded response body.
    async fn request(&self, request: HttpRequest) -> Result<ResponseBody, HttpError>;
}

