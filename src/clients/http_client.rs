//! HTTP client for Atlas server communication.
//!
//! This module provides the [`HttpClient`] type, the reqwest-backed
//! [`Transport`] with authentication headers and automatic retry handling.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use base64::prelude::*;

use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::{HttpResponse, ResponseBody};
use crate::clients::transport::Transport;
use crate::config::AtlasConfig;

/// Fixed retry wait time in seconds.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Status codes that are retried while attempts remain.
const RETRYABLE_STATUS: [u16; 3] = [429, 500, 503];

/// HTTP client for making requests to an Atlas server.
///
/// The client handles:
/// - Default headers: `User-Agent`, `Accept`, `Content-Type`,
///   `X-Requested-By` and, when credentials are configured, basic
///   `Authorization`
/// - TLS verification and timeouts from [`AtlasConfig`]
/// - Automatic retry logic for 429, 500 and 503 responses
/// - Decoding of JSON and archive bodies
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use atlas_client::{AtlasConfig, BaseUrl};
/// use atlas_client::clients::{HttpClient, HttpMethod, HttpRequest, Transport};
///
/// let config = AtlasConfig::builder()
///     .base_url(BaseUrl::new("localhost", None, Some(21000)).unwrap())
///     .build()
///     .unwrap();
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(
///     HttpMethod::Get,
///     "http://localhost:21000/api/atlas/v2/types/typedefs/headers",
/// )
/// .build()?;
/// let body = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Attempts per request unless the request overrides it.
    default_tries: u32,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &AtlasConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Atlas Client Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert(
            "X-Requested-By".to_string(),
            config.identifier().to_string(),
        );

        if let Some((username, password)) = config.credentials() {
            let token = BASE64_STANDARD.encode(format!(
                "{}:{}",
                username.as_ref(),
                password.as_ref()
            ));
            default_headers.insert("Authorization".to_string(), format!("Basic {token}"));
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .danger_accept_invalid_certs(!config.validate_ssl())
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            default_headers,
            default_tries: config.max_retries().saturating_add(1),
        })
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the number of attempts made for requests that don't override it.
    #[must_use]
    pub const fn default_tries(&self) -> u32 {
        self.default_tries
    }

    /// Sends an HTTP request and returns the full response.
    ///
    /// This method handles request validation, header merging, body decoding
    /// and retry logic for 429, 500 and 503 responses.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - Max retries exceeded (`MaxRetries`)
    /// - A 2xx body is not valid JSON (`InvalidBody`)
    pub async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let mut headers = self.default_headers.clone();
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let max_tries = request.tries.unwrap_or(self.default_tries).max(1);
        let mut tries: u32 = 0;
        loop {
            tries += 1;
            tracing::debug!("Sending {} (attempt {})", request, tries);

            let mut req_builder = match request.http_method {
                HttpMethod::Get => self.client.get(&request.url),
                HttpMethod::Post => self.client.post(&request.url),
                HttpMethod::Put => self.client.put(&request.url),
                HttpMethod::Delete => self.client.delete(&request.url),
                HttpMethod::Head => self.client.head(&request.url),
            };

            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }

            if let Some(query) = &request.query {
                req_builder = req_builder.query(query);
            }

            if let Some(body) = &request.body {
                tracing::trace!("Request body: {}", body);
                req_builder = req_builder.body(body.to_string());
            }

            if let Some(timeout) = request.timeout {
                req_builder = req_builder.timeout(timeout);
            }

            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let bytes = res.bytes().await?;
            let body = Self::decode_body(code, &res_headers, &bytes, &request.url)?;
            let response = HttpResponse::new(code, res_headers, body);

            if response.is_ok() {
                if let ResponseBody::Json(value) = &response.body {
                    tracing::trace!("Response body: {}", value);
                }
                return Ok(response);
            }

            let error_message = Self::serialize_error(&response);
            let error_code = response.json_str("errorCode").map(String::from);

            if !RETRYABLE_STATUS.contains(&code) {
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message: error_message,
                    error_code,
                }));
            }

            if tries >= max_tries {
                if max_tries == 1 {
                    return Err(HttpError::Response(HttpResponseError {
                        code,
                        message: error_message,
                        error_code,
                    }));
                }
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: max_tries,
                    message: error_message,
                    error_code,
                }));
            }

            let delay = Self::calculate_retry_delay(&response, code);
            tracing::warn!(
                "Atlas returned {} for {}, retrying in {:?}",
                code,
                request.url,
                delay
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Decodes a raw body according to its status and content type.
    fn decode_body(
        code: u16,
        headers: &HashMap<String, Vec<String>>,
        bytes: &[u8],
        url: &str,
    ) -> Result<ResponseBody, HttpError> {
        if bytes.is_empty() {
            return Ok(ResponseBody::empty());
        }

        let content_type = headers
            .get("content-type")
            .and_then(|values| values.first())
            .map_or("", String::as_str);
        if content_type.starts_with(crate::clients::http_response::ARCHIVE_CONTENT_TYPE) {
            return Ok(ResponseBody::Archive(bytes.to_vec()));
        }
        if !content_type.is_empty() && !content_type.starts_with("application/json") {
            tracing::debug!("Unexpected content-type {} from {}", content_type, url);
        }

        match serde_json::from_slice(bytes) {
            Ok(value) => Ok(ResponseBody::Json(value)),
            Err(_) if !(200..=299).contains(&code) => Ok(ResponseBody::Json(
                serde_json::json!({ "raw_body": String::from_utf8_lossy(bytes) }),
            )),
            Err(e) => Err(HttpError::InvalidBody {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Calculates the retry delay based on response and status code.
    fn calculate_retry_delay(response: &HttpResponse, status: u16) -> Duration {
        // Only 429 honours Retry-After
        if status == 429 {
            if let Some(delay) = response
                .retry_request_after
                .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
            {
                return delay;
            }
        }
        Duration::from_secs(RETRY_WAIT_TIME)
    }

    /// Serializes an Atlas error response to a JSON message.
    fn serialize_error(response: &HttpResponse) -> String {
        let mut error_body = serde_json::Map::new();

        if let Some(body) = response.body.as_json() {
            for key in ["errorCode", "errorMessage", "error", "raw_body"] {
                if let Some(value) = body.get(key) {
                    error_body.insert(key.to_string(), value.clone());
                }
            }
        }

        serde_json::to_string(&error_body).unwrap_or_else(|_| "{}".to_string())
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn request(&self, request: HttpRequest) -> Result<ResponseBody, HttpError> {
        Ok(self.send(&request).await?.body)
    }
}
