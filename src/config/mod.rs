//! Configuration types for the Atlas client.
//!
//! This module provides the configuration used to connect to an Atlas server.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`AtlasConfig`]: The main configuration struct holding all connection settings
//! - [`AtlasConfigBuilder`]: A builder for constructing [`AtlasConfig`] instances
//! - [`BaseUrl`]: A validated `protocol://host:port` server address
//! - [`Username`]: A validated, non-empty user name
//! - [`Password`]: A password with masked debug output
//! - [`ServerVersion`]: A numeric server version, used by the version check
//!
//! # Example
//!
//! ```rust
//! use atlas_client::{AtlasConfig, BaseUrl, Password, Username};
//!
//! let config = AtlasConfig::builder()
//!     .base_url(BaseUrl::new("localhost", None, Some(21000)).unwrap())
//!     .credentials(Username::new("admin").unwrap(), Password::new("admin"))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "http://localhost:21000");
//! ```

mod newtypes;
mod version;

pub use newtypes::{BaseUrl, Password, Username};
pub use version::ServerVersion;

use crate::error::ConfigError;
use std::time::Duration;

/// Identifier sent in the `X-Requested-By` header when none is configured.
pub const DEFAULT_IDENTIFIER: &str = "atlas-client-rust";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Configuration for connecting to an Atlas server.
///
/// # Thread Safety
///
/// `AtlasConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use atlas_client::{AtlasConfig, BaseUrl};
/// use std::time::Duration;
///
/// let config = AtlasConfig::builder()
///     .base_url(BaseUrl::new("https://atlas.example.com", None, None).unwrap())
///     .timeout(Duration::from_secs(30))
///     .validate_ssl(false)
///     .build()
///     .unwrap();
///
/// assert!(!config.validate_ssl());
/// assert!(config.credentials().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct AtlasConfig {
    base_url: BaseUrl,
    credentials: Option<(Username, Password)>,
    identifier: String,
    validate_ssl: bool,
    timeout: Duration,
    max_retries: u32,
    user_agent_prefix: Option<String>,
}

impl AtlasConfig {
    /// Creates a new builder for constructing an `AtlasConfig`.
    #[must_use]
    pub fn builder() -> AtlasConfigBuilder {
        AtlasConfigBuilder::new()
    }

    /// Returns the server base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the basic-auth credentials, if configured.
    #[must_use]
    pub fn credentials(&self) -> Option<(&Username, &Password)> {
        self.credentials.as_ref().map(|(user, pass)| (user, pass))
    }

    /// Returns the client identifier sent as `X-Requested-By`.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns whether TLS certificates are verified.
    #[must_use]
    pub const fn validate_ssl(&self) -> bool {
        self.validate_ssl
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the number of retries after the first attempt.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify AtlasConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AtlasConfig>();
};

/// Builder for constructing [`AtlasConfig`] instances.
///
/// The only required field is `base_url`.
///
/// # Defaults
///
/// - `credentials`: `None` (no `Authorization` header)
/// - `identifier`: [`DEFAULT_IDENTIFIER`]
/// - `validate_ssl`: `true`
/// - `timeout`: 10 seconds
/// - `max_retries`: 5
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct AtlasConfigBuilder {
    base_url: Option<BaseUrl>,
    credentials: Option<(Username, Password)>,
    identifier: Option<String>,
    validate_ssl: Option<bool>,
    timeout: Option<Duration>,
    max_retries: Option<u32>,
    user_agent_prefix: Option<String>,
}

impl AtlasConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the server base URL (required).
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the basic-auth credentials.
    #[must_use]
    pub fn credentials(mut self, username: Username, password: Password) -> Self {
        self.credentials = Some((username, password));
        self
    }

    /// Sets the client identifier sent as `X-Requested-By`.
    #[must_use]
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Sets whether TLS certificates are verified.
    #[must_use]
    pub const fn validate_ssl(mut self, validate: bool) -> Self {
        self.validate_ssl = Some(validate);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the number of retries after the first attempt.
    #[must_use]
    pub const fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`AtlasConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set.
    pub fn build(self) -> Result<AtlasConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        Ok(AtlasConfig {
            base_url,
            credentials: self.credentials,
            identifier: self
                .identifier
                .unwrap_or_else(|| DEFAULT_IDENTIFIER.to_string()),
            validate_ssl: self.validate_ssl.unwrap_or(true),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local() -> BaseUrl {
        BaseUrl::new("localhost", None, Some(21000)).unwrap()
    }

    #[test]
    fn test_builder_requires_base_url() {
        let result = AtlasConfigBuilder::new().build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "base_url" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = AtlasConfig::builder().base_url(local()).build().unwrap();

        assert_eq!(config.identifier(), DEFAULT_IDENTIFIER);
        assert!(config.validate_ssl());
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.max_retries(), 5);
        assert!(config.credentials().is_none());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = AtlasConfig::builder()
            .base_url(local())
            .credentials(Username::new("admin").unwrap(), Password::new("admin"))
            .identifier("lineage-sync")
            .validate_ssl(false)
            .timeout(Duration::from_secs(3))
            .max_retries(0)
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        let (user, pass) = config.credentials().unwrap();
        assert_eq!(user.as_ref(), "admin");
        assert_eq!(pass.as_ref(), "admin");
        assert_eq!(config.identifier(), "lineage-sync");
        assert!(!config.validate_ssl());
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.max_retries(), 0);
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
    }

    #[test]
    fn test_config_debug_masks_password() {
        let config = AtlasConfig::builder()
            .base_url(local())
            .credentials(Username::new("admin").unwrap(), Password::new("hunter2"))
            .build()
            .unwrap();

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("AtlasConfig"));
        assert!(!debug_str.contains("hunter2"));
    }
}
