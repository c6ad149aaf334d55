//! Error types for client configuration.
//!
//! This module contains the errors raised while building an
//! [`AtlasConfig`](crate::AtlasConfig) or one of its validated newtypes.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use atlas_client::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("", None, None);
//! assert!(matches!(result, Err(ConfigError::InvalidHost { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Host could not be parsed.
    #[error("Invalid Atlas host '{host}'. Expected format: 'host', 'host:port' or 'http://host:port'.")]
    InvalidHost {
        /// The invalid host that was provided.
        host: String,
    },

    /// Only `http` and `https` are supported.
    #[error("Unsupported protocol '{protocol}'. Expected 'http' or 'https'.")]
    UnsupportedProtocol {
        /// The protocol that was provided.
        protocol: String,
    },

    /// Port is not a valid TCP port number.
    #[error("Invalid port '{port}'. Expected a number between 1 and 65535.")]
    InvalidPort {
        /// The invalid port that was provided.
        port: String,
    },

    /// Username cannot be empty.
    #[error("Username cannot be empty. Omit credentials entirely for anonymous access.")]
    EmptyUsername,

    /// Server version string is invalid.
    #[error("Invalid server version '{version}'. Expected format: 'MAJOR.MINOR.PATCH' (e.g., '1.0.0').")]
    InvalidVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
