//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// Default ports for the supported protocols.
const DEFAULT_PORTS: &[(&str, u16)] = &[("http", 80), ("https", 443)];

/// A validated Atlas server base URL of the form `protocol://host:port`.
///
/// The host may be given bare (`atlas.example.com`), with a port
/// (`atlas.example.com:21000`), or with a scheme
/// (`https://atlas.example.com`). Whatever is missing is filled in from the
/// explicit `protocol`/`port` arguments, then from the defaults (`http`, and
/// port 80 or 443 depending on the protocol). Any path after the host is
/// ignored.
///
/// # Example
///
/// ```rust
/// use atlas_client::BaseUrl;
///
/// let url = BaseUrl::new("localhost", None, Some(21000)).unwrap();
/// assert_eq!(url.as_ref(), "http://localhost:21000");
///
/// let url = BaseUrl::new("https://atlas.example.com", None, None).unwrap();
/// assert_eq!(url.as_ref(), "https://atlas.example.com:443");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    protocol: String,
    host: String,
    port: u16,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// Protocol and port embedded in `host` win over the explicit arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHost`] if no host name can be extracted,
    /// [`ConfigError::InvalidPort`] if an embedded port is not numeric, and
    /// [`ConfigError::UnsupportedProtocol`] for anything but `http`/`https`.
    pub fn new(
        host: impl Into<String>,
        protocol: Option<&str>,
        port: Option<u16>,
    ) -> Result<Self, ConfigError> {
        let raw = host.into();
        let invalid = || ConfigError::InvalidHost { host: raw.clone() };

        let (derived_protocol, rest) = match raw.find("://") {
            Some(idx) => {
                let scheme = &raw[..idx];
                if scheme.is_empty() || scheme.contains(':') {
                    return Err(invalid());
                }
                (Some(scheme.to_lowercase()), &raw[idx + 3..])
            }
            None => (None, raw.as_str()),
        };

        let host_end = rest.find(['/', ':']).unwrap_or(rest.len());
        let host_name = &rest[..host_end];
        if host_name.is_empty() {
            return Err(invalid());
        }

        let derived_port = match rest[host_end..].strip_prefix(':') {
            Some(after_colon) => {
                let port_str = after_colon.split('/').next().unwrap_or_default();
                let parsed = port_str
                    .parse::<u16>()
                    .ok()
                    .filter(|p| *p != 0)
                    .ok_or_else(|| ConfigError::InvalidPort {
                        port: port_str.to_string(),
                    })?;
                Some(parsed)
            }
            None => None,
        };

        let protocol = derived_protocol
            .or_else(|| protocol.map(str::to_lowercase))
            .unwrap_or_else(|| "http".to_string());
        let default_port = DEFAULT_PORTS
            .iter()
            .find(|(name, _)| *name == protocol)
            .map(|(_, port)| *port)
            .ok_or_else(|| ConfigError::UnsupportedProtocol {
                protocol: protocol.clone(),
            })?;
        let port = derived_port.or(port).unwrap_or(default_port);

        Ok(Self {
            url: format!("{protocol}://{host_name}:{port}"),
            protocol,
            host: host_name.to_string(),
            port,
        })
    }

    /// Returns the protocol (`http` or `https`).
    #[must_use]
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// Returns the host name without protocol or port.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// A validated, non-empty Atlas user name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Creates a new validated user name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUsername`] if the name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An Atlas password.
///
/// The `Debug` implementation masks the value, displaying only
/// `Password(*****)`, so configuration can be logged safely.
///
/// # Example
///
/// ```rust
/// use atlas_client::Password;
///
/// let password = Password::new("admin");
/// assert_eq!(format!("{:?}", password), "Password(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Wraps a password. Empty passwords are allowed.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(*****)")
    }
}
