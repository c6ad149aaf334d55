//! Atlas server version handling.
//!
//! This module provides the [`ServerVersion`] type used to compare the version
//! reported by a connected Atlas server against the oldest version this client
//! supports.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// A numeric `major.minor.patch` Atlas server version.
///
/// Atlas reports versions such as `2.3.0` or `1.1.0-SNAPSHOT`. Anything after
/// the first `-` is ignored, as are components past the third. Missing minor or
/// patch components default to zero. Versions order numerically.
///
/// # Example
///
/// ```rust
/// use atlas_client::ServerVersion;
///
/// let version: ServerVersion = "2.1.0-SNAPSHOT".parse().unwrap();
/// assert_eq!(version, ServerVersion::new(2, 1, 0));
/// assert!(version.is_supported());
/// assert_eq!(version.to_string(), "2.1.0");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServerVersion {
    major: u32,
    minor: u32,
    patch: u32,
}

impl ServerVersion {
    /// The oldest server version this client talks to.
    pub const OLDEST_SUPPORTED: Self = Self::new(1, 0, 0);

    /// Creates a version from its components.
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Returns the major component.
    #[must_use]
    pub const fn major(&self) -> u32 {
        self.major
    }

    /// Returns the minor component.
    #[must_use]
    pub const fn minor(&self) -> u32 {
        self.minor
    }

    /// Returns the patch component.
    #[must_use]
    pub const fn patch(&self) -> u32 {
        self.patch
    }

    /// Returns `true` if this version is at least [`Self::OLDEST_SUPPORTED`].
    #[must_use]
    pub fn is_supported(&self) -> bool {
        *self >= Self::OLDEST_SUPPORTED
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for ServerVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidVersion {
            version: s.to_string(),
        };

        let numeric = s.trim().split('-').next().unwrap_or_default();
        if numeric.is_empty() {
            return Err(invalid());
        }

        let mut parts = [0_u32; 3];
        for (slot, part) in parts.iter_mut().zip(numeric.split('.')) {
            *slot = part.parse().map_err(|_| invalid())?;
        }

        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}
