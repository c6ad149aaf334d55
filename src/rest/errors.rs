//! Resource-level error types.
//!
//! [`ResourceError`] is the error type of every model, collection and
//! [`Atlas`](crate::Atlas) operation. Protocol failures are wrapped from
//! [`HttpError`] unchanged; the remaining variants describe misuse of the
//! resource layer that is detected before anything is sent.
//!
//! # Error Handling
//!
//! - [`ResourceError::UnsupportedOperation`]: the kind does not accept the verb
//! - [`ResourceError::InsufficientIdentity`]: a field is missing and the model cannot be fetched
//! - [`ResourceError::FieldNotFound`]: the model was fetched and the field is still missing
//! - [`ResourceError::Http`]: the server or the network failed
//!
//! # Example
//!
//! ```rust,ignore
//! use atlas_client::ResourceError;
//!
//! match entity.get("status").await {
//!     Ok(status) => println!("status: {status}"),
//!     Err(e) if e.is_not_found() => println!("entity is gone"),
//!     Err(ResourceError::FieldNotFound { field, .. }) => println!("no field {field}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::HttpError;
use crate::config::ServerVersion;

/// Error type for resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The resource kind does not permit the requested operation.
    #[error("{resource} does not support the {operation} operation")]
    UnsupportedOperation {
        /// The kind name.
        resource: &'static str,
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// The request cannot be built from the given arguments.
    #[error("Malformed request for {resource}: {reason}")]
    MalformedRequest {
        /// The kind name.
        resource: &'static str,
        /// What is wrong with the arguments.
        reason: String,
    },

    /// A field was requested on a model that cannot be fetched.
    #[error("{resource} has no identity to fetch missing fields from")]
    InsufficientIdentity {
        /// The kind name.
        resource: &'static str,
    },

    /// The field is absent even after the model was fetched.
    #[error("{resource} has no field '{field}'")]
    FieldNotFound {
        /// The kind name.
        resource: &'static str,
        /// The requested field.
        field: String,
    },

    /// A dependent relationship was requested before its field was loaded.
    #[error("Relationship '{field}' of {resource} is not loaded")]
    RelationshipNotLoaded {
        /// The kind name.
        resource: &'static str,
        /// The relationship field.
        field: String,
    },

    /// A resource name did not match any entry point.
    #[error("Unknown resource '{name}'")]
    UnknownResource {
        /// The name that was looked up.
        name: String,
    },

    /// The server is older than the oldest supported release.
    #[error("Atlas version {found} unsupported, must be {minimum} or higher")]
    VersionIncompatible {
        /// The version the server reported.
        found: ServerVersion,
        /// The oldest supported version.
        minimum: ServerVersion,
    },

    /// A response body did not have the expected shape.
    #[error("Unexpected response for {resource}: {reason}")]
    UnexpectedBody {
        /// The kind name.
        resource: &'static str,
        /// What was wrong with the body.
        reason: String,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ResourceError {
    /// Returns the HTTP status code if the server answered with an error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Returns `true` if the server answered 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }

    pub(crate) fn unsupported(resource: &'static str, operation: &'static str) -> Self {
        Self::UnsupportedOperation {
            resource,
            operation,
        }
    }

    pub(crate) fn unexpected(resource: &'static str, reason: impl Into<String>) -> Self {
        Self::UnexpectedBody {
            resource,
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(resource: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedRequest {
            resource,
            reason: reason.into(),
        }
    }
}

// Verify ResourceError is Send + Sync
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
