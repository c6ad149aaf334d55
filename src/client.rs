//! The Atlas client facade.
//!
//! [`Atlas`] is the entry point of the crate. It owns the transport and the
//! API root URL, hands out collections and models for every registered
//! entry point, and checks the server version.
//!
//! # Example
//!
//! ```rust,ignore
//! use atlas_client::{Atlas, AtlasConfig, BaseUrl, Password, ResourceName, Username};
//!
//! let config = AtlasConfig::builder()
//!     .base_url(BaseUrl::new("localhost", None, Some(21000))?)
//!     .credentials(Username::new("admin")?, Password::new("admin"))
//!     .build()?;
//! let atlas = Atlas::new(&config)?;
//! atlas.check_version().await?;
//!
//! let mut headers = atlas.collection(ResourceName::TypedefsHeaders);
//! for header in headers.all().await? {
//!     println!("{}", header.get("name").await?);
//! }
//! ```

use std::sync::Arc;

use serde_json::Value;

use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest, ResponseBody, Transport};
use crate::config::{AtlasConfig, ServerVersion};
use crate::resources::ResourceName;
use crate::rest::{Model, ModelCollection, ResourceError};

/// Path of the v2 REST API beneath the server URL.
pub const API_ROOT_PATH: &str = "/api/atlas/v2";

/// Path of the admin version endpoint beneath the server URL.
pub const VERSION_PATH: &str = "/api/atlas/admin/version";

/// Client for one Atlas server.
///
/// Cloning is cheap; clones share the transport.
#[derive(Debug, Clone)]
pub struct Atlas {
    transport: Arc<dyn Transport>,
    base_url: String,
    api_root: String,
}

// Verify Atlas is Send + Sync
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Atlas>();
};

impl Atlas {
    /// Creates a client backed by an [`HttpClient`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be built.
    pub fn new(config: &AtlasConfig) -> Result<Self, HttpError> {
        let transport = HttpClient::new(config)?;
        Ok(Self::with_transport(
            Arc::new(transport),
            config.base_url().as_ref(),
        ))
    }

    /// Creates a client over any transport.
    ///
    /// `base_url` is the server URL, e.g. `http://localhost:21000`.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let api_root = format!("{base_url}{API_ROOT_PATH}");
        Self {
            transport,
            base_url,
            api_root,
        }
    }

    /// Returns the server URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the v2 API root every resource URL starts with.
    #[must_use]
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Returns the shared transport.
    #[must_use]
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    /// Returns an unfetched collection for an entry point.
    #[must_use]
    pub fn collection(&self, name: ResourceName) -> ModelCollection {
        ModelCollection::new(name.kind(), self.transport(), self.api_root.as_str())
    }

    /// Returns an unfetched model of an entry point, keyed by `identifier`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MalformedRequest`] if the entry point is not
    /// addressable by identifier.
    pub fn model(&self, name: ResourceName, identifier: &str) -> Result<Model, ResourceError> {
        self.collection(name).model(identifier)
    }

    /// Resolves an entry point by its snake-case name.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownResource`] for unregistered names.
    pub fn resolve(&self, name: &str) -> Result<ModelCollection, ResourceError> {
        Ok(self.collection(name.parse()?))
    }

    /// Returns the entity with the given GUID, unfetched.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MalformedRequest`] if `guid` is empty.
    pub fn entity_guid(&self, guid: &str) -> Result<Model, ResourceError> {
        self.model(ResourceName::EntityGuid, guid)
    }

    /// Returns the type definitions collection.
    #[must_use]
    pub fn typedefs(&self) -> ModelCollection {
        self.collection(ResourceName::Typedefs)
    }

    /// Returns the bulk entity collection.
    #[must_use]
    pub fn entity_bulk(&self) -> ModelCollection {
        self.collection(ResourceName::EntityBulk)
    }

    /// Returns the entity creation collection.
    #[must_use]
    pub fn entity_post(&self) -> ModelCollection {
        self.collection(ResourceName::EntityPost)
    }

    /// Sends a raw request through the client's transport.
    ///
    /// # Errors
    ///
    /// Returns the transport error.
    pub async fn request(&self, request: HttpRequest) -> Result<ResponseBody, HttpError> {
        self.transport.request(request).await
    }

    /// Asks the server for its version.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedBody`] if the answer carries no
    /// parseable `Version` field, or the transport error.
    pub async fn version(&self) -> Result<ServerVersion, ResourceError> {
        let request = HttpRequest::builder(HttpMethod::Get, format!("{}{VERSION_PATH}", self.base_url))
            .build()
            .map_err(HttpError::from)?;
        let body = self.request(request).await?;
        let version = body
            .as_json()
            .and_then(|json| json.get("Version"))
            .and_then(Value::as_str)
            .ok_or_else(|| ResourceError::UnexpectedBody {
                resource: "AdminVersion",
                reason: "missing 'Version' field".to_string(),
            })?;
        version
            .parse()
            .map_err(|e: crate::error::ConfigError| ResourceError::UnexpectedBody {
                resource: "AdminVersion",
                reason: e.to_string(),
            })
    }

    /// Fails if the server is older than [`ServerVersion::OLDEST_SUPPORTED`].
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::VersionIncompatible`] for old servers, or
    /// any error from [`Atlas::version`].
    pub async fn check_version(&self) -> Result<ServerVersion, ResourceError> {
        let version = self.version().await?;
        if !version.is_supported() {
            tracing::warn!(
                "Atlas server at {} reports version {}, oldest supported is {}",
                self.base_url,
                version,
                ServerVersion::OLDEST_SUPPORTED
            );
            return Err(ResourceError::VersionIncompatible {
                found: version,
                minimum: ServerVersion::OLDEST_SUPPORTED,
            });
        }
        tracing::debug!("Atlas server version {}", version);
        Ok(version)
    }
}
