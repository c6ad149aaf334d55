//! # Apache Atlas client for Rust
//!
//! An async client for the Apache Atlas metadata catalog REST API (v2),
//! built around lazily-loaded resources and static resource descriptors.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`AtlasConfig`] and [`AtlasConfigBuilder`]
//! - Validated newtypes for the server address and credentials
//! - An async HTTP transport with basic authentication, retries and Atlas
//!   error decoding ([`HttpClient`])
//! - The [`Atlas`] facade with a registry of every entry point ([`ResourceName`])
//! - [`Model`]s that fetch themselves on first field access, and
//!   [`ModelCollection`]s for filtering, iteration and bulk operations
//! - Server version checking
//!
//! ## Quick Start
//!
//! ```rust
//! use atlas_client::{AtlasConfig, BaseUrl, Password, Username};
//!
//! let config = AtlasConfig::builder()
//!     .base_url(BaseUrl::new("localhost", None, Some(21000)).unwrap())
//!     .credentials(Username::new("admin").unwrap(), Password::new("admin"))
//!     .identifier("my-pipeline")
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Working with entities
//!
//! ```rust,ignore
//! use atlas_client::Atlas;
//! use serde_json::Map;
//!
//! let atlas = Atlas::new(&config)?;
//!
//! // Nothing is sent until a missing field is read
//! let mut entity = atlas.entity_guid("8bbea92b-d98c-4613-ae6e-1a9d0b4f344b")?;
//! let status = entity.get("entity").await?["status"].clone();
//!
//! // Local edits, then one PUT with the whole payload
//! if let Some(inner) = entity.get_mut("entity") {
//!     inner["attributes"]["description"] = "curated".into();
//! }
//! entity.update(Map::new()).await?;
//!
//! // Remove a classification without listing the others first
//! entity.related("classifications", Some("PII"))?.delete().await?;
//! ```
//!
//! ## Type definitions
//!
//! ```rust,ignore
//! let mut typedefs = atlas.typedefs();
//! for typedef in typedefs.all().await? {
//!     for struct_def in typedef.relationship("structDefs").await? {
//!         println!("{}", struct_def.payload()["name"]);
//!     }
//! }
//! ```
//!
//! ## Logging
//!
//! The crate logs through [`tracing`]: requests and inflation at `debug`,
//! bodies at `trace`, retries and unsupported servers at `warn`. It never
//! installs a subscriber.
//!
//! ## Design Principles
//!
//! - **Data-driven resources**: every endpoint is a static [`rest::ResourceKind`]
//! - **Explicit registry**: entry points resolve through [`ResourceName`]
//! - **Fail-fast validation**: configuration newtypes validate on construction
//! - **Async-first**: every network operation is an `async fn`
//! - **Thread-safe**: the facade and transport are `Send + Sync`

pub mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod resources;
pub mod rest;
pub mod utils;

// Re-export public types at crate root for convenience
pub use client::Atlas;
pub use config::{
    AtlasConfig, AtlasConfigBuilder, BaseUrl, Password, ServerVersion, Username,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError, ResponseBody,
    Transport,
};

// Re-export resource types
pub use resources::ResourceName;
pub use rest::{Identity, InflationState, Model, ModelCollection, ResourceError};
