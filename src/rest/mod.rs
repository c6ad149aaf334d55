//! Generic REST resource machinery for Atlas.
//!
//! This module provides the data-driven resource layer every Atlas entry
//! point is built from:
//!
//! - **[`ResourceKind`]**: a static descriptor of one resource type
//! - **[`Model`]**: a single resource that fetches itself on first access
//! - **[`ModelCollection`]**: a group of models of one kind
//! - **URL composition**: [`resource_url`] and [`unique_attribute_url`]
//! - **[`ResourceError`]**: semantic error types for resource operations
//!
//! # Overview
//!
//! Concrete Atlas resources (entities, type definitions, lineage, search)
//! are described as [`ResourceKind`] values in [`crate::resources`]. Nothing
//! in this module knows about a specific resource.
//!
//! # Example
//!
//! ```rust,ignore
//! use atlas_client::{Atlas, ResourceName};
//!
//! let atlas = Atlas::new(&config)?;
//!
//! // One GET on first field access, none afterwards
//! let mut entity = atlas.entity_guid("8bbea92b-d98c-4613-ae6e-1a9d0b4f344b")?;
//! println!("{}", entity.get("entity").await?["status"]);
//!
//! // Nested dependent collections come straight from the payload
//! let mut typedefs = atlas.typedefs();
//! for typedef in typedefs.all().await? {
//!     for def in typedef.relationship("structDefs").await?.iter_mut() {
//!         println!("{}", def.get("name").await?);
//!     }
//! }
//! ```

mod codec;
mod collection;
mod errors;
mod kind;
mod model;
mod path;

pub use codec::{input_body, project, unwrap_envelope, wrap_envelope};
pub use collection::ModelCollection;
pub use errors::ResourceError;
pub use kind::{
    CollectionFlavor, Dependence, MutationTarget, Operations, Relationship, ResourceKind,
};
pub use model::{Identity, InflationState, Model};
pub use path::{query_pairs, resource_url, unique_attribute_url, ResourceOperation};
