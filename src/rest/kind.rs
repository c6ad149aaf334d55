//! Static resource descriptors.
//!
//! Every Atlas resource type is described once by a [`ResourceKind`]: where it
//! lives in the URL hierarchy, how its JSON is enveloped, which field
//! identifies it, which nested fields are themselves resources, and which
//! verbs it accepts. Models and collections are generic over these
//! descriptors; nothing about a concrete resource is encoded in their logic.
//!
//! Descriptors are plain `static` items, so relationships can point at other
//! descriptors by reference:
//!
//! ```rust
//! use atlas_client::rest::{CollectionFlavor, Dependence, Operations, Relationship, ResourceKind};
//!
//! static CONSTRAINT: ResourceKind = ResourceKind {
//!     name: "Constraint",
//!     fields: &["type", "params"],
//!     flavor: CollectionFlavor::Dependent,
//!     ..ResourceKind::BLANK
//! };
//!
//! static ATTRIBUTE_DEF: ResourceKind = ResourceKind {
//!     name: "AttributeDef",
//!     fields: &["name", "typeName", "constraints"],
//!     relationships: &[Relationship {
//!         field: "constraints",
//!         kind: &CONSTRAINT,
//!         dependence: Dependence::Dependent,
//!     }],
//!     flavor: CollectionFlavor::Dependent,
//!     ..ResourceKind::BLANK
//! };
//!
//! assert!(ATTRIBUTE_DEF.relationship("constraints").is_some());
//! assert!(!ATTRIBUTE_DEF.allows(atlas_client::rest::ResourceOperation::Delete));
//! ```

use crate::rest::path::ResourceOperation;

/// How a collection of a kind obtains its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionFlavor {
    /// Issues its own GET against the collection URL, filters as query.
    Queryable,
    /// Materialized from a parent model's already-loaded payload.
    Dependent,
    /// Holds exactly one caller-supplied literal payload, never fetches.
    LiteralSeeded,
    /// Addressed by type name plus `attr:` unique attributes.
    IdentifierAddressed,
    /// Queryable, and mutated as a whole through one bulk request.
    BulkBatched,
}

/// The mutating verbs a kind accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operations {
    /// POST is allowed.
    pub create: bool,
    /// PUT is allowed.
    pub update: bool,
    /// DELETE is allowed.
    pub delete: bool,
}

impl Operations {
    /// Create, update and delete.
    pub const ALL: Self = Self {
        create: true,
        update: true,
        delete: true,
    };

    /// Read-only.
    pub const NONE: Self = Self {
        create: false,
        update: false,
        delete: false,
    };

    /// Create only.
    pub const CREATE_ONLY: Self = Self {
        create: true,
        update: false,
        delete: false,
    };

    /// Delete only.
    pub const DELETE_ONLY: Self = Self {
        create: false,
        update: false,
        delete: true,
    };

    /// Returns `true` if `operation` is permitted. Reads are always permitted.
    #[must_use]
    pub const fn allows(&self, operation: ResourceOperation) -> bool {
        match operation {
            ResourceOperation::Fetch | ResourceOperation::Filter => true,
            ResourceOperation::Create => self.create,
            ResourceOperation::Update => self.update,
            ResourceOperation::Delete => self.delete,
        }
    }
}

/// Where create and update requests for a model are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationTarget {
    /// The model's own URL.
    Model,
    /// The URL of the collection the model belongs to.
    Collection,
}

/// Whether a relationship is read from the parent payload or fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dependence {
    /// Built from the parent's payload, no request.
    Dependent,
    /// Fetched from beneath the parent's URL on first access.
    Independent,
}

/// A named nested resource on a kind.
#[derive(Debug, Clone, Copy)]
pub struct Relationship {
    /// The payload field holding (or naming) the nested resource.
    pub field: &'static str,
    /// The kind of the nested resource.
    pub kind: &'static ResourceKind,
    /// How the nested collection is obtained.
    pub dependence: Dependence,
}

/// Static descriptor of one REST resource type.
#[derive(Debug, Clone, Copy)]
pub struct ResourceKind {
    /// Human-readable name used in errors and logs.
    pub name: &'static str,
    /// URL segment of a single instance, without leading or trailing slash.
    pub path: &'static str,
    /// URL segment of the collection when it differs from `path`.
    pub collection_path: Option<&'static str>,
    /// JSON key wrapping this kind's payload in requests and responses.
    pub data_key: Option<&'static str>,
    /// Field holding the identifier used in the instance URL.
    pub primary_key: Option<&'static str>,
    /// Recognised fields, in order.
    pub fields: &'static [&'static str],
    /// Nested resources.
    pub relationships: &'static [Relationship],
    /// How collections of this kind obtain members.
    pub flavor: CollectionFlavor,
    /// Verbs accepted on a single instance.
    pub operations: Operations,
    /// Verbs accepted on the collection as a whole.
    pub bulk: Operations,
    /// JSON key wrapping member projections in bulk bodies.
    pub bulk_key: Option<&'static str>,
    /// Where create and update are sent.
    pub mutation_target: MutationTarget,
    /// DELETE carries the current payload as its body.
    pub delete_with_body: bool,
}

impl ResourceKind {
    /// A read-only, queryable, unaddressable kind to build descriptors from.
    pub const BLANK: Self = Self {
        name: "",
        path: "",
        collection_path: None,
        data_key: None,
        primary_key: None,
        fields: &[],
        relationships: &[],
        flavor: CollectionFlavor::Queryable,
        operations: Operations::NONE,
        bulk: Operations::NONE,
        bulk_key: None,
        mutation_target: MutationTarget::Model,
        delete_with_body: false,
    };

    /// Returns the collection URL segment.
    #[must_use]
    pub const fn collection_segment(&self) -> &'static str {
        match self.collection_path {
            Some(path) => path,
            None => self.path,
        }
    }

    /// Returns the relationship declared on `field`, if any.
    #[must_use]
    pub fn relationship(&self, field: &str) -> Option<&'static Relationship> {
        let relationships: &'static [Relationship] = self.relationships;
        relationships.iter().find(|r| r.field == field)
    }

    /// Returns `true` if `field` is a recognised field of this kind.
    #[must_use]
    pub fn is_field(&self, field: &str) -> bool {
        self.fields.contains(&field)
    }

    /// Returns `true` if `operation` is allowed on a single instance.
    #[must_use]
    pub const fn allows(&self, operation: ResourceOperation) -> bool {
        self.operations.allows(operation)
    }

    /// Returns `true` if `operation` is allowed on the whole collection.
    #[must_use]
    pub const fn allows_bulk(&self, operation: ResourceOperation) -> bool {
        match operation {
            ResourceOperation::Fetch | ResourceOperation::Filter => true,
            _ => self.bulk.allows(operation),
        }
    }
}

impl PartialEq for ResourceKind {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ResourceKind {}

// Verify descriptors can live in statics
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceKind>();
};
