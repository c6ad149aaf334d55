//! Relationship instances between entities.

use crate::rest::{CollectionFlavor, Operations, ResourceKind};

/// Relationship creation and update, seeded with a literal request body.
pub static RELATIONSHIP: ResourceKind = ResourceKind {
    name: "Relationship",
    path: "relationship",
    flavor: CollectionFlavor::LiteralSeeded,
    operations: Operations {
        create: true,
        update: true,
        delete: false,
    },
    ..ResourceKind::BLANK
};

/// A relationship instance by GUID.
pub static RELATIONSHIP_GUID: ResourceKind = ResourceKind {
    name: "RelationshipGuid",
    path: "relationship/guid",
    primary_key: Some("guid"),
    fields: &["relationship", "referredEntities"],
    operations: Operations::DELETE_ONLY,
    ..ResourceKind::BLANK
};
