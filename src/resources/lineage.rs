//! Lineage of an entity.

use crate::rest::{CollectionFlavor, Dependence, Relationship, ResourceKind};

/// One edge of a lineage graph.
pub static LINEAGE_RELATION: ResourceKind = ResourceKind {
    name: "LineageRelation",
    fields: &["fromEntityId", "toEntityId", "relationshipId"],
    flavor: CollectionFlavor::Dependent,
    ..ResourceKind::BLANK
};

/// The lineage graph around an entity, addressed by the entity's GUID.
///
/// Fetch with `direction` (`INPUT`, `OUTPUT` or `BOTH`) and `depth` as query
/// parameters through [`ModelCollection::lookup`](crate::rest::ModelCollection::lookup).
pub static LINEAGE_GUID: ResourceKind = ResourceKind {
    name: "LineageGuid",
    path: "lineage",
    primary_key: Some("guid"),
    fields: &[
        "baseEntityGuid",
        "lineageDirection",
        "lineageDepth",
        "guidEntityMap",
        "relations",
    ],
    relationships: &[Relationship {
        field: "relations",
        kind: &LINEAGE_RELATION,
        dependence: Dependence::Dependent,
    }],
    ..ResourceKind::BLANK
};
