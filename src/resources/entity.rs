//! Entity resources: entities by GUID, bulk access, creation and
//! classifications.

use crate::rest::{
    CollectionFlavor, Dependence, MutationTarget, Operations, Relationship, ResourceKind,
};

/// A classification attached to an entity.
///
/// Listed at `{entity}/classifications`, addressed individually at
/// `{entity}/classification/{typeName}`. Creates and updates go to the
/// collection URL with an enveloped body.
pub static CLASSIFICATION: ResourceKind = ResourceKind {
    name: "Classification",
    path: "classification",
    collection_path: Some("classifications"),
    data_key: Some("classifications"),
    primary_key: Some("typeName"),
    fields: &["typeName", "attributes"],
    operations: Operations::ALL,
    bulk: Operations {
        create: true,
        update: true,
        delete: false,
    },
    bulk_key: Some("classifications"),
    mutation_target: MutationTarget::Collection,
    ..ResourceKind::BLANK
};

/// An entity embedded in another response.
pub static ENTITY: ResourceKind = ResourceKind {
    name: "Entity",
    fields: &[
        "guid",
        "typeName",
        "status",
        "createdBy",
        "updatedBy",
        "createTime",
        "updateTime",
        "version",
        "attributes",
        "classifications",
    ],
    flavor: CollectionFlavor::Dependent,
    ..ResourceKind::BLANK
};

/// An entity with its referred entities, addressed by GUID.
pub static ENTITY_GUID: ResourceKind = ResourceKind {
    name: "EntityGuid",
    path: "entity/guid",
    primary_key: Some("guid"),
    fields: &["entity", "referredEntities"],
    relationships: &[Relationship {
        field: "classifications",
        kind: &CLASSIFICATION,
        dependence: Dependence::Independent,
    }],
    operations: Operations {
        create: false,
        update: true,
        delete: true,
    },
    ..ResourceKind::BLANK
};

/// Entity creation endpoint, seeded with a literal request body.
pub static ENTITY_POST: ResourceKind = ResourceKind {
    name: "EntityPost",
    path: "entity",
    flavor: CollectionFlavor::LiteralSeeded,
    operations: Operations::CREATE_ONLY,
    ..ResourceKind::BLANK
};

/// Several entities fetched, created or deleted in one request.
///
/// Filtered with repeated `guid` parameters. The response is a single
/// `{"entities": [...], "referredEntities": {...}}` envelope, which is also
/// the default bulk create body.
pub static ENTITY_BULK: ResourceKind = ResourceKind {
    name: "EntityBulk",
    path: "entity/bulk",
    fields: &["entities", "referredEntities"],
    relationships: &[Relationship {
        field: "entities",
        kind: &ENTITY,
        dependence: Dependence::Dependent,
    }],
    flavor: CollectionFlavor::BulkBatched,
    bulk: Operations {
        create: true,
        update: false,
        delete: true,
    },
    ..ResourceKind::BLANK
};

/// Attaches classifications to several entities at once.
pub static ENTITY_BULK_CLASSIFICATION: ResourceKind = ResourceKind {
    name: "EntityBulkClassification",
    path: "entity/bulk/classification",
    flavor: CollectionFlavor::LiteralSeeded,
    operations: Operations::CREATE_ONLY,
    ..ResourceKind::BLANK
};

/// An entity addressed by type name and unique attributes.
pub static ENTITY_UNIQUE_ATTRIBUTE: ResourceKind = ResourceKind {
    name: "EntityUniqueAttribute",
    path: "entity/uniqueAttribute/type",
    fields: &["entity", "referredEntities"],
    flavor: CollectionFlavor::IdentifierAddressed,
    operations: Operations {
        create: false,
        update: true,
        delete: true,
    },
    ..ResourceKind::BLANK
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::ResourceOperation;

    #[test]
    fn test_classification_addressing() {
        assert_eq!(CLASSIFICATION.collection_segment(), "classifications");
        assert_eq!(CLASSIFICATION.path, "classification");
        assert_eq!(CLASSIFICATION.mutation_target, MutationTarget::Collection);
    }

    #[test]
    fn test_entity_guid_classifications_are_fetched() {
        let rel = ENTITY_GUID.relationship("classifications").unwrap();
        assert_eq!(rel.dependence, Dependence::Independent);
        assert_eq!(rel.kind, &CLASSIFICATION);
        assert!(!ENTITY_GUID.allows(ResourceOperation::Create));
    }

    #[test]
    fn test_entity_bulk_capabilities() {
        assert!(ENTITY_BULK.allows_bulk(ResourceOperation::Create));
        assert!(ENTITY_BULK.allows_bulk(ResourceOperation::Delete));
        assert!(!ENTITY_BULK.allows_bulk(ResourceOperation::Update));
        assert!(!ENTITY_BULK.allows(ResourceOperation::Delete));
    }
}
