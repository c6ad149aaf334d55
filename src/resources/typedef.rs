//! Type system resources.
//!
//! `types/typedefs` returns every type definition grouped by category. Each
//! group, and every nested attribute, element and constraint, is a dependent
//! collection built straight from that one response. Individual definitions
//! can also be fetched by GUID or by name.

use crate::rest::{CollectionFlavor, Dependence, Operations, Relationship, ResourceKind};

const fn dependent(field: &'static str, kind: &'static ResourceKind) -> Relationship {
    Relationship {
        field,
        kind,
        dependence: Dependence::Dependent,
    }
}

const DEF_FIELDS: &[&str] = &[
    "category",
    "guid",
    "name",
    "description",
    "typeVersion",
    "version",
    "createdBy",
    "updatedBy",
    "createTime",
    "updateTime",
    "options",
];

/// A constraint on an attribute definition.
pub static CONSTRAINT: ResourceKind = ResourceKind {
    name: "Constraint",
    fields: &["type", "params"],
    flavor: CollectionFlavor::Dependent,
    ..ResourceKind::BLANK
};

/// An attribute of a struct, classification, entity or relationship type.
pub static ATTRIBUTE_DEF: ResourceKind = ResourceKind {
    name: "AttributeDef",
    fields: &[
        "name",
        "typeName",
        "isOptional",
        "cardinality",
        "valuesMinCount",
        "valuesMaxCount",
        "isUnique",
        "isIndexable",
        "includeInNotification",
        "defaultValue",
        "description",
        "constraints",
    ],
    relationships: &[dependent("constraints", &CONSTRAINT)],
    flavor: CollectionFlavor::Dependent,
    ..ResourceKind::BLANK
};

/// One value of an enum type.
pub static ENUM_ELEMENT_DEF: ResourceKind = ResourceKind {
    name: "EnumElementDef",
    fields: &["value", "description", "ordinal"],
    flavor: CollectionFlavor::Dependent,
    ..ResourceKind::BLANK
};

/// One end of a relationship type.
pub static RELATIONSHIP_END_DEF: ResourceKind = ResourceKind {
    name: "RelationshipEndDef",
    fields: &[
        "type",
        "name",
        "isContainer",
        "cardinality",
        "isLegacyAttribute",
        "description",
    ],
    flavor: CollectionFlavor::Dependent,
    ..ResourceKind::BLANK
};

/// An enum type definition.
pub static ENUM_DEF: ResourceKind = ResourceKind {
    name: "EnumDef",
    fields: DEF_FIELDS,
    relationships: &[dependent("elementDefs", &ENUM_ELEMENT_DEF)],
    flavor: CollectionFlavor::Dependent,
    ..ResourceKind::BLANK
};

/// A struct type definition.
pub static STRUCT_DEF: ResourceKind = ResourceKind {
    name: "StructDef",
    fields: DEF_FIELDS,
    relationships: &[dependent("attributeDefs", &ATTRIBUTE_DEF)],
    flavor: CollectionFlavor::Dependent,
    ..ResourceKind::BLANK
};

/// A classification type definition.
pub static CLASSIFICATION_DEF: ResourceKind = ResourceKind {
    name: "ClassificationDef",
    fields: DEF_FIELDS,
    relationships: &[dependent("attributeDefs", &ATTRIBUTE_DEF)],
    flavor: CollectionFlavor::Dependent,
    ..ResourceKind::BLANK
};

/// An entity type definition.
pub static ENTITY_DEF: ResourceKind = ResourceKind {
    name: "EntityDef",
    fields: DEF_FIELDS,
    relationships: &[dependent("attributeDefs", &ATTRIBUTE_DEF)],
    flavor: CollectionFlavor::Dependent,
    ..ResourceKind::BLANK
};

/// A relationship type definition.
pub static RELATIONSHIP_DEF: ResourceKind = ResourceKind {
    name: "RelationshipDef",
    fields: DEF_FIELDS,
    relationships: &[
        dependent("attributeDefs", &ATTRIBUTE_DEF),
        dependent("endDef1", &RELATIONSHIP_END_DEF),
        dependent("endDef2", &RELATIONSHIP_END_DEF),
    ],
    flavor: CollectionFlavor::Dependent,
    ..ResourceKind::BLANK
};

/// All type definitions, grouped by category.
///
/// Updates and creates send the whole document back to the same URL;
/// deletes carry it as the request body.
pub static TYPE_DEF: ResourceKind = ResourceKind {
    name: "TypeDef",
    path: "types/typedefs",
    fields: &[
        "enumDefs",
        "structDefs",
        "classificationDefs",
        "entityDefs",
        "relationshipDefs",
    ],
    relationships: &[
        dependent("enumDefs", &ENUM_DEF),
        dependent("structDefs", &STRUCT_DEF),
        dependent("classificationDefs", &CLASSIFICATION_DEF),
        dependent("entityDefs", &ENTITY_DEF),
        dependent("relationshipDefs", &RELATIONSHIP_DEF),
    ],
    operations: Operations::ALL,
    delete_with_body: true,
    ..ResourceKind::BLANK
};

/// Lightweight headers of every type definition.
pub static TYPE_DEF_HEADER: ResourceKind = ResourceKind {
    name: "TypeDefHeader",
    path: "types/typedefs/headers",
    fields: &["guid", "name", "category"],
    ..ResourceKind::BLANK
};

/// Declares a read-only definition kind addressed by `guid` or `name`.
macro_rules! def_lookup {
    ($(#[$meta:meta])* $ident:ident, $name:literal, $path:literal, $pk:literal, $ops:expr) => {
        $(#[$meta])*
        pub static $ident: ResourceKind = ResourceKind {
            name: $name,
            path: $path,
            primary_key: Some($pk),
            fields: DEF_FIELDS,
            relationships: &[dependent("attributeDefs", &ATTRIBUTE_DEF)],
            operations: $ops,
            ..ResourceKind::BLANK
        };
    };
}

def_lookup!(
    /// A classification definition by GUID.
    CLASSIFICATION_DEF_GUID, "ClassificationDefGuid", "types/classificationdef/guid", "guid", Operations::NONE
);
def_lookup!(
    /// A classification definition by name.
    CLASSIFICATION_DEF_NAME, "ClassificationDefName", "types/classificationdef/name", "name", Operations::NONE
);
def_lookup!(
    /// An entity definition by GUID.
    ENTITY_DEF_GUID, "EntityDefGuid", "types/entitydef/guid", "guid", Operations::NONE
);
def_lookup!(
    /// An entity definition by name.
    ENTITY_DEF_NAME, "EntityDefName", "types/entitydef/name", "name", Operations::NONE
);
def_lookup!(
    /// An enum definition by GUID.
    ENUM_DEF_GUID, "EnumDefGuid", "types/enumdef/guid", "guid", Operations::NONE
);
def_lookup!(
    /// An enum definition by name.
    ENUM_DEF_NAME, "EnumDefName", "types/enumdef/name", "name", Operations::NONE
);
def_lookup!(
    /// A relationship definition by GUID.
    RELATIONSHIP_DEF_GUID, "RelationshipDefGuid", "types/relationshipdef/guid", "guid", Operations::NONE
);
def_lookup!(
    /// A relationship definition by name.
    RELATIONSHIP_DEF_NAME, "RelationshipDefName", "types/relationshipdef/name", "name", Operations::NONE
);
def_lookup!(
    /// A struct definition by GUID.
    STRUCT_DEF_GUID, "StructDefGuid", "types/structdef/guid", "guid", Operations::NONE
);
def_lookup!(
    /// A struct definition by name.
    STRUCT_DEF_NAME, "StructDefName", "types/structdef/name", "name", Operations::NONE
);
def_lookup!(
    /// Any type definition by GUID.
    TYPE_DEF_GUID, "TypeDefGuid", "types/typedef/guid", "guid", Operations::NONE
);
def_lookup!(
    /// Any type definition by name. Deleting it removes the type.
    TYPE_DEF_NAME, "TypeDefName", "types/typedef/name", "name", Operations::DELETE_ONLY
);
