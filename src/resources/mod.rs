//! Atlas resource descriptors and the entry-point registry.
//!
//! Every top-level Atlas endpoint is reachable through exactly one
//! [`ResourceName`]. Nested kinds (classifications, attribute definitions,
//! lineage relations and so on) are only reached through relationships.
//!
//! # Example
//!
//! ```rust
//! use atlas_client::ResourceName;
//!
//! let name: ResourceName = "search_dsl".parse().unwrap();
//! assert_eq!(name, ResourceName::SearchDsl);
//! assert_eq!(name.kind().path, "search/dsl");
//!
//! assert!("entity_guidz".parse::<ResourceName>().is_err());
//! ```

pub mod entity;
pub mod lineage;
pub mod relationship;
pub mod search;
pub mod typedef;

use std::fmt;
use std::str::FromStr;

use crate::rest::{ResourceError, ResourceKind};

/// The registry of Atlas entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceName {
    /// `entity/guid/{guid}`
    EntityGuid,
    /// `types/typedefs`
    Typedefs,
    /// `entity` (create)
    EntityPost,
    /// `entity/bulk`
    EntityBulk,
    /// `entity/bulk/classification`
    EntityBulkClassification,
    /// `entity/uniqueAttribute/type/{typeName}`
    EntityUniqueAttribute,
    /// `types/typedefs/headers`
    TypedefsHeaders,
    /// `types/classificationdef/guid/{guid}`
    ClassificationDefGuid,
    /// `types/classificationdef/name/{name}`
    ClassificationDefName,
    /// `types/entitydef/guid/{guid}`
    EntityDefGuid,
    /// `types/entitydef/name/{name}`
    EntityDefName,
    /// `types/enumdef/guid/{guid}`
    EnumDefGuid,
    /// `types/enumdef/name/{name}`
    EnumDefName,
    /// `types/relationshipdef/guid/{guid}`
    RelationshipDefGuid,
    /// `types/relationshipdef/name/{name}`
    RelationshipDefName,
    /// `types/structdef/guid/{guid}`
    StructDefGuid,
    /// `types/structdef/name/{name}`
    StructDefName,
    /// `types/typedef/guid/{guid}`
    TypedefGuid,
    /// `types/typedef/name/{name}`
    TypedefName,
    /// `lineage/{guid}`
    LineageGuid,
    /// `search/attribute`
    SearchAttribute,
    /// `search/basic`
    SearchBasic,
    /// `search/dsl`
    SearchDsl,
    /// `search/fulltext`
    SearchFulltext,
    /// `relationship`
    Relationship,
    /// `relationship/guid/{guid}`
    RelationshipGuid,
}

impl ResourceName {
    /// Every entry point, in registry order.
    pub const ALL: [Self; 26] = [
        Self::EntityGuid,
        Self::Typedefs,
        Self::EntityPost,
        Self::EntityBulk,
        Self::EntityBulkClassification,
        Self::EntityUniqueAttribute,
        Self::TypedefsHeaders,
        Self::ClassificationDefGuid,
        Self::ClassificationDefName,
        Self::EntityDefGuid,
        Self::EntityDefName,
        Self::EnumDefGuid,
        Self::EnumDefName,
        Self::RelationshipDefGuid,
        Self::RelationshipDefName,
        Self::StructDefGuid,
        Self::StructDefName,
        Self::TypedefGuid,
        Self::TypedefName,
        Self::LineageGuid,
        Self::SearchAttribute,
        Self::SearchBasic,
        Self::SearchDsl,
        Self::SearchFulltext,
        Self::Relationship,
        Self::RelationshipGuid,
    ];

    /// Returns the entry point's snake-case name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EntityGuid => "entity_guid",
            Self::Typedefs => "typedefs",
            Self::EntityPost => "entity_post",
            Self::EntityBulk => "entity_bulk",
            Self::EntityBulkClassification => "entity_bulk_classification",
            Self::EntityUniqueAttribute => "entity_unique_attribute",
            Self::TypedefsHeaders => "typedefs_headers",
            Self::ClassificationDefGuid => "classificationdef_guid",
            Self::ClassificationDefName => "classificationdef_name",
            Self::EntityDefGuid => "entitydef_guid",
            Self::EntityDefName => "entitydef_name",
            Self::EnumDefGuid => "enumdef_guid",
            Self::EnumDefName => "enumdef_name",
            Self::RelationshipDefGuid => "relationshipdef_guid",
            Self::RelationshipDefName => "relationshipdef_name",
            Self::StructDefGuid => "structdef_guid",
            Self::StructDefName => "structdef_name",
            Self::TypedefGuid => "typedef_guid",
            Self::TypedefName => "typedef_name",
            Self::LineageGuid => "lineage_guid",
            Self::SearchAttribute => "search_attribute",
            Self::SearchBasic => "search_basic",
            Self::SearchDsl => "search_dsl",
            Self::SearchFulltext => "search_fulltext",
            Self::Relationship => "relationship",
            Self::RelationshipGuid => "relationship_guid",
        }
    }

    /// Returns the descriptor behind the entry point.
    #[must_use]
    pub fn kind(&self) -> &'static ResourceKind {
        match self {
            Self::EntityGuid => &entity::ENTITY_GUID,
            Self::Typedefs => &typedef::TYPE_DEF,
            Self::EntityPost => &entity::ENTITY_POST,
            Self::EntityBulk => &entity::ENTITY_BULK,
            Self::EntityBulkClassification => &entity::ENTITY_BULK_CLASSIFICATION,
            Self::EntityUniqueAttribute => &entity::ENTITY_UNIQUE_ATTRIBUTE,
            Self::TypedefsHeaders => &typedef::TYPE_DEF_HEADER,
            Self::ClassificationDefGuid => &typedef::CLASSIFICATION_DEF_GUID,
            Self::ClassificationDefName => &typedef::CLASSIFICATION_DEF_NAME,
            Self::EntityDefGuid => &typedef::ENTITY_DEF_GUID,
            Self::EntityDefName => &typedef::ENTITY_DEF_NAME,
            Self::EnumDefGuid => &typedef::ENUM_DEF_GUID,
            Self::EnumDefName => &typedef::ENUM_DEF_NAME,
            Self::RelationshipDefGuid => &typedef::RELATIONSHIP_DEF_GUID,
            Self::RelationshipDefName => &typedef::RELATIONSHIP_DEF_NAME,
            Self::StructDefGuid => &typedef::STRUCT_DEF_GUID,
            Self::StructDefName => &typedef::STRUCT_DEF_NAME,
            Self::TypedefGuid => &typedef::TYPE_DEF_GUID,
            Self::TypedefName => &typedef::TYPE_DEF_NAME,
            Self::LineageGuid => &lineage::LINEAGE_GUID,
            Self::SearchAttribute => &search::SEARCH_ATTRIBUTE,
            Self::SearchBasic => &search::SEARCH_BASIC,
            Self::SearchDsl => &search::SEARCH_DSL,
            Self::SearchFulltext => &search::SEARCH_FULLTEXT,
            Self::Relationship => &relationship::RELATIONSHIP,
            Self::RelationshipGuid => &relationship::RELATIONSHIP_GUID,
        }
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceName {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ResourceError::UnknownResource {
                name: s.to_string(),
            })
    }
}
