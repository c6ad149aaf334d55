//! Search endpoints.
//!
//! Every search is a queryable collection: filter parameters become the
//! query string and the single result document exposes the matched
//! entities as a dependent collection.

use crate::rest::{CollectionFlavor, Dependence, Relationship, ResourceKind};

/// A matched entity, as returned by searches.
pub static ENTITY_HEADER: ResourceKind = ResourceKind {
    name: "EntityHeader",
    fields: &[
        "guid",
        "typeName",
        "status",
        "displayText",
        "attributes",
        "classificationNames",
    ],
    flavor: CollectionFlavor::Dependent,
    ..ResourceKind::BLANK
};

/// One full-text hit with its score.
pub static FULL_TEXT_RESULT: ResourceKind = ResourceKind {
    name: "FullTextResult",
    fields: &["entity", "score"],
    relationships: &[Relationship {
        field: "entity",
        kind: &ENTITY_HEADER,
        dependence: Dependence::Dependent,
    }],
    flavor: CollectionFlavor::Dependent,
    ..ResourceKind::BLANK
};

const SEARCH_FIELDS: &[&str] = &[
    "queryType",
    "queryText",
    "searchParameters",
    "entities",
    "attributes",
    "fullTextResult",
];

/// Declares a search endpoint kind.
macro_rules! search_kind {
    ($(#[$meta:meta])* $ident:ident, $name:literal, $path:literal) => {
        $(#[$meta])*
        pub static $ident: ResourceKind = ResourceKind {
            name: $name,
            path: $path,
            fields: SEARCH_FIELDS,
            relationships: &[
                Relationship {
                    field: "entities",
                    kind: &ENTITY_HEADER,
                    dependence: Dependence::Dependent,
                },
                Relationship {
                    field: "fullTextResult",
                    kind: &FULL_TEXT_RESULT,
                    dependence: Dependence::Dependent,
                },
            ],
            ..ResourceKind::BLANK
        };
    };
}

search_kind!(
    /// Search by attribute value (`attrName`, `attrValuePrefix`, `typeName`).
    SEARCH_ATTRIBUTE,
    "SearchAttribute",
    "search/attribute"
);
search_kind!(
    /// Basic search (`query`, `typeName`, `classification`, paging).
    SEARCH_BASIC,
    "SearchBasic",
    "search/basic"
);
search_kind!(
    /// DSL search (`query`, `typeName`, `classification`, paging).
    SEARCH_DSL,
    "SearchDsl",
    "search/dsl"
);
search_kind!(
    /// Full-text search (`query`, paging).
    SEARCH_FULLTEXT,
    "SearchFulltext",
    "search/fulltext"
);
