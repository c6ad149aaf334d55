//! Integration tests for the type system: nested definition collections and
//! whole-document writes.

mod common;

use atlas_client::clients::HttpMethod;
use atlas_client::{Model, ResourceError, ResourceName};
use common::{fields, scripted_atlas, API_ROOT};
use serde_json::{json, Map, Value};

fn typedefs_response() -> Value {
    json!({
        "enumDefs": [{
            "category": "ENUM",
            "guid": "e-1",
            "name": "file_action",
            "elementDefs": [
                {"value": "READ", "ordinal": 0},
                {"value": "WRITE", "ordinal": 1}
            ]
        }],
        "structDefs": [{
            "category": "STRUCT",
            "guid": "s-1",
            "name": "hive_order",
            "attributeDefs": [{
                "name": "col",
                "typeName": "string",
                "isOptional": false,
                "cardinality": "SINGLE",
                "constraints": [{"type": "ownedRef"}]
            }, {
                "name": "order",
                "typeName": "int",
                "isOptional": true,
                "cardinality": "SINGLE"
            }]
        }],
        "classificationDefs": [],
        "entityDefs": [{
            "category": "ENTITY",
            "guid": "t-1",
            "name": "hive_table",
            "superTypes": ["DataSet"],
            "attributeDefs": []
        }],
        "relationshipDefs": [{
            "category": "RELATIONSHIP",
            "guid": "r-1",
            "name": "hive_table_columns",
            "relationshipCategory": "COMPOSITION",
            "endDef1": {"type": "hive_table", "name": "columns", "isContainer": true, "cardinality": "SET"},
            "endDef2": {"type": "hive_column", "name": "table", "isContainer": false, "cardinality": "SINGLE"},
            "attributeDefs": []
        }]
    })
}

async fn loaded_typedefs(atlas: &atlas_client::Atlas) -> Model {
    let mut typedefs = atlas.typedefs();
    let mut members = typedefs.all().await.unwrap().to_vec();
    assert_eq!(members.len(), 1);
    members.remove(0)
}

// ============================================================================
// Nested collections
// ============================================================================

#[tokio::test]
async fn test_typedefs_nested_iteration_without_extra_fetches() {
    let (atlas, transport) = scripted_atlas();
    transport.respond(typedefs_response());
    let mut typedef = loaded_typedefs(&atlas).await;

    assert_eq!(transport.last().url, format!("{API_ROOT}/types/typedefs"));

    let mut constraint_types = Vec::new();
    for struct_def in typedef.relationship("structDefs").await.unwrap().iter_mut() {
        assert_eq!(struct_def.get("name").await.unwrap(), &json!("hive_order"));
        for attribute_def in struct_def.relationship("attributeDefs").await.unwrap() {
            let constraints = attribute_def.relationship("constraints").await;
            if let Ok(constraints) = constraints {
                for constraint in constraints.iter() {
                    constraint_types.push(constraint.payload()["type"].clone());
                }
            }
        }
    }
    assert_eq!(constraint_types, vec![json!("ownedRef")]);

    let enum_values: Vec<Value> = typedef
        .relationship("enumDefs")
        .await
        .unwrap()
        .get_mut(0)
        .unwrap()
        .relationship("elementDefs")
        .await
        .unwrap()
        .iter()
        .map(|element| element.payload()["value"].clone())
        .collect();
    assert_eq!(enum_values, vec![json!("READ"), json!("WRITE")]);

    let entity_def = typedef
        .relationship("entityDefs")
        .await
        .unwrap()
        .get_mut(0)
        .unwrap();
    assert_eq!(entity_def.get("superTypes").await.unwrap(), &json!(["DataSet"]));

    assert_eq!(transport.count(), 1);
}

#[tokio::test]
async fn test_missing_nested_field_is_not_fetched() {
    let (atlas, transport) = scripted_atlas();
    transport.respond(typedefs_response());
    let mut typedef = loaded_typedefs(&atlas).await;

    let attributes = typedef
        .relationship("structDefs")
        .await
        .unwrap()
        .get_mut(0)
        .unwrap()
        .relationship("attributeDefs")
        .await
        .unwrap();
    let second = attributes.get_mut(1).unwrap();

    assert!(matches!(
        second.relationship("constraints").await,
        Err(ResourceError::InsufficientIdentity { .. })
    ));
    assert_eq!(transport.count(), 1);
}

#[tokio::test]
async fn test_relationship_def_ends() {
    let (atlas, transport) = scripted_atlas();
    transport.respond(typedefs_response());
    let mut typedef = loaded_typedefs(&atlas).await;

    let relationship_def = typedef
        .relationship("relationshipDefs")
        .await
        .unwrap()
        .get_mut(0)
        .unwrap();
    let end1 = relationship_def.relationship("endDef1").await.unwrap();
    assert_eq!(end1.len(), 1);
    assert_eq!(end1.members()[0].payload()["type"], json!("hive_table"));
    assert_eq!(
        end1.to_value(),
        json!({"type": "hive_table", "name": "columns", "isContainer": true, "cardinality": "SET"})
    );
    assert_eq!(transport.count(), 1);
}

// ============================================================================
// Whole-document writes
// ============================================================================

#[tokio::test]
async fn test_typedefs_update_sends_whole_document() {
    let (atlas, transport) = scripted_atlas();
    transport.respond(typedefs_response());
    let mut typedef = loaded_typedefs(&atlas).await;

    typedef
        .relationship("structDefs")
        .await
        .unwrap()
        .get_mut(0)
        .unwrap()
        .set("description", json!("orders struct"));
    let mut expected = typedefs_response();
    expected["structDefs"][0]["description"] = json!("orders struct");

    typedef.update(Map::new()).await.unwrap();

    let request = transport.last();
    assert_eq!(request.http_method, HttpMethod::Put);
    assert_eq!(request.url, format!("{API_ROOT}/types/typedefs"));
    assert_eq!(request.body, Some(expected));
}

#[tokio::test]
async fn test_filtered_definitions_are_still_written_back() {
    let (atlas, transport) = scripted_atlas();
    let mut document = typedefs_response();
    document["entityDefs"] = json!([
        {"category": "ENTITY", "name": "keep_a", "attributeDefs": []},
        {"category": "ENTITY", "name": "keep_b", "attributeDefs": []}
    ]);
    transport.respond(document.clone());
    let mut typedef = loaded_typedefs(&atlas).await;

    let entity_defs = typedef
        .relationship("entityDefs")
        .await
        .unwrap()
        .filter(fields(json!({"name": "keep_b"})))
        .await
        .unwrap();
    assert_eq!(entity_defs.len(), 1);
    entity_defs
        .get_mut(0)
        .unwrap()
        .set("description", json!("second"));
    document["entityDefs"][1]["description"] = json!("second");

    typedef.update(Map::new()).await.unwrap();

    let request = transport.last();
    assert_eq!(request.http_method, HttpMethod::Put);
    assert_eq!(request.body, Some(document));
}

#[tokio::test]
async fn test_typedefs_create_posts_whole_document() {
    let (atlas, transport) = scripted_atlas();
    transport.respond(typedefs_response());
    let mut typedef = loaded_typedefs(&atlas).await;

    typedef.create(Map::new()).await.unwrap();

    let request = transport.last();
    assert_eq!(request.http_method, HttpMethod::Post);
    assert_eq!(request.url, format!("{API_ROOT}/types/typedefs"));
    assert_eq!(request.body, Some(typedefs_response()));
}

#[tokio::test]
async fn test_typedefs_delete_carries_body() {
    let (atlas, transport) = scripted_atlas();
    transport.respond(typedefs_response());
    let mut typedef = loaded_typedefs(&atlas).await;

    typedef.delete().await.unwrap();

    let request = transport.last();
    assert_eq!(request.http_method, HttpMethod::Delete);
    assert_eq!(request.url, format!("{API_ROOT}/types/typedefs"));
    assert_eq!(request.body, Some(typedefs_response()));
    assert!(typedef.payload().is_empty());
}

#[tokio::test]
async fn test_typedef_name_delete() {
    let (atlas, transport) = scripted_atlas();
    let mut typedef = atlas.model(ResourceName::TypedefName, "hive_order").unwrap();

    typedef.delete().await.unwrap();

    let request = transport.last();
    assert_eq!(request.http_method, HttpMethod::Delete);
    assert_eq!(request.url, format!("{API_ROOT}/types/typedef/name/hive_order"));
    assert_eq!(request.body, None);
}

#[tokio::test]
async fn test_serialize_matches_loaded_document() {
    let (atlas, transport) = scripted_atlas();
    transport.respond(typedefs_response());
    let mut typedefs = atlas.typedefs();
    typedefs.all().await.unwrap();

    assert_eq!(serde_json::to_value(&typedefs).unwrap(), typedefs_response());
    assert_eq!(
        serde_json::to_value(&typedefs.members()[0]).unwrap(),
        typedefs_response()
    );
}

// ============================================================================
// Lookups by GUID and name
// ============================================================================

#[tokio::test]
async fn test_entitydef_by_name() {
    let (atlas, transport) = scripted_atlas();
    transport.respond(json!({
        "category": "ENTITY",
        "guid": "t-1",
        "name": "hive_table",
        "attributeDefs": [{"name": "owner", "typeName": "string"}]
    }));

    let mut entity_def = atlas.model(ResourceName::EntityDefName, "hive_table").unwrap();
    assert_eq!(entity_def.get("guid").await.unwrap(), &json!("t-1"));
    assert_eq!(
        transport.last().url,
        format!("{API_ROOT}/types/entitydef/name/hive_table")
    );

    let attributes = entity_def.relationship("attributeDefs").await.unwrap();
    assert_eq!(attributes.members()[0].payload()["name"], json!("owner"));
    assert_eq!(transport.count(), 1);
}

#[tokio::test]
async fn test_typedef_headers_expose_category() {
    let (atlas, transport) = scripted_atlas();
    transport.respond(json!([
        {"guid": "t-1", "name": "hive_table", "category": "ENTITY"},
        {"guid": "e-1", "name": "file_action", "category": "ENUM"}
    ]));

    let mut headers = atlas.resolve("typedefs_headers").unwrap();
    let categories: Vec<Value> = headers
        .all()
        .await
        .unwrap()
        .iter()
        .map(|header| header.payload()["category"].clone())
        .collect();

    assert_eq!(categories, vec![json!("ENTITY"), json!("ENUM")]);
    assert_eq!(transport.count(), 1);
}
