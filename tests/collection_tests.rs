//! Integration tests for collections: filtering per flavor, bulk writes,
//! unique-attribute lookups and search results.

mod common;

use atlas_client::clients::HttpMethod;
use atlas_client::rest::CollectionFlavor;
use atlas_client::{ModelCollection, ResourceError, ResourceName};
use common::{fields, scripted_atlas, API_ROOT, GUID};
use serde_json::{json, Map, Value};

fn bulk_response() -> Value {
    json!({
        "entities": [
            {"guid": "A", "typeName": "hive_table", "status": "ACTIVE", "version": 3},
            {"guid": "B", "typeName": "hive_table", "status": "ACTIVE", "version": 7}
        ],
        "referredEntities": {}
    })
}

fn pairs(values: &[(&str, &str)]) -> Option<Vec<(String, String)>> {
    Some(
        values
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect(),
    )
}

// ============================================================================
// Bulk entities
// ============================================================================

#[tokio::test]
async fn test_entity_bulk_filter_repeats_guid_parameter() {
    let (atlas, transport) = scripted_atlas();
    transport.respond(bulk_response());

    let mut bulk = atlas.entity_bulk();
    bulk.filter(fields(json!({"guid": ["A", "B"]}))).await.unwrap();

    let request = transport.last();
    assert_eq!(request.http_method, HttpMethod::Get);
    assert_eq!(request.url, format!("{API_ROOT}/entity/bulk"));
    assert_eq!(request.query, pairs(&[("guid", "A"), ("guid", "B")]));
    assert_eq!(request.query_string().as_deref(), Some("guid=A&guid=B"));

    let mut versions = Vec::new();
    for batch in bulk.iter_mut() {
        for entity in batch.relationship("entities").await.unwrap().iter_mut() {
            versions.push(entity.get("version").await.unwrap().clone());
        }
    }
    assert_eq!(versions, vec![json!(3), json!(7)]);
    assert_eq!(transport.count(), 1);
}

#[tokio::test]
async fn test_repeated_filter_refetches_and_replaces() {
    let (atlas, transport) = scripted_atlas();
    transport.respond(bulk_response());
    transport.respond(bulk_response());

    let mut bulk = atlas.entity_bulk();
    let params = fields(json!({"guid": ["A", "B"]}));
    bulk.filter(params.clone()).await.unwrap();
    bulk.filter(params).await.unwrap();

    assert_eq!(transport.count(), 2);
    assert_eq!(bulk.len(), 1);
}

#[tokio::test]
async fn test_all_fetches_once() {
    let (atlas, transport) = scripted_atlas();
    transport.respond(json!([
        {"guid": "g1", "name": "hive_table", "category": "ENTITY"},
        {"guid": "g2", "name": "PII", "category": "CLASSIFICATION"}
    ]));

    let mut headers = atlas.collection(ResourceName::TypedefsHeaders);
    assert_eq!(headers.all().await.unwrap().len(), 2);
    assert_eq!(headers.all().await.unwrap().len(), 2);

    assert_eq!(transport.count(), 1);
    assert_eq!(transport.last().url, format!("{API_ROOT}/types/typedefs/headers"));
    assert_eq!(headers.members()[1].payload()["category"], json!("CLASSIFICATION"));
}

#[tokio::test]
async fn test_entity_bulk_delete_sends_filters_as_query() {
    let (atlas, transport) = scripted_atlas();
    transport.respond(bulk_response());
    transport.respond(json!({"mutatedEntities": {"DELETE": []}}));

    let mut bulk = atlas.entity_bulk();
    bulk.filter(fields(json!({"guid": ["A", "B"]}))).await.unwrap();
    let response = bulk.bulk_delete(None).await.unwrap();

    let request = transport.last();
    assert_eq!(request.http_method, HttpMethod::Delete);
    assert_eq!(request.url, format!("{API_ROOT}/entity/bulk"));
    assert_eq!(request.query, pairs(&[("guid", "A"), ("guid", "B")]));
    assert_eq!(request.body, None);
    assert_eq!(response, json!({"mutatedEntities": {"DELETE": []}}));
}

#[tokio::test]
async fn test_entity_bulk_create_sends_loaded_document() {
    let (atlas, transport) = scripted_atlas();
    transport.respond(bulk_response());

    let mut bulk = atlas.entity_bulk();
    bulk.filter(fields(json!({"guid": ["A", "B"]}))).await.unwrap();
    bulk.bulk_create(None).await.unwrap();

    let request = transport.last();
    assert_eq!(request.http_method, HttpMethod::Post);
    assert_eq!(request.url, format!("{API_ROOT}/entity/bulk"));
    assert_eq!(request.body, Some(bulk_response()));
}

#[tokio::test]
async fn test_unsupported_bulk_operation_sends_nothing() {
    let (atlas, transport) = scripted_atlas();

    assert!(matches!(
        atlas.entity_bulk().bulk_update(None).await,
        Err(ResourceError::UnsupportedOperation {
            resource: "EntityBulk",
            operation: "update"
        })
    ));
    assert!(matches!(
        atlas.typedefs().bulk_create(Some(json!({}))).await,
        Err(ResourceError::UnsupportedOperation { .. })
    ));
    assert_eq!(transport.count(), 0);
}

// ============================================================================
// Literal-seeded collections
// ============================================================================

#[tokio::test]
async fn test_entity_post_sends_literal_body() {
    let (atlas, transport) = scripted_atlas();
    transport.respond(json!({"mutatedEntities": {"CREATE": [{"guid": GUID}]}}));

    let literal = json!({
        "entity": {
            "typeName": "hive_table",
            "attributes": {"qualifiedName": "sales.orders@primary", "name": "orders"}
        }
    });
    let mut post = atlas.entity_post();
    assert_eq!(post.flavor(), CollectionFlavor::LiteralSeeded);
    post.filter(fields(literal.clone())).await.unwrap();
    assert_eq!(transport.count(), 0);

    for entity in post.iter_mut() {
        entity.create(Map::new()).await.unwrap();
    }

    let request = transport.last();
    assert_eq!(request.http_method, HttpMethod::Post);
    assert_eq!(request.url, format!("{API_ROOT}/entity"));
    assert_eq!(request.body, Some(literal));
    assert_eq!(
        post.members()[0].payload()["mutatedEntities"]["CREATE"][0]["guid"],
        json!(GUID)
    );
}

#[tokio::test]
async fn test_bulk_classification_sends_literal_body() {
    let (atlas, transport) = scripted_atlas();
    let literal = json!({
        "classification": {"typeName": "PII", "attributes": {}},
        "entityGuids": ["A", "B"]
    });

    let mut classify = atlas.collection(ResourceName::EntityBulkClassification);
    classify.filter(fields(literal.clone())).await.unwrap();
    classify
        .get_mut(0)
        .unwrap()
        .create(Map::new())
        .await
        .unwrap();

    let request = transport.last();
    assert_eq!(request.url, format!("{API_ROOT}/entity/bulk/classification"));
    assert_eq!(request.body, Some(literal));
}

#[tokio::test]
async fn test_relationship_create_sends_literal_body() {
    let (atlas, transport) = scripted_atlas();
    let literal = json!({
        "typeName": "hive_table_columns",
        "end1": {"guid": "A", "typeName": "hive_table"},
        "end2": {"guid": "B", "typeName": "hive_column"}
    });

    let mut relationship = atlas.collection(ResourceName::Relationship);
    relationship.filter(fields(literal.clone())).await.unwrap();
    relationship.get_mut(0).unwrap().create(Map::new()).await.unwrap();

    let request = transport.last();
    assert_eq!(request.http_method, HttpMethod::Post);
    assert_eq!(request.url, format!("{API_ROOT}/relationship"));
    assert_eq!(request.body, Some(literal));
}

// ============================================================================
// Unique attributes
// ============================================================================

#[tokio::test]
async fn test_unique_attribute_lookup_and_update() {
    let (atlas, transport) = scripted_atlas();
    transport.respond(json!({
        "entity": {"guid": GUID, "typeName": "hive_table", "attributes": {"name": "orders"}},
        "referredEntities": {}
    }));

    let unique = atlas.collection(ResourceName::EntityUniqueAttribute);
    let mut entity = unique
        .lookup("hive_table", &fields(json!({"qualifiedName": "sales.orders@primary"})))
        .unwrap();
    let expected_url = format!(
        "{API_ROOT}/entity/uniqueAttribute/type/hive_table?attr:qualifiedName=sales.orders%40primary"
    );
    assert_eq!(entity.url(), Some(expected_url.as_str()));
    assert_eq!(transport.count(), 0);

    assert_eq!(
        entity.get("entity").await.unwrap()["guid"],
        json!(GUID)
    );
    assert_eq!(transport.last().url, expected_url);

    entity.get_mut("entity").unwrap()["attributes"]["name"] = json!("orders_v2");
    entity.update(Map::new()).await.unwrap();

    let request = transport.last();
    assert_eq!(request.http_method, HttpMethod::Put);
    assert_eq!(request.url, expected_url);
    assert_eq!(
        request.body.unwrap()["entity"]["attributes"]["name"],
        json!("orders_v2")
    );
}

#[tokio::test]
async fn test_unique_attribute_fragments_keep_caller_order() {
    let (atlas, _transport) = scripted_atlas();
    let unique = atlas.collection(ResourceName::EntityUniqueAttribute);

    let entity = unique
        .lookup("hive_table", &fields(json!({"qualifiedName": "q", "name": "n"})))
        .unwrap();

    assert!(entity
        .url()
        .unwrap()
        .ends_with("/hive_table?attr:qualifiedName=q&attr:name=n"));
}

#[tokio::test]
async fn test_literal_body_keeps_key_order() {
    let (atlas, transport) = scripted_atlas();
    let literal = json!({"typeName": "hive_table_columns", "end1": {"guid": "A"}, "end2": {"guid": "B"}});

    let mut relationship = atlas.collection(ResourceName::Relationship);
    relationship.filter(fields(literal)).await.unwrap();
    relationship.get_mut(0).unwrap().create(Map::new()).await.unwrap();

    let body = transport.last().body.unwrap();
    let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["typeName", "end1", "end2"]);
}

#[tokio::test]
async fn test_unique_attribute_rejects_filter_and_empty_lookup() {
    let (atlas, transport) = scripted_atlas();
    let mut unique = atlas.collection(ResourceName::EntityUniqueAttribute);

    assert!(matches!(
        unique.lookup("hive_table", &Map::new()),
        Err(ResourceError::MalformedRequest { .. })
    ));
    assert!(matches!(
        unique.filter(fields(json!({"qualifiedName": "x"}))).await,
        Err(ResourceError::MalformedRequest { .. })
    ));
    assert_eq!(transport.count(), 0);
}

#[tokio::test]
async fn test_standalone_nested_collection_is_rejected() {
    let (_atlas, transport) = scripted_atlas();
    let mut constraints = ModelCollection::new(
        &atlas_client::resources::typedef::CONSTRAINT,
        transport.clone(),
        API_ROOT,
    );
    assert_eq!(constraints.flavor(), CollectionFlavor::Dependent);

    assert!(matches!(
        constraints.filter(fields(json!({"type": "ownedRef"}))).await,
        Err(ResourceError::MalformedRequest { .. })
    ));
    assert!(matches!(
        constraints.all().await,
        Err(ResourceError::MalformedRequest { .. })
    ));
    assert_eq!(transport.count(), 0);
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_basic_search_exposes_entity_headers() {
    let (atlas, transport) = scripted_atlas();
    transport.respond(json!({
        "queryType": "BASIC",
        "entities": [
            {"guid": "A", "typeName": "hive_table", "displayText": "orders"},
            {"guid": "B", "typeName": "hive_table", "displayText": "customers"}
        ]
    }));

    let mut search = atlas.resolve("search_basic").unwrap();
    search
        .filter(fields(json!({"typeName": "hive_table", "query": "sales*", "limit": 10})))
        .await
        .unwrap();

    let request = transport.last();
    assert_eq!(request.url, format!("{API_ROOT}/search/basic"));
    assert_eq!(request.query_value("typeName"), Some("hive_table"));
    assert_eq!(request.query_value("query"), Some("sales*"));
    assert_eq!(request.query_value("limit"), Some("10"));

    let result = search.get_mut(0).unwrap();
    let names: Vec<Value> = result
        .relationship("entities")
        .await
        .unwrap()
        .iter()
        .map(|header| header.payload()["displayText"].clone())
        .collect();
    assert_eq!(names, vec![json!("orders"), json!("customers")]);
    assert_eq!(transport.count(), 1);
}

#[tokio::test]
async fn test_fulltext_search_nests_entity_headers() {
    let (atlas, transport) = scripted_atlas();
    transport.respond(json!({
        "queryType": "FULL_TEXT",
        "queryText": "orders",
        "fullTextResult": [
            {"entity": {"guid": "A", "typeName": "hive_table"}, "score": 0.9}
        ]
    }));

    let mut search = atlas.collection(ResourceName::SearchFulltext);
    search.filter(fields(json!({"query": "orders"}))).await.unwrap();
    assert_eq!(transport.last().url, format!("{API_ROOT}/search/fulltext"));

    let result = search.get_mut(0).unwrap();
    let hits = result.relationship("fullTextResult").await.unwrap();
    assert_eq!(hits.len(), 1);
    let hit = hits.get_mut(0).unwrap();
    assert_eq!(hit.get("score").await.unwrap(), &json!(0.9));

    let entity = hit.relationship("entity").await.unwrap();
    assert_eq!(entity.len(), 1);
    assert_eq!(entity.members()[0].payload()["guid"], json!("A"));
    assert_eq!(entity.to_value(), json!({"guid": "A", "typeName": "hive_table"}));
}

#[tokio::test]
async fn test_empty_dsl_search_has_no_entities() {
    let (atlas, transport) = scripted_atlas();
    transport.respond(json!({"queryType": "DSL", "queryText": "hive_table where name = 'x'"}));

    let mut search = atlas.collection(ResourceName::SearchDsl);
    search
        .filter(fields(json!({"query": "hive_table where name = 'x'"})))
        .await
        .unwrap();
    let result = search.get_mut(0).unwrap();

    assert!(matches!(
        result.relationship("entities").await,
        Err(ResourceError::RelationshipNotLoaded { ref field, .. }) if field == "entities"
    ));
    assert_eq!(transport.count(), 1);
}

#[tokio::test]
async fn test_search_failure_surfaces_status() {
    let (atlas, transport) = scripted_atlas();
    transport.fail(400, "ATLAS-400-00-01A");

    let mut search = atlas.collection(ResourceName::SearchDsl);
    let error = search
        .filter(fields(json!({"query": "not dsl"})))
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(400));
    assert!(!error.is_not_found());
    assert!(search.is_empty());
}
