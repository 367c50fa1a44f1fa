//! Integration tests for `DirectoryClient` using wiremock HTTP mocks.

use apfinder_core::{EntityId, EntityKind};
use apfinder_directory::{DirectoryClient, DirectoryError, DirectorySource};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> DirectoryClient {
    DirectoryClient::new(base_url, "anon-key", "public", 30, "apfinder-test")
        .expect("client construction should not fail")
}

#[tokio::test]
async fn fetch_distributors_returns_normalized_rows() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        {
            "id": 1,
            "name": "Alpha Cosméticos",
            "email": "alpha@example.com",
            "phone": "11 3000-0000",
            "address": "Rua Augusta, 500",
            "instagram": "@alpha",
            "logo_url": null,
            "plan_id": "7961c2e1-8b33-4134-bdc9-4b3f4412a196",
            "cidade": "São Paulo",
            "estado": "SP",
            "plans": { "id": "7961c2e1-8b33-4134-bdc9-4b3f4412a196", "name": "Starter" }
        },
        {
            "id": 2,
            "name": "Beta Distribuidora",
            "address": "",
            "cidade": null,
            "estado": null,
            "plans": null
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/rest/v1/distribuidores"))
        .and(query_param("select", EntityKind::Distributors.select_columns()))
        .and(query_param("order", "name.asc"))
        .and(header("apikey", "anon-key"))
        .and(header("authorization", "Bearer anon-key"))
        .and(header("accept-profile", "public"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let entities = client
        .fetch_directory(EntityKind::Distributors)
        .await
        .expect("should read directory");

    assert_eq!(entities.len(), 2);
    assert_eq!(entities[0].id, EntityId("1".to_string()));
    assert_eq!(entities[0].plan.as_ref().map(|p| p.name.as_str()), Some("Starter"));
    assert!(entities[0].has_address_component());
    assert!(!entities[1].has_address_component());
    assert!(entities[1].plan.is_none());
}

#[tokio::test]
async fn empty_directory_is_ok() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/distribuidores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let entities = client
        .fetch_directory(EntityKind::Distributors)
        .await
        .expect("empty directory is not an error");
    assert!(entities.is_empty());
}

#[tokio::test]
async fn distributor_read_failure_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/distribuidores"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "code": "XX000",
            "message": "internal error"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .fetch_directory(EntityKind::Distributors)
        .await
        .expect_err("read should fail");

    match err {
        DirectoryError::Api {
            collection,
            status,
            message,
        } => {
            assert_eq!(collection, "distribuidores");
            assert_eq!(status, 500);
            assert_eq!(message, "internal error");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn partners_fall_back_to_distributor_collection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/parceiros"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "code": "42P01",
            "message": "relation \"public.parceiros\" does not exist"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/distribuidores"))
        .and(query_param("select", EntityKind::Partners.select_columns()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 9, "name": "Gama", "cidade": "Campinas", "estado": "SP" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let entities = client
        .fetch_directory(EntityKind::Partners)
        .await
        .expect("fallback should succeed");
    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].name, "Gama");
}

#[tokio::test]
async fn partner_fallback_failure_returns_primary_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/parceiros"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "message": "relation \"public.parceiros\" does not exist"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/distribuidores"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .fetch_directory(EntityKind::Partners)
        .await
        .expect_err("both reads fail");

    assert!(
        matches!(err, DirectoryError::Api { ref collection, status: 404, .. } if collection == "parceiros"),
        "expected the parceiros error, got {err:?}"
    );
}

#[tokio::test]
async fn non_array_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/distribuidores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "rows": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .fetch_directory(EntityKind::Distributors)
        .await
        .expect_err("object body is not a row list");
    assert!(matches!(err, DirectoryError::Deserialize { .. }));
}
