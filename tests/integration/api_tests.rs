//! API integration tests
//!
//! These run against a live server backed by Postgres.

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Suffix keeping names created by one run apart from seeded data
fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

async fn create(client: &Client, path: &str, body: Value) -> Value {
    let response = client
        .post(format!("{}/{}", BASE_URL, path))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

async fn list(client: &Client, path: &str, query: &[(&str, &str)]) -> Value {
    let response = client
        .get(format!("{}/{}", BASE_URL, path))
        .query(query)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    response.json().await.expect("Failed to parse response")
}

fn names(body: &Value) -> Vec<String> {
    body["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|b| b["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_book_lifecycle() {
    let client = Client::new();

    let category = create(&client, "categories", json!({ "name": unique("Shelf") })).await;
    let category_id = category["id"].as_i64().expect("category id");

    let dune_name = unique("Dune");
    let dune = create(
        &client,
        "books",
        json!({
            "name": dune_name,
            "description": "Desert planet",
            "price": "19.99",
            "category_id": category_id
        }),
    )
    .await;
    assert_eq!(dune["category"]["id"], category_id);

    let rome_name = unique("Rome");
    create(
        &client,
        "books",
        json!({ "name": rome_name, "price": "25.00", "category_id": category_id }),
    )
    .await;

    let category_param = category_id.to_string();
    let scoped = list(
        &client,
        "books",
        &[("category", category_param.as_str()), ("sort", "name_desc")],
    )
    .await;
    assert_eq!(names(&scoped), vec![rome_name.clone(), dune_name.clone()]);
    assert_eq!(scoped["sort_links"]["name"], "name_asc");

    let found = list(&client, "books", &[("search", dune_name.as_str())]).await;
    assert_eq!(names(&found), vec![dune_name.clone()]);

    let dune_id = dune["id"].as_i64().expect("book id");
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, dune_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client
        .get(format!("{}/books/{}", BASE_URL, dune_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Deleting the category removes its remaining books
    let response = client
        .delete(format!("{}/categories/{}", BASE_URL, category_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore]
async fn test_book_with_unknown_category_is_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "name": "Orphan", "price": "1.00", "category_id": i32::MAX }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["details"]["name"], "Orphan");
}

#[tokio::test]
#[ignore]
async fn test_bad_category_selector() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .query(&[("category", "fiction")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_update_with_mismatched_id_is_not_found() {
    let client = Client::new();

    let category = create(&client, "categories", json!({ "name": unique("Poetry") })).await;
    let id = category["id"].as_i64().expect("category id");

    let response = client
        .put(format!("{}/categories/{}", BASE_URL, id))
        .json(&json!({ "id": id + 1, "name": "Renamed" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    client
        .delete(format!("{}/categories/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
}
