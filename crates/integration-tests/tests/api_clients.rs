//! Integration tests for the client JSON API.
//!
//! Each test starts its own server over an in-memory store.

use reqwest::StatusCode;
use serde_json::{Value, json};

use loyalty_integration_tests::TestServer;

async fn create(server: &TestServer, body: Value) -> Value {
    let resp = server
        .client
        .post(server.url("/api/clients"))
        .json(&body)
        .send()
        .await
        .expect("Failed to create client");
    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to parse client")
}

#[tokio::test]
async fn test_alice_earns_a_reward() {
    let server = TestServer::memory().await;

    let alice = create(
        &server,
        json!({"name": "Alice", "phone": "0600000000", "address": "1 rue de la Paix"}),
    )
    .await;
    assert_eq!(alice["loyaltyPoints"], 0);
    let id = alice["id"].as_str().expect("id is a string").to_string();

    for _ in 0..10 {
        let resp = server
            .client
            .patch(server.url(&format!("/api/clients/{id}")))
            .send()
            .await
            .expect("Failed to add point");
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let stored: Value = server
        .client
        .get(server.url(&format!("/api/clients/{id}")))
        .send()
        .await
        .expect("Failed to read client")
        .json()
        .await
        .expect("Failed to parse client");
    assert_eq!(stored["loyaltyPoints"], 10);
    assert_eq!(stored["address"], "1 rue de la Paix");

    let resp = server
        .client
        .delete(server.url(&format!("/api/clients/{id}")))
        .send()
        .await
        .expect("Failed to delete client");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse body");
    assert_eq!(body, json!({"success": true}));

    let resp = server
        .client
        .get(server.url(&format!("/api/clients/{id}")))
        .send()
        .await
        .expect("Failed to read client");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_concurrent_increments_are_not_lost() {
    let server = TestServer::memory().await;
    let client = create(&server, json!({"name": "Bob", "phone": "0700000000"})).await;
    let url = server.url(&format!(
        "/api/clients/{}",
        client["id"].as_str().expect("id is a string")
    ));

    let tasks: Vec<_> = (0..25)
        .map(|_| {
            let http = server.client.clone();
            let url = url.clone();
            tokio::spawn(async move { http.patch(url).send().await.map(|r| r.status()) })
        })
        .collect();

    for task in tasks {
        let status = task.await.expect("Task panicked").expect("Request failed");
        assert_eq!(status, StatusCode::OK);
    }

    let stored: Value = server
        .client
        .get(&url)
        .send()
        .await
        .expect("Failed to read client")
        .json()
        .await
        .expect("Failed to parse client");
    assert_eq!(stored["loyaltyPoints"], 25);
}

#[tokio::test]
async fn test_create_validation_persists_nothing() {
    let server = TestServer::memory().await;

    for body in [
        json!({"name": "", "phone": "0600000000"}),
        json!({"name": "Carol"}),
        json!({"name": "Carol", "phone": "0600000000", "loyaltyPoints": -3}),
    ] {
        let resp = server
            .client
            .post(server.url("/api/clients"))
            .json(&body)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let error: Value = resp.json().await.expect("Failed to parse error");
        assert!(error["error"].is_string());
    }

    let all: Vec<Value> = server
        .client
        .get(server.url("/api/clients"))
        .send()
        .await
        .expect("Failed to list clients")
        .json()
        .await
        .expect("Failed to parse list");
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_update_echoes_and_keeps_id() {
    let server = TestServer::memory().await;
    let client = create(
        &server,
        json!({"name": "Dana", "phone": "0800000000", "loyaltyPoints": 4}),
    )
    .await;
    let id = client["id"].as_str().expect("id is a string");

    let resp = server
        .client
        .put(server.url(&format!("/api/clients/{id}")))
        .json(&json!({"name": "Dana Ray", "phone": "0811111111", "address": "Lyon", "loyaltyPoints": 6}))
        .send()
        .await
        .expect("Failed to update client");
    assert_eq!(resp.status(), StatusCode::OK);

    let updated: Value = resp.json().await.expect("Failed to parse client");
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "Dana Ray");
    assert_eq!(updated["address"], "Lyon");
    assert_eq!(updated["loyaltyPoints"], 6);
}

#[tokio::test]
async fn test_malformed_and_unknown_ids() {
    let server = TestServer::memory().await;

    let resp = server
        .client
        .get(server.url("/api/clients/not-an-id"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let missing = uuid::Uuid::new_v4();
    let resp = server
        .client
        .patch(server.url(&format!("/api/clients/{missing}")))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = server
        .client
        .delete(server.url(&format!("/api/clients/{missing}")))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = TestServer::memory().await;

    let resp = server
        .client
        .get(server.url("/health"))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("x-request-id").map(|v| v.as_bytes()),
        Some(&b"trace-me"[..])
    );
}
