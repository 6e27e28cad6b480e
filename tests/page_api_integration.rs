use page_builder_api::config::AppConfig;
use page_builder_api::{build_app, MemoryStore};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;

// Test client wrapper for making API calls
struct TestClient {
    client: Client,
    base_url: String,
}

impl TestClient {
    fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn post(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(&format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
    }

    async fn put(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.client
            .put(&format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
    }

    async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .get(&format!("{}{}", self.base_url, path))
            .send()
            .await
    }

    async fn delete(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .delete(&format!("{}{}", self.base_url, path))
            .send()
            .await
    }

    async fn patch(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.client
            .patch(&format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
    }

    /// POST and return the created document's identifier.
    async fn create(&self, path: &str, json: Value) -> String {
        let response = self.post(path, json).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED, "POST {}", path);
        let body: Value = response.json().await.unwrap();
        body["id"].as_str().unwrap().to_string()
    }
}

/// Serve a fresh in-memory store on an ephemeral port.
async fn spawn_server() -> TestClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let app = build_app(Arc::new(MemoryStore::new()), &AppConfig::default());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestClient::new(format!("http://{}", address))
}

#[tokio::test]
async fn test_page_layout_workflow() {
    let client = spawn_server().await;

    let health = client.get("/health").await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);

    // Page with a flex box holding a text element that has one child button element
    let page_id = client
        .create(
            "/api/pages",
            json!({ "name": "Orders", "page_id": 7, "full_screen": true }),
        )
        .await;
    let flex_box_id = client
        .create(
            "/api/flex-boxes",
            json!({ "justify_content": "space-between", "page": page_id }),
        )
        .await;
    let root_id = client
        .create(
            "/api/elements",
            json!({ "type": "Text", "flexbox": flex_box_id }),
        )
        .await;
    let child_id = client
        .create(
            "/api/elements",
            json!({ "type": "Button", "element": root_id }),
        )
        .await;

    let response = client
        .patch(
            &format!("/api/flex-boxes/{}", flex_box_id),
            json!({ "id": flex_box_id, "elements": [root_id] }),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let flex_box: Value = response.json().await.unwrap();
    assert_eq!(flex_box["justify_content"], "space-between");
    assert_eq!(flex_box["page"], page_id.as_str());
    assert_eq!(flex_box["elements"], json!([root_id]));

    let response = client
        .put(
            &format!("/api/elements/{}", root_id),
            json!({
                "id": root_id,
                "type": "Text",
                "flexbox": flex_box_id,
                "elements": [child_id],
            }),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let elements: Value = client
        .get("/api/elements")
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(elements["total"], 2);
    assert_eq!(elements["items"][0]["elements"], json!([child_id]));
    assert_eq!(elements["items"][1]["element"], root_id.as_str());

    // Deleting the root leaves the child and the flex box untouched
    let response = client
        .delete(&format!("/api/elements/{}", root_id))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let child: Value = client
        .get(&format!("/api/elements/{}", child_id))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(child["element"], root_id.as_str());

    let flex_box: Value = client
        .get(&format!("/api/flex-boxes/{}", flex_box_id))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(flex_box["elements"], json!([root_id]));
}

#[tokio::test]
async fn test_validation_errors() {
    let client = spawn_server().await;

    let response = client
        .post("/api/badges", json!({ "id": "badge-1", "color": "Grey" }))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["key"], "idexists");

    let badge_id = client
        .create("/api/badges", json!({ "color": "Grey" }))
        .await;

    let response = client
        .put(&format!("/api/badges/{}", badge_id), json!({ "color": "Plain" }))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["key"], "idnull");

    let response = client
        .patch(
            &format!("/api/badges/{}", badge_id),
            json!({ "id": "someone-else" }),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["key"], "idinvalid");

    let response = client
        .patch("/api/badges/missing", json!({ "id": "missing" }))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["key"], "idnotfound");

    let response = client.get("/api/badges/missing").await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["entity"], "badge");
    assert_eq!(body["key"], "idnotfound");

    let response = client
        .post("/api/badge-types", json!({ "type": "Purple" }))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}
