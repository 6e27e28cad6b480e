use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::api::handlers;
use crate::model::{self, Document};
use crate::store::traits::Store;

/// CRUD endpoints for one document type, mounted at `path` and `path/:id`.
pub fn entity_routes<D: Document, S: Store + 'static>(path: &str) -> Router<Arc<S>> {
    Router::new()
        .route(
            path,
            post(handlers::create::<D, S>).get(handlers::list::<D, S>),
        )
        .route(
            &format!("{}/:id", path),
            get(handlers::get::<D, S>)
                .put(handlers::update::<D, S>)
                .patch(handlers::partial_update::<D, S>)
                .delete(handlers::delete::<D, S>),
        )
}

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    let api = Router::new()
        .merge(entity_routes::<model::Attributes, S>("/attributes"))
        .merge(entity_routes::<model::Badge, S>("/badges"))
        .merge(entity_routes::<model::BadgeType, S>("/badge-types"))
        .merge(entity_routes::<model::Body, S>("/bodies"))
        .merge(entity_routes::<model::Button, S>("/buttons"))
        .merge(entity_routes::<model::DisplayAtt, S>("/display-atts"))
        .merge(entity_routes::<model::Elements, S>("/elements"))
        .merge(entity_routes::<model::FlexBox, S>("/flex-boxes"))
        .merge(entity_routes::<model::FormWrap, S>("/form-wraps"))
        .merge(entity_routes::<model::Head, S>("/heads"))
        .merge(entity_routes::<model::Icon, S>("/icons"))
        .merge(entity_routes::<model::Image, S>("/images"))
        .merge(entity_routes::<model::Label, S>("/labels"))
        .merge(entity_routes::<model::ObjectContainingString, S>(
            "/object-containing-strings",
        ))
        .merge(entity_routes::<model::Page, S>("/pages"))
        .merge(entity_routes::<model::Spacing, S>("/spacings"))
        .merge(entity_routes::<model::TabelValues, S>("/tabel-values"))
        .merge(entity_routes::<model::Table, S>("/tables"))
        .merge(entity_routes::<model::Text, S>("/texts"));

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
}

/// Permissive when no origins are configured.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
        .expose_headers([
            axum::http::header::LOCATION,
            axum::http::HeaderName::from_static(handlers::ALERT_HEADER),
            axum::http::HeaderName::from_static(handlers::PARAMS_HEADER),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        create_router::<MemoryStore>().with_state(Arc::new(MemoryStore::new()))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        }
    }

    async fn create(app: &Router, uri: &str, body: Value) -> Value {
        let response = send(app, Method::POST, uri, Some(body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let response = send(&app(), Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn create_assigns_identifier_and_location() {
        let app = app();
        let response = send(
            &app,
            Method::POST,
            "/api/pages",
            Some(json!({ "name": "Home", "page_id": 3, "type": "dashboard" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let headers = response.headers().clone();
        let body = json_body(response).await;
        let id = body["id"].as_str().unwrap().to_string();

        assert_eq!(
            headers[header::LOCATION].to_str().unwrap(),
            format!("/api/pages/{}", id)
        );
        assert_eq!(headers[handlers::ALERT_HEADER], "pagebuilder.page.created");
        assert_eq!(headers[handlers::PARAMS_HEADER].to_str().unwrap(), id);
        assert_eq!(body["type"], "dashboard");

        let fetched = send(&app, Method::GET, &format!("/api/pages/{}", id), None).await;
        assert_eq!(fetched.status(), StatusCode::OK);
        assert_eq!(json_body(fetched).await, body);
    }

    #[tokio::test]
    async fn create_rejects_existing_identifier() {
        let response = send(
            &app(),
            Method::POST,
            "/api/buttons",
            Some(json!({ "id": "b-1", "display_text": "Go" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["key"], "idexists");
        assert_eq!(body["entity"], "button");
    }

    #[tokio::test]
    async fn update_validates_identifiers() {
        let app = app();
        let created = create(&app, "/api/texts", json!({ "display_text": "Hi" })).await;
        let id = created["id"].as_str().unwrap();
        let uri = format!("/api/texts/{}", id);

        let missing = send(&app, Method::PUT, &uri, Some(json!({ "display_text": "x" }))).await;
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(missing).await["key"], "idnull");

        let mismatch = send(&app, Method::PUT, &uri, Some(json!({ "id": "other" }))).await;
        assert_eq!(mismatch.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(mismatch).await["key"], "idinvalid");

        let unknown = send(
            &app,
            Method::PUT,
            "/api/texts/nope",
            Some(json!({ "id": "nope" })),
        )
        .await;
        assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(unknown).await["key"], "idnotfound");

        let unknown_patch = send(
            &app,
            Method::PATCH,
            "/api/texts/nope",
            Some(json!({ "id": "nope" })),
        )
        .await;
        assert_eq!(unknown_patch.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(unknown_patch).await["key"], "idnotfound");

        let unknown_get = send(&app, Method::GET, "/api/texts/nope", None).await;
        assert_eq!(unknown_get.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_replaces_whole_document() {
        let app = app();
        let created = create(
            &app,
            "/api/icons",
            json!({ "aria_label": "close", "attributes": "a-1" }),
        )
        .await;
        let id = created["id"].as_str().unwrap();

        let response = send(
            &app,
            Method::PUT,
            &format!("/api/icons/{}", id),
            Some(json!({ "id": id, "aria_label": "open" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[handlers::ALERT_HEADER],
            "pagebuilder.icon.updated"
        );
        let body = json_body(response).await;
        assert_eq!(body["aria_label"], "open");
        assert!(body.get("attributes").is_none());
    }

    #[tokio::test]
    async fn partial_update_keeps_unset_fields() {
        let app = app();
        let created = create(
            &app,
            "/api/flex-boxes",
            json!({ "justify_content": "center", "spacing": "s-1" }),
        )
        .await;
        let id = created["id"].as_str().unwrap();

        let response = send(
            &app,
            Method::PATCH,
            &format!("/api/flex-boxes/{}", id),
            Some(json!({ "id": id, "spacing": "s-2" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["justify_content"], "center");
        assert_eq!(body["spacing"], "s-2");
    }

    #[tokio::test]
    async fn list_returns_documents_in_insertion_order() {
        let app = app();
        for name in ["first", "second", "third"] {
            create(&app, "/api/labels", json!({ "text": name })).await;
        }

        let response = send(&app, Method::GET, "/api/labels", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["total"], 3);
        let texts: Vec<&str> = body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["text"].as_str().unwrap())
            .collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn delete_returns_no_content_and_is_idempotent() {
        let app = app();
        let created = create(&app, "/api/images", json!({ "source": "logo.png" })).await;
        let uri = format!("/api/images/{}", created["id"].as_str().unwrap());

        let deleted = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            deleted.headers()[handlers::ALERT_HEADER],
            "pagebuilder.image.deleted"
        );

        let gone = send(&app, Method::GET, &uri, None).await;
        assert_eq!(gone.status(), StatusCode::NOT_FOUND);

        let again = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(again.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn unknown_element_type_is_rejected() {
        let response = send(
            &app(),
            Method::POST,
            "/api/elements",
            Some(json!({ "type": "Video" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn function_text_element_type_uses_wire_spelling() {
        let app = app();
        let body = create(&app, "/api/elements", json!({ "type": "Function_text" })).await;
        assert_eq!(body["type"], "Function_text");
    }

    async fn preflight(app: Router, origin: &str) -> Response {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/pages")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        app.oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn cors_allows_only_configured_origins() {
        let origins = ["http://localhost:4200".to_string(), "bad\norigin".to_string()];
        let app = app().layer(cors_layer(&origins));

        let allowed = preflight(app.clone(), "http://localhost:4200").await;
        assert_eq!(
            allowed.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:4200"
        );

        let rejected = preflight(app, "http://evil.test").await;
        assert!(rejected
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn cors_without_origins_is_permissive() {
        let app = app().layer(cors_layer(&[]));

        let response = preflight(app, "http://anywhere.test").await;
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
