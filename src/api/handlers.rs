use axum::{
    extract::{OriginalUri, Path, State},
    http::{header::LOCATION, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::Json,
    Json as RequestJson,
};
use serde::Serialize;
use std::sync::Arc;

use crate::api::error::{ApiError, ResourceError};
use crate::model::{Document, Id};
use crate::store::traits::Store;

pub type AppState<S> = Arc<S>;

pub const ALERT_HEADER: &str = "x-pagebuilder-alert";
pub const PARAMS_HEADER: &str = "x-pagebuilder-params";

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

/// `pagebuilder.<entity>.<action>` alert plus the affected identifier.
fn alert_headers(action: &str, entity: &str, id: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&format!("pagebuilder.{}.{}", entity, action)) {
        headers.insert(HeaderName::from_static(ALERT_HEADER), value);
    }
    if let Ok(value) = HeaderValue::from_str(id) {
        headers.insert(HeaderName::from_static(PARAMS_HEADER), value);
    }
    headers
}

/// Checks shared by full and partial updates: the body must carry an
/// identifier, it must match the path, and the document must exist.
async fn check_update_target<D: Document, S: Store>(
    store: &S,
    id: &Id,
    document: &D,
) -> Result<(), ResourceError> {
    let Some(body_id) = document.id() else {
        return Err(ResourceError::MissingIdentifier {
            entity: D::ENTITY_NAME,
        });
    };
    if body_id != id {
        return Err(ResourceError::IdentifierMismatch {
            entity: D::ENTITY_NAME,
            path: id.clone(),
            body: body_id.clone(),
        });
    }
    if !store.exists_by_id::<D>(id).await? {
        return Err(ResourceError::UpdateTargetMissing {
            entity: D::ENTITY_NAME,
            id: id.clone(),
        });
    }
    Ok(())
}

pub async fn create<D: Document, S: Store>(
    State(store): State<AppState<S>>,
    OriginalUri(uri): OriginalUri,
    RequestJson(document): RequestJson<D>,
) -> Result<(StatusCode, HeaderMap, Json<D>), ApiError> {
    log::debug!("REST request to save {} : {:?}", D::ENTITY_NAME, document);
    if document.id().is_some() {
        return Err(ResourceError::IdentifierAlreadyPresent {
            entity: D::ENTITY_NAME,
        }
        .into());
    }

    let saved = store.save(document).await.map_err(ResourceError::from)?;
    let id = saved.id().cloned().unwrap_or_default();

    let mut headers = alert_headers("created", D::ENTITY_NAME, &id);
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), id);
    if let Ok(value) = HeaderValue::from_str(&location) {
        headers.insert(LOCATION, value);
    }

    Ok((StatusCode::CREATED, headers, Json(saved)))
}

pub async fn update<D: Document, S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
    RequestJson(document): RequestJson<D>,
) -> Result<(HeaderMap, Json<D>), ApiError> {
    log::debug!("REST request to update {} : {}, {:?}", D::ENTITY_NAME, id, document);
    check_update_target(&*store, &id, &document).await?;

    let saved = store.save(document).await.map_err(ResourceError::from)?;
    Ok((alert_headers("updated", D::ENTITY_NAME, &id), Json(saved)))
}

pub async fn partial_update<D: Document, S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
    RequestJson(patch): RequestJson<D>,
) -> Result<(HeaderMap, Json<D>), ApiError> {
    log::debug!("REST request to partial update {} : {}, {:?}", D::ENTITY_NAME, id, patch);
    check_update_target(&*store, &id, &patch).await?;

    let mut existing = store
        .find_by_id::<D>(&id)
        .await
        .map_err(ResourceError::from)?
        .ok_or_else(|| ResourceError::UpdateTargetMissing {
            entity: D::ENTITY_NAME,
            id: id.clone(),
        })?;
    existing.merge(patch);

    let saved = store.save(existing).await.map_err(ResourceError::from)?;
    Ok((alert_headers("updated", D::ENTITY_NAME, &id), Json(saved)))
}

pub async fn list<D: Document, S: Store>(
    State(store): State<AppState<S>>,
) -> Result<Json<ListResponse<D>>, ApiError> {
    log::debug!("REST request to get all {}", D::ENTITY_NAME);
    let items = store.find_all::<D>().await.map_err(ResourceError::from)?;
    let total = items.len();
    Ok(Json(ListResponse { items, total }))
}

pub async fn get<D: Document, S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<D>, ApiError> {
    log::debug!("REST request to get {} : {}", D::ENTITY_NAME, id);
    match store.find_by_id::<D>(&id).await {
        Ok(Some(document)) => Ok(Json(document)),
        Ok(None) => Err(ResourceError::NotFound {
            entity: D::ENTITY_NAME,
            id,
        }
        .into()),
        Err(e) => Err(ResourceError::from(e).into()),
    }
}

pub async fn delete<D: Document, S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<(StatusCode, HeaderMap), ApiError> {
    log::debug!("REST request to delete {} : {}", D::ENTITY_NAME, id);
    store
        .delete_by_id::<D>(&id)
        .await
        .map_err(ResourceError::from)?;
    Ok((
        StatusCode::NO_CONTENT,
        alert_headers("deleted", D::ENTITY_NAME, &id),
    ))
}
