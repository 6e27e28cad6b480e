use axum::{http::StatusCode, response::Json};
use serde::Serialize;

use crate::model::Id;

/// Rejections raised by the resource layer before anything reaches the graph
/// or the store.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("A new {entity} cannot already have an ID")]
    IdentifierAlreadyPresent { entity: &'static str },

    #[error("Invalid id")]
    MissingIdentifier { entity: &'static str },

    #[error("Invalid ID: path has {path} but body has {body}")]
    IdentifierMismatch {
        entity: &'static str,
        path: Id,
        body: Id,
    },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Id },

    /// Update aimed at an identifier the store does not hold.
    #[error("Entity not found: {entity} {id}")]
    UpdateTargetMissing { entity: &'static str, id: Id },

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl ResourceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ResourceError::IdentifierAlreadyPresent { .. }
            | ResourceError::MissingIdentifier { .. }
            | ResourceError::IdentifierMismatch { .. }
            | ResourceError::UpdateTargetMissing { .. } => StatusCode::BAD_REQUEST,
            ResourceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ResourceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine-readable reason.
    pub fn key(&self) -> &'static str {
        match self {
            ResourceError::IdentifierAlreadyPresent { .. } => "idexists",
            ResourceError::MissingIdentifier { .. } => "idnull",
            ResourceError::IdentifierMismatch { .. } => "idinvalid",
            ResourceError::NotFound { .. } | ResourceError::UpdateTargetMissing { .. } => {
                "idnotfound"
            }
            ResourceError::Store(_) => "internal",
        }
    }

    pub fn entity(&self) -> Option<&'static str> {
        match self {
            ResourceError::IdentifierAlreadyPresent { entity }
            | ResourceError::MissingIdentifier { entity }
            | ResourceError::IdentifierMismatch { entity, .. }
            | ResourceError::NotFound { entity, .. }
            | ResourceError::UpdateTargetMissing { entity, .. } => Some(*entity),
            ResourceError::Store(_) => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

impl From<ResourceError> for (StatusCode, Json<ErrorResponse>) {
    fn from(error: ResourceError) -> Self {
        let status = error.status();
        if status.is_server_error() {
            log::error!("Request failed: {:#}", error);
        } else {
            log::debug!("Request rejected ({}): {}", error.key(), error);
        }

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                entity: error.entity().map(str::to_string),
                key: Some(error.key().to_string()),
            }),
        )
    }
}
