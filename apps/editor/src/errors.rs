use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::editor::commands::EditError;
use crate::export::ExportError;
use crate::templates::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Export preparation failed: {0}")]
    ExportPreparation(String),

    #[error("Export rasterization failed: {0}")]
    ExportRasterization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<EditError> for AppError {
    fn from(e: EditError) -> Self {
        match e {
            EditError::Validation(msg) => AppError::Validation(msg),
            EditError::NotFound(what) => AppError::NotFound(what),
            EditError::Reorder(e) => AppError::BadRequest(e.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::EmptyName => AppError::Validation(e.to_string()),
            StoreError::NotFound(id) => AppError::NotFound(format!("Template {id}")),
            StoreError::Encode(_) | StoreError::Io(_) => AppError::Storage(e.to_string()),
        }
    }
}

impl From<ExportError> for AppError {
    fn from(e: ExportError) -> Self {
        let message = e.user_message().to_string();
        match e {
            ExportError::Preparation(_) => AppError::ExportPreparation(message),
            ExportError::Rasterization(_) => AppError::ExportRasterization(message),
            ExportError::InProgress => AppError::Conflict(message),
            ExportError::Other(detail) => AppError::Internal(anyhow::anyhow!(detail)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::ExportPreparation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXPORT_PREPARATION_ERROR",
                msg.clone(),
            ),
            AppError::ExportRasterization(msg) => {
                tracing::error!("Export rasterization error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_RASTERIZATION_ERROR",
                    msg.clone(),
                )
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "Templates could not be saved to local storage".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
