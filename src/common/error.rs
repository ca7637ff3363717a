// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Application error type, with `thiserror` for ergonomics.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error")]
    ValidationError(#[from] validator::ValidationErrors),

    // Webhook intake without a phone number. The bot integration parses
    // this exact body, so the shape is load-bearing.
    #[error("Missing phone number")]
    MissingPhone,

    #[error("Client not found")]
    ClientNotFound,

    // Generic variant for anything unexpected.
    #[error("Internal server error")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Return every validation detail, keyed by field.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::MissingPhone => {
                let body = Json(json!({
                    "status": "error",
                    "message": "Missing phone number",
                }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::ClientNotFound => {
                let body = Json(json!({ "message": "Client not found" }));
                (StatusCode::NOT_FOUND, body).into_response()
            }
            // The detailed cause goes to the log, not to the caller.
            AppError::InternalServerError(ref e) => {
                tracing::error!("Internal server error: {}", e);
                let body = Json(json!({ "error": "An unexpected error occurred." }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
