// src/handlers/webhook.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    models::intake::{IntakeOutcome, LeadPayload},
};

// GET /api/webhook
//
// Liveness check for the bot integration (and the keep-alive self-ping).
#[utoipa::path(
    get,
    path = "/api/webhook",
    tag = "Webhook",
    responses(
        (status = 200, description = "Webhook is reachable", body = String)
    )
)]
pub async fn webhook_status() -> impl IntoResponse {
    (StatusCode::OK, "Webhook is active. Use POST to send data.")
}

// POST /api/webhook
//
// Lead intake from the WhatsApp bot: create-or-merge by normalized phone.
#[utoipa::path(
    post,
    path = "/api/webhook",
    tag = "Webhook",
    request_body = LeadPayload,
    responses(
        (status = 200, description = "Lead reconciled", body = IntakeOutcome),
        (status = 400, description = "Missing phone number")
    )
)]
pub async fn receive_lead(
    State(app_state): State<AppState>,
    Json(payload): Json<LeadPayload>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("webhook received: {:?}", payload);

    let outcome = app_state.intake_service.reconcile(&payload)?;

    Ok((StatusCode::OK, Json(outcome)))
}
