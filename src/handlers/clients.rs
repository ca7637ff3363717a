// src/handlers/clients.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Local, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::client::{Client, Document, MortgageStatus, Reminder},
};

// =============================================================================
//  PAYLOADS
// =============================================================================

// Manual form entry. Name and phone are required; everything else gets
// the same defaults the webhook intake uses.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientPayload {
    // Optional: the server assigns a timestamp id when absent.
    pub id: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "ישראל")]
    pub first_name: String,

    #[serde(default)]
    #[schema(example = "ישראלי")]
    pub last_name: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "050-1234567")]
    pub phone: String,

    #[serde(default)]
    #[schema(example = "israel@example.com")]
    pub email: String,

    #[serde(default)]
    #[validate(range(min = 0, message = "must_be_non_negative"))]
    #[schema(example = 1500000)]
    pub requested_amount: i64,

    pub status: Option<MortgageStatus>,

    #[serde(default)]
    #[validate(range(min = 0, message = "must_be_non_negative"))]
    #[schema(example = 18000)]
    pub monthly_income: i64,

    #[serde(default)]
    pub credit_score: i32,

    #[schema(value_type = Option<String>, format = Date, example = "2023-10-15")]
    pub joined_date: Option<NaiveDate>,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub documents: Vec<Document>,

    #[serde(default)]
    pub reminders: Vec<Reminder>,
}

// Field-by-field patch: absent fields stay untouched.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,

    #[validate(range(min = 0, message = "must_be_non_negative"))]
    pub requested_amount: Option<i64>,

    pub status: Option<MortgageStatus>,

    #[validate(range(min = 0, message = "must_be_non_negative"))]
    pub monthly_income: Option<i64>,

    pub credit_score: Option<i32>,

    #[schema(value_type = Option<String>, format = Date)]
    pub joined_date: Option<NaiveDate>,

    pub notes: Option<String>,
    pub documents: Option<Vec<Document>>,
    pub reminders: Option<Vec<Reminder>>,
}

impl UpdateClientPayload {
    // The id and createdAt are deliberately not patchable.
    fn apply(self, client: &mut Client) {
        if let Some(first_name) = self.first_name {
            client.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            client.last_name = last_name;
        }
        if let Some(phone) = self.phone {
            client.phone = phone;
        }
        if let Some(email) = self.email {
            client.email = email;
        }
        if let Some(requested_amount) = self.requested_amount {
            client.requested_amount = requested_amount;
        }
        if let Some(status) = self.status {
            client.status = status;
        }
        if let Some(monthly_income) = self.monthly_income {
            client.monthly_income = monthly_income;
        }
        if let Some(credit_score) = self.credit_score {
            client.credit_score = credit_score;
        }
        if let Some(joined_date) = self.joined_date {
            client.joined_date = joined_date;
        }
        if let Some(notes) = self.notes {
            client.notes = notes;
        }
        if let Some(documents) = self.documents {
            client.documents = documents;
        }
        if let Some(reminders) = self.reminders {
            client.reminders = reminders;
        }
    }
}

// =============================================================================
//  HANDLERS
// =============================================================================

// GET /api/clients
#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "Clients",
    responses(
        (status = 200, description = "Full client list, most recently touched first", body = Vec<Client>)
    )
)]
pub async fn list_clients(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.store.list())
}

// POST /api/clients
#[utoipa::path(
    post,
    path = "/api/clients",
    tag = "Clients",
    request_body = CreateClientPayload,
    responses(
        (status = 201, description = "Client created", body = Client),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let now = Utc::now();
    let client = Client {
        id: payload
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| now.timestamp_millis().to_string()),
        first_name: payload.first_name,
        last_name: payload.last_name,
        phone: payload.phone,
        email: payload.email,
        requested_amount: payload.requested_amount,
        status: payload.status.unwrap_or(MortgageStatus::New),
        monthly_income: payload.monthly_income,
        credit_score: payload.credit_score,
        joined_date: payload
            .joined_date
            .unwrap_or_else(|| Local::now().date_naive()),
        created_at: Some(now),
        notes: payload.notes,
        documents: payload.documents,
        reminders: payload.reminders,
    };

    app_state.store.insert_front(client.clone());
    tracing::info!("client created manually (id {})", client.id);

    Ok((StatusCode::CREATED, Json(client)))
}

// PUT /api/clients/{id}
#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    tag = "Clients",
    request_body = UpdateClientPayload,
    params(
        ("id" = String, Path, description = "Client id")
    ),
    responses(
        (status = 200, description = "Merged client", body = Client),
        (status = 404, description = "Unknown client id")
    )
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let merged = app_state
        .store
        .update_by_id(&id, |client| payload.apply(client))
        .ok_or(AppError::ClientNotFound)?;

    Ok((StatusCode::OK, Json(merged)))
}

// DELETE /api/clients/{id}
#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    tag = "Clients",
    params(
        ("id" = String, Path, description = "Client id")
    ),
    responses(
        (status = 200, description = "Client removed (documents and reminders go with it)"),
        (status = 404, description = "Unknown client id")
    )
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let removed = app_state
        .store
        .remove_by_id(&id)
        .ok_or(AppError::ClientNotFound)?;

    tracing::info!("client deleted (id {})", removed.id);

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Client deleted", "id": removed.id })),
    ))
}
