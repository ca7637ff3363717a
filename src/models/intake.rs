// src/models/intake.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Inbound lead from the WhatsApp bot webhook. Everything is optional
// except the phone, which is checked by the reconciler (a missing phone
// must come back as the 400 body the bot knows, not a deserialization
// error).
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadPayload {
    #[schema(example = "דנה")]
    pub first_name: Option<String>,

    #[schema(example = "לוי")]
    pub last_name: Option<String>,

    #[schema(example = "050-1111111")]
    pub phone: Option<String>,

    #[schema(example = "dana@example.com")]
    pub email: Option<String>,

    #[schema(example = 900000)]
    pub requested_amount: Option<i64>,

    #[schema(example = "WhatsApp")]
    pub source: Option<String>,

    #[schema(example = "מעוניינת במשכנתא לדירה שנייה")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum IntakeStatus {
    Created,
    Updated,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntakeOutcome {
    pub status: IntakeStatus,

    #[schema(example = "1700000000000")]
    pub client_id: String,

    #[schema(example = "New client created")]
    pub message: String,
}
