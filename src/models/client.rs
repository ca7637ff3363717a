// src/models/client.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// --- ENUMS ---

// Pipeline stage of a mortgage file. The wire values are the Hebrew labels
// the frontend renders directly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum MortgageStatus {
    #[serde(rename = "חדש")]
    New,
    #[serde(rename = "בתהליך")]
    InProcess,
    #[serde(rename = "אושר")]
    Approved,
    #[serde(rename = "נדחה")]
    Rejected,
    #[serde(rename = "שולם")]
    Paid,
}

impl MortgageStatus {
    pub const ALL: [MortgageStatus; 5] = [
        MortgageStatus::New,
        MortgageStatus::InProcess,
        MortgageStatus::Approved,
        MortgageStatus::Rejected,
        MortgageStatus::Paid,
    ];
}

// --- EMBEDDED SUB-RECORDS ---

// Documents and reminders live inside their Client (no separate ownership,
// deleting the client deletes them too). Ids are filled with a UUID when
// the caller does not send one.
fn new_entry_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default = "new_entry_id")]
    pub id: String,

    #[schema(example = "תעודת זהות")]
    pub name: String,

    #[serde(rename = "type")]
    #[schema(example = "PDF")]
    pub doc_type: String,

    pub is_signed: bool,
    pub upload_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    #[serde(default = "new_entry_id")]
    pub id: String,

    pub due_date: NaiveDate,

    #[schema(example = "10:00")]
    pub due_time: String,

    #[schema(example = "להתקשר לבדוק סטטוס מסמכים")]
    pub note: String,

    pub is_completed: bool,
}

// --- CLIENT ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    // Timestamp-derived, assigned once at creation, never reassigned.
    #[schema(example = "1700000000000")]
    pub id: String,

    #[schema(example = "ישראל")]
    pub first_name: String,

    // May be empty.
    #[schema(example = "ישראלי")]
    pub last_name: String,

    // Raw, as entered. Intake dedup works on the digits-only form.
    #[schema(example = "050-1234567")]
    pub phone: String,

    #[serde(default)]
    #[schema(example = "israel@example.com")]
    pub email: String,

    // Whole currency units.
    #[serde(default)]
    #[schema(example = 1500000)]
    pub requested_amount: i64,

    pub status: MortgageStatus,

    #[serde(default)]
    #[schema(example = 18000)]
    pub monthly_income: i64,

    // 0 means "not yet assessed".
    #[serde(default)]
    #[schema(example = 820)]
    pub credit_score: i32,

    #[schema(value_type = String, format = Date, example = "2023-10-15")]
    pub joined_date: NaiveDate,

    // Absent on legacy records; wait-time analytics fall back to
    // joined_date at local midnight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    // Append-only by convention: intake events append timestamped lines.
    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub documents: Vec<Document>,

    #[serde(default)]
    pub reminders: Vec<Reminder>,
}
