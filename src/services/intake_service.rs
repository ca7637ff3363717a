// src/services/intake_service.rs

use chrono::{DateTime, Local, Utc};

use crate::{
    common::error::AppError,
    models::{
        client::{Client, MortgageStatus},
        intake::{IntakeOutcome, IntakeStatus, LeadPayload},
    },
    store::ClientStore,
};

// =============================================================================
//  PHONE NORMALIZATION
// =============================================================================

// Digits-only form of a phone number, the intake dedup key.
// "050-1234567" and "0501234567" are the same lead.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// =============================================================================
//  RECONCILE (pure core)
// =============================================================================

// Create-or-merge for an inbound bot lead, keyed by normalized phone.
//
// Runs inside a single store lock (see IntakeService): the match scan and
// the mutation must not interleave with concurrent webhook calls, or two
// records could be created for the same phone.
//
// Matching takes the FIRST client in current order whose raw phone equals
// the payload phone or whose normalized phone equals the normalized
// payload phone. Order is touch-recency, so duplicates that entered
// through other paths resolve to the most recently active record. The
// store never enforces normalized-phone uniqueness.
pub fn reconcile(
    clients: &mut Vec<Client>,
    payload: &LeadPayload,
    now: DateTime<Utc>,
) -> Result<IntakeOutcome, AppError> {
    let phone = non_empty(&payload.phone).ok_or(AppError::MissingPhone)?;
    let key = normalize_phone(phone);

    let matched = clients
        .iter()
        .position(|c| c.phone == phone || normalize_phone(&c.phone) == key);

    match matched {
        Some(index) => {
            // --- MERGE: existing client contacted us again ---
            let mut client = clients.remove(index);

            let local = now.with_timezone(&Local);
            let update_note = format!(
                "\n[{}] עדכון מהבוט: {}",
                local.format("%d.%m.%Y %H:%M"),
                non_empty(&payload.notes).unwrap_or("הלקוח יצר קשר נוסף"),
            );
            client.notes.push_str(&update_note);

            // Overwrite only what the bot actually sent. Pipeline fields
            // (status, income, credit score, documents, reminders) and the
            // identity fields (id, joinedDate, createdAt) are never merged.
            if let Some(email) = non_empty(&payload.email) {
                client.email = email.to_string();
            }
            if let Some(amount) = payload.requested_amount.filter(|a| *a != 0) {
                client.requested_amount = amount;
            }
            if let Some(first_name) = non_empty(&payload.first_name) {
                client.first_name = first_name.to_string();
            }
            if let Some(last_name) = non_empty(&payload.last_name) {
                client.last_name = last_name.to_string();
            }

            let client_id = client.id.clone();
            clients.insert(0, client);

            Ok(IntakeOutcome {
                status: IntakeStatus::Updated,
                client_id,
                message: "Client found and updated".to_string(),
            })
        }
        None => {
            // --- CREATE: first contact from this phone ---
            let client = new_client(payload, phone, now);
            let client_id = client.id.clone();
            clients.insert(0, client);

            Ok(IntakeOutcome {
                status: IntakeStatus::Created,
                client_id,
                message: "New client created".to_string(),
            })
        }
    }
}

// Fills every optional payload field with its documented default. The id
// is a millisecond timestamp string: opaque, monotonic enough at webhook
// rates, not cryptographically unique.
fn new_client(payload: &LeadPayload, phone: &str, now: DateTime<Utc>) -> Client {
    let notes = match non_empty(&payload.notes) {
        Some(notes) => format!("ליד חדש מהבוט: {notes}"),
        None => format!(
            "ליד נקלט אוטומטית ממקור: {}",
            non_empty(&payload.source).unwrap_or("Bot"),
        ),
    };

    Client {
        id: now.timestamp_millis().to_string(),
        first_name: non_empty(&payload.first_name).unwrap_or("לקוח").to_string(),
        last_name: non_empty(&payload.last_name).unwrap_or("חדש").to_string(),
        phone: phone.to_string(),
        email: non_empty(&payload.email).unwrap_or("").to_string(),
        requested_amount: payload.requested_amount.unwrap_or(0),
        status: MortgageStatus::New,
        monthly_income: 0,
        credit_score: 0,
        joined_date: now.with_timezone(&Local).date_naive(),
        created_at: Some(now),
        notes,
        documents: vec![],
        reminders: vec![],
    }
}

// =============================================================================
//  SERVICE
// =============================================================================

#[derive(Clone)]
pub struct IntakeService {
    store: ClientStore,
}

impl IntakeService {
    pub fn new(store: ClientStore) -> Self {
        Self { store }
    }

    pub fn reconcile(&self, payload: &LeadPayload) -> Result<IntakeOutcome, AppError> {
        let outcome = self
            .store
            .transact(|clients| reconcile(clients, payload, Utc::now()))?;

        match outcome.status {
            IntakeStatus::Updated => {
                tracing::info!("webhook: client updated (id {})", outcome.client_id)
            }
            IntakeStatus::Created => {
                tracing::info!("webhook: new client created (id {})", outcome.client_id)
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn existing(id: &str, phone: &str) -> Client {
        Client {
            id: id.to_string(),
            first_name: "ישראל".to_string(),
            last_name: "ישראלי".to_string(),
            phone: phone.to_string(),
            email: "old@x.com".to_string(),
            requested_amount: 100,
            status: MortgageStatus::InProcess,
            monthly_income: 18_000,
            credit_score: 820,
            joined_date: NaiveDate::from_ymd_opt(2023, 10, 15).unwrap(),
            created_at: None,
            notes: "הערה קיימת".to_string(),
            documents: vec![],
            reminders: vec![],
        }
    }

    fn payload(phone: &str) -> LeadPayload {
        LeadPayload {
            phone: Some(phone.to_string()),
            ..LeadPayload::default()
        }
    }

    #[test]
    fn creates_new_client_with_defaults() {
        let mut clients = vec![];
        let lead = LeadPayload {
            first_name: Some("Dana".to_string()),
            ..payload("050-1111111")
        };

        let outcome = reconcile(&mut clients, &lead, Utc::now()).unwrap();

        assert_eq!(outcome.status, IntakeStatus::Created);
        let created = &clients[0];
        assert_eq!(created.id, outcome.client_id);
        assert_eq!(created.first_name, "Dana");
        assert_eq!(created.last_name, "חדש");
        assert_eq!(created.status, MortgageStatus::New);
        assert_eq!(created.requested_amount, 0);
        assert!(created.documents.is_empty());
        assert!(created.reminders.is_empty());
        assert!(created.notes.contains("ליד נקלט אוטומטית ממקור: Bot"));
    }

    #[test]
    fn matches_on_normalized_phone_and_merges() {
        let mut clients = vec![existing("1", "0501111111")];
        let lead = LeadPayload {
            notes: Some("follow-up call".to_string()),
            ..payload("050-1111111")
        };

        let outcome = reconcile(&mut clients, &lead, Utc::now()).unwrap();

        assert_eq!(outcome.status, IntakeStatus::Updated);
        assert_eq!(outcome.client_id, "1");
        assert_eq!(clients.len(), 1);
        assert!(clients[0].notes.starts_with("הערה קיימת"));
        assert!(clients[0].notes.contains("עדכון מהבוט: follow-up call"));
    }

    #[test]
    fn merge_keeps_fields_the_payload_did_not_send() {
        let mut clients = vec![existing("1", "050-2222222")];
        let lead = LeadPayload {
            requested_amount: Some(500),
            ..payload("050-2222222")
        };

        reconcile(&mut clients, &lead, Utc::now()).unwrap();

        let merged = &clients[0];
        assert_eq!(merged.email, "old@x.com");
        assert_eq!(merged.requested_amount, 500);
        assert_eq!(merged.first_name, "ישראל");
        assert_eq!(merged.status, MortgageStatus::InProcess);
        assert_eq!(merged.credit_score, 820);
    }

    #[test]
    fn zero_amount_does_not_overwrite() {
        let mut clients = vec![existing("1", "050-2222222")];
        let lead = LeadPayload {
            requested_amount: Some(0),
            ..payload("050-2222222")
        };

        reconcile(&mut clients, &lead, Utc::now()).unwrap();
        assert_eq!(clients[0].requested_amount, 100);
    }

    #[test]
    fn missing_phone_is_rejected_without_mutation() {
        let mut clients = vec![existing("1", "050-2222222")];
        let lead = LeadPayload {
            first_name: Some("X".to_string()),
            ..LeadPayload::default()
        };

        let err = reconcile(&mut clients, &lead, Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::MissingPhone));
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].notes, "הערה קיימת");
    }

    #[test]
    fn repeat_intake_is_idempotent_on_record_count() {
        let mut clients = vec![];
        let lead = LeadPayload {
            notes: Some("שיחה ראשונה".to_string()),
            ..payload("052-3334444")
        };

        let first = reconcile(&mut clients, &lead, Utc::now()).unwrap();
        let second = reconcile(&mut clients, &lead, Utc::now()).unwrap();

        assert_eq!(first.status, IntakeStatus::Created);
        assert_eq!(second.status, IntakeStatus::Updated);
        assert_eq!(second.client_id, first.client_id);
        assert_eq!(clients.len(), 1);
        // One creation line plus one appended update line.
        assert!(clients[0].notes.starts_with("ליד חדש מהבוט: שיחה ראשונה"));
        assert_eq!(clients[0].notes.matches("עדכון מהבוט").count(), 1);
    }

    #[test]
    fn merge_moves_matched_record_to_front() {
        let mut clients = vec![
            existing("1", "050-1111111"),
            existing("2", "050-2222222"),
            existing("3", "050-3333333"),
        ];

        let outcome = reconcile(&mut clients, &payload("0503333333"), Utc::now()).unwrap();

        assert_eq!(outcome.status, IntakeStatus::Updated);
        let ids: Vec<&str> = clients.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn first_match_in_order_wins_when_duplicates_exist() {
        // Two records normalizing to the same key can coexist; the most
        // recently touched one (front of the list) absorbs the update.
        let mut clients = vec![existing("front", "050-9999999"), existing("back", "0509999999")];

        let outcome = reconcile(&mut clients, &payload("0509999999"), Utc::now()).unwrap();

        assert_eq!(outcome.client_id, "front");
        assert_eq!(clients.len(), 2);
    }
}
