use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt; // For `collect`
use serde_json::{json, Value};
use tower::ServiceExt; // For `oneshot`

use mortgage_crm::{
    config::{AppConfig, AppState},
    create_router,
    models::client::Client,
};

/// Builds the app around a fixed client collection (index 0 = most recent).
fn app_with(clients: Vec<Value>) -> Router {
    let clients: Vec<Client> = clients
        .into_iter()
        .map(|v| serde_json::from_value(v).expect("valid test client"))
        .collect();
    create_router(AppState::with_clients(AppConfig::default(), clients))
}

fn seeded_app() -> Router {
    app_with(vec![json!({
        "id": "1",
        "firstName": "ישראל",
        "lastName": "ישראלי",
        "phone": "0501111111",
        "email": "old@x.com",
        "requestedAmount": 100,
        "status": "חדש",
        "joinedDate": "2023-10-15"
    })])
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn webhook_liveness_answers_plain_text() {
    let app = app_with(vec![]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/webhook")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"Webhook is active. Use POST to send data.");
}

#[tokio::test]
async fn webhook_creates_client_for_unknown_phone() {
    let app = seeded_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/webhook",
        Some(json!({ "phone": "052-9999999", "firstName": "Dana" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "created");
    assert_eq!(body["message"], "New client created");
    let client_id = body["clientId"].as_str().unwrap().to_string();

    // The new record sits at the front of the list with intake defaults.
    let (status, list) = send(&app, "GET", "/api/clients", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["id"], client_id.as_str());
    assert_eq!(list[0]["firstName"], "Dana");
    assert_eq!(list[0]["lastName"], "חדש");
    assert_eq!(list[0]["status"], "חדש");
    assert_eq!(list[0]["requestedAmount"], 0);
    assert_eq!(list[0]["documents"], json!([]));
    assert_eq!(list[0]["reminders"], json!([]));
}

#[tokio::test]
async fn webhook_merges_on_normalized_phone_match() {
    let app = app_with(vec![
        json!({
            "id": "10",
            "firstName": "שרה",
            "lastName": "כהן",
            "phone": "052-9876543",
            "status": "אושר",
            "joinedDate": "2023-09-20"
        }),
        json!({
            "id": "1",
            "firstName": "ישראל",
            "lastName": "ישראלי",
            "phone": "0501111111",
            "email": "old@x.com",
            "requestedAmount": 100,
            "status": "בתהליך",
            "creditScore": 820,
            "joinedDate": "2023-10-15",
            "notes": "הערה קיימת"
        }),
    ]);

    // Punctuated variant of the second client's phone, no email sent.
    let (status, body) = send(
        &app,
        "POST",
        "/api/webhook",
        Some(json!({ "phone": "050-1111111", "requestedAmount": 500, "notes": "follow-up call" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "updated");
    assert_eq!(body["clientId"], "1");

    let (_, list) = send(&app, "GET", "/api/clients", None).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);

    // Moved to the front; untouched fields survive the merge.
    let merged = &list[0];
    assert_eq!(merged["id"], "1");
    assert_eq!(merged["email"], "old@x.com");
    assert_eq!(merged["requestedAmount"], 500);
    assert_eq!(merged["status"], "בתהליך");
    assert_eq!(merged["creditScore"], 820);
    let notes = merged["notes"].as_str().unwrap();
    assert!(notes.starts_with("הערה קיימת"));
    assert!(notes.contains("עדכון מהבוט: follow-up call"));
}

#[tokio::test]
async fn webhook_rejects_missing_phone_without_mutation() {
    let app = seeded_app();

    let (status, body) = send(&app, "POST", "/api/webhook", Some(json!({ "firstName": "X" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Missing phone number");

    let (_, list) = send(&app, "GET", "/api/clients", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_client_assigns_id_and_prepends() {
    let app = seeded_app();

    let (status, created) = send(
        &app,
        "POST",
        "/api/clients",
        Some(json!({
            "firstName": "מיכל",
            "lastName": "אברהם",
            "phone": "053-3334444",
            "requestedAmount": 1100000
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(created["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(created["status"], "חדש");

    let (_, list) = send(&app, "GET", "/api/clients", None).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["firstName"], "מיכל");
}

#[tokio::test]
async fn create_client_validates_required_fields() {
    let app = app_with(vec![]);

    let (status, body) = send(
        &app,
        "POST",
        "/api/clients",
        Some(json!({ "firstName": "מיכל", "phone": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["phone"].is_array());
}

#[tokio::test]
async fn update_client_merges_patch_fields_only() {
    let app = seeded_app();

    let (status, merged) = send(
        &app,
        "PUT",
        "/api/clients/1",
        Some(json!({ "status": "אושר", "creditScore": 700 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(merged["status"], "אושר");
    assert_eq!(merged["creditScore"], 700);
    assert_eq!(merged["email"], "old@x.com");
    assert_eq!(merged["requestedAmount"], 100);
}

#[tokio::test]
async fn update_unknown_client_is_404() {
    let app = seeded_app();

    let (status, body) = send(&app, "PUT", "/api/clients/404", Some(json!({ "notes": "x" }))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Client not found");
}

#[tokio::test]
async fn delete_client_then_repeat_is_404() {
    let app = seeded_app();

    let (status, body) = send(&app, "DELETE", "/api/clients/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "1");
    assert!(body["message"].as_str().is_some());

    let (status, _) = send(&app, "DELETE", "/api/clients/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = send(&app, "GET", "/api/clients", None).await;
    assert_eq!(list.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn dashboard_summary_reflects_store_contents() {
    let app = app_with(vec![
        json!({
            "id": "1", "firstName": "א", "lastName": "ב", "phone": "050",
            "requestedAmount": 850000, "status": "אושר", "creditScore": 750,
            "joinedDate": "2023-09-20",
            "documents": [
                { "id": "d1", "name": "אישור בעלות", "type": "PDF", "isSigned": true, "uploadDate": "2023-09-21" },
                { "id": "d2", "name": "תלושי שכר", "type": "PDF", "isSigned": false, "uploadDate": "2023-09-22" }
            ]
        }),
        json!({
            "id": "2", "firstName": "ג", "lastName": "ד", "phone": "052",
            "requestedAmount": 500000, "status": "נדחה", "creditScore": 540,
            "joinedDate": "2023-08-10"
        }),
    ]);

    let (status, summary) = send(&app, "GET", "/api/dashboard/summary", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["totalClients"], 2);
    assert_eq!(summary["activeProcesses"], 0);
    assert_eq!(summary["approvedVolume"], 850000);
    assert_eq!(summary["pendingDocuments"], 1);
    assert_eq!(summary["averageCreditScore"], 645);
    assert_eq!(summary["approvalRate"], 50);
    assert_eq!(summary["newLeadWait"]["leadCount"], 0);
}

#[tokio::test]
async fn dashboard_trend_and_breakdown_group_correctly() {
    let app = app_with(vec![
        json!({ "id": "1", "firstName": "א", "lastName": "", "phone": "050",
                "requestedAmount": 100, "status": "חדש", "joinedDate": "2023-01-05" }),
        json!({ "id": "2", "firstName": "ב", "lastName": "", "phone": "052",
                "requestedAmount": 200, "status": "חדש", "joinedDate": "2024-01-09" }),
        json!({ "id": "3", "firstName": "ג", "lastName": "", "phone": "054",
                "requestedAmount": 300, "status": "שולם", "joinedDate": "2023-10-25" }),
    ]);

    let (status, trend) = send(&app, "GET", "/api/dashboard/trend", None).await;
    assert_eq!(status, StatusCode::OK);
    let trend = trend.as_array().unwrap();
    assert_eq!(trend.len(), 2);
    // Year-agnostic: both January records share one bucket.
    assert_eq!(trend[0]["month"], 1);
    assert_eq!(trend[0]["count"], 2);
    assert_eq!(trend[1]["month"], 10);

    let (status, breakdown) = send(&app, "GET", "/api/dashboard/status-breakdown", None).await;
    assert_eq!(status, StatusCode::OK);
    let breakdown = breakdown.as_array().unwrap();
    assert_eq!(breakdown.len(), 2);
    let new_entry = breakdown
        .iter()
        .find(|e| e["status"] == "חדש")
        .unwrap();
    assert_eq!(new_entry["count"], 2);
    assert_eq!(new_entry["totalAmount"], 300);
}

#[tokio::test]
async fn unmatched_api_path_answers_json_404() {
    let app = app_with(vec![]);

    let (status, body) = send(&app, "GET", "/api/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "API route not found");
}

#[tokio::test]
async fn health_route_is_up() {
    let app = app_with(vec![]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
