// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    config::AppState,
    models::dashboard::{DashboardSummary, MonthlyTrendEntry, StatusBreakdownEntry},
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "KPI cards: counts, volumes, scores and NEW-lead wait time", body = DashboardSummary)
    )
)]
pub async fn get_summary(State(app_state): State<AppState>) -> impl IntoResponse {
    let summary = app_state.dashboard_service.get_summary();
    (StatusCode::OK, Json(summary))
}

// GET /api/dashboard/trend
#[utoipa::path(
    get,
    path = "/api/dashboard/trend",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Clients joined per calendar month (year-agnostic buckets)", body = Vec<MonthlyTrendEntry>)
    )
)]
pub async fn get_monthly_trend(State(app_state): State<AppState>) -> impl IntoResponse {
    let trend = app_state.dashboard_service.get_monthly_trend();
    (StatusCode::OK, Json(trend))
}

// GET /api/dashboard/status-breakdown
#[utoipa::path(
    get,
    path = "/api/dashboard/status-breakdown",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Count and requested volume per pipeline stage", body = Vec<StatusBreakdownEntry>)
    )
)]
pub async fn get_status_breakdown(State(app_state): State<AppState>) -> impl IntoResponse {
    let breakdown = app_state.dashboard_service.get_status_breakdown();
    (StatusCode::OK, Json(breakdown))
}
