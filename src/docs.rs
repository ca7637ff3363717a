// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mortgage CRM API",
        description = "Lead pipeline, webhook intake and dashboard aggregates for the mortgage brokerage CRM."
    ),
    paths(
        // --- Clients ---
        handlers::clients::list_clients,
        handlers::clients::create_client,
        handlers::clients::update_client,
        handlers::clients::delete_client,

        // --- Webhook ---
        handlers::webhook::webhook_status,
        handlers::webhook::receive_lead,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::get_monthly_trend,
        handlers::dashboard::get_status_breakdown,
    ),
    components(
        schemas(
            models::client::Client,
            models::client::Document,
            models::client::Reminder,
            models::client::MortgageStatus,
            models::intake::LeadPayload,
            models::intake::IntakeOutcome,
            models::intake::IntakeStatus,
            models::dashboard::DashboardSummary,
            models::dashboard::WaitTimeStats,
            models::dashboard::MonthlyTrendEntry,
            models::dashboard::StatusBreakdownEntry,
            handlers::clients::CreateClientPayload,
            handlers::clients::UpdateClientPayload,
        )
    ),
    tags(
        (name = "Clients", description = "Client CRUD"),
        (name = "Webhook", description = "Bot lead intake"),
        (name = "Dashboard", description = "KPI and chart aggregates"),
    )
)]
pub struct ApiDoc;
