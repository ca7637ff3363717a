// src/models/dashboard.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::client::MortgageStatus;

// 1. KPI cards
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_clients: usize,          // All records
    pub active_processes: usize,       // NEW + IN_PROCESS
    pub approved_volume: i64,          // Sum of approved requested amounts
    pub pending_documents: usize,      // Unsigned documents across all files
    pub average_credit_score: i32,     // Rounded mean, 0 when empty
    pub approval_rate: u32,            // Percent of decided files, rounded
    pub new_lead_wait: WaitTimeStats,
}

// 2. Wait time for NEW leads
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WaitTimeStats {
    pub lead_count: usize,
    pub average_hours: f64,
    // Strictly more than two hours of average wait.
    pub is_critical: bool,
}

// 3. Recruitment trend chart (month-of-year buckets)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrendEntry {
    // 1-12, ascending. Year-agnostic: multi-year data shares a bucket.
    pub month: u32,

    #[schema(example = "ינואר")]
    pub label: &'static str,

    pub count: usize,
}

// 4. Pie / bar chart per pipeline stage
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdownEntry {
    pub status: MortgageStatus,
    pub count: usize,
    pub total_amount: i64,
}
