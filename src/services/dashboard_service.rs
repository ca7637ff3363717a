// src/services/dashboard_service.rs

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

use crate::{
    models::{
        client::{Client, MortgageStatus},
        dashboard::{DashboardSummary, MonthlyTrendEntry, StatusBreakdownEntry, WaitTimeStats},
    },
    store::ClientStore,
};

// A NEW lead waiting longer than this (strictly) needs attention.
pub const WAIT_CRITICAL_HOURS: f64 = 2.0;

const HEBREW_MONTHS: [&str; 12] = [
    "ינואר", "פברואר", "מרץ", "אפריל", "מאי", "יוני",
    "יולי", "אוגוסט", "ספטמבר", "אוקטובר", "נובמבר", "דצמבר",
];

// =============================================================================
//  KPI CARDS
// =============================================================================
//
// Every function here is pure over a snapshot: same input, same output, no
// I/O, and an empty collection is always a valid input. Time-dependent
// calculations take `now` as a parameter.

pub fn total_clients(clients: &[Client]) -> usize {
    clients.len()
}

// Files still moving through the pipeline.
pub fn active_processes(clients: &[Client]) -> usize {
    clients
        .iter()
        .filter(|c| matches!(c.status, MortgageStatus::New | MortgageStatus::InProcess))
        .count()
}

pub fn approved_volume(clients: &[Client]) -> i64 {
    clients
        .iter()
        .filter(|c| c.status == MortgageStatus::Approved)
        .map(|c| c.requested_amount)
        .sum()
}

// Unsigned documents across all files.
pub fn pending_documents(clients: &[Client]) -> usize {
    clients
        .iter()
        .map(|c| c.documents.iter().filter(|d| !d.is_signed).count())
        .sum()
}

// Rounded mean over ALL clients. Unassessed clients carry a 0 score and
// deflate the average; the dashboard has always shown it that way.
pub fn average_credit_score(clients: &[Client]) -> i32 {
    if clients.is_empty() {
        return 0;
    }
    let sum: i64 = clients.iter().map(|c| i64::from(c.credit_score)).sum();
    (sum as f64 / clients.len() as f64).round() as i32
}

// Approved out of decided (approved + rejected), as a rounded percentage.
pub fn approval_rate(clients: &[Client]) -> u32 {
    let approved = clients
        .iter()
        .filter(|c| c.status == MortgageStatus::Approved)
        .count();
    let rejected = clients
        .iter()
        .filter(|c| c.status == MortgageStatus::Rejected)
        .count();
    let decided = approved + rejected;
    if decided == 0 {
        return 0;
    }
    ((approved as f64 / decided as f64) * 100.0).round() as u32
}

// =============================================================================
//  WAIT TIME (NEW leads)
// =============================================================================

// Hours since the lead entered the system. Legacy records have no
// creation timestamp, so they count from their joined date at local
// midnight.
pub fn hours_waiting(client: &Client, now: DateTime<Utc>) -> f64 {
    let created = client
        .created_at
        .unwrap_or_else(|| local_midnight(client.joined_date));
    (now - created).num_seconds() as f64 / 3600.0
}

pub fn is_critical_wait(hours: f64) -> bool {
    hours > WAIT_CRITICAL_HOURS
}

fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_hms_opt(0, 0, 0).expect("midnight exists");
    chrono::Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}

pub fn new_lead_wait(clients: &[Client], now: DateTime<Utc>) -> WaitTimeStats {
    let waits: Vec<f64> = clients
        .iter()
        .filter(|c| c.status == MortgageStatus::New)
        .map(|c| hours_waiting(c, now))
        .collect();

    let average_hours = if waits.is_empty() {
        0.0
    } else {
        waits.iter().sum::<f64>() / waits.len() as f64
    };

    WaitTimeStats {
        lead_count: waits.len(),
        average_hours,
        is_critical: is_critical_wait(average_hours),
    }
}

// =============================================================================
//  CHART GROUPINGS
// =============================================================================

// Join-month buckets, ascending, year-agnostic: January 2023 and January
// 2024 land in the same bucket (known limitation the frontend chart
// relies on). Empty buckets are omitted.
pub fn monthly_trend(clients: &[Client]) -> Vec<MonthlyTrendEntry> {
    let mut counts = [0usize; 12];
    for client in clients {
        counts[client.joined_date.month0() as usize] += 1;
    }

    counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(index, count)| MonthlyTrendEntry {
            month: index as u32 + 1,
            label: HEBREW_MONTHS[index],
            count: *count,
        })
        .collect()
}

// Count and requested volume per pipeline stage; empty stages are omitted
// (they would render as zero-width pie slices).
pub fn status_breakdown(clients: &[Client]) -> Vec<StatusBreakdownEntry> {
    MortgageStatus::ALL
        .iter()
        .map(|status| {
            let matching = clients.iter().filter(|c| c.status == *status);
            StatusBreakdownEntry {
                status: *status,
                count: matching.clone().count(),
                total_amount: matching.map(|c| c.requested_amount).sum(),
            }
        })
        .filter(|entry| entry.count > 0)
        .collect()
}

pub fn summary(clients: &[Client], now: DateTime<Utc>) -> DashboardSummary {
    DashboardSummary {
        total_clients: total_clients(clients),
        active_processes: active_processes(clients),
        approved_volume: approved_volume(clients),
        pending_documents: pending_documents(clients),
        average_credit_score: average_credit_score(clients),
        approval_rate: approval_rate(clients),
        new_lead_wait: new_lead_wait(clients, now),
    }
}

// =============================================================================
//  SERVICE
// =============================================================================

#[derive(Clone)]
pub struct DashboardService {
    store: ClientStore,
}

impl DashboardService {
    pub fn new(store: ClientStore) -> Self {
        Self { store }
    }

    pub fn get_summary(&self) -> DashboardSummary {
        summary(&self.store.list(), Utc::now())
    }

    pub fn get_monthly_trend(&self) -> Vec<MonthlyTrendEntry> {
        monthly_trend(&self.store.list())
    }

    pub fn get_status_breakdown(&self) -> Vec<StatusBreakdownEntry> {
        status_breakdown(&self.store.list())
    }
}
