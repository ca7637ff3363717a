pub mod dashboard_service;
pub mod intake_service;

pub use dashboard_service::DashboardService;
pub use intake_service::IntakeService;
