//! # hrdesk Entry Point
//!
//! Loads configuration, seeds the in-memory store and logs a dashboard
//! summary.

use anyhow::Context;
use hrdesk::{
    config::ConfigLoader, controllers::DashboardController, models::ServiceInfo, state::AppState,
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from layered env files and variables
    let config = ConfigLoader::new()
        .load()
        .context("failed to load configuration")?;

    telemetry::init_tracing(&config).context("failed to initialize telemetry")?;

    let info = ServiceInfo::default();
    tracing::info!(
        service = %info.service,
        version = %info.version,
        profile = %config.profile,
        "Starting"
    );
    if let Ok(redacted_json) = config.redacted_json() {
        tracing::debug!(config = %redacted_json, "Effective configuration");
    }

    let state = AppState::from_config(config).context("failed to seed collections")?;

    let mut dashboard = DashboardController::new(state);
    dashboard.load().await;
    if let Some(message) = dashboard.status().error() {
        anyhow::bail!("dashboard unavailable: {message}");
    }

    let stats = dashboard.stats();
    tracing::info!(
        total_employees = stats.total_employees,
        active_employees = stats.active_employees,
        departments = stats.departments,
        pending_requests = stats.pending_requests,
        "Dashboard loaded"
    );
    for preview in dashboard.pending_preview() {
        tracing::info!(
            leave_request_id = preview.request.id,
            employee = %preview.employee.full_name(),
            leave_type = preview.request.leave_type.label(),
            days = preview.request.days(),
            "Pending leave request"
        );
    }

    Ok(())
}
