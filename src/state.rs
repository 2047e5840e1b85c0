//! Application state shared by every page controller.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::latency::{self, SharedLatency};
use crate::repositories::{
    DepartmentRepository, EmployeeRepository, LeaveRequestRepository, OnboardingRepository,
};
use crate::seeds::{FixtureError, FixtureSet};
use crate::store::Collection;

/// Repositories over the seeded collections
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub employees: EmployeeRepository,
    pub departments: DepartmentRepository,
    pub leave_requests: LeaveRequestRepository,
    pub onboarding: OnboardingRepository,
}

impl AppState {
    /// Loads fixtures as configured and builds the state with the configured latency
    pub fn from_config(config: AppConfig) -> Result<Self, FixtureError> {
        let fixtures = FixtureSet::load(config.fixtures_dir.as_deref())?;
        Self::new(config, fixtures)
    }

    pub fn new(config: AppConfig, fixtures: FixtureSet) -> Result<Self, FixtureError> {
        let latency = latency::from_config(&config.latency);
        Self::with_latency(config, fixtures, latency)
    }

    /// Builds the state with an explicit latency strategy
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::Seed` when a snapshot repeats an id.
    pub fn with_latency(
        config: AppConfig,
        fixtures: FixtureSet,
        latency: SharedLatency,
    ) -> Result<Self, FixtureError> {
        let employees = Arc::new(Collection::seeded(fixtures.employees)?);
        let departments = Arc::new(Collection::seeded(fixtures.departments)?);
        let leave_requests = Arc::new(Collection::seeded(fixtures.leave_requests)?);
        let onboarding = Arc::new(Collection::seeded(fixtures.onboarding_tasks)?);

        tracing::debug!(profile = %config.profile, "Seeded in-memory collections");

        Ok(Self {
            config: Arc::new(config),
            employees: EmployeeRepository::new(employees.clone(), latency.clone()),
            departments: DepartmentRepository::new(departments, employees, latency.clone()),
            leave_requests: LeaveRequestRepository::new(leave_requests, latency.clone()),
            onboarding: OnboardingRepository::new(onboarding, latency),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latency::NoLatency;
    use crate::models::{EmployeePatch, Record};

    #[tokio::test]
    async fn test_department_guard_sees_employee_changes() {
        let fixtures = FixtureSet::embedded().unwrap();
        let state =
            AppState::with_latency(AppConfig::default(), fixtures, Arc::new(NoLatency)).unwrap();

        let finance = state
            .departments
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .find(|d| d.name == "Finance")
            .unwrap();
        assert!(state.departments.delete(finance.id).await.is_err());

        for employee in state.employees.find_by_department(finance.id).await.unwrap() {
            state
                .employees
                .update(
                    employee.id(),
                    EmployeePatch {
                        department_id: Some(1),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
        }
        state.departments.delete(finance.id).await.unwrap();
    }

    #[test]
    fn test_duplicate_seed_ids_are_rejected() {
        let mut fixtures = FixtureSet::embedded().unwrap();
        let first = fixtures.employees[0].clone();
        fixtures.employees.push(first);

        let result = AppState::with_latency(AppConfig::default(), fixtures, Arc::new(NoLatency));
        assert!(matches!(result, Err(FixtureError::Seed(_))));
    }
}
