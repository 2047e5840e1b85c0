//! Test utilities for building application state.
//!
//! Every helper wires repositories with `NoLatency` so tests never sleep.

use anyhow::Result;
use chrono::NaiveDate;
use hrdesk::config::AppConfig;
use hrdesk::latency::NoLatency;
use hrdesk::models::{
    Department, Employee, EmployeeStatus, NewDepartment, NewEmployee, RecordId,
};
use hrdesk::seeds::FixtureSet;
use hrdesk::state::AppState;
use std::sync::Arc;

/// Config for the `test` profile with latency disabled.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig {
        profile: "test".to_string(),
        ..Default::default()
    };
    config.latency.enabled = false;
    config
}

/// State seeded from the embedded fixtures.
#[allow(dead_code)]
pub fn seeded_state() -> Result<AppState> {
    Ok(AppState::with_latency(
        test_config(),
        FixtureSet::embedded()?,
        Arc::new(NoLatency),
    )?)
}

/// State seeded from `fixtures`.
#[allow(dead_code)]
pub fn state_with(fixtures: FixtureSet) -> Result<AppState> {
    Ok(AppState::with_latency(
        test_config(),
        fixtures,
        Arc::new(NoLatency),
    )?)
}

/// Stored employee record for hand-built fixtures.
#[allow(dead_code)]
pub fn employee(
    id: RecordId,
    first_name: &str,
    last_name: &str,
    department_id: RecordId,
    status: EmployeeStatus,
) -> Employee {
    Employee {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!(
            "{}.{}@example.com",
            first_name.to_lowercase(),
            last_name.to_lowercase()
        ),
        phone: "555-0100".to_string(),
        photo: String::new(),
        role: "Analyst".to_string(),
        department_id,
        hire_date: NaiveDate::from_ymd_opt(2023, 4, 3).unwrap(),
        status,
        leave_balance: 21,
    }
}

/// Stored department record for hand-built fixtures.
#[allow(dead_code)]
pub fn department(id: RecordId, name: &str) -> Department {
    Department {
        id,
        name: name.to_string(),
        description: format!("{name} team"),
        manager_id: None,
        employee_count: 0,
    }
}

/// Create request for an active employee in `department_id`.
#[allow(dead_code)]
pub fn new_employee(first_name: &str, last_name: &str, department_id: RecordId) -> NewEmployee {
    NewEmployee {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!("{}@example.com", first_name.to_lowercase()),
        phone: "555-0199".to_string(),
        photo: String::new(),
        role: "Engineer".to_string(),
        department_id,
        hire_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        status: EmployeeStatus::Active,
        leave_balance: 21,
    }
}

#[allow(dead_code)]
pub fn new_department(name: &str) -> NewDepartment {
    NewDepartment {
        name: name.to_string(),
        description: String::new(),
        manager_id: None,
    }
}
