//! JSON fixture loading
//!
//! The four snapshot files ship embedded in the binary. A fixtures directory
//! may override any of them; files missing from the directory fall back to
//! the embedded copy.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::error::RepositoryError;
use crate::models::{Department, Employee, LeaveRequest, OnboardingTask};

pub const EMPLOYEES_FILE: &str = "employees.json";
pub const DEPARTMENTS_FILE: &str = "departments.json";
pub const LEAVE_REQUESTS_FILE: &str = "leaveRequests.json";
pub const ONBOARDING_FILE: &str = "onboarding.json";

const EMBEDDED_EMPLOYEES: &str = include_str!("../../fixtures/employees.json");
const EMBEDDED_DEPARTMENTS: &str = include_str!("../../fixtures/departments.json");
const EMBEDDED_LEAVE_REQUESTS: &str = include_str!("../../fixtures/leaveRequests.json");
const EMBEDDED_ONBOARDING: &str = include_str!("../../fixtures/onboarding.json");

/// Errors raised while reading seed data
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid fixture {file}: {source}")]
    Json {
        file: String,
        source: serde_json::Error,
    },
    #[error("invalid seed data: {0}")]
    Seed(#[from] RepositoryError),
}

/// Seed records for every collection
#[derive(Debug, Clone, Default)]
pub struct FixtureSet {
    pub employees: Vec<Employee>,
    pub departments: Vec<Department>,
    pub leave_requests: Vec<LeaveRequest>,
    pub onboarding_tasks: Vec<OnboardingTask>,
}

impl FixtureSet {
    /// Parses the snapshots compiled into the crate
    pub fn embedded() -> Result<Self, FixtureError> {
        Ok(Self {
            employees: parse(EMPLOYEES_FILE, EMBEDDED_EMPLOYEES)?,
            departments: parse(DEPARTMENTS_FILE, EMBEDDED_DEPARTMENTS)?,
            leave_requests: parse(LEAVE_REQUESTS_FILE, EMBEDDED_LEAVE_REQUESTS)?,
            onboarding_tasks: parse(ONBOARDING_FILE, EMBEDDED_ONBOARDING)?,
        })
    }

    /// Reads snapshots from `dir`, using the embedded copy for absent files
    pub fn from_dir(dir: &Path) -> Result<Self, FixtureError> {
        Ok(Self {
            employees: load_file(dir, EMPLOYEES_FILE, EMBEDDED_EMPLOYEES)?,
            departments: load_file(dir, DEPARTMENTS_FILE, EMBEDDED_DEPARTMENTS)?,
            leave_requests: load_file(dir, LEAVE_REQUESTS_FILE, EMBEDDED_LEAVE_REQUESTS)?,
            onboarding_tasks: load_file(dir, ONBOARDING_FILE, EMBEDDED_ONBOARDING)?,
        })
    }

    /// Loads from `dir` when given, otherwise the embedded snapshots
    pub fn load(dir: Option<&Path>) -> Result<Self, FixtureError> {
        let fixtures = match dir {
            Some(dir) => Self::from_dir(dir)?,
            None => Self::embedded()?,
        };
        log::info!(
            "Loaded fixtures: {} employees, {} departments, {} leave requests, {} onboarding tasks",
            fixtures.employees.len(),
            fixtures.departments.len(),
            fixtures.leave_requests.len(),
            fixtures.onboarding_tasks.len()
        );
        Ok(fixtures)
    }
}

fn load_file<T: DeserializeOwned>(
    dir: &Path,
    file: &str,
    embedded: &str,
) -> Result<Vec<T>, FixtureError> {
    let path = dir.join(file);
    match std::fs::read_to_string(&path) {
        Ok(contents) => {
            log::info!("Using fixture override {}", path.display());
            parse(file, &contents)
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No override for {}, using embedded snapshot", file);
            parse(file, embedded)
        }
        Err(source) => {
            log::error!("Failed to read fixture {}: {}", path.display(), source);
            Err(FixtureError::Io { path, source })
        }
    }
}

fn parse<T: DeserializeOwned>(file: &str, contents: &str) -> Result<Vec<T>, FixtureError> {
    serde_json::from_str(contents).map_err(|source| FixtureError::Json {
        file: file.to_string(),
        source,
    })
}
