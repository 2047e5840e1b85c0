//! # Page Controllers
//!
//! One controller per page. A controller loads its primary collection plus
//! any cross-referenced ones, keeps raw data next to the filtered view, and
//! reloads everything after a successful mutation.
//!
//! Failures never panic or propagate out of a controller: a failed primary
//! load moves the page to [`PageStatus::Failed`], everything else becomes a
//! [`Notification`] the caller drains.

pub mod dashboard;
pub mod departments;
pub mod employees;
pub mod filter;
pub mod leave;
pub mod onboarding;

pub use dashboard::{DashboardController, DashboardStats, PendingPreview};
pub use departments::{DepartmentCard, DepartmentsController};
pub use employees::EmployeesController;
pub use filter::{DepartmentFilter, EmployeeFilter, LeaveFilter, TaskFilter};
pub use leave::{LeaveCard, LeaveController};
pub use onboarding::OnboardingController;

use serde::Serialize;

use crate::error::RepositoryError;

/// Lifecycle of a page's primary data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum PageStatus {
    #[default]
    Loading,
    Ready,
    /// Primary load failed; `retry()` reloads
    Failed(String),
}

impl PageStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, PageStatus::Ready)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PageStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// Transient message for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Queue of notifications waiting to be shown
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    pending: Vec<Notification>,
}

impl Notifications {
    pub fn success(&mut self, message: impl Into<String>) {
        self.pending.push(Notification {
            level: NotificationLevel::Success,
            message: message.into(),
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "Page operation failed");
        self.pending.push(Notification {
            level: NotificationLevel::Error,
            message,
        });
    }

    /// Takes every queued notification, oldest first
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Records the outcome of a mutation.
    ///
    /// Returns the value on success so the caller can decide whether to
    /// reload; on failure the error is queued and `None` returned.
    pub(crate) fn report<T>(
        &mut self,
        result: Result<T, RepositoryError>,
        success: impl FnOnce(&T) -> String,
        failure: &str,
    ) -> Option<T> {
        match result {
            Ok(value) => {
                self.success(success(&value));
                Some(value)
            }
            Err(err) => {
                self.error(format!("{failure}: {err}"));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_queues_in_order() {
        let mut notifications = Notifications::default();
        let ok = notifications.report(Ok(3), |n| format!("saved {n}"), "Failed to save");
        let failed: Option<u32> = notifications.report(
            Err(RepositoryError::not_found("Employee", 9)),
            |_| String::new(),
            "Failed to save",
        );

        assert_eq!(ok, Some(3));
        assert_eq!(failed, None);

        let drained = notifications.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].level, NotificationLevel::Success);
        assert_eq!(drained[0].message, "saved 3");
        assert_eq!(drained[1].level, NotificationLevel::Error);
        assert!(drained[1].message.starts_with("Failed to save: "));
        assert!(notifications.is_empty());
    }

    #[test]
    fn test_page_status_serialization() {
        let failed = PageStatus::Failed("Failed to load employees".to_string());
        assert_eq!(failed.error(), Some("Failed to load employees"));
        let value = serde_json::to_value(&failed).unwrap();
        assert_eq!(value["state"], "failed");
        assert!(!PageStatus::default().is_ready());
    }
}
