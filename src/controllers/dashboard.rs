//! Dashboard page: headline stats, recent hires and pending leave.

use serde::Serialize;

use super::{Notification, Notifications, PageStatus};
use crate::models::{Department, Employee, LeaveRequest, RecordId};
use crate::state::AppState;

/// Employees shown under "Recent Activity"
pub const RECENT_ACTIVITY_LIMIT: usize = 5;
/// Pending requests previewed on the dashboard
pub const PENDING_PREVIEW_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_employees: usize,
    pub active_employees: usize,
    pub departments: usize,
    pub pending_requests: usize,
}

/// A pending request with its requester resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingPreview {
    pub request: LeaveRequest,
    pub employee: Employee,
}

#[derive(Debug)]
pub struct DashboardController {
    state: AppState,
    status: PageStatus,
    employees: Vec<Employee>,
    departments: Vec<Department>,
    leave_requests: Vec<LeaveRequest>,
    notifications: Notifications,
}

impl DashboardController {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            status: PageStatus::Loading,
            employees: Vec::new(),
            departments: Vec::new(),
            leave_requests: Vec::new(),
            notifications: Notifications::default(),
        }
    }

    /// Loads employees, departments and leave requests concurrently.
    ///
    /// Any failure fails the whole page; previously loaded data is kept.
    pub async fn load(&mut self) {
        self.status = PageStatus::Loading;

        let (employees, departments, leave_requests) = tokio::join!(
            self.state.employees.get_all(),
            self.state.departments.get_all(),
            self.state.leave_requests.get_all(),
        );

        match (employees, departments, leave_requests) {
            (Ok(employees), Ok(departments), Ok(leave_requests)) => {
                self.employees = employees;
                self.departments = departments;
                self.leave_requests = leave_requests;
                self.status = PageStatus::Ready;
            }
            (employees, departments, leave_requests) => {
                let err = employees
                    .err()
                    .or(departments.err())
                    .or(leave_requests.err());
                tracing::warn!(error = ?err, "Dashboard load failed");
                let message = "Failed to load dashboard data".to_string();
                self.notifications.error(message.clone());
                self.status = PageStatus::Failed(message);
            }
        }
    }

    pub async fn retry(&mut self) {
        self.load().await;
    }

    pub async fn approve_leave(&mut self, id: RecordId) {
        let result = self.state.leave_requests.approve(id).await;
        if self
            .notifications
            .report(
                result,
                |_| "Leave request approved".to_string(),
                "Failed to approve leave request",
            )
            .is_some()
        {
            self.load().await;
        }
    }

    pub async fn reject_leave(&mut self, id: RecordId) {
        let result = self.state.leave_requests.reject(id).await;
        if self
            .notifications
            .report(
                result,
                |_| "Leave request rejected".to_string(),
                "Failed to reject leave request",
            )
            .is_some()
        {
            self.load().await;
        }
    }

    pub fn status(&self) -> &PageStatus {
        &self.status
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            total_employees: self.employees.len(),
            active_employees: self.employees.iter().filter(|e| e.is_active()).count(),
            departments: self.departments.len(),
            pending_requests: self.leave_requests.iter().filter(|r| r.is_pending()).count(),
        }
    }

    /// The last employees in collection order, oldest first
    pub fn recent_employees(&self) -> &[Employee] {
        let start = self.employees.len().saturating_sub(RECENT_ACTIVITY_LIMIT);
        &self.employees[start..]
    }

    /// First pending requests whose requester still exists
    pub fn pending_preview(&self) -> Vec<PendingPreview> {
        self.leave_requests
            .iter()
            .filter(|request| request.is_pending())
            .take(PENDING_PREVIEW_LIMIT)
            .filter_map(|request| {
                self.employees
                    .iter()
                    .find(|employee| employee.id == request.employee_id)
                    .map(|employee| PendingPreview {
                        request: request.clone(),
                        employee: employee.clone(),
                    })
            })
            .collect()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }
}
