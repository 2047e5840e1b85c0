//! Leave management page.

use serde::Serialize;

use super::{LeaveFilter, Notification, Notifications, PageStatus};
use crate::models::{
    Employee, LeaveRequest, LeaveStatus, LeaveType, NewLeaveRequest, RecordId,
};
use crate::state::AppState;

/// Leave request joined with its requester
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveCard {
    pub request: LeaveRequest,
    pub employee: Employee,
    /// Inclusive length of the leave span
    pub days: i64,
}

#[derive(Debug)]
pub struct LeaveController {
    state: AppState,
    status: PageStatus,
    requests: Vec<LeaveRequest>,
    employees: Vec<Employee>,
    filter: LeaveFilter,
    filtered: Vec<LeaveRequest>,
    notifications: Notifications,
}

impl LeaveController {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            status: PageStatus::Loading,
            requests: Vec::new(),
            employees: Vec::new(),
            filter: LeaveFilter::default(),
            filtered: Vec::new(),
            notifications: Notifications::default(),
        }
    }

    /// Loads leave requests (primary) and employees (requester lookup).
    pub async fn load(&mut self) {
        self.status = PageStatus::Loading;
        let (requests, employees) = tokio::join!(
            self.state.leave_requests.get_all(),
            self.state.employees.get_all(),
        );

        match requests {
            Ok(requests) => {
                self.requests = requests;
                self.status = PageStatus::Ready;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Leave request load failed");
                self.notifications.error("Failed to load leave requests");
                self.status = PageStatus::Failed("Failed to load leave requests".to_string());
            }
        }

        match employees {
            Ok(employees) => self.employees = employees,
            Err(err) => self
                .notifications
                .error(format!("Failed to load employees: {err}")),
        }

        self.refilter();
    }

    pub async fn retry(&mut self) {
        self.load().await;
    }

    pub fn set_filter(&mut self, filter: LeaveFilter) {
        self.filter = filter;
        self.refilter();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
        self.refilter();
    }

    pub fn set_status_filter(&mut self, status: Option<LeaveStatus>) {
        self.filter.status = status;
        self.refilter();
    }

    pub fn set_type_filter(&mut self, leave_type: Option<LeaveType>) {
        self.filter.leave_type = leave_type;
        self.refilter();
    }

    /// Submits a new request on behalf of an employee
    pub async fn submit(&mut self, request: NewLeaveRequest) -> Option<LeaveRequest> {
        let result = self.state.leave_requests.create(request).await;
        let created = self.notifications.report(
            result,
            |_| "Leave request submitted successfully".to_string(),
            "Failed to submit leave request",
        )?;
        self.load().await;
        Some(created)
    }

    pub async fn approve(&mut self, id: RecordId) -> Option<LeaveRequest> {
        let result = self.state.leave_requests.approve(id).await;
        let approved = self.notifications.report(
            result,
            |_| "Leave request approved".to_string(),
            "Failed to approve leave request",
        )?;
        self.load().await;
        Some(approved)
    }

    pub async fn reject(&mut self, id: RecordId) -> Option<LeaveRequest> {
        let result = self.state.leave_requests.reject(id).await;
        let rejected = self.notifications.report(
            result,
            |_| "Leave request rejected".to_string(),
            "Failed to reject leave request",
        )?;
        self.load().await;
        Some(rejected)
    }

    pub fn status(&self) -> &PageStatus {
        &self.status
    }

    pub fn requests(&self) -> &[LeaveRequest] {
        &self.requests
    }

    pub fn filtered(&self) -> &[LeaveRequest] {
        &self.filtered
    }

    /// Requesters offered by the submission form
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Cards for the filtered requests; dangling requesters are not rendered
    pub fn cards(&self) -> Vec<LeaveCard> {
        self.filtered
            .iter()
            .filter_map(|request| {
                self.employees
                    .iter()
                    .find(|employee| employee.id == request.employee_id)
                    .map(|employee| LeaveCard {
                        days: request.days(),
                        request: request.clone(),
                        employee: employee.clone(),
                    })
            })
            .collect()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    fn refilter(&mut self) {
        self.filtered = self.filter.apply(&self.requests, &self.employees);
    }
}
