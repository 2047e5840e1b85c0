//! Employee directory page.

use super::{EmployeeFilter, Notification, Notifications, PageStatus};
use crate::models::{
    Department, Employee, EmployeePatch, EmployeeStatus, NewEmployee, RecordId,
};
use crate::state::AppState;

#[derive(Debug)]
pub struct EmployeesController {
    state: AppState,
    status: PageStatus,
    employees: Vec<Employee>,
    departments: Vec<Department>,
    filter: EmployeeFilter,
    filtered: Vec<Employee>,
    notifications: Notifications,
}

impl EmployeesController {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            status: PageStatus::Loading,
            employees: Vec::new(),
            departments: Vec::new(),
            filter: EmployeeFilter::default(),
            filtered: Vec::new(),
            notifications: Notifications::default(),
        }
    }

    /// Loads employees (primary) and departments (for the filter and cards).
    pub async fn load(&mut self) {
        self.status = PageStatus::Loading;
        let (employees, departments) = tokio::join!(
            self.state.employees.get_all(),
            self.state.departments.get_all(),
        );

        match employees {
            Ok(employees) => {
                self.employees = employees;
                self.status = PageStatus::Ready;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Employee load failed");
                self.notifications.error("Failed to load employees");
                self.status = PageStatus::Failed("Failed to load employees".to_string());
            }
        }

        match departments {
            Ok(departments) => self.departments = departments,
            Err(err) => self
                .notifications
                .error(format!("Failed to load departments: {err}")),
        }

        self.refilter();
    }

    pub async fn retry(&mut self) {
        self.load().await;
    }

    pub fn set_filter(&mut self, filter: EmployeeFilter) {
        self.filter = filter;
        self.refilter();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
        self.refilter();
    }

    pub fn set_status_filter(&mut self, status: Option<EmployeeStatus>) {
        self.filter.status = status;
        self.refilter();
    }

    pub fn set_department_filter(&mut self, department_id: Option<RecordId>) {
        self.filter.department_id = department_id;
        self.refilter();
    }

    pub async fn create(&mut self, request: NewEmployee) -> Option<Employee> {
        let result = self.state.employees.create(request).await;
        let created = self.notifications.report(
            result,
            |_| "Employee created successfully".to_string(),
            "Failed to save employee",
        )?;
        self.load().await;
        Some(created)
    }

    pub async fn update(&mut self, id: RecordId, patch: EmployeePatch) -> Option<Employee> {
        let result = self.state.employees.update(id, patch).await;
        let updated = self.notifications.report(
            result,
            |_| "Employee updated successfully".to_string(),
            "Failed to save employee",
        )?;
        self.load().await;
        Some(updated)
    }

    pub async fn delete(&mut self, id: RecordId) -> bool {
        let result = self.state.employees.delete(id).await;
        let deleted = self
            .notifications
            .report(
                result,
                |_| "Employee deleted successfully".to_string(),
                "Failed to delete employee",
            )
            .is_some();
        if deleted {
            self.load().await;
        }
        deleted
    }

    pub fn status(&self) -> &PageStatus {
        &self.status
    }

    pub fn filter(&self) -> &EmployeeFilter {
        &self.filter
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Employees matching the current filter
    pub fn filtered(&self) -> &[Employee] {
        &self.filtered
    }

    /// Department options for the filter dropdown
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    /// Name shown on an employee card; `None` for a dangling reference
    pub fn department_name(&self, department_id: RecordId) -> Option<&str> {
        self.departments
            .iter()
            .find(|department| department.id == department_id)
            .map(|department| department.name.as_str())
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    fn refilter(&mut self) {
        self.filtered = self.filter.apply(&self.employees);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::controllers::NotificationLevel;
    use crate::latency::NoLatency;
    use crate::seeds::FixtureSet;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn controller() -> EmployeesController {
        let state = AppState::with_latency(
            AppConfig::default(),
            FixtureSet::embedded().unwrap(),
            Arc::new(NoLatency),
        )
        .unwrap();
        EmployeesController::new(state)
    }

    fn new_hire() -> NewEmployee {
        NewEmployee {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann.lee@company.com".to_string(),
            phone: "555-0100".to_string(),
            photo: String::new(),
            role: "Designer".to_string(),
            department_id: 2,
            hire_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            status: EmployeeStatus::Active,
            leave_balance: 21,
        }
    }

    #[tokio::test]
    async fn test_filters_survive_reload() {
        let mut page = controller();
        page.load().await;
        page.set_status_filter(Some(EmployeeStatus::Inactive));
        let inactive = page.filtered().len();
        assert!(inactive > 0);
        assert!(page.filtered().iter().all(|e| !e.is_active()));

        page.create(new_hire()).await.unwrap();
        assert_eq!(page.filtered().len(), inactive);

        page.set_status_filter(None);
        page.set_search("ann lee");
        assert_eq!(page.filtered().len(), 1);
        assert_eq!(page.department_name(page.filtered()[0].department_id), Some("Human Resources"));
    }

    #[tokio::test]
    async fn test_failed_update_leaves_view_unchanged() {
        let mut page = controller();
        page.load().await;
        let before = page.employees().to_vec();
        page.drain_notifications();

        let result = page
            .update(
                before[0].id,
                EmployeePatch {
                    email: Some("broken".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(result.is_none());
        assert_eq!(page.employees(), before.as_slice());

        let notifications = page.drain_notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].level, NotificationLevel::Error);
    }

    #[tokio::test]
    async fn test_delete_twice_reports_not_found() {
        let mut page = controller();
        page.load().await;
        let id = page.employees()[0].id;

        assert!(page.delete(id).await);
        assert!(!page.delete(id).await);
        let messages: Vec<_> = page
            .drain_notifications()
            .into_iter()
            .map(|n| n.message)
            .collect();
        assert_eq!(messages[0], "Employee deleted successfully");
        assert!(messages[1].contains("not found"));
    }
}
