//! Departments page.

use serde::Serialize;

use super::{DepartmentFilter, Notification, Notifications, PageStatus};
use crate::models::{Department, DepartmentPatch, Employee, NewDepartment, RecordId};
use crate::state::AppState;

/// Department with its manager resolved and a live headcount
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentCard {
    pub department: Department,
    pub manager: Option<Employee>,
    pub headcount: usize,
}

#[derive(Debug)]
pub struct DepartmentsController {
    state: AppState,
    status: PageStatus,
    departments: Vec<Department>,
    employees: Vec<Employee>,
    filter: DepartmentFilter,
    filtered: Vec<Department>,
    notifications: Notifications,
}

impl DepartmentsController {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            status: PageStatus::Loading,
            departments: Vec::new(),
            employees: Vec::new(),
            filter: DepartmentFilter::default(),
            filtered: Vec::new(),
            notifications: Notifications::default(),
        }
    }

    /// Loads departments (primary) and employees (managers and headcounts).
    pub async fn load(&mut self) {
        self.status = PageStatus::Loading;
        let (departments, employees) = tokio::join!(
            self.state.departments.get_all(),
            self.state.employees.get_all(),
        );

        match departments {
            Ok(departments) => {
                self.departments = departments;
                self.status = PageStatus::Ready;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Department load failed");
                self.notifications.error("Failed to load departments");
                self.status = PageStatus::Failed("Failed to load departments".to_string());
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

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
        self.refilter();
    }

    pub async fn create(&mut self, request: NewDepartment) -> Option<Department> {
        let result = self.state.departments.create(request).await;
        let created = self.notifications.report(
            result,
            |_| "Department created successfully".to_string(),
            "Failed to save department",
        )?;
        self.load().await;
        Some(created)
    }

    pub async fn update(&mut self, id: RecordId, patch: DepartmentPatch) -> Option<Department> {
        let result = self.state.departments.update(id, patch).await;
        let updated = self.notifications.report(
            result,
            |_| "Department updated successfully".to_string(),
            "Failed to save department",
        )?;
        self.load().await;
        Some(updated)
    }

    /// Deletes a department; refused while employees are assigned to it
    pub async fn delete(&mut self, id: RecordId) -> bool {
        let result = self.state.departments.delete(id).await;
        let deleted = self
            .notifications
            .report(
                result,
                |_| "Department deleted successfully".to_string(),
                "Failed to delete department",
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

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn filtered(&self) -> &[Department] {
        &self.filtered
    }

    /// Candidate managers for the department form
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Cards for the departments matching the current search
    pub fn cards(&self) -> Vec<DepartmentCard> {
        self.filtered
            .iter()
            .map(|department| DepartmentCard {
                manager: department.manager_id.and_then(|manager_id| {
                    self.employees
                        .iter()
                        .find(|employee| employee.id == manager_id)
                        .cloned()
                }),
                headcount: self
                    .employees
                    .iter()
                    .filter(|employee| employee.department_id == department.id)
                    .count(),
                department: department.clone(),
            })
            .collect()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    fn refilter(&mut self) {
        self.filtered = self.filter.apply(&self.departments);
    }
}
