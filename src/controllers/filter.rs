//! Client-side search and filter inputs for each page.
//!
//! Search is a case-insensitive substring match over a page's designated
//! fields; an empty (or whitespace-only) query matches everything. Equality
//! filters set to `None` match everything.

use serde::{Deserialize, Serialize};

use crate::models::{
    Department, Employee, EmployeeStatus, LeaveRequest, LeaveStatus, LeaveType, OnboardingTask,
    RecordId, TaskCategory,
};

/// Case-insensitive substring match against any of `fields`
pub fn matches_search<'a>(query: &str, fields: impl IntoIterator<Item = &'a str>) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeFilter {
    /// Matched against full name, email and role
    pub search: String,
    pub status: Option<EmployeeStatus>,
    pub department_id: Option<RecordId>,
}

impl EmployeeFilter {
    pub fn matches(&self, employee: &Employee) -> bool {
        let full_name = employee.full_name();
        matches_search(
            &self.search,
            [full_name.as_str(), employee.email.as_str(), employee.role.as_str()],
        ) && self.status.is_none_or(|status| employee.status == status)
            && self
                .department_id
                .is_none_or(|department_id| employee.department_id == department_id)
    }

    pub fn apply(&self, employees: &[Employee]) -> Vec<Employee> {
        employees
            .iter()
            .filter(|employee| self.matches(employee))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentFilter {
    /// Matched against name and description
    pub search: String,
}

impl DepartmentFilter {
    pub fn matches(&self, department: &Department) -> bool {
        matches_search(
            &self.search,
            [department.name.as_str(), department.description.as_str()],
        )
    }

    pub fn apply(&self, departments: &[Department]) -> Vec<Department> {
        departments
            .iter()
            .filter(|department| self.matches(department))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveFilter {
    /// Matched against the requesting employee's full name
    pub search: String,
    pub status: Option<LeaveStatus>,
    #[serde(rename = "type")]
    pub leave_type: Option<LeaveType>,
}

impl LeaveFilter {
    /// `employee` is the resolved requester; a dangling request never
    /// matches a non-empty search.
    pub fn matches(&self, request: &LeaveRequest, employee: Option<&Employee>) -> bool {
        let search_ok = match employee {
            Some(employee) => matches_search(&self.search, [employee.full_name().as_str()]),
            None => self.search.trim().is_empty(),
        };
        search_ok
            && self.status.is_none_or(|status| request.status == status)
            && self
                .leave_type
                .is_none_or(|leave_type| request.leave_type == leave_type)
    }

    pub fn apply(&self, requests: &[LeaveRequest], employees: &[Employee]) -> Vec<LeaveRequest> {
        requests
            .iter()
            .filter(|request| {
                let employee = employees.iter().find(|e| e.id == request.employee_id);
                self.matches(request, employee)
            })
            .cloned()
            .collect()
    }
}

/// Checklist filter shown as a row of toggle buttons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    Completed,
    Category(TaskCategory),
}

impl TaskFilter {
    /// Filter options in display order
    pub const OPTIONS: [TaskFilter; 6] = [
        TaskFilter::All,
        TaskFilter::Pending,
        TaskFilter::Completed,
        TaskFilter::Category(TaskCategory::Paperwork),
        TaskFilter::Category(TaskCategory::Training),
        TaskFilter::Category(TaskCategory::SystemAccess),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TaskFilter::All => "All Tasks",
            TaskFilter::Pending => "pending",
            TaskFilter::Completed => "completed",
            TaskFilter::Category(category) => category.as_str(),
        }
    }

    pub fn matches(&self, task: &OnboardingTask) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Pending => !task.completed,
            TaskFilter::Completed => task.completed,
            TaskFilter::Category(category) => task.category == *category,
        }
    }

    pub fn apply(&self, tasks: &[OnboardingTask]) -> Vec<OnboardingTask> {
        tasks
            .iter()
            .filter(|task| self.matches(task))
            .cloned()
            .collect()
    }
}
