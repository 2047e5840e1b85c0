//! Employee repository
//!
//! CRUD over the employee collection with simulated latency.

use std::sync::Arc;

use crate::error::RepositoryError;
use crate::latency::{OperationClass, SharedLatency};
use crate::models::{Employee, EmployeePatch, EmployeeStatus, NewEmployee, RecordId};
use crate::store::Collection;

/// Repository for employee records
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    store: Arc<Collection<Employee>>,
    latency: SharedLatency,
}

impl EmployeeRepository {
    /// Creates a new EmployeeRepository over `store`
    pub fn new(store: Arc<Collection<Employee>>, latency: SharedLatency) -> Self {
        Self { store, latency }
    }

    /// Switches the backing collection on or off to simulate an outage
    pub fn set_available(&self, available: bool) {
        self.store.set_available(available);
    }

    /// Returns a copy of every employee in insertion order
    pub async fn get_all(&self) -> Result<Vec<Employee>, RepositoryError> {
        self.latency.pause(OperationClass::List).await;
        let employees = self.store.snapshot().await?;
        tracing::debug!(count = employees.len(), "Listed employees");
        Ok(employees)
    }

    /// Finds an employee by id
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` when no employee has `id`.
    pub async fn get_by_id(&self, id: RecordId) -> Result<Employee, RepositoryError> {
        self.latency.pause(OperationClass::Fetch).await;
        self.store.get(id).await
    }

    /// Creates a new employee with the next free id
    pub async fn create(&self, request: NewEmployee) -> Result<Employee, RepositoryError> {
        self.latency.pause(OperationClass::Create).await;
        request.validate()?;

        let employee = self
            .store
            .insert_with(|id| request.into_record(id))
            .await?;
        tracing::info!(
            employee_id = employee.id,
            department_id = employee.department_id,
            "Created employee"
        );
        Ok(employee)
    }

    /// Applies `patch` to the employee with `id`
    pub async fn update(
        &self,
        id: RecordId,
        patch: EmployeePatch,
    ) -> Result<Employee, RepositoryError> {
        self.latency.pause(OperationClass::Update).await;
        let updated = self
            .store
            .update_with(id, |employee| {
                employee.apply(patch);
                employee.validate()
            })
            .await?;
        tracing::info!(employee_id = id, "Updated employee");
        Ok(updated)
    }

    /// Deletes the employee with `id`.
    ///
    /// Leave requests and department managers that reference the employee
    /// are left dangling.
    pub async fn delete(&self, id: RecordId) -> Result<(), RepositoryError> {
        self.latency.pause(OperationClass::Delete).await;
        self.store.remove(id).await?;
        tracing::info!(employee_id = id, "Deleted employee");
        Ok(())
    }

    /// Employees currently assigned to `department_id`
    pub async fn find_by_department(
        &self,
        department_id: RecordId,
    ) -> Result<Vec<Employee>, RepositoryError> {
        self.latency.pause(OperationClass::List).await;
        Ok(self
            .store
            .filter(|employee| employee.department_id == department_id)
            .await)
    }

    /// Number of employees with `status`
    pub async fn count_by_status(&self, status: EmployeeStatus) -> Result<usize, RepositoryError> {
        self.latency.pause(OperationClass::List).await;
        Ok(self.store.count(|employee| employee.status == status).await)
    }
}
