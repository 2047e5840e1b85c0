//! Department repository
//!
//! Departments are the only entity with a referential pre-condition: a
//! department cannot be deleted while employees still reference it.

use std::sync::Arc;

use crate::error::RepositoryError;
use crate::latency::{OperationClass, SharedLatency};
use crate::models::{Department, DepartmentPatch, Employee, NewDepartment, Record, RecordId};
use crate::store::Collection;

/// Repository for department records
#[derive(Debug, Clone)]
pub struct DepartmentRepository {
    store: Arc<Collection<Department>>,
    /// Read-only view used for the delete pre-condition and headcounts
    employees: Arc<Collection<Employee>>,
    latency: SharedLatency,
}

impl DepartmentRepository {
    pub fn new(
        store: Arc<Collection<Department>>,
        employees: Arc<Collection<Employee>>,
        latency: SharedLatency,
    ) -> Self {
        Self {
            store,
            employees,
            latency,
        }
    }

    /// Switches the backing collection on or off to simulate an outage
    pub fn set_available(&self, available: bool) {
        self.store.set_available(available);
    }

    pub async fn get_all(&self) -> Result<Vec<Department>, RepositoryError> {
        self.latency.pause(OperationClass::List).await;
        let departments = self.store.snapshot().await?;
        tracing::debug!(count = departments.len(), "Listed departments");
        Ok(departments)
    }

    pub async fn get_by_id(&self, id: RecordId) -> Result<Department, RepositoryError> {
        self.latency.pause(OperationClass::Fetch).await;
        self.store.get(id).await
    }

    /// Creates a department; its `employee_count` starts at zero
    pub async fn create(&self, request: NewDepartment) -> Result<Department, RepositoryError> {
        self.latency.pause(OperationClass::Create).await;
        request.validate()?;

        let department = self
            .store
            .insert_with(|id| request.into_record(id))
            .await?;
        tracing::info!(
            department_id = department.id,
            name = %department.name,
            "Created department"
        );
        Ok(department)
    }

    pub async fn update(
        &self,
        id: RecordId,
        patch: DepartmentPatch,
    ) -> Result<Department, RepositoryError> {
        self.latency.pause(OperationClass::Update).await;
        let updated = self
            .store
            .update_with(id, |department| {
                department.apply(patch);
                department.validate()
            })
            .await?;
        tracing::info!(department_id = id, "Updated department");
        Ok(updated)
    }

    /// Deletes the department with `id`
    ///
    /// # Errors
    ///
    /// * `RepositoryError::NotFound` when the department does not exist
    /// * `RepositoryError::Conflict` while any employee still has
    ///   `department_id == id`
    pub async fn delete(&self, id: RecordId) -> Result<(), RepositoryError> {
        self.latency.pause(OperationClass::Delete).await;

        // Employee inserts wait on this guard until the department is gone.
        let employees = self.employees.read().await;
        self.store
            .remove_if(id, |_| {
                let assigned = employees
                    .iter()
                    .filter(|employee| employee.department_id == id)
                    .count();
                if assigned == 0 {
                    return Ok(());
                }
                tracing::warn!(
                    department_id = id,
                    assigned,
                    "Refusing to delete department with assigned employees"
                );
                Err(RepositoryError::conflict(format!(
                    "Cannot delete department {id}: {assigned} employee(s) still assigned. Reassign them first."
                )))
            })
            .await?;
        drop(employees);

        tracing::info!(department_id = id, "Deleted department");
        Ok(())
    }

    /// Live number of employees referencing `id`
    pub async fn headcount(&self, id: RecordId) -> Result<usize, RepositoryError> {
        self.latency.pause(OperationClass::Fetch).await;
        if !self.store.contains(id).await {
            return Err(RepositoryError::not_found(Department::ENTITY, id));
        }
        Ok(self
            .employees
            .count(|employee| employee.department_id == id)
            .await)
    }
}
