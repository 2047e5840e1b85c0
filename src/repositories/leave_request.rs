//! Leave request repository

use chrono::Utc;
use std::sync::Arc;

use crate::error::RepositoryError;
use crate::latency::{OperationClass, SharedLatency};
use crate::models::{LeaveRequest, LeaveRequestPatch, LeaveStatus, NewLeaveRequest, RecordId};
use crate::store::Collection;

/// Repository for leave requests
#[derive(Debug, Clone)]
pub struct LeaveRequestRepository {
    store: Arc<Collection<LeaveRequest>>,
    latency: SharedLatency,
}

impl LeaveRequestRepository {
    pub fn new(store: Arc<Collection<LeaveRequest>>, latency: SharedLatency) -> Self {
        Self { store, latency }
    }

    /// Switches the backing collection on or off to simulate an outage
    pub fn set_available(&self, available: bool) {
        self.store.set_available(available);
    }

    pub async fn get_all(&self) -> Result<Vec<LeaveRequest>, RepositoryError> {
        self.latency.pause(OperationClass::List).await;
        let requests = self.store.snapshot().await?;
        tracing::debug!(count = requests.len(), "Listed leave requests");
        Ok(requests)
    }

    pub async fn get_by_id(&self, id: RecordId) -> Result<LeaveRequest, RepositoryError> {
        self.latency.pause(OperationClass::Fetch).await;
        self.store.get(id).await
    }

    /// Submits a new request as `pending`, stamped with the current time
    pub async fn create(&self, request: NewLeaveRequest) -> Result<LeaveRequest, RepositoryError> {
        self.latency.pause(OperationClass::Create).await;
        request.validate()?;

        let requested_at = Utc::now();
        let created = self
            .store
            .insert_with(|id| request.into_record(id, requested_at))
            .await?;
        tracing::info!(
            leave_request_id = created.id,
            employee_id = created.employee_id,
            leave_type = %created.leave_type,
            days = created.days(),
            "Submitted leave request"
        );
        Ok(created)
    }

    /// Applies `patch` without checking the current status
    pub async fn update(
        &self,
        id: RecordId,
        patch: LeaveRequestPatch,
    ) -> Result<LeaveRequest, RepositoryError> {
        self.latency.pause(OperationClass::Update).await;
        let updated = self
            .store
            .update_with(id, |request| {
                request.apply(patch);
                request.validate()
            })
            .await?;
        tracing::info!(
            leave_request_id = id,
            status = %updated.status,
            "Updated leave request"
        );
        Ok(updated)
    }

    pub async fn delete(&self, id: RecordId) -> Result<(), RepositoryError> {
        self.latency.pause(OperationClass::Delete).await;
        self.store.remove(id).await?;
        tracing::info!(leave_request_id = id, "Deleted leave request");
        Ok(())
    }

    /// Approves a pending request
    pub async fn approve(&self, id: RecordId) -> Result<LeaveRequest, RepositoryError> {
        self.review(id, LeaveStatus::Approved).await
    }

    /// Rejects a pending request
    pub async fn reject(&self, id: RecordId) -> Result<LeaveRequest, RepositoryError> {
        self.review(id, LeaveStatus::Rejected).await
    }

    /// Requests submitted by `employee_id`
    pub async fn find_by_employee(
        &self,
        employee_id: RecordId,
    ) -> Result<Vec<LeaveRequest>, RepositoryError> {
        self.latency.pause(OperationClass::List).await;
        Ok(self
            .store
            .filter(|request| request.employee_id == employee_id)
            .await)
    }

    pub async fn count_by_status(&self, status: LeaveStatus) -> Result<usize, RepositoryError> {
        self.latency.pause(OperationClass::List).await;
        Ok(self.store.count(|request| request.status == status).await)
    }

    async fn review(
        &self,
        id: RecordId,
        decision: LeaveStatus,
    ) -> Result<LeaveRequest, RepositoryError> {
        self.latency.pause(OperationClass::Update).await;
        let reviewed = self
            .store
            .update_with(id, |request| {
                if !request.is_pending() {
                    return Err(RepositoryError::conflict(format!(
                        "Leave request {id} is already {}",
                        request.status
                    )));
                }
                request.apply(LeaveRequestPatch::status(decision));
                Ok(())
            })
            .await?;
        tracing::info!(leave_request_id = id, status = %decision, "Reviewed leave request");
        Ok(reviewed)
    }
}
