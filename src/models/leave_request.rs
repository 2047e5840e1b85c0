//! Leave request record model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Record, RecordId, deserialize_id, deserialize_optional_id};
use crate::error::RepositoryError;

/// Kind of leave being requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveType {
    #[default]
    Vacation,
    Sick,
    Personal,
}

impl LeaveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Vacation => "vacation",
            LeaveType::Sick => "sick",
            LeaveType::Personal => "personal",
        }
    }

    /// Label used by forms and cards
    pub fn label(&self) -> &'static str {
        match self {
            LeaveType::Vacation => "Vacation",
            LeaveType::Sick => "Sick Leave",
            LeaveType::Personal => "Personal Leave",
        }
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review state of a leave request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored leave request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    #[serde(rename = "Id", deserialize_with = "deserialize_id")]
    pub id: RecordId,
    /// Soft reference to the requesting employee
    #[serde(deserialize_with = "deserialize_id")]
    pub employee_id: RecordId,
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub status: LeaveStatus,
    pub request_date: DateTime<Utc>,
}

impl LeaveRequest {
    /// Number of calendar days covered, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn is_pending(&self) -> bool {
        self.status == LeaveStatus::Pending
    }

    pub fn apply(&mut self, patch: LeaveRequestPatch) {
        if let Some(employee_id) = patch.employee_id {
            self.employee_id = employee_id;
        }
        if let Some(leave_type) = patch.leave_type {
            self.leave_type = leave_type;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        if let Some(reason) = patch.reason {
            self.reason = reason;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    pub fn validate(&self) -> Result<(), RepositoryError> {
        validate_span(self.start_date, self.end_date)
    }
}

impl Record for LeaveRequest {
    const ENTITY: &'static str = "Leave request";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

/// Request data for submitting a new leave request.
///
/// Status and request date are assigned by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLeaveRequest {
    #[serde(deserialize_with = "deserialize_id")]
    pub employee_id: RecordId,
    #[serde(rename = "type", default)]
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: String,
}

impl NewLeaveRequest {
    pub fn validate(&self) -> Result<(), RepositoryError> {
        validate_span(self.start_date, self.end_date)
    }

    pub(crate) fn into_record(self, id: RecordId, request_date: DateTime<Utc>) -> LeaveRequest {
        LeaveRequest {
            id,
            employee_id: self.employee_id,
            leave_type: self.leave_type,
            start_date: self.start_date,
            end_date: self.end_date,
            reason: self.reason,
            status: LeaveStatus::Pending,
            request_date,
        }
    }
}

/// Fields a leave request update may change
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequestPatch {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub employee_id: Option<RecordId>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub leave_type: Option<LeaveType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<LeaveStatus>,
}

impl LeaveRequestPatch {
    /// Patch that only moves the request to `status`
    pub fn status(status: LeaveStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

fn validate_span(start: NaiveDate, end: NaiveDate) -> Result<(), RepositoryError> {
    if end < start {
        return Err(RepositoryError::validation_error(format!(
            "Leave end date {end} is before start date {start}"
        )));
    }
    Ok(())
}
