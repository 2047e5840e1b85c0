//! Employee record model
//!
//! Employees reference their department through `department_id`, a soft
//! foreign key that is not checked on read.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Record, RecordId, deserialize_id, deserialize_optional_id, is_blank};
use crate::error::RepositoryError;

/// Leave balance granted to new hires when none is supplied
pub const DEFAULT_LEAVE_BALANCE: u32 = 21;

/// Employment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored employee record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(rename = "Id", deserialize_with = "deserialize_id")]
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// Avatar URL; empty when the employee has no photo
    #[serde(default)]
    pub photo: String,
    pub role: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub department_id: RecordId,
    pub hire_date: NaiveDate,
    #[serde(default)]
    pub status: EmployeeStatus,
    /// Remaining leave in days
    #[serde(default)]
    pub leave_balance: u32,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Two-letter fallback shown when no photo is available
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .collect()
    }

    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }

    /// Applies every field present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: EmployeePatch) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(photo) = patch.photo {
            self.photo = photo;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(department_id) = patch.department_id {
            self.department_id = department_id;
        }
        if let Some(hire_date) = patch.hire_date {
            self.hire_date = hire_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(leave_balance) = patch.leave_balance {
            self.leave_balance = leave_balance;
        }
    }

    pub fn validate(&self) -> Result<(), RepositoryError> {
        validate_contact(
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.phone,
            &self.role,
        )
    }
}

impl Record for Employee {
    const ENTITY: &'static str = "Employee";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

/// Request data for creating a new employee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub photo: String,
    pub role: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub department_id: RecordId,
    pub hire_date: NaiveDate,
    #[serde(default)]
    pub status: EmployeeStatus,
    #[serde(default = "default_leave_balance")]
    pub leave_balance: u32,
}

impl NewEmployee {
    pub fn validate(&self) -> Result<(), RepositoryError> {
        validate_contact(
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.phone,
            &self.role,
        )
    }

    pub(crate) fn into_record(self, id: RecordId) -> Employee {
        Employee {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            photo: self.photo,
            role: self.role,
            department_id: self.department_id,
            hire_date: self.hire_date,
            status: self.status,
            leave_balance: self.leave_balance,
        }
    }
}

/// Fields an employee update may change
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub department_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EmployeeStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leave_balance: Option<u32>,
}

fn default_leave_balance() -> u32 {
    DEFAULT_LEAVE_BALANCE
}

fn validate_contact(
    first_name: &str,
    last_name: &str,
    email: &str,
    phone: &str,
    role: &str,
) -> Result<(), RepositoryError> {
    for (field, value) in [
        ("firstName", first_name),
        ("lastName", last_name),
        ("email", email),
        ("phone", phone),
        ("role", role),
    ] {
        if is_blank(value) {
            return Err(RepositoryError::validation_error(format!(
                "Employee {field} is required"
            )));
        }
    }

    // Email format: exactly one '@' with text on both sides
    let mut parts = email.trim().split('@');
    let valid_email = matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty()
    );
    if !valid_email {
        return Err(RepositoryError::validation_error(format!(
            "Employee email '{email}' is not a valid address"
        )));
    }

    Ok(())
}
