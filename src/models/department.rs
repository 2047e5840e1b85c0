//! Department record model

use serde::{Deserialize, Serialize};

use super::{
    Record, RecordId, deserialize_id, deserialize_nullable_patch_id, deserialize_optional_id,
    is_blank,
};
use crate::error::RepositoryError;

/// Stored department record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[serde(rename = "Id", deserialize_with = "deserialize_id")]
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Soft reference to the managing employee
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub manager_id: Option<RecordId>,
    /// Snapshot taken at creation time; never recomputed
    #[serde(default)]
    pub employee_count: u32,
}

impl Department {
    pub fn apply(&mut self, patch: DepartmentPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(manager_id) = patch.manager_id {
            self.manager_id = manager_id;
        }
    }

    pub fn validate(&self) -> Result<(), RepositoryError> {
        validate_name(&self.name)
    }
}

impl Record for Department {
    const ENTITY: &'static str = "Department";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

/// Request data for creating a new department
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDepartment {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub manager_id: Option<RecordId>,
}

impl NewDepartment {
    pub fn validate(&self) -> Result<(), RepositoryError> {
        validate_name(&self.name)
    }

    pub(crate) fn into_record(self, id: RecordId) -> Department {
        Department {
            id,
            name: self.name,
            description: self.description,
            manager_id: self.manager_id,
            employee_count: 0,
        }
    }
}

/// Fields a department update may change.
///
/// `manager_id` is doubly optional: `Some(None)` clears the manager.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable_patch_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub manager_id: Option<Option<RecordId>>,
}

fn validate_name(name: &str) -> Result<(), RepositoryError> {
    if is_blank(name) {
        return Err(RepositoryError::validation_error(
            "Department name is required",
        ));
    }
    Ok(())
}
