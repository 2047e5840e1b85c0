//! # Data Models
//!
//! This module contains the records held by the in-memory store together with
//! the create and patch types each repository accepts.

use serde::{Deserialize, Deserializer, Serialize};

pub mod department;
pub mod employee;
pub mod leave_request;
pub mod onboarding_task;

pub use department::{Department, DepartmentPatch, NewDepartment};
pub use employee::{Employee, EmployeePatch, EmployeeStatus, NewEmployee};
pub use leave_request::{LeaveRequest, LeaveRequestPatch, LeaveStatus, LeaveType, NewLeaveRequest};
pub use onboarding_task::{
    NewOnboardingTask, OnboardingTask, OnboardingTaskPatch, TaskCategory, TaskPriority,
};

/// Identifier shared by every collection.
pub type RecordId = u32;

/// Behaviour every stored record provides to the generic collection.
pub trait Record: Clone + Send + Sync + 'static {
    /// Human-readable entity name used in errors and logs
    const ENTITY: &'static str;

    fn id(&self) -> RecordId;

    fn set_id(&mut self, id: RecordId);
}

/// Basic service information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "hrdesk".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientId {
    Number(RecordId),
    Text(String),
}

impl LenientId {
    fn into_id<E: serde::de::Error>(self) -> Result<RecordId, E> {
        match self {
            LenientId::Number(id) => Ok(id),
            LenientId::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid record id '{text}'"))),
        }
    }
}

/// Accepts an id encoded either as a JSON number or a numeric string.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<RecordId, D::Error>
where
    D: Deserializer<'de>,
{
    LenientId::deserialize(deserializer)?.into_id()
}

/// Optional variant of [`deserialize_id`]; empty strings and `null` map to `None`.
pub(crate) fn deserialize_optional_id<'de, D>(
    deserializer: D,
) -> Result<Option<RecordId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<LenientId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(LenientId::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(id) => id.into_id().map(Some),
    }
}

/// Patch variant of [`deserialize_optional_id`] for nullable references.
///
/// Used with `#[serde(default)]`: an absent field stays `None` (no change),
/// while a present `null` or empty string becomes `Some(None)` (clear).
pub(crate) fn deserialize_nullable_patch_id<'de, D>(
    deserializer: D,
) -> Result<Option<Option<RecordId>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_optional_id(deserializer).map(Some)
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "deserialize_id")]
        id: RecordId,
        #[serde(default, deserialize_with = "deserialize_optional_id")]
        other: Option<RecordId>,
    }

    #[test]
    fn test_numeric_and_string_ids_normalize() {
        let numeric: Holder = serde_json::from_str(r#"{"id": 7, "other": 3}"#).unwrap();
        assert_eq!(numeric.id, 7);
        assert_eq!(numeric.other, Some(3));

        let textual: Holder = serde_json::from_str(r#"{"id": "12", "other": ""}"#).unwrap();
        assert_eq!(textual.id, 12);
        assert_eq!(textual.other, None);

        let missing: Holder = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(missing.other, None);
    }

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_nullable_patch_id")]
        reference: Option<Option<RecordId>>,
    }

    #[test]
    fn test_patch_ids_tell_absent_from_null() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.reference, None);

        let null: Patch = serde_json::from_str(r#"{"reference": null}"#).unwrap();
        assert_eq!(null.reference, Some(None));

        let blank: Patch = serde_json::from_str(r#"{"reference": ""}"#).unwrap();
        assert_eq!(blank.reference, Some(None));

        let set: Patch = serde_json::from_str(r#"{"reference": "4"}"#).unwrap();
        assert_eq!(set.reference, Some(Some(4)));
    }

    #[test]
    fn test_non_numeric_id_is_rejected() {
        let result: Result<Holder, _> = serde_json::from_str(r#"{"id": "abc"}"#);
        assert!(result.is_err());
    }
}
