//! Onboarding checklist task model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Record, RecordId, deserialize_id, is_blank};
use crate::error::RepositoryError;

/// Checklist grouping; the set is fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskCategory {
    Paperwork,
    Training,
    #[serde(rename = "System Access")]
    SystemAccess,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 3] = [
        TaskCategory::Paperwork,
        TaskCategory::Training,
        TaskCategory::SystemAccess,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Paperwork => "Paperwork",
            TaskCategory::Training => "Training",
            TaskCategory::SystemAccess => "System Access",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    #[default]
    Medium,
    Low,
}

/// Stored onboarding task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingTask {
    #[serde(rename = "Id", deserialize_with = "deserialize_id")]
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: TaskCategory,
    #[serde(default)]
    pub priority: TaskPriority,
    /// Free-form effort estimate, e.g. "30 minutes"
    #[serde(default)]
    pub estimated_time: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
}

impl OnboardingTask {
    pub fn apply(&mut self, patch: OnboardingTaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(estimated_time) = patch.estimated_time {
            self.estimated_time = estimated_time;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }

    pub fn validate(&self) -> Result<(), RepositoryError> {
        validate_title(&self.title)
    }
}

impl Record for OnboardingTask {
    const ENTITY: &'static str = "Task";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

/// Request data for adding a checklist task; tasks always start incomplete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOnboardingTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: TaskCategory,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub estimated_time: String,
    pub due_date: NaiveDate,
}

impl NewOnboardingTask {
    pub fn validate(&self) -> Result<(), RepositoryError> {
        validate_title(&self.title)
    }

    pub(crate) fn into_record(self, id: RecordId) -> OnboardingTask {
        OnboardingTask {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            priority: self.priority,
            estimated_time: self.estimated_time,
            due_date: self.due_date,
            completed: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingTaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TaskCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

fn validate_title(title: &str) -> Result<(), RepositoryError> {
    if is_blank(title) {
        return Err(RepositoryError::validation_error("Task title is required"));
    }
    Ok(())
}
