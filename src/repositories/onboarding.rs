//! Onboarding checklist repository
//!
//! Besides CRUD this exposes completion toggling and a progress summary
//! broken down by the three fixed task categories.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::RepositoryError;
use crate::latency::{OperationClass, SharedLatency};
use crate::models::{
    NewOnboardingTask, OnboardingTask, OnboardingTaskPatch, RecordId, TaskCategory,
};
use crate::store::Collection;

/// Completion counts for one slice of the checklist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProgress {
    pub completed: usize,
    pub total: usize,
}

impl CategoryProgress {
    /// Share of completed tasks, 0..=100, rounded to the nearest integer
    pub fn percentage(&self) -> u8 {
        percentage(self.completed, self.total)
    }

    fn record(&mut self, task: &OnboardingTask) {
        self.total += 1;
        if task.completed {
            self.completed += 1;
        }
    }
}

/// Per-category breakdown keyed the way the checklist page renders it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub paperwork: CategoryProgress,
    pub training: CategoryProgress,
    pub system_access: CategoryProgress,
}

impl CategoryBreakdown {
    pub fn get(&self, category: TaskCategory) -> CategoryProgress {
        match category {
            TaskCategory::Paperwork => self.paperwork,
            TaskCategory::Training => self.training,
            TaskCategory::SystemAccess => self.system_access,
        }
    }

    fn get_mut(&mut self, category: TaskCategory) -> &mut CategoryProgress {
        match category {
            TaskCategory::Paperwork => &mut self.paperwork,
            TaskCategory::Training => &mut self.training,
            TaskCategory::SystemAccess => &mut self.system_access,
        }
    }

    /// Categories in display order
    pub fn iter(&self) -> impl Iterator<Item = (TaskCategory, CategoryProgress)> + '_ {
        TaskCategory::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }
}

/// Overall checklist progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingProgress {
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
    pub categories: CategoryBreakdown,
}

impl OnboardingProgress {
    pub fn from_tasks(tasks: &[OnboardingTask]) -> Self {
        let mut categories = CategoryBreakdown::default();
        for task in tasks {
            categories.get_mut(task.category).record(task);
        }

        let completed = tasks.iter().filter(|task| task.completed).count();
        let total = tasks.len();
        Self {
            completed,
            total,
            percentage: percentage(completed, total),
            categories,
        }
    }
}

fn percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u8
}

/// Repository for onboarding tasks
#[derive(Debug, Clone)]
pub struct OnboardingRepository {
    store: Arc<Collection<OnboardingTask>>,
    latency: SharedLatency,
}

impl OnboardingRepository {
    pub fn new(store: Arc<Collection<OnboardingTask>>, latency: SharedLatency) -> Self {
        Self { store, latency }
    }

    /// Switches the backing collection on or off to simulate an outage
    pub fn set_available(&self, available: bool) {
        self.store.set_available(available);
    }

    pub async fn get_all(&self) -> Result<Vec<OnboardingTask>, RepositoryError> {
        self.latency.pause(OperationClass::List).await;
        let tasks = self.store.snapshot().await?;
        tracing::debug!(count = tasks.len(), "Listed onboarding tasks");
        Ok(tasks)
    }

    pub async fn get_by_id(&self, id: RecordId) -> Result<OnboardingTask, RepositoryError> {
        self.latency.pause(OperationClass::Fetch).await;
        self.store.get(id).await
    }

    /// Adds a task to the checklist, always incomplete
    pub async fn create(
        &self,
        request: NewOnboardingTask,
    ) -> Result<OnboardingTask, RepositoryError> {
        self.latency.pause(OperationClass::Create).await;
        request.validate()?;

        let task = self
            .store
            .insert_with(|id| request.into_record(id))
            .await?;
        tracing::info!(task_id = task.id, category = %task.category, "Created onboarding task");
        Ok(task)
    }

    pub async fn update(
        &self,
        id: RecordId,
        patch: OnboardingTaskPatch,
    ) -> Result<OnboardingTask, RepositoryError> {
        self.latency.pause(OperationClass::Update).await;
        let updated = self
            .store
            .update_with(id, |task| {
                task.apply(patch);
                task.validate()
            })
            .await?;
        tracing::info!(task_id = id, "Updated onboarding task");
        Ok(updated)
    }

    /// Removes the task, returning it
    pub async fn delete(&self, id: RecordId) -> Result<OnboardingTask, RepositoryError> {
        self.latency.pause(OperationClass::Delete).await;
        let removed = self.store.remove(id).await?;
        tracing::info!(task_id = id, "Deleted onboarding task");
        Ok(removed)
    }

    /// Flips `completed` on the task with `id`
    pub async fn toggle_completion(&self, id: RecordId) -> Result<OnboardingTask, RepositoryError> {
        self.latency.pause(OperationClass::Toggle).await;
        let toggled = self
            .store
            .update_with(id, |task| {
                task.completed = !task.completed;
                Ok(())
            })
            .await?;
        tracing::info!(task_id = id, completed = toggled.completed, "Toggled onboarding task");
        Ok(toggled)
    }

    /// Summarizes completion across the checklist
    pub async fn get_progress(&self) -> Result<OnboardingProgress, RepositoryError> {
        self.latency.pause(OperationClass::Progress).await;
        let tasks = self.store.snapshot().await?;
        Ok(OnboardingProgress::from_tasks(&tasks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latency::NoLatency;
    use crate::models::TaskPriority;
    use chrono::NaiveDate;

    fn new_task(title: &str, category: TaskCategory) -> NewOnboardingTask {
        NewOnboardingTask {
            title: title.to_string(),
            description: String::new(),
            category,
            priority: TaskPriority::Medium,
            estimated_time: "1 hour".to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    fn repository() -> OnboardingRepository {
        OnboardingRepository::new(Arc::new(Collection::new()), Arc::new(NoLatency))
    }

    #[tokio::test]
    async fn test_progress_with_half_completed() {
        let repo = repository();
        let first = repo
            .create(new_task("Sign contract", TaskCategory::Paperwork))
            .await
            .unwrap();
        repo.create(new_task("Tax forms", TaskCategory::Paperwork))
            .await
            .unwrap();
        let third = repo
            .create(new_task("Security course", TaskCategory::Training))
            .await
            .unwrap();
        repo.create(new_task("VPN access", TaskCategory::SystemAccess))
            .await
            .unwrap();

        repo.toggle_completion(first.id).await.unwrap();
        repo.toggle_completion(third.id).await.unwrap();

        let progress = repo.get_progress().await.unwrap();
        assert_eq!(progress.completed, 2);
        assert_eq!(progress.total, 4);
        assert_eq!(progress.percentage, 50);
        assert_eq!(
            progress.categories.paperwork,
            CategoryProgress {
                completed: 1,
                total: 2
            }
        );
        assert_eq!(progress.categories.training.completed, 1);
        assert_eq!(progress.categories.system_access.total, 1);

        let summed: usize = progress.categories.iter().map(|(_, c)| c.total).sum();
        assert_eq!(summed, progress.total);
    }

    #[tokio::test]
    async fn test_progress_of_empty_checklist_is_zero() {
        let progress = repository().get_progress().await.unwrap();
        assert_eq!(progress, OnboardingProgress::default());
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_state() {
        let repo = repository();
        let task = repo
            .create(new_task("Laptop setup", TaskCategory::SystemAccess))
            .await
            .unwrap();

        assert!(repo.toggle_completion(task.id).await.unwrap().completed);
        assert!(!repo.toggle_completion(task.id).await.unwrap().completed);
        assert!(repo.toggle_completion(99).await.unwrap_err().is_not_found());
    }

    #[test]
    fn test_percentage_rounds() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn test_progress_serializes_with_camel_case_categories() {
        let value = serde_json::to_value(OnboardingProgress::default()).unwrap();
        assert!(value["categories"]["systemAccess"]["total"].is_number());
        assert_eq!(value["percentage"], 0);
    }
}
