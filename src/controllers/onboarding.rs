//! Onboarding checklist page.

use super::{Notification, Notifications, PageStatus, TaskFilter};
use crate::models::{NewOnboardingTask, OnboardingTask, RecordId};
use crate::repositories::OnboardingProgress;
use crate::state::AppState;

#[derive(Debug)]
pub struct OnboardingController {
    state: AppState,
    status: PageStatus,
    tasks: Vec<OnboardingTask>,
    progress: OnboardingProgress,
    filter: TaskFilter,
    filtered: Vec<OnboardingTask>,
    notifications: Notifications,
}

impl OnboardingController {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            status: PageStatus::Loading,
            tasks: Vec::new(),
            progress: OnboardingProgress::default(),
            filter: TaskFilter::All,
            filtered: Vec::new(),
            notifications: Notifications::default(),
        }
    }

    /// Loads tasks and progress concurrently; both are primary data.
    pub async fn load(&mut self) {
        self.status = PageStatus::Loading;
        let (tasks, progress) = tokio::join!(
            self.state.onboarding.get_all(),
            self.state.onboarding.get_progress(),
        );

        match (tasks, progress) {
            (Ok(tasks), Ok(progress)) => {
                self.tasks = tasks;
                self.progress = progress;
                self.status = PageStatus::Ready;
            }
            (tasks, progress) => {
                tracing::warn!(
                    error = ?tasks.err().or(progress.err()),
                    "Onboarding load failed"
                );
                self.notifications.error("Failed to load onboarding data");
                self.status = PageStatus::Failed("Failed to load onboarding data".to_string());
            }
        }

        self.refilter();
    }

    pub async fn retry(&mut self) {
        self.load().await;
    }

    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
        self.refilter();
    }

    /// Flips a task's completion and refreshes the checklist and progress
    pub async fn toggle(&mut self, id: RecordId) -> Option<OnboardingTask> {
        let result = self.state.onboarding.toggle_completion(id).await;
        let toggled = self.notifications.report(
            result,
            |task| {
                if task.completed {
                    "Task marked as complete!".to_string()
                } else {
                    "Task marked as incomplete".to_string()
                }
            },
            "Failed to update task",
        )?;
        self.load().await;
        Some(toggled)
    }

    pub async fn add_task(&mut self, request: NewOnboardingTask) -> Option<OnboardingTask> {
        let result = self.state.onboarding.create(request).await;
        let created = self.notifications.report(
            result,
            |_| "Task added".to_string(),
            "Failed to add task",
        )?;
        self.load().await;
        Some(created)
    }

    pub async fn remove_task(&mut self, id: RecordId) -> Option<OnboardingTask> {
        let result = self.state.onboarding.delete(id).await;
        let removed = self.notifications.report(
            result,
            |_| "Task removed".to_string(),
            "Failed to remove task",
        )?;
        self.load().await;
        Some(removed)
    }

    pub fn status(&self) -> &PageStatus {
        &self.status
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    pub fn tasks(&self) -> &[OnboardingTask] {
        &self.tasks
    }

    pub fn filtered(&self) -> &[OnboardingTask] {
        &self.filtered
    }

    /// Overall and per-category progress bars
    pub fn progress(&self) -> &OnboardingProgress {
        &self.progress
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    fn refilter(&mut self) {
        self.filtered = self.filter.apply(&self.tasks);
    }
}
