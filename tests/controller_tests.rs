//! Page controller behavior over small hand-built fixtures.

use anyhow::Result;
use hrdesk::controllers::{
    DashboardController, DepartmentsController, EmployeeFilter, EmployeesController,
    LeaveController, NotificationLevel, OnboardingController, PageStatus, TaskFilter,
};
use hrdesk::models::{EmployeeStatus, TaskCategory};
use hrdesk::seeds::FixtureSet;

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{department, employee, seeded_state, state_with};

fn two_people() -> FixtureSet {
    FixtureSet {
        employees: vec![
            employee(1, "Ann", "Lee", 1, EmployeeStatus::Active),
            employee(2, "Bo", "Kim", 1, EmployeeStatus::Inactive),
        ],
        departments: vec![department(1, "Design")],
        ..Default::default()
    }
}

#[tokio::test]
async fn employee_status_and_search_filters() -> Result<()> {
    let mut page = EmployeesController::new(state_with(two_people())?);
    page.load().await;
    assert_eq!(page.status(), &PageStatus::Ready);
    assert_eq!(page.filtered().len(), 2);

    page.set_status_filter(Some(EmployeeStatus::Active));
    let names: Vec<_> = page.filtered().iter().map(|e| e.full_name()).collect();
    assert_eq!(names, vec!["Ann Lee"]);

    page.set_filter(EmployeeFilter {
        search: "an".to_string(),
        ..Default::default()
    });
    let names: Vec<_> = page.filtered().iter().map(|e| e.full_name()).collect();
    assert_eq!(names, vec!["Ann Lee"]);
    Ok(())
}

#[tokio::test]
async fn empty_collections_load_cleanly() -> Result<()> {
    let state = state_with(FixtureSet::default())?;

    let mut dashboard = DashboardController::new(state.clone());
    dashboard.load().await;
    assert!(dashboard.status().is_ready());
    assert_eq!(dashboard.stats().total_employees, 0);
    assert!(dashboard.recent_employees().is_empty());
    assert!(dashboard.pending_preview().is_empty());

    let mut onboarding = OnboardingController::new(state);
    onboarding.load().await;
    assert_eq!(onboarding.progress().percentage, 0);
    assert!(onboarding.filtered().is_empty());
    assert!(onboarding.drain_notifications().is_empty());
    Ok(())
}

#[tokio::test]
async fn department_cards_count_live_members() -> Result<()> {
    let state = state_with(two_people())?;
    let mut page = DepartmentsController::new(state.clone());
    page.load().await;

    let cards = page.cards();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].headcount, 2);
    assert_eq!(cards[0].department.employee_count, 0);

    assert!(!page.delete(1).await);
    let notifications = page.drain_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].level, NotificationLevel::Error);
    assert_eq!(page.departments().len(), 1);
    Ok(())
}

#[tokio::test]
async fn leave_page_hides_requests_of_deleted_employees() -> Result<()> {
    let state = seeded_state()?;
    let mut page = LeaveController::new(state.clone());
    page.load().await;
    let cards_before = page.cards().len();

    let requester = page.requests()[0].employee_id;
    state.employees.delete(requester).await?;
    page.retry().await;

    let orphaned = page
        .requests()
        .iter()
        .filter(|r| r.employee_id == requester)
        .count();
    assert!(orphaned > 0);
    assert_eq!(page.cards().len(), cards_before - orphaned);
    assert!(page.cards().iter().all(|c| c.employee.id != requester));
    Ok(())
}

#[tokio::test]
async fn onboarding_percentages_follow_toggles() -> Result<()> {
    let state = seeded_state()?;
    let mut page = OnboardingController::new(state);
    page.load().await;

    page.set_filter(TaskFilter::Category(TaskCategory::Paperwork));
    let pending: Vec<_> = page
        .filtered()
        .iter()
        .filter(|task| !task.completed)
        .map(|task| task.id)
        .collect();
    for id in pending {
        page.toggle(id).await;
    }

    let paperwork = page.progress().categories.paperwork;
    assert_eq!(paperwork.completed, paperwork.total);
    assert_eq!(paperwork.percentage(), 100);
    assert!(page.filtered().iter().all(|task| task.completed));
    Ok(())
}

#[tokio::test]
async fn primary_outage_fails_page_and_keeps_loaded_rows() -> Result<()> {
    let state = state_with(two_people())?;
    let mut page = EmployeesController::new(state.clone());
    page.load().await;
    assert!(page.status().is_ready());

    state.employees.set_available(false);
    page.retry().await;
    assert_eq!(
        page.status(),
        &PageStatus::Failed("Failed to load employees".to_string())
    );
    assert_eq!(page.employees().len(), 2);
    assert_eq!(page.filtered().len(), 2);
    let notifications = page.drain_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].message, "Failed to load employees");

    state.employees.set_available(true);
    page.retry().await;
    assert_eq!(page.status(), &PageStatus::Ready);
    assert!(page.drain_notifications().is_empty());
    Ok(())
}

#[tokio::test]
async fn secondary_outage_only_notifies() -> Result<()> {
    let state = state_with(two_people())?;
    state.departments.set_available(false);

    let mut page = EmployeesController::new(state.clone());
    page.load().await;
    assert_eq!(page.status(), &PageStatus::Ready);
    assert_eq!(page.employees().len(), 2);
    assert!(page.departments().is_empty());

    let notifications = page.drain_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].level, NotificationLevel::Error);
    assert!(notifications[0].message.starts_with("Failed to load departments"));

    let mut departments = DepartmentsController::new(state.clone());
    departments.load().await;
    assert_eq!(
        departments.status(),
        &PageStatus::Failed("Failed to load departments".to_string())
    );

    state.departments.set_available(true);
    departments.retry().await;
    assert!(departments.status().is_ready());
    assert_eq!(departments.cards()[0].headcount, 2);
    Ok(())
}

#[tokio::test]
async fn dashboard_and_onboarding_recover_on_retry() -> Result<()> {
    let state = seeded_state()?;

    let mut dashboard = DashboardController::new(state.clone());
    dashboard.load().await;
    let loaded = dashboard.stats();

    state.leave_requests.set_available(false);
    dashboard.retry().await;
    assert_eq!(
        dashboard.status(),
        &PageStatus::Failed("Failed to load dashboard data".to_string())
    );
    assert_eq!(dashboard.stats(), loaded);

    state.leave_requests.set_available(true);
    dashboard.retry().await;
    assert!(dashboard.status().is_ready());

    state.onboarding.set_available(false);
    let mut onboarding = OnboardingController::new(state.clone());
    onboarding.load().await;
    assert_eq!(
        onboarding.status().error(),
        Some("Failed to load onboarding data")
    );
    assert!(onboarding.tasks().is_empty());

    state.onboarding.set_available(true);
    onboarding.retry().await;
    assert!(onboarding.status().is_ready());
    assert!(!onboarding.tasks().is_empty());
    Ok(())
}

#[tokio::test]
async fn leave_page_survives_employee_outage() -> Result<()> {
    let state = seeded_state()?;
    state.employees.set_available(false);

    let mut page = LeaveController::new(state.clone());
    page.load().await;
    assert!(page.status().is_ready());
    assert!(!page.requests().is_empty());
    // No employees loaded, so every card is skipped as dangling
    assert!(page.cards().is_empty());
    assert_eq!(page.drain_notifications().len(), 1);

    state.employees.set_available(true);
    page.retry().await;
    assert!(!page.cards().is_empty());
    Ok(())
}
