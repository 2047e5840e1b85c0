//! End-to-end checks for the department delete guard.

use anyhow::Result;
use hrdesk::error::RepositoryError;
use hrdesk::models::EmployeePatch;
use hrdesk::seeds::FixtureSet;

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{new_department, new_employee, seeded_state, state_with};

#[tokio::test]
async fn delete_succeeds_after_employee_is_reassigned() -> Result<()> {
    let state = seeded_state()?;

    let department = state.departments.create(new_department("Research")).await?;
    let employee = state
        .employees
        .create(new_employee("Ann", "Lee", department.id))
        .await?;

    let refused = state.departments.delete(department.id).await;
    assert!(matches!(refused, Err(RepositoryError::Conflict(_))));
    assert_eq!(refused.unwrap_err().error_code(), "CONFLICT");
    assert!(state.departments.get_by_id(department.id).await.is_ok());

    state
        .employees
        .update(
            employee.id,
            EmployeePatch {
                department_id: Some(1),
                ..Default::default()
            },
        )
        .await?;

    state.departments.delete(department.id).await?;
    assert!(
        state
            .departments
            .get_by_id(department.id)
            .await
            .unwrap_err()
            .is_not_found()
    );
    Ok(())
}

#[tokio::test]
async fn delete_succeeds_after_employee_is_removed() -> Result<()> {
    let state = state_with(FixtureSet::default())?;

    let department = state.departments.create(new_department("Research")).await?;
    assert_eq!(department.id, 1);
    let employee = state
        .employees
        .create(new_employee("Bo", "Kim", department.id))
        .await?;
    assert_eq!(state.departments.headcount(department.id).await?, 1);

    assert!(state.departments.delete(department.id).await.is_err());

    state.employees.delete(employee.id).await?;
    assert_eq!(state.departments.headcount(department.id).await?, 0);
    state.departments.delete(department.id).await?;
    assert!(state.departments.get_all().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn employee_deletion_leaves_references_dangling() -> Result<()> {
    let state = seeded_state()?;
    // Sarah Johnson manages Engineering and has a leave request on file
    state.employees.delete(1).await?;

    let engineering = state.departments.get_by_id(1).await?;
    assert_eq!(engineering.manager_id, Some(1));
    assert_eq!(state.leave_requests.find_by_employee(1).await?.len(), 1);
    Ok(())
}
