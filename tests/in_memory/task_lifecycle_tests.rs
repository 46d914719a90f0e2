//! In-memory integration tests for task lifecycle operations.

use chrono::{Duration, Utc};
use rstest::rstest;
use taskdeck::task::{
    domain::{Category, Priority, TaskStatus},
    services::{CreateTaskRequest, ErrorKind, ErrorResponse, UpdateTaskRequest},
};

use super::helpers::{TestService, assert_task_order, service};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_moves_through_its_whole_lifecycle(service: TestService) {
    let deadline = Utc::now() + Duration::days(3);
    let created = service
        .create(
            CreateTaskRequest::new("  Prepare quarterly report  ")
                .with_description("numbers for the client meeting")
                .with_priority("High")
                .with_deadline(deadline.to_rfc3339()),
        )
        .await
        .expect("task creation should succeed");

    assert_eq!(created.title(), "Prepare quarterly report");
    assert_eq!(created.category(), Category::Work);
    assert_eq!(created.priority(), Priority::High);
    assert_eq!(created.status(), TaskStatus::Todo);
    assert_eq!(created.deadline(), Some(deadline));

    let started = service
        .update(
            created.id(),
            UpdateTaskRequest::new().with_status("In Progress"),
        )
        .await
        .expect("start should succeed");
    assert_eq!(started.status(), TaskStatus::InProgress);
    assert_eq!(started.finished_at(), None);

    let finished = service
        .update(created.id(), UpdateTaskRequest::new().with_status("Done"))
        .await
        .expect("finish should succeed");
    assert!(finished.finished_at().is_some());
    assert!(!finished.is_overdue(deadline + Duration::days(1)));

    service
        .delete(created.id())
        .await
        .expect("delete should succeed");
    let remaining = service.list_all().await.expect("list should succeed");
    assert!(remaining.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_preserves_creation_order(service: TestService) {
    let mut ids = Vec::new();
    for title in ["Pay electricity bill", "Gym session", "Read Rust book"] {
        let task = service
            .create(CreateTaskRequest::new(title))
            .await
            .expect("task creation should succeed");
        ids.push(task.id());
    }

    let tasks = service.list_all().await.expect("list should succeed");

    assert_task_order(&tasks, &ids).expect("listing should keep creation order");
    let categories: Vec<_> = tasks.iter().map(|task| task.category()).collect();
    assert_eq!(
        categories,
        vec![Category::Finance, Category::Health, Category::Learning]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_requests_report_validation_errors(service: TestService) {
    let err = service
        .create(CreateTaskRequest::new("Plan trip").with_status("Blocked"))
        .await
        .expect_err("unknown status should be rejected");

    let response = ErrorResponse::from(&err);
    assert_eq!(response.kind, ErrorKind::Validation);
    assert_eq!(response.field, Some("status"));
    assert!(
        service
            .list_all()
            .await
            .expect("list should succeed")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn past_deadline_is_accepted_only_for_done_tasks(service: TestService) {
    let yesterday = (Utc::now() - Duration::days(1)).to_rfc3339();

    let open = service
        .create(CreateTaskRequest::new("Late task").with_deadline(yesterday.clone()))
        .await;
    let done = service
        .create(
            CreateTaskRequest::new("Finished late task")
                .with_status("Done")
                .with_deadline(yesterday),
        )
        .await
        .expect("done task may carry a past deadline");

    assert_eq!(
        open.expect_err("open task needs a future deadline").kind(),
        ErrorKind::Validation
    );
    assert!(done.finished_at().is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lookups_of_deleted_tasks_are_not_found(service: TestService) {
    let task = service
        .create(CreateTaskRequest::new("Temporary"))
        .await
        .expect("task creation should succeed");
    service
        .delete(task.id())
        .await
        .expect("delete should succeed");

    let lookup = service.find_by_id(task.id()).await;
    let update = service
        .update(task.id(), UpdateTaskRequest::new().with_title("Revived"))
        .await;

    assert_eq!(
        lookup.expect_err("deleted task is gone").kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        update.expect_err("deleted task is gone").kind(),
        ErrorKind::NotFound
    );
}
