//! Concurrent mutation tests through cloned services.

use rstest::rstest;
use taskdeck::task::services::{CreateTaskRequest, UpdateTaskRequest};

use super::helpers::{TestService, service};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn simultaneous_creates_are_all_listed(service: TestService) {
    let handles: Vec<_> = (0..32)
        .map(|n| {
            let worker = service.clone();
            tokio::spawn(async move {
                worker
                    .create(CreateTaskRequest::new(format!("Task {n}")))
                    .await
            })
        })
        .collect();

    let mut created = Vec::new();
    for handle in handles {
        let task = handle
            .await
            .expect("create task should not panic")
            .expect("create should succeed");
        created.push(task.id());
    }

    let tasks = service.list_all().await.expect("list should succeed");
    assert_eq!(tasks.len(), created.len());
    for id in created {
        assert!(tasks.iter().any(|task| task.id() == id));
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn interleaved_updates_keep_every_field_change(service: TestService) {
    let task = service
        .create(CreateTaskRequest::new("Shared task"))
        .await
        .expect("task creation should succeed");

    let id = task.id();
    let priority = {
        let worker = service.clone();
        tokio::spawn(async move {
            worker
                .update(id, UpdateTaskRequest::new().with_priority("Low"))
                .await
        })
    };
    let description = {
        let worker = service.clone();
        tokio::spawn(async move {
            worker
                .update(id, UpdateTaskRequest::new().with_description("edited elsewhere"))
                .await
        })
    };
    for handle in [priority, description] {
        handle
            .await
            .expect("update task should not panic")
            .expect("update should succeed");
    }

    let stored = service.find_by_id(id).await.expect("lookup should succeed");
    assert_eq!(stored.priority().as_str(), "Low");
    assert_eq!(stored.description(), "edited elsewhere");
}
