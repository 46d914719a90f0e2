//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskdeck::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskId},
    services::TaskLifecycleService,
};

/// Service under test, backed by an in-memory repository and the system
/// clock.
pub type TestService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Provides a service over a fresh in-memory repository.
#[fixture]
pub fn service() -> TestService {
    TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    )
}

/// Asserts the listing holds exactly the expected identifiers in order.
///
/// # Errors
///
/// Returns an error if the listing length or order differs.
pub fn assert_task_order(tasks: &[Task], expected: &[TaskId]) -> Result<(), eyre::Report> {
    eyre::ensure!(
        tasks.len() == expected.len(),
        "expected {} tasks, found {}",
        expected.len(),
        tasks.len()
    );
    for (task, id) in tasks.iter().zip(expected) {
        eyre::ensure!(task.id() == *id, "task {} out of order", task.id());
    }
    Ok(())
}
