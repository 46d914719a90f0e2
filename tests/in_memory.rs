//! In-memory repository integration tests.
//!
//! Tests are organized into modules by functionality:
//! - `task_lifecycle_tests`: Create, update, list and delete through the service
//! - `concurrency_tests`: Simultaneous mutations through cloned services

mod in_memory {
    pub mod helpers;

    mod concurrency_tests;
    mod task_lifecycle_tests;
}
