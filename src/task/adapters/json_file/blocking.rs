//! Blocking operation helpers for the JSON file repository.
//!
//! Filesystem work is offloaded to the blocking thread pool so it never
//! stalls the async executor's worker threads.

use crate::task::ports::{TaskRepositoryError, TaskRepositoryResult};

/// Runs a blocking filesystem operation on a dedicated thread pool.
pub(super) async fn run_blocking<F, T>(f: F) -> TaskRepositoryResult<T>
where
    F: FnOnce() -> TaskRepositoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(TaskRepositoryError::persistence)?
}
