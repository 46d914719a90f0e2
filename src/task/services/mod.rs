//! Application services for task lifecycle orchestration.

mod error;
mod lifecycle;
mod requests;
pub mod validation;

pub use error::{ErrorKind, ErrorResponse, TaskLifecycleError, TaskLifecycleResult};
pub use lifecycle::TaskLifecycleService;
pub use requests::{CreateTaskRequest, UpdateTaskRequest};
pub use validation::{TaskField, TaskValidationError};
