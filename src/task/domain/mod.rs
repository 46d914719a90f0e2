//! Domain model for task records.
//!
//! The task domain covers the task aggregate, its enumerated labels, keyword
//! categorization, and the tri-state patch values used by partial updates.
//! Infrastructure concerns stay outside of the domain boundary.

mod categorizer;
mod category;
mod error;
mod ids;
mod patch;
mod priority;
mod status;
mod task;

pub use categorizer::categorize;
pub use category::Category;
pub use error::{ParseCategoryError, ParsePriorityError, ParseTaskIdError, ParseTaskStatusError};
pub use ids::TaskId;
pub use patch::FieldPatch;
pub use priority::Priority;
pub use status::TaskStatus;
pub use task::{NewTask, PersistedTaskData, Task, TaskChanges};
