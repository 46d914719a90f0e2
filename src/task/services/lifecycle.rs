//! Service layer for task creation, update, retrieval and deletion.

use mockable::Clock;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{
    error::{TaskLifecycleError, TaskLifecycleResult},
    requests::{CreateTaskRequest, UpdateTaskRequest},
    validation::{ValidatedUpdate, validate_create, validate_update},
};
use crate::task::{
    domain::{Category, FieldPatch, NewTask, Task, TaskChanges, TaskId, categorize},
    ports::TaskRepository,
};

/// Task lifecycle orchestration service.
///
/// Mutations run one at a time per service instance (and its clones), so a
/// load-validate-persist sequence never interleaves with another.
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    write_lock: Arc<Mutex<()>>,
}

impl<R, C> Clone for TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            write_lock: Arc::clone(&self.write_lock),
        }
    }
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Creates a task.
    ///
    /// The category is derived from the title and description unless the
    /// request names one. A task created as done is stamped finished.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] for invalid input or
    /// [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let fields = validate_create(&request, self.clock.utc())?;
        let category = fields
            .category
            .unwrap_or_else(|| categorize(&fields.title, &fields.description));
        let task = Task::new(
            NewTask {
                title: fields.title,
                description: fields.description,
                category,
                priority: fields.priority,
                status: fields.status,
                deadline: fields.deadline,
            },
            &*self.clock,
        );

        let _guard = self.write_lock.lock().await;
        self.repository
            .store(&task)
            .await
            .inspect_err(|err| tracing::warn!(task_id = %task.id(), %err, "failed to store task"))?;
        tracing::debug!(task_id = %task.id(), category = %task.category(), "task created");
        Ok(task)
    }

    /// Applies a partial update to an existing task.
    ///
    /// Only supplied fields change. When the patch edits the title or
    /// description without naming a category, the category is derived again
    /// from the new text.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist,
    /// [`TaskLifecycleError::Validation`] for invalid input, or
    /// [`TaskLifecycleError::Repository`] when persistence fails. The stored
    /// record is unchanged on error.
    pub async fn update(&self, id: TaskId, request: UpdateTaskRequest) -> TaskLifecycleResult<Task> {
        let _guard = self.write_lock.lock().await;
        let mut task = self.load(id).await?;
        let patch = validate_update(&request, &task, self.clock.utc())?;
        let changes = resolve_changes(&task, patch, request.touches_text());

        task.apply(changes, &*self.clock);
        self.repository
            .update(&task)
            .await
            .inspect_err(|err| tracing::warn!(task_id = %id, %err, "failed to update task"))?;
        tracing::debug!(task_id = %id, status = %task.status(), "task updated");
        Ok(task)
    }

    /// Permanently deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when no task has the
    /// identifier, or [`TaskLifecycleError::Repository`] when persistence
    /// fails.
    pub async fn delete(&self, id: TaskId) -> TaskLifecycleResult<()> {
        let _guard = self.write_lock.lock().await;
        let removed = self
            .repository
            .remove(id)
            .await
            .inspect_err(|err| tracing::warn!(task_id = %id, %err, "failed to delete task"))?;
        if !removed {
            return Err(TaskLifecycleError::NotFound(id));
        }
        tracing::debug!(task_id = %id, "task deleted");
        Ok(())
    }

    /// Returns every task in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_all(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.find_all().await?)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// or [`TaskLifecycleError::Repository`] when persistence lookup fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.load(id).await
    }

    async fn load(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))
    }
}

/// Turns a validated patch into concrete changes, deriving the category
/// when the patch calls for it.
fn resolve_changes(task: &Task, patch: ValidatedUpdate, text_changed: bool) -> TaskChanges {
    let derive = || {
        let title = patch.title.as_deref().unwrap_or_else(|| task.title());
        let description = patch
            .description
            .as_deref()
            .unwrap_or_else(|| task.description());
        categorize(title, description)
    };
    let category: Option<Category> = match &patch.category {
        FieldPatch::Set(category) => Some(*category),
        FieldPatch::Clear => Some(derive()),
        FieldPatch::Absent if text_changed => Some(derive()),
        FieldPatch::Absent => None,
    };

    TaskChanges {
        title: patch.title,
        description: patch.description,
        category,
        priority: patch.priority,
        status: patch.status,
        deadline: patch.deadline,
    }
}
