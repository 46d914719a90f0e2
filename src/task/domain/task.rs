//! Task aggregate root and its mutation rules.

use super::{Category, FieldPatch, Priority, TaskId, TaskStatus};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Window before a deadline in which it counts as approaching.
const APPROACHING_WINDOW_HOURS: i64 = 24;

/// Task aggregate root.
///
/// Serializes to the camelCase record layout used by the JSON store and
/// transports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: Category,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    status: TaskStatus,
    #[serde(default)]
    deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    finished_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Validated field values for a task about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Trimmed, non-empty title.
    pub title: String,
    /// Trimmed description, possibly empty.
    pub description: String,
    /// Resolved category.
    pub category: Category,
    /// Initial priority.
    pub priority: Priority,
    /// Initial status.
    pub status: TaskStatus,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
}

/// Validated changes to apply to an existing task.
///
/// `None` leaves the corresponding field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement category.
    pub category: Option<Category>,
    /// Replacement priority.
    pub priority: Option<Priority>,
    /// Replacement status.
    pub status: Option<TaskStatus>,
    /// Deadline change; [`FieldPatch::Clear`] removes it.
    pub deadline: FieldPatch<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted category.
    pub category: Category,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted deadline, if any.
    pub deadline: Option<DateTime<Utc>>,
    /// Persisted completion timestamp, if any.
    pub finished_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task with a fresh identifier.
    ///
    /// A task created directly in [`TaskStatus::Done`] is stamped as
    /// finished at creation time.
    #[must_use]
    pub fn new(fields: NewTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let finished_at = fields.status.is_done().then_some(timestamp);

        Self {
            id: TaskId::new(),
            title: fields.title,
            description: fields.description,
            category: fields.category,
            priority: fields.priority,
            status: fields.status,
            deadline: fields.deadline,
            finished_at,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            category: data.category,
            priority: data.priority,
            status: data.status,
            deadline: data.deadline,
            finished_at: data.finished_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns when the task was marked done, if it is done.
    #[must_use]
    pub const fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies validated changes and stamps the modification time.
    ///
    /// Status changes follow [`Self::transition_to`].
    pub fn apply(&mut self, changes: TaskChanges, clock: &impl Clock) {
        let now = clock.utc();

        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(priority) = changes.priority {
            self.priority = priority;
        }
        if let Some(status) = changes.status {
            self.transition_to(status, now);
        }
        match changes.deadline {
            FieldPatch::Absent => {}
            FieldPatch::Clear => self.deadline = None,
            FieldPatch::Set(deadline) => self.deadline = Some(deadline),
        }

        self.touch(now);
    }

    /// Moves the task to `status`.
    ///
    /// Entering [`TaskStatus::Done`] from another status records `now` as
    /// the finish time; leaving it clears the finish time. Staying in `Done`
    /// keeps the original finish time.
    fn transition_to(&mut self, status: TaskStatus, now: DateTime<Utc>) {
        match (self.status.is_done(), status.is_done()) {
            (false, true) => self.finished_at = Some(now),
            (true, false) => self.finished_at = None,
            _ => {}
        }
        self.status = status;
    }

    /// Updates `updated_at`, never moving it before `created_at`.
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }

    /// Returns `true` when an open task's deadline has passed.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.open_deadline().is_some_and(|deadline| deadline < now)
    }

    /// Returns `true` when an open task's deadline falls within the next 24
    /// hours.
    #[must_use]
    pub fn is_deadline_approaching(&self, now: DateTime<Utc>) -> bool {
        self.open_deadline().is_some_and(|deadline| {
            let remaining = deadline - now;
            remaining > Duration::zero() && remaining <= Duration::hours(APPROACHING_WINDOW_HOURS)
        })
    }

    /// Returns whole days until the deadline, rounded down.
    ///
    /// Negative once the deadline has passed; `None` without a deadline.
    #[must_use]
    pub fn days_until_deadline(&self, now: DateTime<Utc>) -> Option<i64> {
        self.deadline
            .map(|deadline| (deadline - now).num_milliseconds().div_euclid(MILLIS_PER_DAY))
    }

    fn open_deadline(&self) -> Option<DateTime<Utc>> {
        if self.status.is_done() {
            return None;
        }
        self.deadline
    }
}
