//! Request payloads accepted by the task lifecycle service.
//!
//! Fields hold raw client text; [`super::validation`] turns them into typed
//! values. Both payloads deserialize from the camelCase JSON bodies sent by
//! task clients.

use serde::Deserialize;

use crate::task::domain::FieldPatch;

/// Request payload for creating a task.
///
/// Absent and `null` fields are equivalent here: both select the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub(super) title: Option<String>,
    #[serde(default)]
    pub(super) description: Option<String>,
    #[serde(default)]
    pub(super) category: Option<String>,
    #[serde(default)]
    pub(super) priority: Option<String>,
    #[serde(default)]
    pub(super) status: Option<String>,
    #[serde(default)]
    pub(super) deadline: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets an explicit category label instead of deriving one.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the priority label.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the status label.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the deadline as an RFC 3339 or `YYYY-MM-DDTHH:MM` timestamp.
    #[must_use]
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }
}

/// Request payload for a partial task update.
///
/// Every field is tri-state: an absent key leaves the field untouched, an
/// explicit `null` clears it, and a value replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub(super) title: FieldPatch<String>,
    #[serde(default)]
    pub(super) description: FieldPatch<String>,
    #[serde(default)]
    pub(super) category: FieldPatch<String>,
    #[serde(default)]
    pub(super) priority: FieldPatch<String>,
    #[serde(default)]
    pub(super) status: FieldPatch<String>,
    #[serde(default)]
    pub(super) deadline: FieldPatch<String>,
}

impl UpdateTaskRequest {
    /// Creates an empty patch that changes nothing but the modification time.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = FieldPatch::Set(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = FieldPatch::Set(description.into());
        self
    }

    /// Replaces the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = FieldPatch::Set(category.into());
        self
    }

    /// Clears the category so it is derived again from the task text.
    #[must_use]
    pub fn clear_category(mut self) -> Self {
        self.category = FieldPatch::Clear;
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = FieldPatch::Set(priority.into());
        self
    }

    /// Replaces the status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = FieldPatch::Set(status.into());
        self
    }

    /// Replaces the deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = FieldPatch::Set(deadline.into());
        self
    }

    /// Removes the deadline.
    #[must_use]
    pub fn clear_deadline(mut self) -> Self {
        self.deadline = FieldPatch::Clear;
        self
    }

    /// Returns `true` when the patch supplies a title or description.
    #[must_use]
    pub const fn touches_text(&self) -> bool {
        !self.title.is_absent() || !self.description.is_absent()
    }
}
