//! Field validation for task requests.
//!
//! Checks run in field order (title, description, priority, status,
//! category, deadline) and stop at the first failure, so a rejected request
//! reports exactly one problem.

use chrono::{DateTime, NaiveDateTime, Utc};
use std::fmt;
use thiserror::Error;

use super::requests::{CreateTaskRequest, UpdateTaskRequest};
use crate::task::domain::{Category, FieldPatch, Priority, Task, TaskStatus};

/// Maximum title length in characters, after trimming.
pub const TITLE_MAX_CHARS: usize = 200;

/// Maximum description length in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Zone-less timestamp layouts accepted for deadlines, read as UTC.
const LOCAL_DEADLINE_FORMATS: [&str; 3] =
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Task fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskField {
    /// The title.
    Title,
    /// The description.
    Description,
    /// The priority.
    Priority,
    /// The status.
    Status,
    /// The category.
    Category,
    /// The deadline.
    Deadline,
}

impl TaskField {
    /// Returns the field name as it appears in request payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Priority => "priority",
            Self::Status => "status",
            Self::Category => "category",
            Self::Deadline => "deadline",
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a task request is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskValidationError {
    /// No title was supplied on creation.
    #[error("title is required")]
    MissingTitle,

    /// The title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The title exceeds [`TITLE_MAX_CHARS`].
    #[error("title is {actual} characters, exceeds limit of {max}")]
    TitleTooLong {
        /// Length of the trimmed title.
        actual: usize,
        /// The maximum allowed length.
        max: usize,
    },

    /// The description exceeds [`DESCRIPTION_MAX_CHARS`].
    #[error("description is {actual} characters, exceeds limit of {max}")]
    DescriptionTooLong {
        /// Length of the supplied description.
        actual: usize,
        /// The maximum allowed length.
        max: usize,
    },

    /// The priority label is not recognised.
    #[error("invalid priority '{0}', expected High, Medium or Low")]
    InvalidPriority(String),

    /// The status label is not recognised.
    #[error("invalid status '{0}', expected Todo, In Progress or Done")]
    InvalidStatus(String),

    /// The category label is not recognised.
    #[error("invalid category '{0}'")]
    InvalidCategory(String),

    /// A field that always carries a value was set to `null`.
    #[error("{0} cannot be cleared")]
    RequiredFieldCleared(TaskField),

    /// The deadline does not parse as a timestamp.
    #[error("invalid deadline '{0}', expected an RFC 3339 timestamp")]
    MalformedDeadline(String),

    /// The deadline is not after the current time for an open task.
    #[error("deadline {deadline} must be in the future")]
    DeadlineNotInFuture {
        /// The rejected deadline.
        deadline: DateTime<Utc>,
    },
}

impl TaskValidationError {
    /// Returns the field that failed validation.
    #[must_use]
    pub const fn field(&self) -> TaskField {
        match self {
            Self::MissingTitle | Self::EmptyTitle | Self::TitleTooLong { .. } => TaskField::Title,
            Self::DescriptionTooLong { .. } => TaskField::Description,
            Self::InvalidPriority(_) => TaskField::Priority,
            Self::InvalidStatus(_) => TaskField::Status,
            Self::InvalidCategory(_) => TaskField::Category,
            Self::RequiredFieldCleared(field) => *field,
            Self::MalformedDeadline(_) | Self::DeadlineNotInFuture { .. } => TaskField::Deadline,
        }
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, TaskValidationError>;

/// Normalized fields of an accepted create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCreate {
    /// Trimmed title.
    pub title: String,
    /// Trimmed description.
    pub description: String,
    /// Explicit category; `None` asks for derivation.
    pub category: Option<Category>,
    /// Priority, defaulted to medium.
    pub priority: Priority,
    /// Status, defaulted to todo.
    pub status: TaskStatus,
    /// Parsed deadline.
    pub deadline: Option<DateTime<Utc>>,
}

/// Normalized fields of an accepted update request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedUpdate {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Category change; [`FieldPatch::Clear`] asks for derivation.
    pub category: FieldPatch<Category>,
    /// Replacement priority.
    pub priority: Option<Priority>,
    /// Replacement status.
    pub status: Option<TaskStatus>,
    /// Deadline change.
    pub deadline: FieldPatch<DateTime<Utc>>,
}

/// Validates a create request at instant `now`.
///
/// # Errors
///
/// Returns the first [`TaskValidationError`] found, in field order.
pub fn validate_create(
    request: &CreateTaskRequest,
    now: DateTime<Utc>,
) -> ValidationResult<ValidatedCreate> {
    let title = request
        .title
        .as_deref()
        .ok_or(TaskValidationError::MissingTitle)
        .and_then(validate_title)?;
    let description = request
        .description
        .as_deref()
        .map(validate_description)
        .transpose()?
        .unwrap_or_default();
    let priority = request
        .priority
        .as_deref()
        .map(parse_priority)
        .transpose()?
        .unwrap_or_default();
    let status = request
        .status
        .as_deref()
        .map(parse_status)
        .transpose()?
        .unwrap_or_default();
    let category = request
        .category
        .as_deref()
        .and_then(non_blank)
        .map(parse_category)
        .transpose()?;
    let deadline = request
        .deadline
        .as_deref()
        .and_then(non_blank)
        .map(|raw| validate_deadline(raw, status, now))
        .transpose()?;

    Ok(ValidatedCreate {
        title,
        description,
        category,
        priority,
        status,
        deadline,
    })
}

/// Validates an update request against the `existing` record at `now`.
///
/// A deadline is checked against the patched status when the request
/// changes it, otherwise against the record's current status.
///
/// # Errors
///
/// Returns the first [`TaskValidationError`] found, in field order.
pub fn validate_update(
    request: &UpdateTaskRequest,
    existing: &Task,
    now: DateTime<Utc>,
) -> ValidationResult<ValidatedUpdate> {
    let title = match &request.title {
        FieldPatch::Absent => None,
        FieldPatch::Clear => return Err(TaskValidationError::EmptyTitle),
        FieldPatch::Set(raw) => Some(validate_title(raw)?),
    };
    let description = match &request.description {
        FieldPatch::Absent => None,
        FieldPatch::Clear => Some(String::new()),
        FieldPatch::Set(raw) => Some(validate_description(raw)?),
    };
    let priority = required_patch(&request.priority, TaskField::Priority, parse_priority)?;
    let status = required_patch(&request.status, TaskField::Status, parse_status)?;
    let category = match &request.category {
        FieldPatch::Absent => FieldPatch::Absent,
        FieldPatch::Clear => FieldPatch::Clear,
        FieldPatch::Set(raw) => non_blank(raw)
            .map(parse_category)
            .transpose()?
            .map_or(FieldPatch::Clear, FieldPatch::Set),
    };
    let effective_status = status.unwrap_or_else(|| existing.status());
    let deadline = match &request.deadline {
        FieldPatch::Absent => FieldPatch::Absent,
        FieldPatch::Clear => FieldPatch::Clear,
        FieldPatch::Set(raw) => non_blank(raw)
            .map(|value| validate_deadline(value, effective_status, now))
            .transpose()?
            .map_or(FieldPatch::Clear, FieldPatch::Set),
    };

    Ok(ValidatedUpdate {
        title,
        description,
        category,
        priority,
        status,
        deadline,
    })
}

fn validate_title(raw: &str) -> ValidationResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    let length = trimmed.chars().count();
    if length > TITLE_MAX_CHARS {
        return Err(TaskValidationError::TitleTooLong {
            actual: length,
            max: TITLE_MAX_CHARS,
        });
    }
    Ok(trimmed.to_owned())
}

fn validate_description(raw: &str) -> ValidationResult<String> {
    let length = raw.chars().count();
    if length > DESCRIPTION_MAX_CHARS {
        return Err(TaskValidationError::DescriptionTooLong {
            actual: length,
            max: DESCRIPTION_MAX_CHARS,
        });
    }
    Ok(raw.trim().to_owned())
}

fn parse_priority(raw: &str) -> ValidationResult<Priority> {
    Priority::try_from(raw).map_err(|err| TaskValidationError::InvalidPriority(err.0))
}

fn parse_status(raw: &str) -> ValidationResult<TaskStatus> {
    TaskStatus::try_from(raw).map_err(|err| TaskValidationError::InvalidStatus(err.0))
}

fn parse_category(raw: &str) -> ValidationResult<Category> {
    Category::try_from(raw).map_err(|err| TaskValidationError::InvalidCategory(err.0))
}

/// Validates a patch for a field that can be replaced but never cleared.
fn required_patch<T>(
    patch: &FieldPatch<String>,
    field: TaskField,
    parse: impl FnOnce(&str) -> ValidationResult<T>,
) -> ValidationResult<Option<T>> {
    match patch {
        FieldPatch::Absent => Ok(None),
        FieldPatch::Clear => Err(TaskValidationError::RequiredFieldCleared(field)),
        FieldPatch::Set(raw) => parse(raw).map(Some),
    }
}

fn validate_deadline(
    raw: &str,
    status: TaskStatus,
    now: DateTime<Utc>,
) -> ValidationResult<DateTime<Utc>> {
    let deadline = parse_deadline(raw)?;
    if !status.is_done() && deadline <= now {
        return Err(TaskValidationError::DeadlineNotInFuture { deadline });
    }
    Ok(deadline)
}

/// Parses RFC 3339, falling back to the zone-less layouts of HTML
/// `datetime-local` inputs.
fn parse_deadline(raw: &str) -> ValidationResult<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    LOCAL_DEADLINE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TaskValidationError::MalformedDeadline(raw.to_owned()))
}

fn non_blank(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
