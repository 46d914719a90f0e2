//! Tri-state field values for partial updates.

use serde::{Deserialize, Deserializer};

/// A single field of a partial update.
///
/// Distinguishes a field the client left out from one it explicitly set to
/// `null`. When deserializing, mark the field `#[serde(default)]` so an
/// absent key becomes [`FieldPatch::Absent`] while `null` becomes
/// [`FieldPatch::Clear`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldPatch<T> {
    /// Field not supplied; keep the current value.
    #[default]
    Absent,
    /// Field explicitly cleared.
    Clear,
    /// Field set to a new value.
    Set(T),
}

impl<T> FieldPatch<T> {
    /// Returns `true` when the field was not supplied.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns the new value when one was supplied.
    #[must_use]
    pub const fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Absent | Self::Clear => None,
        }
    }
}

impl<T> From<Option<T>> for FieldPatch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Clear, Self::Set)
    }
}

impl<'de, T> Deserialize<'de> for FieldPatch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}
