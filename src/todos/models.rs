//! Todo model types and timestamp helpers.

use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Todo {
    /// Unique identifier, assigned by the store on creation.
    pub id: i64,
    /// Short title describing the task. Never empty.
    pub title: String,
    /// Optional longer description. `None` serializes as `null`.
    pub description: Option<String>,
    /// Whether the task is done.
    pub completed: bool,
    /// When the task was created. Never changes.
    pub created_at: DateTime<Utc>,
    /// When the task was last changed.
    pub updated_at: DateTime<Utc>,
}

/// Result of a delete call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DeleteOutcome {
    /// True only when a row was actually removed.
    pub success: bool,
}

/// A partial-update slot: either leave the field alone or set it.
///
/// Deserializes with `#[serde(default)]` so that an absent key becomes
/// [`FieldUpdate::Unchanged`]. A present key always becomes [`FieldUpdate::Set`],
/// so for `FieldUpdate<Option<String>>` an explicit `null` is `Set(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    /// The caller did not mention this field.
    #[default]
    Unchanged,
    /// The caller supplied a new value.
    Set(T),
}

impl<T> FieldUpdate<T> {
    /// True when the field was not supplied.
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// The supplied value, if any.
    #[must_use]
    pub const fn as_set(&self) -> Option<&T> {
        match self {
            Self::Unchanged => None,
            Self::Set(value) => Some(value),
        }
    }

    /// Resolve against the current value.
    pub fn apply(self, current: T) -> T {
        match self {
            Self::Unchanged => current,
            Self::Set(value) => value,
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unchanged, Self::Set)
    }
}

impl<T: Serialize> Serialize for FieldUpdate<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Callers pair this with `skip_serializing_if = "FieldUpdate::is_unchanged"`.
            Self::Unchanged => serializer.serialize_none(),
            Self::Set(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldUpdate<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Self::Set)
    }
}

impl<T: JsonSchema> JsonSchema for FieldUpdate<T> {
    fn is_referenceable() -> bool {
        false
    }

    fn schema_name() -> String {
        T::schema_name()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        T::json_schema(gen)
    }
}

/// Fields that can be changed on a todo. Unset fields keep their value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TodoUpdate {
    /// New title.
    pub title: FieldUpdate<String>,
    /// New description; `Set(None)` clears it.
    pub description: FieldUpdate<Option<String>>,
    /// New completion state.
    pub completed: FieldUpdate<bool>,
}

impl TodoUpdate {
    /// Check if any fields are set for update.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_unchanged() && self.description.is_unchanged() && self.completed.is_unchanged()
    }
}

/// The current time, truncated to the microsecond precision the store keeps.
#[must_use]
pub fn now() -> DateTime<Utc> {
    truncate_to_micros(Utc::now())
}

/// The timestamp to record for a mutation of a row last touched at `previous`.
///
/// Always strictly later than `previous`, even within a single clock tick.
#[must_use]
pub fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let current = now();
    if current > previous {
        current
    } else {
        previous + chrono::Duration::microseconds(1)
    }
}

fn truncate_to_micros(ts: DateTime<Utc>) -> DateTime<Utc> {
    let nanos = ts.nanosecond();
    ts.with_nanosecond(nanos - nanos % 1_000).unwrap_or(ts)
}

/// Format a timestamp for storage (RFC 3339, microseconds, `Z` suffix).
#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp.
///
/// # Errors
///
/// Returns an error if the text is not RFC 3339.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|ts| ts.with_timezone(&Utc))
}
