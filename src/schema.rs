//! Input shapes for the todo procedures and the rules that validate them.
//!
//! Every payload is decoded and validated here before a handler sees it;
//! failures at either step are [`Error::Validation`].

use crate::error::{Error, Result};
use crate::todos::{FieldUpdate, TodoUpdate};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Input rules checked after decoding.
pub trait Validate {
    /// Check the decoded value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] describing the first broken rule.
    fn validate(&self) -> Result<()>;
}

/// Decode and validate a JSON payload.
///
/// A `null` payload is treated as an empty object. Any other payload must
/// be an object.
///
/// # Errors
///
/// Returns [`Error::Validation`] if the payload has the wrong shape or
/// breaks a rule.
pub fn parse_input<T: DeserializeOwned + Validate>(payload: serde_json::Value) -> Result<T> {
    let payload = if payload.is_null() { serde_json::json!({}) } else { payload };
    if !payload.is_object() {
        return Err(Error::Validation("expected a JSON object".to_string()));
    }
    let input: T =
        serde_json::from_value(payload).map_err(|e| Error::Validation(e.to_string()))?;
    input.validate()?;
    Ok(input)
}

fn require_title(title: &str) -> Result<()> {
    if title.is_empty() {
        return Err(Error::Validation("title must not be empty".to_string()));
    }
    Ok(())
}

/// Input for `getTodos`. Takes no fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GetTodosInput {}

impl Validate for GetTodosInput {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Input for `createTodo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CreateTodoInput {
    /// Todo title (required, non-empty).
    pub title: String,
    /// Optional description; `null` or omitted means none.
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for CreateTodoInput {
    fn validate(&self) -> Result<()> {
        require_title(&self.title)
    }
}

/// Input for `updateTodo`. Omitted fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UpdateTodoInput {
    /// Todo ID.
    pub id: i64,
    /// New title (optional, non-empty when given).
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub title: FieldUpdate<String>,
    /// New description; `null` clears it (optional).
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub description: FieldUpdate<Option<String>>,
    /// New completion state (optional).
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub completed: FieldUpdate<bool>,
}

impl UpdateTodoInput {
    /// An update for `id` that changes nothing yet.
    #[must_use]
    pub fn for_id(id: i64) -> Self {
        Self {
            id,
            title: FieldUpdate::Unchanged,
            description: FieldUpdate::Unchanged,
            completed: FieldUpdate::Unchanged,
        }
    }

    /// Split into the target ID and the store-level update.
    #[must_use]
    pub fn into_update(self) -> (i64, TodoUpdate) {
        (
            self.id,
            TodoUpdate {
                title: self.title,
                description: self.description,
                completed: self.completed,
            },
        )
    }
}

impl Validate for UpdateTodoInput {
    fn validate(&self) -> Result<()> {
        if let Some(title) = self.title.as_set() {
            require_title(title)?;
        }
        Ok(())
    }
}

/// Input for `toggleTodo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToggleTodoInput {
    /// Todo ID.
    pub id: i64,
}

impl Validate for ToggleTodoInput {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Input for `deleteTodo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DeleteTodoInput {
    /// Todo ID.
    pub id: i64,
}

impl Validate for DeleteTodoInput {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}
