//! Name-based dispatch of the todo procedures.
//!
//! A call is decode → validate → handler → encode and nothing else. The
//! typed methods on [`Gateway`] are the same pipeline minus the JSON ends,
//! for callers that already hold an input struct.

use crate::error::{Error, Result};
use crate::handlers;
use crate::schema::{
    parse_input, CreateTodoInput, DeleteTodoInput, GetTodosInput, ToggleTodoInput,
    UpdateTodoInput, Validate,
};
use crate::todos::{DeleteOutcome, Todo, TodoStore};
use schemars::schema::RootSchema;
use schemars::schema_for;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The procedures the gateway exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Procedure {
    /// List every todo.
    GetTodos,
    /// Create a todo.
    CreateTodo,
    /// Partially update a todo.
    UpdateTodo,
    /// Flip a todo's completion state.
    ToggleTodo,
    /// Delete a todo.
    DeleteTodo,
}

impl Procedure {
    /// Every procedure, in declaration order.
    pub const ALL: [Self; 5] =
        [Self::GetTodos, Self::CreateTodo, Self::UpdateTodo, Self::ToggleTodo, Self::DeleteTodo];

    /// The wire name of the procedure.
    pub const fn name(self) -> &'static str {
        match self {
            Self::GetTodos => "getTodos",
            Self::CreateTodo => "createTodo",
            Self::UpdateTodo => "updateTodo",
            Self::ToggleTodo => "toggleTodo",
            Self::DeleteTodo => "deleteTodo",
        }
    }

    /// One-line description, shown by the CLI and the MCP tool list.
    pub const fn description(self) -> &'static str {
        match self {
            Self::GetTodos => "List all todos in creation order",
            Self::CreateTodo => "Create a todo with a title and optional description",
            Self::UpdateTodo => "Update a todo's title, description, or completed state",
            Self::ToggleTodo => "Flip a todo between open and completed",
            Self::DeleteTodo => "Delete a todo by its ID",
        }
    }

    /// Look a procedure up by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// JSON schema of the procedure's input.
    pub fn input_schema(self) -> RootSchema {
        match self {
            Self::GetTodos => schema_for!(GetTodosInput),
            Self::CreateTodo => schema_for!(CreateTodoInput),
            Self::UpdateTodo => schema_for!(UpdateTodoInput),
            Self::ToggleTodo => schema_for!(ToggleTodoInput),
            Self::DeleteTodo => schema_for!(DeleteTodoInput),
        }
    }

    /// JSON schema of the procedure's output.
    pub fn output_schema(self) -> RootSchema {
        match self {
            Self::GetTodos => schema_for!(Vec<Todo>),
            Self::CreateTodo | Self::UpdateTodo | Self::ToggleTodo => schema_for!(Todo),
            Self::DeleteTodo => schema_for!(DeleteOutcome),
        }
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Procedure {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| Error::UnknownProcedure(s.to_string()))
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

/// Dispatches procedure calls to the handlers over a store.
#[derive(Debug, Clone)]
pub struct Gateway<S> {
    store: S,
}

impl<S: TodoStore> Gateway<S> {
    /// Create a gateway over `store`.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Call a procedure by name with a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownProcedure`] for an unrecognised name,
    /// [`Error::Validation`] for a bad payload, or whatever the handler
    /// raises.
    pub fn call(&self, name: &str, payload: Value) -> Result<Value> {
        let procedure: Procedure = name.parse()?;
        tracing::debug!(%procedure, "gateway call");
        self.dispatch(procedure, payload)
    }

    /// Call a known procedure with a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a bad payload, or whatever the
    /// handler raises.
    pub fn dispatch(&self, procedure: Procedure, payload: Value) -> Result<Value> {
        match procedure {
            Procedure::GetTodos => {
                parse_input::<GetTodosInput>(payload)?;
                encode(&handlers::get_todos(&self.store)?)
            }
            Procedure::CreateTodo => {
                encode(&handlers::create_todo(&self.store, parse_input(payload)?)?)
            }
            Procedure::UpdateTodo => {
                encode(&handlers::update_todo(&self.store, parse_input(payload)?)?)
            }
            Procedure::ToggleTodo => {
                encode(&handlers::toggle_todo(&self.store, parse_input(payload)?)?)
            }
            Procedure::DeleteTodo => {
                encode(&handlers::delete_todo(&self.store, parse_input(payload)?)?)
            }
        }
    }

    /// `getTodos`.
    ///
    /// # Errors
    ///
    /// Returns a store error.
    pub fn get_todos(&self) -> Result<Vec<Todo>> {
        handlers::get_todos(&self.store)
    }

    /// `createTodo` with a typed input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] or a store error.
    pub fn create_todo(&self, input: CreateTodoInput) -> Result<Todo> {
        input.validate()?;
        handlers::create_todo(&self.store, input)
    }

    /// `updateTodo` with a typed input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`], [`Error::NotFound`] or a store error.
    pub fn update_todo(&self, input: UpdateTodoInput) -> Result<Todo> {
        input.validate()?;
        handlers::update_todo(&self.store, input)
    }

    /// `toggleTodo` with a typed input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] or a store error.
    pub fn toggle_todo(&self, input: ToggleTodoInput) -> Result<Todo> {
        input.validate()?;
        handlers::toggle_todo(&self.store, input)
    }

    /// `deleteTodo` with a typed input.
    ///
    /// # Errors
    ///
    /// Returns a store error.
    pub fn delete_todo(&self, input: DeleteTodoInput) -> Result<DeleteOutcome> {
        input.validate()?;
        handlers::delete_todo(&self.store, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todos::SqliteTodoStore;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_gateway() -> (TempDir, Gateway<SqliteTodoStore>) {
        let dir = TempDir::new().unwrap();
        let store = SqliteTodoStore::new(dir.path().join("test.db")).unwrap();
        (dir, Gateway::new(store))
    }

    #[test]
    fn test_procedure_names_round_trip() {
        for procedure in Procedure::ALL {
            assert_eq!(Procedure::from_name(procedure.name()), Some(procedure));
            assert_eq!(procedure.to_string().parse::<Procedure>().unwrap(), procedure);
        }
        assert_eq!(Procedure::from_name("GetTodos"), None);
    }

    #[test]
    fn test_unknown_procedure() {
        let (_dir, gateway) = create_test_gateway();
        let err = gateway.call("dropTable", json!({})).unwrap_err();
        assert!(matches!(err, Error::UnknownProcedure(ref name) if name == "dropTable"));
    }

    #[test]
    fn test_create_then_list() {
        let (_dir, gateway) = create_test_gateway();
        let created = gateway.call("createTodo", json!({"title": "Buy milk"})).unwrap();
        assert_eq!(created["title"], "Buy milk");
        assert_eq!(created["description"], Value::Null);
        assert_eq!(created["completed"], false);
        assert_eq!(created["created_at"], created["updated_at"]);

        let listed = gateway.call("getTodos", Value::Null).unwrap();
        assert_eq!(listed, json!([created]));
    }

    #[test]
    fn test_validation_happens_before_the_store() {
        let (_dir, gateway) = create_test_gateway();
        let err = gateway.call("createTodo", json!({"title": ""})).unwrap_err();
        assert!(err.is_validation());
        assert!(gateway.get_todos().unwrap().is_empty());
    }

    #[test]
    fn test_array_payloads_never_reach_the_store() {
        let (_dir, gateway) = create_test_gateway();
        let err = gateway.call("createTodo", json!(["Buy milk", null])).unwrap_err();
        assert!(err.is_validation());
        assert!(gateway.get_todos().unwrap().is_empty());

        let created = gateway.call("createTodo", json!({"title": "Buy milk"})).unwrap();
        let err = gateway.call("updateTodo", json!([created["id"]])).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(gateway.call("getTodos", Value::Null).unwrap(), json!([created]));
    }

    #[test]
    fn test_update_partial_fields_over_json() {
        let (_dir, gateway) = create_test_gateway();
        let created =
            gateway.call("createTodo", json!({"title": "Call mom", "description": "Sunday"})).unwrap();
        let id = created["id"].clone();

        let updated =
            gateway.call("updateTodo", json!({"id": id, "completed": true})).unwrap();
        assert_eq!(updated["title"], "Call mom");
        assert_eq!(updated["description"], "Sunday");
        assert_eq!(updated["completed"], true);

        let cleared = gateway.call("updateTodo", json!({"id": id, "description": null})).unwrap();
        assert_eq!(cleared["description"], Value::Null);
        assert_eq!(cleared["completed"], true);
    }

    #[test]
    fn test_not_found_and_delete_asymmetry() {
        let (_dir, gateway) = create_test_gateway();
        let err = gateway.call("toggleTodo", json!({"id": 42})).unwrap_err();
        assert!(err.is_not_found());

        let deleted = gateway.call("deleteTodo", json!({"id": 42})).unwrap();
        assert_eq!(deleted, json!({"success": false}));
    }

    #[test]
    fn test_typed_methods_validate() {
        let (_dir, gateway) = create_test_gateway();
        let err = gateway
            .create_todo(CreateTodoInput { title: String::new(), description: None })
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_schemas_are_objects() {
        for procedure in Procedure::ALL {
            let schema = serde_json::to_value(procedure.input_schema()).unwrap();
            assert_eq!(schema["type"], "object", "{procedure}");
        }
        let output = serde_json::to_value(Procedure::DeleteTodo.output_schema()).unwrap();
        assert!(output["properties"]["success"].is_object());
    }
}
