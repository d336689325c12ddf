//! The five todo operations.
//!
//! Each handler takes already-validated input, performs one store call and
//! returns the authoritative record(s). Failures are logged and passed on
//! unchanged.

use crate::error::{Error, Result};
use crate::schema::{CreateTodoInput, DeleteTodoInput, ToggleTodoInput, UpdateTodoInput};
use crate::todos::{DeleteOutcome, Todo, TodoStore};

/// Log a failed operation and hand the error back.
fn logged<T>(operation: &str, result: Result<T>) -> Result<T> {
    result.map_err(|e| {
        tracing::error!(operation, error = %e, "todo operation failed");
        e
    })
}

/// Create a todo. An empty description is stored as none.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn create_todo<S: TodoStore + ?Sized>(store: &S, input: CreateTodoInput) -> Result<Todo> {
    let description = input.description.filter(|d| !d.is_empty());
    let todo = logged("create", store.create_todo(&input.title, description.as_deref()))?;
    tracing::debug!(id = todo.id, "todo created");
    Ok(todo)
}

/// List every todo in insertion order.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn get_todos<S: TodoStore + ?Sized>(store: &S) -> Result<Vec<Todo>> {
    let todos = logged("list", store.list_todos())?;
    tracing::debug!(count = todos.len(), "todos listed");
    Ok(todos)
}

/// Apply a partial update.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if no todo has the given ID, or a store error.
pub fn update_todo<S: TodoStore + ?Sized>(store: &S, input: UpdateTodoInput) -> Result<Todo> {
    let (id, update) = input.into_update();
    let result = store.update_todo(id, update).and_then(|todo| todo.ok_or(Error::NotFound { id }));
    let todo = logged("update", result)?;
    tracing::debug!(id, "todo updated");
    Ok(todo)
}

/// Flip a todo's completion state.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if no todo has the given ID, or a store error.
pub fn toggle_todo<S: TodoStore + ?Sized>(store: &S, input: ToggleTodoInput) -> Result<Todo> {
    let id = input.id;
    let result = store.toggle_todo(id).and_then(|todo| todo.ok_or(Error::NotFound { id }));
    let todo = logged("toggle", result)?;
    tracing::debug!(id, completed = todo.completed, "todo toggled");
    Ok(todo)
}

/// Delete a todo. A missing ID is reported as `success: false`, not an error.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn delete_todo<S: TodoStore + ?Sized>(
    store: &S,
    input: DeleteTodoInput,
) -> Result<DeleteOutcome> {
    let success = logged("delete", store.delete_todo(input.id))?;
    tracing::debug!(id = input.id, success, "todo delete");
    Ok(DeleteOutcome { success })
}
