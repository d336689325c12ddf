//! The view's connection to the procedures.

use crate::error::Result;
use crate::gateway::{Gateway, Procedure};
use crate::schema::{CreateTodoInput, DeleteTodoInput, ToggleTodoInput, UpdateTodoInput};
use crate::todos::{DeleteOutcome, Todo, TodoStore};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Calls the view makes against the server.
pub trait TodoApi {
    /// `getTodos`.
    ///
    /// # Errors
    ///
    /// Returns whatever the server raises.
    fn get_todos(&self) -> Result<Vec<Todo>>;

    /// `createTodo`.
    ///
    /// # Errors
    ///
    /// Returns whatever the server raises.
    fn create_todo(&self, input: &CreateTodoInput) -> Result<Todo>;

    /// `updateTodo`.
    ///
    /// # Errors
    ///
    /// Returns whatever the server raises.
    fn update_todo(&self, input: &UpdateTodoInput) -> Result<Todo>;

    /// `toggleTodo`.
    ///
    /// # Errors
    ///
    /// Returns whatever the server raises.
    fn toggle_todo(&self, id: i64) -> Result<Todo>;

    /// `deleteTodo`.
    ///
    /// # Errors
    ///
    /// Returns whatever the server raises.
    fn delete_todo(&self, id: i64) -> Result<DeleteOutcome>;
}

/// A [`TodoApi`] that speaks JSON to a [`Gateway`], the way a remote
/// client would.
#[derive(Debug, Clone)]
pub struct RpcClient<S> {
    gateway: Gateway<S>,
}

impl<S: TodoStore> RpcClient<S> {
    /// Create a client over `gateway`.
    pub const fn new(gateway: Gateway<S>) -> Self {
        Self { gateway }
    }

    fn request<I: Serialize, O: DeserializeOwned>(
        &self,
        procedure: Procedure,
        input: &I,
    ) -> Result<O> {
        let payload = serde_json::to_value(input)?;
        let response = self.gateway.dispatch(procedure, payload)?;
        Ok(serde_json::from_value(response)?)
    }
}

impl<S: TodoStore> TodoApi for RpcClient<S> {
    fn get_todos(&self) -> Result<Vec<Todo>> {
        self.request(Procedure::GetTodos, &serde_json::Value::Null)
    }

    fn create_todo(&self, input: &CreateTodoInput) -> Result<Todo> {
        self.request(Procedure::CreateTodo, input)
    }

    fn update_todo(&self, input: &UpdateTodoInput) -> Result<Todo> {
        self.request(Procedure::UpdateTodo, input)
    }

    fn toggle_todo(&self, id: i64) -> Result<Todo> {
        self.request(Procedure::ToggleTodo, &ToggleTodoInput { id })
    }

    fn delete_todo(&self, id: i64) -> Result<DeleteOutcome> {
        self.request(Procedure::DeleteTodo, &DeleteTodoInput { id })
    }
}
