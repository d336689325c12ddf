//! Client view state and the actions that change it.
//!
//! The view never predicts server state: every mutation waits for the
//! server's record and patches the local list with it. A failed call is
//! logged and leaves the state as it was.

use super::api::TodoApi;
use crate::schema::{CreateTodoInput, UpdateTodoInput};
use crate::todos::{FieldUpdate, Todo};
use serde::Serialize;

/// What an action did to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// State changed.
    Applied,
    /// The action was not available in the current state.
    Ignored,
    /// The server call failed; state is unchanged.
    Failed(String),
}

impl ActionOutcome {
    /// True if state changed.
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// The row being edited and its draft values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditSession {
    /// ID of the row being edited.
    pub id: i64,
    /// Draft title.
    pub title: String,
    /// Draft description; empty means none.
    pub description: String,
}

/// The create form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewTodoForm {
    /// Title to create with.
    pub title: String,
    /// Description to create with; empty means none.
    pub description: String,
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

/// The todo list as the user sees it.
#[derive(Debug)]
pub struct TodoApp<A> {
    api: A,
    todos: Vec<Todo>,
    editing: Option<EditSession>,
    new_todo: NewTodoForm,
    pending_delete: Option<i64>,
}

impl<A: TodoApi> TodoApp<A> {
    /// An empty view over `api`. Call [`Self::load`] to fill it.
    pub fn new(api: A) -> Self {
        Self {
            api,
            todos: Vec::new(),
            editing: None,
            new_todo: NewTodoForm::default(),
            pending_delete: None,
        }
    }

    /// The API the view talks to.
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// The local list, in server order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// The open edit session, if any.
    pub const fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    /// The create form.
    pub const fn new_todo(&self) -> &NewTodoForm {
        &self.new_todo
    }

    /// The todo awaiting delete confirmation, if any.
    pub fn pending_delete(&self) -> Option<&Todo> {
        self.pending_delete.and_then(|id| self.find(id))
    }

    /// Open todos, in list order.
    pub fn incomplete(&self) -> Vec<&Todo> {
        self.todos.iter().filter(|t| !t.completed).collect()
    }

    /// Completed todos, in list order.
    pub fn completed(&self) -> Vec<&Todo> {
        self.todos.iter().filter(|t| t.completed).collect()
    }

    fn find(&self, id: i64) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    fn is_editing(&self, id: i64) -> bool {
        self.editing.as_ref().is_some_and(|e| e.id == id)
    }

    fn replace(&mut self, todo: Todo) {
        if let Some(slot) = self.todos.iter_mut().find(|t| t.id == todo.id) {
            *slot = todo;
        }
    }

    fn failed(action: &str, err: &crate::error::Error) -> ActionOutcome {
        tracing::error!(error = %err, "Failed to {action}");
        ActionOutcome::Failed(err.to_string())
    }

    /// Replace the local list with the server's. An edit session or delete
    /// question whose row is gone, or no longer editable, is closed.
    pub fn load(&mut self) -> ActionOutcome {
        match self.api.get_todos() {
            Ok(todos) => {
                self.todos = todos;
                if let Some(id) = self.editing.as_ref().map(|e| e.id) {
                    if !self.find(id).is_some_and(|t| !t.completed) {
                        self.editing = None;
                    }
                }
                if let Some(id) = self.pending_delete {
                    if self.find(id).is_none() {
                        self.pending_delete = None;
                    }
                }
                ActionOutcome::Applied
            }
            Err(e) => Self::failed("load todos", &e),
        }
    }

    /// Set the create form's title.
    pub fn set_new_title(&mut self, title: impl Into<String>) {
        self.new_todo.title = title.into();
    }

    /// Set the create form's description.
    pub fn set_new_description(&mut self, description: impl Into<String>) {
        self.new_todo.description = description.into();
    }

    /// Create a todo from the form. A blank title does nothing.
    pub fn submit_new(&mut self) -> ActionOutcome {
        if self.new_todo.title.trim().is_empty() {
            return ActionOutcome::Ignored;
        }

        let input = CreateTodoInput {
            title: self.new_todo.title.clone(),
            description: non_empty(&self.new_todo.description),
        };

        match self.api.create_todo(&input) {
            Ok(todo) => {
                self.todos.push(todo);
                self.new_todo = NewTodoForm::default();
                ActionOutcome::Applied
            }
            Err(e) => Self::failed("create todo", &e),
        }
    }

    /// Start editing an open todo, replacing any other edit session.
    pub fn start_edit(&mut self, id: i64) -> ActionOutcome {
        if self.is_editing(id) {
            return ActionOutcome::Ignored;
        }
        let Some(todo) = self.find(id).filter(|t| !t.completed) else {
            return ActionOutcome::Ignored;
        };
        self.editing = Some(EditSession {
            id,
            title: todo.title.clone(),
            description: todo.description.clone().unwrap_or_default(),
        });
        ActionOutcome::Applied
    }

    /// Change the draft title.
    pub fn set_draft_title(&mut self, title: impl Into<String>) -> ActionOutcome {
        self.editing.as_mut().map_or(ActionOutcome::Ignored, |session| {
            session.title = title.into();
            ActionOutcome::Applied
        })
    }

    /// Change the draft description.
    pub fn set_draft_description(&mut self, description: impl Into<String>) -> ActionOutcome {
        self.editing.as_mut().map_or(ActionOutcome::Ignored, |session| {
            session.description = description.into();
            ActionOutcome::Applied
        })
    }

    /// Send the draft. A blank draft title does nothing; a failed call keeps
    /// the session open.
    pub fn save_edit(&mut self) -> ActionOutcome {
        let Some(session) = self.editing.as_ref() else {
            return ActionOutcome::Ignored;
        };
        if session.title.trim().is_empty() {
            return ActionOutcome::Ignored;
        }

        let mut input = UpdateTodoInput::for_id(session.id);
        input.title = FieldUpdate::Set(session.title.clone());
        input.description = FieldUpdate::Set(non_empty(&session.description));

        match self.api.update_todo(&input) {
            Ok(todo) => {
                self.replace(todo);
                self.editing = None;
                ActionOutcome::Applied
            }
            Err(e) => Self::failed("update todo", &e),
        }
    }

    /// Drop the draft and return to viewing.
    pub fn cancel_edit(&mut self) -> ActionOutcome {
        if self.editing.take().is_some() {
            ActionOutcome::Applied
        } else {
            ActionOutcome::Ignored
        }
    }

    /// Flip a row that is not being edited.
    pub fn toggle(&mut self, id: i64) -> ActionOutcome {
        if self.is_editing(id) || self.find(id).is_none() {
            return ActionOutcome::Ignored;
        }
        match self.api.toggle_todo(id) {
            Ok(todo) => {
                self.replace(todo);
                ActionOutcome::Applied
            }
            Err(e) => Self::failed("toggle todo", &e),
        }
    }

    /// Ask to delete a row that is not being edited.
    pub fn request_delete(&mut self, id: i64) -> ActionOutcome {
        if self.is_editing(id) || self.find(id).is_none() {
            return ActionOutcome::Ignored;
        }
        self.pending_delete = Some(id);
        ActionOutcome::Applied
    }

    /// Delete the row awaiting confirmation. The row leaves the list once the
    /// server answers, whatever its success flag says.
    pub fn confirm_delete(&mut self) -> ActionOutcome {
        let Some(id) = self.pending_delete else {
            return ActionOutcome::Ignored;
        };
        match self.api.delete_todo(id) {
            Ok(outcome) => {
                if !outcome.success {
                    tracing::debug!(id, "server had no such todo");
                }
                self.todos.retain(|t| t.id != id);
                self.pending_delete = None;
                if self.is_editing(id) {
                    self.editing = None;
                }
                ActionOutcome::Applied
            }
            Err(e) => Self::failed("delete todo", &e),
        }
    }

    /// Close the delete question without deleting.
    pub fn dismiss_delete(&mut self) -> ActionOutcome {
        if self.pending_delete.take().is_some() {
            ActionOutcome::Applied
        } else {
            ActionOutcome::Ignored
        }
    }
}
