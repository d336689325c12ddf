//! Text rendering of the client view.

use super::api::TodoApi;
use super::app::{EditSession, NewTodoForm, TodoApp};
use crate::error::{Error, Result};
use crate::templates;
use crate::todos::Todo;
use serde::Serialize;
use tera::Context;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Serialize)]
struct RowView<'a> {
    id: i64,
    title: &'a str,
    description: Option<&'a str>,
    /// Creation date for open rows, completion date for done rows.
    date: String,
    draft: Option<&'a EditSession>,
}

impl<'a> RowView<'a> {
    fn new(todo: &'a Todo, editing: Option<&'a EditSession>) -> Self {
        let shown = if todo.completed { todo.updated_at } else { todo.created_at };
        Self {
            id: todo.id,
            title: &todo.title,
            description: todo.description.as_deref(),
            date: shown.format(DATE_FORMAT).to_string(),
            draft: editing.filter(|e| e.id == todo.id),
        }
    }
}

fn rows<'a>(todos: Vec<&'a Todo>, editing: Option<&'a EditSession>) -> Vec<RowView<'a>> {
    todos.into_iter().map(|t| RowView::new(t, editing)).collect()
}

#[derive(Serialize)]
struct Screen<'a> {
    new_todo: &'a NewTodoForm,
    pending_delete: Option<RowView<'a>>,
    incomplete: Vec<RowView<'a>>,
    completed: Vec<RowView<'a>>,
    total: usize,
}

impl<A: TodoApi> TodoApp<A> {
    /// Render the whole screen.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Template`] if the template fails to render.
    pub fn render(&self) -> Result<String> {
        let editing = self.editing();
        let screen = Screen {
            new_todo: self.new_todo(),
            pending_delete: self.pending_delete().map(|t| RowView::new(t, None)),
            incomplete: rows(self.incomplete(), editing),
            completed: rows(self.completed(), editing),
            total: self.todos().len(),
        };
        let context = Context::from_serialize(&screen).map_err(|e| Error::Template(e.to_string()))?;
        templates::render(templates::TODO_LIST, &context)
    }
}
