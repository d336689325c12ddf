//! Task records and their storage.
//!
//! A single `todos` table holds every record. The store hands out whole
//! records and leaves not-found policy to its callers.
//!
//! # Example
//!
//! ```no_run
//! use todo_rpc::todos::{SqliteTodoStore, TodoStore};
//!
//! let store = SqliteTodoStore::new("/tmp/todos.db").unwrap();
//! let todo = store.create_todo("Buy milk", None).unwrap();
//! let done = store.toggle_todo(todo.id).unwrap();
//! ```

pub mod models;
pub mod store;

pub use models::{DeleteOutcome, FieldUpdate, Todo, TodoUpdate};
pub use store::{SqliteTodoStore, TodoStore};
