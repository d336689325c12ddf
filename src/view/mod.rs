//! Terminal client view of the todo list.
//!
//! [`TodoApp`] holds the list, the create form, the single edit session and
//! the pending delete question. It reaches the server only through
//! [`TodoApi`]; [`RpcClient`] implements that over the gateway.

pub mod api;
pub mod app;
mod render;

pub use api::{RpcClient, TodoApi};
pub use app::{ActionOutcome, EditSession, NewTodoForm, TodoApp};
