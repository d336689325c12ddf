//! # `todo_rpc`
//!
//! A todo list served through a small typed remote-procedure layer over
//! SQLite, with a terminal client view.
//!
//! Layers, leaves first: [`todos`] stores records, [`schema`] validates
//! input, [`handlers`] implements the five operations, [`gateway`] and
//! [`mcp`] expose them by name, and [`view`] is the client.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod logging;
pub mod mcp;
pub mod paths;
pub mod schema;
pub mod templates;
pub mod todos;
pub mod view;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
