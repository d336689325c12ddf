//! Command-line interface for the todo list.
//!
//! Each procedure has a subcommand, `call` sends a raw JSON payload through
//! the gateway, and `shell` runs the interactive client view.

mod run;
mod shell;

#[cfg(test)]
mod tests;

pub use run::{load_config, run, CliOutput};
pub use shell::{parse_line, run_shell, ShellCommand};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Todo list CLI.
///
/// Reads and writes the project's todo database. Use `todo shell` for the
/// interactive list view.
#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Database file (defaults to the configured or per-project location)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file (defaults to .todo/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List all todos.
    List,

    /// Create a todo.
    Create {
        /// Title for the todo (required)
        #[arg(short, long)]
        title: String,

        /// Description with more details
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Update a todo. Fields not given are left unchanged.
    Update {
        /// Todo ID
        id: i64,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description
        #[arg(short, long, conflicts_with = "clear_description")]
        description: Option<String>,

        /// Remove the description
        #[arg(long)]
        clear_description: bool,

        /// New completed state (true or false)
        #[arg(long)]
        completed: Option<bool>,
    },

    /// Flip a todo between open and completed.
    Toggle {
        /// Todo ID
        id: i64,
    },

    /// Delete a todo.
    Delete {
        /// Todo ID
        id: i64,
    },

    /// Call a procedure by name with a JSON payload.
    ///
    /// Example: todo call updateTodo '{"id": 1, "description": null}'
    Call {
        /// Procedure name (getTodos, createTodo, updateTodo, toggleTodo, deleteTodo)
        procedure: String,

        /// JSON payload (defaults to null)
        payload: Option<String>,
    },

    /// Show procedure schemas.
    ///
    /// Without a name, lists the procedures.
    Schema {
        /// Procedure name
        procedure: Option<String>,
    },

    /// Interactive list view.
    Shell,

    /// Show version information.
    Version,
}
