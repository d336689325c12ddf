//! Command execution for the CLI.
//!
//! This module handles running CLI commands and producing output.

use super::shell::run_shell;
use super::{Cli, Command};
use crate::config::TodoConfig;
use crate::error::Result;
use crate::gateway::{Gateway, Procedure};
use crate::schema::{CreateTodoInput, DeleteTodoInput, ToggleTodoInput, UpdateTodoInput};
use crate::todos::{FieldUpdate, SqliteTodoStore};
use crate::view::{RpcClient, TodoApp};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

/// Output from running the CLI, with separate stdout and stderr messages.
#[derive(Debug)]
pub struct CliOutput {
    /// Exit code for the process.
    pub exit_code: ExitCode,
    /// Messages to print to stdout.
    pub stdout: Vec<String>,
    /// Messages to print to stderr.
    pub stderr: Vec<String>,
}

/// Load the configuration named on the command line, or the project's.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed.
pub fn load_config(config_path: Option<&Path>) -> Result<TodoConfig> {
    match config_path {
        Some(path) => TodoConfig::load_file(path),
        None => TodoConfig::load_from(&std::env::current_dir()?),
    }
}

/// Run a CLI command.
///
/// `input` and `output` are only used by `shell`; every other command
/// reports through the returned [`CliOutput`].
pub fn run<R: BufRead, W: Write>(cli: Cli, input: R, output: &mut W) -> CliOutput {
    match &cli.command {
        Command::Version => return run_version(),
        Command::Schema { procedure } => return run_schema(procedure.as_deref()),
        _ => {}
    }

    let gateway = match open_gateway(&cli) {
        Ok(g) => g,
        Err(e) => return error_output(e.to_string()),
    };
    run_with_gateway(cli.command, gateway, input, output)
}

fn run_with_gateway<R: BufRead, W: Write>(
    command: Command,
    gateway: Gateway<SqliteTodoStore>,
    input: R,
    output: &mut W,
) -> CliOutput {
    match command {
        Command::List => respond(gateway.get_todos()),
        Command::Create { title, description } => {
            respond(gateway.create_todo(CreateTodoInput { title, description }))
        }
        Command::Update { id, title, description, clear_description, completed } => {
            let description = if clear_description {
                FieldUpdate::Set(None)
            } else {
                FieldUpdate::from(description.map(Some))
            };
            respond(gateway.update_todo(UpdateTodoInput {
                id,
                title: FieldUpdate::from(title),
                description,
                completed: FieldUpdate::from(completed),
            }))
        }
        Command::Toggle { id } => respond(gateway.toggle_todo(ToggleTodoInput { id })),
        Command::Delete { id } => respond(gateway.delete_todo(DeleteTodoInput { id })),
        Command::Call { procedure, payload } => run_call(&gateway, &procedure, payload.as_deref()),
        Command::Shell => {
            let mut app = TodoApp::new(RpcClient::new(gateway));
            match run_shell(&mut app, input, output) {
                Ok(()) => success_output(Vec::new()),
                Err(e) => error_output(e.to_string()),
            }
        }
        Command::Schema { .. } | Command::Version => {
            error_output("command does not use the database".to_string())
        }
    }
}

fn open_gateway(cli: &Cli) -> Result<Gateway<SqliteTodoStore>> {
    let db_path = match &cli.db {
        Some(path) => path.clone(),
        None => {
            let config = load_config(cli.config.as_deref())?;
            config.resolve_database_path(&std::env::current_dir()?)
        }
    };
    tracing::debug!(db = %db_path.display(), "opening store");
    Ok(Gateway::new(SqliteTodoStore::new(&db_path)?))
}

fn run_version() -> CliOutput {
    success_output(vec![format!("todo v{}", crate::VERSION)])
}

fn run_call(
    gateway: &Gateway<SqliteTodoStore>,
    procedure: &str,
    payload: Option<&str>,
) -> CliOutput {
    let payload = match payload.map(serde_json::from_str).transpose() {
        Ok(p) => p.unwrap_or(serde_json::Value::Null),
        Err(e) => return error_output(format!("Invalid JSON payload: {e}")),
    };
    respond(gateway.call(procedure, payload))
}

#[derive(Serialize)]
struct SchemaOutput {
    name: &'static str,
    description: &'static str,
    input: schemars::schema::RootSchema,
    output: schemars::schema::RootSchema,
}

fn run_schema(procedure: Option<&str>) -> CliOutput {
    let Some(name) = procedure else {
        let lines = Procedure::ALL
            .iter()
            .map(|p| format!("{:<12} {}", p.name(), p.description()))
            .collect();
        return success_output(lines);
    };

    match name.parse::<Procedure>() {
        Ok(p) => json_output(&SchemaOutput {
            name: p.name(),
            description: p.description(),
            input: p.input_schema(),
            output: p.output_schema(),
        }),
        Err(e) => error_output(e.to_string()),
    }
}

fn respond<T: Serialize>(result: Result<T>) -> CliOutput {
    match result {
        Ok(value) => json_output(&value),
        Err(e) => error_output(e.to_string()),
    }
}

fn json_output<T: Serialize>(value: &T) -> CliOutput {
    match serde_json::to_string_pretty(value) {
        Ok(json) => success_output(vec![json]),
        Err(e) => error_output(e.to_string()),
    }
}

fn success_output(stdout: Vec<String>) -> CliOutput {
    CliOutput { exit_code: ExitCode::SUCCESS, stdout, stderr: vec![] }
}

fn error_output(message: String) -> CliOutput {
    CliOutput { exit_code: ExitCode::from(1), stdout: vec![], stderr: vec![message] }
}
