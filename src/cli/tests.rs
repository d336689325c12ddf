//! Tests for the CLI module.

use super::*;
use clap::Parser;
use std::process::ExitCode;
use tempfile::TempDir;

/// Parse and run `args` against a database in `dir`, with `input` as shell
/// input. Returns the result and whatever the shell wrote.
fn run_in(dir: &TempDir, args: &[&str], input: &str) -> (CliOutput, String) {
    let db = dir.path().join("todos.sqlite3");
    let config = dir.path().join("config.yaml");
    let mut argv = vec!["todo", "--db", db.to_str().unwrap(), "--config", config.to_str().unwrap()];
    argv.extend_from_slice(args);

    let cli = Cli::try_parse_from(argv).unwrap();
    let mut written = Vec::new();
    let output = run(cli, input.as_bytes(), &mut written);
    (output, String::from_utf8(written).unwrap())
}

fn json_of(output: &CliOutput) -> serde_json::Value {
    assert_eq!(output.exit_code, ExitCode::SUCCESS, "stderr: {:?}", output.stderr);
    serde_json::from_str(&output.stdout[0]).unwrap()
}

#[test]
fn test_parse_update_flags() {
    let cli = Cli::try_parse_from([
        "todo",
        "update",
        "3",
        "--title",
        "New",
        "--completed",
        "false",
    ])
    .unwrap();
    assert_eq!(
        cli.command,
        Command::Update {
            id: 3,
            title: Some("New".into()),
            description: None,
            clear_description: false,
            completed: Some(false),
        }
    );
}

#[test]
fn test_parse_description_conflicts_with_clear() {
    let result = Cli::try_parse_from([
        "todo",
        "update",
        "3",
        "--description",
        "x",
        "--clear-description",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_global_options_after_subcommand() {
    let cli = Cli::try_parse_from(["todo", "list", "--db", "/tmp/x.db"]).unwrap();
    assert_eq!(cli.db.as_deref(), Some(std::path::Path::new("/tmp/x.db")));
    assert_eq!(cli.command, Command::List);
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    let (output, _) = run_in(&dir, &["version"], "");
    assert_eq!(output.exit_code, ExitCode::SUCCESS);
    assert!(output.stdout[0].starts_with("todo v"));
}

#[test]
fn test_create_list_toggle_delete() {
    let dir = TempDir::new().unwrap();

    let (output, _) = run_in(&dir, &["create", "--title", "Buy milk"], "");
    let created = json_of(&output);
    assert_eq!(created["description"], serde_json::Value::Null);
    let id = created["id"].as_i64().unwrap().to_string();

    let (output, _) = run_in(&dir, &["toggle", &id], "");
    assert_eq!(json_of(&output)["completed"], true);

    let (output, _) = run_in(&dir, &["list"], "");
    assert_eq!(json_of(&output).as_array().unwrap().len(), 1);

    let (output, _) = run_in(&dir, &["delete", &id], "");
    assert_eq!(json_of(&output), serde_json::json!({"success": true}));

    let (output, _) = run_in(&dir, &["delete", &id], "");
    assert_eq!(json_of(&output), serde_json::json!({"success": false}));
}

#[test]
fn test_update_and_clear_description() {
    let dir = TempDir::new().unwrap();
    let (output, _) = run_in(&dir, &["create", "-t", "Buy milk", "-d", "2%"], "");
    let id = json_of(&output)["id"].as_i64().unwrap().to_string();

    let (output, _) = run_in(&dir, &["update", &id, "--completed", "true"], "");
    let updated = json_of(&output);
    assert_eq!(updated["description"], "2%");
    assert_eq!(updated["completed"], true);

    let (output, _) = run_in(&dir, &["update", &id, "--clear-description"], "");
    assert_eq!(json_of(&output)["description"], serde_json::Value::Null);
}

#[test]
fn test_not_found_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let (output, _) = run_in(&dir, &["toggle", "999"], "");
    assert_eq!(output.exit_code, ExitCode::from(1));
    assert_eq!(output.stderr, vec!["Todo with id 999 not found".to_string()]);
}

#[test]
fn test_create_empty_title_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (output, _) = run_in(&dir, &["create", "--title", ""], "");
    assert_eq!(output.exit_code, ExitCode::from(1));
    assert!(output.stderr[0].starts_with("Validation error"));
}

#[test]
fn test_call_raw_procedure() {
    let dir = TempDir::new().unwrap();
    let (output, _) = run_in(&dir, &["call", "createTodo", r#"{"title": "Call mom"}"#], "");
    assert_eq!(json_of(&output)["title"], "Call mom");

    let (output, _) = run_in(&dir, &["call", "getTodos"], "");
    assert_eq!(json_of(&output)[0]["title"], "Call mom");

    let (output, _) = run_in(&dir, &["call", "nukeTodos"], "");
    assert_eq!(output.exit_code, ExitCode::from(1));

    let (output, _) = run_in(&dir, &["call", "createTodo", "{not json"], "");
    assert!(output.stderr[0].starts_with("Invalid JSON payload"));
}

#[test]
fn test_schema_listing_and_detail() {
    let dir = TempDir::new().unwrap();
    let (output, _) = run_in(&dir, &["schema"], "");
    assert_eq!(output.stdout.len(), 5);
    assert!(output.stdout[2].starts_with("updateTodo"));

    let (output, _) = run_in(&dir, &["schema", "deleteTodo"], "");
    let schema = json_of(&output);
    assert_eq!(schema["name"], "deleteTodo");
    assert_eq!(schema["input"]["required"], serde_json::json!(["id"]));

    let (output, _) = run_in(&dir, &["schema", "bogus"], "");
    assert_eq!(output.exit_code, ExitCode::from(1));
}

#[test]
fn test_parse_shell_lines() {
    assert_eq!(parse_line("  "), Ok(None));
    assert_eq!(parse_line("title Buy  milk"), Ok(Some(ShellCommand::Title("Buy  milk".into()))));
    assert_eq!(parse_line("toggle 4"), Ok(Some(ShellCommand::Toggle(4))));
    assert_eq!(parse_line("q"), Ok(Some(ShellCommand::Quit)));
    assert!(parse_line("toggle four").unwrap_err().contains("expected a todo ID"));
    assert!(parse_line("frobnicate").is_err());
}

#[test]
#[serial_test::serial]
fn test_shell_session() {
    let dir = TempDir::new().unwrap();
    let script = "title Buy milk\nadd\ntoggle 1\ndelete 1\nyes\nquit\n";
    let (output, written) = run_in(&dir, &["shell"], script);

    assert_eq!(output.exit_code, ExitCode::SUCCESS);
    assert!(written.contains("No tasks yet"));
    assert!(written.contains("Tasks (1)"));
    assert!(written.contains("Completed (1)"));
    assert!(written.contains(r#"Are you sure you want to delete "Buy milk"?"#));

    let (output, _) = run_in(&dir, &["list"], "");
    assert_eq!(json_of(&output), serde_json::json!([]));
}

#[test]
#[serial_test::serial]
fn test_shell_reports_ignored_and_bad_input() {
    let dir = TempDir::new().unwrap();
    let (_, written) = run_in(&dir, &["shell"], "add\nedit 7\nwhat\nhelp\n");

    assert_eq!(written.matches("Nothing to do.").count(), 2);
    assert!(written.contains("unknown command"));
    assert!(written.contains("toggle ID"));
}
