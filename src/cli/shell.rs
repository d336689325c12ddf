//! Line-driven loop over the client view.

use crate::error::Result;
use crate::templates;
use crate::view::{ActionOutcome, TodoApi, TodoApp};
use std::io::{BufRead, Write};
use tera::Context;

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Reload the list.
    List,
    /// Set the create form title.
    Title(String),
    /// Set the create form description.
    Describe(String),
    /// Submit the create form.
    Add,
    /// Start editing a todo.
    Edit(i64),
    /// Change the draft title.
    EditTitle(String),
    /// Change the draft description.
    EditDescription(String),
    /// Save the draft.
    Save,
    /// Discard the draft.
    Cancel,
    /// Flip a todo.
    Toggle(i64),
    /// Ask to delete a todo.
    Delete(i64),
    /// Confirm the pending delete.
    Yes,
    /// Dismiss the pending delete.
    No,
    /// Show help.
    Help,
    /// Leave the shell.
    Quit,
}

fn parse_id(arg: &str) -> std::result::Result<i64, String> {
    arg.parse().map_err(|_| format!("expected a todo ID, got {arg:?}"))
}

/// Parse a shell line. Blank lines parse to `None`.
///
/// # Errors
///
/// Returns a message for unknown commands or bad IDs.
pub fn parse_line(line: &str) -> std::result::Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, arg) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let arg = arg.trim();

    let command = match verb {
        "list" | "ls" => ShellCommand::List,
        "title" => ShellCommand::Title(arg.to_string()),
        "describe" => ShellCommand::Describe(arg.to_string()),
        "add" => ShellCommand::Add,
        "edit" => ShellCommand::Edit(parse_id(arg)?),
        "edit-title" => ShellCommand::EditTitle(arg.to_string()),
        "edit-description" => ShellCommand::EditDescription(arg.to_string()),
        "save" => ShellCommand::Save,
        "cancel" => ShellCommand::Cancel,
        "toggle" => ShellCommand::Toggle(parse_id(arg)?),
        "delete" | "rm" => ShellCommand::Delete(parse_id(arg)?),
        "yes" | "y" => ShellCommand::Yes,
        "no" | "n" => ShellCommand::No,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command {other:?} (try help)")),
    };
    Ok(Some(command))
}

fn apply<A: TodoApi>(app: &mut TodoApp<A>, command: ShellCommand) -> ActionOutcome {
    match command {
        ShellCommand::List => app.load(),
        ShellCommand::Title(title) => {
            app.set_new_title(title);
            ActionOutcome::Applied
        }
        ShellCommand::Describe(description) => {
            app.set_new_description(description);
            ActionOutcome::Applied
        }
        ShellCommand::Add => app.submit_new(),
        ShellCommand::Edit(id) => app.start_edit(id),
        ShellCommand::EditTitle(title) => app.set_draft_title(title),
        ShellCommand::EditDescription(description) => app.set_draft_description(description),
        ShellCommand::Save => app.save_edit(),
        ShellCommand::Cancel => app.cancel_edit(),
        ShellCommand::Toggle(id) => app.toggle(id),
        ShellCommand::Delete(id) => app.request_delete(id),
        ShellCommand::Yes => app.confirm_delete(),
        ShellCommand::No => app.dismiss_delete(),
        ShellCommand::Help | ShellCommand::Quit => ActionOutcome::Ignored,
    }
}

/// Run the shell until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if reading input, writing output or rendering fails.
pub fn run_shell<A: TodoApi, R: BufRead, W: Write>(
    app: &mut TodoApp<A>,
    input: R,
    output: &mut W,
) -> Result<()> {
    if let ActionOutcome::Failed(message) = app.load() {
        writeln!(output, "Error: {message}")?;
    }
    write!(output, "{}", app.render()?)?;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        match parse_line(&line?) {
            Ok(None) => {}
            Ok(Some(ShellCommand::Quit)) => break,
            Ok(Some(ShellCommand::Help)) => {
                write!(output, "{}", templates::render(templates::SHELL_HELP, &Context::new())?)?;
            }
            Ok(Some(command)) => match apply(app, command) {
                ActionOutcome::Applied => write!(output, "{}", app.render()?)?,
                ActionOutcome::Ignored => writeln!(output, "Nothing to do.")?,
                ActionOutcome::Failed(message) => writeln!(output, "Error: {message}")?,
            },
            Err(message) => writeln!(output, "{message}")?,
        }
        write!(output, "> ")?;
        output.flush()?;
    }

    writeln!(output)?;
    Ok(())
}
