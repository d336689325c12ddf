//! CLI binary for the todo list.
//!
//! This binary is a thin wrapper that parses arguments and delegates to the
//! library.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use todo_rpc::cli::{load_config, run, Cli};
use todo_rpc::config::TodoConfig;
use todo_rpc::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match load_config(cli.config.as_deref()) {
        Ok(config) => config.log_level,
        Err(e) => {
            eprintln!("Warning: Could not load config: {e}");
            TodoConfig::default().log_level
        }
    };
    if let Err(e) = logging::init_stderr(&level) {
        eprintln!("Warning: logging init failed: {e}");
    }

    let output = run(cli, io::stdin().lock(), &mut io::stdout().lock());

    for line in output.stdout {
        println!("{line}");
    }
    for line in output.stderr {
        eprintln!("{line}");
    }

    output.exit_code
}
