//! Path utilities for determining data storage locations.
//!
//! Todo data lives in `~/.todo-rpc/` with project-specific subdirectories
//! named after the project plus a hash of its path.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// The base directory name for todo data under the home directory.
const DATA_DIR_NAME: &str = ".todo-rpc";

/// Project-local directory holding the config file (and the database when
/// no home directory is available).
pub const LOCAL_DIR_NAME: &str = ".todo";

/// The database filename.
pub const DATABASE_FILENAME: &str = "todos.sqlite3";

/// The server log filename.
pub const LOG_FILENAME: &str = "mcp.log";

/// Get the base data directory.
///
/// Returns `~/.todo-rpc/` or `None` if the home directory cannot be determined.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DATA_DIR_NAME))
}

/// Get the project-specific data directory.
///
/// Returns `~/.todo-rpc/projects/<name>-<hash>/`.
#[must_use]
pub fn project_data_dir(project_dir: &Path) -> Option<PathBuf> {
    let base = data_dir()?;
    Some(base.join("projects").join(create_project_dir_name(project_dir)))
}

/// Get the database path for a project.
#[must_use]
pub fn project_db_path(project_dir: &Path) -> Option<PathBuf> {
    project_data_dir(project_dir).map(|dir| dir.join(DATABASE_FILENAME))
}

/// Get the database path for a project, falling back to the project-local
/// directory when there is no home directory.
#[must_use]
pub fn default_db_path(project_dir: &Path) -> PathBuf {
    project_db_path(project_dir)
        .unwrap_or_else(|| project_dir.join(LOCAL_DIR_NAME).join(DATABASE_FILENAME))
}

/// Get the log file path for a project, falling back to the project-local
/// directory when there is no home directory.
#[must_use]
pub fn project_log_path(project_dir: &Path) -> PathBuf {
    project_data_dir(project_dir)
        .unwrap_or_else(|| project_dir.join(LOCAL_DIR_NAME))
        .join(LOG_FILENAME)
}

/// Create a directory name for a project.
///
/// Format: `<project-name>-<hash>` e.g., `groceries-00a1b2c3d4e5f607`
fn create_project_dir_name(project_dir: &Path) -> String {
    let path_to_hash = project_dir.canonicalize().unwrap_or_else(|_| project_dir.to_path_buf());

    let prefix = path_to_hash.file_name().and_then(|n| n.to_str()).unwrap_or("project");
    let prefix: String =
        prefix.chars().map(|c| if c.is_alphanumeric() { c } else { '-' }).collect();
    let prefix = prefix.trim_matches('-');

    let hash = hash_path(&path_to_hash);

    format!("{prefix}-{hash:016x}")
}

/// Compute a stable hash of a path.
fn hash_path(path: &Path) -> u64 {
    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);
    hasher.finish()
}
