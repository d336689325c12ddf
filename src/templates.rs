//! Template loading and rendering using Tera.
//!
//! Screens are rendered from templates under `templates/`, with embedded
//! copies as fallback when the directory doesn't exist.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock};
use tera::{Context, Tera};

/// Default templates directory relative to crate root.
const TEMPLATES_DIR: &str = "templates";

/// Template for the client view.
pub const TODO_LIST: &str = "view/todo_list.tera";

/// Template for the interactive shell's help text.
pub const SHELL_HELP: &str = "view/shell_help.tera";

/// Embedded default templates for fallback when files don't exist.
static EMBEDDED_TEMPLATES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(TODO_LIST, include_str!("../templates/view/todo_list.tera"));
    m.insert(SHELL_HELP, include_str!("../templates/view/shell_help.tera"));
    m
});

/// Global template engine with caching.
static TERA: Lazy<RwLock<Option<Tera>>> = Lazy::new(|| RwLock::new(None));

fn poisoned<T>(e: PoisonError<T>) -> Error {
    Error::Template(format!("template engine lock poisoned: {e}"))
}

/// Initialize the template engine with templates from the specified directory.
///
/// If the directory doesn't exist, templates are loaded from embedded
/// defaults. Templates on disk take precedence over embedded ones.
///
/// # Errors
///
/// Returns an error if the templates directory exists but contains invalid
/// templates.
pub fn init_templates(templates_dir: Option<&Path>) -> Result<()> {
    let dir = templates_dir.map_or_else(
        || std::env::current_dir().unwrap_or_default().join(TEMPLATES_DIR),
        Path::to_path_buf,
    );

    let mut tera = Tera::default();

    if dir.exists() {
        let glob_pattern = format!("{}/**/*.tera", dir.display());
        tera = Tera::new(&glob_pattern).map_err(|e| {
            Error::Template(format!("Failed to load templates from {}: {e}", dir.display()))
        })?;
    }

    for (name, content) in EMBEDDED_TEMPLATES.iter() {
        if tera.get_template(name).is_err() {
            tera.add_raw_template(name, content)
                .map_err(|e| Error::Template(format!("Embedded template {name}: {e}")))?;
        }
    }

    *TERA.write().map_err(poisoned)? = Some(tera);

    Ok(())
}

/// Render a template with the given context.
///
/// Templates are lazy-loaded on first use.
///
/// # Errors
///
/// Returns an error if the template doesn't exist or rendering fails.
pub fn render(name: &str, context: &Context) -> Result<String> {
    let needs_init = TERA.read().map_err(poisoned)?.is_none();

    if needs_init {
        init_templates(None)?;
    }

    let guard = TERA.read().map_err(poisoned)?;
    let tera = guard.as_ref().ok_or_else(|| Error::Template("Templates not initialized".into()))?;
    let rendered = tera
        .render(name, context)
        .map_err(|e| Error::Template(format!("Failed to render template {name}: {e}")))?;
    drop(guard);

    Ok(rendered)
}

/// Reset the template cache, forcing re-initialization on next use.
///
/// # Errors
///
/// Returns an error if the write lock cannot be acquired.
pub fn reset_cache() -> Result<()> {
    *TERA.write().map_err(poisoned)? = None;
    Ok(())
}
