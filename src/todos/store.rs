//! Todo store trait and `SQLite` implementation.

use crate::error::Result;
use crate::paths;
use crate::todos::models::{
    format_timestamp, next_timestamp, now, parse_timestamp, Todo, TodoUpdate,
};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::path::{Path, PathBuf};

/// Columns selected for every todo query, in `parse_todo` order.
const TODO_COLUMNS: &str = "id, title, description, completed, created_at, updated_at";

/// Trait for todo storage operations.
///
/// Update and toggle return `Ok(None)` when no row matches; turning that into
/// a not-found error is the caller's decision.
#[allow(clippy::missing_errors_doc)]
pub trait TodoStore {
    /// Insert a new, incomplete todo.
    fn create_todo(&self, title: &str, description: Option<&str>) -> Result<Todo>;

    /// Get a todo by ID.
    fn get_todo(&self, id: i64) -> Result<Option<Todo>>;

    /// All todos in insertion order.
    fn list_todos(&self) -> Result<Vec<Todo>>;

    /// Apply a partial update and refresh `updated_at`.
    fn update_todo(&self, id: i64, update: TodoUpdate) -> Result<Option<Todo>>;

    /// Flip `completed` and refresh `updated_at`.
    fn toggle_todo(&self, id: i64) -> Result<Option<Todo>>;

    /// Delete a todo by ID, returning whether a row was removed.
    fn delete_todo(&self, id: i64) -> Result<bool>;
}

/// SQLite-based todo store.
#[derive(Debug, Clone)]
pub struct SqliteTodoStore {
    db_path: PathBuf,
}

impl SqliteTodoStore {
    /// Create a new `SQLite` todo store at the given database path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let store = Self { db_path: db_path.as_ref().to_path_buf() };
        store.init_schema()?;
        Ok(store)
    }

    /// Create a store at the default location for a project directory.
    ///
    /// The database lives at `~/.todo-rpc/projects/<name>-<hash>/todos.sqlite3`,
    /// falling back to `<project>/.todo/todos.sqlite3` without a home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn for_project(project_dir: &Path) -> Result<Self> {
        Self::new(paths::default_db_path(project_dir))
    }

    /// Get the database path.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a connection to the database.
    fn open(&self) -> Result<Connection> {
        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&self.db_path)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        Ok(conn)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<()> {
        let conn = self.open()?;

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL CHECK (length(title) > 0),
                description TEXT,
                completed INTEGER NOT NULL DEFAULT 0 CHECK (completed IN (0, 1)),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;

        Ok(())
    }

    /// Parse a todo from a row selected with [`TODO_COLUMNS`].
    fn parse_todo(row: &rusqlite::Row) -> rusqlite::Result<Todo> {
        Ok(Todo {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            completed: row.get(3)?,
            created_at: Self::timestamp_column(row, 4)?,
            updated_at: Self::timestamp_column(row, 5)?,
        })
    }

    fn timestamp_column(
        row: &rusqlite::Row,
        idx: usize,
    ) -> rusqlite::Result<chrono::DateTime<chrono::Utc>> {
        let raw: String = row.get(idx)?;
        parse_timestamp(&raw)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    }

    fn fetch(conn: &Connection, id: i64) -> Result<Option<Todo>> {
        let todo = conn
            .query_row(
                &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1"),
                params![id],
                Self::parse_todo,
            )
            .optional()?;
        Ok(todo)
    }

    /// Write every mutable column of `todo` back to its row.
    fn write_back(conn: &Connection, todo: &Todo) -> Result<()> {
        conn.execute(
            "UPDATE todos SET title = ?1, description = ?2, completed = ?3, updated_at = ?4
             WHERE id = ?5",
            params![
                &todo.title,
                &todo.description,
                todo.completed,
                format_timestamp(todo.updated_at),
                todo.id
            ],
        )?;
        Ok(())
    }

    /// Run a read-modify-write on one row inside an immediate transaction.
    fn modify(&self, id: i64, change: impl FnOnce(Todo) -> Todo) -> Result<Option<Todo>> {
        let mut conn = self.open()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(current) = Self::fetch(&tx, id)? else {
            return Ok(None);
        };

        let previous_update = current.updated_at;
        let mut changed = change(current);
        changed.updated_at = next_timestamp(previous_update);
        Self::write_back(&tx, &changed)?;

        let stored = Self::fetch(&tx, id)?;
        tx.commit()?;
        Ok(stored)
    }
}

impl TodoStore for SqliteTodoStore {
    fn create_todo(&self, title: &str, description: Option<&str>) -> Result<Todo> {
        let conn = self.open()?;
        let created = format_timestamp(now());

        conn.execute(
            "INSERT INTO todos (title, description, completed, created_at, updated_at)
             VALUES (?1, ?2, 0, ?3, ?3)",
            params![title, description, &created],
        )?;
        let id = conn.last_insert_rowid();

        let todo = conn.query_row(
            &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1"),
            params![id],
            Self::parse_todo,
        )?;

        Ok(todo)
    }

    fn get_todo(&self, id: i64) -> Result<Option<Todo>> {
        let conn = self.open()?;
        Self::fetch(&conn, id)
    }

    fn list_todos(&self) -> Result<Vec<Todo>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(&format!("SELECT {TODO_COLUMNS} FROM todos ORDER BY id ASC"))?;
        let todos = stmt.query_map([], Self::parse_todo)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(todos)
    }

    fn update_todo(&self, id: i64, update: TodoUpdate) -> Result<Option<Todo>> {
        self.modify(id, |todo| Todo {
            title: update.title.apply(todo.title),
            description: update.description.apply(todo.description),
            completed: update.completed.apply(todo.completed),
            ..todo
        })
    }

    fn toggle_todo(&self, id: i64) -> Result<Option<Todo>> {
        self.modify(id, |todo| Todo { completed: !todo.completed, ..todo })
    }

    fn delete_todo(&self, id: i64) -> Result<bool> {
        let conn = self.open()?;
        let rows = conn.execute("DELETE FROM todos WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todos::models::FieldUpdate;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, SqliteTodoStore) {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("test.db");
        let store = SqliteTodoStore::new(&db_path).unwrap();
        (dir, store)
    }

    #[test]
    fn test_create_and_get_todo() {
        let (_dir, store) = create_test_store();

        let todo = store.create_todo("Test Todo", Some("A description")).unwrap();
        assert!(todo.id > 0);
        assert_eq!(todo.title, "Test Todo");
        assert_eq!(todo.description.as_deref(), Some("A description"));
        assert!(!todo.completed);
        assert_eq!(todo.created_at, todo.updated_at);

        let fetched = store.get_todo(todo.id).unwrap().unwrap();
        assert_eq!(fetched, todo);
    }

    #[test]
    fn test_create_without_description() {
        let (_dir, store) = create_test_store();
        let todo = store.create_todo("Bare", None).unwrap();
        assert!(todo.description.is_none());
    }

    #[test]
    fn test_ids_are_not_reused() {
        let (_dir, store) = create_test_store();
        let first = store.create_todo("First", None).unwrap();
        assert!(store.delete_todo(first.id).unwrap());
        let second = store.create_todo("Second", None).unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn test_empty_title_rejected_by_table() {
        let (_dir, store) = create_test_store();
        assert!(store.create_todo("", None).is_err());
    }

    #[test]
    fn test_get_nonexistent_todo() {
        let (_dir, store) = create_test_store();
        assert!(store.get_todo(999).unwrap().is_none());
    }

    #[test]
    fn test_list_in_insertion_order() {
        let (_dir, store) = create_test_store();
        store.create_todo("One", None).unwrap();
        store.create_todo("Two", None).unwrap();
        store.create_todo("Three", None).unwrap();

        let titles: Vec<String> = store.list_todos().unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn test_list_empty() {
        let (_dir, store) = create_test_store();
        assert!(store.list_todos().unwrap().is_empty());
    }

    #[test]
    fn test_update_all_fields() {
        let (_dir, store) = create_test_store();
        let todo = store.create_todo("Original Todo", Some("Original description")).unwrap();

        let updated = store
            .update_todo(
                todo.id,
                TodoUpdate {
                    title: FieldUpdate::Set("Updated Todo".to_string()),
                    description: FieldUpdate::Set(Some("Updated description".to_string())),
                    completed: FieldUpdate::Set(true),
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, todo.id);
        assert_eq!(updated.title, "Updated Todo");
        assert_eq!(updated.description.as_deref(), Some("Updated description"));
        assert!(updated.completed);
        assert_eq!(updated.created_at, todo.created_at);
        assert!(updated.updated_at > todo.updated_at);
    }

    #[test]
    fn test_update_only_title_keeps_other_fields() {
        let (_dir, store) = create_test_store();
        let todo = store.create_todo("Original Todo", Some("Original description")).unwrap();

        let updated = store
            .update_todo(
                todo.id,
                TodoUpdate {
                    title: FieldUpdate::Set("Only Title Updated".to_string()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Only Title Updated");
        assert_eq!(updated.description.as_deref(), Some("Original description"));
        assert!(!updated.completed);
        assert_eq!(updated.created_at, todo.created_at);
    }

    #[test]
    fn test_update_clears_description_with_explicit_null() {
        let (_dir, store) = create_test_store();
        let todo = store.create_todo("Original Todo", Some("Original description")).unwrap();

        let updated = store
            .update_todo(
                todo.id,
                TodoUpdate { description: FieldUpdate::Set(None), ..Default::default() },
            )
            .unwrap()
            .unwrap();

        assert!(updated.description.is_none());
        assert_eq!(updated.title, "Original Todo");
    }

    #[test]
    fn test_empty_update_still_refreshes_timestamp() {
        let (_dir, store) = create_test_store();
        let todo = store.create_todo("Test", None).unwrap();

        let updated = store.update_todo(todo.id, TodoUpdate::default()).unwrap().unwrap();
        assert_eq!(updated.title, "Test");
        assert!(updated.updated_at > todo.updated_at);
    }

    #[test]
    fn test_update_nonexistent_todo() {
        let (_dir, store) = create_test_store();
        let result = store
            .update_todo(
                999,
                TodoUpdate { title: FieldUpdate::Set("Test".to_string()), ..Default::default() },
            )
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_update_persists() {
        let (_dir, store) = create_test_store();
        let todo = store.create_todo("Original", Some("Keep me")).unwrap();

        store
            .update_todo(
                todo.id,
                TodoUpdate {
                    title: FieldUpdate::Set("Database Updated Todo".to_string()),
                    completed: FieldUpdate::Set(true),
                    ..Default::default()
                },
            )
            .unwrap();

        let fetched = store.get_todo(todo.id).unwrap().unwrap();
        assert_eq!(fetched.title, "Database Updated Todo");
        assert!(fetched.completed);
        assert_eq!(fetched.description.as_deref(), Some("Keep me"));
    }

    #[test]
    fn test_toggle_flips_and_advances() {
        let (_dir, store) = create_test_store();
        let todo = store.create_todo("Toggle me", Some("A todo for testing")).unwrap();

        let once = store.toggle_todo(todo.id).unwrap().unwrap();
        assert!(once.completed);
        assert_eq!(once.title, "Toggle me");
        assert_eq!(once.description.as_deref(), Some("A todo for testing"));
        assert!(once.updated_at > todo.updated_at);

        let twice = store.toggle_todo(todo.id).unwrap().unwrap();
        assert!(!twice.completed);
        assert!(twice.updated_at > once.updated_at);
        assert_eq!(twice.created_at, todo.created_at);
    }

    #[test]
    fn test_toggle_nonexistent_todo() {
        let (_dir, store) = create_test_store();
        assert!(store.toggle_todo(999).unwrap().is_none());
    }

    #[test]
    fn test_delete_todo() {
        let (_dir, store) = create_test_store();

        let todo = store.create_todo("To Delete", None).unwrap();
        assert!(store.delete_todo(todo.id).unwrap());
        assert!(store.get_todo(todo.id).unwrap().is_none());

        // Delete again returns false
        assert!(!store.delete_todo(todo.id).unwrap());
    }

    #[test]
    fn test_delete_leaves_other_todos_untouched() {
        let (_dir, store) = create_test_store();
        let first = store.create_todo("Todo 1", Some("First todo")).unwrap();
        let second = store.create_todo("Todo 2", Some("Second todo")).unwrap();
        let second = store.toggle_todo(second.id).unwrap().unwrap();

        assert!(store.delete_todo(first.id).unwrap());

        let remaining = store.list_todos().unwrap();
        assert_eq!(remaining, vec![second]);
    }

    #[test]
    fn test_reopen_keeps_data() {
        let (dir, store) = create_test_store();
        let todo = store.create_todo("Persistent", None).unwrap();

        let reopened = SqliteTodoStore::new(dir.path().join("test.db")).unwrap();
        assert_eq!(reopened.get_todo(todo.id).unwrap(), Some(todo));
    }
}
