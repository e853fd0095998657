//! Moor Project Store
//!
//! Persists the project list and per-project todos in SQLite. The UI core
//! only sees the [`ProjectStore`] trait and treats every result as a
//! read-only snapshot, refreshed after any mutation.

pub mod error;

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};

pub use error::StoreError;

/// A discovered project: a directory containing a git repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub path: PathBuf,
}

/// One todo entry attached to a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub project_id: i64,
    pub text: String,
}

/// The narrow interface the UI consumes. All operations are synchronous;
/// failures are fatal to the caller (the terminal guard still restores the
/// terminal before they are reported).
pub trait ProjectStore {
    fn list_projects(&self) -> Result<Vec<Project>, StoreError>;
    fn upsert_project(&mut self, name: &str, path: &Path) -> Result<(), StoreError>;
    fn lookup_project_id(&self, path: &Path) -> Result<i64, StoreError>;
    fn list_todos(&self, project_id: i64) -> Result<Vec<Todo>, StoreError>;
    fn add_todo(&mut self, project_id: i64, text: &str) -> Result<(), StoreError>;
    fn delete_todo(&mut self, todo_id: i64) -> Result<(), StoreError>;
}

/// SQLite-backed implementation
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and apply the schema.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        apply_schema(&conn)?;
        log::debug!("opened project store at {}", path.display());
        Ok(SqliteStore { conn })
    }

    /// An in-memory store, for tests
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::Open {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        apply_schema(&conn)?;
        Ok(SqliteStore { conn })
    }
}

fn apply_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS projects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            path TEXT UNIQUE
        );
        CREATE TABLE IF NOT EXISTS todos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            project_id INTEGER NOT NULL,
            task TEXT NOT NULL,
            FOREIGN KEY (project_id) REFERENCES projects (id)
        );",
    )?;
    Ok(())
}

impl ProjectStore for SqliteStore {
    fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, name, path FROM projects ORDER BY name, id")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Project {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    path: PathBuf::from(row.get::<_, String>(2)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn upsert_project(&mut self, name: &str, path: &Path) -> Result<(), StoreError> {
        self.conn
            .prepare_cached("INSERT OR IGNORE INTO projects (name, path) VALUES (?1, ?2)")?
            .execute(params![name, path.to_string_lossy()])?;
        Ok(())
    }

    fn lookup_project_id(&self, path: &Path) -> Result<i64, StoreError> {
        let id = self
            .conn
            .prepare_cached("SELECT id FROM projects WHERE path = ?1")?
            .query_row(params![path.to_string_lossy()], |row| row.get(0))
            .optional()?;
        id.ok_or_else(|| StoreError::ProjectNotFound(path.to_path_buf()))
    }

    fn list_todos(&self, project_id: i64) -> Result<Vec<Todo>, StoreError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, project_id, task FROM todos WHERE project_id = ?1 ORDER BY id")?;
        let rows = stmt
            .query_map(params![project_id], |row| {
                Ok(Todo {
                    id: row.get(0)?,
                    project_id: row.get(1)?,
                    text: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn add_todo(&mut self, project_id: i64, text: &str) -> Result<(), StoreError> {
        self.conn
            .prepare_cached("INSERT INTO todos (project_id, task) VALUES (?1, ?2)")?
            .execute(params![project_id, text])?;
        Ok(())
    }

    fn delete_todo(&mut self, todo_id: i64) -> Result<(), StoreError> {
        self.conn
            .prepare_cached("DELETE FROM todos WHERE id = ?1")?
            .execute(params![todo_id])?;
        Ok(())
    }
}
