//! The store handle: one SQLite connection, open from construction until close.

use log::{debug, info, warn};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, params_from_iter};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// One result row. `None` is SQL `NULL`.
pub type Row = Vec<Option<String>>;

/// Operations the ingestion pipeline and lookups need from a relational store.
pub trait Storage {
    /// Run a statement that takes no parameters and returns no rows.
    fn execute(&mut self, sql: &str) -> Result<()>;

    /// Run `sql` once per row inside a single transaction, committing only
    /// when every row succeeds. Returns the number of rows inserted.
    fn insert_batch(&mut self, sql: &str, rows: &[Vec<String>]) -> Result<usize>;

    /// Column names of `table`, in declaration order.
    fn columns(&mut self, table: &str) -> Result<Vec<String>>;

    /// Run `sql` with `value` bound to its single placeholder.
    fn query(&mut self, sql: &str, value: &str) -> Result<Vec<Row>>;

    /// Release the connection. Every later call fails with [`Error::Closed`].
    fn close(&mut self) -> Result<()>;

    fn is_open(&self) -> bool;

    /// Where the data lives, e.g. the database file path.
    fn location(&self) -> String;
}

/// SQLite-backed [`Storage`].
#[derive(Debug)]
pub struct SqliteStore {
    conn: Option<Connection>,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open (creating if needed) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        info!("Opened database {}", path.display());
        Ok(Self {
            conn: Some(conn),
            path: Some(path.to_path_buf()),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        debug!("Opened in-memory database");
        Ok(Self {
            conn: Some(conn),
            path: None,
        })
    }

    /// Database file path, `None` for an in-memory store.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn conn(&mut self) -> Result<&mut Connection> {
        self.conn.as_mut().ok_or(Error::Closed)
    }
}

fn value_to_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(t) | ValueRef::Blob(t) => Some(String::from_utf8_lossy(t).into_owned()),
    }
}

impl Storage for SqliteStore {
    fn execute(&mut self, sql: &str) -> Result<()> {
        debug!("execute: {}", sql);
        self.conn()?.execute_batch(sql)?;
        Ok(())
    }

    fn insert_batch(&mut self, sql: &str, rows: &[Vec<String>]) -> Result<usize> {
        debug!("insert_batch: {} ({} rows)", sql, rows.len());
        let tx = self.conn()?.transaction()?;
        {
            let mut stmt = tx.prepare(sql)?;
            let expected = stmt.parameter_count();
            for (index, row) in rows.iter().enumerate() {
                if row.len() != expected {
                    // tx rolls back on drop
                    return Err(Error::SchemaMismatch {
                        row: index + 1,
                        expected,
                        found: row.len(),
                    });
                }
                stmt.execute(params_from_iter(row.iter()))?;
            }
        }
        tx.commit()?;
        Ok(rows.len())
    }

    fn columns(&mut self, table: &str) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
        let names = stmt
            .query_map([table], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(names)
    }

    fn query(&mut self, sql: &str, value: &str) -> Result<Vec<Row>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let width = stmt.column_count();
        let rows = stmt
            .query_map([value], |row| {
                (0..width)
                    .map(|i| row.get_ref(i).map(value_to_text))
                    .collect::<rusqlite::Result<Row>>()
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().map_err(|(_, e)| Error::Storage(e))?;
            info!("Closed database");
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    fn location(&self) -> String {
        self.path
            .as_ref()
            .map_or_else(|| ":memory:".to_string(), |p| p.display().to_string())
    }
}

impl Drop for SqliteStore {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("Failed to close database: {}", e);
        }
    }
}
