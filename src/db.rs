//! High-level handle tying the store, ingestion and lookups together.

use log::info;
use std::fmt;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::ingest::{self, IngestReport};
use crate::naming::{Naming, TableIdentity};
use crate::query;
use crate::schema::{HeaderSchema, SchemaInferrer};
use crate::source::{FileRowSource, RowSource};
use crate::store::{Row, SqliteStore, Storage};

/// Owns one open store and the name of the log file currently in use.
///
/// The table for ingestion and lookups is re-resolved from the current log
/// file name on every call, so several logs can share one handle.
pub struct TranDb<S = SqliteStore, R = FileRowSource, I = HeaderSchema>
where
    S: Storage,
    R: RowSource,
    I: SchemaInferrer,
{
    store: S,
    source: R,
    inferrer: I,
    naming: Naming,
    log_file: String,
}

impl TranDb {
    /// Open `<stem>.db` for `log_file` (created if missing).
    pub fn open(log_file: impl Into<String>, config: &Config) -> Result<Self> {
        let log_file = log_file.into();
        let identity = config.naming.resolve(&log_file);
        let store = SqliteStore::open(&identity.db_file)?;
        Ok(Self::with_parts(
            store,
            FileRowSource,
            HeaderSchema,
            config.naming.clone(),
            log_file,
        ))
    }

    /// Same as [`TranDb::open`] but backed by an in-memory database.
    pub fn open_in_memory(log_file: impl Into<String>, config: &Config) -> Result<Self> {
        Ok(Self::with_parts(
            SqliteStore::open_in_memory()?,
            FileRowSource,
            HeaderSchema,
            config.naming.clone(),
            log_file.into(),
        ))
    }
}

impl<S, R, I> TranDb<S, R, I>
where
    S: Storage,
    R: RowSource,
    I: SchemaInferrer,
{
    pub fn with_parts(
        store: S,
        source: R,
        inferrer: I,
        naming: Naming,
        log_file: impl Into<String>,
    ) -> Self {
        Self {
            store,
            source,
            inferrer,
            naming,
            log_file: log_file.into(),
        }
    }

    pub fn log_file(&self) -> &str {
        &self.log_file
    }

    pub fn set_log_file(&mut self, log_file: impl Into<String>) {
        self.log_file = log_file.into();
    }

    /// Table of the current log file in the open store.
    ///
    /// The table name is checked against the identifier allow-list; the
    /// database file is the one the store was opened on.
    pub fn identity(&self) -> Result<TableIdentity> {
        Ok(TableIdentity {
            db_file: self.store.location(),
            table: self.naming.resolve_checked(&self.log_file)?.table,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the current log file into its table.
    pub fn ingest(&mut self) -> Result<IngestReport> {
        ingest::ingest(
            &mut self.store,
            &self.source,
            &self.inferrer,
            &self.naming,
            &self.log_file,
        )
    }

    /// Switch to `log_file` and ingest it.
    pub fn ingest_file(&mut self, log_file: impl Into<String>) -> Result<IngestReport> {
        self.set_log_file(log_file);
        self.ingest()
    }

    /// Return every row of the current table matching `expression`.
    ///
    /// The expression is parsed before anything is sent to the store, and its
    /// column must exist in the table.
    pub fn lookup(&mut self, expression: &str) -> Result<Vec<Row>> {
        let comparison = query::parse(expression)?;
        let identity = self.identity()?;

        let columns = self.store.columns(&identity.table)?;
        if columns.is_empty() {
            return Err(Error::other(format!(
                "table {} does not exist; ingest {} first",
                identity.table, self.log_file
            )));
        }
        if !columns
            .iter()
            .any(|c| c.eq_ignore_ascii_case(&comparison.column))
        {
            return Err(Error::UnknownColumn {
                table: identity.table,
                column: comparison.column,
            });
        }

        let lookup = comparison.to_lookup(&identity.table);
        info!("Lookup: {}", lookup.statement);
        self.store.query(&lookup.statement, &lookup.value)
    }

    /// Release the store. Later calls fail with [`Error::Closed`].
    pub fn close(&mut self) -> Result<()> {
        self.store.close()
    }
}

impl<S, R, I> fmt::Display for TranDb<S, R, I>
where
    S: Storage,
    R: RowSource,
    I: SchemaInferrer,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TranDB")
    }
}
