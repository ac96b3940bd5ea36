//! Storage names derived from a log file name.
//!
//! A log file `S` resolves to the database file `stem(S) + ".db"` and the table
//! `stem(S) + "_table"`, where the stem is the file name up to its last `.`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::{Error, Result};

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex"));

/// Strip the final extension from a file name.
///
/// A name without any `.` is returned unchanged.
pub fn stem(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(stem, _)| stem)
}

/// Reject anything that is not a plain SQL identifier.
///
/// Table names are spliced into statement text, so only `[A-Za-z_][A-Za-z0-9_]*`
/// is accepted.
pub fn validate_identifier(ident: &str) -> Result<()> {
    if IDENTIFIER.is_match(ident) {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier(ident.to_string()))
    }
}

/// The (database file, table name) pair for one log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableIdentity {
    pub db_file: String,
    pub table: String,
}

/// Suffixes used when resolving a [`TableIdentity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Naming {
    pub table_suffix: String,
    pub db_suffix: String,
}

impl Default for Naming {
    fn default() -> Self {
        Self {
            table_suffix: "_table".to_string(),
            db_suffix: ".db".to_string(),
        }
    }
}

impl Naming {
    /// Resolve the storage identity of `log_file`.
    ///
    /// Only the final path component loses its extension. The database file
    /// keeps the directory so it lands next to the log; the table does not.
    pub fn resolve(&self, log_file: &str) -> TableIdentity {
        let (dir, file) = match log_file.rsplit_once(['/', '\\']) {
            Some((dir, file)) => (&log_file[..dir.len() + 1], file),
            None => ("", log_file),
        };
        let base = stem(file);
        TableIdentity {
            db_file: format!("{}{}{}", dir, base, self.db_suffix),
            table: format!("{}{}", base, self.table_suffix),
        }
    }

    /// Resolve and check the table name against the identifier allow-list.
    pub fn resolve_checked(&self, log_file: &str) -> Result<TableIdentity> {
        let identity = self.resolve(log_file);
        validate_identifier(&identity.table)?;
        Ok(identity)
    }
}
