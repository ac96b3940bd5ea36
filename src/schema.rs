//! Column schema inference from a raw header line.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::error::{Error, Result};
use crate::types::ColumnType;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+").expect("token regex"));

/// One inferred column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
}

/// Ordered column list, one entry per header token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnSchema {
    pub columns: Vec<Column>,
}

impl ColumnSchema {
    /// Column definitions for a `CREATE TABLE (...)` statement,
    /// e.g. `Time TEXT, Command TEXT`.
    pub fn fragment(&self) -> String {
        self.columns
            .iter()
            .map(|c| format!("{} {}", c.name, c.column_type))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Turns a header line into a schema and a bind-parameter count.
pub trait SchemaInferrer {
    /// Infer the column schema from the raw header line.
    fn infer(&self, header: &str) -> Result<ColumnSchema>;

    /// Number of values each data row is expected to bind.
    fn column_count(&self, header: &str) -> usize {
        column_count(header)
    }
}

/// Default inferrer: every whitespace-separated token of the header, with
/// quotes and commas removed, becomes a `TEXT` column.
///
/// A quoted field containing a space (`"Start Time"`) becomes two columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderSchema;

impl SchemaInferrer for HeaderSchema {
    fn infer(&self, header: &str) -> Result<ColumnSchema> {
        let cleaned = header.replace(['"', ','], "");
        let columns: Vec<Column> = TOKEN
            .find_iter(&cleaned)
            .map(|m| Column {
                name: m.as_str().to_string(),
                column_type: ColumnType::Text,
            })
            .collect();
        if columns.is_empty() {
            return Err(Error::MalformedHeader(format!(
                "no column names in header {:?}",
                header
            )));
        }
        Ok(ColumnSchema { columns })
    }
}

/// Count header fields by splitting the original header on `,`.
pub fn column_count(header: &str) -> usize {
    header.split(',').count()
}

/// `?, ?, ?` for a count of 3.
pub fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}
