//! Ingestion pipeline: log file -> `CREATE TABLE IF NOT EXISTS` + batched insert.

use log::info;
use serde::Serialize;

use crate::error::Result;
use crate::naming::{Naming, TableIdentity};
use crate::schema::{ColumnSchema, SchemaInferrer, placeholders};
use crate::source::{LogFile, RowSource};
use crate::store::Storage;

/// The two statements ingestion runs for one log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestPlan {
    pub create: String,
    pub insert: String,
    pub schema: ColumnSchema,
}

impl IngestPlan {
    /// Build the statements for `log_file` against `table`.
    ///
    /// The insert column list is the header text as read; only the create
    /// statement uses the inferred schema.
    pub fn build(
        inferrer: &dyn SchemaInferrer,
        log_file: &LogFile,
        table: &str,
    ) -> Result<Self> {
        let schema = inferrer.infer(&log_file.header)?;
        let create = format!("CREATE TABLE IF NOT EXISTS {}({})", table, schema.fragment());
        let count = inferrer.column_count(&log_file.header);
        let insert = format!(
            "INSERT INTO {}({}) VALUES ({});",
            table,
            log_file.header,
            placeholders(count)
        );
        Ok(Self {
            create,
            insert,
            schema,
        })
    }
}

/// Outcome of one ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub identity: TableIdentity,
    pub columns: Vec<String>,
    pub rows: usize,
}

/// Read `log_file_name`, create its table if absent and append every row.
///
/// The file is read and the header checked before the store is touched, so a
/// missing file or an empty header leaves no table behind. The reported
/// database file is the store's, not one derived from `log_file_name`.
pub fn ingest(
    store: &mut dyn Storage,
    source: &dyn RowSource,
    inferrer: &dyn SchemaInferrer,
    naming: &Naming,
    log_file_name: &str,
) -> Result<IngestReport> {
    let log_file = source.read(log_file_name)?;
    let identity = TableIdentity {
        db_file: store.location(),
        table: naming.resolve_checked(log_file_name)?.table,
    };
    let plan = IngestPlan::build(inferrer, &log_file, &identity.table)?;
    info!(
        "Ingesting {} into {} ({})",
        log_file_name,
        identity.table,
        plan.schema.fragment()
    );

    store.execute(&plan.create)?;
    let rows = store.insert_batch(&plan.insert, &log_file.rows)?;
    info!("Inserted {} rows into {}", rows, identity.table);

    Ok(IngestReport {
        columns: plan.schema.names().into_iter().map(String::from).collect(),
        identity,
        rows,
    })
}
