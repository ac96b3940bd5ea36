//! trandb - Load delimited log files into SQLite and look rows up by comparison.
//!
//! A log file's header line becomes an all-`TEXT` table named after the file,
//! its rows are bulk-inserted with bound parameters, and expressions such as
//! `CMD = RD` or `TIME>9` are translated into parameterized `SELECT`s.

pub mod config;
pub mod db;
pub mod error;
pub mod ingest;
pub mod naming;
pub mod query;
pub mod schema;
pub mod source;
pub mod store;
pub mod types;

// Re-export commonly used items for convenience
pub use config::Config;
pub use db::TranDb;
pub use naming::{Naming, TableIdentity};
pub use store::{Row, SqliteStore, Storage};
pub use types::ColumnType;
