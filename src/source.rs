//! Reading log files into a header line and rows of field values.

use log::debug;
use std::fs;

use crate::error::{Error, Result};

/// A log file read into memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFile {
    pub name: String,
    /// The first line, verbatim (quotes and commas included).
    pub header: String,
    /// Remaining lines, each split into field values.
    pub rows: Vec<Vec<String>>,
}

impl LogFile {
    /// Build a log file from already-decoded content.
    pub fn parse(name: impl Into<String>, content: &str) -> Self {
        let mut lines = split_lines(content).into_iter();
        let header = lines.next().unwrap_or_default().to_string();
        let rows = lines
            .filter(|line| !line.trim().is_empty())
            .map(split_fields)
            .collect();
        Self {
            name: name.into(),
            header,
            rows,
        }
    }
}

/// Supplies log file contents for ingestion.
pub trait RowSource {
    fn read(&self, name: &str) -> Result<LogFile>;
}

/// Reads log files from the filesystem on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileRowSource;

impl RowSource for FileRowSource {
    fn read(&self, name: &str) -> Result<LogFile> {
        let bytes = fs::read(name).map_err(|source| Error::FileAccess {
            path: name.to_string(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes);
        let log_file = LogFile::parse(name, &content);
        debug!("Read {} rows from {}", log_file.rows.len(), name);
        Ok(log_file)
    }
}

/// Split trimmed content on `\n`, dropping a trailing `\r` from each line.
pub fn split_lines(content: &str) -> Vec<&str> {
    content
        .trim()
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Split a data row on `,`, trimming whitespace and surrounding quotes.
pub fn split_fields(line: &str) -> Vec<String> {
    line.split(',')
        .map(|field| field.trim().trim_matches('"').to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CONTENTS: &str =
        "TIME, CMD, ADDRESS\n0, RD, 0xbaadbeefdeadbeef\n10, WR, 0xbaadbeefdeadbeef\n";

    #[test]
    fn test_parse_separates_header_and_rows() {
        let log_file = LogFile::parse("bus.csv", CONTENTS);
        assert_eq!(log_file.header, "TIME, CMD, ADDRESS");
        assert_eq!(
            log_file.rows,
            vec![
                vec!["0", "RD", "0xbaadbeefdeadbeef"],
                vec!["10", "WR", "0xbaadbeefdeadbeef"],
            ]
        );
    }

    #[test]
    fn test_split_fields_strips_quotes() {
        assert_eq!(split_fields(r#""0", "RD""#), vec!["0", "RD"]);
    }

    #[test]
    fn test_split_lines_handles_crlf() {
        assert_eq!(split_lines("a, b\r\n1, 2\r\n"), vec!["a, b", "1, 2"]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let log_file = LogFile::parse("x.csv", "a, b\n1, 2\n\n3, 4");
        assert_eq!(log_file.rows.len(), 2);
    }

    #[test]
    fn test_header_only_file() {
        let log_file = LogFile::parse("x.csv", "a, b\n");
        assert_eq!(log_file.header, "a, b");
        assert!(log_file.rows.is_empty());
    }

    #[test]
    fn test_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bus.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(CONTENTS.as_bytes()).unwrap();

        let log_file = FileRowSource.read(path.to_str().unwrap()).unwrap();
        assert_eq!(log_file.rows.len(), 2);
        assert_eq!(log_file.name, path.to_str().unwrap());
    }

    #[test]
    fn test_read_invalid_utf8_is_lossy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        std::fs::write(&path, b"TIME, DATA\n0, \xff\xfe\n").unwrap();

        let log_file = FileRowSource.read(path.to_str().unwrap()).unwrap();
        assert_eq!(log_file.header, "TIME, DATA");
        assert_eq!(log_file.rows, vec![vec!["0", "\u{fffd}\u{fffd}"]]);
    }

    #[test]
    fn test_missing_file_is_file_access_error() {
        let err = FileRowSource.read("INVALID_FILE_NAME").unwrap_err();
        match err {
            Error::FileAccess { path, source } => {
                assert_eq!(path, "INVALID_FILE_NAME");
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
