//! Error types for data ingestion.
//!
//! Load failures are fatal to an audit run: the pipeline never starts and the
//! error is surfaced directly, distinct from an empty finding list.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a source file.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read the input file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension is not a recognized tabular format.
    #[error("unsupported format for {path}: '{extension}' (expected csv or a workbook)")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// Requested character encoding is unknown or the data does not decode.
    #[error("unsupported encoding '{label}' for {path}")]
    UnsupportedEncoding { path: PathBuf, label: String },

    /// Failed to parse the file as CSV.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to open or parse the workbook.
    #[error("failed to read workbook {path}: {message}")]
    WorkbookParse { path: PathBuf, message: String },

    /// Requested sheet does not exist in the workbook.
    #[error("sheet '{sheet}' not found in {path}")]
    SheetNotFound { path: PathBuf, sheet: String },

    /// File parsed but contains no header or no data.
    #[error("no tabular data in {path}")]
    EmptyTable { path: PathBuf },
}

impl IngestError {
    /// Machine-readable code for reporting, one per failure class.
    pub fn code(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "unreadable-file",
            Self::FileRead { .. } => "unreadable-file",
            Self::UnsupportedFormat { .. } => "unsupported-format",
            Self::UnsupportedEncoding { .. } => "unsupported-encoding",
            Self::CsvParse { .. } => "parse-failure",
            Self::WorkbookParse { .. } => "parse-failure",
            Self::SheetNotFound { .. } => "sheet-not-found",
            Self::EmptyTable { .. } => "empty-table",
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/sales.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /data/sales.csv");
        assert_eq!(err.code(), "unreadable-file");
    }

    #[test]
    fn sheet_error_code() {
        let err = IngestError::SheetNotFound {
            path: PathBuf::from("book.xlsx"),
            sheet: "Q3".to_string(),
        };
        assert_eq!(err.code(), "sheet-not-found");
    }
}
