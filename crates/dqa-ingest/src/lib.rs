//! Data ingestion for the dqa audit engine.
//!
//! Turns a file path into a [`LoadedTable`]: a polars DataFrame plus the raw
//! header exactly as read from the source. Load failures are typed and carry
//! a machine-readable code; the audit pipeline is never invoked on a failed
//! load.

pub mod csv;
pub mod error;
pub mod excel;
pub mod polars_utils;
pub mod table;

use std::path::Path;

pub use error::{IngestError, Result};
pub use polars_utils::{any_to_cell, any_to_f64, any_to_string, format_numeric, parse_f64};
pub use table::{LoadOptions, LoadedTable, SourceFormat, dedupe_headers, normalize_header};

/// Load a tabular source file.
///
/// The format is taken from `options.format`, falling back to the file
/// extension. Unknown extensions are an error, not a guess.
pub fn load(path: &Path, options: &LoadOptions) -> Result<LoadedTable> {
    let format = match options.format {
        Some(format) => format,
        None => {
            SourceFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("")
                    .to_string(),
            })?
        }
    };

    tracing::info!(path = %path.display(), format = ?format, "loading source");
    match format {
        SourceFormat::Csv => csv::read_csv(path, options),
        SourceFormat::Excel => excel::read_excel(path, options),
    }
}
