//! CSV loading: raw-header capture plus typed DataFrame construction.
//!
//! The raw header is read first with the `csv` crate so that duplicate column
//! names survive for header-level checks; the DataFrame is then parsed by
//! polars with deduplicated names.

use std::io::Cursor;
use std::path::Path;

use polars::prelude::{CsvReadOptions, SerReader};

use crate::error::{IngestError, Result};
use crate::table::{LoadOptions, LoadedTable, dedupe_headers, normalize_header};

/// Schema inference window for the polars reader.
const INFER_SCHEMA_ROWS: usize = 100;

/// Read a CSV file into a [`LoadedTable`].
///
/// The file is decoded with the configured encoding (UTF-8 by default; BOMs
/// are honored over the configured label), the first record becomes the raw
/// header, and the remaining records are parsed by polars with schema
/// inference over the first [`INFER_SCHEMA_ROWS`] rows.
pub fn read_csv(path: &Path, options: &LoadOptions) -> Result<LoadedTable> {
    let bytes = read_file_bytes(path)?;
    let decoded = decode_bytes(path, &bytes, options.encoding.as_deref())?;

    let header = read_raw_header(path, &decoded)?;
    let names = dedupe_headers(&header);

    let mut df = CsvReadOptions::default()
        .with_has_header(false)
        .with_skip_rows(1)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .into_reader_with_file_handle(Cursor::new(decoded.as_bytes()))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if df.width() != names.len() {
        return Err(IngestError::CsvParse {
            path: path.to_path_buf(),
            message: format!(
                "header declares {} columns but data rows have {}",
                names.len(),
                df.width()
            ),
        });
    }
    df.set_column_names(names.iter().map(String::as_str))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if df.width() > 500 {
        tracing::warn!(
            path = %path.display(),
            columns = df.width(),
            "very wide dataset; pairwise checks may be slow"
        );
    }
    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded csv"
    );

    Ok(LoadedTable {
        frame: df,
        header,
        sheet: None,
    })
}

fn read_file_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

fn decode_bytes(path: &Path, bytes: &[u8], label: Option<&str>) -> Result<String> {
    let encoding = match label {
        Some(label) => encoding_rs::Encoding::for_label(label.as_bytes()).ok_or_else(|| {
            IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                label: label.to_string(),
            }
        })?,
        None => encoding_rs::UTF_8,
    };
    // decode() sniffs BOMs, so a UTF-16 file with a BOM decodes even under
    // the default label.
    let (decoded, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            label: used.name().to_lowercase(),
        });
    }
    Ok(decoded.into_owned())
}

/// Parse the first record as the raw header and confirm data rows follow.
fn read_raw_header(path: &Path, decoded: &str) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(decoded.as_bytes());
    let mut records = reader.records();

    let header_record = match records.next() {
        Some(record) => record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?,
        None => {
            return Err(IngestError::EmptyTable {
                path: path.to_path_buf(),
            });
        }
    };
    let header: Vec<String> = header_record.iter().map(normalize_header).collect();
    if header.iter().all(String::is_empty) {
        return Err(IngestError::EmptyTable {
            path: path.to_path_buf(),
        });
    }

    match records.next() {
        Some(record) => {
            record.map_err(|e| IngestError::CsvParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        }
        None => {
            return Err(IngestError::EmptyTable {
                path: path.to_path_buf(),
            });
        }
    }

    Ok(header)
}
