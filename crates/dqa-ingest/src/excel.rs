//! Workbook loading via calamine.
//!
//! The first row of the selected sheet becomes the raw header; remaining rows
//! are typed per column: all-integer cells become Int64, numeric mixes become
//! Float64, everything else is kept as strings. Date/time cells are rendered
//! in ISO form so the classifier can recognize them.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use crate::error::{IngestError, Result};
use crate::table::{LoadOptions, LoadedTable, dedupe_headers, normalize_header};

/// Read one sheet of a workbook into a [`LoadedTable`].
pub fn read_excel(path: &Path, options: &LoadOptions) -> Result<LoadedTable> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::WorkbookParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheet = match &options.sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|s| s == name) {
                return Err(IngestError::SheetNotFound {
                    path: path.to_path_buf(),
                    sheet: name.clone(),
                });
            }
            name.clone()
        }
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| IngestError::EmptyTable {
                path: path.to_path_buf(),
            })?,
    };

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| IngestError::WorkbookParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let (header, frame) = build_frame(path, &range)?;
    tracing::debug!(
        path = %path.display(),
        sheet = %sheet,
        rows = frame.height(),
        columns = frame.width(),
        "loaded workbook sheet"
    );

    Ok(LoadedTable {
        frame,
        header,
        sheet: Some(sheet),
    })
}

fn build_frame(path: &Path, range: &Range<Data>) -> Result<(Vec<String>, DataFrame)> {
    let mut rows = range.rows();
    let header_row = rows.next().ok_or_else(|| IngestError::EmptyTable {
        path: path.to_path_buf(),
    })?;
    let header: Vec<String> = header_row
        .iter()
        .map(|cell| normalize_header(&render_cell(cell).unwrap_or_default()))
        .collect();
    if header.iter().all(String::is_empty) {
        return Err(IngestError::EmptyTable {
            path: path.to_path_buf(),
        });
    }

    let data_rows: Vec<&[Data]> = rows.collect();
    if data_rows.is_empty() {
        return Err(IngestError::EmptyTable {
            path: path.to_path_buf(),
        });
    }

    let names = dedupe_headers(&header);
    let mut columns: Vec<Column> = Vec::with_capacity(names.len());
    for (idx, name) in names.iter().enumerate() {
        let cells: Vec<&Data> = data_rows
            .iter()
            .map(|row| row.get(idx).unwrap_or(&Data::Empty))
            .collect();
        columns.push(build_column(name, &cells));
    }

    let frame = DataFrame::new(columns).map_err(|e| IngestError::WorkbookParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok((header, frame))
}

/// Build a typed column from one sheet column's cells.
fn build_column(name: &str, cells: &[&Data]) -> Column {
    let mut has_values = false;
    let mut all_int = true;
    let mut all_numeric = true;
    for cell in cells {
        match cell {
            Data::Empty | Data::Error(_) => {}
            Data::Int(_) => has_values = true,
            Data::Float(v) => {
                has_values = true;
                if v.fract() != 0.0 {
                    all_int = false;
                }
            }
            _ => {
                has_values = true;
                all_int = false;
                all_numeric = false;
            }
        }
    }

    if has_values && all_numeric {
        if all_int {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| match cell {
                    Data::Int(v) => Some(*v),
                    Data::Float(v) => Some(*v as i64),
                    _ => None,
                })
                .collect();
            return Series::new(name.into(), values).into();
        }
        let values: Vec<Option<f64>> = cells
            .iter()
            .map(|cell| match cell {
                Data::Int(v) => Some(*v as f64),
                Data::Float(v) => Some(*v),
                _ => None,
            })
            .collect();
        return Series::new(name.into(), values).into();
    }

    let values: Vec<Option<String>> = cells.iter().map(|cell| render_cell(cell)).collect();
    Series::new(name.into(), values).into()
}

/// Render a cell as text; `None` for empty and error cells.
fn render_cell(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.trim().to_string()),
        Data::Int(v) => Some(v.to_string()),
        Data::Float(v) => Some(crate::polars_utils::format_numeric(*v)),
        Data::Bool(b) => Some(if *b { "true" } else { "false" }.to_string()),
        Data::DateTime(dt) => dt.as_datetime().map(|naive| {
            if naive.time() == chrono::NaiveTime::MIN {
                naive.date().format("%Y-%m-%d").to_string()
            } else {
                naive.format("%Y-%m-%d %H:%M:%S").to_string()
            }
        }),
        Data::DateTimeIso(s) => Some(s.clone()),
        Data::DurationIso(s) => Some(s.clone()),
    }
}
