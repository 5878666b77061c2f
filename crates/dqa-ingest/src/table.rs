//! Loaded-table types and header handling shared by the format readers.

use std::path::Path;

use polars::prelude::DataFrame;

/// Source file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Excel,
}

impl SourceFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" | "tsv" | "txt" => Some(Self::Csv),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Excel),
            _ => None,
        }
    }
}

/// Options controlling how a source file is loaded.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit format; inferred from the file extension when unset.
    pub format: Option<SourceFormat>,
    /// Target sheet for workbook sources; first sheet when unset.
    pub sheet: Option<String>,
    /// Character-encoding label for CSV sources (for example `latin1`);
    /// UTF-8 when unset.
    pub encoding: Option<String>,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn format(mut self, format: SourceFormat) -> Self {
        self.format = Some(format);
        self
    }

    #[must_use]
    pub fn sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    #[must_use]
    pub fn encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = Some(label.into());
        self
    }
}

/// A successfully loaded table: the typed frame plus the raw header.
///
/// DataFrame column names are deduplicated; `header` keeps the names exactly
/// as they appeared in the source, duplicates included.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub frame: DataFrame,
    pub header: Vec<String>,
    /// Sheet the data was read from, for workbook sources.
    pub sheet: Option<String>,
}

/// Normalize a raw header cell: strip BOM and collapse inner whitespace.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

/// Produce unique frame column names from a raw header.
///
/// The first occurrence keeps its name; later occurrences get a `_<n>`
/// suffix, bumped until free. Empty names become `unnamed`.
pub fn dedupe_headers(header: &[String]) -> Vec<String> {
    let mut used = std::collections::BTreeSet::new();
    let mut names = Vec::with_capacity(header.len());
    for raw in header {
        let base = if raw.is_empty() {
            "unnamed".to_string()
        } else {
            raw.clone()
        };
        let mut candidate = base.clone();
        let mut counter = 2usize;
        while !used.insert(candidate.clone()) {
            candidate = format!("{base}_{counter}");
            counter += 1;
        }
        names.push(candidate);
    }
    names
}
