//! Per-run derived metadata: the raw header and the semantic column types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Semantic classification of the columns in a dataset.
///
/// `dates` and `keywords` are subsets of `groups`; `numbers` and `groups`
/// partition the columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnTypes {
    /// Columns whose values are all numeric.
    pub numbers: BTreeSet<String>,
    /// Categorical columns: everything that is not numeric.
    pub groups: BTreeSet<String>,
    /// Date-parseable columns (subset of `groups`).
    pub dates: BTreeSet<String>,
    /// Free-text columns (subset of `groups`).
    pub keywords: BTreeSet<String>,
}

impl ColumnTypes {
    pub fn is_number(&self, column: &str) -> bool {
        self.numbers.contains(column)
    }

    pub fn is_group(&self, column: &str) -> bool {
        self.groups.contains(column)
    }

    pub fn is_date(&self, column: &str) -> bool {
        self.dates.contains(column)
    }

    pub fn is_keyword(&self, column: &str) -> bool {
        self.keywords.contains(column)
    }
}

/// Everything a check may know about the run besides the data itself.
///
/// Built once before any check executes and read-only afterwards. Header
/// lookups (for example duplicate-name detection) go through this value;
/// checks never consult ambient state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Column names exactly as read from the source, duplicates preserved.
    pub header: Vec<String>,
    /// Semantic column classification.
    pub types: ColumnTypes,
    /// Sheet the data came from, for workbook sources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
}

impl Metadata {
    pub fn new(header: Vec<String>, types: ColumnTypes) -> Self {
        Self {
            header,
            types,
            sheet: None,
        }
    }

    #[must_use]
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }
}
