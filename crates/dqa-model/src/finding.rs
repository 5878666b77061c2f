//! Structured findings emitted by audit checks.
//!
//! A check that detects nothing returns no finding at all; an empty finding
//! is never a valid "all clear" signal.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Machine-readable finding codes, one per check.
pub mod codes {
    pub const DUPLICATE_ROWS: &str = "duplicate-rows";
    pub const DUPLICATE_COLUMN_NAMES: &str = "duplicate-column-names";
    pub const DUPLICATE_COLUMNS: &str = "duplicate-columns";
    pub const MISSING_VALUES: &str = "missing-values";
    pub const MISSING_PATTERNS: &str = "missing-patterns";
    pub const NUMERIC_OUTLIERS: &str = "numeric-outliers";
    pub const CATEGORICAL_OUTLIERS: &str = "categorical-outliers";
    pub const SEQUENCE_CONTINUITY: &str = "sequence-continuity";
    pub const PRIMARY_KEY_CANDIDATES: &str = "primary-key-candidates";
    pub const CHAR_LENGTH: &str = "char-length";
    pub const NEGATIVE_NUMBERS: &str = "negative-numbers";
    pub const CATEGORICAL_TYPOS: &str = "categorical-typos";
    /// Emitted by the pipeline when a check faulted instead of completing.
    pub const CHECK_FAILED: &str = "check-failed";
}

/// A single diagnostic record produced by one check invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Machine-readable code identifying the check (see [`codes`]).
    pub code: String,
    /// Human-readable description of the issue.
    pub message: String,
    /// Column the finding applies to, if column-scoped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Named metric values specific to the check.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub metrics: BTreeMap<String, serde_json::Value>,
}

impl Finding {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            column: None,
            metrics: BTreeMap::new(),
        }
    }

    /// Attach a named metric value.
    #[must_use]
    pub fn with_metric(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metrics.insert(key.to_string(), value.into());
        self
    }

    /// Scope the finding to a column. Existing scope is preserved, so checks
    /// that set the column themselves win over the pipeline's merge.
    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        if self.column.is_none() {
            self.column = Some(column.into());
        }
        self
    }
}
