//! Audit configuration: every check threshold, with documented defaults.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Thresholds and overrides consumed by the classifier and the checks.
///
/// All fields have the defaults documented on them; override per invocation
/// with the builder methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditOptions {
    /// String values treated as missing in addition to structural nulls
    /// (default `""` and `"NA"`).
    pub missing_values: BTreeSet<String>,
    /// Maximum tolerated missing count per column before a finding (default 0).
    pub missing_max: usize,
    /// Lower outlier fence override; computed as Q1 - 1.5*IQR when unset.
    pub outlier_low: Option<f64>,
    /// Upper outlier fence override; computed as Q3 + 1.5*IQR when unset.
    pub outlier_high: Option<f64>,
    /// Maximum tolerated outlier count per column before a finding (default 0).
    pub outlier_max: usize,
    /// Minimum share the dominant row-to-row difference must hold for a
    /// column to count as a near-arithmetic sequence (default 0.9).
    pub continuity_threshold: f64,
    /// Edit distances strictly below this flag a pair as a probable typo
    /// (default 3).
    pub typo_distance: usize,
    /// Values this short or shorter are skipped by the typo check (default 5).
    pub typo_min_length: usize,
    /// Maximum string length before a cell is flagged (default 50).
    pub char_length_max: usize,
    /// Negative counts below this fraction of a numeric column are flagged
    /// as probable sign errors (default 0.02).
    pub negative_fraction: f64,
    /// A value with more than this many separator occurrences marks its
    /// column as free text (default 2).
    pub keyword_threshold: usize,
    /// Separator counted by the keyword heuristic (default space).
    pub keyword_separator: char,
    /// Number of leading non-null values sampled by the classifier
    /// heuristics (default 1000).
    pub sample_limit: usize,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            missing_values: [String::new(), "NA".to_string()].into_iter().collect(),
            missing_max: 0,
            outlier_low: None,
            outlier_high: None,
            outlier_max: 0,
            continuity_threshold: 0.9,
            typo_distance: 3,
            typo_min_length: 5,
            char_length_max: 50,
            negative_fraction: 0.02,
            keyword_threshold: 2,
            keyword_separator: ' ',
            sample_limit: 1000,
        }
    }
}

impl AuditOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn missing_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missing_values = values.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn missing_max(mut self, max: usize) -> Self {
        self.missing_max = max;
        self
    }

    #[must_use]
    pub fn outlier_fences(mut self, low: Option<f64>, high: Option<f64>) -> Self {
        self.outlier_low = low;
        self.outlier_high = high;
        self
    }

    #[must_use]
    pub fn outlier_max(mut self, max: usize) -> Self {
        self.outlier_max = max;
        self
    }

    #[must_use]
    pub fn continuity_threshold(mut self, threshold: f64) -> Self {
        self.continuity_threshold = threshold;
        self
    }

    #[must_use]
    pub fn typo_distance(mut self, distance: usize) -> Self {
        self.typo_distance = distance;
        self
    }

    #[must_use]
    pub fn char_length_max(mut self, max: usize) -> Self {
        self.char_length_max = max;
        self
    }

    #[must_use]
    pub fn negative_fraction(mut self, fraction: f64) -> Self {
        self.negative_fraction = fraction;
        self
    }

    #[must_use]
    pub fn keyword_threshold(mut self, threshold: usize) -> Self {
        self.keyword_threshold = threshold;
        self
    }

    #[must_use]
    pub fn sample_limit(mut self, limit: usize) -> Self {
        self.sample_limit = limit;
        self
    }
}
