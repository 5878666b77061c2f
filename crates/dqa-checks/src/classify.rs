//! Column type inference.
//!
//! Classifies every column into the semantic sets checks key off:
//! `numbers` structurally by dtype, `groups` as everything else, `dates` and
//! `keywords` by sampled heuristics over the leading non-null values.
//! Date classification must not produce false positives: one unparseable
//! sampled value disqualifies the column.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::{Column, DataFrame, DataType};

use dqa_ingest::any_to_cell;
use dqa_model::{AuditOptions, ColumnTypes};

use crate::util::is_numeric_dtype;

/// Classify the columns of a dataset.
pub fn classify(df: &DataFrame, options: &AuditOptions) -> ColumnTypes {
    let mut types = ColumnTypes::default();
    for col in df.get_columns() {
        let name = col.name().to_string();
        if is_numeric_dtype(col.dtype()) {
            types.numbers.insert(name);
            continue;
        }
        if is_date_column(col, options.sample_limit) {
            types.dates.insert(name.clone());
        }
        if has_keywords(col, options) {
            types.keywords.insert(name.clone());
        }
        types.groups.insert(name);
    }
    tracing::debug!(
        numbers = types.numbers.len(),
        groups = types.groups.len(),
        dates = types.dates.len(),
        keywords = types.keywords.len(),
        "classified columns"
    );
    types
}

/// Whether a non-numeric column holds calendar dates.
///
/// Native temporal dtypes qualify outright when non-empty. Other columns
/// qualify only if every sampled value parses.
fn is_date_column(col: &Column, sample_limit: usize) -> bool {
    if matches!(col.dtype(), DataType::Date | DataType::Datetime(_, _)) {
        return col.len() > col.null_count();
    }
    let mut sampled = 0usize;
    for idx in 0..col.len() {
        if sampled >= sample_limit {
            break;
        }
        let Some(value) = any_to_cell(col.get(idx).unwrap_or(polars::prelude::AnyValue::Null))
        else {
            continue;
        };
        sampled += 1;
        if !parse_date_like(&value) {
            return false;
        }
    }
    sampled > 0
}

/// Whether any sampled value looks like free text: more than `threshold`
/// separator occurrences.
fn has_keywords(col: &Column, options: &AuditOptions) -> bool {
    let mut sampled = 0usize;
    for idx in 0..col.len() {
        if sampled >= options.sample_limit {
            break;
        }
        let Some(value) = any_to_cell(col.get(idx).unwrap_or(polars::prelude::AnyValue::Null))
        else {
            continue;
        };
        sampled += 1;
        if value.matches(options.keyword_separator).count() > options.keyword_threshold {
            return true;
        }
    }
    false
}

/// Date formats accepted by the best-effort parser, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
];

/// Best-effort calendar parse. Purely numeric tokens are rejected: long
/// integers such as phone numbers must not classify a column as dates.
pub fn parse_date_like(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }
    if trimmed.parse::<f64>().is_ok() {
        return false;
    }
    if DateTime::parse_from_rfc3339(trimmed).is_ok() {
        return true;
    }
    if DATETIME_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).is_ok())
    {
        return true;
    }
    DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(trimmed, fmt).is_ok())
}
