//! Missingness checks: per-column counts and systematic missing-pattern
//! mining.

use polars::prelude::{AnyValue, Column, DataFrame};
use serde_json::json;

use dqa_model::{AuditOptions, Finding, Metadata, codes};

use super::is_missing_cell;
use crate::util::combinations;

/// Count missing values in a column: structural nulls plus string cells
/// matching the sentinel set. Emits when the count exceeds the configured
/// maximum.
pub fn missing_values(col: &Column, _meta: &Metadata, options: &AuditOptions) -> Option<Finding> {
    let null = col.null_count();
    let mut na = 0usize;
    for idx in 0..col.len() {
        match col.get(idx).unwrap_or(AnyValue::Null) {
            AnyValue::String(s) if options.missing_values.contains(s) => na += 1,
            AnyValue::StringOwned(s) if options.missing_values.contains(s.as_str()) => na += 1,
            _ => {}
        }
    }
    let missing = null + na;
    if missing <= options.missing_max {
        return None;
    }
    Some(
        Finding::new(
            codes::MISSING_VALUES,
            format!("{}: {missing} values missing", col.name()),
        )
        .with_metric("missing", missing)
        .with_metric("null", null)
        .with_metric("na", na),
    )
}

/// Mine systematic missing patterns.
///
/// Over the columns with at least one missing value, subsets are evaluated
/// from largest to smallest; each subset claims the remaining rows where all
/// of its columns are missing together, and claimed rows are excluded from
/// smaller subsets so no row is counted twice. A finding is emitted only
/// when more than one distinct pattern exists.
pub fn missing_patterns(
    df: &DataFrame,
    _meta: &Metadata,
    options: &AuditOptions,
) -> Option<Finding> {
    let height = df.height();
    if height == 0 {
        return None;
    }
    let columns = df.get_columns();
    let missing_cols: Vec<usize> = (0..columns.len())
        .filter(|&idx| (0..height).any(|row| is_missing_cell(&columns[idx], row, options)))
        .collect();
    if missing_cols.is_empty() {
        return None;
    }

    let mut alive = vec![true; height];
    let mut patterns: Vec<(Vec<String>, usize)> = Vec::new();
    for size in (1..=missing_cols.len()).rev() {
        for combo in combinations(missing_cols.len(), size) {
            let subset: Vec<usize> = combo.iter().map(|&i| missing_cols[i]).collect();
            let mut claimed = 0usize;
            for row in 0..height {
                if !alive[row] {
                    continue;
                }
                if subset
                    .iter()
                    .all(|&col| is_missing_cell(&columns[col], row, options))
                {
                    alive[row] = false;
                    claimed += 1;
                }
            }
            if claimed > 0 {
                let names = subset
                    .iter()
                    .map(|&col| columns[col].name().to_string())
                    .collect();
                patterns.push((names, claimed));
            }
        }
    }

    if patterns.len() <= 1 {
        return None;
    }
    let entries: Vec<serde_json::Value> = patterns
        .iter()
        .map(|(names, rows)| json!({ "columns": names, "rows": rows }))
        .collect();
    Some(
        Finding::new(
            codes::MISSING_PATTERNS,
            format!("{} distinct missing patterns", patterns.len()),
        )
        .with_metric("patterns", json!(entries))
        .with_metric("count", patterns.len()),
    )
}
