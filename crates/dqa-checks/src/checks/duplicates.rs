//! Duplication checks: repeated rows, repeated header names, and columns
//! whose contents coincide under different names.

use std::collections::{BTreeMap, HashSet};

use polars::prelude::{AnyValue, Column, DataFrame};
use serde_json::json;

use dqa_ingest::any_to_cell;
use dqa_model::{AuditOptions, Finding, Metadata, codes};

/// Count rows that exactly duplicate an earlier row across all columns.
/// Null cells compare equal to null cells.
pub fn duplicate_rows(df: &DataFrame, _meta: &Metadata, _options: &AuditOptions) -> Option<Finding> {
    if df.height() == 0 || df.width() == 0 {
        return None;
    }
    let columns = df.get_columns();
    let mut seen: HashSet<Vec<Option<String>>> = HashSet::with_capacity(df.height());
    let mut duplicates = 0usize;
    for idx in 0..df.height() {
        let key: Vec<Option<String>> = columns
            .iter()
            .map(|col| any_to_cell(col.get(idx).unwrap_or(AnyValue::Null)))
            .collect();
        if !seen.insert(key) {
            duplicates += 1;
        }
    }
    if duplicates == 0 {
        return None;
    }
    Some(
        Finding::new(codes::DUPLICATE_ROWS, format!("{duplicates} duplicate rows"))
            .with_metric("duplicates", duplicates),
    )
}

/// Report header names that occur more than once in the raw header.
pub fn duplicate_column_names(
    _df: &DataFrame,
    meta: &Metadata,
    _options: &AuditOptions,
) -> Option<Finding> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for name in &meta.header {
        *counts.entry(name.as_str()).or_default() += 1;
    }
    let duplicated: Vec<&str> = counts
        .iter()
        .filter(|&(_, &count)| count > 1)
        .map(|(&name, _)| name)
        .collect();
    if duplicated.is_empty() {
        return None;
    }
    Some(
        Finding::new(
            codes::DUPLICATE_COLUMN_NAMES,
            format!(
                "{} duplicated column names: {}",
                duplicated.len(),
                duplicated.join(", ")
            ),
        )
        .with_metric("names", json!(duplicated))
        .with_metric("count", duplicated.len()),
    )
}

/// Find pairs of columns with identical contents.
///
/// Columns are bucketed by dtype first; values of different types cannot be
/// equal. Within a bucket every pair is compared null-mask-first: two
/// columns match only when their null positions coincide and their non-null
/// values are equal. Pairs are reported lower-index-first.
pub fn duplicate_columns(
    df: &DataFrame,
    _meta: &Metadata,
    _options: &AuditOptions,
) -> Option<Finding> {
    if df.width() < 2 || df.height() == 0 {
        return None;
    }
    let columns = df.get_columns();
    let mut buckets: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (idx, col) in columns.iter().enumerate() {
        buckets.entry(col.dtype().to_string()).or_default().push(idx);
    }

    let mut pairs: Vec<(usize, usize)> = Vec::new();
    for indices in buckets.values() {
        for (pos, &left) in indices.iter().enumerate() {
            for &right in &indices[pos + 1..] {
                if columns_equal(&columns[left], &columns[right], df.height()) {
                    pairs.push((left, right));
                }
            }
        }
    }
    if pairs.is_empty() {
        return None;
    }
    // Bucket iteration groups by dtype; restore dataset pair order.
    pairs.sort_unstable();
    let named: Vec<(String, String)> = pairs
        .iter()
        .map(|&(a, b)| (columns[a].name().to_string(), columns[b].name().to_string()))
        .collect();
    Some(
        Finding::new(
            codes::DUPLICATE_COLUMNS,
            format!("{} duplicate column pairs", named.len()),
        )
        .with_metric("pairs", json!(named))
        .with_metric("count", named.len()),
    )
}

/// Cell-wise equality with aligned null masks. Non-null values are compared
/// through their rendered form, so NaN compares equal to NaN.
fn columns_equal(a: &Column, b: &Column, height: usize) -> bool {
    for idx in 0..height {
        let left = a.get(idx).unwrap_or(AnyValue::Null);
        let right = b.get(idx).unwrap_or(AnyValue::Null);
        match (any_to_cell(left), any_to_cell(right)) {
            (None, None) => {}
            (Some(l), Some(r)) if l == r => {}
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    fn meta() -> Metadata {
        Metadata::default()
    }

    fn options() -> AuditOptions {
        AuditOptions::default()
    }

    #[test]
    fn counts_duplicate_rows_with_nulls() {
        let df = DataFrame::new(vec![
            Series::new("a".into(), &[Some(1i64), None, Some(1), None]).into(),
            Series::new("b".into(), &[Some("x"), None, Some("x"), None]).into(),
        ])
        .unwrap();
        let finding = duplicate_rows(&df, &meta(), &options()).unwrap();
        assert_eq!(finding.metrics["duplicates"], serde_json::json!(2));
    }

    #[test]
    fn no_finding_without_duplicates() {
        let df = DataFrame::new(vec![
            Series::new("a".into(), &[1i64, 2, 3]).into(),
        ])
        .unwrap();
        assert!(duplicate_rows(&df, &meta(), &options()).is_none());
    }

    #[test]
    fn reports_duplicated_header_names() {
        let df = DataFrame::new(vec![
            Series::new("id".into(), &[1i64]).into(),
        ])
        .unwrap();
        let metadata = Metadata::new(
            vec!["id".to_string(), "id".to_string(), "value".to_string()],
            Default::default(),
        );
        let finding = duplicate_column_names(&df, &metadata, &options()).unwrap();
        assert_eq!(finding.metrics["count"], serde_json::json!(1));
        assert_eq!(finding.metrics["names"], serde_json::json!(["id"]));
    }

    #[test]
    fn identical_columns_are_paired() {
        let df = DataFrame::new(vec![
            Series::new("a".into(), &[1i64, 2, 3]).into(),
            Series::new("b".into(), &[1i64, 2, 3]).into(),
            Series::new("c".into(), &["1", "2", "3"]).into(),
        ])
        .unwrap();
        let finding = duplicate_columns(&df, &meta(), &options()).unwrap();
        // "c" has a different dtype, so only (a, b) pairs up.
        assert_eq!(finding.metrics["count"], serde_json::json!(1));
        assert_eq!(finding.metrics["pairs"], serde_json::json!([["a", "b"]]));
    }

    #[test]
    fn null_masks_must_coincide() {
        let df = DataFrame::new(vec![
            Series::new("a".into(), &[Some(1.0f64), None, Some(3.0)]).into(),
            Series::new("b".into(), &[None, Some(1.0f64), Some(3.0)]).into(),
            Series::new("c".into(), &[Some(1.0f64), None, Some(3.0)]).into(),
        ])
        .unwrap();
        let finding = duplicate_columns(&df, &meta(), &options()).unwrap();
        assert_eq!(finding.metrics["pairs"], serde_json::json!([["a", "c"]]));
    }

    #[test]
    fn nan_values_compare_equal_in_aligned_columns() {
        let df = DataFrame::new(vec![
            Series::new("a".into(), &[Some(f64::NAN), None, Some(3.0)]).into(),
            Series::new("b".into(), &[Some(f64::NAN), None, Some(3.0)]).into(),
        ])
        .unwrap();
        let finding = duplicate_columns(&df, &meta(), &options()).unwrap();
        assert_eq!(finding.metrics["count"], serde_json::json!(1));
    }

    #[test]
    fn every_matching_pair_is_reported() {
        let df = DataFrame::new(vec![
            Series::new("a".into(), &[1i64, 2]).into(),
            Series::new("b".into(), &[1i64, 2]).into(),
            Series::new("c".into(), &[1i64, 2]).into(),
        ])
        .unwrap();
        let finding = duplicate_columns(&df, &meta(), &options()).unwrap();
        assert_eq!(
            finding.metrics["pairs"],
            serde_json::json!([["a", "b"], ["a", "c"], ["b", "c"]])
        );
    }
}
