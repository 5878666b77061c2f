//! Text heuristics: overlong values, suspicious negatives, and probable
//! typo pairs among categorical values.

use std::collections::BTreeMap;

use polars::prelude::{AnyValue, Column};
use serde_json::json;

use dqa_ingest::{any_to_cell, any_to_f64};
use dqa_model::{AuditOptions, Finding, Metadata, codes};

use crate::util::edit_distance;

/// Flag rows whose rendered value exceeds the configured length.
pub fn char_length(col: &Column, meta: &Metadata, options: &AuditOptions) -> Option<Finding> {
    if meta.types.is_number(col.name().as_str()) {
        return None;
    }
    let mut rows: Vec<usize> = Vec::new();
    for idx in 0..col.len() {
        if let Some(value) = any_to_cell(col.get(idx).unwrap_or(AnyValue::Null))
            && value.chars().count() > options.char_length_max
        {
            rows.push(idx);
        }
    }
    if rows.is_empty() {
        return None;
    }
    Some(
        Finding::new(
            codes::CHAR_LENGTH,
            format!(
                "{}: {} values longer than {} characters",
                col.name(),
                rows.len(),
                options.char_length_max
            ),
        )
        .with_metric("rows", json!(rows))
        .with_metric("count", rows.len()),
    )
}

/// Flag numeric columns where a small minority of values is negative.
///
/// A handful of negatives in an otherwise positive column reads as a sign
/// error, not a distribution; columns that are substantially negative are
/// left alone.
pub fn negative_numbers(col: &Column, meta: &Metadata, options: &AuditOptions) -> Option<Finding> {
    if !meta.types.is_number(col.name().as_str()) {
        return None;
    }
    let values: Vec<f64> = (0..col.len())
        .filter_map(|idx| any_to_f64(col.get(idx).unwrap_or(AnyValue::Null)))
        .collect();
    if values.is_empty() {
        return None;
    }
    let negatives = values.iter().filter(|&&v| v < 0.0).count();
    let fraction = negatives as f64 / values.len() as f64;
    if negatives == 0 || fraction >= options.negative_fraction {
        return None;
    }
    Some(
        Finding::new(
            codes::NEGATIVE_NUMBERS,
            format!(
                "{}: {negatives} negative values in a mostly positive column",
                col.name()
            ),
        )
        .with_metric("negatives", negatives)
        .with_metric("total", values.len())
        .with_metric("fraction", fraction),
    )
}

/// Report pairs of categorical values within a small edit distance.
///
/// Runs on group columns that are neither dates nor free text. Values of
/// `typo_min_length` characters or fewer are skipped (short-token distances
/// are noise), and pairs are pruned by length difference before the DP runs.
pub fn categorical_typos(col: &Column, meta: &Metadata, options: &AuditOptions) -> Option<Finding> {
    let name = col.name().as_str();
    if !meta.types.is_group(name) || meta.types.is_date(name) || meta.types.is_keyword(name) {
        return None;
    }
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for idx in 0..col.len() {
        if let Some(value) = any_to_cell(col.get(idx).unwrap_or(AnyValue::Null)) {
            *counts.entry(value).or_default() += 1;
        }
    }
    let values: Vec<(String, usize)> = counts
        .into_keys()
        .map(|value| {
            let length = value.chars().count();
            (value, length)
        })
        .filter(|(_, length)| *length > options.typo_min_length)
        .collect();
    if values.len() < 2 {
        return None;
    }

    let mut pairs: Vec<(String, String)> = Vec::new();
    for (pos, (left, left_len)) in values.iter().enumerate() {
        for (right, right_len) in &values[pos + 1..] {
            if left_len.abs_diff(*right_len) >= options.typo_distance {
                continue;
            }
            if edit_distance(left, right) < options.typo_distance {
                pairs.push((left.clone(), right.clone()));
            }
        }
    }
    if pairs.is_empty() {
        return None;
    }
    Some(
        Finding::new(
            codes::CATEGORICAL_TYPOS,
            format!("{}: {} probable typo pairs", col.name(), pairs.len()),
        )
        .with_metric("pairs", json!(pairs))
        .with_metric("count", pairs.len()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dqa_model::ColumnTypes;
    use polars::prelude::{NamedFrom, Series};

    fn group_meta(name: &str) -> Metadata {
        let mut types = ColumnTypes::default();
        types.groups.insert(name.to_string());
        Metadata::new(Vec::new(), types)
    }

    fn numeric_meta(name: &str) -> Metadata {
        let mut types = ColumnTypes::default();
        types.numbers.insert(name.to_string());
        Metadata::new(Vec::new(), types)
    }

    #[test]
    fn flags_overlong_values() {
        let long = "x".repeat(60);
        let col: Column = Series::new("notes".into(), &[Some("short"), Some(long.as_str()), None])
            .into();
        let finding = char_length(&col, &group_meta("notes"), &AuditOptions::default()).unwrap();
        assert_eq!(finding.metrics["rows"], serde_json::json!([1]));
    }

    #[test]
    fn char_length_threshold_is_configurable() {
        let col: Column = Series::new("notes".into(), &["abcdef"]).into();
        let options = AuditOptions::default().char_length_max(5);
        let finding = char_length(&col, &group_meta("notes"), &options).unwrap();
        assert_eq!(finding.metrics["count"], serde_json::json!(1));
    }

    #[test]
    fn minority_negatives_are_flagged() {
        let mut values: Vec<f64> = (1..=99).map(f64::from).collect();
        values.push(-5.0);
        let col: Column = Series::new("amount".into(), &values).into();
        let options = AuditOptions::default().negative_fraction(0.02);
        let finding = negative_numbers(&col, &numeric_meta("amount"), &options).unwrap();
        assert_eq!(finding.metrics["negatives"], serde_json::json!(1));
    }

    #[test]
    fn substantially_negative_columns_pass() {
        let col: Column = Series::new("delta".into(), &[-1.0f64, -2.0, 3.0, 4.0]).into();
        assert!(
            negative_numbers(&col, &numeric_meta("delta"), &AuditOptions::default()).is_none()
        );
    }

    #[test]
    fn all_positive_columns_pass() {
        let col: Column = Series::new("amount".into(), &[1.0f64, 2.0]).into();
        assert!(
            negative_numbers(&col, &numeric_meta("amount"), &AuditOptions::default()).is_none()
        );
    }

    #[test]
    fn close_values_pair_up() {
        let col: Column = Series::new("city".into(), &["London", "Lundon", "Berlin", "Paris"])
            .into();
        let finding =
            categorical_typos(&col, &group_meta("city"), &AuditOptions::default()).unwrap();
        assert_eq!(
            finding.metrics["pairs"],
            serde_json::json!([["London", "Lundon"]])
        );
        assert_eq!(finding.metrics["count"], serde_json::json!(1));
    }

    #[test]
    fn short_tokens_are_ignored() {
        let col: Column = Series::new("code".into(), &["abcde", "abcdf"]).into();
        assert!(categorical_typos(&col, &group_meta("code"), &AuditOptions::default()).is_none());
    }

    #[test]
    fn date_and_keyword_columns_are_excluded() {
        let col: Column = Series::new("d".into(), &["2024-01-01", "2024-01-02"]).into();
        let mut types = ColumnTypes::default();
        types.groups.insert("d".to_string());
        types.dates.insert("d".to_string());
        let metadata = Metadata::new(Vec::new(), types);
        assert!(categorical_typos(&col, &metadata, &AuditOptions::default()).is_none());
    }
}
