//! Statistical outlier checks: Tukey fences for numeric columns and
//! frequency-cliff detection for categorical columns.

use std::collections::BTreeMap;

use polars::prelude::{AnyValue, Column};

use dqa_ingest::{any_to_cell, any_to_f64};
use dqa_model::{AuditOptions, Finding, Metadata, codes};

use crate::util::quantile;

/// Count numeric values outside the Tukey fence.
///
/// Fences default to Q1 - 1.5*IQR and Q3 + 1.5*IQR and can be overridden.
/// Values strictly below the low fence and strictly above the high fence
/// count; the finding is emitted when the total exceeds the configured
/// maximum. Columns without numeric data yield nothing.
pub fn numeric_outliers(col: &Column, meta: &Metadata, options: &AuditOptions) -> Option<Finding> {
    if !meta.types.is_number(col.name().as_str()) {
        return None;
    }
    let values: Vec<f64> = (0..col.len())
        .filter_map(|idx| any_to_f64(col.get(idx).unwrap_or(AnyValue::Null)))
        .filter(|v| v.is_finite())
        .collect();
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let q1 = quantile(&sorted, 0.25);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let low = options.outlier_low.unwrap_or(q1 - 1.5 * iqr);
    let high = options.outlier_high.unwrap_or(q3 + 1.5 * iqr);

    let lower = values.iter().filter(|&&v| v < low).count();
    let upper = values.iter().filter(|&&v| v > high).count();
    let outliers = lower + upper;
    if outliers <= options.outlier_max {
        return None;
    }
    Some(
        Finding::new(
            codes::NUMERIC_OUTLIERS,
            format!("{}: {outliers} outlier values", col.name()),
        )
        .with_metric("outliers", outliers)
        .with_metric("lower", lower)
        .with_metric("upper", upper)
        .with_metric("low", low)
        .with_metric("high", high),
    )
}

/// Detect long-tail categorical values past a frequency cliff.
///
/// Frequencies are sorted descending; the cliff is the first rank where the
/// relative drop from the previous rank exceeds 50%. Every distinct value at
/// or below the cliff frequency is an outlier. Single-value columns yield
/// nothing.
pub fn categorical_outliers(
    col: &Column,
    meta: &Metadata,
    _options: &AuditOptions,
) -> Option<Finding> {
    if !meta.types.is_group(col.name().as_str()) {
        return None;
    }
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for idx in 0..col.len() {
        if let Some(value) = any_to_cell(col.get(idx).unwrap_or(AnyValue::Null)) {
            *counts.entry(value).or_default() += 1;
        }
    }
    if counts.len() < 2 {
        return None;
    }
    // Descending by frequency; BTreeMap iteration makes ties deterministic.
    let mut frequencies: Vec<usize> = counts.into_values().collect();
    frequencies.sort_unstable_by(|a, b| b.cmp(a));

    let cliff = frequencies.windows(2).find_map(|pair| {
        let (prev, next) = (pair[0] as f64, pair[1] as f64);
        ((next - prev) / prev < -0.5).then_some(pair[1])
    })?;
    let outliers = frequencies.iter().filter(|&&f| f <= cliff).count();
    Some(
        Finding::new(
            codes::CATEGORICAL_OUTLIERS,
            format!("{}: {outliers} long-tail values", col.name()),
        )
        .with_metric("outliers", outliers)
        .with_metric("cliff_frequency", cliff),
    )
}
