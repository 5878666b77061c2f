//! Order and uniqueness checks: near-arithmetic sequences and primary-key
//! candidates.

use std::collections::{BTreeMap, HashSet};

use polars::prelude::{AnyValue, Column, DataFrame};
use serde_json::json;

use dqa_ingest::{any_to_cell, any_to_f64};
use dqa_model::{AuditOptions, Finding, Metadata, codes};

/// Flag numeric columns that advance by a (near-)constant step.
///
/// Requires a fully populated column. When the dominant row-to-row
/// difference accounts for more than the continuity threshold of all
/// differences, the column is a sequence-id candidate; a single constant
/// difference qualifies by construction.
pub fn sequence_continuity(
    col: &Column,
    meta: &Metadata,
    options: &AuditOptions,
) -> Option<Finding> {
    if !meta.types.is_number(col.name().as_str()) || col.null_count() > 0 || col.len() < 2 {
        return None;
    }
    let values: Vec<f64> = (0..col.len())
        .filter_map(|idx| any_to_f64(col.get(idx).unwrap_or(AnyValue::Null)))
        .collect();
    if values.len() != col.len() {
        return None;
    }

    // Key differences by bit pattern so float steps bucket exactly.
    let mut counts: BTreeMap<u64, (f64, usize)> = BTreeMap::new();
    for pair in values.windows(2) {
        let diff = pair[1] - pair[0];
        let entry = counts.entry(diff.to_bits()).or_insert((diff, 0));
        entry.1 += 1;
    }
    let total = values.len() - 1;
    let (step, dominant) = counts.values().copied().max_by(|a, b| a.1.cmp(&b.1))?;
    let share = dominant as f64 / total as f64;
    if counts.len() > 1 && share <= options.continuity_threshold {
        return None;
    }
    Some(
        Finding::new(
            codes::SEQUENCE_CONTINUITY,
            format!(
                "{}: near-arithmetic sequence with step {step}",
                col.name()
            ),
        )
        .with_metric("step", step)
        .with_metric("share", share),
    )
}

/// List fully populated columns whose values are all distinct.
pub fn primary_key_candidates(
    df: &DataFrame,
    _meta: &Metadata,
    _options: &AuditOptions,
) -> Option<Finding> {
    if df.height() == 0 {
        return None;
    }
    let mut candidates: Vec<String> = Vec::new();
    for col in df.get_columns() {
        if col.null_count() > 0 {
            continue;
        }
        let mut seen: HashSet<String> = HashSet::with_capacity(col.len());
        let mut distinct = true;
        for idx in 0..col.len() {
            let Some(value) = any_to_cell(col.get(idx).unwrap_or(AnyValue::Null)) else {
                distinct = false;
                break;
            };
            if !seen.insert(value) {
                distinct = false;
                break;
            }
        }
        if distinct {
            candidates.push(col.name().to_string());
        }
    }
    if candidates.is_empty() {
        return None;
    }
    Some(
        Finding::new(
            codes::PRIMARY_KEY_CANDIDATES,
            format!(
                "{} primary key candidates: {}",
                candidates.len(),
                candidates.join(", ")
            ),
        )
        .with_metric("candidates", json!(candidates))
        .with_metric("count", candidates.len()),
    )
}
