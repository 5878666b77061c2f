//! The check library.
//!
//! Each module implements one family of diagnostics. Checks are pure
//! functions over `(data, metadata, options)` returning `Option<Finding>`;
//! absence is the "no issue" signal. Degenerate inputs (empty columns,
//! single-value columns, no numeric data) yield `None`, never a fault.

pub mod duplicates;
pub mod missing;
pub mod outliers;
pub mod sequence;
pub mod text;

use polars::prelude::{AnyValue, Column};

use dqa_model::AuditOptions;

/// Whether a cell counts as missing: structurally null, or a string cell
/// equal to one of the configured sentinel values.
pub(crate) fn is_missing_cell(col: &Column, idx: usize, options: &AuditOptions) -> bool {
    match col.get(idx).unwrap_or(AnyValue::Null) {
        AnyValue::Null => true,
        AnyValue::String(s) => options.missing_values.contains(s),
        AnyValue::StringOwned(s) => options.missing_values.contains(s.as_str()),
        _ => false,
    }
}
