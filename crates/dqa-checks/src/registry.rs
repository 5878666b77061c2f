//! The check registry: an explicit, ordered table of checks per kind.
//!
//! Checks are plain function pointers over `(data, metadata, options)`; the
//! registry is a value assembled at startup, with no global registration
//! side effects. Execution order is the registration order within each kind.

use polars::prelude::{Column, DataFrame};

use dqa_model::{AuditOptions, Finding, Metadata};

use crate::checks;

/// The four buckets a check can belong to, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    /// Whole-dataset checks needing no type inference.
    DatasetUntyped,
    /// Per-column checks needing no type inference.
    ColumnUntyped,
    /// Whole-dataset checks consuming `Metadata.types`.
    DatasetTyped,
    /// Per-column checks consuming `Metadata.types`.
    ColumnTyped,
}

impl CheckKind {
    /// All kinds in canonical execution order.
    pub const ORDER: [CheckKind; 4] = [
        CheckKind::DatasetUntyped,
        CheckKind::ColumnUntyped,
        CheckKind::DatasetTyped,
        CheckKind::ColumnTyped,
    ];

    pub fn is_column(self) -> bool {
        matches!(self, Self::ColumnUntyped | Self::ColumnTyped)
    }
}

/// A whole-dataset check.
pub type DatasetCheckFn = fn(&DataFrame, &Metadata, &AuditOptions) -> Option<Finding>;
/// A per-column check, invoked once per column in declared order.
pub type ColumnCheckFn = fn(&Column, &Metadata, &AuditOptions) -> Option<Finding>;

/// The two check shapes.
#[derive(Debug, Clone, Copy)]
pub enum CheckFn {
    Dataset(DatasetCheckFn),
    Column(ColumnCheckFn),
}

/// A named check bound to one kind.
#[derive(Debug, Clone, Copy)]
pub struct Check {
    pub name: &'static str,
    pub kind: CheckKind,
    pub func: CheckFn,
}

impl Check {
    pub fn dataset(name: &'static str, kind: CheckKind, func: DatasetCheckFn) -> Self {
        debug_assert!(!kind.is_column(), "dataset check registered as column kind");
        Self {
            name,
            kind,
            func: CheckFn::Dataset(func),
        }
    }

    pub fn column(name: &'static str, kind: CheckKind, func: ColumnCheckFn) -> Self {
        debug_assert!(kind.is_column(), "column check registered as dataset kind");
        Self {
            name,
            kind,
            func: CheckFn::Column(func),
        }
    }
}

/// Ordered buckets of checks.
#[derive(Debug, Default)]
pub struct CheckRegistry {
    dataset_untyped: Vec<Check>,
    column_untyped: Vec<Check>,
    dataset_typed: Vec<Check>,
    column_typed: Vec<Check>,
}

impl CheckRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a check to its kind's bucket.
    pub fn register(&mut self, check: Check) {
        match check.kind {
            CheckKind::DatasetUntyped => self.dataset_untyped.push(check),
            CheckKind::ColumnUntyped => self.column_untyped.push(check),
            CheckKind::DatasetTyped => self.dataset_typed.push(check),
            CheckKind::ColumnTyped => self.column_typed.push(check),
        }
    }

    /// The ordered checks of one kind.
    pub fn checks(&self, kind: CheckKind) -> &[Check] {
        match kind {
            CheckKind::DatasetUntyped => &self.dataset_untyped,
            CheckKind::ColumnUntyped => &self.column_untyped,
            CheckKind::DatasetTyped => &self.dataset_typed,
            CheckKind::ColumnTyped => &self.column_typed,
        }
    }

    pub fn len(&self) -> usize {
        self.dataset_untyped.len()
            + self.column_untyped.len()
            + self.dataset_typed.len()
            + self.column_typed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The full standard check set, assembled explicitly.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(Check::dataset(
            "duplicate_rows",
            CheckKind::DatasetUntyped,
            checks::duplicates::duplicate_rows,
        ));
        registry.register(Check::dataset(
            "duplicate_column_names",
            CheckKind::DatasetUntyped,
            checks::duplicates::duplicate_column_names,
        ));
        registry.register(Check::dataset(
            "duplicate_columns",
            CheckKind::DatasetUntyped,
            checks::duplicates::duplicate_columns,
        ));
        registry.register(Check::dataset(
            "missing_patterns",
            CheckKind::DatasetUntyped,
            checks::missing::missing_patterns,
        ));
        registry.register(Check::column(
            "missing_values",
            CheckKind::ColumnUntyped,
            checks::missing::missing_values,
        ));
        registry.register(Check::dataset(
            "primary_key_candidates",
            CheckKind::DatasetTyped,
            checks::sequence::primary_key_candidates,
        ));
        registry.register(Check::column(
            "numeric_outliers",
            CheckKind::ColumnTyped,
            checks::outliers::numeric_outliers,
        ));
        registry.register(Check::column(
            "categorical_outliers",
            CheckKind::ColumnTyped,
            checks::outliers::categorical_outliers,
        ));
        registry.register(Check::column(
            "sequence_continuity",
            CheckKind::ColumnTyped,
            checks::sequence::sequence_continuity,
        ));
        registry.register(Check::column(
            "negative_numbers",
            CheckKind::ColumnTyped,
            checks::text::negative_numbers,
        ));
        registry.register(Check::column(
            "char_length",
            CheckKind::ColumnTyped,
            checks::text::char_length,
        ));
        registry.register(Check::column(
            "categorical_typos",
            CheckKind::ColumnTyped,
            checks::text::categorical_typos,
        ));
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_is_fully_populated() {
        let registry = CheckRegistry::standard();
        assert_eq!(registry.checks(CheckKind::DatasetUntyped).len(), 4);
        assert_eq!(registry.checks(CheckKind::ColumnUntyped).len(), 1);
        assert_eq!(registry.checks(CheckKind::DatasetTyped).len(), 1);
        assert_eq!(registry.checks(CheckKind::ColumnTyped).len(), 6);
        assert_eq!(registry.len(), 12);
    }

    #[test]
    fn registration_order_is_preserved() {
        let registry = CheckRegistry::standard();
        let names: Vec<&str> = registry
            .checks(CheckKind::DatasetUntyped)
            .iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "duplicate_rows",
                "duplicate_column_names",
                "duplicate_columns",
                "missing_patterns",
            ]
        );
    }
}
