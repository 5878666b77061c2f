//! Audit pipeline: canonical-order execution with per-check fault isolation.

use std::panic::{AssertUnwindSafe, catch_unwind};

use polars::prelude::DataFrame;

use dqa_ingest::LoadedTable;
use dqa_model::{AuditOptions, Finding, Metadata, codes};

use crate::classify::classify;
use crate::registry::{CheckFn, CheckKind, CheckRegistry};

/// Audit a dataset: classify, then run the standard registry.
///
/// `header` is the raw column-name sequence as read from the source; it may
/// contain duplicates and is only consumed through [`Metadata`].
pub fn audit(df: &DataFrame, header: &[String], options: &AuditOptions) -> Vec<Finding> {
    let types = classify(df, options);
    let metadata = Metadata::new(header.to_vec(), types);
    run(&CheckRegistry::standard(), df, &metadata, options)
}

/// Audit a loaded table, threading the loader's sheet context through.
pub fn audit_loaded(table: &LoadedTable, options: &AuditOptions) -> Vec<Finding> {
    let types = classify(&table.frame, options);
    let mut metadata = Metadata::new(table.header.clone(), types);
    if let Some(sheet) = &table.sheet {
        metadata = metadata.with_sheet(sheet.clone());
    }
    run(&CheckRegistry::standard(), &table.frame, &metadata, options)
}

/// Execute a registry against a dataset in canonical order.
///
/// Order is fixed for reproducibility: dataset-untyped, column-untyped,
/// dataset-typed, column-typed; within a kind, registration order; within a
/// column check, the dataset's declared column order. A check returning
/// `None` contributes nothing; a check that panics contributes a
/// `check-failed` finding and the run continues.
pub fn run(
    registry: &CheckRegistry,
    df: &DataFrame,
    metadata: &Metadata,
    options: &AuditOptions,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    for kind in CheckKind::ORDER {
        for check in registry.checks(kind) {
            tracing::debug!(check = check.name, kind = ?kind, "running check");
            match check.func {
                CheckFn::Dataset(func) => {
                    let result = catch_unwind(AssertUnwindSafe(|| func(df, metadata, options)));
                    append(&mut findings, check.name, None, result);
                }
                CheckFn::Column(func) => {
                    for col in df.get_columns() {
                        let result =
                            catch_unwind(AssertUnwindSafe(|| func(col, metadata, options)));
                        append(&mut findings, check.name, Some(col.name().as_str()), result);
                    }
                }
            }
        }
    }
    tracing::info!(
        rows = df.height(),
        columns = df.width(),
        findings = findings.len(),
        "audit complete"
    );
    findings
}

fn append(
    findings: &mut Vec<Finding>,
    check: &'static str,
    column: Option<&str>,
    result: std::thread::Result<Option<Finding>>,
) {
    match result {
        Ok(Some(finding)) => {
            let finding = match column {
                Some(name) => finding.with_column(name),
                None => finding,
            };
            findings.push(finding);
        }
        Ok(None) => {}
        Err(_) => {
            tracing::warn!(check, column, "check faulted; continuing");
            let mut finding = Finding::new(
                codes::CHECK_FAILED,
                match column {
                    Some(name) => format!("check {check} failed on column {name}"),
                    None => format!("check {check} failed"),
                },
            )
            .with_metric("check", check);
            if let Some(name) = column {
                finding = finding.with_column(name);
            }
            findings.push(finding);
        }
    }
}
