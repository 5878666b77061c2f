//! End-to-end pipeline tests over handcrafted datasets.

use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use dqa_checks::{Check, CheckKind, CheckRegistry, audit, classify, run};
use dqa_model::{AuditOptions, Finding, Metadata, codes};

fn frame(columns: Vec<Column>) -> DataFrame {
    DataFrame::new(columns).unwrap()
}

fn header_of(df: &DataFrame) -> Vec<String> {
    df.get_column_names().iter().map(|s| s.to_string()).collect()
}

fn codes_of(findings: &[Finding]) -> Vec<&str> {
    findings.iter().map(|f| f.code.as_str()).collect()
}

/// 5 rows x 4 columns: one exact duplicate row, one renamed duplicate
/// column, one typo pair at edit distance 1. The full pipeline must report
/// exactly those three problems, in canonical order.
fn round_trip_frame() -> DataFrame {
    frame(vec![
        Series::new("x".into(), &[1i64, 2, 3, 1, 5]).into(),
        Series::new("y".into(), &[1i64, 2, 3, 1, 5]).into(),
        Series::new(
            "city".into(),
            &["London", "Lundon", "Lundon", "London", "Paris"],
        )
        .into(),
        Series::new("n".into(), &[7i64, 8, 9, 7, 11]).into(),
    ])
}

#[test]
fn round_trip_reports_exactly_the_seeded_problems() {
    let df = round_trip_frame();
    let findings = audit(&df, &header_of(&df), &AuditOptions::default());

    assert_eq!(
        codes_of(&findings),
        vec![
            codes::DUPLICATE_ROWS,
            codes::DUPLICATE_COLUMNS,
            codes::CATEGORICAL_TYPOS,
        ]
    );

    assert_eq!(findings[0].metrics["duplicates"], serde_json::json!(1));
    assert_eq!(
        findings[1].metrics["pairs"],
        serde_json::json!([["x", "y"]])
    );
    assert_eq!(findings[2].column.as_deref(), Some("city"));
    assert_eq!(
        findings[2].metrics["pairs"],
        serde_json::json!([["London", "Lundon"]])
    );
}

#[test]
fn sequential_integers_are_continuous_and_key_candidates() {
    let values: Vec<i64> = (0..1000).collect();
    let df = frame(vec![Series::new("id".into(), &values).into()]);
    let findings = audit(&df, &header_of(&df), &AuditOptions::default());
    let found = codes_of(&findings);

    assert!(found.contains(&codes::PRIMARY_KEY_CANDIDATES));
    assert!(found.contains(&codes::SEQUENCE_CONTINUITY));
    // Dataset-typed bucket runs before column-typed.
    let key_pos = found
        .iter()
        .position(|&c| c == codes::PRIMARY_KEY_CANDIDATES)
        .unwrap();
    let seq_pos = found
        .iter()
        .position(|&c| c == codes::SEQUENCE_CONTINUITY)
        .unwrap();
    assert!(key_pos < seq_pos);
}

#[test]
fn one_duplicate_value_drops_the_key_candidate_but_not_continuity() {
    let mut values: Vec<i64> = (0..1000).collect();
    values[999] = 998;
    let df = frame(vec![Series::new("id".into(), &values).into()]);
    let findings = audit(&df, &header_of(&df), &AuditOptions::default());
    let found = codes_of(&findings);

    assert!(!found.contains(&codes::PRIMARY_KEY_CANDIDATES));
    assert!(found.contains(&codes::SEQUENCE_CONTINUITY));
}

#[test]
fn audit_is_idempotent() {
    let df = round_trip_frame();
    let header = header_of(&df);
    let options = AuditOptions::default();
    let first = audit(&df, &header, &options);
    let second = audit(&df, &header, &options);
    assert_eq!(first, second);
}

#[test]
fn duplicate_header_names_surface_through_metadata() {
    let df = frame(vec![
        Series::new("id".into(), &[1i64, 2]).into(),
        Series::new("id_2".into(), &[3i64, 4]).into(),
    ]);
    // The raw header kept its duplicates even though frame names are unique.
    let header = vec!["id".to_string(), "id".to_string()];
    let findings = audit(&df, &header, &AuditOptions::default());
    let names = findings
        .iter()
        .find(|f| f.code == codes::DUPLICATE_COLUMN_NAMES)
        .unwrap();
    assert_eq!(names.metrics["names"], serde_json::json!(["id"]));
}

fn panicking_check(
    _df: &DataFrame,
    _meta: &Metadata,
    _options: &AuditOptions,
) -> Option<Finding> {
    panic!("boom");
}

fn counting_check(df: &DataFrame, _meta: &Metadata, _options: &AuditOptions) -> Option<Finding> {
    Some(Finding::new("row-count", format!("{} rows", df.height())).with_metric("rows", df.height()))
}

#[test]
fn a_faulting_check_does_not_abort_the_run() {
    let mut registry = CheckRegistry::new();
    registry.register(Check::dataset(
        "explode",
        CheckKind::DatasetUntyped,
        panicking_check,
    ));
    registry.register(Check::dataset(
        "row_count",
        CheckKind::DatasetUntyped,
        counting_check,
    ));

    let df = frame(vec![Series::new("a".into(), &[1i64, 2]).into()]);
    let options = AuditOptions::default();
    let metadata = Metadata::new(header_of(&df), classify(&df, &options));
    let findings = run(&registry, &df, &metadata, &options);

    assert_eq!(codes_of(&findings), vec![codes::CHECK_FAILED, "row-count"]);
    assert_eq!(findings[0].metrics["check"], serde_json::json!("explode"));
}

#[test]
fn clean_data_yields_no_findings() {
    let df = frame(vec![
        Series::new("name".into(), &["ada", "grace", "ada", "grace"]).into(),
        Series::new("score".into(), &[10.0f64, 12.0, 12.0, 10.0]).into(),
    ]);
    let findings = audit(&df, &header_of(&df), &AuditOptions::default());
    assert!(findings.is_empty(), "unexpected findings: {findings:?}");
}
