//! Property tests: the duplicate-row count matches a brute-force reference,
//! and outlier counts match the reported fences.

use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use proptest::prelude::*;

use dqa_checks::checks::{duplicates, outliers};
use dqa_model::{AuditOptions, ColumnTypes, Metadata};

fn dataset_strategy() -> impl Strategy<Value = Vec<Vec<Option<i64>>>> {
    (1usize..=3, 1usize..=15).prop_flat_map(|(width, height)| {
        prop::collection::vec(
            prop::collection::vec(prop::option::of(0i64..3), height),
            width,
        )
    })
}

fn to_frame(columns: &[Vec<Option<i64>>]) -> DataFrame {
    let series: Vec<Column> = columns
        .iter()
        .enumerate()
        .map(|(idx, values)| Series::new(format!("c{idx}").as_str().into(), values).into())
        .collect();
    DataFrame::new(series).unwrap()
}

/// O(n^2) reference: a row is a duplicate when an earlier row matches it in
/// every column, null cells included.
fn brute_force_duplicates(columns: &[Vec<Option<i64>>]) -> usize {
    let height = columns[0].len();
    let mut duplicates = 0;
    for i in 0..height {
        for j in 0..i {
            if columns.iter().all(|col| col[i] == col[j]) {
                duplicates += 1;
                break;
            }
        }
    }
    duplicates
}

proptest! {
    #[test]
    fn duplicate_rows_match_brute_force(columns in dataset_strategy()) {
        let df = to_frame(&columns);
        let expected = brute_force_duplicates(&columns);
        let reported = duplicates::duplicate_rows(&df, &Metadata::default(), &AuditOptions::default())
            .map(|finding| finding.metrics["duplicates"].as_u64().unwrap() as usize)
            .unwrap_or(0);
        prop_assert_eq!(reported, expected);
    }

    #[test]
    fn outlier_count_matches_reported_fences(values in prop::collection::vec(-1000.0f64..1000.0, 1..60)) {
        let col: Column = Series::new("x".into(), &values).into();
        let mut types = ColumnTypes::default();
        types.numbers.insert("x".to_string());
        let metadata = Metadata::new(Vec::new(), types);

        match outliers::numeric_outliers(&col, &metadata, &AuditOptions::default()) {
            Some(finding) => {
                let low = finding.metrics["low"].as_f64().unwrap();
                let high = finding.metrics["high"].as_f64().unwrap();
                let expected = values.iter().filter(|&&v| v < low || v > high).count();
                let reported = finding.metrics["outliers"].as_u64().unwrap() as usize;
                prop_assert_eq!(reported, expected);
                prop_assert!(reported > 0);
            }
            None => {
                // No finding must mean no values outside the computed fences.
                let mut sorted = values.clone();
                sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
                let q1 = percentile(&sorted, 0.25);
                let q3 = percentile(&sorted, 0.75);
                let iqr = q3 - q1;
                let low = q1 - 1.5 * iqr;
                let high = q3 + 1.5 * iqr;
                let outside = values.iter().filter(|&&v| v < low || v > high).count();
                prop_assert_eq!(outside, 0);
            }
        }
    }
}

/// Reference quantile with linear interpolation, written independently of
/// the implementation under test.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = q * (n as f64 - 1.0);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
