//! Finding output: plain lines, a summary table, and the JSON report.

use anyhow::Result;
use chrono::Utc;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use dqa_model::Finding;

const REPORT_SCHEMA: &str = "dqa.audit-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

/// Print each finding as `code: message`, one per line, in canonical order.
pub fn print_findings(findings: &[Finding]) {
    for finding in findings {
        println!("{}: {}", finding.code, finding.message);
    }
}

/// Print a per-code summary table of the findings.
pub fn print_summary(findings: &[Finding]) {
    if findings.is_empty() {
        println!("no issues found");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Column"),
        header_cell("Message"),
    ]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Left);
    }
    for finding in findings {
        table.add_row(vec![
            Cell::new(&finding.code).fg(Color::Yellow),
            match &finding.column {
                Some(name) => Cell::new(name),
                None => Cell::new("-").fg(Color::DarkGrey),
            },
            Cell::new(&finding.message),
        ]);
    }
    println!();
    println!("{table}");
    println!(
        "{} finding{}",
        findings.len(),
        if findings.len() == 1 { "" } else { "s" }
    );
}

#[derive(Debug, Serialize)]
pub struct AuditReportPayload<'a> {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet: Option<&'a str>,
    pub finding_count: usize,
    pub findings: &'a [Finding],
}

/// Serialize the findings as a pretty-printed JSON report.
pub fn render_json(source: &str, sheet: Option<&str>, findings: &[Finding]) -> Result<String> {
    let payload = AuditReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        source: source.to_string(),
        sheet,
        finding_count: findings.len(),
        findings,
    };
    Ok(serde_json::to_string_pretty(&payload)?)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
