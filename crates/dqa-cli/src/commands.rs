//! Audit command: load the input and run the pipeline.

use anyhow::{Context, Result};

use dqa_checks::audit_loaded;
use dqa_ingest::{LoadOptions, LoadedTable, SourceFormat};
use dqa_model::{AuditOptions, Finding};

use crate::cli::{Cli, FormatArg};

/// The outcome of one audit run.
pub struct AuditRun {
    pub findings: Vec<Finding>,
    pub sheet: Option<String>,
}

pub fn run_audit(args: &Cli) -> Result<AuditRun> {
    let table = load_input(args)?;
    let findings = audit_loaded(&table, &AuditOptions::default());
    Ok(AuditRun {
        findings,
        sheet: table.sheet,
    })
}

fn load_input(args: &Cli) -> Result<LoadedTable> {
    let mut options = LoadOptions::new();
    if let Some(format) = args.format {
        options = options.format(match format {
            FormatArg::Csv => SourceFormat::Csv,
            FormatArg::Excel => SourceFormat::Excel,
        });
    }
    if let Some(sheet) = &args.sheet {
        options = options.sheet(sheet.clone());
    }
    if let Some(encoding) = &args.encoding {
        options = options.encoding(encoding.clone());
    }
    dqa_ingest::load(&args.input, &options)
        .with_context(|| format!("audit input {}", args.input.display()))
}
