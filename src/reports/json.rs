//! JSON reporter
//!
//! Wraps the batch results with tool metadata and a summary block.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{ReportConfig, ReportFormat, ReportGenerator};
use crate::analyzer::{BatchReport, FileAnalysis};

#[derive(Serialize)]
struct JsonSummary {
    files_analyzed: usize,
    files_skipped: usize,
    files_with_duplicates: usize,
    total_lines: usize,
    duplicate_lines: usize,
    total_entries: usize,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    tool: &'static str,
    version: &'static str,
    generated_at: DateTime<Utc>,
    summary: JsonSummary,
    files: &'a [FileAnalysis],
    skipped: &'a [(std::path::PathBuf, String)],
}

pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_report(&self, report: &BatchReport, _config: &ReportConfig) -> Result<String> {
        let document = JsonReport {
            tool: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            generated_at: Utc::now(),
            summary: JsonSummary {
                files_analyzed: report.files.len(),
                files_skipped: report.skipped.len(),
                files_with_duplicates: report.files_with_duplicates(),
                total_lines: report.total_lines(),
                duplicate_lines: report.duplicate_lines(),
                total_entries: report.total_entries(),
            },
            files: &report.files,
            skipped: &report.skipped,
        };

        Ok(serde_json::to_string_pretty(&document)?)
    }

    fn supported_format() -> ReportFormat {
        ReportFormat::Json
    }
}
