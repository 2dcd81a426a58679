//! JSON output formatter.
//!
//! Wraps the report with a generation timestamp and the invalid scripts as
//! an array taken from the [`Assembly`], so consumers never have to split
//! `InvalidGrubScript` (whose paths may themselves contain spaces).

use crate::assemble::Assembly;
use crate::report::Report;
use std::path::PathBuf;

#[derive(serde::Serialize)]
struct JsonOutput<'a> {
    generated_at: String,
    passed: bool,
    scripts_checked: usize,
    invalid_scripts: &'a [PathBuf],
    report: &'a Report,
}

/// Formats a [`Report`] and the [`Assembly`] that produced it as
/// pretty-printed JSON.
///
/// # Panics
///
/// Panics if the report cannot be serialized (should not happen: every key
/// and value is a string).
pub fn format(report: &Report, assembly: &Assembly) -> String {
    let output = JsonOutput {
        generated_at: chrono::Utc::now().to_rfc3339(),
        passed: assembly.passed(),
        scripts_checked: assembly.scripts_checked,
        invalid_scripts: assembly.invalid.paths(),
        report,
    };

    serde_json::to_string_pretty(&output).expect("JSON serialization failed")
}
