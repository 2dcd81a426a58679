//! Output formatting for assembled reports.
//!
//! | Format | Module | Use case |
//! |--------|--------|----------|
//! | [`Pretty`](OutputFormat::Pretty) | [`pretty`] | Eyeballing a report on a terminal |
//! | [`Json`](OutputFormat::Json)     | [`json`]   | Automation / scripting |
//!
//! Neither layout is a stable interface; the report itself is the product.

pub mod json;
pub mod pretty;

use crate::assemble::Assembly;
use crate::report::Report;

/// Supported output formats.
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    /// Each key and value followed by a separator line.
    Pretty,
    /// Machine-readable JSON.
    Json,
}

/// Formats a [`Report`] in the requested [`OutputFormat`].
///
/// `assembly` is the summary returned by the
/// [`Assembler`](crate::assemble::Assembler) run that filled `report`.
pub fn format_report(report: &Report, assembly: &Assembly, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Pretty => pretty::format(report),
        OutputFormat::Json => json::format(report, assembly),
    }
}
