//! Human-readable dump: every key with its quoted value, then a separator.

use crate::report::{Report, KEY_INVALID_GRUB_SCRIPT, KEY_PROBLEM_TYPE};
use colored::Colorize;

/// Separator printed after each entry.
pub const SEPARATOR: &str = "========================================";

/// Formats a [`Report`] as `Key: "value"` blocks.
///
/// `ProblemType` comes first, the remaining keys follow in sorted order.
/// The `InvalidGrubScript` key is highlighted in red.
pub fn format(report: &Report) -> String {
    let mut out = String::new();

    push_entry(&mut out, KEY_PROBLEM_TYPE, &report.problem_type.to_string());
    for (key, value) in report.iter() {
        push_entry(&mut out, key, value);
    }

    out
}

fn push_entry(out: &mut String, key: &str, value: &str) {
    let key = if key == KEY_INVALID_GRUB_SCRIPT {
        key.red().bold().to_string()
    } else {
        key.bold().to_string()
    };
    out.push_str(&format!("{key}: \"{value}\"\n"));
    out.push_str(&format!("{}\n", SEPARATOR.dimmed()));
}
