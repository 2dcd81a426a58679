//! Line-level redaction of configuration files before they are attached.
//!
//! `/etc/default/grub` may carry `password` directives for the boot menu.
//! Any line beginning with the literal `password` is replaced wholesale by
//! [`REDACTION_MARKER`]; the line terminator is kept so the rest of the file
//! keeps its shape.

use crate::error::{Error, Result};
use crate::host::ReportHost;
use crate::report::Report;
use std::path::Path;

/// Replacement for every redacted line.
pub const REDACTION_MARKER: &str = "### PASSWORD LINE REMOVED ###";

/// Prefix that marks a line as sensitive. Case-sensitive, anchored at column 0.
pub const SENSITIVE_PREFIX: &str = "password";

/// Returns `text` with every sensitive line replaced by [`REDACTION_MARKER`].
///
/// Idempotent: the marker itself is never sensitive.
///
/// ```
/// use grub_evidence::sanitize::{sanitize, REDACTION_MARKER};
///
/// let out = sanitize("password secret123\nGRUB_TIMEOUT=5\n");
/// assert_eq!(out, format!("{REDACTION_MARKER}\nGRUB_TIMEOUT=5\n"));
/// assert_eq!(sanitize(&out), out);
/// ```
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        if line.starts_with(SENSITIVE_PREFIX) {
            out.push_str(REDACTION_MARKER);
            out.push_str(line_terminator(line));
        } else {
            out.push_str(line);
        }
    }
    out
}

fn line_terminator(line: &str) -> &str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

/// Reads `path` and returns its sanitized text, or `None` if it does not exist.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn sanitized_contents(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = std::fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(sanitize(&String::from_utf8_lossy(&bytes))))
}

/// Attaches the sanitized contents of `path` under `key`, or under the
/// host-derived key when `key` is `None`.
///
/// A missing file attaches nothing. Returns the key used.
pub fn attach_file_filtered<H: ReportHost + ?Sized>(
    report: &mut Report,
    path: &Path,
    key: Option<&str>,
    host: &H,
) -> Result<Option<String>> {
    let Some(text) = sanitized_contents(path)? else {
        tracing::debug!(path = %path.display(), "nothing to sanitize, file missing");
        return Ok(None);
    };
    let key = key.map_or_else(|| host.derive_key(path), str::to_string);
    Ok(Some(report.insert(key, text)))
}
