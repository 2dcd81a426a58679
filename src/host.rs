//! The two primitives the bug-reporting host provides.
//!
//! Everything else about the host (UI, submission, problem classification)
//! stays outside this crate. [`LocalHost`] reads straight from the local
//! filesystem and is what the binary uses.

use crate::report::Report;
use std::path::Path;

/// File attachment and key derivation, as supplied by the reporting host.
pub trait ReportHost {
    /// Attaches the raw contents of `path` under `key`, or under
    /// [`derive_key`](ReportHost::derive_key) when `key` is `None`.
    ///
    /// Does nothing if `path` does not exist. Returns the key used, if any.
    fn attach_file(&self, report: &mut Report, path: &Path, key: Option<&str>) -> Option<String>;

    /// Maps a filesystem path to a report key. Must be deterministic.
    fn derive_key(&self, path: &Path) -> String;
}

/// Host primitives backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalHost;

impl ReportHost for LocalHost {
    fn attach_file(&self, report: &mut Report, path: &Path, key: Option<&str>) -> Option<String> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "not attaching missing file");
            return None;
        }

        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read file for attachment");
                return None;
            }
        };

        let key = key.map_or_else(|| self.derive_key(path), str::to_string);
        Some(report.insert(key, String::from_utf8_lossy(&bytes)))
    }

    fn derive_key(&self, path: &Path) -> String {
        path_to_key(path)
    }
}

/// Derives a report key from a path.
///
/// `#`, `/`, `-`, `_` and `+` become `.`, spaces become `_`, any other
/// character outside `[A-Za-z0-9._-]` is dropped and leading dots are
/// trimmed.
///
/// The host's own mapping keeps the leading dot (`/etc/grub.d/x` becomes
/// `.etc.grub.d.x` there). Trimming it here is intentional; keys stay
/// deterministic, so only their spelling differs.
///
/// ```
/// use std::path::Path;
/// use grub_evidence::host::path_to_key;
///
/// assert_eq!(path_to_key(Path::new("/etc/grub.d/05_debian_theme")), "etc.grub.d.05.debian.theme");
/// assert_eq!(path_to_key(Path::new("/etc/grub.d/my script")), "etc.grub.d.my_script");
/// ```
pub fn path_to_key(path: &Path) -> String {
    let key: String = path
        .to_string_lossy()
        .chars()
        .filter_map(|c| match c {
            '#' | '/' | '-' | '_' | '+' => Some('.'),
            ' ' => Some('_'),
            c if c.is_ascii_alphanumeric() || c == '.' => Some(c),
            _ => None,
        })
        .collect();

    let key = key.trim_start_matches('.');
    if key.is_empty() {
        // Only reachable for paths such as "/" or "///".
        "root".to_string()
    } else {
        key.to_string()
    }
}
