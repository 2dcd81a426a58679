//! Parse-only shell syntax checking.
//!
//! Runs `<interpreter> -n <script>` with stdout and stderr discarded. The
//! shell parses the whole file without executing anything; exit status 0
//! means the parser accepted it.
//!
//! A rejected script is an ordinary outcome and comes back as
//! [`SyntaxVerdict::Invalid`]. Only a failure to start the interpreter is an
//! [`Error`].

use crate::config::DEFAULT_SHELL;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Outcome of a syntax-only parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxVerdict {
    Valid,
    Invalid,
}

impl SyntaxVerdict {
    pub fn is_valid(self) -> bool {
        matches!(self, SyntaxVerdict::Valid)
    }
}

/// Anything that can judge a script's syntax.
///
/// The assembler only depends on this trait, so a host can swap in another
/// checker (or a fake in tests).
pub trait SyntaxChecker {
    /// Parses `path` without executing it.
    fn check(&self, path: &Path) -> Result<SyntaxVerdict>;

    /// Boolean form of [`check`](SyntaxChecker::check).
    fn is_valid_syntax(&self, path: &Path) -> Result<bool> {
        self.check(path).map(SyntaxVerdict::is_valid)
    }
}

impl<T: SyntaxChecker + ?Sized> SyntaxChecker for &T {
    fn check(&self, path: &Path) -> Result<SyntaxVerdict> {
        (**self).check(path)
    }
}

/// Checks scripts with a POSIX shell's `-n` mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellSyntaxChecker {
    shell: PathBuf,
}

impl Default for ShellSyntaxChecker {
    fn default() -> Self {
        ShellSyntaxChecker::new(DEFAULT_SHELL)
    }
}

impl ShellSyntaxChecker {
    pub fn new(shell: impl Into<PathBuf>) -> Self {
        ShellSyntaxChecker {
            shell: shell.into(),
        }
    }

    pub fn shell(&self) -> &Path {
        &self.shell
    }

    /// Returns `true` if the interpreter exists and has an execute bit set.
    pub fn is_available(&self) -> bool {
        is_executable_file(&self.shell)
    }
}

impl SyntaxChecker for ShellSyntaxChecker {
    fn check(&self, path: &Path) -> Result<SyntaxVerdict> {
        let status = Command::new(&self.shell)
            .arg("-n")
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| Error::Spawn {
                shell: self.shell.clone(),
                script: path.to_path_buf(),
                source,
            })?;

        // Killed by a signal counts as rejected too: there is no exit code 0.
        let verdict = if status.success() {
            SyntaxVerdict::Valid
        } else {
            SyntaxVerdict::Invalid
        };
        tracing::debug!(script = %path.display(), ?verdict, code = ?status.code(), "syntax check");
        Ok(verdict)
    }
}

/// Returns `true` if `path` resolves to a regular file the current user may
/// execute, as decided by `access(2)` with `X_OK`.
///
/// On non-Unix platforms every regular file counts as executable.
pub fn is_executable_file(path: &Path) -> bool {
    if !is_regular_file(path) {
        return false;
    }
    #[cfg(unix)]
    {
        access(path, libc::X_OK)
    }
    #[cfg(not(unix))]
    {
        true
    }
}

/// Returns `true` if `path` resolves to a regular file the current user may
/// read. `sh -n` cannot parse what it cannot open.
pub fn is_readable_file(path: &Path) -> bool {
    if !is_regular_file(path) {
        return false;
    }
    #[cfg(unix)]
    {
        access(path, libc::R_OK)
    }
    #[cfg(not(unix))]
    {
        std::fs::File::open(path).is_ok()
    }
}

fn is_regular_file(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|m| m.is_file())
}

#[cfg(unix)]
fn access(path: &Path, mode: libc::c_int) -> bool {
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = std::ffi::CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: `c_path` is a valid NUL-terminated string that outlives the call.
    unsafe { libc::access(c_path.as_ptr(), mode) == 0 }
}
