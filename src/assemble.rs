//! Report assembly.
//!
//! [`Assembler::assemble`] is the entry point: given a [`Report`] filed
//! against the boot-loader package it
//!
//! 1. attaches the kernel command line as `ProcCmdLine`,
//! 2. attaches the sanitized `/etc/default/grub` as `EtcDefaultGrub`,
//! 3. syntax-checks `/etc/default/grub`,
//! 4. syntax-checks every candidate script in `/etc/grub.d` (see
//!    [`is_candidate_script`]) and attaches the raw contents of each one that
//!    fails,
//! 5. records the failures, space-joined, as `InvalidGrubScript`.
//!
//! One bad path never stops the others. The only error that escapes is
//! [`Error::Spawn`](crate::error::Error::Spawn), when the shell itself cannot
//! be started.

use crate::config::Config;
use crate::error::Result;
use crate::host::{LocalHost, ReportHost};
use crate::report::{
    InvalidScriptList, ProblemType, Report, KEY_ETC_DEFAULT_GRUB, KEY_PROC_CMDLINE,
};
use crate::sanitize;
use crate::syntax::{
    is_executable_file, is_readable_file, ShellSyntaxChecker, SyntaxChecker, SyntaxVerdict,
};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Documentation file shipped in `/etc/grub.d`; never checked.
pub const README: &str = "README";

/// What a single [`Assembler::assemble`] call did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembly {
    /// Scripts handed to the syntax checker, primary config included.
    pub scripts_checked: usize,
    /// Scripts the checker rejected, in discovery order.
    pub invalid: InvalidScriptList,
}

impl Assembly {
    pub fn passed(&self) -> bool {
        self.invalid.is_empty()
    }
}

/// Collects boot-loader evidence into a [`Report`].
///
/// # Examples
///
/// ```rust,no_run
/// use grub_evidence::assemble::Assembler;
/// use grub_evidence::config::Config;
/// use grub_evidence::report::{ProblemType, Report};
///
/// let assembler = Assembler::from_config(&Config::default());
/// let mut report = Report::new(ProblemType::Package);
/// let assembly = assembler.assemble(&mut report)?;
/// println!("{} invalid script(s)", assembly.invalid.len());
/// # Ok::<(), grub_evidence::error::Error>(())
/// ```
pub struct Assembler<C = ShellSyntaxChecker, H = LocalHost> {
    config: Config,
    checker: C,
    host: H,
}

impl Assembler {
    /// Local filesystem host and the configured shell.
    pub fn from_config(config: &Config) -> Self {
        Assembler {
            config: config.clone(),
            checker: ShellSyntaxChecker::new(&config.shell.interpreter),
            host: LocalHost,
        }
    }
}

impl<C: SyntaxChecker, H: ReportHost> Assembler<C, H> {
    pub fn new(config: Config, checker: C, host: H) -> Self {
        Assembler {
            config,
            checker,
            host,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fills `report` with boot-loader evidence.
    ///
    /// Reports whose problem type is not [`ProblemType::Package`] are left
    /// untouched and an empty [`Assembly`] is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Spawn`](crate::error::Error::Spawn) if the shell
    /// cannot be started. Entries attached before that point stay in the
    /// report.
    pub fn assemble(&self, report: &mut Report) -> Result<Assembly> {
        if report.problem_type != ProblemType::Package {
            tracing::debug!(problem_type = %report.problem_type, "not a package problem, skipping");
            return Ok(Assembly::default());
        }

        let paths = &self.config.paths;
        let mut assembly = Assembly::default();

        // Used to tell whether the root fs sits on a loop device.
        self.host
            .attach_file(report, &paths.proc_cmdline, Some(KEY_PROC_CMDLINE));

        if let Err(e) = sanitize::attach_file_filtered(
            report,
            &paths.default_grub,
            Some(KEY_ETC_DEFAULT_GRUB),
            &self.host,
        ) {
            tracing::warn!(error = %e, "could not attach sanitized config");
        }

        if paths.default_grub.exists() {
            if self.check(&paths.default_grub, &mut assembly)? == SyntaxVerdict::Invalid {
                assembly.invalid.push(&paths.default_grub);
            }
        } else {
            tracing::debug!(path = %paths.default_grub.display(), "primary config missing, not checked");
        }

        for script in candidate_scripts(&paths.grub_d) {
            if self.check(&script, &mut assembly)? == SyntaxVerdict::Invalid {
                assembly.invalid.push(&script);
                self.host.attach_file(report, &script, None);
            }
        }

        assembly.invalid.record(report);

        tracing::info!(
            checked = assembly.scripts_checked,
            invalid = assembly.invalid.len(),
            "boot-loader evidence collected"
        );
        Ok(assembly)
    }

    fn check(&self, path: &Path, assembly: &mut Assembly) -> Result<SyntaxVerdict> {
        assembly.scripts_checked += 1;
        let verdict = self.checker.check(path)?;
        if verdict == SyntaxVerdict::Invalid {
            tracing::warn!(script = %path.display(), "shell syntax check failed");
        }
        Ok(verdict)
    }
}

/// Returns `true` if a `grub.d` entry should be syntax-checked: it is not
/// the [`README`], resolves to a regular file and the current user may both
/// execute and read it.
///
/// Unlike `grub-mkconfig`, editor backups (`*~`, `#*#`) and package-manager
/// leftovers (`*.dpkg-*`) are checked too: a broken leftover is still worth
/// showing to a triager.
///
/// An executable script that cannot be read is skipped with a warning, so a
/// permission problem is never reported as a syntax error.
pub fn is_candidate_script(path: &Path) -> bool {
    if path.file_name().is_some_and(|name| name == README) {
        return false;
    }
    if !is_executable_file(path) {
        return false;
    }
    if !is_readable_file(path) {
        tracing::warn!(script = %path.display(), "skipping unreadable script");
        return false;
    }
    true
}

/// Lists the candidate scripts directly inside `dir`, sorted by file name.
///
/// A missing or unreadable directory yields nothing; unreadable entries are
/// skipped.
pub fn candidate_scripts(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "scripts directory not found");
        return vec![];
    }

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e.into_path()),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|p| is_candidate_script(p))
        .collect()
}
