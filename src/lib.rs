//! # grub-evidence
//!
//! Bug-report evidence collection for the GRUB 2 configuration package.
//!
//! When a package problem is reported against the boot loader, the most
//! common culprit is a hand-edited `/etc/default/grub` or a drop-in script in
//! `/etc/grub.d` that no longer parses, which makes `grub-mkconfig` fail
//! during the upgrade. This crate gathers what a triager needs to spot that:
//!
//! - the kernel command line (`ProcCmdLine`),
//! - `/etc/default/grub` with any `password` line redacted (`EtcDefaultGrub`),
//! - the scripts rejected by `sh -n`, listed under `InvalidGrubScript`, each
//!   with its raw contents attached under a key derived from its path.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use grub_evidence::{assemble::Assembler, config::Config, output};
//! use grub_evidence::report::{ProblemType, Report};
//!
//! let config = Config::load(None).expect("failed to load config");
//! let mut report = Report::new(ProblemType::Package);
//! let assembly = Assembler::from_config(&config)
//!     .assemble(&mut report)
//!     .expect("shell unavailable");
//!
//! print!(
//!     "{}",
//!     output::format_report(&report, &assembly, &output::OutputFormat::Pretty)
//! );
//! ```
//!
//! ## Architecture
//!
//! 1. **[`syntax`]**: parse-only shell check, returning a [`syntax::SyntaxVerdict`].
//! 2. **[`sanitize`]**: line-level redaction of configuration files.
//! 3. **[`assemble`]**: walks the well-known paths and fills the [`report::Report`].
//! 4. **[`host`]**: the attach / key-derivation primitives of the reporting host.
//! 5. **[`config`]** and **[`output`]**: TOML configuration and report rendering.

pub mod assemble;
pub mod config;
pub mod error;
pub mod host;
pub mod output;
pub mod report;
pub mod sanitize;
pub mod syntax;
