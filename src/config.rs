//! Configuration loading.
//!
//! Every path the assembler touches lives here rather than in the logic, so a
//! test (or a chroot inspection) can point the collector at another tree.
//!
//! # Configuration file
//!
//! The default configuration file is `grub-evidence.toml` in the current
//! working directory. Every field is optional:
//!
//! ```toml
//! [paths]
//! proc_cmdline = "/proc/cmdline"
//! default_grub = "/etc/default/grub"
//! grub_d = "/etc/grub.d"
//!
//! [shell]
//! interpreter = "/bin/sh"
//! ```

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Kernel command line pseudo-file.
pub const DEFAULT_PROC_CMDLINE: &str = "/proc/cmdline";
/// Primary GRUB configuration file.
pub const DEFAULT_DEFAULT_GRUB: &str = "/etc/default/grub";
/// Directory of drop-in scripts run by `grub-mkconfig`.
pub const DEFAULT_GRUB_D: &str = "/etc/grub.d";
/// Shell used for the parse-only check.
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Name looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "grub-evidence.toml";

/// Top-level configuration.
///
/// # Examples
///
/// ```
/// use grub_evidence::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.paths.grub_d.to_str(), Some("/etc/grub.d"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub shell: ShellConfig,
}

/// Input locations read during assembly.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Attached verbatim as `ProcCmdLine`.
    pub proc_cmdline: PathBuf,
    /// Attached sanitized as `EtcDefaultGrub` and syntax-checked.
    pub default_grub: PathBuf,
    /// Every executable entry except `README` is syntax-checked.
    pub grub_d: PathBuf,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Interpreter invoked as `<interpreter> -n <script>`.
    pub interpreter: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            proc_cmdline: PathBuf::from(DEFAULT_PROC_CMDLINE),
            default_grub: PathBuf::from(DEFAULT_DEFAULT_GRUB),
            grub_d: PathBuf::from(DEFAULT_GRUB_D),
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            interpreter: PathBuf::from(DEFAULT_SHELL),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// Resolution order:
    /// 1. If `path` is `Some`, load from that file (error if missing).
    /// 2. Otherwise try [`DEFAULT_CONFIG_FILE`] in the current directory.
    /// 3. If that does not exist either, return [`Config::default()`].
    ///
    /// # Errors
    ///
    /// [`Error::ConfigNotFound`] for a missing explicit path,
    /// [`Error::ConfigRead`] / [`Error::ConfigParse`] when the file cannot be
    /// read or is not valid TOML.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let config_path = match path {
            Some(p) if p.exists() => Some(p.to_path_buf()),
            Some(p) => return Err(Error::ConfigNotFound(p.to_path_buf())),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                default_path.exists().then(|| default_path.to_path_buf())
            }
        };

        match config_path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                let content = std::fs::read_to_string(&path).map_err(|source| Error::ConfigRead {
                    path: path.clone(),
                    source,
                })?;
                Self::from_toml(&content).map_err(|source| Error::ConfigParse { path, source })
            }
            None => Ok(Config::default()),
        }
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> std::result::Result<Config, toml::de::Error> {
        toml::from_str(content)
    }

    /// Convenience for pointing every input at a different root, e.g. a
    /// mounted system image. The interpreter is left untouched.
    pub fn rooted_at(root: &Path) -> Config {
        let rebase = |p: &str| root.join(p.trim_start_matches('/'));
        Config {
            paths: PathsConfig {
                proc_cmdline: rebase(DEFAULT_PROC_CMDLINE),
                default_grub: rebase(DEFAULT_DEFAULT_GRUB),
                grub_d: rebase(DEFAULT_GRUB_D),
            },
            shell: ShellConfig::default(),
        }
    }
}
