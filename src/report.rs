use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Key for the raw kernel command line.
pub const KEY_PROC_CMDLINE: &str = "ProcCmdLine";
/// Key for the sanitized `/etc/default/grub`.
pub const KEY_ETC_DEFAULT_GRUB: &str = "EtcDefaultGrub";
/// Key for the space-joined list of scripts that failed `sh -n`.
pub const KEY_INVALID_GRUB_SCRIPT: &str = "InvalidGrubScript";
/// Serialized name of [`Report::problem_type`].
pub const KEY_PROBLEM_TYPE: &str = "ProblemType";

static RE_VALID_KEY: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[A-Za-z0-9._-]+$").unwrap());

/// Kind of problem a report was filed for. Only [`ProblemType::Package`]
/// reports get boot-loader evidence.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
pub enum ProblemType {
    Crash,
    #[default]
    Package,
    KernelCrash,
    KernelOops,
    Bug,
    RecoverableProblem,
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemType::Crash => write!(f, "Crash"),
            ProblemType::Package => write!(f, "Package"),
            ProblemType::KernelCrash => write!(f, "KernelCrash"),
            ProblemType::KernelOops => write!(f, "KernelOops"),
            ProblemType::Bug => write!(f, "Bug"),
            ProblemType::RecoverableProblem => write!(f, "RecoverableProblem"),
        }
    }
}

/// Key/value evidence for a single bug submission.
///
/// Entries can only be added. [`Report::insert`] never replaces a value that
/// is already present; a colliding key gets `_` appended until it is free.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Report {
    #[serde(rename = "ProblemType")]
    pub problem_type: ProblemType,
    #[serde(flatten)]
    entries: BTreeMap<String, String>,
}

impl Report {
    pub fn new(problem_type: ProblemType) -> Self {
        Report {
            problem_type,
            entries: BTreeMap::new(),
        }
    }

    /// Stores `value` under `key`, or under `key_`, `key__`, ... when `key`
    /// is taken. Returns the key actually used.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> String {
        let mut key = key.into();
        while self.entries.contains_key(&key) {
            key.push('_');
        }
        self.entries.insert(key.clone(), value.into());
        key
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order. `ProblemType` is not included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns `true` if `key` is made only of ASCII letters, digits, `.`,
    /// `_` and `-`.
    ///
    /// ```
    /// use grub_evidence::report::Report;
    ///
    /// assert!(Report::is_valid_key("etc.grub.d.05.debian.theme"));
    /// assert!(!Report::is_valid_key("/etc/grub.d"));
    /// assert!(!Report::is_valid_key(""));
    /// ```
    pub fn is_valid_key(key: &str) -> bool {
        RE_VALID_KEY.is_match(key)
    }
}

/// Scripts that failed the syntax check during one assembly run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvalidScriptList(Vec<PathBuf>);

impl InvalidScriptList {
    pub fn push(&mut self, path: &Path) {
        self.0.push(path.to_path_buf());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.0
    }

    /// Space-joined form stored in the report.
    pub fn joined(&self) -> String {
        self.0
            .iter()
            .map(|p| p.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Writes [`KEY_INVALID_GRUB_SCRIPT`] unless the list is empty.
    pub fn record(&self, report: &mut Report) {
        if !self.is_empty() {
            report.insert(KEY_INVALID_GRUB_SCRIPT, self.joined());
        }
    }
}
