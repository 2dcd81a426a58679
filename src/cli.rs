use clap::{Parser, Subcommand};
use grub_evidence::output::OutputFormat;
use grub_evidence::report::ProblemType;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "grub-evidence",
    version,
    about = "Collect GRUB configuration evidence for a bug report"
)]
pub struct Cli {
    /// Log each step to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assemble a report and print it
    Collect {
        /// Problem type of the report being filed
        #[arg(long, default_value = "package", value_enum)]
        problem_type: ProblemType,

        /// Output format
        #[arg(long, short, default_value = "pretty", value_enum)]
        format: OutputFormat,

        /// Write output to file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Exit with status 1 when any script fails the syntax check
        #[arg(long)]
        strict: bool,

        /// Custom config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Syntax-check shell scripts without running them
    Check {
        /// Scripts to check
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Custom config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print a file with password lines redacted
    Sanitize {
        /// File to sanitize
        path: PathBuf,
    },

    /// Check that the shell interpreter is available
    CheckTools {
        /// Custom config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },
}
