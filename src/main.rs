mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use grub_evidence::assemble::Assembler;
use grub_evidence::config::Config;
use grub_evidence::report::Report;
use grub_evidence::syntax::{ShellSyntaxChecker, SyntaxChecker, SyntaxVerdict};
use grub_evidence::{output, sanitize};
use std::path::Path;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Collect {
            problem_type,
            format,
            output: output_path,
            strict,
            config: config_path,
        } => {
            let config = load_config(config_path.as_deref());
            let assembler = Assembler::from_config(&config);

            let mut report = Report::new(problem_type);
            let assembly = assembler.assemble(&mut report).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(2);
            });

            if output_path.is_some() {
                colored::control::set_override(false);
            }
            let formatted = output::format_report(&report, &assembly, &format);
            if let Some(out_path) = output_path {
                std::fs::write(&out_path, &formatted).unwrap_or_else(|e| {
                    eprintln!("Error writing output: {e}");
                    std::process::exit(2);
                });
                eprintln!("Output written to {}", out_path.display());
            } else {
                print!("{formatted}");
            }

            std::process::exit(if strict && !assembly.passed() { 1 } else { 0 });
        }

        Commands::Check {
            paths,
            config: config_path,
        } => {
            let config = load_config(config_path.as_deref());
            let checker = ShellSyntaxChecker::new(&config.shell.interpreter);

            let mut failed = 0usize;
            for path in &paths {
                if !path.exists() {
                    eprintln!("Error: path does not exist: {}", path.display());
                    std::process::exit(2);
                }
                let verdict = checker.check(path).unwrap_or_else(|e| {
                    eprintln!("Error: {e}");
                    std::process::exit(2);
                });
                let status = match verdict {
                    SyntaxVerdict::Valid => "PASS".green().bold().to_string(),
                    SyntaxVerdict::Invalid => {
                        failed += 1;
                        "FAIL".red().bold().to_string()
                    }
                };
                println!("  [{status}] {}", path.display());
            }

            std::process::exit(if failed == 0 { 0 } else { 1 });
        }

        Commands::Sanitize { path } => match sanitize::sanitized_contents(&path) {
            Ok(Some(text)) => print!("{text}"),
            Ok(None) => {
                eprintln!("Error: path does not exist: {}", path.display());
                std::process::exit(2);
            }
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(2);
            }
        },

        Commands::CheckTools {
            config: config_path,
        } => {
            let config = load_config(config_path.as_deref());
            let checker = ShellSyntaxChecker::new(&config.shell.interpreter);

            println!("{}", "Tool Availability".bold().underline());
            println!();
            let status = if checker.is_available() {
                "READY".green().bold().to_string()
            } else {
                "NOT AVAILABLE".red().to_string()
            };
            println!(
                "  [{status}] {shell:<20} parse-only syntax check (-n)",
                shell = checker.shell().display(),
            );

            if !checker.is_available() {
                std::process::exit(1);
            }
        }
    }
}

fn load_config(path: Option<&Path>) -> Config {
    Config::load(path).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(2);
    })
}

/// Logs go to stderr so they never mix with the report on stdout.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}
