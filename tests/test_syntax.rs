#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use grub_evidence::error::Error;
use grub_evidence::syntax::{
    is_executable_file, is_readable_file, ShellSyntaxChecker, SyntaxChecker, SyntaxVerdict,
};

fn write_script(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn check_content(script: &str) -> SyntaxVerdict {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(dir.path(), "script", script);
    ShellSyntaxChecker::default().check(&path).unwrap()
}

// ── availability ──────────────────────────────────────────────────────────────

#[test]
fn default_checker_uses_bin_sh() {
    assert_eq!(ShellSyntaxChecker::default().shell(), Path::new("/bin/sh"));
}

#[test]
fn missing_interpreter_is_not_available() {
    assert!(!ShellSyntaxChecker::new("/nonexistent/bin/sh").is_available());
}

// ── verdicts ──────────────────────────────────────────────────────────────────

#[test]
fn valid_script_passes() {
    if !ShellSyntaxChecker::default().is_available() {
        return;
    }
    let verdict = check_content("#!/bin/sh\nset -e\nif [ -n \"$1\" ]; then\n  echo \"$1\"\nfi\n");
    assert_eq!(verdict, SyntaxVerdict::Valid);
}

#[test]
fn unmatched_if_fails() {
    if !ShellSyntaxChecker::default().is_available() {
        return;
    }
    let verdict = check_content("#!/bin/sh\nif true; then\n  echo broken\n");
    assert_eq!(verdict, SyntaxVerdict::Invalid);
}

#[test]
fn unterminated_quote_fails() {
    if !ShellSyntaxChecker::default().is_available() {
        return;
    }
    let verdict = check_content("GRUB_CMDLINE_LINUX=\"quiet splash\n");
    assert_eq!(verdict, SyntaxVerdict::Invalid);
}

#[test]
fn script_is_parsed_not_executed() {
    if !ShellSyntaxChecker::default().is_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("ran");
    let script = write_script(
        dir.path(),
        "script",
        &format!("#!/bin/sh\ntouch '{}'\n", marker.display()),
    );

    assert_eq!(
        ShellSyntaxChecker::default().check(&script).unwrap(),
        SyntaxVerdict::Valid
    );
    assert!(!marker.exists(), "script must not be executed");
}

#[test]
fn is_valid_syntax_maps_verdict_to_bool() {
    if !ShellSyntaxChecker::default().is_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let good = write_script(dir.path(), "good", "echo ok\n");
    let bad = write_script(dir.path(), "bad", "case x in\n");

    let checker = ShellSyntaxChecker::default();
    assert!(checker.is_valid_syntax(&good).unwrap());
    assert!(!checker.is_valid_syntax(&bad).unwrap());
}

#[test]
fn missing_script_is_invalid_not_an_error() {
    if !ShellSyntaxChecker::default().is_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let verdict = ShellSyntaxChecker::default()
        .check(&dir.path().join("absent"))
        .unwrap();
    assert_eq!(verdict, SyntaxVerdict::Invalid);
}

// ── spawn failure ─────────────────────────────────────────────────────────────

#[test]
fn missing_interpreter_is_a_spawn_error() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "script", "echo ok\n");

    let err = ShellSyntaxChecker::new("/nonexistent/bin/sh")
        .check(&script)
        .unwrap_err();
    match err {
        Error::Spawn { shell, script: s, .. } => {
            assert_eq!(shell, Path::new("/nonexistent/bin/sh"));
            assert_eq!(s, script);
        }
        other => panic!("expected Spawn error, got {other:?}"),
    }
}

// ── is_executable_file ────────────────────────────────────────────────────────

#[test]
fn executable_bit_is_detected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(dir.path(), "script", "echo\n");

    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
    assert!(!is_executable_file(&path));

    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o744)).unwrap();
    assert!(is_executable_file(&path));
}

#[test]
fn read_permission_is_detected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(dir.path(), "script", "echo\n");
    assert!(is_readable_file(&path));

    // Root reads anything, so only an unprivileged user sees the denial.
    if unsafe { libc::geteuid() } == 0 {
        return;
    }
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o311)).unwrap();
    assert!(is_executable_file(&path));
    assert!(!is_readable_file(&path));
}

#[test]
fn directories_are_not_readable_files() {
    let dir = tempfile::tempdir().unwrap();
    assert!(!is_readable_file(dir.path()));
}

#[test]
fn directories_are_not_executable_files() {
    let dir = tempfile::tempdir().unwrap();
    assert!(!is_executable_file(dir.path()));
}

#[test]
fn missing_path_is_not_executable() {
    let dir = tempfile::tempdir().unwrap();
    assert!(!is_executable_file(&dir.path().join("absent")));
}
