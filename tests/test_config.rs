use std::path::{Path, PathBuf};

use grub_evidence::config::Config;
use grub_evidence::error::Error;

#[test]
fn defaults_point_at_system_paths() {
    let config = Config::default();
    assert_eq!(config.paths.proc_cmdline, Path::new("/proc/cmdline"));
    assert_eq!(config.paths.default_grub, Path::new("/etc/default/grub"));
    assert_eq!(config.paths.grub_d, Path::new("/etc/grub.d"));
    assert_eq!(config.shell.interpreter, Path::new("/bin/sh"));
}

#[test]
fn partial_toml_keeps_other_defaults() {
    let config = Config::from_toml("[paths]\ngrub_d = \"/srv/image/etc/grub.d\"\n").unwrap();
    assert_eq!(config.paths.grub_d, Path::new("/srv/image/etc/grub.d"));
    assert_eq!(config.paths.default_grub, Path::new("/etc/default/grub"));
    assert_eq!(config.shell.interpreter, Path::new("/bin/sh"));
}

#[test]
fn empty_toml_is_default() {
    assert_eq!(Config::from_toml("").unwrap(), Config::default());
}

#[test]
fn rooted_at_rebases_every_path() {
    let config = Config::rooted_at(Path::new("/mnt/target"));
    assert_eq!(config.paths.proc_cmdline, PathBuf::from("/mnt/target/proc/cmdline"));
    assert_eq!(config.paths.default_grub, PathBuf::from("/mnt/target/etc/default/grub"));
    assert_eq!(config.paths.grub_d, PathBuf::from("/mnt/target/etc/grub.d"));
    assert_eq!(config.shell.interpreter, Path::new("/bin/sh"));
}

#[test]
fn load_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grub-evidence.toml");
    std::fs::write(&path, "[shell]\ninterpreter = \"/bin/dash\"\n").unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.shell.interpreter, Path::new("/bin/dash"));
}

#[test]
fn load_missing_explicit_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, Error::ConfigNotFound(_)));
    assert!(err.to_string().contains("Config file not found"));
}

#[test]
fn load_invalid_toml_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[paths\n").unwrap();

    let err = Config::load(Some(&path)).unwrap_err();
    assert!(matches!(err, Error::ConfigParse { .. }));
}
