//! # Config Loader Tests
//!
//! Covers the `[device]` / `[logging]` tables, their defaults, and the
//! error paths of `agent::config::load`.

use std::io::Write;
use std::path::PathBuf;

use agent::config::{ConfigError, load, load_or_default};
use log::LevelFilter;
use tempfile::NamedTempFile;

fn write_config(body: &str) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(body.as_bytes()).unwrap();
    tmp
}

#[test]
fn full_config_is_parsed() {
    let tmp = write_config(
        r#"
        [device]
        path = "/tmp/echodev-test"
        read_buffer = 64

        [logging]
        enable = true
        file = "agent.log"
        level = "debug"
        "#,
    );
    let cfg = load(tmp.path()).unwrap();
    assert_eq!(cfg.device.path, PathBuf::from("/tmp/echodev-test"));
    assert_eq!(cfg.device.read_buffer, 64);
    assert!(cfg.logging.enable);
    assert_eq!(cfg.logging.file.as_deref(), Some("agent.log"));
    assert_eq!(cfg.logging.level_filter(), LevelFilter::Debug);
}

#[test]
fn missing_tables_take_defaults() {
    let tmp = write_config("");
    let cfg = load(tmp.path()).unwrap();
    assert_eq!(cfg.device.path, PathBuf::from("/dev/echodev"));
    assert_eq!(cfg.device.read_buffer, 256);
    assert!(!cfg.logging.enable);
    assert_eq!(cfg.logging.level_filter(), LevelFilter::Info);
}

#[test]
fn unknown_level_falls_back_to_info() {
    let tmp = write_config("[logging]\nlevel = \"chatty\"\n");
    let cfg = load(tmp.path()).unwrap();
    assert_eq!(cfg.logging.level_filter(), LevelFilter::Info);
}

#[test]
fn zero_read_buffer_is_rejected() {
    let tmp = write_config("[device]\nread_buffer = 0\n");
    assert!(matches!(load(tmp.path()), Err(ConfigError::InvalidReadBuffer(0))));
}

#[test]
fn malformed_toml_is_a_toml_error() {
    let tmp = write_config("[device\npath = ");
    assert!(matches!(load(tmp.path()), Err(ConfigError::Toml(_))));
}

#[test]
fn missing_file_is_io_error_for_load_but_default_for_load_or_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(matches!(load(&path), Err(ConfigError::Io(_))));

    let (cfg, _source) = load_or_default(&path).unwrap();
    assert_eq!(cfg.device.read_buffer, 256);
}
