#![cfg(feature = "config-file")]

//! Loading `GlideConfig` from files on disk.
//!
//! Run:
//!   cargo test -p glide-core --features config-file --test config_files

use std::io::Write;

use glide_core::{ConfigError, GlideConfig};

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn toml_file_loads_with_defaults() {
    let file = write_temp(
        ".toml",
        "[scroll]\nmouse_wheel_smooth_scroll = true\nfast_scroll_sensitivity = 3.0\n",
    );
    let cfg = GlideConfig::from_toml_file(file.path()).expect("load toml");
    assert!(cfg.scroll.mouse_wheel_smooth_scroll);
    assert_eq!(cfg.scroll.fast_scroll_sensitivity, 3.0);
    assert_eq!(cfg.drag.autoscroll_speed, 10.0);
}

#[test]
fn json_file_loads() {
    let file = write_temp(".json", r#"{"drag": {"read_only": true, "multi_click_timeout_ms": 300}}"#);
    let cfg = GlideConfig::from_json_file(file.path()).expect("load json");
    assert!(cfg.drag.read_only);
    assert_eq!(cfg.drag.multi_click_timeout_ms, 300);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = GlideConfig::from_toml_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn invalid_json_value_is_rejected() {
    let file = write_temp(".json", r#"{"drag": {"autoscroll_speed": -1.0}}"#);
    let err = GlideConfig::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref e) if !e.is_empty()));
}
