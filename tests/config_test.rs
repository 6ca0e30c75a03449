//! Tests for trainer configuration loading.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use strictly_digits::{DigitCount, TrainerConfig};
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes()).expect("Failed to write config");
    file
}

#[test]
fn test_defaults_match_reference_behavior() {
    let config = TrainerConfig::default();
    assert_eq!(config.starting(), DigitCount::new(3));
    assert_eq!(config.cadence(), Duration::from_millis(100));
    assert_eq!(config.log_file(), &PathBuf::from("strictly_digits.log"));
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
starting_digits = 5
tick_ms = 50
log_file = "trainer.log"
"#,
    );
    let config = TrainerConfig::from_file(file.path()).expect("Config should load");
    assert_eq!(*config.starting_digits(), 5);
    assert_eq!(config.cadence(), Duration::from_millis(50));
    assert_eq!(config.log_file(), &PathBuf::from("trainer.log"));
}

#[test]
fn test_missing_fields_use_defaults() {
    let file = write_config("tick_ms = 250\n");
    let config = TrainerConfig::from_file(file.path()).expect("Config should load");
    assert_eq!(config.starting(), DigitCount::new(3));
    assert_eq!(*config.tick_ms(), 250);
}

#[test]
fn test_starting_digits_clamped_and_cadence_nonzero() {
    let file = write_config("starting_digits = 1\ntick_ms = 0\n");
    let config = TrainerConfig::from_file(file.path()).expect("Config should load");
    assert_eq!(config.starting().get(), 2);
    assert_eq!(config.cadence(), Duration::from_millis(1));
}

#[test]
fn test_invalid_toml_is_an_error() {
    let file = write_config("starting_digits = \"many\"\n");
    let err = TrainerConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = TrainerConfig::load_or_default(dir.path().join("absent.toml"))
        .expect("Defaults expected");
    assert_eq!(config, TrainerConfig::default());
}

#[test]
fn test_overrides_apply() {
    let config = TrainerConfig::default()
        .with_starting_digits(6)
        .with_tick_ms(20)
        .with_log_file(PathBuf::from("other.log"));
    assert_eq!(config.starting().get(), 6);
    assert_eq!(config.cadence(), Duration::from_millis(20));
    assert_eq!(config.log_file(), &PathBuf::from("other.log"));
}
