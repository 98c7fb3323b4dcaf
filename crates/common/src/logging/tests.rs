//! Unit tests for the logging subsystem.

use tracing_subscriber::fmt::format::FmtSpan;

use super::{format_service_name, init, types::*, Rotation};

#[test]
fn test_format_service_name() {
    assert_eq!(format_service_name("overseer", None), "overseer");
    assert_eq!(format_service_name("overseer", Some("prod")), "overseer%prod");
}

#[test]
fn test_logger_config_builder_pattern() {
    let config = LoggerConfig::new("test-service".to_string())
        .with_json_logging(true);

    assert_eq!(config.service_name, "test-service");
    assert!(config.stdout_config.json_format);
    assert_eq!(config.stdout_config.fmt_span, FmtSpan::CLOSE);
    assert!(config.file_logging_config.is_none());
}

#[test]
fn test_file_logging_config_defaults() {
    let config = FileLoggingConfig::new("/tmp/logs".into(), "overseer".to_string());
    assert_eq!(config.rotation, Rotation::DAILY);
    assert!(!config.json_format);

    let config = config.with_json_format(true);
    assert_eq!(config.rotation, Rotation::DAILY);
    assert!(config.json_format);
}

#[test]
fn test_init_twice_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = LoggerConfig::new("test-service".to_string()).with_file_logging(
        FileLoggingConfig::new(dir.path().to_path_buf(), "test".to_string()),
    );

    // Only one global subscriber can exist per process.
    assert!(init(config.clone()).is_ok());
    assert!(init(config).is_err());
}
