//! Integration tests for logger installation
//!
//! A process holds one global subscriber, so everything touching it stays in
//! a single test.

use super::test_utils::with_env;
use shallow_render::logging::{init_logging, LoggingConfig};
use shallow_render::{Frame, FrameFilter, ShallowError};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_file_logger_installs_once() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("logs").join("shallow.log");
    let config = LoggingConfig {
        output: "file".to_string(),
        file: log_file.clone(),
        ..LoggingConfig::default()
    };

    with_env(
        &[
            ("SHALLOW_LOG", "debug"),
            ("SHALLOW_LOG_FORMAT", "json"),
            ("SHALLOW_LOG_OUTPUT", "file"),
        ],
        || {
            init_logging(Some(&config)).unwrap();
            assert!(log_file.exists());

            FrameFilter::default()
                .filter(&[Frame::component(0, "Foo", 2), Frame::text(1, "inside")])
                .unwrap();
            let contents = fs::read_to_string(&log_file).unwrap();
            assert!(contents.contains("Filtered frame sequence"));

            assert!(matches!(
                init_logging(Some(&config)),
                Err(ShallowError::Config(_))
            ));
        },
    );
}
