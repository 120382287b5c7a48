use super::*;
use std::error::Error;

#[test]
fn test_manifest_error_unreachable() {
    let err = MirrorError::manifest("connection refused");

    assert!(matches!(err, MirrorError::Manifest { .. }));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn test_manifest_error_with_source() {
    let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
    let err = MirrorError::manifest_with_source("fetch failed", io_err);

    assert!(matches!(err, MirrorError::Manifest { .. }));
    assert!(err.source().is_some());
}

#[test]
fn test_inspect_error() {
    let err = MirrorError::inspect("no tag data for docker.io/library/nginx");

    assert!(matches!(err, MirrorError::Inspect { .. }));
    assert!(err.to_string().contains("docker.io/library/nginx"));
}

#[test]
fn test_copy_error() {
    let err = MirrorError::copy("skopeo exited with status 1");

    assert!(matches!(err, MirrorError::Copy { .. }));
    assert!(err.to_string().contains("status 1"));
}

#[test]
fn test_process_error_preserves_source() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file");
    let err = MirrorError::process_with_source("failed to spawn skopeo", io_err);

    assert!(matches!(err, MirrorError::Process { .. }));
    assert!(err.to_string().contains("failed to spawn skopeo"));
    assert!(err.source().unwrap().to_string().contains("No such file"));
}

#[test]
fn test_validation_error_no_slash() {
    let err = MirrorError::validation("reference must contain a '/'");

    assert!(matches!(err, MirrorError::Validation { .. }));
    assert!(err.to_string().starts_with("Validation error"));
}

#[test]
fn test_config_error() {
    let err = MirrorError::config("concurrency must be greater than 0");

    assert!(matches!(err, MirrorError::Config { .. }));
}

#[test]
fn test_config_error_with_source() {
    let io_err = std::io::Error::new(std::io::ErrorKind::InvalidInput, "bad value");
    let err = MirrorError::config_with_source("invalid client configuration", io_err);

    assert!(err.source().is_some());
}

#[test]
fn test_errors_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MirrorError>();
}
