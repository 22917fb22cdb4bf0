//! Integration tests for the provider and channel against mock and real volumes.

use std::path::Path;
use std::sync::Mutex;

use statkit::backend::Backend;
use statkit::channel::{Channel, GET_STORAGE_INFO, MethodCall, Response};
use statkit::{Capacity, Error, Provider, Result};

/// Mock backend serving a fixed capacity for anything under `/data`.
struct MockBackend {
    capacity: Capacity,
}

impl MockBackend {
    fn new(total: u64, available: u64) -> Self {
        Self {
            capacity: Capacity { total, available },
        }
    }
}

impl Backend for MockBackend {
    fn capacity(&self, path: &Path) -> Result<Capacity> {
        if !path.starts_with("/data") {
            return Err(Error::query(path, "No such file or directory (os error 2)"));
        }
        Ok(self.capacity)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Backend that reports more free space on every call, to prove no caching.
struct GrowingBackend {
    calls: Mutex<u64>,
}

impl Backend for GrowingBackend {
    fn capacity(&self, _path: &Path) -> Result<Capacity> {
        let mut calls = self.calls.lock().unwrap();
        *calls += 1;
        Ok(Capacity {
            total: 1_000,
            available: *calls * 100,
        })
    }

    fn name(&self) -> &'static str {
        "growing"
    }
}

#[test]
fn primary_data_root_scenario() {
    let provider = Provider::with_backend(Box::new(MockBackend::new(
        128_000_000_000,
        32_000_000_000,
    )));

    let stats = provider.stats("/data").unwrap();
    assert_eq!(stats.total(), 128_000_000_000);
    assert_eq!(stats.free(), 32_000_000_000);
    assert_eq!(stats.used(), 96_000_000_000);
    assert_eq!(provider.backend_name(), "mock");
}

#[test]
fn nonexistent_mount_is_storage_error_with_message() {
    let provider = Provider::with_backend(Box::new(MockBackend::new(10, 5)));

    let err = provider.stats("/nonexistent/mount").unwrap_err();
    match &err {
        Error::StorageQuery { path, message } => {
            assert_eq!(path, Path::new("/nonexistent/mount"));
            assert!(!message.is_empty());
        }
        other => panic!("expected StorageQuery, got {other:?}"),
    }
}

#[test]
fn empty_path_is_storage_error() {
    let provider = Provider::with_backend(Box::new(MockBackend::new(10, 5)));

    let err = provider.stats("").unwrap_err();
    assert!(err.is_storage_error());
}

#[test]
fn every_call_requeries_backend() {
    let provider = Provider::with_backend(Box::new(GrowingBackend {
        calls: Mutex::new(0),
    }));

    let first = provider.stats("/data").unwrap();
    let second = provider.stats("/data").unwrap();
    assert_eq!(first.free(), 100);
    assert_eq!(second.free(), 200);
    assert_eq!(second.used() + second.free(), second.total());
}

#[test]
fn channel_scenario_matches_wire_mapping() {
    let provider = Provider::with_backend(Box::new(MockBackend::new(
        128_000_000_000,
        32_000_000_000,
    )));
    let channel = Channel::new(provider, "/data");

    let out = channel
        .handle_json(r#"{"method":"getStorageInfo"}"#)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        value["result"],
        serde_json::json!({
            "total": 128_000_000_000u64,
            "free": 32_000_000_000u64,
            "used": 96_000_000_000u64,
        })
    );
}

#[test]
fn channel_unknown_method_is_distinct_from_storage_error() {
    let channel = Channel::new(
        Provider::with_backend(Box::new(MockBackend::new(10, 5))),
        "/nonexistent",
    );

    // Even with an unreadable default root, an unknown method must not be
    // reported as a storage error.
    let response = channel.handle(&MethodCall::new("openFile"));
    assert!(matches!(response, Response::NotImplemented { .. }));

    let response = channel.handle(&MethodCall::new(GET_STORAGE_INFO));
    assert!(matches!(response, Response::Error { ref code, .. } if code == "STORAGE_ERROR"));
}

#[cfg(unix)]
mod real_volume {
    use super::*;

    #[test]
    fn temp_dir_invariant_holds() {
        let dir = tempfile::tempdir().unwrap();
        let stats = Provider::new().stats(dir.path()).unwrap();

        assert!(stats.total() > 0);
        assert_eq!(stats.used() + stats.free(), stats.total());
    }

    #[test]
    fn repeated_queries_are_consistent() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Provider::new();

        let first = provider.stats(dir.path()).unwrap();
        let second = provider.stats(dir.path()).unwrap();

        // Free space can drift on a live system; the volume size cannot.
        assert_eq!(first.total(), second.total());
        assert_eq!(second.used() + second.free(), second.total());
    }

    #[test]
    fn nonexistent_mount_is_storage_error() {
        let err = Provider::new().stats("/nonexistent/mount").unwrap_err();
        assert!(err.is_storage_error());
        assert!(!err.message().is_empty());
    }

    #[test]
    fn regular_file_resolves_to_its_volume() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let stats = Provider::new().stats(file.path()).unwrap();
        assert!(stats.total() > 0);
    }
}
