//! YAML config store: path override, defaults, and persistence.

#![allow(clippy::expect_used, unsafe_code)]

use podlaunch_cli::application::ports::ConfigStore;
use podlaunch_cli::application::services::config_service;
use podlaunch_cli::domain::LaunchConfig;
use podlaunch_cli::infra::config::{CONFIG_ENV, YamlConfigStore};
use podlaunch_cli::infra::files;
use serial_test::serial;
use tempfile::TempDir;

/// Point `PODLAUNCH_CONFIG` at a fresh temp file for the duration of `f`.
fn with_config_env(f: impl FnOnce(&std::path::Path)) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.yaml");
    // SAFETY: tests touching PODLAUNCH_CONFIG are serialized with #[serial].
    unsafe { std::env::set_var("PODLAUNCH_CONFIG", &path) };
    f(&path);
    unsafe { std::env::remove_var("PODLAUNCH_CONFIG") };
}

#[test]
#[serial]
fn missing_file_yields_defaults() {
    with_config_env(|path| {
        assert_eq!(YamlConfigStore.path().expect("path"), path);
        let config = config_service::load_config(&YamlConfigStore).expect("load");
        assert_eq!(config, LaunchConfig::default());
    });
}

#[test]
#[serial]
fn set_value_persists_with_owner_only_permissions() {
    with_config_env(|path| {
        config_service::set_value(&YamlConfigStore, "gpu_count", "2").expect("set");
        config_service::set_value(&YamlConfigStore, "ports", "22/tcp,6080/http").expect("set");

        let config = config_service::load_config(&YamlConfigStore).expect("load");
        assert_eq!(config.gpu_count, 2);
        assert_eq!(config.ports, vec!["22/tcp", "6080/http"]);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(path).expect("metadata").permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    });
}

#[test]
#[serial]
fn invalid_file_contents_are_rejected_on_load() {
    with_config_env(|path| {
        std::fs::write(path, "gpu_count: 0\n").expect("write");
        let err = config_service::load_config(&YamlConfigStore).expect_err("invalid");
        assert!(err.to_string().contains("gpu_count"));
    });
}

#[test]
#[serial]
fn empty_override_falls_back_to_state_dir() {
    let Ok(dir) = files::state_dir() else {
        return;
    };
    // SAFETY: serialized with #[serial].
    unsafe { std::env::set_var(CONFIG_ENV, "") };
    let path = YamlConfigStore.path();
    unsafe { std::env::remove_var(CONFIG_ENV) };
    assert_eq!(path.expect("path"), dir.join("config.yaml"));
}
