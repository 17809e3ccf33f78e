//! Domain types and validators for launch configuration.
//!
//! Pure functions only, no I/O or filesystem access.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::pod::{PodSpec, pod_name};

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "template_id",
    "network_volume_id",
    "gpu_types",
    "gpu_count",
    "ports",
    "name_prefix",
    "desktop_port",
];

pub const DEFAULT_REST_URL: &str = "https://rest.runpod.io/v1";
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.runpod.io/graphql";

/// Largest GPU count a single pod can request.
pub const MAX_GPU_COUNT: u32 = 8;

/// `<port>/<protocol>` as accepted by the pod create call.
#[allow(clippy::expect_used)] // Pattern is a compile-time constant
static PORT_SPEC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,5}/(tcp|http)$").expect("valid regex"));

// ── Config schema ────────────────────────────────────────────────────────────

/// Launch configuration stored in `~/.podlaunch/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// Pod template (image, disk, default ports).
    pub template_id: String,
    /// Network volume attached at `/workspace`.
    pub network_volume_id: String,
    /// GPU types acceptable for the pod, in order of preference.
    pub gpu_types: Vec<String>,
    pub gpu_count: u32,
    /// Extra ports to expose, `<port>/<tcp|http>`. Empty inherits the template's.
    pub ports: Vec<String>,
    /// Pod names are `<name_prefix>-<unix seconds>`.
    pub name_prefix: String,
    /// Internal port of the web desktop (noVNC) behind the HTTP proxy.
    pub desktop_port: u16,
    pub rest_url: String,
    pub graphql_url: String,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            template_id: "3ikte0az1e".to_string(),
            network_volume_id: "5oxn5a36e6".to_string(),
            gpu_types: vec!["NVIDIA RTX PRO 6000 Blackwell Server Edition".to_string()],
            gpu_count: 1,
            ports: Vec::new(),
            name_prefix: "slicer".to_string(),
            desktop_port: 6080,
            rest_url: DEFAULT_REST_URL.to_string(),
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
        }
    }
}

impl LaunchConfig {
    /// Build the immutable pod request for a launch at `unix_seconds`.
    #[must_use]
    pub fn pod_spec(&self, unix_seconds: i64) -> PodSpec {
        PodSpec {
            name: pod_name(&self.name_prefix, unix_seconds),
            template_id: self.template_id.clone(),
            network_volume_id: self.network_volume_id.clone(),
            gpu_types: self.gpu_types.clone(),
            gpu_count: self.gpu_count,
            ports: self.ports.clone(),
        }
    }

    /// Validate every field.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<()> {
        validate_config_value("template_id", &self.template_id)?;
        validate_config_value("network_volume_id", &self.network_volume_id)?;
        validate_config_value("gpu_types", &self.gpu_types.join(","))?;
        validate_config_value("gpu_count", &self.gpu_count.to_string())?;
        validate_config_value("ports", &self.ports.join(","))?;
        validate_config_value("name_prefix", &self.name_prefix)?;
        validate_config_value("desktop_port", &self.desktop_port.to_string())?;
        Ok(())
    }

    /// Set `key` from its string form. The value is validated first.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        match key {
            "template_id" => self.template_id = value.to_string(),
            "network_volume_id" => self.network_volume_id = value.to_string(),
            "gpu_types" => self.gpu_types = split_list(value),
            "gpu_count" => self.gpu_count = value.parse()?,
            "ports" => self.ports = split_list(value),
            "name_prefix" => self.name_prefix = value.to_string(),
            "desktop_port" => self.desktop_port = value.parse()?,
            _ => unreachable!("key validated against VALID_CONFIG_KEYS"),
        }
        Ok(())
    }
}

/// Split a comma-separated list, dropping blanks.
#[must_use]
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let invalid = |hint: &str| -> anyhow::Error {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            hint: hint.to_string(),
        }
        .into()
    };

    match key {
        "template_id" | "network_volume_id" | "name_prefix" => {
            if value.trim().is_empty() {
                return Err(invalid("Value must not be empty"));
            }
        }
        "gpu_types" => {
            if split_list(value).is_empty() {
                return Err(invalid("Provide at least one GPU type, comma-separated"));
            }
        }
        "gpu_count" => match value.parse::<u32>() {
            Ok(n) if (1..=MAX_GPU_COUNT).contains(&n) => {}
            _ => return Err(invalid(&format!("Expected a number from 1 to {MAX_GPU_COUNT}"))),
        },
        "desktop_port" => match value.parse::<u16>() {
            Ok(n) if n > 0 => {}
            _ => return Err(invalid("Expected a port number from 1 to 65535")),
        },
        "ports" => {
            let ok = split_list(value).iter().all(|p| {
                PORT_SPEC_RE.is_match(p)
                    && p.split('/')
                        .next()
                        .and_then(|n| n.parse::<u16>().ok())
                        .is_some_and(|n| n > 0)
            });
            if !ok {
                return Err(invalid("Expected entries like 6080/http or 22/tcp, comma-separated"));
            }
        }
        _ => {}
    }
    Ok(())
}
