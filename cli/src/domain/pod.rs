//! Pod identity and launch request types.
//!
//! Pure data only: no I/O, no async.

use std::fmt;

/// Immutable description of the pod to request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodSpec {
    /// Unique per launch, `<prefix>-<unix seconds>`.
    pub name: String,
    pub template_id: String,
    pub network_volume_id: String,
    pub gpu_types: Vec<String>,
    pub gpu_count: u32,
    /// `"<port>/<tcp|http>"` entries. Empty inherits the template's ports.
    pub ports: Vec<String>,
}

/// Build a launch name from a prefix and a unix timestamp.
#[must_use]
pub fn pod_name(prefix: &str, unix_seconds: i64) -> String {
    format!("{prefix}-{unix_seconds}")
}

/// Opaque pod identifier assigned by the control plane.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PodId(String);

impl PodId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A pod that exists remotely and is billed until deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodHandle {
    pub id: PodId,
    /// Assigned GPU; empty until the scheduler has placed the pod.
    pub gpu_display_name: String,
}

/// Bearer token for the control plane.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into().trim().to_string())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// URL of the HTTP gateway RunPod exposes for `port` on `pod`.
#[must_use]
pub fn proxy_url(pod: &PodId, port: u16) -> String {
    format!("https://{pod}-{port}.proxy.runpod.net")
}
