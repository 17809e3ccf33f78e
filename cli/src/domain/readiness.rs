//! Readiness domain types and the pure phase classifier.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! All functions take data in and return data out.

use std::collections::BTreeMap;
use std::fmt;

// ── Raw status ────────────────────────────────────────────────────────────────

/// Port protocol as exposed by the pod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Protocol {
    Tcp,
    Http,
    Other,
}

/// One port of the pod as reported by the control plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortBinding {
    /// Address the port is reachable on; `None` while networking is set up.
    pub ip: Option<String>,
    pub public: bool,
    pub private_port: u16,
    pub public_port: u16,
    pub protocol: Protocol,
}

impl PortBinding {
    /// Reachable from outside over plain TCP.
    #[must_use]
    pub fn is_public_tcp(&self) -> bool {
        self.public
            && self.protocol == Protocol::Tcp
            && self.ip.as_deref().is_some_and(|ip| !ip.is_empty())
    }
}

/// Runtime descriptor; present once the container has been scheduled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeInfo {
    pub uptime_seconds: u64,
    pub gpu_count: usize,
    pub ports: Vec<PortBinding>,
}

/// Status snapshot of a pod.
///
/// `desired_status == None && runtime == None` means the query degraded
/// (non-2xx or unparsable body) and nothing is known this tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawStatus {
    pub desired_status: Option<String>,
    pub runtime: Option<RuntimeInfo>,
}

impl RawStatus {
    /// Status used when the control plane gave no usable answer.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        self.desired_status.is_none() && self.runtime.is_none()
    }
}

// ── Phase ─────────────────────────────────────────────────────────────────────

/// Provisioning phase derived from a [`RawStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing known yet (query degraded or not issued).
    #[default]
    Unknown,
    /// Accepted but no runtime descriptor.
    Queued,
    /// Runtime present, no GPU assigned yet.
    PullingImage,
    /// GPU assigned, no ports yet.
    StartingServices,
    /// Ports present but none public over TCP.
    ConfiguringNetwork,
    /// Public address and at least one public TCP port.
    Ready,
}

impl Phase {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "starting",
            Self::Queued => "queued",
            Self::PullingImage => "pulling image",
            Self::StartingServices => "starting services",
            Self::ConfiguringNetwork => "configuring network",
            Self::Ready => "running",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a status snapshot.
///
/// Only [`Phase::Ready`] gates the state machine; the other phases exist for
/// progress reporting.
#[must_use]
pub fn classify(status: &RawStatus) -> Phase {
    if status.is_unavailable() {
        return Phase::Unknown;
    }
    let Some(runtime) = &status.runtime else {
        return Phase::Queued;
    };
    if runtime.ports.iter().any(PortBinding::is_public_tcp) {
        return Phase::Ready;
    }
    if !runtime.ports.is_empty() {
        return Phase::ConfiguringNetwork;
    }
    if runtime.gpu_count > 0 {
        Phase::StartingServices
    } else {
        Phase::PullingImage
    }
}

// ── Endpoints ─────────────────────────────────────────────────────────────────

/// Network endpoints discovered while polling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoints {
    pub public_ip: Option<String>,
    /// protocol → (internal port → external port), public ports only.
    pub mappings: BTreeMap<Protocol, BTreeMap<u16, u16>>,
}

impl Endpoints {
    /// Collect the public endpoints of a status snapshot.
    #[must_use]
    pub fn from_status(status: &RawStatus) -> Self {
        let mut endpoints = Self::default();
        let Some(runtime) = &status.runtime else {
            return endpoints;
        };
        for port in runtime.ports.iter().filter(|p| p.public) {
            if endpoints.public_ip.is_none() && port.protocol == Protocol::Tcp {
                endpoints.public_ip = port.ip.clone().filter(|ip| !ip.is_empty());
            }
            endpoints
                .mappings
                .entry(port.protocol)
                .or_default()
                .insert(port.private_port, port.public_port);
        }
        endpoints
    }

    /// External TCP port mapped to `internal`, if any.
    #[must_use]
    pub fn tcp_port(&self, internal: u16) -> Option<u16> {
        self.mappings
            .get(&Protocol::Tcp)
            .and_then(|m| m.get(&internal))
            .copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.public_ip.is_none() && self.mappings.is_empty()
    }
}

/// Phase plus endpoints, as last observed by the poller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadinessState {
    pub phase: Phase,
    pub endpoints: Endpoints,
}

impl ReadinessState {
    /// Fold a new snapshot in. Endpoints are kept from earlier polls when the
    /// new snapshot carries none, so a degraded tick does not erase them.
    pub fn observe(&mut self, status: &RawStatus) {
        self.phase = classify(status);
        let endpoints = Endpoints::from_status(status);
        if !endpoints.is_empty() {
            self.endpoints = endpoints;
        }
    }
}

// ── Endpoint probe ────────────────────────────────────────────────────────────

/// HTTP statuses that prove a service is listening, auth-gated or not.
pub const LISTENING_STATUSES: [u16; 3] = [200, 302, 401];

#[must_use]
pub fn is_listening(status: u16) -> bool {
    LISTENING_STATUSES.contains(&status)
}
