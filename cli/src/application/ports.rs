//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;

use anyhow::Result;

use crate::domain::{
    AccountStatus, ApiKey, ConnectionInfo, CreateError, DeleteError, ExitReason, LaunchConfig,
    PodHandle, PodId, PodSpec, QueryError, RawStatus,
};

// ── Control Plane Port ────────────────────────────────────────────────────────

/// Remote pod operations.
///
/// Each call carries its own request timeout; polling budgets are the
/// caller's concern.
#[allow(async_fn_in_trait)]
pub trait ControlPlane {
    /// Request a new pod. Succeeds only when the control plane returned an id.
    async fn create(&self, spec: &PodSpec) -> Result<PodHandle, CreateError>;

    /// Fetch the current status of a pod.
    ///
    /// Only transport failures are errors. A rejected or unparsable answer
    /// yields [`RawStatus::unavailable`].
    async fn query_status(&self, id: &PodId) -> Result<RawStatus, QueryError>;

    /// Delete a pod. An empty id or credential is a no-op success.
    async fn delete(&self, id: &PodId) -> Result<(), DeleteError>;

    /// Fetch the account balance and current spend.
    async fn query_account(&self) -> Result<AccountStatus, QueryError>;
}

// ── Endpoint Probe Port ───────────────────────────────────────────────────────

/// Plain HTTP reachability check of a service URL.
#[allow(async_fn_in_trait)]
pub trait EndpointProbe {
    /// GET `url` without following redirects and return the status code.
    async fn probe(&self, url: &str) -> Result<u16, QueryError>;
}

// ── Session Input Ports ───────────────────────────────────────────────────────

/// Waits for the operator to ask for termination.
#[allow(async_fn_in_trait)]
pub trait ConfirmationSource {
    /// Resolves with [`ExitReason::Confirmed`] on a line of input, or
    /// [`ExitReason::InputClosed`] when the input ends.
    async fn confirmed(&self) -> ExitReason;
}

/// Opens a URL for the operator.
pub trait BrowserLauncher {
    /// # Errors
    ///
    /// Returns an error if no browser could be launched.
    fn open(&self, url: &str) -> Result<()>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Update the message of the step in progress.
    fn progress(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

/// Session-level output shown while a pod is alive.
pub trait SessionView {
    /// Warn that ending the session deletes the pod.
    fn banner(&self, pod: &PodId);
    fn connection(&self, info: &ConnectionInfo);
    fn account(&self, status: &AccountStatus);
    /// Remind the operator how to end the session.
    fn terminate_hint(&self);
}

// ── Credential Ports ──────────────────────────────────────────────────────────

/// Persistence of the API key between runs.
pub trait CredentialStore {
    /// Load the saved key, `None` when nothing is saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read.
    fn load(&self) -> Result<Option<ApiKey>>;

    /// # Errors
    ///
    /// Returns an error if the key cannot be written.
    fn save(&self, key: &ApiKey) -> Result<()>;

    /// Where the key is kept, for messages.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}

/// Interactive questions asked while resolving the API key.
pub trait CredentialPrompt {
    /// Ask whether the saved key should be used.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn confirm_reuse(&self) -> Result<bool>;

    /// Read a key with hidden input.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn read_key(&self) -> Result<String>;

    /// Ask whether a freshly entered key should be saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn confirm_save(&self) -> Result<bool>;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts launch configuration persistence.
pub trait ConfigStore {
    /// Load the configuration, defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<LaunchConfig>;

    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save(&self, config: &LaunchConfig) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}
