//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.
//!
//! Errors raised before a pod exists are fatal; everything raised afterwards
//! is reported and the run carries on towards cleanup.

use thiserror::Error;

use crate::domain::readiness::ReadinessState;

// ── Pre-resource (fatal) ──────────────────────────────────────────────────────

/// The API key could not be obtained.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("API key cannot be empty.")]
    Empty,

    #[error("could not read API key: {0}")]
    Prompt(String),

    #[error("could not access the credential store: {0}")]
    Store(String),
}

/// The pod could not be created. Nothing exists remotely, so nothing to clean up.
#[derive(Debug, Error)]
pub enum CreateError {
    /// The control plane answered with a structured error message.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Non-2xx response without a parsable error envelope.
    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    /// 2xx response that did not carry a pod id.
    #[error("no pod ID in response: {body}")]
    MissingId { body: String },

    #[error("could not parse response: {reason} (body: {body})")]
    Parse { reason: String, body: String },

    #[error("API request failed: {0}")]
    Transport(String),
}

// ── Post-resource (non-fatal) ─────────────────────────────────────────────────

/// A status or account query failed at the transport level.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected response ({status})")]
    Status { status: u16 },

    #[error("could not parse response: {0}")]
    Parse(String),
}

/// Provisioning did not complete within its wait budget.
#[derive(Debug, Error)]
#[error("pod did not expose a public port after {attempts} status checks (last phase: {})", .last.phase)]
pub struct ReadinessTimeout {
    pub attempts: u32,
    /// Whatever was observed on the last poll; endpoints may be partial.
    pub last: ReadinessState,
}

/// The desktop gateway never answered within its wait budget.
#[derive(Debug, Error)]
#[error("timeout waiting for {url} after {attempts} attempts")]
pub struct ProbeTimeout {
    pub url: String,
    pub attempts: u32,
}

/// The final delete was rejected. Reported, never retried.
#[derive(Debug, Error)]
pub enum DeleteError {
    #[error("failed to terminate pod ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("API request failed: {0}")]
    Transport(String),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{hint}")]
    InvalidValue {
        key: String,
        value: String,
        hint: String,
    },
}
