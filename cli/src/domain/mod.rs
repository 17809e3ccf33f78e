//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod account;
pub mod config;
pub mod connection;
pub mod error;
pub mod lifecycle;
pub mod pod;
pub mod readiness;

pub use account::{AccountStatus, RuntimeEstimate};
pub use config::{LaunchConfig, validate_config_key, validate_config_value};
pub use connection::ConnectionInfo;
pub use error::{
    ConfigError, CreateError, CredentialError, DeleteError, ProbeTimeout, QueryError,
    ReadinessTimeout,
};
pub use lifecycle::{ExitReason, LifecycleState};
pub use pod::{ApiKey, PodHandle, PodId, PodSpec};
pub use readiness::{Endpoints, Phase, RawStatus, ReadinessState, classify};
