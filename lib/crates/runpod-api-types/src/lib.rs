//! Wire types for the RunPod control plane.
//!
//! `rest` covers `https://rest.runpod.io/v1` (pod create / delete) and
//! `graphql` covers `https://api.runpod.io/graphql` (pod status and account
//! balance). Every response field is defaulted so partially-populated pods
//! still deserialize while they are provisioning.

pub mod graphql;
pub mod rest;

pub use graphql::{
    ACCOUNT_QUERY, AccountData, GpuInfo, GraphQlError, GraphQlRequest, GraphQlResponse, Myself,
    POD_STATUS_QUERY, PodStatus, PodStatusData, PodStatusVariables, PortInfo, PortType,
    RuntimeInfo,
};
pub use rest::{CreatePodRequest, ErrorResponse, Machine, PodResponse};

use serde::{Deserialize, Deserializer};

/// Read `null` as the field's default. The API sends explicit nulls for
/// values it has not assigned yet.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
