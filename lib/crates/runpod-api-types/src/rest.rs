use serde::{Deserialize, Serialize};

/// Body of `POST /pods`.
///
/// Ports are inherited from the template when `ports` is empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatePodRequest {
    pub name: String,
    pub template_id: String,
    pub network_volume_id: String,
    pub gpu_type_ids: Vec<String>,
    pub gpu_count: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<String>,
}

/// Pod as returned by `POST /pods` and `GET /pods/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PodResponse {
    #[serde(deserialize_with = "crate::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub desired_status: String,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub image_name: String,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub machine: Machine,
}

/// Hardware the pod was scheduled on.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Machine {
    #[serde(deserialize_with = "crate::null_as_default")]
    pub gpu_display_name: String,
}

/// Error envelope the REST API returns on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: String,
}
