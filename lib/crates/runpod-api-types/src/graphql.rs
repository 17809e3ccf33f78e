use serde::{Deserialize, Serialize};

/// Pod status query. Runtime stays `null` until the container is scheduled.
pub const POD_STATUS_QUERY: &str = "query Pod($input: PodFilter!) { pod(input: $input) { \
     id desiredStatus machine { gpuDisplayName } \
     runtime { uptimeInSeconds \
       ports { ip isIpPublic privatePort publicPort type } \
       gpus { id gpuUtilPercent } } } }";

/// Account balance and current spend.
pub const ACCOUNT_QUERY: &str = "query { myself { currentSpendPerHr clientBalance } }";

/// GraphQL request envelope.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<V: Serialize> {
    pub query: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<V>,
}

impl GraphQlRequest<PodStatusVariables> {
    #[must_use]
    pub fn pod_status(pod_id: &str) -> Self {
        Self {
            query: POD_STATUS_QUERY,
            variables: Some(PodStatusVariables {
                input: PodFilter {
                    pod_id: pod_id.to_string(),
                },
            }),
        }
    }
}

impl GraphQlRequest<()> {
    #[must_use]
    pub fn account() -> Self {
        Self {
            query: ACCOUNT_QUERY,
            variables: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PodStatusVariables {
    pub input: PodFilter,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodFilter {
    pub pod_id: String,
}

/// GraphQL response envelope. `data` is absent when `errors` is set.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GraphQlError {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PodStatusData {
    pub pod: Option<PodStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PodStatus {
    pub id: String,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub desired_status: String,
    pub runtime: Option<RuntimeInfo>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RuntimeInfo {
    #[serde(deserialize_with = "crate::null_as_default")]
    pub uptime_in_seconds: u64,
    pub ports: Option<Vec<PortInfo>>,
    pub gpus: Option<Vec<GpuInfo>>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PortInfo {
    pub ip: Option<String>,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub is_ip_public: bool,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub private_port: u16,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub public_port: u16,
    #[serde(rename = "type", deserialize_with = "crate::null_as_default")]
    pub port_type: PortType,
}

/// Port protocol as reported by the control plane. A null, missing, or
/// unknown type is `Other` and never counts as a TCP mapping.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "lowercase")]
pub enum PortType {
    Tcp,
    Http,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct GpuInfo {
    pub id: String,
    pub gpu_util_percent: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountData {
    pub myself: Option<Myself>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Myself {
    #[serde(deserialize_with = "crate::null_as_default")]
    pub client_balance: f64,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub current_spend_per_hr: f64,
}
