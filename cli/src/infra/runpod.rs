//! RunPod control-plane client.
//!
//! Create and delete go through the REST API with bearer auth; pod status
//! and account balance through GraphQL. Response mapping is kept in free
//! functions so it can be tested without a network.

use std::time::Duration;

use anyhow::{Context, Result};
use runpod_api_types::{
    AccountData, CreatePodRequest, ErrorResponse, GraphQlRequest, GraphQlResponse, PodResponse,
    PodStatusData, PortInfo, PortType,
};
use tracing::debug;

use crate::application::ports::ControlPlane;
use crate::domain::readiness::{PortBinding, Protocol, RuntimeInfo};
use crate::domain::{
    AccountStatus, ApiKey, CreateError, DeleteError, PodHandle, PodId, PodSpec, QueryError,
    RawStatus,
};

/// Timeout of create and delete calls.
pub const MUTATION_TIMEOUT: Duration = Duration::from_secs(30);
/// Timeout of status and account queries.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Production implementation of [`ControlPlane`].
pub struct RunpodClient {
    http: reqwest::Client,
    api_key: ApiKey,
    rest_url: String,
    graphql_url: String,
}

impl RunpodClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: ApiKey, rest_url: &str, graphql_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("podlaunch/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("cannot build HTTP client")?;
        Ok(Self {
            http,
            api_key,
            rest_url: rest_url.trim_end_matches('/').to_string(),
            graphql_url: graphql_url.to_string(),
        })
    }

    async fn graphql<V: serde::Serialize>(
        &self,
        request: &GraphQlRequest<V>,
    ) -> Result<(u16, String), QueryError> {
        let response = self
            .http
            .post(&self.graphql_url)
            .query(&[("api_key", self.api_key.expose())])
            .json(request)
            .timeout(QUERY_TIMEOUT)
            .send()
            .await
            .map_err(|e| QueryError::Transport(transport_message(e)))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| QueryError::Transport(transport_message(e)))?;
        Ok((status, body))
    }
}

impl ControlPlane for RunpodClient {
    async fn create(&self, spec: &PodSpec) -> Result<PodHandle, CreateError> {
        let request = CreatePodRequest {
            name: spec.name.clone(),
            template_id: spec.template_id.clone(),
            network_volume_id: spec.network_volume_id.clone(),
            gpu_type_ids: spec.gpu_types.clone(),
            gpu_count: spec.gpu_count,
            ports: spec.ports.clone(),
        };
        debug!(name = %spec.name, gpus = ?spec.gpu_types, count = spec.gpu_count, "creating pod");
        let response = self
            .http
            .post(format!("{}/pods", self.rest_url))
            .bearer_auth(self.api_key.expose())
            .json(&request)
            .timeout(MUTATION_TIMEOUT)
            .send()
            .await
            .map_err(|e| CreateError::Transport(transport_message(e)))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| CreateError::Transport(transport_message(e)))?;
        debug!(status, "create response");
        parse_create_response(status, &body)
    }

    async fn query_status(&self, id: &PodId) -> Result<RawStatus, QueryError> {
        let (status, body) = self
            .graphql(&GraphQlRequest::pod_status(id.as_str()))
            .await?;
        Ok(parse_status_body(status, &body))
    }

    async fn delete(&self, id: &PodId) -> Result<(), DeleteError> {
        if id.is_empty() || self.api_key.is_empty() {
            return Ok(());
        }
        debug!(pod = %id, "deleting pod");
        let response = self
            .http
            .delete(format!("{}/pods/{}", self.rest_url, id.as_str()))
            .bearer_auth(self.api_key.expose())
            .timeout(MUTATION_TIMEOUT)
            .send()
            .await
            .map_err(|e| DeleteError::Transport(transport_message(e)))?;
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        delete_outcome(status, &body)
    }

    async fn query_account(&self) -> Result<AccountStatus, QueryError> {
        let (status, body) = self.graphql(&GraphQlRequest::account()).await?;
        parse_account_body(status, &body)
    }
}

/// reqwest errors can embed the request URL, which carries the API key for
/// GraphQL calls. The URL is stripped before the message leaves this module.
fn transport_message(err: reqwest::Error) -> String {
    let err = err.without_url();
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

// ── Response mapping ──────────────────────────────────────────────────────────

/// Map a create response to a handle.
///
/// # Errors
///
/// Returns [`CreateError`] unless the status is 2xx and the body carries a
/// non-empty pod id.
pub fn parse_create_response(status: u16, body: &str) -> Result<PodHandle, CreateError> {
    if !is_success(status) {
        return Err(match serde_json::from_str::<ErrorResponse>(body) {
            Ok(envelope) if !envelope.error.is_empty() => CreateError::Api {
                status,
                message: envelope.error,
            },
            _ => CreateError::Status {
                status,
                body: body.to_string(),
            },
        });
    }
    let pod: PodResponse = serde_json::from_str(body).map_err(|e| CreateError::Parse {
        reason: e.to_string(),
        body: body.to_string(),
    })?;
    if pod.id.is_empty() {
        return Err(CreateError::MissingId {
            body: body.to_string(),
        });
    }
    Ok(PodHandle {
        id: PodId::new(pod.id),
        gpu_display_name: pod.machine.gpu_display_name,
    })
}

/// Map a pod status response. Anything but a well-formed answer about the
/// pod degrades to [`RawStatus::unavailable`].
#[must_use]
pub fn parse_status_body(status: u16, body: &str) -> RawStatus {
    if !is_success(status) {
        debug!(status, "status query rejected");
        return RawStatus::unavailable();
    }
    let response: GraphQlResponse<PodStatusData> = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => {
            debug!(error = %e, "status body unparsable");
            return RawStatus::unavailable();
        }
    };
    if let Some(err) = response.errors.first() {
        debug!(error = %err.message, "status query returned errors");
        return RawStatus::unavailable();
    }
    let Some(pod) = response.data.and_then(|d| d.pod) else {
        return RawStatus::unavailable();
    };
    RawStatus {
        desired_status: Some(pod.desired_status),
        runtime: pod.runtime.map(|rt| RuntimeInfo {
            uptime_seconds: rt.uptime_in_seconds,
            gpu_count: rt.gpus.map_or(0, |g| g.len()),
            ports: rt
                .ports
                .unwrap_or_default()
                .into_iter()
                .map(port_binding)
                .collect(),
        }),
    }
}

fn port_binding(port: PortInfo) -> PortBinding {
    PortBinding {
        ip: port.ip,
        public: port.is_ip_public,
        private_port: port.private_port,
        public_port: port.public_port,
        protocol: match port.port_type {
            PortType::Tcp => Protocol::Tcp,
            PortType::Http => Protocol::Http,
            PortType::Other => Protocol::Other,
        },
    }
}

/// Map an account response.
///
/// # Errors
///
/// Returns [`QueryError`] for non-2xx statuses, unparsable bodies, GraphQL
/// errors, or a missing account.
pub fn parse_account_body(status: u16, body: &str) -> Result<AccountStatus, QueryError> {
    if !is_success(status) {
        return Err(QueryError::Status { status });
    }
    let response: GraphQlResponse<AccountData> =
        serde_json::from_str(body).map_err(|e| QueryError::Parse(e.to_string()))?;
    if let Some(err) = response.errors.first() {
        return Err(QueryError::Parse(err.message.clone()));
    }
    let myself = response
        .data
        .and_then(|d| d.myself)
        .ok_or_else(|| QueryError::Parse("no account in response".to_string()))?;
    Ok(AccountStatus {
        balance: myself.client_balance,
        burn_rate_per_hour: myself.current_spend_per_hr,
    })
}

/// Map a delete response. Only 200 and 204 count as deleted.
///
/// # Errors
///
/// Returns [`DeleteError::Status`] for any other status.
pub fn delete_outcome(status: u16, body: &str) -> Result<(), DeleteError> {
    match status {
        200 | 204 => Ok(()),
        _ => Err(DeleteError::Status {
            status,
            body: body.to_string(),
        }),
    }
}
