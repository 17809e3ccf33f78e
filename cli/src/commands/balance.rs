//! `podlaunch balance`: show account balance and estimated runtime.

use std::process::ExitCode;

use anyhow::{Context, Result};

use crate::app::AppContext;
use crate::application::ports::ControlPlane;
use crate::application::services::config_service;
use crate::infra::runpod::RunpodClient;

/// Run `podlaunch balance`.
///
/// # Errors
///
/// Returns an error if no API key could be obtained or the account query
/// failed.
pub async fn run(app: &AppContext, new_key: bool) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let client = RunpodClient::new(app.api_key(new_key)?, &config.rest_url, &config.graphql_url)?;
    let status = client
        .query_account()
        .await
        .context("failed to fetch account balance")?;
    app.renderer().render_account(&status);
    Ok(ExitCode::SUCCESS)
}
