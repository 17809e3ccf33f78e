//! Version command

use std::process::ExitCode;

use anyhow::{Context, Result};

use crate::app::AppContext;
use crate::output::outln;

/// Run the version command.
///
/// # Errors
///
/// Returns an error if the JSON output cannot be serialized.
pub fn run(app: &AppContext, json: bool) -> Result<ExitCode> {
    let version = env!("CARGO_PKG_VERSION");

    if json {
        let out = serde_json::to_string(&serde_json::json!({ "version": version }))
            .context("JSON serialization failed")?;
        outln!("{out}");
    } else {
        app.renderer().render_version(version);
    }
    Ok(ExitCode::SUCCESS)
}
