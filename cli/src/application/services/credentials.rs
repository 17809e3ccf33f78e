//! Application service: API key resolution.
//!
//! Order: environment, then the saved key (after asking), then a prompt.
//! A freshly entered key may be saved for the next run.

use crate::application::ports::{CredentialPrompt, CredentialStore, ProgressReporter};
use crate::domain::{ApiKey, CredentialError};

/// Inputs that steer resolution.
#[derive(Debug, Default)]
pub struct CredentialOptions {
    /// Value of `RUNPOD_API_KEY`, if set.
    pub env_key: Option<String>,
    /// Ignore the environment and the saved key.
    pub force_prompt: bool,
}

/// Resolve the API key for this run.
///
/// # Errors
///
/// Returns [`CredentialError`] if the prompt fails or the entered key is
/// empty. A saved key that cannot be read or written only produces a warning.
pub fn resolve_api_key(
    store: &impl CredentialStore,
    prompt: &impl CredentialPrompt,
    reporter: &impl ProgressReporter,
    opts: CredentialOptions,
) -> Result<ApiKey, CredentialError> {
    if !opts.force_prompt {
        if let Some(key) = opts.env_key.map(ApiKey::new).filter(|k| !k.is_empty()) {
            tracing::debug!("using API key from environment");
            return Ok(key);
        }

        match store.load() {
            Ok(Some(saved)) if !saved.is_empty() => {
                if prompt
                    .confirm_reuse()
                    .map_err(|e| CredentialError::Prompt(format!("{e:#}")))?
                {
                    return Ok(saved);
                }
            }
            Ok(_) => {}
            Err(e) => {
                reporter.warn(&CredentialError::Store(format!("{e:#}")).to_string());
            }
        }
    }

    let key = ApiKey::new(
        prompt
            .read_key()
            .map_err(|e| CredentialError::Prompt(format!("{e:#}")))?,
    );
    if key.is_empty() {
        return Err(CredentialError::Empty);
    }

    if prompt
        .confirm_save()
        .map_err(|e| CredentialError::Prompt(format!("{e:#}")))?
    {
        match store.save(&key) {
            Ok(()) => {
                let location = store
                    .path()
                    .map_or_else(|_| "credential store".to_string(), |p| p.display().to_string());
                reporter.success(&format!("API key saved to {location}"));
            }
            Err(e) => reporter.warn(&CredentialError::Store(format!("{e:#}")).to_string()),
        }
    }

    Ok(key)
}
