//! Application context: unified state passed to every command handler.

use anyhow::Result;

use crate::application::services::credentials::{CredentialOptions, resolve_api_key};
use crate::domain::ApiKey;
use crate::infra::config::YamlConfigStore;
use crate::infra::console::TerminalPrompt;
use crate::infra::credentials::FileCredentialStore;
use crate::output::{HumanRenderer, OutputContext, TerminalReporter};

/// Environment variable checked before the saved key.
pub const API_KEY_ENV: &str = "RUNPOD_API_KEY";

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

/// Unified application context passed to every command handler.
///
/// Constructed once in `Cli::run()` and passed as `&AppContext` to all
/// command handlers.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Launch configuration store.
    pub config_store: YamlConfigStore,
    /// Saved API key.
    pub credential_store: FileCredentialStore,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: &AppFlags) -> Self {
        Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            config_store: YamlConfigStore,
            credential_store: FileCredentialStore::default(),
        }
    }

    #[must_use]
    pub fn renderer(&self) -> HumanRenderer<'_> {
        HumanRenderer::new(&self.output)
    }

    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }

    /// Resolve the API key: environment, saved key, then an interactive
    /// prompt. `force_prompt` skips the first two.
    ///
    /// # Errors
    ///
    /// Returns an error if no key could be obtained.
    pub fn api_key(&self, force_prompt: bool) -> Result<ApiKey> {
        let opts = CredentialOptions {
            env_key: std::env::var(API_KEY_ENV).ok(),
            force_prompt,
        };
        Ok(resolve_api_key(
            &self.credential_store,
            &TerminalPrompt,
            &self.reporter(),
            opts,
        )?)
    }
}
