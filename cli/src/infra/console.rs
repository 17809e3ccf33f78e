//! Operator input: termination confirmation, browser launch, key prompts.

use anyhow::{Context, Result};
use dialoguer::{Confirm, Password};
use tokio::sync::oneshot;
use tracing::debug;

use crate::application::ports::{BrowserLauncher, ConfirmationSource, CredentialPrompt};
use crate::domain::ExitReason;

// ── Confirmation ──────────────────────────────────────────────────────────────

/// Waits for a line on stdin.
///
/// The read happens on a dedicated thread: a blocking stdin read cannot be
/// cancelled, and it must not hold up runtime shutdown after an interrupt.
pub struct StdinConfirmation;

impl ConfirmationSource for StdinConfirmation {
    async fn confirmed(&self) -> ExitReason {
        let (tx, rx) = oneshot::channel();
        let spawned = std::thread::Builder::new()
            .name("stdin-confirm".to_string())
            .spawn(move || {
                let mut line = String::new();
                let reason = match std::io::stdin().read_line(&mut line) {
                    Ok(0) | Err(_) => ExitReason::InputClosed,
                    Ok(_) => ExitReason::Confirmed,
                };
                let _ = tx.send(reason);
            });
        if let Err(e) = spawned {
            debug!(error = %e, "cannot spawn stdin reader");
            return ExitReason::InputClosed;
        }
        rx.await.unwrap_or(ExitReason::InputClosed)
    }
}

// ── Browser ───────────────────────────────────────────────────────────────────

/// Opens URLs with the platform's default browser.
pub struct SystemBrowser;

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        open::that_detached(url).with_context(|| format!("cannot open {url}"))
    }
}

// ── Credential prompt ─────────────────────────────────────────────────────────

/// Terminal prompts backed by dialoguer.
pub struct TerminalPrompt;

impl CredentialPrompt for TerminalPrompt {
    fn confirm_reuse(&self) -> Result<bool> {
        Confirm::new()
            .with_prompt("Use saved RunPod API key?")
            .default(true)
            .interact()
            .context("cannot read answer")
    }

    fn read_key(&self) -> Result<String> {
        Password::new()
            .with_prompt("RunPod API key")
            .allow_empty_password(true)
            .interact()
            .context("cannot read API key")
    }

    fn confirm_save(&self) -> Result<bool> {
        Confirm::new()
            .with_prompt("Save this key for next time?")
            .default(true)
            .interact()
            .context("cannot read answer")
    }
}
