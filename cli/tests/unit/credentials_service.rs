//! API key resolution order and persistence.

#![allow(clippy::expect_used)]

use podlaunch_cli::application::services::credentials::{CredentialOptions, resolve_api_key};
use podlaunch_cli::domain::CredentialError;

use crate::mocks::{MemoryCredentialStore, RecordingReporter, ScriptedPrompt};

fn env(key: &str) -> CredentialOptions {
    CredentialOptions {
        env_key: Some(key.to_string()),
        force_prompt: false,
    }
}

#[test]
fn environment_key_wins_without_prompting() {
    let store = MemoryCredentialStore::holding("saved");
    let prompt = ScriptedPrompt::new(true, "typed", true);
    let reporter = RecordingReporter::default();

    let key = resolve_api_key(&store, &prompt, &reporter, env("  from-env \n")).expect("key");

    assert_eq!(key.expose(), "from-env");
    assert!(prompt.asked().is_empty());
}

#[test]
fn blank_environment_falls_through_to_saved_key() {
    let store = MemoryCredentialStore::holding("saved");
    let prompt = ScriptedPrompt::new(true, "typed", true);
    let reporter = RecordingReporter::default();

    let key = resolve_api_key(&store, &prompt, &reporter, env("   ")).expect("key");

    assert_eq!(key.expose(), "saved");
    assert_eq!(prompt.asked(), vec!["reuse"]);
}

#[test]
fn declined_saved_key_prompts_and_saves() {
    let store = MemoryCredentialStore::holding("old");
    let prompt = ScriptedPrompt::new(false, "new-key", true);
    let reporter = RecordingReporter::default();

    let key =
        resolve_api_key(&store, &prompt, &reporter, CredentialOptions::default()).expect("key");

    assert_eq!(key.expose(), "new-key");
    assert_eq!(prompt.asked(), vec!["reuse", "key", "save"]);
    assert_eq!(store.saved().as_deref(), Some("new-key"));
    assert!(reporter.any("success:", "API key saved to"));
}

#[test]
fn nothing_saved_prompts_directly() {
    let store = MemoryCredentialStore::default();
    let prompt = ScriptedPrompt::new(true, "typed", false);
    let reporter = RecordingReporter::default();

    let key =
        resolve_api_key(&store, &prompt, &reporter, CredentialOptions::default()).expect("key");

    assert_eq!(key.expose(), "typed");
    assert_eq!(prompt.asked(), vec!["key", "save"]);
    assert!(store.saved().is_none());
}

#[test]
fn force_prompt_ignores_environment_and_saved_key() {
    let store = MemoryCredentialStore::holding("saved");
    let prompt = ScriptedPrompt::new(true, "fresh", false);
    let reporter = RecordingReporter::default();
    let opts = CredentialOptions {
        env_key: Some("from-env".to_string()),
        force_prompt: true,
    };

    let key = resolve_api_key(&store, &prompt, &reporter, opts).expect("key");

    assert_eq!(key.expose(), "fresh");
    assert_eq!(prompt.asked(), vec!["key", "save"]);
}

#[test]
fn empty_entered_key_is_rejected() {
    let store = MemoryCredentialStore::default();
    let prompt = ScriptedPrompt::new(true, "   ", true);
    let reporter = RecordingReporter::default();

    let err = resolve_api_key(&store, &prompt, &reporter, CredentialOptions::default())
        .expect_err("empty key");

    assert!(matches!(err, CredentialError::Empty));
    assert_eq!(prompt.asked(), vec!["key"]);
}

#[test]
fn unreadable_store_warns_and_prompts() {
    let store = MemoryCredentialStore {
        load_fails: true,
        ..MemoryCredentialStore::default()
    };
    let prompt = ScriptedPrompt::new(true, "typed", false);
    let reporter = RecordingReporter::default();

    let key =
        resolve_api_key(&store, &prompt, &reporter, CredentialOptions::default()).expect("key");

    assert_eq!(key.expose(), "typed");
    assert!(reporter.any("warn:", "permission denied"));
}

#[test]
fn failed_save_is_only_a_warning() {
    let store = MemoryCredentialStore {
        save_fails: true,
        ..MemoryCredentialStore::default()
    };
    let prompt = ScriptedPrompt::new(true, "typed", true);
    let reporter = RecordingReporter::default();

    let key =
        resolve_api_key(&store, &prompt, &reporter, CredentialOptions::default()).expect("key");

    assert_eq!(key.expose(), "typed");
    assert!(reporter.any("warn:", "read-only file system"));
}
