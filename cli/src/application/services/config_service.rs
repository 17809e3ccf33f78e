//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::LaunchConfig;

/// Load configuration.
///
/// # Errors
///
/// Returns an error if the stored configuration cannot be read or is invalid.
pub fn load_config(store: &impl ConfigStore) -> Result<LaunchConfig> {
    let config = store.load()?;
    config.validate()?;
    Ok(config)
}

/// Save configuration.
///
/// # Errors
///
/// Returns an error if the configuration cannot be written.
pub fn save_config(store: &impl ConfigStore, config: &LaunchConfig) -> Result<()> {
    store.save(config)
}

/// Validate and persist a single setting, returning the updated config.
///
/// # Errors
///
/// Returns an error if the key or value is invalid, or the file cannot be
/// read or written.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<LaunchConfig> {
    let mut config = store.load()?;
    config.set(key, value)?;
    save_config(store, &config)?;
    Ok(config)
}
