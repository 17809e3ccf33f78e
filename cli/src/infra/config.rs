//! `ConfigStore` backed by `config.yaml` in the podlaunch state directory.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::config::LaunchConfig;
use crate::infra::files;

/// Overrides the config file location when set to a non-empty path.
pub const CONFIG_ENV: &str = "PODLAUNCH_CONFIG";

/// Reads and writes `~/.podlaunch/config.yaml`, or the file named by
/// [`CONFIG_ENV`]. A missing file means defaults.
pub struct YamlConfigStore;

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<LaunchConfig> {
        let path = self.path()?;
        let Some(content) = files::read_optional(&path)? else {
            return Ok(LaunchConfig::default());
        };
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn save(&self, config: &LaunchConfig) -> Result<()> {
        let content = serde_yaml::to_string(config).context("cannot serialize config")?;
        files::write_private(&self.path()?, &content)
    }

    fn path(&self) -> Result<PathBuf> {
        match std::env::var_os(CONFIG_ENV) {
            Some(val) if !val.is_empty() => Ok(PathBuf::from(val)),
            _ => Ok(files::state_dir()?.join("config.yaml")),
        }
    }
}
