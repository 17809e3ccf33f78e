//! File-backed API key store.

use std::path::PathBuf;

use anyhow::Result;

use crate::application::ports::CredentialStore;
use crate::domain::ApiKey;
use crate::infra::files;

/// Keeps the key in `~/.podlaunch/credentials`, readable by the owner only.
#[derive(Debug, Default)]
pub struct FileCredentialStore {
    path: Option<PathBuf>,
}

impl FileCredentialStore {
    /// Store at an explicit location instead of the home directory.
    #[must_use]
    pub fn at(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<ApiKey>> {
        let Some(content) = files::read_optional(&self.path()?)? else {
            return Ok(None);
        };
        let key = ApiKey::new(content);
        Ok((!key.is_empty()).then_some(key))
    }

    fn save(&self, key: &ApiKey) -> Result<()> {
        files::write_private(&self.path()?, &format!("{}\n", key.expose()))
    }

    fn path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Ok(files::state_dir()?.join("credentials")),
        }
    }
}
