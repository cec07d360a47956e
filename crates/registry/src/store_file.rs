//! JSON file-backed registry store with atomic writes.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use {
    async_trait::async_trait,
    tokio::{fs, io::AsyncWriteExt},
    tracing::{debug, info, warn},
};

use crate::{Error, Result, registry::ChannelRegistry, store::RegistryStore};

/// Registry snapshot kept in a single JSON file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Atomic write: write to temp, keep `.bak` of the old file, rename over
    /// target.
    async fn atomic_write(&self, registry: &ChannelRegistry) -> Result<()> {
        self.ensure_parent().await?;
        let json = serde_json::to_string_pretty(registry)?;
        let tmp = sibling(&self.path, ".tmp");

        let mut file = fs::File::create(&tmp).await?;
        file.write_all(json.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        if fs::try_exists(&self.path).await.unwrap_or(false) {
            fs::copy(&self.path, sibling(&self.path, ".bak")).await?;
        }

        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

/// `config.json` + `.tmp` -> `config.json.tmp`.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("registry"));
    name.push(suffix);
    path.with_file_name(name)
}

#[async_trait]
impl RegistryStore for FileStore {
    async fn load(&self) -> Result<ChannelRegistry> {
        if !fs::try_exists(&self.path).await? {
            info!(path = %self.path.display(), "no registry file, creating an empty one");
            let registry = ChannelRegistry::new();
            self.atomic_write(&registry).await?;
            return Ok(registry);
        }
        let data = fs::read_to_string(&self.path).await?;
        let mut registry: ChannelRegistry =
            serde_json::from_str(&data).map_err(|e| Error::config_corrupt(&self.path, e))?;
        let dropped = registry
            .check()
            .map_err(|reason| Error::invalid_entry(&self.path, reason))?;
        if dropped > 0 {
            warn!(path = %self.path.display(), dropped, "dropped repeated registrants");
        }
        debug!(
            path = %self.path.display(),
            channels = registry.len(),
            "loaded registry"
        );
        Ok(registry)
    }

    async fn save(&self, registry: &ChannelRegistry) -> Result<()> {
        self.atomic_write(registry).await?;
        debug!(path = %self.path.display(), "saved registry");
        Ok(())
    }
}
