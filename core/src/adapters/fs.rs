//! Filesystem descriptor source.
//!
//! Reads `<root>/<app>/<compose file>` with `tokio::fs`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::config::DEFAULT_COMPOSE_FILE;
use crate::error::{Error, Result};
use crate::ports::DescriptorSource;

/// Descriptor source backed by the local filesystem.
#[derive(Debug, Clone)]
pub struct FsDescriptorSource {
    /// File name looked up inside each application directory.
    compose_file: String,
}

impl FsDescriptorSource {
    /// Create a source looking for `compose.yml`.
    pub fn new() -> Self {
        Self::with_compose_file(DEFAULT_COMPOSE_FILE)
    }

    /// Create a source looking for a custom descriptor file name.
    pub fn with_compose_file(compose_file: impl Into<String>) -> Self {
        Self {
            compose_file: compose_file.into(),
        }
    }

    /// Path of an application's descriptor.
    pub fn descriptor_path(&self, root: &Path, app: &str) -> PathBuf {
        root.join(app).join(&self.compose_file)
    }
}

impl Default for FsDescriptorSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorSource for FsDescriptorSource {
    async fn list_apps(&self, root: &Path) -> Result<Vec<String>> {
        let read_dir_err = |source: std::io::Error| Error::ReadDir {
            path: root.to_path_buf(),
            source,
        };

        let mut entries = fs::read_dir(root).await.map_err(read_dir_err)?;
        let mut apps = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(read_dir_err)? {
            match entry.file_type().await {
                Ok(file_type) if file_type.is_dir() => {}
                Ok(_) => continue,
                Err(e) => {
                    debug!(
                        path = %entry.path().display(),
                        error = %e,
                        "Cannot stat entry, skipping"
                    );
                    continue;
                }
            }

            match entry.file_name().into_string() {
                Ok(name) => apps.push(name),
                Err(name) => {
                    debug!(name = ?name, "Non UTF-8 app directory name, skipping");
                }
            }
        }

        Ok(apps)
    }

    async fn read_descriptor(&self, root: &Path, app: &str) -> Result<Option<String>> {
        let path = self.descriptor_path(root, app);
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Io(e)),
        }
    }
}
