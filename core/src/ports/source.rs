//! Descriptor source port (interface).

use std::path::Path;

use crate::error::Result;

/// Port for discovering applications and reading their compose descriptors.
///
/// This trait defines the interface the scanner uses to reach the apps root.
/// Implementations handle the storage details (filesystem, in-memory, etc.)
pub trait DescriptorSource: Send + Sync {
    /// List the application directory names directly under `root`.
    ///
    /// Names are returned in listing order. Non-directory entries are excluded.
    fn list_apps(
        &self,
        root: &Path,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;

    /// Read the compose descriptor of one application.
    ///
    /// Returns `Ok(None)` if the application has no descriptor.
    fn read_descriptor(
        &self,
        root: &Path,
        app: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
}
