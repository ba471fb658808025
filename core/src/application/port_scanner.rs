//! Compose port scanning application service.

use std::path::Path;

use futures::stream::{self, StreamExt};
use tracing::{debug, error};

use crate::adapters::FsDescriptorSource;
use crate::config::Config;
use crate::domain::{sort_bindings, ComposeDescriptor, PortBinding};
use crate::error::Result;
use crate::ports::DescriptorSource;

const DEFAULT_CONCURRENCY: usize = 8;

/// Application service collecting the host ports declared by every app.
///
/// Descriptors are read through the `DescriptorSource` trait, allowing
/// different implementations to be injected. Reads are fanned out up to the
/// concurrency limit and merged back in discovery order before sorting.
pub struct PortScanner<S: DescriptorSource = FsDescriptorSource> {
    source: S,
    concurrency: usize,
}

impl PortScanner<FsDescriptorSource> {
    /// Create a scanner reading `compose.yml` files from the filesystem.
    pub fn new() -> Self {
        Self::with_source(FsDescriptorSource::new())
    }

    /// Create a filesystem scanner from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::with_source(FsDescriptorSource::with_compose_file(&config.compose_file))
            .with_concurrency(config.effective_concurrency())
    }
}

impl Default for PortScanner<FsDescriptorSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DescriptorSource> PortScanner<S> {
    /// Create a scanner over the given descriptor source.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Set the maximum number of descriptors read at once.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Scan every app under `root`, never failing.
    ///
    /// If the root cannot be listed the error is logged and an empty list
    /// is returned.
    pub async fn scan(&self, root: &Path) -> Vec<PortBinding> {
        match self.try_scan(root).await {
            Ok(bindings) => bindings,
            Err(e) => {
                error!(root = %root.display(), error = %e, "Error reading apps directory");
                Vec::new()
            }
        }
    }

    /// Scan every app under `root`.
    ///
    /// Only a failure to list `root` itself is returned as an error. Apps
    /// without a readable descriptor contribute nothing.
    pub async fn try_scan(&self, root: &Path) -> Result<Vec<PortBinding>> {
        let apps = self.source.list_apps(root).await?;
        debug!(root = %root.display(), apps = apps.len(), "Scanning apps");

        let per_app: Vec<Vec<PortBinding>> = stream::iter(apps)
            .map(|app| self.scan_app(root, app))
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut bindings: Vec<PortBinding> = per_app.into_iter().flatten().collect();
        sort_bindings(&mut bindings);
        Ok(bindings)
    }

    async fn scan_app(&self, root: &Path, app: String) -> Vec<PortBinding> {
        match self.source.read_descriptor(root, &app).await {
            Ok(Some(text)) => {
                let bindings = ComposeDescriptor::new(app.as_str(), text).bindings();
                debug!(app = %app, ports = bindings.len(), "Scanned compose descriptor");
                bindings
            }
            Ok(None) => {
                debug!(app = %app, "No compose descriptor, skipping");
                Vec::new()
            }
            Err(e) => {
                debug!(app = %app, error = %e, "Unreadable compose descriptor, skipping");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::path::PathBuf;

    /// Mock descriptor source for testing.
    ///
    /// Apps are listed in insertion order. A descriptor of `Err` simulates an
    /// unreadable file.
    struct MockSource {
        apps: Vec<(String, std::result::Result<Option<String>, String>)>,
        listable: bool,
    }

    impl MockSource {
        fn new() -> Self {
            Self {
                apps: Vec::new(),
                listable: true,
            }
        }

        fn unlistable() -> Self {
            Self {
                apps: Vec::new(),
                listable: false,
            }
        }

        fn app(mut self, name: &str, descriptor: Option<&str>) -> Self {
            self.apps
                .push((name.to_string(), Ok(descriptor.map(str::to_string))));
            self
        }

        fn unreadable_app(mut self, name: &str) -> Self {
            self.apps
                .push((name.to_string(), Err("permission denied".to_string())));
            self
        }
    }

    impl DescriptorSource for MockSource {
        async fn list_apps(&self, root: &Path) -> Result<Vec<String>> {
            if !self.listable {
                return Err(Error::ReadDir {
                    path: root.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
                });
            }
            Ok(self.apps.iter().map(|(name, _)| name.clone()).collect())
        }

        async fn read_descriptor(&self, _root: &Path, app: &str) -> Result<Option<String>> {
            let (_, descriptor) = self
                .apps
                .iter()
                .find(|(name, _)| name == app)
                .expect("app was listed");
            descriptor.clone().map_err(|msg| {
                Error::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, msg))
            })
        }
    }

    fn root() -> PathBuf {
        PathBuf::from("/apps")
    }

    #[tokio::test]
    async fn test_scan_sorts_by_port() {
        let source = MockSource::new()
            .app("web", Some("ports:\n  - \"3232:3232\"\n"))
            .app("api", Some("ports:\n  - \"${PORT:-8081}:8081\"\n  - \"80:80\"\n"));

        let bindings = PortScanner::with_source(source).scan(&root()).await;
        assert_eq!(
            bindings,
            vec![
                PortBinding::new(80, "api"),
                PortBinding::new(3232, "web"),
                PortBinding::new(8081, "api"),
            ]
        );
    }

    #[tokio::test]
    async fn test_ties_keep_discovery_order() {
        let source = MockSource::new()
            .app("zeta", Some("- \"8080:80\"\n"))
            .app("alpha", Some("- \"8080:8080\"\n- \"3000:3000\"\n"))
            .app("mid", Some("- \"8080:81\"\n"));

        for concurrency in [1, 2, 8] {
            let scanner = PortScanner::with_source(MockSource {
                apps: source.apps.clone(),
                listable: true,
            })
            .with_concurrency(concurrency);
            let bindings = scanner.scan(&root()).await;
            let apps: Vec<&str> = bindings.iter().map(|b| b.app.as_str()).collect();
            assert_eq!(apps, vec!["alpha", "zeta", "alpha", "mid"]);
        }
    }

    #[tokio::test]
    async fn test_missing_and_unreadable_descriptors_are_skipped() {
        let source = MockSource::new()
            .app("no-compose", None)
            .unreadable_app("locked")
            .app("web", Some("- 8000:80/tcp\n"));

        let bindings = PortScanner::with_source(source).scan(&root()).await;
        assert_eq!(bindings, vec![PortBinding::new(8000, "web")]);
    }

    #[tokio::test]
    async fn test_unlistable_root() {
        let scanner = PortScanner::with_source(MockSource::unlistable());
        assert!(scanner.scan(&root()).await.is_empty());
        assert!(matches!(
            scanner.try_scan(&root()).await,
            Err(Error::ReadDir { .. })
        ));
    }

    #[tokio::test]
    async fn test_no_apps() {
        let scanner = PortScanner::with_source(MockSource::new());
        assert!(scanner.try_scan(&root()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_zero_concurrency_is_clamped() {
        let source = MockSource::new().app("web", Some("- \"80:80\"\n"));
        let scanner = PortScanner::with_source(source).with_concurrency(0);
        assert_eq!(scanner.scan(&root()).await.len(), 1);
    }
}
