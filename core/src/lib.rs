//! portmap Core Library
//!
//! Discovers the host ports declared by a directory of applications.
//! Each application lives in its own subdirectory of an apps root and may
//! carry a `compose.yml`. Port bindings are found by scanning the compose
//! text line by line, not by parsing YAML.
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Port binding model and the line matcher
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: Filesystem implementation
//! - `application`: The `PortScanner` service
//!
//! # Example
//! ```no_run
//! # async fn run() {
//! let bindings = portmap_core::scan("apps").await;
//! for binding in &bindings {
//!     println!("{binding}");
//! }
//! # }
//! ```

// Hexagonal architecture layers
pub mod domain;
pub mod ports;
pub mod adapters;
pub mod application;

pub mod config;
pub mod error;

use std::path::Path;

// Re-export domain types (primary API)
pub use domain::{
    extract_host_ports, scan_descriptor, ComposeDescriptor, HostSpec, PortBinding, PortLine,
    Protocol,
};

// Re-export other commonly used types
pub use adapters::FsDescriptorSource;
pub use application::PortScanner;
pub use config::{Config, ConfigStore};
pub use error::{Error, Result};
pub use ports::DescriptorSource;

/// Scan `root` on the local filesystem with the default settings.
///
/// Never fails: an unreadable root yields an empty list.
pub async fn scan(root: impl AsRef<Path>) -> Vec<PortBinding> {
    PortScanner::new().scan(root.as_ref()).await
}
