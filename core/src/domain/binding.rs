//! Port binding and compose descriptor models.

use serde::{Deserialize, Serialize};

use super::port_line::extract_host_ports;

// ============================================================================
// PortBinding
// ============================================================================

/// A host port declared by an application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortBinding {
    /// The host-side port number.
    pub port: u32,
    /// Name of the application directory declaring it.
    pub app: String,
}

impl PortBinding {
    pub fn new(port: u32, app: impl Into<String>) -> Self {
        Self {
            port,
            app: app.into(),
        }
    }
}

impl std::fmt::Display for PortBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.port, self.app)
    }
}

/// Sort bindings ascending by port.
///
/// The sort is stable: bindings sharing a port stay in encounter order.
pub fn sort_bindings(bindings: &mut [PortBinding]) {
    bindings.sort_by_key(|b| b.port);
}

// ============================================================================
// ComposeDescriptor
// ============================================================================

/// The raw compose file text of one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeDescriptor {
    pub app: String,
    pub text: String,
}

impl ComposeDescriptor {
    pub fn new(app: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            text: text.into(),
        }
    }

    /// One binding per port-yielding line, in text order.
    pub fn bindings(&self) -> Vec<PortBinding> {
        scan_descriptor(&self.app, &self.text)
    }
}

/// Extract the bindings of a single application's descriptor text.
pub fn scan_descriptor(app: &str, text: &str) -> Vec<PortBinding> {
    extract_host_ports(text)
        .into_iter()
        .map(|port| PortBinding::new(port, app))
        .collect()
}
