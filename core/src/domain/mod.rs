//! Domain layer - Pure business logic and data models.
//!
//! This module contains the port binding model and the descriptor line
//! matcher. These types have no I/O dependencies and can be tested in isolation.

mod binding;
mod port_line;

// Re-export all domain types
pub use binding::{scan_descriptor, sort_bindings, ComposeDescriptor, PortBinding};
pub use port_line::{extract_host_ports, HostSpec, PortLine, Protocol};
