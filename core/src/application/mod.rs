//! Application layer - Use case services.
//!
//! Services are thin orchestrators that:
//! - Use ports (traits) for external dependencies
//! - Delegate matching to the domain layer
//! - Return domain types as outputs

mod port_scanner;

pub use port_scanner::PortScanner;
