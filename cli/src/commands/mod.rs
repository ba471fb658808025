//! CLI subcommand implementations.

pub mod list;
