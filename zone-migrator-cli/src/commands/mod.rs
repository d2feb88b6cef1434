//! Subcommand implementations

pub mod accounts;
pub mod migrate;
