//! Hosting provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

#[cfg(feature = "digitalocean")]
mod digitalocean;

#[cfg(feature = "digitalocean")]
pub use digitalocean::DigitalOceanProvider;
