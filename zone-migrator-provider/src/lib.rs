//! # zone-migrator-provider
//!
//! Hosting provider client used by the zone migration engine: compute instances,
//! DNS zones and zone records.
//!
//! ## Supported Providers
//!
//! | Provider | Feature Flag | Auth Method |
//! |----------|-------------|-------------|
//! | [DigitalOcean](https://www.digitalocean.com/) | `digitalocean` | Bearer Token |
//!
//! ## Feature Flags
//!
//! - **`digitalocean`** *(default)*: the DigitalOcean API v2 client.
//! - **`native-tls`** *(default)*: use the platform's native TLS implementation.
//! - **`rustls`**: use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use zone_migrator_provider::{create_provider, ClientOptions, HostingProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = create_provider(&ClientOptions::default())?;
//!     let token = "dop_v1_...";
//!
//!     // Tokens are passed per call; one client serves any number of accounts.
//!     let writable = provider.probe_account_writable(token).await?;
//!     println!("writable: {writable}");
//!
//!     for record in provider.list_zone_records(token, "example.com").await? {
//!         println!("{} {} -> {}", record.record_type, record.name, record.data);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError). Requests are attempted
//! exactly once; `RateLimited`, `NetworkError` and `Timeout` are surfaced to the caller
//! instead of being retried.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory functions
#[cfg(feature = "digitalocean")]
pub use factory::create_provider;

// Re-export core trait only (internal traits are not exported)
pub use traits::HostingProvider;

// Re-export types
pub use types::{
    ADDRESS_RECORD_TYPES, AccountInfo, AddressFamily, ClientOptions, CreateZoneRequest, Instance,
    NetworkInterface, NetworkSet, PUBLIC_VISIBILITY, RECORD_TYPE_A, RECORD_TYPE_NS, Zone,
    ZoneRecord, ZoneRecordPatch,
};

// Re-export log helpers
pub use utils::log_sanitizer::{mask_token, truncate_for_log};

// Re-export concrete providers (behind feature flags)
#[cfg(feature = "digitalocean")]
pub use providers::DigitalOceanProvider;
