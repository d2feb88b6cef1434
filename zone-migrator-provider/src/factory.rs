//! Provider factory functions.

use std::sync::Arc;

use crate::error::Result;
use crate::traits::HostingProvider;
use crate::types::ClientOptions;

#[cfg(feature = "digitalocean")]
use crate::providers::DigitalOceanProvider;

/// Creates the [`HostingProvider`] client for the given transport options.
///
/// The client holds no credentials; tokens are passed per call. The returned provider is
/// wrapped in `Arc<dyn HostingProvider>` so one client can be shared across async tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use zone_migrator_provider::{create_provider, ClientOptions};
///
/// let provider = create_provider(&ClientOptions::default()).unwrap();
/// assert_eq!(provider.id(), "digitalocean");
/// ```
#[cfg(feature = "digitalocean")]
pub fn create_provider(options: &ClientOptions) -> Result<Arc<dyn HostingProvider>> {
    Ok(Arc::new(DigitalOceanProvider::with_options(options)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_digitalocean_client() {
        let provider = create_provider(&ClientOptions::default()).unwrap();
        assert_eq!(provider.id(), "digitalocean");
    }

    #[test]
    fn honours_base_url_override() {
        let options = ClientOptions {
            api_base: Some("http://127.0.0.1:9/".to_string()),
            ..ClientOptions::default()
        };
        assert!(create_provider(&options).is_ok());
    }
}
