//! Request execution shared by provider clients
//!
//! A provider builds the `RequestBuilder` (URL, auth header, body). This module sends it
//! exactly once, logs the exchange and hands back status and body for the provider to
//! interpret. Nothing here retries.

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP helpers used by every provider
pub struct HttpUtils;

impl HttpUtils {
    /// Send `request` and return `(status, body)`.
    ///
    /// Transport failures become `Timeout` or `NetworkError`. HTTP 429 becomes `RateLimited`
    /// and the gateway statuses 502 to 504 become `NetworkError`. Any other status, 4xx
    /// included, is returned for the caller to map.
    pub async fn execute_request(
        request: RequestBuilder,
        provider: &str,
        method: &str,
        target: &str,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[{provider}] {method} {target}");

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(provider, &e))?;
        let status = response.status().as_u16();
        let retry_after = parse_retry_after(response.headers());

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;
        log::debug!("[{provider}] HTTP {status}: {}", truncate_for_log(&body));

        match status {
            429 => {
                log::warn!("[{provider}] {method} {target} rate limited, retry_after={retry_after:?}");
                Err(ProviderError::RateLimited {
                    provider: provider.to_string(),
                    retry_after,
                    raw_message: (!body.is_empty()).then_some(body),
                })
            }
            502..=504 => {
                log::warn!("[{provider}] {method} {target} gateway error HTTP {status}");
                Err(ProviderError::NetworkError {
                    provider: provider.to_string(),
                    detail: format!("HTTP {status}: {}", truncate_for_log(&body)),
                })
            }
            _ => Ok((status, body)),
        }
    }

    /// Deserialize a response body, logging the raw text when it does not fit `T`.
    pub fn parse_json<T: DeserializeOwned>(body: &str, provider: &str) -> Result<T, ProviderError> {
        serde_json::from_str(body).map_err(|e| {
            log::error!(
                "[{provider}] Unexpected response shape ({e}): {}",
                truncate_for_log(body)
            );
            ProviderError::ParseError {
                provider: provider.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

fn transport_error(provider: &str, e: &reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout {
            provider: provider.to_string(),
            detail: e.to_string(),
        }
    } else {
        ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: e.to_string(),
        }
    }
}

/// `Retry-After` in seconds. The HTTP-date form is ignored.
fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// 2xx
pub(crate) fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}
