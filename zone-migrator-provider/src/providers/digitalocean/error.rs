//! DigitalOcean error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::DigitalOceanProvider;

/// DigitalOcean error mapping.
/// Error bodies look like `{"id": "not_found", "message": "..."}`; the HTTP status is
/// authoritative when the `id` is missing or unfamiliar.
impl ProviderErrorMapper for DigitalOceanProvider {
    fn provider_name(&self) -> &'static str {
        "digitalocean"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        match (raw.status, raw.code.as_deref()) {
            (401, _) | (_, Some("unauthorized")) => ProviderError::InvalidCredentials {
                provider,
                raw_message: Some(raw.message),
            },

            (403, _) | (_, Some("forbidden")) => ProviderError::PermissionDenied {
                provider,
                raw_message: Some(raw.message),
            },

            // A record lookup 404s for both a missing record and a missing zone;
            // report the most specific thing the caller asked for.
            (404, _) | (_, Some("not_found")) => {
                if let Some(record_id) = context.record_id {
                    ProviderError::RecordNotFound {
                        provider,
                        record_id: record_id.to_string(),
                        raw_message: Some(raw.message),
                    }
                } else {
                    ProviderError::DomainNotFound {
                        provider,
                        domain: context.zone.unwrap_or_else(|| "<unknown>".to_string()),
                        raw_message: Some(raw.message),
                    }
                }
            }

            (422, _) | (_, Some("unprocessable_entity")) => ProviderError::InvalidParameter {
                provider,
                param: "general".to_string(),
                detail: raw.message,
            },

            (429, _) | (_, Some("too_many_requests")) => ProviderError::RateLimited {
                provider,
                retry_after: None,
                raw_message: Some(raw.message),
            },

            (500..=599, _) => ProviderError::NetworkError {
                provider,
                detail: format!("HTTP {}: {}", raw.status, raw.message),
            },

            _ => self.unknown_error(raw),
        }
    }
}
