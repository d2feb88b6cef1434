use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned by every [`HostingProvider`](crate::HostingProvider) call.
///
/// Every variant names the provider that failed. Requests are attempted once, so a
/// `RateLimited` or `NetworkError` here is final for that call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// Connection failure, or a 5xx status from the API.
    NetworkError { provider: String, detail: String },

    /// The connect or request timeout elapsed.
    Timeout { provider: String, detail: String },

    /// The token was rejected (HTTP 401).
    InvalidCredentials {
        provider: String,
        raw_message: Option<String>,
    },

    /// The token is valid but may not perform this call (HTTP 403).
    PermissionDenied {
        provider: String,
        raw_message: Option<String>,
    },

    /// HTTP 429.
    RateLimited {
        provider: String,
        /// `Retry-After` in seconds, when the API sent one
        retry_after: Option<u64>,
        raw_message: Option<String>,
    },

    /// No zone with this name in the account.
    DomainNotFound {
        provider: String,
        domain: String,
        raw_message: Option<String>,
    },

    /// No record with this id in the zone.
    RecordNotFound {
        provider: String,
        record_id: String,
        raw_message: Option<String>,
    },

    /// The API refused a field value (HTTP 422), e.g. a zone name that is already taken.
    InvalidParameter {
        provider: String,
        /// Offending field, or `"general"` when the API does not say
        param: String,
        detail: String,
    },

    /// The write-access probe answered with a status that means neither writable nor read-only.
    ProbeInconclusive {
        provider: String,
        status: u16,
        raw_message: Option<String>,
    },

    /// The response body did not match the expected shape.
    ParseError { provider: String, detail: String },

    /// A request body could not be encoded.
    SerializationError { provider: String, detail: String },

    /// Any other API failure.
    Unknown {
        provider: String,
        raw_code: Option<String>,
        raw_message: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（凭证、权限、资源不存在、参数错误），用于日志分级。
    ///
    /// `true` 记 `warn`，`false` 记 `error`。新增变体时请同步更新。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::DomainNotFound { .. }
                | Self::RecordNotFound { .. }
                | Self::InvalidParameter { .. }
        )
    }

    /// Name of the provider that produced the error.
    pub fn provider(&self) -> &str {
        match self {
            Self::NetworkError { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::InvalidCredentials { provider, .. }
            | Self::PermissionDenied { provider, .. }
            | Self::RateLimited { provider, .. }
            | Self::DomainNotFound { provider, .. }
            | Self::RecordNotFound { provider, .. }
            | Self::InvalidParameter { provider, .. }
            | Self::ProbeInconclusive { provider, .. }
            | Self::ParseError { provider, .. }
            | Self::SerializationError { provider, .. }
            | Self::Unknown { provider, .. } => provider,
        }
    }
}

/// `summary`, followed by `: detail` when the API sent a message.
fn write_with_detail(f: &mut fmt::Formatter<'_>, summary: &str, detail: Option<&str>) -> fmt::Result {
    match detail {
        Some(detail) => write!(f, "{summary}: {detail}"),
        None => f.write_str(summary),
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.provider())?;
        match self {
            Self::NetworkError { detail, .. } => write!(f, "Network error: {detail}"),
            Self::Timeout { detail, .. } => write!(f, "Request timed out: {detail}"),
            Self::InvalidCredentials { raw_message, .. } => {
                write_with_detail(f, "Invalid credentials", raw_message.as_deref())
            }
            Self::PermissionDenied { raw_message, .. } => {
                write_with_detail(f, "Permission denied", raw_message.as_deref())
            }
            Self::RateLimited {
                retry_after: Some(secs),
                ..
            } => write!(f, "Rate limited, retry after {secs}s"),
            Self::RateLimited { .. } => f.write_str("Rate limited"),
            Self::DomainNotFound {
                domain,
                raw_message,
                ..
            } => write_with_detail(
                f,
                &format!("Domain '{domain}' not found"),
                raw_message.as_deref(),
            ),
            Self::RecordNotFound { record_id, .. } => write!(f, "Record '{record_id}' not found"),
            Self::InvalidParameter { param, detail, .. } => {
                write!(f, "Invalid parameter '{param}': {detail}")
            }
            Self::ProbeInconclusive { status, .. } => {
                write!(f, "Write access probe got unexpected HTTP {status}")
            }
            Self::ParseError { detail, .. } => write!(f, "Unreadable response: {detail}"),
            Self::SerializationError { detail, .. } => {
                write!(f, "Cannot encode request: {detail}")
            }
            Self::Unknown {
                raw_code: Some(code),
                raw_message,
                ..
            } => write!(f, "{raw_message} ({code})"),
            Self::Unknown { raw_message, .. } => f.write_str(raw_message),
        }
    }
}

impl std::error::Error for ProviderError {}

/// `Result<T, ProviderError>`
pub type Result<T> = std::result::Result<T, ProviderError>;
