//! Core error type

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use zone_migrator_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Account not found
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Working record not found
    #[error("Record not found: {0}")]
    RecordNotFound(u64),

    /// Destination instance not found
    #[error("Instance not found: {0}")]
    InstanceNotFound(u64),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The operation is destructive and has not been confirmed
    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    /// No `A` record to seed the destination zone with
    #[error("no address record; cannot create zone")]
    MissingAddressRecord,

    /// The destination account token cannot modify the account
    #[error("Account is read-only: {0}")]
    ReadOnlyAccount(String),

    /// The orchestrator is not in a state that allows the operation
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Account source could not be read
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Account data could not be decoded
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Error reported by the hosting provider
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether the error comes from user input or account state rather than a fault.
    ///
    /// Expected errors are logged at `warn`, the rest at `error`. New variants must be added here.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::AccountNotFound(_)
            | Self::RecordNotFound(_)
            | Self::InstanceNotFound(_)
            | Self::ValidationError(_)
            | Self::ConfirmationRequired(_)
            | Self::MissingAddressRecord
            | Self::ReadOnlyAccount(_)
            | Self::InvalidState(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::StorageError(_) | Self::SerializationError(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_address_record_message() {
        assert_eq!(
            CoreError::MissingAddressRecord.to_string(),
            "no address record; cannot create zone"
        );
    }

    #[test]
    fn provider_error_passes_through_verbatim() {
        let err: CoreError = ProviderError::PermissionDenied {
            provider: "digitalocean".to_string(),
            raw_message: None,
        }
        .into();
        assert_eq!(err.to_string(), "[digitalocean] Permission denied");
        assert!(err.is_expected());
    }

    #[test]
    fn expected_classification() {
        assert!(CoreError::ConfirmationRequired("x".into()).is_expected());
        assert!(!CoreError::StorageError("disk".into()).is_expected());
        assert!(!CoreError::Provider(ProviderError::Timeout {
            provider: "digitalocean".into(),
            detail: "30s".into(),
        })
        .is_expected());
    }

    #[test]
    fn serializes_with_code_tag() {
        let json = serde_json::to_value(CoreError::RecordNotFound(42)).unwrap();
        assert_eq!(json["code"], "RecordNotFound");
        assert_eq!(json["details"], 42);
    }
}
