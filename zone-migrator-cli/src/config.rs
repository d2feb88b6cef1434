//! Configuration file loading
//!
//! The configuration is a JSON file holding transport settings and the accounts the
//! migrator may use. It is only ever read.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use zone_migrator_core::types::Account;
use zone_migrator_core::{CoreError, CoreResult, InMemoryAccountRepository};
use zone_migrator_provider::ClientOptions;

const APP_DIR_NAME: &str = "zone-migrator";
const CONFIG_FILE_NAME: &str = "config.json";
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024; // 1MB

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    30
}

/// 单个账户配置
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountEntry {
    pub name: String,
    pub token: String,
}

/// 配置文件内容
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// API base URL override
    #[serde(default)]
    pub api_base: Option<String>,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    pub accounts: Vec<AccountEntry>,
}

impl Config {
    /// `<config_dir>/zone-migrator/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// Unreadable files are `StorageError`, malformed JSON is `SerializationError`.
    pub async fn load(path: Option<&Path>) -> CoreResult<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path().ok_or_else(|| {
                CoreError::StorageError(
                    "Cannot determine the configuration directory; pass --config".to_string(),
                )
            })?,
        };
        tracing::debug!("Loading configuration from {}", path.display());

        let metadata = tokio::fs::metadata(&path).await.map_err(|e| {
            CoreError::StorageError(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(CoreError::StorageError(format!(
                "Config file too large: {} bytes (max: {} bytes)",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            CoreError::StorageError(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::parse(&content).map_err(|e| match e {
            CoreError::SerializationError(detail) => CoreError::SerializationError(format!(
                "Invalid config file {}: {detail}",
                path.display()
            )),
            other => other,
        })
    }

    /// Parse configuration text.
    pub fn parse(content: &str) -> CoreResult<Self> {
        serde_json::from_str(content).map_err(|e| CoreError::SerializationError(e.to_string()))
    }

    /// Transport settings for the provider client.
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            api_base: self.api_base.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    /// The configured accounts as a read-only repository.
    ///
    /// Blank or duplicate account names are a `ValidationError`.
    pub fn account_repository(&self) -> CoreResult<InMemoryAccountRepository> {
        let accounts = self
            .accounts
            .iter()
            .map(|entry| Account::new(entry.name.clone(), entry.token.clone()))
            .collect();
        InMemoryAccountRepository::new(accounts)
    }
}
