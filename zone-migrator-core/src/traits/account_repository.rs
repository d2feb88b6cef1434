//! Account source abstract Trait

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use zone_migrator_provider::AccountInfo;

use crate::error::{CoreError, CoreResult};
use crate::types::Account;

/// Account source Trait
///
/// The migration engine only reads accounts. Verification results are written back so
/// front ends can show them next to the account.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Get all accounts, in configuration order
    async fn find_all(&self) -> CoreResult<Vec<Account>>;

    /// Get account based on name
    ///
    /// # Arguments
    /// * `name` - Account name
    async fn find_by_name(&self, name: &str) -> CoreResult<Option<Account>>;

    /// Record the outcome of verifying an account's token
    ///
    /// # Arguments
    /// * `name` - Account name
    /// * `info` - account details (on success)
    /// * `error` - error message (on failure)
    async fn update_verification(
        &self,
        name: &str,
        info: Option<AccountInfo>,
        error: Option<String>,
    ) -> CoreResult<()>;
}

/// In-memory account source
///
/// Default implementation, filled from configuration at startup.
#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<Vec<Account>>>,
}

impl InMemoryAccountRepository {
    /// Create a repository holding `accounts`. Account names must be unique.
    pub fn new(accounts: Vec<Account>) -> CoreResult<Self> {
        let mut seen = HashSet::new();
        for account in &accounts {
            if account.name.trim().is_empty() {
                return Err(CoreError::ValidationError(
                    "account name must not be empty".to_string(),
                ));
            }
            if !seen.insert(account.name.as_str()) {
                return Err(CoreError::ValidationError(format!(
                    "duplicate account name: {}",
                    account.name
                )));
            }
        }
        Ok(Self {
            accounts: Arc::new(RwLock::new(accounts)),
        })
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_all(&self) -> CoreResult<Vec<Account>> {
        Ok(self.accounts.read().await.clone())
    }

    async fn find_by_name(&self, name: &str) -> CoreResult<Option<Account>> {
        Ok(self
            .accounts
            .read()
            .await
            .iter()
            .find(|a| a.name == name)
            .cloned())
    }

    async fn update_verification(
        &self,
        name: &str,
        info: Option<AccountInfo>,
        error: Option<String>,
    ) -> CoreResult<()> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .iter_mut()
            .find(|a| a.name == name)
            .ok_or_else(|| CoreError::AccountNotFound(name.to_string()))?;
        account.info = info;
        account.error = error;
        Ok(())
    }
}
