//! Account verification service

use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::types::Account;

/// Result of verifying every configured account
#[derive(Debug, Clone)]
pub struct VerificationSummary {
    /// Number of accounts whose token was accepted
    pub verified_count: usize,
    /// Number of accounts that failed verification
    pub error_count: usize,
    /// All accounts, annotated, in configuration order
    pub accounts: Vec<Account>,
}

/// Account service
pub struct AccountService {
    ctx: Arc<ServiceContext>,
}

impl AccountService {
    /// Create an account service instance
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// List all accounts
    pub async fn list_accounts(&self) -> CoreResult<Vec<Account>> {
        self.ctx.account_repository().find_all().await
    }

    /// Verify one account's token against the provider.
    ///
    /// A rejected token is not an error of this call: the returned account carries the
    /// provider error message instead of account details. Only an unknown account name or a
    /// storage failure returns `Err`.
    pub async fn verify_account(&self, name: &str) -> CoreResult<Account> {
        let mut account = self.ctx.get_account(name).await?;

        match self.ctx.provider().account_info(&account.token).await {
            Ok(info) => {
                log::info!("Account {name} verified ({}, {})", info.email, info.status);
                account.info = Some(info);
                account.error = None;
            }
            Err(e) => {
                if e.is_expected() {
                    log::warn!("Account {name} verification failed: {e}");
                } else {
                    log::error!("Account {name} verification failed: {e}");
                }
                account.info = None;
                account.error = Some(e.to_string());
            }
        }

        self.ctx
            .account_repository()
            .update_verification(name, account.info.clone(), account.error.clone())
            .await?;
        Ok(account)
    }

    /// Verify every account, one request at a time
    pub async fn verify_all_accounts(&self) -> CoreResult<VerificationSummary> {
        let names: Vec<String> = self
            .list_accounts()
            .await?
            .into_iter()
            .map(|a| a.name)
            .collect();

        let mut accounts = Vec::with_capacity(names.len());
        for name in &names {
            accounts.push(self.verify_account(name).await?);
        }

        let error_count = accounts.iter().filter(|a| a.error.is_some()).count();
        let summary = VerificationSummary {
            verified_count: accounts.len() - error_count,
            error_count,
            accounts,
        };
        log::info!(
            "Account verification complete: {} ok, {} failed",
            summary.verified_count,
            summary.error_count
        );
        Ok(summary)
    }
}
