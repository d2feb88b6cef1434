//! `accounts` subcommand

use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::Result;
use zone_migrator_core::types::Account;
use zone_migrator_core::{AccountService, ServiceContext};

/// List configured accounts, verifying each token when `verify` is set.
pub async fn run(ctx: Arc<ServiceContext>, verify: bool) -> Result<()> {
    let service = AccountService::new(ctx);

    let accounts = if verify {
        let summary = service.verify_all_accounts().await?;
        tracing::info!(
            "{} account(s) verified, {} failed",
            summary.verified_count,
            summary.error_count
        );
        summary.accounts
    } else {
        service.list_accounts().await?
    };

    print!("{}", render_accounts(&accounts, verify));
    Ok(())
}

/// One line per account: name, then account details or the verification error.
pub fn render_accounts(accounts: &[Account], verified: bool) -> String {
    if accounts.is_empty() {
        return "No accounts configured\n".to_string();
    }

    let width = accounts.iter().map(|a| a.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for account in accounts {
        let status = match (&account.info, &account.error) {
            (Some(info), _) => format!("ok  {} ({})", info.email, info.status),
            (None, Some(error)) => format!("err {error}"),
            (None, None) if verified => "err unknown".to_string(),
            (None, None) => "-".to_string(),
        };
        let _ = writeln!(out, "{:<width$}  {status}", account.name);
    }
    out
}
