//! 业务逻辑服务层

mod account_service;
pub mod migration;

pub use account_service::{AccountService, VerificationSummary};
pub use migration::MigrationOrchestrator;

use std::sync::Arc;

use zone_migrator_provider::HostingProvider;

use crate::error::{CoreError, CoreResult};
use crate::traits::AccountRepository;
use crate::types::Account;

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入 provider 客户端和账户来源。
pub struct ServiceContext {
    provider: Arc<dyn HostingProvider>,
    account_repository: Arc<dyn AccountRepository>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        provider: Arc<dyn HostingProvider>,
        account_repository: Arc<dyn AccountRepository>,
    ) -> Self {
        Self {
            provider,
            account_repository,
        }
    }

    /// Provider 客户端
    pub fn provider(&self) -> &Arc<dyn HostingProvider> {
        &self.provider
    }

    /// 账户来源
    pub fn account_repository(&self) -> &Arc<dyn AccountRepository> {
        &self.account_repository
    }

    /// 按名称获取账户，不存在时返回 `AccountNotFound`
    pub async fn get_account(&self, name: &str) -> CoreResult<Account> {
        self.account_repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| CoreError::AccountNotFound(name.to_string()))
    }
}
