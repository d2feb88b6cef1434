//! 账户相关类型定义

use serde::{Deserialize, Serialize};
use zone_migrator_provider::{mask_token, AccountInfo};

/// 账户信息
///
/// The name is the account's identity. The token is never serialized and is masked by `Debug`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// 账户名称（唯一）
    pub name: String,
    /// API token
    #[serde(skip_serializing)]
    pub token: String,
    /// 验证成功后的账户详情
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<AccountInfo>,
    /// 验证失败时的错误信息
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Account {
    /// An unverified account.
    pub fn new(name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token: token.into(),
            info: None,
            error: None,
        }
    }

    /// Whether `other` is the same account. Accounts are compared by name.
    pub fn same_identity(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("name", &self.name)
            .field("token", &mask_token(&self.token))
            .field("info", &self.info)
            .field("error", &self.error)
            .finish()
    }
}
