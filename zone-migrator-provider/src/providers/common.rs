//! Provider 公共工具函数

use reqwest::Client;

use crate::error::{ProviderError, Result};
use crate::types::ClientOptions;

// ============ HTTP Client ============

/// 创建带超时配置的 HTTP Client
pub fn create_http_client(provider: &str, options: &ClientOptions) -> Result<Client> {
    Client::builder()
        .connect_timeout(options.connect_timeout)
        .timeout(options.request_timeout)
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

// ============ 域名名称处理 ============

/// 去掉域名末尾的点
pub fn normalize_domain_name(name: &str) -> String {
    name.trim_end_matches('.').to_string()
}

/// 去掉 base URL 末尾的斜杠
pub fn normalize_base_url(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}
