use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{
    AccountInfo, CreateZoneRequest, Instance, Zone, ZoneRecord, ZoneRecordPatch,
};

/// 原始 API 错误（内部使用）：非 2xx 响应的状态码与错误体
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    pub status: u16,
    /// 机器可读的错误码（DigitalOcean 的 `id` 字段，如 `not_found`）
    pub code: Option<String>,
    pub message: String,
}

impl RawApiError {
    /// 响应体无法解析时只有状态码
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::new(status, message)
        }
    }
}

/// 请求针对的资源（内部使用），决定 404 映射为哪种 NotFound
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    pub zone: Option<String>,
    pub record_id: Option<u64>,
}

impl ErrorContext {
    pub fn zone(zone: &str) -> Self {
        Self {
            zone: Some(zone.to_string()),
            record_id: None,
        }
    }

    pub fn record(zone: &str, record_id: u64) -> Self {
        Self {
            record_id: Some(record_id),
            ..Self::zone(zone)
        }
    }
}

/// 将原始 API 错误映射为 [`ProviderError`]（内部使用），每个 provider 各自实现
pub(crate) trait ProviderErrorMapper {
    fn provider_name(&self) -> &'static str;

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 无法归类时的兜底
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Hosting provider client.
///
/// Every call takes the account token explicitly, so one client serves any number of accounts.
/// Implementations perform exactly one request attempt per logical call (pagination aside)
/// and never retry.
#[async_trait]
pub trait HostingProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// Fetch account details for `token`.
    async fn account_info(&self, token: &str) -> Result<AccountInfo>;

    /// List all compute instances of the account, in provider order.
    async fn list_instances(&self, token: &str) -> Result<Vec<Instance>>;

    /// List all records of a zone, in provider order.
    async fn list_zone_records(&self, token: &str, zone_name: &str) -> Result<Vec<ZoneRecord>>;

    /// Create a zone. The provider also creates an apex `A` record for `initial_address`.
    async fn create_zone(&self, token: &str, req: &CreateZoneRequest) -> Result<Zone>;

    /// Create a record in a zone. `record.id` is ignored.
    async fn create_zone_record(
        &self,
        token: &str,
        zone_name: &str,
        record: &ZoneRecord,
    ) -> Result<ZoneRecord>;

    /// Update an existing record in place. Only the fields set in `patch` are sent.
    async fn update_zone_record(
        &self,
        token: &str,
        zone_name: &str,
        record_id: u64,
        patch: &ZoneRecordPatch,
    ) -> Result<ZoneRecord>;

    /// Delete a zone and all of its records.
    async fn delete_zone(&self, token: &str, zone_name: &str) -> Result<()>;

    /// Whether `token` may modify the account.
    ///
    /// There is no direct endpoint for this; implementations delete a resource that cannot
    /// exist. "Not found" means the delete was authorized (writable), "forbidden" means
    /// read-only, and anything else is [`ProviderError::ProbeInconclusive`] or a transport error.
    async fn probe_account_writable(&self, token: &str) -> Result<bool>;
}
