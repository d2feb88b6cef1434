//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{watch, RwLock};
use zone_migrator_provider::{
    AccountInfo, CreateZoneRequest, HostingProvider, Instance, NetworkInterface, NetworkSet,
    ProviderError, Result, Zone, ZoneRecord, ZoneRecordPatch,
};

use crate::services::ServiceContext;
use crate::traits::InMemoryAccountRepository;
use crate::types::{Account, ProgressSnapshot};

// ===== Fixtures =====

/// 账户 `name`，token 为 `token-{name}`
pub fn account(name: &str) -> Account {
    Account::new(name, format!("token-{name}"))
}

/// 实例：给定公网地址，外加一个私网 v4 地址
pub fn instance(id: u64, name: &str, public_v4: &[&str], public_v6: &[&str]) -> Instance {
    let mut v4 = vec![NetworkInterface::private(format!("10.0.0.{id}"))];
    v4.extend(public_v4.iter().map(|a| NetworkInterface::public(*a)));
    Instance {
        id,
        name: name.to_string(),
        networks: NetworkSet {
            v4,
            v6: public_v6.iter().map(|a| NetworkInterface::public(*a)).collect(),
        },
    }
}

pub fn record(id: u64, record_type: &str, name: &str, data: &str) -> ZoneRecord {
    ZoneRecord::new(id, record_type, name, data)
}

/// 用 mock provider 和给定账户构造服务上下文
pub fn test_context(
    provider: &Arc<MockHostingProvider>,
    accounts: Vec<Account>,
) -> Arc<ServiceContext> {
    let repository = InMemoryAccountRepository::new(accounts).unwrap();
    Arc::new(ServiceContext::new(provider.clone(), Arc::new(repository)))
}

// ===== MockHostingProvider =====

/// Provider 操作类型（用于计数和注入失败）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOp {
    AccountInfo,
    ListInstances,
    ListZoneRecords,
    CreateZone,
    CreateZoneRecord,
    UpdateZoneRecord,
    DeleteZone,
    ProbeAccountWritable,
}

/// 记录下来的 provider 调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    AccountInfo {
        token: String,
    },
    ListInstances {
        token: String,
    },
    ListZoneRecords {
        token: String,
        zone: String,
    },
    CreateZone {
        token: String,
        name: String,
        initial_address: String,
    },
    CreateZoneRecord {
        token: String,
        zone: String,
        record: ZoneRecord,
    },
    UpdateZoneRecord {
        token: String,
        zone: String,
        record_id: u64,
        patch: ZoneRecordPatch,
    },
    DeleteZone {
        token: String,
        zone: String,
    },
    ProbeAccountWritable {
        token: String,
    },
}

impl MockCall {
    fn op(&self) -> MockOp {
        match self {
            Self::AccountInfo { .. } => MockOp::AccountInfo,
            Self::ListInstances { .. } => MockOp::ListInstances,
            Self::ListZoneRecords { .. } => MockOp::ListZoneRecords,
            Self::CreateZone { .. } => MockOp::CreateZone,
            Self::CreateZoneRecord { .. } => MockOp::CreateZoneRecord,
            Self::UpdateZoneRecord { .. } => MockOp::UpdateZoneRecord,
            Self::DeleteZone { .. } => MockOp::DeleteZone,
            Self::ProbeAccountWritable { .. } => MockOp::ProbeAccountWritable,
        }
    }
}

/// 记录所有调用、可按第 n 次调用注入失败的 provider
pub struct MockHostingProvider {
    /// 按 token 区分账户的实例列表
    instances: RwLock<HashMap<String, Vec<Instance>>>,
    /// 按 zone 名称存放的记录
    records: RwLock<HashMap<String, Vec<ZoneRecord>>>,
    /// 按 token 的写权限（默认可写）
    writable: RwLock<HashMap<String, bool>>,
    /// 第 n 次（从 1 开始）调用某操作时返回的错误
    failures: RwLock<HashMap<(MockOp, usize), ProviderError>>,
    calls: RwLock<Vec<MockCall>>,
    failed: RwLock<HashMap<MockOp, usize>>,
    /// 每次调用时记下订阅者看到的快照
    progress_rx: RwLock<Option<watch::Receiver<ProgressSnapshot>>>,
    seen_progress: RwLock<Vec<ProgressSnapshot>>,
    next_record_id: AtomicU64,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockHostingProvider {
    pub fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            records: RwLock::new(HashMap::new()),
            writable: RwLock::new(HashMap::new()),
            failures: RwLock::new(HashMap::new()),
            calls: RwLock::new(Vec::new()),
            failed: RwLock::new(HashMap::new()),
            progress_rx: RwLock::new(None),
            seen_progress: RwLock::new(Vec::new()),
            next_record_id: AtomicU64::new(1000),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub async fn set_instances(&self, token: &str, instances: Vec<Instance>) {
        self.instances
            .write()
            .await
            .insert(token.to_string(), instances);
    }

    pub async fn set_zone_records(&self, zone: &str, records: Vec<ZoneRecord>) {
        self.records.write().await.insert(zone.to_string(), records);
    }

    pub async fn set_writable(&self, token: &str, writable: bool) {
        self.writable
            .write()
            .await
            .insert(token.to_string(), writable);
    }

    /// 第 `nth` 次调用 `op` 时返回 `error`
    pub async fn fail_nth(&self, op: MockOp, nth: usize, error: ProviderError) {
        self.failures.write().await.insert((op, nth), error);
    }

    pub async fn calls(&self) -> Vec<MockCall> {
        self.calls.read().await.clone()
    }

    pub async fn clear_calls(&self) {
        self.calls.write().await.clear();
        self.failed.write().await.clear();
    }

    /// `op` 的调用次数（含失败）
    pub async fn count(&self, op: MockOp) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| c.op() == op)
            .count()
    }

    /// `op` 成功的调用次数
    pub async fn successes(&self, op: MockOp) -> usize {
        let failed = self.failed.read().await.get(&op).copied().unwrap_or(0);
        self.count(op).await - failed
    }

    /// 此后每次调用都记录 `rx` 的当前快照
    pub async fn observe_progress(&self, rx: watch::Receiver<ProgressSnapshot>) {
        *self.progress_rx.write().await = Some(rx);
    }

    /// `observe_progress` 之后各次调用时看到的快照，按调用顺序
    pub async fn observed_progress(&self) -> Vec<ProgressSnapshot> {
        self.seen_progress.read().await.clone()
    }

    /// 同时进行中的调用数的最大值
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// 记录调用，并返回注入的失败（如有）
    async fn record(&self, call: MockCall) -> Result<()> {
        if let Some(rx) = self.progress_rx.read().await.as_ref() {
            let snapshot = rx.borrow().clone();
            self.seen_progress.write().await.push(snapshot);
        }
        let op = call.op();
        let nth = {
            let mut calls = self.calls.write().await;
            calls.push(call);
            calls.iter().filter(|c| c.op() == op).count()
        };
        if let Some(error) = self.failures.read().await.get(&(op, nth)).cloned() {
            *self.failed.write().await.entry(op).or_insert(0) += 1;
            return Err(error);
        }
        Ok(())
    }

    fn enter(&self) {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    fn next_id(&self) -> u64 {
        self.next_record_id.fetch_add(1, Ordering::SeqCst)
    }
}

impl Default for MockHostingProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostingProvider for MockHostingProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn account_info(&self, token: &str) -> Result<AccountInfo> {
        self.record(MockCall::AccountInfo {
            token: token.to_string(),
        })
        .await?;
        Ok(AccountInfo {
            email: format!("{token}@example.com"),
            uuid: "00000000-0000-0000-0000-000000000000".to_string(),
            status: "active".to_string(),
            droplet_limit: 25,
            email_verified: true,
        })
    }

    async fn list_instances(&self, token: &str) -> Result<Vec<Instance>> {
        self.record(MockCall::ListInstances {
            token: token.to_string(),
        })
        .await?;
        Ok(self
            .instances
            .read()
            .await
            .get(token)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_zone_records(&self, token: &str, zone_name: &str) -> Result<Vec<ZoneRecord>> {
        self.record(MockCall::ListZoneRecords {
            token: token.to_string(),
            zone: zone_name.to_string(),
        })
        .await?;
        Ok(self
            .records
            .read()
            .await
            .get(zone_name)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_zone(&self, token: &str, req: &CreateZoneRequest) -> Result<Zone> {
        self.enter();
        let result = self
            .record(MockCall::CreateZone {
                token: token.to_string(),
                name: req.name.clone(),
                initial_address: req.initial_address.clone(),
            })
            .await;
        self.exit();
        result?;
        Ok(Zone::named(req.name.clone()))
    }

    async fn create_zone_record(
        &self,
        token: &str,
        zone_name: &str,
        record: &ZoneRecord,
    ) -> Result<ZoneRecord> {
        self.enter();
        let result = self
            .record(MockCall::CreateZoneRecord {
                token: token.to_string(),
                zone: zone_name.to_string(),
                record: record.clone(),
            })
            .await;
        self.exit();
        result?;
        let mut created = record.clone();
        created.id = self.next_id();
        Ok(created)
    }

    async fn update_zone_record(
        &self,
        token: &str,
        zone_name: &str,
        record_id: u64,
        patch: &ZoneRecordPatch,
    ) -> Result<ZoneRecord> {
        self.enter();
        let result = self
            .record(MockCall::UpdateZoneRecord {
                token: token.to_string(),
                zone: zone_name.to_string(),
                record_id,
                patch: patch.clone(),
            })
            .await;
        self.exit();
        result?;
        let mut updated = ZoneRecord::new(
            record_id,
            patch.record_type.clone().unwrap_or_default(),
            patch.name.clone().unwrap_or_default(),
            patch.data.clone().unwrap_or_default(),
        );
        updated.ttl = patch.ttl;
        Ok(updated)
    }

    async fn delete_zone(&self, token: &str, zone_name: &str) -> Result<()> {
        self.enter();
        let result = self
            .record(MockCall::DeleteZone {
                token: token.to_string(),
                zone: zone_name.to_string(),
            })
            .await;
        self.exit();
        result
    }

    async fn probe_account_writable(&self, token: &str) -> Result<bool> {
        self.record(MockCall::ProbeAccountWritable {
            token: token.to_string(),
        })
        .await?;
        Ok(self
            .writable
            .read()
            .await
            .get(token)
            .copied()
            .unwrap_or(true))
    }
}
