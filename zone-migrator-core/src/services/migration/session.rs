//! Working state of one migration attempt

use uuid::Uuid;
use zone_migrator_provider::{Instance, ZoneRecord};

use crate::types::{Account, MigrationPlan, Progress};

use super::fetch::FetchTicket;
use super::planner::classify;
use super::remapper::{default_destination_instance, derive_working_records};

/// The mutable state of one migration attempt.
///
/// Owned by [`MigrationOrchestrator`](super::MigrationOrchestrator); front ends get read access.
#[derive(Debug, Clone)]
pub struct MigrationSession {
    pub(crate) id: Uuid,
    pub(crate) source_account: Account,
    pub(crate) source_zone: String,
    pub(crate) source_instances: Option<Vec<Instance>>,
    pub(crate) original_records: Option<Vec<ZoneRecord>>,
    pub(crate) destination_account: Account,
    pub(crate) destination_zone_name: String,
    pub(crate) destination_instances: Option<Vec<Instance>>,
    pub(crate) destination_instance: Option<u64>,
    /// 用户是否手动选择过目标实例（手动选择后不再自动默认）
    pub(crate) instance_chosen: bool,
    /// 每次切换目标账户递增，用于丢弃过期的实例列表响应
    pub(crate) destination_generation: u64,
    pub(crate) working_records: Vec<ZoneRecord>,
    pub(crate) confirmed: bool,
    pub(crate) progress: Progress,
    pub(crate) last_error: Option<String>,
}

impl MigrationSession {
    pub(crate) fn new(source_account: Account, source_zone: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            destination_account: source_account.clone(),
            source_account,
            source_zone: source_zone.to_string(),
            source_instances: None,
            original_records: None,
            destination_zone_name: String::new(),
            destination_instances: None,
            destination_instance: None,
            instance_chosen: false,
            destination_generation: 0,
            working_records: Vec::new(),
            confirmed: false,
            progress: Progress::default(),
            last_error: None,
        }
    }

    // ===== 只读访问 =====

    /// Session identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Account the source zone lives in.
    pub fn source_account(&self) -> &Account {
        &self.source_account
    }

    /// Source zone name.
    pub fn source_zone(&self) -> &str {
        &self.source_zone
    }

    /// Instances of the source account, once fetched.
    pub fn source_instances(&self) -> Option<&[Instance]> {
        self.source_instances.as_deref()
    }

    /// Records of the source zone as fetched. Never modified.
    pub fn original_records(&self) -> Option<&[ZoneRecord]> {
        self.original_records.as_deref()
    }

    /// Account the zone is copied or moved to.
    pub fn destination_account(&self) -> &Account {
        &self.destination_account
    }

    /// Destination zone name; empty until the user enters one.
    pub fn destination_zone_name(&self) -> &str {
        &self.destination_zone_name
    }

    /// Instances of the destination account, once fetched.
    pub fn destination_instances(&self) -> Option<&[Instance]> {
        self.destination_instances.as_deref()
    }

    /// The selected destination instance.
    pub fn destination_instance(&self) -> Option<&Instance> {
        let id = self.destination_instance?;
        self.destination_instances
            .as_deref()?
            .iter()
            .find(|i| i.id == id)
    }

    /// Records that will be written, in source order. Never contains `NS` records.
    pub fn working_records(&self) -> &[ZoneRecord] {
        &self.working_records
    }

    /// Whether the user confirmed a destructive commit.
    pub fn confirmed(&self) -> bool {
        self.confirmed
    }

    /// Transfer progress.
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// The most recent error.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Classify the current selections.
    pub fn plan(&self) -> MigrationPlan {
        classify(
            &self.source_account,
            &self.source_zone,
            &self.destination_account,
            &self.destination_zone_name,
            self.confirmed,
        )
    }

    /// Whether source instances, records and destination instances are all present.
    pub fn dependencies_loaded(&self) -> bool {
        self.source_instances.is_some()
            && self.original_records.is_some()
            && self.destination_instances.is_some()
    }

    // ===== 内部状态维护 =====

    pub(crate) fn source_ticket(&self) -> FetchTicket {
        FetchTicket {
            session_id: self.id,
            generation: 0,
        }
    }

    pub(crate) fn destination_ticket(&self) -> FetchTicket {
        FetchTicket {
            session_id: self.id,
            generation: self.destination_generation,
        }
    }

    /// 未手动选择时，按默认规则选择目标实例
    pub(crate) fn apply_default_selection(&mut self) {
        if self.instance_chosen || self.destination_instance.is_some() {
            return;
        }
        let (Some(instances), Some(records)) = (
            self.destination_instances.as_deref(),
            self.original_records.as_deref(),
        ) else {
            return;
        };
        self.destination_instance =
            default_destination_instance(instances, records).map(|i| i.id);
        if let Some(id) = self.destination_instance {
            log::debug!("Default destination instance: {id}");
        }
    }

    /// 重新计算工作记录（丢弃手动编辑）
    pub(crate) fn rederive_working_records(&mut self) {
        let Some(original) = self.original_records.as_deref() else {
            self.working_records.clear();
            return;
        };
        let source_instances = self.source_instances.as_deref().unwrap_or_default();
        self.working_records =
            derive_working_records(original, source_instances, self.destination_instance());
    }
}
