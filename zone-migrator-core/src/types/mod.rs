//! 类型定义模块

mod account;
mod migration;

pub use account::Account;
pub use migration::{
    ActiveContext, AddressMatch, CommitPhase, MigrationKind, MigrationOutcome, MigrationPlan,
    MigrationState, Progress, ProgressSnapshot,
};

// Re-export provider 库的公共类型
pub use zone_migrator_provider::{
    AccountInfo, AddressFamily, CreateZoneRequest, Instance, NetworkInterface, NetworkSet, Zone,
    ZoneRecord, ZoneRecordPatch,
};
