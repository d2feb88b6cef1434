//! 迁移流程相关类型定义

use serde::Serialize;
use zone_migrator_provider::AddressFamily;

/// 迁移操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationKind {
    /// Create a new zone elsewhere and copy the records into it.
    Copy,
    /// Copy into another account, then delete the source zone.
    Move,
    /// Update the address records of the existing zone in place.
    Change,
}

impl std::fmt::Display for MigrationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Copy => write!(f, "copy"),
            Self::Move => write!(f, "move"),
            Self::Change => write!(f, "change"),
        }
    }
}

/// Result of classifying the current selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationPlan {
    /// 操作类型
    pub kind: MigrationKind,
    /// 当前是否允许提交
    pub committable: bool,
    /// 是否需要用户确认
    pub confirmation_required: bool,
    /// 需要确认时展示给用户的说明
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_message: Option<&'static str>,
}

/// Step of a running commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CommitPhase {
    /// Checking that the destination account may be modified (move only).
    ProbingAccess,
    /// Creating the destination zone (copy and move).
    CreatingZone,
    /// Creating or updating records one at a time.
    TransferringRecords,
    /// Deleting the source zone (move only).
    DeletingSource,
}

/// 编排器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "phase", rename_all = "camelCase")]
pub enum MigrationState {
    /// No workflow open.
    Idle,
    /// Waiting for instance or record lists.
    FetchingDependencies,
    /// All lists loaded; selections may be edited and the plan committed.
    Ready,
    /// A commit is running.
    Committing(CommitPhase),
    /// The last commit finished.
    Complete,
    /// A fetch or commit step failed. The session keeps the error until it is reset.
    Failed,
}

impl std::fmt::Display for MigrationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::FetchingDependencies => write!(f, "fetching dependencies"),
            Self::Ready => write!(f, "ready"),
            Self::Committing(CommitPhase::ProbingAccess) => write!(f, "probing write access"),
            Self::Committing(CommitPhase::CreatingZone) => write!(f, "creating zone"),
            Self::Committing(CommitPhase::TransferringRecords) => write!(f, "transferring records"),
            Self::Committing(CommitPhase::DeletingSource) => write!(f, "deleting source zone"),
            Self::Complete => write!(f, "complete"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Position of an address among the public interfaces of an instance list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressMatch {
    /// Index of the owning instance in the searched list.
    pub instance_index: usize,
    /// Interface list the address was found in.
    pub family: AddressFamily,
    /// 0-based position within that family's public addresses.
    pub position: usize,
}

/// 记录传输进度
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// 已完成的调用数
    pub completed: usize,
    /// 总调用数
    pub total: usize,
    /// 当前状态说明
    pub message: String,
}

/// What subscribers of the orchestrator see after every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    /// 编排器状态
    pub state: MigrationState,
    /// 传输进度
    pub progress: Progress,
    /// 最近一次错误
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        Self {
            state: MigrationState::Idle,
            progress: Progress::default(),
            last_error: None,
        }
    }
}

/// The account and zone the surrounding application is looking at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveContext {
    /// 账户名称
    pub account: String,
    /// Zone 名称
    pub zone: String,
}

/// Result of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationOutcome {
    /// 执行的操作类型
    pub kind: MigrationKind,
    /// Records created (copy, move) or updated (change). The seeded `A` record is not counted.
    pub records_transferred: usize,
    /// Context to switch to after the commit.
    pub active_context: ActiveContext,
}
