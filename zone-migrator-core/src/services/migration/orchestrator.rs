//! Migration orchestrator: session ownership, dependency fetching and edits

use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::watch;
use zone_migrator_provider::ProviderError;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{
    Account, ActiveContext, MigrationPlan, MigrationState, Progress, ProgressSnapshot,
};

use super::fetch::{FetchRequest, FetchResponse};
use super::session::MigrationSession;

/// Drives one zone migration at a time.
///
/// The orchestrator exclusively owns the [`MigrationSession`]. It can be used in two ways:
///
/// - step layer: [`begin`](Self::begin), [`begin_destination_change`](Self::begin_destination_change)
///   and [`apply`](Self::apply) return the provider calls to make and never touch the network.
///   Front ends with their own event loop dispatch the requests and feed the responses back.
/// - driven layer: [`open`](Self::open) and
///   [`change_destination_account`](Self::change_destination_account) resolve account names,
///   run the requests and apply the responses in completion order.
///
/// Responses issued for an earlier session, or for a destination account that has since been
/// replaced, are discarded.
pub struct MigrationOrchestrator {
    pub(crate) ctx: Arc<ServiceContext>,
    pub(crate) state: MigrationState,
    pub(crate) session: Option<MigrationSession>,
    pub(crate) active_context: Option<ActiveContext>,
    progress_tx: watch::Sender<ProgressSnapshot>,
}

impl MigrationOrchestrator {
    /// Create an idle orchestrator
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        let (progress_tx, _) = watch::channel(ProgressSnapshot::default());
        Self {
            ctx,
            state: MigrationState::Idle,
            session: None,
            active_context: None,
            progress_tx,
        }
    }

    // ===== 观察接口 =====

    /// Current state.
    pub fn state(&self) -> MigrationState {
        self.state
    }

    /// The open session, if any.
    pub fn session(&self) -> Option<&MigrationSession> {
        self.session.as_ref()
    }

    /// Classification of the current selections.
    pub fn plan(&self) -> Option<MigrationPlan> {
        self.session.as_ref().map(MigrationSession::plan)
    }

    /// The account and zone the front end should show. Switches to the destination after a
    /// successful copy or move.
    pub fn active_context(&self) -> Option<&ActiveContext> {
        self.active_context.as_ref()
    }

    /// Receive a snapshot after every state or progress change.
    pub fn subscribe(&self) -> watch::Receiver<ProgressSnapshot> {
        self.progress_tx.subscribe()
    }

    // ===== 步进接口（不访问网络）=====

    /// Start a new session for `source_zone` of `source_account`.
    ///
    /// Any previous session is dropped. Returns the two source-side fetches; the destination
    /// instance fetch follows once the source instances arrive.
    pub fn begin(&mut self, source_account: Account, source_zone: &str) -> Vec<FetchRequest> {
        log::info!(
            "Opening migration for {source_zone} (account {})",
            source_account.name
        );
        self.active_context = Some(ActiveContext {
            account: source_account.name.clone(),
            zone: source_zone.to_string(),
        });

        let session = MigrationSession::new(source_account, source_zone);
        let ticket = session.source_ticket();
        let token = session.source_account.token.clone();
        let requests = vec![
            FetchRequest::SourceInstances {
                ticket,
                token: token.clone(),
            },
            FetchRequest::ZoneRecords {
                ticket,
                token,
                zone: session.source_zone.clone(),
            },
        ];

        self.session = Some(session);
        self.transition(MigrationState::FetchingDependencies);
        requests
    }

    /// Switch the destination account.
    ///
    /// Clears the destination instances, the selected instance and any manual edits, and
    /// returns the fetch for the new account's instances. Responses for the previous
    /// destination account are discarded from now on.
    pub fn begin_destination_change(&mut self, account: Account) -> CoreResult<Vec<FetchRequest>> {
        self.ensure_state(
            &[MigrationState::Ready, MigrationState::FetchingDependencies],
            "change the destination account",
        )?;
        let Some(session) = self.session.as_mut() else {
            return Err(no_session());
        };

        log::info!("Destination account changed to {}", account.name);
        session.destination_account = account;
        session.destination_generation += 1;
        session.destination_instances = None;
        session.destination_instance = None;
        session.instance_chosen = false;
        session.rederive_working_records();

        // 源实例列表尚未返回时，目标实例请求会在其返回后自动发出
        let requests = if session.source_instances.is_some() {
            vec![FetchRequest::DestinationInstances {
                ticket: session.destination_ticket(),
                token: session.destination_account.token.clone(),
            }]
        } else {
            Vec::new()
        };

        self.transition(MigrationState::FetchingDependencies);
        Ok(requests)
    }

    /// Apply a fetch response and return any follow-up requests.
    ///
    /// Stale responses are dropped. A failed fetch moves the orchestrator to `Failed`.
    pub fn apply(&mut self, response: FetchResponse) -> Vec<FetchRequest> {
        let ticket = response.ticket();
        let Some(session) = self.session.as_mut() else {
            log::debug!("Discarding fetch response: no session");
            return Vec::new();
        };
        if ticket.session_id != session.id || self.state != MigrationState::FetchingDependencies {
            log::debug!("Discarding stale fetch response for session {}", ticket.session_id);
            return Vec::new();
        }

        let mut follow_up = Vec::new();
        let failure: Option<ProviderError> = match response {
            FetchResponse::SourceInstances(_, Ok(instances)) => {
                log::debug!("Received {} source instances", instances.len());
                session.source_instances = Some(instances);
                if session.destination_instances.is_none() {
                    follow_up.push(FetchRequest::DestinationInstances {
                        ticket: session.destination_ticket(),
                        token: session.destination_account.token.clone(),
                    });
                }
                None
            }
            FetchResponse::ZoneRecords(_, Ok(records)) => {
                log::debug!("Received {} zone records", records.len());
                session.original_records = Some(records);
                None
            }
            FetchResponse::DestinationInstances(_, Ok(instances)) => {
                if ticket.generation != session.destination_generation {
                    log::debug!(
                        "Discarding destination instances of generation {} (current {})",
                        ticket.generation,
                        session.destination_generation
                    );
                    return Vec::new();
                }
                log::debug!("Received {} destination instances", instances.len());
                session.destination_instances = Some(instances);
                None
            }
            FetchResponse::DestinationInstances(_, Err(e))
                if ticket.generation != session.destination_generation =>
            {
                log::debug!("Discarding stale destination fetch error: {e}");
                return Vec::new();
            }
            FetchResponse::SourceInstances(_, Err(e))
            | FetchResponse::ZoneRecords(_, Err(e))
            | FetchResponse::DestinationInstances(_, Err(e)) => Some(e),
        };

        if let Some(e) = failure {
            log_provider_error("Dependency fetch failed", &e);
            session.last_error = Some(e.to_string());
            self.transition(MigrationState::Failed);
            return Vec::new();
        }

        session.apply_default_selection();
        session.rederive_working_records();

        if session.dependencies_loaded() {
            self.transition(MigrationState::Ready);
        } else {
            self.publish();
        }
        follow_up
    }

    // ===== 驱动接口 =====

    /// Open the workflow for `zone` of the named account and load all dependencies.
    pub async fn open(&mut self, account_name: &str, zone: &str) -> CoreResult<()> {
        let account = self.ctx.get_account(account_name).await?;
        let requests = self.begin(account, zone);
        self.drive(requests).await
    }

    /// Switch the destination to the named account and load its instances.
    pub async fn change_destination_account(&mut self, account_name: &str) -> CoreResult<()> {
        let account = self.ctx.get_account(account_name).await?;
        let requests = self.begin_destination_change(account)?;
        self.drive(requests).await
    }

    /// Dispatch requests, applying each response as it completes, until none are left.
    ///
    /// Requests already issued are always awaited; the first failure is returned at the end.
    async fn drive(&mut self, requests: Vec<FetchRequest>) -> CoreResult<()> {
        let mut in_flight = FuturesUnordered::new();
        for request in requests {
            log::debug!("Dispatching: {}", request.describe());
            in_flight.push(request.dispatch(Arc::clone(self.ctx.provider())));
        }

        let mut first_error: Option<ProviderError> = None;
        while let Some(response) = in_flight.next().await {
            let error = response.error().cloned();
            let was_failed = self.state == MigrationState::Failed;

            for request in self.apply(response) {
                log::debug!("Dispatching: {}", request.describe());
                in_flight.push(request.dispatch(Arc::clone(self.ctx.provider())));
            }

            if !was_failed && self.state == MigrationState::Failed && first_error.is_none() {
                first_error = error;
            }
        }

        match first_error {
            Some(e) => Err(CoreError::Provider(e)),
            None => Ok(()),
        }
    }

    // ===== 同步编辑 =====

    /// Select the destination instance by id and recompute the working records.
    ///
    /// Manual record edits are discarded.
    pub fn select_destination_instance(&mut self, instance_id: u64) -> CoreResult<()> {
        self.ensure_state(&[MigrationState::Ready], "select a destination instance")?;
        let session = self.session.as_mut().ok_or_else(no_session)?;

        let known = session
            .destination_instances
            .as_deref()
            .is_some_and(|list| list.iter().any(|i| i.id == instance_id));
        if !known {
            return Err(CoreError::InstanceNotFound(instance_id));
        }

        session.destination_instance = Some(instance_id);
        session.instance_chosen = true;
        session.rederive_working_records();
        log::debug!("Destination instance set to {instance_id}");
        self.publish();
        Ok(())
    }

    /// Set the destination zone name. No recompute.
    pub fn set_destination_zone_name(&mut self, name: &str) -> CoreResult<()> {
        self.ensure_state(
            &[MigrationState::Ready, MigrationState::FetchingDependencies],
            "set the destination zone name",
        )?;
        let session = self.session.as_mut().ok_or_else(no_session)?;
        session.destination_zone_name = name.to_string();
        Ok(())
    }

    /// Set or clear the confirmation for destructive commits.
    pub fn set_confirmation(&mut self, confirmed: bool) -> CoreResult<()> {
        self.ensure_state(
            &[MigrationState::Ready, MigrationState::FetchingDependencies],
            "change the confirmation",
        )?;
        let session = self.session.as_mut().ok_or_else(no_session)?;
        session.confirmed = confirmed;
        Ok(())
    }

    /// Replace the data of one working record. Kept until the destination instance changes.
    pub fn edit_working_record(&mut self, record_id: u64, data: &str) -> CoreResult<()> {
        self.ensure_state(&[MigrationState::Ready], "edit a record")?;
        let session = self.session.as_mut().ok_or_else(no_session)?;
        let record = session
            .working_records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or(CoreError::RecordNotFound(record_id))?;
        record.data = data.to_string();
        log::debug!("Record {record_id} edited");
        Ok(())
    }

    /// Drop the session and return to `Idle`.
    pub fn reset(&mut self) {
        self.session = None;
        self.transition(MigrationState::Idle);
    }

    // ===== 内部工具 =====

    pub(crate) fn ensure_state(&self, allowed: &[MigrationState], action: &str) -> CoreResult<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(CoreError::InvalidState(format!(
                "cannot {action} while {}",
                self.state
            )))
        }
    }

    pub(crate) fn transition(&mut self, state: MigrationState) {
        if self.state != state {
            log::debug!("Migration state: {} -> {state}", self.state);
        }
        self.state = state;
        self.publish();
    }

    /// 更新进度并通知订阅者
    pub(crate) fn set_progress(&mut self, completed: usize, total: usize, message: String) {
        if let Some(session) = self.session.as_mut() {
            session.progress = Progress {
                completed,
                total,
                message,
            };
        }
        self.publish();
    }

    pub(crate) fn publish(&self) {
        let snapshot = ProgressSnapshot {
            state: self.state,
            progress: self
                .session
                .as_ref()
                .map(|s| s.progress.clone())
                .unwrap_or_default(),
            last_error: self.session.as_ref().and_then(|s| s.last_error.clone()),
        };
        self.progress_tx.send_replace(snapshot);
    }
}

pub(crate) fn no_session() -> CoreError {
    CoreError::InvalidState("no migration session is open".to_string())
}

pub(crate) fn log_provider_error(context: &str, e: &ProviderError) {
    if e.is_expected() {
        log::warn!("{context}: {e}");
    } else {
        log::error!("{context}: {e}");
    }
}
