//! Commit execution: copy, move and change

use zone_migrator_provider::{CreateZoneRequest, ProviderError, ZoneRecord, ZoneRecordPatch};

use crate::error::{CoreError, CoreResult};
use crate::types::{ActiveContext, CommitPhase, MigrationKind, MigrationOutcome, MigrationState};

use super::orchestrator::{log_provider_error, no_session, MigrationOrchestrator};

/// Everything a commit needs, captured before the first network call.
struct CommitJob {
    kind: MigrationKind,
    source_token: String,
    source_zone: String,
    destination_name: String,
    destination_account: String,
    destination_token: String,
    /// 用于创建 zone 的第一条 A 记录（copy/move）
    seed: Option<ZoneRecord>,
    /// copy/move: 待创建的记录；change: 待更新的记录
    records: Vec<ZoneRecord>,
}

impl MigrationOrchestrator {
    /// Execute the current plan.
    ///
    /// Preconditions are checked before any network call; a failed precondition sets the
    /// session error and leaves the state `Ready`. Once running, every provider call is
    /// awaited before the next is issued and the first failure stops the commit in `Failed`.
    /// Nothing already written is undone.
    pub async fn commit(&mut self) -> CoreResult<MigrationOutcome> {
        self.ensure_state(&[MigrationState::Ready], "commit")?;
        let job = match self.prepare_commit() {
            Ok(job) => job,
            Err(e) => {
                log::warn!("Commit rejected: {e}");
                if let Some(session) = self.session.as_mut() {
                    session.last_error = Some(e.to_string());
                }
                self.publish();
                return Err(e);
            }
        };

        log::info!(
            "Starting {} of {} to {} (account {})",
            job.kind,
            job.source_zone,
            job.destination_name,
            job.destination_account
        );

        let result = match job.kind {
            MigrationKind::Copy | MigrationKind::Move => self.run_transfer(&job).await,
            MigrationKind::Change => self.run_change(&job).await,
        };

        match result {
            Ok(records_transferred) => {
                let active_context = ActiveContext {
                    account: job.destination_account.clone(),
                    zone: job.destination_name.clone(),
                };
                self.active_context = Some(active_context.clone());
                self.set_progress(records_transferred, job.records.len(), "Done".to_string());
                self.transition(MigrationState::Complete);
                log::info!(
                    "{} of {} complete: {records_transferred} records",
                    job.kind,
                    job.source_zone
                );
                Ok(MigrationOutcome {
                    kind: job.kind,
                    records_transferred,
                    active_context,
                })
            }
            Err(e) => {
                if let Some(session) = self.session.as_mut() {
                    session.last_error = Some(e.to_string());
                }
                self.transition(MigrationState::Failed);
                Err(e)
            }
        }
    }

    /// Validate the selections and build the call list.
    fn prepare_commit(&self) -> CoreResult<CommitJob> {
        let session = self.session.as_ref().ok_or_else(no_session)?;
        let plan = session.plan();

        if session.destination_zone_name.is_empty() {
            return Err(CoreError::ValidationError(
                "destination zone name is empty".to_string(),
            ));
        }
        if plan.confirmation_required && !session.confirmed {
            return Err(CoreError::ConfirmationRequired(
                plan.confirmation_message
                    .unwrap_or("confirmation required")
                    .to_string(),
            ));
        }

        let (seed, records) = match plan.kind {
            MigrationKind::Copy | MigrationKind::Move => {
                let seed_index = session
                    .working_records
                    .iter()
                    .position(ZoneRecord::is_ipv4_address)
                    .ok_or(CoreError::MissingAddressRecord)?;
                let records = session
                    .working_records
                    .iter()
                    .enumerate()
                    .filter(|(i, r)| *i != seed_index && !r.is_delegation())
                    .map(|(_, r)| r.clone())
                    .collect();
                (Some(session.working_records[seed_index].clone()), records)
            }
            MigrationKind::Change => {
                // 以原始记录为准筛选地址记录，更新内容取同 id 的工作记录
                let records = session
                    .original_records
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .filter(|r| r.is_address())
                    .map(|original| {
                        session
                            .working_records
                            .iter()
                            .find(|w| w.id == original.id)
                            .unwrap_or(original)
                            .clone()
                    })
                    .collect();
                (None, records)
            }
        };

        Ok(CommitJob {
            kind: plan.kind,
            source_token: session.source_account.token.clone(),
            source_zone: session.source_zone.clone(),
            destination_name: session.destination_zone_name.clone(),
            destination_account: session.destination_account.name.clone(),
            destination_token: session.destination_account.token.clone(),
            seed,
            records,
        })
    }

    /// Copy and move: probe (move), create the zone, create records, delete the source (move).
    async fn run_transfer(&mut self, job: &CommitJob) -> CoreResult<usize> {
        let provider = std::sync::Arc::clone(self.ctx.provider());
        let total = job.records.len();

        if job.kind == MigrationKind::Move {
            self.transition(MigrationState::Committing(CommitPhase::ProbingAccess));
            self.set_progress(0, total, format!("Checking write access of {}", job.destination_account));
            let writable = provider
                .probe_account_writable(&job.destination_token)
                .await
                .map_err(|e| provider_failure("Write access probe failed", e))?;
            if !writable {
                log::warn!("Account {} is read-only", job.destination_account);
                return Err(CoreError::ReadOnlyAccount(job.destination_account.clone()));
            }
        }

        let Some(seed) = job.seed.as_ref() else {
            return Err(CoreError::MissingAddressRecord);
        };
        self.transition(MigrationState::Committing(CommitPhase::CreatingZone));
        self.set_progress(0, total, format!("Creating zone {}", job.destination_name));
        let request = CreateZoneRequest {
            name: job.destination_name.clone(),
            initial_address: seed.data.clone(),
        };
        provider
            .create_zone(&job.destination_token, &request)
            .await
            .map_err(|e| provider_failure("Zone creation failed", e))?;

        self.transition(MigrationState::Committing(CommitPhase::TransferringRecords));
        for (index, record) in job.records.iter().enumerate() {
            self.set_progress(
                index,
                total,
                format!("Creating {} record {}", record.record_type, record.name),
            );
            provider
                .create_zone_record(&job.destination_token, &job.destination_name, record)
                .await
                .map_err(|e| provider_failure("Record transfer failed", e))?;
            self.set_progress(index + 1, total, format!("Transferred {} of {total}", index + 1));
        }

        if job.kind == MigrationKind::Move {
            self.transition(MigrationState::Committing(CommitPhase::DeletingSource));
            self.set_progress(total, total, format!("Deleting source zone {}", job.source_zone));
            provider
                .delete_zone(&job.source_token, &job.source_zone)
                .await
                .map_err(|e| provider_failure("Source zone deletion failed", e))?;
        }

        Ok(total)
    }

    /// Change: update each address record in place.
    async fn run_change(&mut self, job: &CommitJob) -> CoreResult<usize> {
        let provider = std::sync::Arc::clone(self.ctx.provider());
        let total = job.records.len();

        self.transition(MigrationState::Committing(CommitPhase::TransferringRecords));
        for (index, record) in job.records.iter().enumerate() {
            self.set_progress(
                index,
                total,
                format!("Updating {} record {}", record.record_type, record.name),
            );
            let patch = ZoneRecordPatch::from_record(record);
            provider
                .update_zone_record(&job.source_token, &job.source_zone, record.id, &patch)
                .await
                .map_err(|e| provider_failure("Record update failed", e))?;
            self.set_progress(index + 1, total, format!("Updated {} of {total}", index + 1));
        }

        Ok(total)
    }
}

fn provider_failure(context: &str, e: ProviderError) -> CoreError {
    log_provider_error(context, &e);
    CoreError::Provider(e)
}
