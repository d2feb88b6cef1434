//! `migrate` subcommand
//!
//! Opens the migration workflow for one zone, applies the selections given on the command
//! line, prints the address table and the plan, then commits unless `--dry-run` is set.

use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use zone_migrator_core::services::migration::MigrationSession;
use zone_migrator_core::types::{MigrationPlan, MigrationState, ProgressSnapshot};
use zone_migrator_core::{MigrationOrchestrator, ServiceContext};

/// Arguments of `zone-migrator migrate`
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Account that owns the source zone
    #[arg(long)]
    pub account: String,

    /// Source zone name
    #[arg(long)]
    pub zone: String,

    /// Destination account (defaults to the source account)
    #[arg(long)]
    pub to_account: Option<String>,

    /// Destination zone name; the plan is not committable while it is empty
    #[arg(long, default_value = "")]
    pub to_name: String,

    /// Destination instance id (defaults to the instance already serving the zone)
    #[arg(long)]
    pub instance: Option<u64>,

    /// Override the data of one record, as RECORD_ID=DATA (repeatable)
    #[arg(long = "set", value_name = "ID=DATA", value_parser = parse_record_edit)]
    pub edits: Vec<(u64, String)>,

    /// Confirm a move that deletes the source zone
    #[arg(long)]
    pub yes: bool,

    /// Print the table and plan without committing
    #[arg(long)]
    pub dry_run: bool,
}

/// Parse `ID=DATA`.
fn parse_record_edit(s: &str) -> std::result::Result<(u64, String), String> {
    let (id, data) = s
        .split_once('=')
        .ok_or_else(|| format!("expected RECORD_ID=DATA, got '{s}'"))?;
    let id = id
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("invalid record id '{id}': {e}"))?;
    if data.is_empty() {
        return Err(format!("empty data for record {id}"));
    }
    Ok((id, data.to_string()))
}

pub async fn run(ctx: Arc<ServiceContext>, args: MigrateArgs) -> Result<()> {
    let mut orchestrator = MigrationOrchestrator::new(ctx);

    orchestrator
        .open(&args.account, &args.zone)
        .await
        .with_context(|| format!("Failed to load {} from account {}", args.zone, args.account))?;

    if let Some(to_account) = args.to_account.as_deref() {
        if to_account != args.account {
            orchestrator
                .change_destination_account(to_account)
                .await
                .with_context(|| format!("Failed to load instances of account {to_account}"))?;
        }
    }
    if let Some(id) = args.instance {
        orchestrator.select_destination_instance(id)?;
    }
    for (id, data) in &args.edits {
        orchestrator.edit_working_record(*id, data)?;
    }
    orchestrator.set_destination_zone_name(&args.to_name)?;
    orchestrator.set_confirmation(args.yes)?;

    let session = orchestrator
        .session()
        .context("Migration session was not opened")?;
    print!("{}", render_session(session));
    println!();
    print!("{}", render_plan(&session.plan(), session));

    if args.dry_run {
        tracing::info!("Dry run, nothing committed");
        return Ok(());
    }

    let mut progress = orchestrator.subscribe();
    let printer = tokio::spawn(async move {
        while progress.changed().await.is_ok() {
            let snapshot = progress.borrow_and_update().clone();
            if let Some(line) = render_progress(&snapshot) {
                println!("{line}");
            }
        }
    });

    let result = orchestrator.commit().await;
    drop(orchestrator);
    if let Err(e) = printer.await {
        tracing::warn!("Progress printer stopped: {e}");
    }

    let outcome = result?;
    println!(
        "{} complete: {} record(s); now at {} in account {}",
        outcome.kind,
        outcome.records_transferred,
        outcome.active_context.zone,
        outcome.active_context.account
    );
    Ok(())
}

/// The address table: every working record with its original data next to the proposed data.
pub fn render_session(session: &MigrationSession) -> String {
    let mut out = String::new();

    let source = session.source_account();
    let destination = session.destination_account();
    let _ = writeln!(out, "Source:      {} ({})", session.source_zone(), source.name);
    let target = match session.destination_instance() {
        Some(instance) => format!("{} [{}]", instance.name, instance.id),
        None => "none".to_string(),
    };
    let _ = writeln!(out, "Destination: {} (instance {target})", destination.name);
    out.push('\n');

    let originals = session.original_records().unwrap_or_default();
    let records = session.working_records();
    if records.is_empty() {
        out.push_str("No records to transfer\n");
        return out;
    }

    let type_width = records.iter().map(|r| r.record_type.len()).max().unwrap_or(0).max(4);
    let name_width = records.iter().map(|r| r.name.len()).max().unwrap_or(0).max(4);
    let data_width = originals.iter().map(|r| r.data.len()).max().unwrap_or(0).max(8);

    let _ = writeln!(
        out,
        "{:>10}  {:<type_width$}  {:<name_width$}  {:<data_width$}  PROPOSED",
        "ID", "TYPE", "NAME", "ORIGINAL"
    );
    for record in records {
        let original = originals
            .iter()
            .find(|o| o.id == record.id)
            .map_or("", |o| o.data.as_str());
        let marker = if original == record.data { ' ' } else { '*' };
        let _ = writeln!(
            out,
            "{:>10}  {:<type_width$}  {:<name_width$}  {original:<data_width$}  {}{marker}",
            record.id, record.record_type, record.name, record.data
        );
    }
    out
}

/// The operation kind and whether it can be committed as given.
pub fn render_plan(plan: &MigrationPlan, session: &MigrationSession) -> String {
    let mut out = String::new();
    let destination = if session.destination_zone_name().is_empty() {
        "<unnamed>"
    } else {
        session.destination_zone_name()
    };
    let _ = writeln!(
        out,
        "Plan: {} {} -> {} ({})",
        plan.kind,
        session.source_zone(),
        destination,
        session.destination_account().name
    );
    if let Some(message) = plan.confirmation_message {
        if session.confirmed() {
            let _ = writeln!(out, "Confirmed: {message}");
        } else {
            let _ = writeln!(out, "Confirmation required: {message} (pass --yes)");
        }
    }
    if !plan.committable {
        if session.destination_zone_name().is_empty() {
            out.push_str("Not committable: pass --to-name\n");
        } else {
            out.push_str("Not committable\n");
        }
    }
    out
}

/// One progress line, or `None` for snapshots with nothing to report.
pub fn render_progress(snapshot: &ProgressSnapshot) -> Option<String> {
    match snapshot.state {
        MigrationState::Committing(_) => {
            let progress = &snapshot.progress;
            Some(format!(
                "[{}/{}] {}",
                progress.completed, progress.total, progress.message
            ))
        }
        MigrationState::Failed => Some(format!(
            "Failed: {}",
            snapshot.last_error.as_deref().unwrap_or("unknown error")
        )),
        _ => None,
    }
}
