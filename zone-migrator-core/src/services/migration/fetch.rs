//! Dependency fetches issued by the orchestrator

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use uuid::Uuid;
use zone_migrator_provider::{mask_token, HostingProvider, Instance, ProviderError, ZoneRecord};

/// Identifies the session (and destination account selection) a fetch was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub(crate) session_id: Uuid,
    pub(crate) generation: u64,
}

/// A provider call the orchestrator needs to make.
pub enum FetchRequest {
    /// List the source account's instances.
    SourceInstances {
        /// 所属会话
        ticket: FetchTicket,
        /// 源账户 token
        token: String,
    },
    /// List the source zone's records.
    ZoneRecords {
        /// 所属会话
        ticket: FetchTicket,
        /// 源账户 token
        token: String,
        /// Zone 名称
        zone: String,
    },
    /// List the destination account's instances.
    DestinationInstances {
        /// 所属会话及目标账户代次
        ticket: FetchTicket,
        /// 目标账户 token
        token: String,
    },
}

/// The result of a [`FetchRequest`], fed back through `MigrationOrchestrator::apply`.
#[derive(Debug)]
pub enum FetchResponse {
    /// Source account instances.
    SourceInstances(FetchTicket, Result<Vec<Instance>, ProviderError>),
    /// Source zone records.
    ZoneRecords(FetchTicket, Result<Vec<ZoneRecord>, ProviderError>),
    /// Destination account instances.
    DestinationInstances(FetchTicket, Result<Vec<Instance>, ProviderError>),
}

impl FetchRequest {
    /// Short description for logs.
    pub fn describe(&self) -> String {
        match self {
            Self::SourceInstances { .. } => "list source instances".to_string(),
            Self::ZoneRecords { zone, .. } => format!("list records of {zone}"),
            Self::DestinationInstances { ticket, .. } => {
                format!("list destination instances (generation {})", ticket.generation)
            }
        }
    }

    /// Run the request against `provider`.
    pub fn dispatch(self, provider: Arc<dyn HostingProvider>) -> BoxFuture<'static, FetchResponse> {
        async move {
            match self {
                Self::SourceInstances { ticket, token } => {
                    FetchResponse::SourceInstances(ticket, provider.list_instances(&token).await)
                }
                Self::ZoneRecords {
                    ticket,
                    token,
                    zone,
                } => FetchResponse::ZoneRecords(
                    ticket,
                    provider.list_zone_records(&token, &zone).await,
                ),
                Self::DestinationInstances { ticket, token } => {
                    FetchResponse::DestinationInstances(
                        ticket,
                        provider.list_instances(&token).await,
                    )
                }
            }
        }
        .boxed()
    }
}

impl std::fmt::Debug for FetchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceInstances { ticket, token } => f
                .debug_struct("SourceInstances")
                .field("ticket", ticket)
                .field("token", &mask_token(token))
                .finish(),
            Self::ZoneRecords {
                ticket,
                token,
                zone,
            } => f
                .debug_struct("ZoneRecords")
                .field("ticket", ticket)
                .field("token", &mask_token(token))
                .field("zone", zone)
                .finish(),
            Self::DestinationInstances { ticket, token } => f
                .debug_struct("DestinationInstances")
                .field("ticket", ticket)
                .field("token", &mask_token(token))
                .finish(),
        }
    }
}

impl FetchResponse {
    /// Ticket of the originating request.
    pub fn ticket(&self) -> FetchTicket {
        match self {
            Self::SourceInstances(ticket, _)
            | Self::ZoneRecords(ticket, _)
            | Self::DestinationInstances(ticket, _) => *ticket,
        }
    }

    /// The provider error, if the fetch failed.
    pub fn error(&self) -> Option<&ProviderError> {
        match self {
            Self::SourceInstances(_, result) | Self::DestinationInstances(_, result) => {
                result.as_ref().err()
            }
            Self::ZoneRecords(_, result) => result.as_ref().err(),
        }
    }
}
