//! Zone migration engine
//!
//! Pure building blocks ([`locate`], [`remap`], [`classify`]) and the stateful
//! [`MigrationOrchestrator`] that drives fetching, editing and committing a migration.

mod address_index;
mod commit;
mod fetch;
mod orchestrator;
mod planner;
mod remapper;
mod session;

pub use address_index::locate;
pub use fetch::{FetchRequest, FetchResponse, FetchTicket};
pub use orchestrator::MigrationOrchestrator;
pub use planner::{classify, MOVE_CONFIRMATION_MESSAGE};
pub use remapper::{default_destination_instance, derive_working_records, remap};
pub use session::MigrationSession;
