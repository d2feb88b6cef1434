//! Zone Migrator Core Library
//!
//! Provides the zone migration engine, including:
//! - Address lookup and record remapping between compute instances
//! - Migration planning (copy / move / change)
//! - The migration orchestrator that fetches dependencies and commits the plan
//! - Account verification (Account Service)
//!
//! This library is platform-independent: the hosting provider and the account source are
//! injected through [`ServiceContext`], so command-line and graphical front ends share it.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{AccountService, MigrationOrchestrator, ServiceContext, VerificationSummary};
pub use traits::{AccountRepository, InMemoryAccountRepository};
