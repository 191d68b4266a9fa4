//! Database module for schedule data storage.
//!
//! This module provides abstractions for storage operations via the
//! Repository pattern, allowing different backends to be swapped easily.
//!
//! # Repository Pattern
//! The module includes:
//! - `services`: High-level business logic functions (use these in your application!)
//! - `repository`: Trait definitions for storage operations
//! - `repositories::local`: In-memory implementation for unit testing and local development
//! - `factory`: Factory for creating repository instances
//!
//! # Recommended Usage
//!
//! **For new code, use the service layer:**
//! ```ignore
//! use vetsched_rust::api::{ProfessionalId, TenantId};
//! use vetsched_rust::db::{factory::RepositoryFactory, services, services::SlotQuery};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::from_env()?;
//!
//!     let slots = services::get_available_slots(
//!         repo.as_ref(),
//!         TenantId(1),
//!         ProfessionalId(1),
//!         &SlotQuery::new("2024-03-04", 30),
//!     )
//!     .await?;
//!     Ok(())
//! }
//! ```

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

#[cfg(test)]
#[path = "services_tests.rs"]
mod services_tests;

// ==================== Service Layer (Recommended for new code) ====================
// Use these high-level functions that work with any repository implementation

pub use services::{
    caller_can_edit, caller_can_view, create_block, delete_block, get_available_slots,
    get_professional, get_weekly_schedule, health_check, list_blocks, save_weekly_schedule,
    ServiceError, ServiceResult, SlotQuery,
};

// ==================== Repository Pattern Exports ====================

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
pub use repository::{
    AppointmentRepository, BlockRepository, FullRepository, ProfessionalRepository,
    RepositoryError, RepositoryResult, ScheduleRepository,
};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

/// Initialize the global repository singleton for the selected backend.
///
/// Configuration precedence: `repository.toml` when present, then the
/// `REPOSITORY_TYPE` environment variable, then the local default.
pub fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo = match RepositoryFactory::from_default_config() {
        Ok(repo) => repo,
        Err(_) => RepositoryFactory::from_env()
            .map_err(|e| anyhow::Error::msg(e.to_string()))?,
    };
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    if REPOSITORY.get().is_none() {
        let _ = init_repository();
    }

    REPOSITORY
        .get()
        .context("Repository not initialized. Call init_repository() first.")
}
