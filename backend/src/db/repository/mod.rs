//! Repository trait definitions for database operations.
//!
//! This module provides a collection of focused repository traits that
//! abstract storage operations. By splitting responsibilities across
//! multiple traits, implementations can be more focused and testable.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`professional`]: Professional lookups and connection health
//! - [`schedule`]: Weekly recurring schedule entries
//! - [`block`]: Ad-hoc unavailability blocks
//! - [`appointment`]: Read-only appointment occupancy
//!
//! # Trait Composition
//!
//! A complete repository implementation implements all four traits:
//!
//! ```ignore
//! impl ProfessionalRepository for MyRepo { ... }
//! impl ScheduleRepository for MyRepo { ... }
//! impl BlockRepository for MyRepo { ... }
//! impl AppointmentRepository for MyRepo { ... }
//! ```
//!
//! # Convenience Trait Bound
//!
//! For functions that need all repository capabilities, use the
//! [`FullRepository`] trait bound:
//!
//! ```ignore
//! async fn my_service<R: FullRepository>(repo: &R) -> RepositoryResult<()> {
//!     let professional = repo.find_professional(tenant_id, professional_id).await?;
//!     let blocks = repo.list_blocks(tenant_id, professional_id, None, None).await?;
//!     Ok(())
//! }
//! ```

pub mod appointment;
pub mod block;
pub mod error;
pub mod professional;
pub mod schedule;

// Re-export error types
pub use error::{RepositoryError, RepositoryResult};

// Re-export all traits
pub use appointment::AppointmentRepository;
pub use block::BlockRepository;
pub use professional::ProfessionalRepository;
pub use schedule::ScheduleRepository;

/// Composite trait bound for a complete repository implementation.
///
/// This trait is automatically implemented for any type that implements
/// all four repository traits. Use this as a convenient bound when you
/// need access to all repository operations.
pub trait FullRepository:
    ProfessionalRepository + ScheduleRepository + BlockRepository + AppointmentRepository
{
}

// Blanket implementation: any type implementing all four traits
// automatically implements FullRepository.
impl<T> FullRepository for T where
    T: ProfessionalRepository + ScheduleRepository + BlockRepository + AppointmentRepository
{
}
