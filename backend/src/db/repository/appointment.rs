//! Read-only appointment occupancy.
//!
//! Appointment creation and lifecycle management belong to a separate
//! subsystem; the availability engine only reads start/duration/status.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{ProfessionalId, TenantId};
use crate::models::schedule::AppointmentOccupancy;

/// Repository trait for appointment occupancy views.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// List appointment occupancy for a professional.
    ///
    /// Returns all records; the caller filters by date and active status
    /// before handing them to the calculator.
    ///
    /// # Returns
    /// * `Ok(Vec<AppointmentOccupancy>)` - All appointments for the
    ///   professional within the tenant
    /// * `Err(RepositoryError)` - If the operation fails
    async fn list_appointments(
        &self,
        tenant_id: TenantId,
        professional_id: ProfessionalId,
    ) -> RepositoryResult<Vec<AppointmentOccupancy>>;
}
