//! Professional lookups and connection health.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{ProfessionalId, TenantId};
use crate::models::schedule::Professional;

/// Repository trait for professional records.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ProfessionalRepository: Send + Sync {
    // ==================== Health & Connection ====================

    /// Check if the database connection is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if connection is healthy
    /// - `Ok(false)` if connection is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    // ==================== Professional Operations ====================

    /// Look up a professional within a tenant.
    ///
    /// # Arguments
    /// * `tenant_id` - Tenant owning the record
    /// * `professional_id` - The professional to look up
    ///
    /// # Returns
    /// * `Ok(Some(Professional))` - The record, when it exists in this tenant
    /// * `Ok(None)` - No such professional for this tenant
    /// * `Err(RepositoryError)` - If the operation fails
    async fn find_professional(
        &self,
        tenant_id: TenantId,
        professional_id: ProfessionalId,
    ) -> RepositoryResult<Option<Professional>>;
}
