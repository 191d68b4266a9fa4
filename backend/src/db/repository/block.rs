//! Ad-hoc unavailability blocks.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::error::RepositoryResult;
use crate::api::{BlockId, ProfessionalId, TenantId};
use crate::models::schedule::{NewScheduleBlock, ScheduleBlock};

/// Repository trait for schedule blocks.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait BlockRepository: Send + Sync {
    /// Persist a new block and assign it an id.
    ///
    /// # Returns
    /// * `Ok(BlockId)` - Id of the stored block
    /// * `Err(RepositoryError)` - If the operation fails
    async fn insert_block(
        &self,
        tenant_id: TenantId,
        block: &NewScheduleBlock,
    ) -> RepositoryResult<BlockId>;

    /// Look up a block within a tenant.
    ///
    /// # Returns
    /// * `Ok(Some(ScheduleBlock))` - The block, when it exists in this tenant
    /// * `Ok(None)` - No such block for this tenant
    /// * `Err(RepositoryError)` - If the operation fails
    async fn find_block(
        &self,
        tenant_id: TenantId,
        block_id: BlockId,
    ) -> RepositoryResult<Option<ScheduleBlock>>;

    /// List a professional's blocks, optionally restricted to a window.
    ///
    /// # Arguments
    /// * `date_from` / `date_to` - When present, only blocks whose interval
    ///   intersects `[date_from, date_to)` are returned
    ///
    /// # Returns
    /// * `Ok(Vec<ScheduleBlock>)` - Blocks ordered by start time
    /// * `Err(RepositoryError)` - If the operation fails
    async fn list_blocks(
        &self,
        tenant_id: TenantId,
        professional_id: ProfessionalId,
        date_from: Option<NaiveDateTime>,
        date_to: Option<NaiveDateTime>,
    ) -> RepositoryResult<Vec<ScheduleBlock>>;

    /// Hard-delete a block.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of rows removed (0 when the block was absent)
    /// * `Err(RepositoryError)` - If the operation fails
    async fn delete_block(
        &self,
        tenant_id: TenantId,
        block_id: BlockId,
    ) -> RepositoryResult<usize>;
}
