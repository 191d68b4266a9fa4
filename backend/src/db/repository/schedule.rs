//! Weekly recurring schedule entries.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{ProfessionalId, TenantId};
use crate::models::schedule::WeeklyScheduleEntry;

/// A validated weekly schedule row ready for insertion.
///
/// Produced by the service layer after day-of-week filtering and interval
/// validation; the repository assigns entry ids.
#[derive(Debug, Clone)]
pub struct NewScheduleEntry {
    pub day_of_week: u8,
    pub start_time: crate::models::time::DayMinute,
    pub end_time: crate::models::time::DayMinute,
    pub is_available: bool,
}

/// Repository trait for weekly schedule entries.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Find the schedule entry for one day of the week.
    ///
    /// # Arguments
    /// * `tenant_id` - Tenant owning the record
    /// * `professional_id` - The professional whose schedule is queried
    /// * `day_of_week` - `0` (Sunday) through `6` (Saturday)
    ///
    /// # Returns
    /// * `Ok(Some(WeeklyScheduleEntry))` - The entry, when one exists
    /// * `Ok(None)` - No entry for this day; callers treat this as
    ///   unavailable
    /// * `Err(RepositoryError)` - If the operation fails
    async fn find_entry_for_day(
        &self,
        tenant_id: TenantId,
        professional_id: ProfessionalId,
        day_of_week: u8,
    ) -> RepositoryResult<Option<WeeklyScheduleEntry>>;

    /// List all schedule entries for a professional.
    ///
    /// # Returns
    /// * `Ok(Vec<WeeklyScheduleEntry>)` - Entries ordered by day of week
    /// * `Err(RepositoryError)` - If the operation fails
    async fn list_entries(
        &self,
        tenant_id: TenantId,
        professional_id: ProfessionalId,
    ) -> RepositoryResult<Vec<WeeklyScheduleEntry>>;

    /// Replace a professional's entire weekly schedule.
    ///
    /// Deletes all existing entries for (tenant, professional) and inserts
    /// the submitted set as a single atomic operation; a concurrent reader
    /// never observes a transient empty schedule.
    ///
    /// # Arguments
    /// * `entries` - Validated rows, one per submitted day
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of entries inserted
    /// * `Err(RepositoryError)` - If the operation fails
    async fn replace_schedule(
        &self,
        tenant_id: TenantId,
        professional_id: ProfessionalId,
        entries: &[NewScheduleEntry],
    ) -> RepositoryResult<usize>;
}
