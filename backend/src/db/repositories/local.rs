//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing and local development. All data is stored in
//! memory using HashMap and Vec structures, providing fast, deterministic,
//! and isolated execution.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::api::{BlockId, ProfessionalId, ScheduleEntryId, TenantId};
use crate::db::repository::schedule::NewScheduleEntry;
use crate::db::repository::{
    AppointmentRepository, BlockRepository, ProfessionalRepository, RepositoryError,
    RepositoryResult, ScheduleRepository,
};
use crate::models::schedule::{
    AppointmentOccupancy, NewScheduleBlock, Professional, ScheduleBlock, WeeklyScheduleEntry,
};

/// In-memory local repository.
///
/// This implementation stores all data in memory using HashMaps keyed by
/// tenant-scoped ids, making it ideal for unit tests and local development
/// that need isolation and speed. It also counts block/appointment queries
/// so tests can assert that short-circuit paths never touch storage.
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    professionals: HashMap<(TenantId, ProfessionalId), Professional>,
    schedule_entries: HashMap<(TenantId, ProfessionalId), Vec<WeeklyScheduleEntry>>,
    blocks: HashMap<(TenantId, BlockId), ScheduleBlock>,
    appointments: HashMap<(TenantId, ProfessionalId), Vec<AppointmentOccupancy>>,

    // ID counters
    next_block_id: i64,
    next_entry_id: i64,

    // Connection health
    is_healthy: bool,

    // Query counters for call-count assertions in tests
    block_queries: u64,
    appointment_queries: u64,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            professionals: HashMap::new(),
            schedule_entries: HashMap::new(),
            blocks: HashMap::new(),
            appointments: HashMap::new(),
            next_block_id: 1,
            next_entry_id: 1,
            is_healthy: true,
            block_queries: 0,
            appointment_queries: 0,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Add a professional to the repository.
    ///
    /// This is a helper method for setting up data.
    pub fn add_professional(&self, professional: Professional) {
        let mut data = self.data.write().unwrap();
        data.professionals
            .insert((professional.tenant_id, professional.id), professional);
    }

    /// Add an appointment occupancy record for a professional.
    pub fn add_appointment(
        &self,
        tenant_id: TenantId,
        professional_id: ProfessionalId,
        appointment: AppointmentOccupancy,
    ) {
        let mut data = self.data.write().unwrap();
        data.appointments
            .entry((tenant_id, professional_id))
            .or_default()
            .push(appointment);
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        let mut data = self.data.write().unwrap();
        data.is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        let is_healthy = data.is_healthy;
        *data = LocalData {
            is_healthy,
            ..Default::default()
        };
    }

    /// Number of block list/find queries served so far.
    pub fn block_query_count(&self) -> u64 {
        self.data.read().unwrap().block_queries
    }

    /// Number of appointment list queries served so far.
    pub fn appointment_query_count(&self) -> u64 {
        self.data.read().unwrap().appointment_queries
    }

    /// Number of stored schedule entries for a professional.
    pub fn entry_count(&self, tenant_id: TenantId, professional_id: ProfessionalId) -> usize {
        self.data
            .read()
            .unwrap()
            .schedule_entries
            .get(&(tenant_id, professional_id))
            .map_or(0, Vec::len)
    }

    /// Helper to check health and return an error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        let data = self.data.read().unwrap();
        if !data.is_healthy {
            return Err(RepositoryError::ConnectionError(
                "Database is not healthy".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfessionalRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let data = self.data.read().unwrap();
        Ok(data.is_healthy)
    }

    async fn find_professional(
        &self,
        tenant_id: TenantId,
        professional_id: ProfessionalId,
    ) -> RepositoryResult<Option<Professional>> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        Ok(data.professionals.get(&(tenant_id, professional_id)).cloned())
    }
}

#[async_trait]
impl ScheduleRepository for LocalRepository {
    async fn find_entry_for_day(
        &self,
        tenant_id: TenantId,
        professional_id: ProfessionalId,
        day_of_week: u8,
    ) -> RepositoryResult<Option<WeeklyScheduleEntry>> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        Ok(data
            .schedule_entries
            .get(&(tenant_id, professional_id))
            .and_then(|entries| {
                entries
                    .iter()
                    .find(|e| e.day_of_week == day_of_week)
                    .cloned()
            }))
    }

    async fn list_entries(
        &self,
        tenant_id: TenantId,
        professional_id: ProfessionalId,
    ) -> RepositoryResult<Vec<WeeklyScheduleEntry>> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        let mut entries = data
            .schedule_entries
            .get(&(tenant_id, professional_id))
            .cloned()
            .unwrap_or_default();
        entries.sort_by_key(|e| e.day_of_week);
        Ok(entries)
    }

    async fn replace_schedule(
        &self,
        tenant_id: TenantId,
        professional_id: ProfessionalId,
        entries: &[NewScheduleEntry],
    ) -> RepositoryResult<usize> {
        self.check_health()?;
        // One write guard covers delete and insert: readers never observe
        // the transient empty schedule.
        let mut data = self.data.write().unwrap();

        let rows: Vec<WeeklyScheduleEntry> = entries
            .iter()
            .map(|entry| {
                let id = data.next_entry_id;
                data.next_entry_id += 1;
                WeeklyScheduleEntry {
                    id: ScheduleEntryId(id),
                    tenant_id,
                    professional_id,
                    day_of_week: entry.day_of_week,
                    start_time: entry.start_time,
                    end_time: entry.end_time,
                    is_available: entry.is_available,
                }
            })
            .collect();

        let inserted = rows.len();
        data.schedule_entries.insert((tenant_id, professional_id), rows);
        Ok(inserted)
    }
}

#[async_trait]
impl BlockRepository for LocalRepository {
    async fn insert_block(
        &self,
        tenant_id: TenantId,
        block: &NewScheduleBlock,
    ) -> RepositoryResult<BlockId> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();
        let block_id = BlockId(data.next_block_id);
        data.next_block_id += 1;

        data.blocks.insert(
            (tenant_id, block_id),
            ScheduleBlock {
                id: block_id,
                tenant_id,
                professional_id: block.professional_id,
                start_datetime: block.start_datetime,
                end_datetime: block.end_datetime,
                reason: block.reason.clone(),
            },
        );
        Ok(block_id)
    }

    async fn find_block(
        &self,
        tenant_id: TenantId,
        block_id: BlockId,
    ) -> RepositoryResult<Option<ScheduleBlock>> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();
        data.block_queries += 1;
        Ok(data.blocks.get(&(tenant_id, block_id)).cloned())
    }

    async fn list_blocks(
        &self,
        tenant_id: TenantId,
        professional_id: ProfessionalId,
        date_from: Option<NaiveDateTime>,
        date_to: Option<NaiveDateTime>,
    ) -> RepositoryResult<Vec<ScheduleBlock>> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();
        data.block_queries += 1;

        let mut blocks: Vec<ScheduleBlock> = data
            .blocks
            .iter()
            .filter(|((tenant, _), block)| {
                *tenant == tenant_id && block.professional_id == professional_id
            })
            .map(|(_, block)| block.clone())
            .filter(|block| {
                // Keep blocks whose interval intersects [date_from, date_to).
                date_from.map_or(true, |from| block.end_datetime > from)
                    && date_to.map_or(true, |to| block.start_datetime < to)
            })
            .collect();
        blocks.sort_by_key(|b| b.start_datetime);
        Ok(blocks)
    }

    async fn delete_block(
        &self,
        tenant_id: TenantId,
        block_id: BlockId,
    ) -> RepositoryResult<usize> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();
        let existed = data.blocks.remove(&(tenant_id, block_id)).is_some();
        Ok(if existed { 1 } else { 0 })
    }
}

#[async_trait]
impl AppointmentRepository for LocalRepository {
    async fn list_appointments(
        &self,
        tenant_id: TenantId,
        professional_id: ProfessionalId,
    ) -> RepositoryResult<Vec<AppointmentOccupancy>> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();
        data.appointment_queries += 1;
        Ok(data
            .appointments
            .get(&(tenant_id, professional_id))
            .cloned()
            .unwrap_or_default())
    }
}
