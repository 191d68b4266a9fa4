//! High-level schedule service layer.
//!
//! This module provides repository-agnostic operations that work with any
//! implementation of the repository traits. All validation, access checks,
//! and orchestration live here; the calculator and policy below it are pure,
//! and the HTTP layer above it is a thin adapter.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API)                            │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs) - Business Logic            │
//! │  - Input validation and access checks                    │
//! │  - Availability orchestration                            │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface    │
//! │  - ProfessionalRepository / ScheduleRepository           │
//! │  - BlockRepository / AppointmentRepository               │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use super::repository::schedule::NewScheduleEntry;
use super::repository::{FullRepository, RepositoryError, RepositoryResult};
use crate::api::{BlockId, ProfessionalId, TenantId};
use crate::models::schedule::{
    NewScheduleBlock, Professional, ScheduleBlock, ScheduleEntryInput, WeeklyScheduleEntry,
};
use crate::scheduler::availability::{compute_available_slots, DEFAULT_STEP_MINUTES};
use crate::scheduler::policy::{can_edit, can_view, classify_caller, CallerIdentity};

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error type for service operations.
///
/// Validation, not-found, and forbidden conditions are detected before the
/// calculator runs and short-circuit with no partial side effects; storage
/// faults pass through untouched and are not retried here.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn parse_date(date: &str) -> ServiceResult<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| ServiceError::Validation(format!("Invalid date '{}': expected YYYY-MM-DD", date)))
}

fn parse_datetime(field: &str, value: &str) -> ServiceResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).map_err(|_| {
        ServiceError::Validation(format!(
            "Invalid {} '{}': expected YYYY-MM-DD HH:MM:SS",
            field, value
        ))
    })
}

// ==================== Health & Connection ====================

/// Check if the storage connection is healthy.
///
/// This is a simple pass-through to the repository's health check.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Professionals ====================

/// Load a professional, failing with `NotFound` outside the tenant.
pub async fn get_professional<R: FullRepository + ?Sized>(
    repo: &R,
    tenant_id: TenantId,
    professional_id: ProfessionalId,
) -> ServiceResult<Professional> {
    repo.find_professional(tenant_id, professional_id)
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(format!(
                "Professional {} not found",
                professional_id.value()
            ))
        })
}

// ==================== Access Policy ====================

/// Whether the caller may view the professional's schedule.
pub async fn caller_can_view<R: FullRepository + ?Sized>(
    repo: &R,
    tenant_id: TenantId,
    caller: &CallerIdentity,
    professional_id: ProfessionalId,
) -> ServiceResult<bool> {
    let professional = get_professional(repo, tenant_id, professional_id).await?;
    Ok(can_view(classify_caller(caller, &professional)))
}

/// Whether the caller may edit the professional's schedule.
///
/// Same rules as [`caller_can_view`] today; separate entry point so the
/// rules can diverge without an interface change.
pub async fn caller_can_edit<R: FullRepository + ?Sized>(
    repo: &R,
    tenant_id: TenantId,
    caller: &CallerIdentity,
    professional_id: ProfessionalId,
) -> ServiceResult<bool> {
    let professional = get_professional(repo, tenant_id, professional_id).await?;
    Ok(can_edit(classify_caller(caller, &professional)))
}

fn ensure_view(caller: &CallerIdentity, professional: &Professional) -> ServiceResult<()> {
    if can_view(classify_caller(caller, professional)) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(format!(
            "Not allowed to view schedule of professional {}",
            professional.id.value()
        )))
    }
}

fn ensure_edit(caller: &CallerIdentity, professional: &Professional) -> ServiceResult<()> {
    if can_edit(classify_caller(caller, professional)) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(format!(
            "Not allowed to edit schedule of professional {}",
            professional.id.value()
        )))
    }
}

// ==================== Availability ====================

/// Parameters for an availability query.
#[derive(Debug, Clone)]
pub struct SlotQuery {
    /// Target date, `YYYY-MM-DD`.
    pub date: String,
    /// Requested appointment length in minutes.
    pub duration_minutes: u16,
    /// Candidate grid granularity; defaults to 15 minutes.
    pub step_minutes: u16,
}

impl SlotQuery {
    pub fn new(date: impl Into<String>, duration_minutes: u16) -> Self {
        Self {
            date: date.into(),
            duration_minutes,
            step_minutes: DEFAULT_STEP_MINUTES,
        }
    }
}

/// Compute bookable slot start times for a professional on one date.
///
/// Flow: load the professional, resolve the weekly entry for the date's
/// day-of-week, and short-circuit to an empty list when the day is marked
/// unavailable or has no entry; blocks and appointments are not queried in
/// that case. Otherwise same-day blocks and active appointments are merged
/// by the calculator.
///
/// # Returns
/// * `Ok(Vec<String>)` - Ascending `HH:MM` slot starts (possibly empty)
/// * `Err(ServiceError::Validation)` - Malformed date or zero duration/step
/// * `Err(ServiceError::NotFound)` - Professional missing in this tenant
pub async fn get_available_slots<R: FullRepository + ?Sized>(
    repo: &R,
    tenant_id: TenantId,
    professional_id: ProfessionalId,
    query: &SlotQuery,
) -> ServiceResult<Vec<String>> {
    let target_date = parse_date(&query.date)?;
    if query.duration_minutes == 0 {
        return Err(ServiceError::Validation(
            "duration must be a positive number of minutes".to_string(),
        ));
    }
    if query.step_minutes == 0 {
        return Err(ServiceError::Validation(
            "step must be a positive number of minutes".to_string(),
        ));
    }

    let professional = get_professional(repo, tenant_id, professional_id).await?;

    // `0` (Sunday) through `6` (Saturday), matching the stored convention.
    let day_of_week = target_date.weekday().num_days_from_sunday() as u8;

    let entry = repo
        .find_entry_for_day(tenant_id, professional.id, day_of_week)
        .await?;

    // No entry is equivalent to an explicit unavailable day.
    let entry = match entry {
        Some(entry) if entry.is_available => entry,
        _ => {
            debug!(
                professional_id = professional_id.value(),
                date = %target_date,
                "day unavailable, returning no slots"
            );
            return Ok(Vec::new());
        }
    };

    let day_start = target_date.and_time(chrono::NaiveTime::MIN);
    let blocks = repo
        .list_blocks(
            tenant_id,
            professional.id,
            Some(day_start),
            Some(day_start + Duration::days(1)),
        )
        .await?;

    let appointments: Vec<_> = repo
        .list_appointments(tenant_id, professional.id)
        .await?
        .into_iter()
        .filter(|appt| appt.status.is_blocking() && appt.appointment_date.date() == target_date)
        .collect();

    Ok(compute_available_slots(
        entry.start_time,
        entry.end_time,
        query.duration_minutes,
        query.step_minutes,
        target_date,
        &blocks,
        &appointments,
    ))
}

// ==================== Weekly Schedule ====================

/// Read back a professional's weekly schedule.
pub async fn get_weekly_schedule<R: FullRepository + ?Sized>(
    repo: &R,
    tenant_id: TenantId,
    caller: &CallerIdentity,
    professional_id: ProfessionalId,
) -> ServiceResult<Vec<WeeklyScheduleEntry>> {
    let professional = get_professional(repo, tenant_id, professional_id).await?;
    ensure_view(caller, &professional)?;
    Ok(repo.list_entries(tenant_id, professional.id).await?)
}

/// Replace a professional's entire weekly schedule.
///
/// Existing entries are deleted and the submitted set inserted atomically;
/// a day omitted from the submission ends up with no entry and is treated
/// as unavailable. Submitted rows with a day-of-week outside `[0, 6]` are
/// skipped, not rejected. Rows marked available must have
/// `start_time < end_time`.
///
/// # Returns
/// * `Ok(usize)` - Number of entries stored
pub async fn save_weekly_schedule<R: FullRepository + ?Sized>(
    repo: &R,
    tenant_id: TenantId,
    caller: &CallerIdentity,
    professional_id: ProfessionalId,
    entries: &[ScheduleEntryInput],
) -> ServiceResult<usize> {
    let professional = get_professional(repo, tenant_id, professional_id).await?;
    ensure_edit(caller, &professional)?;

    let mut rows = Vec::with_capacity(entries.len());
    for entry in entries {
        if !(0..=6).contains(&entry.day_of_week) {
            debug!(
                day_of_week = entry.day_of_week,
                professional_id = professional_id.value(),
                "skipping schedule entry with out-of-range day of week"
            );
            continue;
        }
        if entry.is_available && entry.start_time >= entry.end_time {
            return Err(ServiceError::Validation(format!(
                "start_time must be before end_time for day {}",
                entry.day_of_week
            )));
        }
        rows.push(NewScheduleEntry {
            day_of_week: entry.day_of_week as u8,
            start_time: entry.start_time,
            end_time: entry.end_time,
            is_available: entry.is_available,
        });
    }

    let inserted = repo
        .replace_schedule(tenant_id, professional.id, &rows)
        .await?;
    info!(
        professional_id = professional_id.value(),
        entries = inserted,
        "weekly schedule replaced"
    );
    Ok(inserted)
}

// ==================== Blocks ====================

/// List a professional's blocks, optionally restricted to a date window.
///
/// `date_from`/`date_to` are `YYYY-MM-DD`; the window covers
/// `[date_from 00:00, date_to + 1 day)` so both bounds are inclusive dates.
pub async fn list_blocks<R: FullRepository + ?Sized>(
    repo: &R,
    tenant_id: TenantId,
    caller: &CallerIdentity,
    professional_id: ProfessionalId,
    date_from: Option<&str>,
    date_to: Option<&str>,
) -> ServiceResult<Vec<ScheduleBlock>> {
    let professional = get_professional(repo, tenant_id, professional_id).await?;
    ensure_view(caller, &professional)?;

    let from = date_from
        .map(parse_date)
        .transpose()?
        .map(|d| d.and_time(chrono::NaiveTime::MIN));
    let to = date_to
        .map(parse_date)
        .transpose()?
        .map(|d| (d + Duration::days(1)).and_time(chrono::NaiveTime::MIN));

    Ok(repo
        .list_blocks(tenant_id, professional.id, from, to)
        .await?)
}

/// Create an ad-hoc unavailability block.
///
/// # Returns
/// * `Ok(BlockId)` - Id of the stored block
/// * `Err(ServiceError::Validation)` - Unparseable datetimes
/// * `Err(ServiceError::InvalidInterval)` - `end <= start`
/// * `Err(ServiceError::Forbidden)` - Caller may not edit this schedule
pub async fn create_block<R: FullRepository + ?Sized>(
    repo: &R,
    tenant_id: TenantId,
    caller: &CallerIdentity,
    professional_id: ProfessionalId,
    start_datetime: &str,
    end_datetime: &str,
    reason: Option<String>,
) -> ServiceResult<BlockId> {
    let start = parse_datetime("start_datetime", start_datetime)?;
    let end = parse_datetime("end_datetime", end_datetime)?;
    if end <= start {
        return Err(ServiceError::InvalidInterval(
            "end_datetime must be after start_datetime".to_string(),
        ));
    }

    let professional = get_professional(repo, tenant_id, professional_id).await?;
    ensure_edit(caller, &professional)?;

    let block_id = repo
        .insert_block(
            tenant_id,
            &NewScheduleBlock {
                professional_id: professional.id,
                start_datetime: start,
                end_datetime: end,
                reason,
            },
        )
        .await?;
    info!(
        professional_id = professional_id.value(),
        block_id = block_id.value(),
        "schedule block created"
    );
    Ok(block_id)
}

/// Delete a block by id.
///
/// The block is looked up within the caller's tenant, the access check runs
/// against the block's professional, and the row is then hard-deleted.
pub async fn delete_block<R: FullRepository + ?Sized>(
    repo: &R,
    tenant_id: TenantId,
    caller: &CallerIdentity,
    block_id: BlockId,
) -> ServiceResult<()> {
    let block = repo
        .find_block(tenant_id, block_id)
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(format!("Block {} not found", block_id.value()))
        })?;

    let professional = get_professional(repo, tenant_id, block.professional_id).await?;
    ensure_edit(caller, &professional)?;

    repo.delete_block(tenant_id, block_id).await?;
    info!(block_id = block_id.value(), "schedule block deleted");
    Ok(())
}
