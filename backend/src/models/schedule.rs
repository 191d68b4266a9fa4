//! Domain data shapes for professionals, weekly schedules, blocks, and
//! appointment occupancy.
//!
//! All entities are tenant-scoped: nothing here is ever shared across
//! tenants, and every repository operation filters by tenant id first.

use std::fmt;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::api::{BlockId, ProfessionalId, ScheduleEntryId, TenantId, UserId};
use crate::models::time::DayMinute;

/// Default appointment length when the record carries no explicit duration.
pub const DEFAULT_APPOINTMENT_MINUTES: i64 = 30;

/// A clinic staff member who can have a schedule.
///
/// `user_id` links the professional to their login account, when one exists;
/// the access policy compares it against the caller's user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Professional {
    pub id: ProfessionalId,
    pub tenant_id: TenantId,
    pub user_id: Option<UserId>,
    pub name: String,
}

/// One row of a professional's weekly recurring schedule.
///
/// At most one entry exists per (tenant, professional, day-of-week); a
/// missing entry is equivalent to `is_available = false`. When
/// `is_available` is true, `start_time < end_time` holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyScheduleEntry {
    pub id: ScheduleEntryId,
    pub tenant_id: TenantId,
    pub professional_id: ProfessionalId,
    /// Day of week, `0` (Sunday) through `6` (Saturday).
    pub day_of_week: u8,
    pub start_time: DayMinute,
    pub end_time: DayMinute,
    pub is_available: bool,
}

/// A submitted weekly schedule row, before validation.
///
/// `day_of_week` is kept as a raw integer: rows outside `[0, 6]` are
/// silently skipped on save rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntryInput {
    pub day_of_week: i64,
    pub start_time: DayMinute,
    pub end_time: DayMinute,
    pub is_available: bool,
}

/// An ad-hoc unavailability window for a professional.
///
/// Blocks are created and deleted individually and are never merged or
/// split. `end_datetime > start_datetime` always holds. Timestamps are
/// naive local time; no timezone conversion is performed anywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleBlock {
    pub id: BlockId,
    pub tenant_id: TenantId,
    pub professional_id: ProfessionalId,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
    pub reason: Option<String>,
}

impl ScheduleBlock {
    /// Minute-of-day offset of the block start.
    pub fn start_minute(&self) -> i64 {
        minute_of_day(&self.start_datetime)
    }

    /// Minute-of-day offset of the block end, relative to the *start* day.
    ///
    /// A block that crosses midnight yields an end offset past 1440; the
    /// occupancy grid clips it to the day bounds.
    pub fn end_minute(&self) -> i64 {
        let days = (self.end_datetime.date() - self.start_datetime.date()).num_days();
        minute_of_day(&self.end_datetime) + days * 1440
    }
}

/// A block submitted for creation, before an id is assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewScheduleBlock {
    pub professional_id: ProfessionalId,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
    pub reason: Option<String>,
}

/// Appointment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

impl AppointmentStatus {
    /// Whether an appointment in this status occupies calendar time.
    ///
    /// Cancelled, completed, and no-show appointments do not block slots.
    pub fn is_blocking(&self) -> bool {
        matches!(self, AppointmentStatus::Scheduled | AppointmentStatus::Confirmed)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::NoShow => write!(f, "no_show"),
        }
    }
}

/// Read-only appointment view consumed by the availability calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentOccupancy {
    /// Appointment start timestamp (naive local time).
    pub appointment_date: NaiveDateTime,
    /// Explicit duration, when the record carries one.
    pub duration_minutes: Option<i64>,
    pub status: AppointmentStatus,
}

impl AppointmentOccupancy {
    /// Duration in minutes, falling back to the 30-minute default.
    pub fn effective_duration(&self) -> i64 {
        self.duration_minutes.unwrap_or(DEFAULT_APPOINTMENT_MINUTES)
    }

    /// Minute-of-day offset of the appointment start.
    pub fn start_minute(&self) -> i64 {
        minute_of_day(&self.appointment_date)
    }
}

fn minute_of_day(dt: &NaiveDateTime) -> i64 {
    (dt.hour() * 60 + dt.minute()) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_blocking_statuses() {
        assert!(AppointmentStatus::Scheduled.is_blocking());
        assert!(AppointmentStatus::Confirmed.is_blocking());
        assert!(!AppointmentStatus::Cancelled.is_blocking());
        assert!(!AppointmentStatus::Completed.is_blocking());
        assert!(!AppointmentStatus::NoShow.is_blocking());
    }

    #[test]
    fn test_status_serde_snake_case() {
        let json = serde_json::to_string(&AppointmentStatus::NoShow).unwrap();
        assert_eq!(json, "\"no_show\"");
        let back: AppointmentStatus = serde_json::from_str("\"confirmed\"").unwrap();
        assert_eq!(back, AppointmentStatus::Confirmed);
    }

    #[test]
    fn test_effective_duration_default() {
        let appt = AppointmentOccupancy {
            appointment_date: dt("2024-03-04 10:00:00"),
            duration_minutes: None,
            status: AppointmentStatus::Scheduled,
        };
        assert_eq!(appt.effective_duration(), 30);

        let explicit = AppointmentOccupancy {
            duration_minutes: Some(45),
            ..appt
        };
        assert_eq!(explicit.effective_duration(), 45);
    }

    #[test]
    fn test_block_minute_offsets() {
        let block = ScheduleBlock {
            id: BlockId(1),
            tenant_id: TenantId(1),
            professional_id: ProfessionalId(1),
            start_datetime: dt("2024-03-04 09:00:00"),
            end_datetime: dt("2024-03-04 09:30:00"),
            reason: None,
        };
        assert_eq!(block.start_minute(), 540);
        assert_eq!(block.end_minute(), 570);
    }

    #[test]
    fn test_block_minute_offsets_cross_midnight() {
        let block = ScheduleBlock {
            id: BlockId(2),
            tenant_id: TenantId(1),
            professional_id: ProfessionalId(1),
            start_datetime: dt("2024-03-04 23:00:00"),
            end_datetime: dt("2024-03-05 01:00:00"),
            reason: Some("overnight surgery".to_string()),
        };
        assert_eq!(block.start_minute(), 1380);
        // 60 minutes into the next day: offset past the day boundary.
        assert_eq!(block.end_minute(), 1500);
    }
}
