//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! Domain types that already derive Serialize/Deserialize are re-exported
//! from the api module.

use serde::{Deserialize, Serialize};

pub use crate::api::{ScheduleBlock, ScheduleEntryInput, WeeklyScheduleEntry};
use crate::models::time::DayMinute;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Storage connection status
    pub database: String,
}

/// Query parameters for the available-slots endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AvailableSlotsQuery {
    /// Target date, `YYYY-MM-DD`
    pub date: String,
    /// Requested appointment length in minutes
    pub duration: u16,
    /// Candidate grid granularity in minutes (default: 15)
    #[serde(default)]
    pub step: Option<u16>,
}

/// Available slots response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableSlotsResponse {
    pub professional_id: i64,
    pub date: String,
    /// Ascending `HH:MM` slot start times
    pub slots: Vec<String>,
    pub total: usize,
}

/// Request body for replacing a weekly schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveScheduleRequest {
    /// One row per day; omitted days end up unavailable
    pub entries: Vec<ScheduleEntryInput>,
}

/// Response for a weekly schedule replacement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveScheduleResponse {
    /// Number of entries stored
    pub saved: usize,
}

/// Weekly schedule read-back response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyScheduleResponse {
    pub professional_id: i64,
    pub entries: Vec<ScheduleEntryDto>,
}

/// One weekly schedule row as exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntryDto {
    pub day_of_week: u8,
    pub start_time: DayMinute,
    pub end_time: DayMinute,
    pub is_available: bool,
}

impl From<WeeklyScheduleEntry> for ScheduleEntryDto {
    fn from(entry: WeeklyScheduleEntry) -> Self {
        Self {
            day_of_week: entry.day_of_week,
            start_time: entry.start_time,
            end_time: entry.end_time,
            is_available: entry.is_available,
        }
    }
}

/// Query parameters for the block list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ListBlocksQuery {
    /// Inclusive start date, `YYYY-MM-DD` (optional)
    #[serde(default)]
    pub from: Option<String>,
    /// Inclusive end date, `YYYY-MM-DD` (optional)
    #[serde(default)]
    pub to: Option<String>,
}

/// Block list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockListResponse {
    pub blocks: Vec<BlockDto>,
    pub total: usize,
}

/// Request body for creating a block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBlockRequest {
    /// Block start, `YYYY-MM-DD HH:MM:SS`
    pub start_datetime: String,
    /// Block end, `YYYY-MM-DD HH:MM:SS`
    pub end_datetime: String,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Response for block creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBlockResponse {
    pub block_id: i64,
}

/// Block DTO for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockDto {
    pub block_id: i64,
    pub professional_id: i64,
    pub start_datetime: String,
    pub end_datetime: String,
    pub reason: Option<String>,
}

impl From<ScheduleBlock> for BlockDto {
    fn from(block: ScheduleBlock) -> Self {
        Self {
            block_id: block.id.value(),
            professional_id: block.professional_id.value(),
            start_datetime: block.start_datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            end_datetime: block.end_datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            reason: block.reason,
        }
    }
}
