//! Public API surface for the Rust backend.
//!
//! This file consolidates the identifier newtypes and re-exports the domain
//! types used across the repository, service, and HTTP layers. All types
//! derive Serialize/Deserialize for JSON serialization.

pub use crate::models::schedule::AppointmentOccupancy;
pub use crate::models::schedule::AppointmentStatus;
pub use crate::models::schedule::NewScheduleBlock;
pub use crate::models::schedule::Professional;
pub use crate::models::schedule::ScheduleBlock;
pub use crate::models::schedule::ScheduleEntryInput;
pub use crate::models::schedule::WeeklyScheduleEntry;
pub use crate::models::time::DayMinute;
pub use crate::scheduler::policy::CallerIdentity;
pub use crate::scheduler::policy::CallerRole;

use serde::{Deserialize, Serialize};

/// Tenant identifier (one clinic account; partitions all data).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TenantId(pub i64);

/// Professional identifier (clinic staff member with a schedule).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProfessionalId(pub i64);

/// Authenticated user identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

/// Ad-hoc schedule block identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockId(pub i64);

/// Weekly schedule entry identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleEntryId(pub i64);

impl TenantId {
    pub fn new(value: i64) -> Self {
        TenantId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl ProfessionalId {
    pub fn new(value: i64) -> Self {
        ProfessionalId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl UserId {
    pub fn new(value: i64) -> Self {
        UserId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl BlockId {
    pub fn new(value: i64) -> Self {
        BlockId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl ScheduleEntryId {
    pub fn new(value: i64) -> Self {
        ScheduleEntryId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
