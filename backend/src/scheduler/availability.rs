//! Slot availability computation.
//!
//! Given a working window, a requested duration, and the day's occupied
//! intervals (ad-hoc blocks plus active appointments), this module walks the
//! window in fixed-size steps and emits every start time at which the full
//! duration fits in unoccupied time.
//!
//! The computation is pure and bounded: one fixed 1440-minute occupancy grid
//! per query and at most `1440 / step` walk iterations. It never fails: in
//! the worst case it returns an empty list.

use chrono::NaiveDate;

use crate::models::schedule::{AppointmentOccupancy, ScheduleBlock};
use crate::models::time::{minutes_to_time, DayMinute, MINUTES_PER_DAY};

/// Granularity at which candidate start times are tried, in minutes.
pub const DEFAULT_STEP_MINUTES: u16 = 15;

/// Per-query occupancy marker over the minutes of a single day.
///
/// A fixed-capacity structure rather than a growable map: marking is a set
/// union over `[0, 1440)`, so overlapping blocks and appointments are
/// naturally idempotent.
#[derive(Debug)]
pub struct OccupancyGrid {
    occupied: [bool; MINUTES_PER_DAY as usize],
}

impl OccupancyGrid {
    pub fn new() -> Self {
        Self {
            occupied: [false; MINUTES_PER_DAY as usize],
        }
    }

    /// Mark the half-open minute range `[start, end)` as occupied.
    ///
    /// The range is clipped to the day bounds, so intervals that spill past
    /// midnight (or start before it) mark only their in-day portion.
    pub fn mark_range(&mut self, start: i64, end: i64) {
        let from = start.clamp(0, MINUTES_PER_DAY as i64) as usize;
        let to = end.clamp(0, MINUTES_PER_DAY as i64) as usize;
        for minute in from..to {
            self.occupied[minute] = true;
        }
    }

    /// Mark a block, but only when its start date matches the target date.
    ///
    /// Blocks are matched by the calendar date of their *start* timestamp;
    /// a cross-midnight block therefore occupies time only on the day it
    /// begins. This mirrors the stored-schedule semantics callers rely on.
    pub fn mark_block(&mut self, block: &ScheduleBlock, target_date: NaiveDate) {
        if block.start_datetime.date() != target_date {
            return;
        }
        self.mark_range(block.start_minute(), block.end_minute());
    }

    /// Mark an active appointment's `[start, start + duration)` interval.
    pub fn mark_appointment(&mut self, appointment: &AppointmentOccupancy) {
        let start = appointment.start_minute();
        self.mark_range(start, start + appointment.effective_duration());
    }

    /// Whether every minute of `[start, start + len)` is unoccupied.
    pub fn is_free(&self, start: u16, len: u16) -> bool {
        let from = start as usize;
        let to = (start as usize + len as usize).min(MINUTES_PER_DAY as usize);
        self.occupied[from..to].iter().all(|m| !m)
    }
}

impl Default for OccupancyGrid {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the bookable slot start times for one professional-day.
///
/// # Arguments
/// * `work_start`, `work_end` - the day's working window, already resolved
///   from the weekly schedule (callers short-circuit unavailable days and
///   never reach this function for them)
/// * `slot_duration` - requested appointment length in minutes
/// * `step_size` - candidate grid granularity in minutes
/// * `target_date` - the calendar date being queried
/// * `blocks` - blocks overlapping the target date
/// * `appointments` - same-day appointments already filtered to active
///   statuses
///
/// # Returns
/// Ascending `HH:MM` start times, quantized to the `step_size` grid anchored
/// at `work_start`. A slot that overlaps even a single occupied minute is
/// excluded entirely. A window shorter than `slot_duration` yields an empty
/// list, as does a zero duration or step.
pub fn compute_available_slots(
    work_start: DayMinute,
    work_end: DayMinute,
    slot_duration: u16,
    step_size: u16,
    target_date: NaiveDate,
    blocks: &[ScheduleBlock],
    appointments: &[AppointmentOccupancy],
) -> Vec<String> {
    // A zero step would never advance the walk; a zero duration is
    // meaningless. Both are rejected upstream as validation errors.
    if slot_duration == 0 || step_size == 0 {
        return Vec::new();
    }

    let mut grid = OccupancyGrid::new();
    for block in blocks {
        grid.mark_block(block, target_date);
    }
    for appointment in appointments {
        grid.mark_appointment(appointment);
    }

    // Widen to u32 so oversized durations cannot overflow the walk.
    let end = work_end.value() as u32;
    let duration = slot_duration as u32;

    let mut slots = Vec::new();
    let mut current = work_start.value() as u32;
    // Last valid start is `end - duration`, inclusive.
    while current + duration <= end {
        if grid.is_free(current as u16, slot_duration) {
            slots.push(minutes_to_time(current as u16));
        }
        current += step_size as u32;
    }

    slots
}
