//! Schedule availability engine.
//!
//! This module contains the two pieces of real logic in the subsystem:
//!
//! - [`availability`]: merges occupied time from blocks and appointments
//!   onto a day's working window and emits bookable slot start times.
//! - [`policy`]: classifies the caller into an explicit role and decides
//!   whether they may view or edit a professional's schedule.
//!
//! Both are pure and synchronous; all I/O happens in the service layer
//! before they are invoked.

pub mod availability;
pub mod policy;

pub use availability::{compute_available_slots, OccupancyGrid, DEFAULT_STEP_MINUTES};
pub use policy::{can_edit, can_view, classify_caller, CallerIdentity, CallerRole};
