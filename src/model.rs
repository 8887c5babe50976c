//! Core data model for the mission tracker.
//!
//! These types describe what gets tracked: the blueprint of sections and
//! tasks repeated every day, the calendar days, each day's checklist state,
//! and the progress pointer with its streak.

mod blueprint;
mod day;
mod progress;
mod snapshot;

pub use blueprint::{Blueprint, Section, Task};
pub use day::{Day, DayId, DayState};
pub use progress::Progress;
pub use snapshot::Snapshot;
