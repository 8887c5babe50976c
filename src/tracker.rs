//! The progression engine: day completion, streak, and the current-day pointer.
//!
//! A [`Tracker`] exclusively owns the in-memory state. The only mutation
//! entry points are [`Tracker::toggle_task`] and
//! [`Tracker::mark_missed_and_advance`]; each is one synchronous transition.
//!
//! Streak rules apply only to the current day:
//!
//! - incomplete → complete: streak + 1, pointer advances (clamped to the horizon).
//! - complete → incomplete: streak - 1 (floored at 0), pointer stays.
//!
//! Toggling any other day edits its history and recomputes its completion,
//! but never touches the streak or the pointer.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use tracing::{debug, warn};

use crate::model::{Blueprint, DayId, DayState, Progress, Snapshot};
use crate::storage::{Storage, StorageError};

/// Errors from a toggle that doesn't name a real task.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    #[error("no day {0} in this horizon")]
    UnknownDay(DayId),

    #[error("no section '{0}' in the blueprint")]
    UnknownSection(String),

    #[error("section '{section}' has no task {index}")]
    TaskOutOfRange { section: String, index: usize },
}

/// Reasons a persisted snapshot can't be restored.
///
/// Restoration is all-or-nothing: any of these means start fresh.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RestoreError {
    #[error("current day {current} is outside 1..={horizon}")]
    CurrentDayOutOfRange { current: DayId, horizon: u32 },

    #[error("expected {expected} days, found {found}")]
    DayCount { expected: usize, found: usize },

    #[error("day {0} is missing")]
    MissingDay(DayId),

    #[error("day {day} does not match the blueprint")]
    ShapeMismatch { day: DayId },

    #[error("day {0} is marked complete with unchecked tasks")]
    InconsistentCompletion(DayId),
}

/// What a single transition did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The current day became complete.
    Completed { streak: u32, advanced_to: DayId },

    /// The current day went from complete back to incomplete.
    Reopened { streak: u32 },

    /// A task on the current day flipped without changing its completion.
    Toggled { checked: bool },

    /// A task on a past or future day flipped. Streak and pointer untouched.
    HistoryEdited { day: DayId, completed: bool },

    /// The current day was marked missed.
    Skipped { from: DayId, to: DayId },
}

/// Where an opened tracker's state came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// The saved snapshot was restored.
    Restored,

    /// Nothing usable was saved: absent or malformed.
    Fresh,

    /// A well-formed snapshot exists but was written for another
    /// blueprint or horizon. It must not be overwritten.
    Unfit(RestoreError),
}

/// Owned tracker state plus the horizon bounding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tracker {
    horizon: u32,
    days_state: BTreeMap<DayId, DayState>,
    progress: Progress,
}

impl Tracker {
    /// Fresh state: every task on every day unchecked, day 1 current, no streak.
    pub fn initialize(blueprint: &Blueprint, horizon: u32) -> Self {
        let fresh = DayState::fresh(blueprint);
        let days_state = (1..=horizon).map(|id| (id, fresh.clone())).collect();
        Self {
            horizon,
            days_state,
            progress: Progress::default(),
        }
    }

    /// Rebuilds a tracker from a persisted snapshot, validating it whole.
    pub fn restore(
        snapshot: Snapshot,
        blueprint: &Blueprint,
        horizon: u32,
    ) -> Result<Self, RestoreError> {
        let Snapshot {
            days_state,
            progress,
        } = snapshot;

        if !(1..=horizon).contains(&progress.current_day_id) {
            return Err(RestoreError::CurrentDayOutOfRange {
                current: progress.current_day_id,
                horizon,
            });
        }

        let expected = horizon as usize;
        if days_state.len() != expected {
            return Err(RestoreError::DayCount {
                expected,
                found: days_state.len(),
            });
        }

        for id in 1..=horizon {
            let state = days_state.get(&id).ok_or(RestoreError::MissingDay(id))?;
            if !matches_blueprint(state, blueprint) {
                return Err(RestoreError::ShapeMismatch { day: id });
            }
            if state.completed() && !state.all_checked() {
                return Err(RestoreError::InconsistentCompletion(id));
            }
        }

        Ok(Self {
            horizon,
            days_state,
            progress,
        })
    }

    /// Loads the saved state, or starts fresh if there is none usable.
    ///
    /// Absent and malformed data both start fresh. A snapshot that parses
    /// but doesn't fit this blueprint or horizon also starts fresh, and is
    /// reported as [`Origin::Unfit`] so the caller can leave it on disk.
    pub fn open(storage: &Storage, blueprint: &Blueprint, horizon: u32) -> (Self, Origin) {
        let snapshot = match storage.load() {
            Ok(snapshot) => snapshot,
            Err(StorageError::NotFound(path)) => {
                debug!(path = %path.display(), "no saved state, starting fresh");
                return (Self::initialize(blueprint, horizon), Origin::Fresh);
            }
            Err(e) => {
                warn!(error = %e, "saved state unreadable, starting fresh");
                return (Self::initialize(blueprint, horizon), Origin::Fresh);
            }
        };

        match Self::restore(snapshot, blueprint, horizon) {
            Ok(tracker) => {
                debug!(
                    current_day = tracker.current_day_id(),
                    streak = tracker.streak(),
                    "restored saved state"
                );
                (tracker, Origin::Restored)
            }
            Err(e) => {
                warn!(error = %e, "saved state does not fit, starting fresh");
                (Self::initialize(blueprint, horizon), Origin::Unfit(e))
            }
        }
    }

    /// Flips one task and applies the streak rules.
    ///
    /// On error nothing is changed.
    pub fn toggle_task(
        &mut self,
        day_id: DayId,
        section_id: &str,
        task_index: usize,
    ) -> Result<Transition, TrackerError> {
        let current = self.progress.current_day_id;
        let state = self
            .days_state
            .get_mut(&day_id)
            .ok_or(TrackerError::UnknownDay(day_id))?;
        if !state.sections().contains_key(section_id) {
            return Err(TrackerError::UnknownSection(section_id.to_string()));
        }

        let was_completed = state.completed();
        let checked = state.toggle(section_id, task_index).ok_or_else(|| {
            TrackerError::TaskOutOfRange {
                section: section_id.to_string(),
                index: task_index,
            }
        })?;
        let now_completed = state.completed();

        let transition = if day_id != current {
            Transition::HistoryEdited {
                day: day_id,
                completed: now_completed,
            }
        } else if !was_completed && now_completed {
            self.progress.streak += 1;
            self.progress.current_day_id = self.next_day();
            Transition::Completed {
                streak: self.progress.streak,
                advanced_to: self.progress.current_day_id,
            }
        } else if was_completed && !now_completed {
            self.progress.streak = self.progress.streak.saturating_sub(1);
            Transition::Reopened {
                streak: self.progress.streak,
            }
        } else {
            Transition::Toggled { checked }
        };

        debug!(day = day_id, section = section_id, task = task_index, ?transition, "toggled task");
        Ok(transition)
    }

    /// Gives up on the current day: marks it not completed and moves on.
    ///
    /// The streak is left alone. At the last day the pointer stays put.
    pub fn mark_missed_and_advance(&mut self) -> Transition {
        let from = self.progress.current_day_id;
        if let Some(state) = self.days_state.get_mut(&from) {
            state.mark_missed();
        }
        self.progress.current_day_id = self.next_day();

        let transition = Transition::Skipped {
            from,
            to: self.progress.current_day_id,
        };
        debug!(?transition, "marked day missed");
        transition
    }

    pub fn current_day_id(&self) -> DayId {
        self.progress.current_day_id
    }

    pub fn streak(&self) -> u32 {
        self.progress.streak
    }

    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    pub fn day_state(&self, id: DayId) -> Option<&DayState> {
        self.days_state.get(&id)
    }

    /// Days up to and including the current one, oldest first.
    pub fn past_days(&self) -> RangeInclusive<DayId> {
        1..=self.progress.current_day_id
    }

    /// A full copy of the state, ready to persist.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            days_state: self.days_state.clone(),
            progress: self.progress,
        }
    }

    fn next_day(&self) -> DayId {
        self.progress
            .current_day_id
            .saturating_add(1)
            .min(self.horizon)
    }
}

/// Whether a day's sections line up exactly with the blueprint.
fn matches_blueprint(state: &DayState, blueprint: &Blueprint) -> bool {
    state.sections().len() == blueprint.sections.len()
        && blueprint.sections.iter().all(|section| {
            state
                .sections()
                .get(&section.id)
                .is_some_and(|tasks| tasks.len() == section.tasks.len())
        })
}
