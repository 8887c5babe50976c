//! Day types: calendar slots and their per-day checklist state.

use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::Blueprint;

/// 1-based, contiguous day identifier.
pub type DayId = u32;

/// One slot in the generated horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub id: DayId,
    pub date: Date,
}

/// Checklist state for a single day.
///
/// `completed` is derived: every mutation through [`DayState::toggle`]
/// recomputes it as the AND of all task booleans. The only way to set it
/// otherwise is [`DayState::mark_missed`], which forces it false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayState {
    sections: BTreeMap<String, Vec<bool>>,
    completed: bool,
}

impl DayState {
    /// An all-unchecked state shaped after the blueprint.
    pub fn fresh(blueprint: &Blueprint) -> Self {
        let sections = blueprint
            .sections
            .iter()
            .map(|s| (s.id.clone(), vec![false; s.tasks.len()]))
            .collect();
        Self {
            sections,
            completed: false,
        }
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn sections(&self) -> &BTreeMap<String, Vec<bool>> {
        &self.sections
    }

    /// Whether the task at `(section_id, index)` is checked.
    ///
    /// Unknown positions read as unchecked.
    pub fn is_checked(&self, section_id: &str, index: usize) -> bool {
        self.sections
            .get(section_id)
            .and_then(|tasks| tasks.get(index))
            .copied()
            .unwrap_or(false)
    }

    /// AND over every task boolean in every section.
    pub fn all_checked(&self) -> bool {
        self.sections.values().flatten().all(|&done| done)
    }

    /// Flips one task and recomputes `completed`.
    ///
    /// Returns `None` without touching anything if the position doesn't exist.
    pub fn toggle(&mut self, section_id: &str, index: usize) -> Option<bool> {
        let slot = self.sections.get_mut(section_id)?.get_mut(index)?;
        *slot = !*slot;
        let checked = *slot;
        self.completed = self.all_checked();
        Some(checked)
    }

    /// Forces `completed` false. Task booleans are left as they are.
    pub fn mark_missed(&mut self) {
        self.completed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::{Section, Task};

    fn two_section_blueprint() -> Blueprint {
        Blueprint {
            sections: vec![
                Section {
                    id: "a".into(),
                    title: "A".into(),
                    tasks: vec![Task::new("06:00 AM", "one"), Task::new("07:00 AM", "two")],
                },
                Section {
                    id: "b".into(),
                    title: "B".into(),
                    tasks: vec![Task::new("08:00 AM", "three")],
                },
            ],
        }
    }

    #[test]
    fn fresh_state_matches_blueprint_shape() {
        let state = DayState::fresh(&two_section_blueprint());

        assert_eq!(state.sections()["a"], vec![false, false]);
        assert_eq!(state.sections()["b"], vec![false]);
        assert!(!state.completed());
    }

    #[test]
    fn completed_tracks_every_toggle() {
        let mut state = DayState::fresh(&two_section_blueprint());

        state.toggle("a", 0);
        state.toggle("a", 1);
        assert!(!state.completed());

        state.toggle("b", 0);
        assert!(state.completed());
        assert_eq!(state.completed(), state.all_checked());

        state.toggle("a", 1);
        assert!(!state.completed());
        assert_eq!(state.completed(), state.all_checked());
    }

    #[test]
    fn toggle_unknown_position_is_a_no_op() {
        let mut state = DayState::fresh(&two_section_blueprint());
        let before = state.clone();

        assert_eq!(state.toggle("missing", 0), None);
        assert_eq!(state.toggle("b", 1), None);
        assert_eq!(state, before);
    }

    #[test]
    fn mark_missed_keeps_booleans() {
        let mut state = DayState::fresh(&two_section_blueprint());
        state.toggle("a", 0);
        state.toggle("a", 1);
        state.toggle("b", 0);
        assert!(state.completed());

        state.mark_missed();

        assert!(!state.completed());
        assert!(state.all_checked());
        assert!(state.is_checked("b", 0));
    }

    #[test]
    fn serializes_with_original_field_names() {
        let state = DayState::fresh(&two_section_blueprint());
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["completed"], false);
        assert_eq!(json["sections"]["a"], serde_json::json!([false, false]));
    }
}
