//! Blueprint loading: the built-in daily mission, or a TOML file.
//!
//! A blueprint file lists sections in order, each with its tasks:
//!
//! ```toml
//! [[section]]
//! id = "morning_workout"
//! title = "Morning Workout (6AM - 8AM)"
//!
//! [[section.task]]
//! time = "06:00 AM"
//! label = "Warm-up: 5 min dynamic stretches"
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::model::{Blueprint, Section, Task};

/// Errors raised while loading or validating a blueprint.
#[derive(Debug, thiserror::Error)]
pub enum BlueprintError {
    #[error("blueprint has no sections")]
    Empty,

    #[error("duplicate section id: {0}")]
    DuplicateSection(String),

    #[error("section '{0}' has no tasks")]
    EmptySection(String),

    #[error("failed to read blueprint: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid blueprint: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Loads and validates a blueprint from a TOML file.
pub fn load(path: &Path) -> Result<Blueprint, BlueprintError> {
    let contents = fs::read_to_string(path)?;
    parse(&contents)
}

/// Parses and validates a blueprint from TOML text.
pub fn parse(contents: &str) -> Result<Blueprint, BlueprintError> {
    let blueprint: Blueprint = toml::from_str(contents)?;
    blueprint.validate()?;
    Ok(blueprint)
}

impl Blueprint {
    /// Checks that the blueprint has sections, that their ids are unique,
    /// and that every section has at least one task.
    ///
    /// A day completes when all its tasks are checked, so a section with no
    /// tasks would leave a fresh day complete.
    pub fn validate(&self) -> Result<(), BlueprintError> {
        if self.sections.is_empty() {
            return Err(BlueprintError::Empty);
        }
        let mut seen = HashSet::new();
        for section in &self.sections {
            if !seen.insert(section.id.as_str()) {
                return Err(BlueprintError::DuplicateSection(section.id.clone()));
            }
            if section.tasks.is_empty() {
                return Err(BlueprintError::EmptySection(section.id.clone()));
            }
        }
        Ok(())
    }

    /// The built-in daily mission.
    pub fn mission() -> Self {
        Self {
            sections: vec![
                section(
                    "morning_workout",
                    "Morning Workout (6AM - 8AM)",
                    &[
                        ("06:00 AM", "Warm-up: 5 min dynamic stretches"),
                        ("06:10 AM", "Core Circuit: Plank 1 min, 50 V-ups, 50 leg raises"),
                        ("06:40 AM", "Endurance: 100 burpees"),
                        ("07:10 AM", "Push-ups: 500 push-ups in sets"),
                        ("07:40 AM", "Squats: 500 bodyweight squats"),
                        ("08:00 AM", "Cool Down & Freshen up / Breakfast (1.5h)"),
                    ],
                ),
                section(
                    "morning_productivity",
                    "Morning Productivity (9AM - 12PM)",
                    &[
                        ("09:00 AM", "Deep Work / Study / Coding"),
                        ("10:30 AM", "Mini Break 10 min"),
                        ("10:40 AM", "Continue Work / Learning"),
                        ("12:00 PM", "Lunch / Freshen up (1.5h)"),
                    ],
                ),
                section(
                    "afternoon_work",
                    "Afternoon Work / Projects (1:30PM - 5PM)",
                    &[
                        ("01:30 PM", "Project Work / AI / Stock Market Study"),
                        ("03:30 PM", "Mini Break 10 min"),
                        ("03:40 PM", "Continue Deep Work"),
                    ],
                ),
                section(
                    "evening_workout",
                    "Evening Workout (5PM - 7PM)",
                    &[
                        ("05:00 PM", "Pull-ups / Rows / Grip Strength"),
                        ("05:30 PM", "Mobility & Light Cardio"),
                        ("06:00 PM", "Core & Stretching"),
                        ("06:30 PM", "Cooldown & Freshen up / Dinner (1.5h)"),
                    ],
                ),
                section(
                    "night_creative",
                    "Creative / Influence / YouTube (8:00PM - 10:00PM)",
                    &[
                        ("08:00 PM", "Script / Record / Edit content"),
                        ("09:00 PM", "Plan Next Day / Engagement"),
                        ("10:00 PM", "Wind down / Light Reading"),
                    ],
                ),
                section(
                    "night_wind_down",
                    "Night / Journaling / Meditation (10:00PM - 10:30PM)",
                    &[
                        ("10:00 PM", "Meditation / Journaling / Visualization"),
                        ("10:15 PM", "Prepare for sleep"),
                    ],
                ),
            ],
        }
    }
}

fn section(id: &str, title: &str, tasks: &[(&str, &str)]) -> Section {
    Section {
        id: id.to_string(),
        title: title.to_string(),
        tasks: tasks
            .iter()
            .map(|(time, label)| Task::new(time, label))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn built_in_mission_is_valid() {
        let blueprint = Blueprint::mission();

        blueprint.validate().unwrap();
        assert_eq!(blueprint.sections.len(), 6);
        assert_eq!(blueprint.task_count(), 22);
        assert_eq!(blueprint.sections[0].id, "morning_workout");
    }

    #[test]
    fn parses_sections_and_tasks_in_order() {
        let blueprint = parse(
            r#"
            [[section]]
            id = "reading"
            title = "Reading"

            [[section.task]]
            time = "07:00 AM"
            label = "Ten pages"

            [[section.task]]
            label = "Notes"

            [[section]]
            id = "walk"
            title = "Walk"

            [[section.task]]
            label = "Around the block"
            "#,
        )
        .unwrap();

        assert_eq!(blueprint.sections.len(), 2);
        assert_eq!(blueprint.sections[0].tasks.len(), 2);
        assert_eq!(blueprint.sections[0].tasks[0].time.as_deref(), Some("07:00 AM"));
        assert_eq!(blueprint.sections[0].tasks[1].time, None);
        assert_eq!(blueprint.section("walk").unwrap().tasks[0].label, "Around the block");
    }

    #[test]
    fn duplicate_section_ids_are_rejected() {
        let err = parse(
            r#"
            [[section]]
            id = "same"
            title = "First"

            [[section.task]]
            label = "One"

            [[section]]
            id = "same"
            title = "Second"

            [[section.task]]
            label = "Two"
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, BlueprintError::DuplicateSection(id) if id == "same"));
    }

    #[test]
    fn empty_blueprint_is_rejected() {
        let err = parse("section = []").unwrap_err();

        assert!(matches!(err, BlueprintError::Empty));
    }

    #[test]
    fn section_without_tasks_is_rejected() {
        let err = parse("[[section]]\nid = \"a\"\ntitle = \"A\"\n").unwrap_err();

        assert!(matches!(err, BlueprintError::EmptySection(id) if id == "a"));
    }

    #[test]
    fn section_without_tasks_is_rejected_after_valid_ones() {
        let mut blueprint = Blueprint::mission();
        blueprint.sections[3].tasks.clear();

        let err = blueprint.validate().unwrap_err();

        assert!(matches!(err, BlueprintError::EmptySection(id) if id == "evening_workout"));
    }

    #[test]
    fn malformed_toml_is_rejected() {
        let err = parse("[[section]\nid = ").unwrap_err();

        assert!(matches!(err, BlueprintError::Toml(_)));
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blueprint.toml");
        fs::write(
            &path,
            "[[section]]\nid = \"x\"\ntitle = \"X\"\n\n[[section.task]]\nlabel = \"do it\"\n",
        )
        .unwrap();

        let blueprint = load(&path).unwrap();

        assert_eq!(blueprint.sections[0].id, "x");
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = load(&dir.path().join("nope.toml")).unwrap_err();

        assert!(matches!(err, BlueprintError::Io(_)));
    }
}
