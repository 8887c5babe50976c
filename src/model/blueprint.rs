//! Blueprint types: the checklist repeated identically every day.

use serde::{Deserialize, Serialize};

/// The ordered set of sections making up one day's mission.
///
/// Read-only once loaded. Section identifiers are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
    #[serde(rename = "section")]
    pub sections: Vec<Section>,
}

/// A titled group of tasks, keyed by a stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(rename = "task", default)]
    pub tasks: Vec<Task>,
}

/// A single checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Nominal time of day, free-form (e.g. `06:00 AM`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub label: String,
}

impl Blueprint {
    /// Looks up a section by identifier.
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Total number of tasks across every section.
    pub fn task_count(&self) -> usize {
        self.sections.iter().map(|s| s.tasks.len()).sum()
    }
}

impl Task {
    pub fn new(time: &str, label: &str) -> Self {
        Self {
            time: Some(time.to_string()),
            label: label.to_string(),
        }
    }
}
