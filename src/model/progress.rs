//! Progress: where the streak machine currently stands.

use serde::{Deserialize, Serialize};

use super::DayId;

/// The current-day pointer and the streak earned so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Day being worked on. Never decreases, never exceeds the horizon.
    pub current_day_id: DayId,

    /// Consecutive completed days. Older records may omit it.
    #[serde(default)]
    pub streak: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            current_day_id: 1,
            streak: 0,
        }
    }
}
