//! The full persisted record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{DayId, DayState, Progress};

/// Everything written to and read from the storage slot.
///
/// Serialized flat: `{ "daysState": {...}, "currentDayId": n, "streak": n }`.
/// JSON object keys for days are the decimal day identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub days_state: BTreeMap<DayId, DayState>,

    #[serde(flatten)]
    pub progress: Progress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_the_stored_layout() {
        let raw = r#"{
            "daysState": {
                "1": { "sections": { "s": [true, false] }, "completed": false }
            },
            "currentDayId": 1,
            "streak": 4
        }"#;

        let snapshot: Snapshot = serde_json::from_str(raw).unwrap();

        assert_eq!(snapshot.progress.current_day_id, 1);
        assert_eq!(snapshot.progress.streak, 4);
        assert!(snapshot.days_state[&1].is_checked("s", 0));
        assert!(!snapshot.days_state[&1].is_checked("s", 1));
    }

    #[test]
    fn missing_streak_reads_as_zero() {
        let raw = r#"{ "daysState": {}, "currentDayId": 3 }"#;

        let snapshot: Snapshot = serde_json::from_str(raw).unwrap();

        assert_eq!(snapshot.progress.current_day_id, 3);
        assert_eq!(snapshot.progress.streak, 0);
    }

    #[test]
    fn missing_current_day_is_rejected() {
        let raw = r#"{ "daysState": {}, "streak": 1 }"#;

        assert!(serde_json::from_str::<Snapshot>(raw).is_err());
    }

    #[test]
    fn writes_flat_camel_case_fields() {
        let snapshot = Snapshot {
            days_state: BTreeMap::new(),
            progress: Progress {
                current_day_id: 2,
                streak: 1,
            },
        };

        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["currentDayId"], 2);
        assert_eq!(json["streak"], 1);
        assert!(json["daysState"].is_object());
    }
}
