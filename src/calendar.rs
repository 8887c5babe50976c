//! Day calendar: the fixed horizon of days the mission runs over.

use jiff::ToSpan;
use jiff::civil::Date;

use crate::model::{Day, DayId};

/// Default horizon length, in days.
pub const DEFAULT_HORIZON: u32 = 180;

/// Generates `horizon` contiguous days, day `n` falling `n` days after `start`.
///
/// Pure: the same `start` and `horizon` always yield the same days.
pub fn generate(start: Date, horizon: u32) -> Vec<Day> {
    (1..=horizon)
        .map(|id| Day {
            id,
            date: start.saturating_add(i64::from(id).days()),
        })
        .collect()
}

/// The local civil date right now.
pub fn today() -> Date {
    jiff::Zoned::now().date()
}

/// Finds a day by identifier.
pub fn day(days: &[Day], id: DayId) -> Option<&Day> {
    let index = usize::try_from(id.checked_sub(1)?).ok()?;
    days.get(index).filter(|d| d.id == id)
}

/// Formats a date like `Tue Oct 20 2026`.
pub fn display_date(date: Date) -> String {
    date.strftime("%a %b %d %Y").to_string()
}
