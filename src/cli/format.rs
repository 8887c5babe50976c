//! Output formatting for CLI display.

use std::fmt::Write;

use crate::calendar;
use crate::model::{Blueprint, Day, DayId, DayState};
use crate::tracker::{Tracker, Transition};

/// `Day 3 | Streak: 2 | Tue Oct 20 2026`
pub(super) fn format_header(tracker: &Tracker, days: &[Day]) -> String {
    let current = tracker.current_day_id();
    let mut header = format!("Day {current} | Streak: {}", tracker.streak());
    if let Some(day) = calendar::day(days, current) {
        let _ = write!(header, " | {}", calendar::display_date(day.date));
    }
    header
}

/// The blueprint rendered against one day's checkboxes.
pub(super) fn format_checklist(blueprint: &Blueprint, state: &DayState) -> String {
    let mut out = String::new();
    for section in &blueprint.sections {
        let _ = writeln!(out, "{}  [{}]", section.title, section.id);
        for (index, task) in section.tasks.iter().enumerate() {
            let mark = if state.is_checked(&section.id, index) {
                "[x]"
            } else {
                "[ ]"
            };
            let time = task.time.as_deref().unwrap_or("");
            let _ = writeln!(out, "  {:>2}. {time:<8}  {mark} {}", index + 1, task.label);
        }
        out.push('\n');
    }
    out
}

/// Every day through the current one, with its outcome.
pub(super) fn format_log(
    blueprint: &Blueprint,
    tracker: &Tracker,
    days: &[Day],
    with_tasks: bool,
) -> String {
    let mut out = String::new();
    for id in tracker.past_days() {
        let Some(state) = tracker.day_state(id) else {
            continue;
        };
        let date = calendar::day(days, id)
            .map(|d| calendar::display_date(d.date))
            .unwrap_or_default();
        let status = if state.completed() {
            "Completed"
        } else {
            "Incomplete/Missed"
        };
        let _ = writeln!(out, "Day {id:>3}  {date:<15}  {status}");
        if with_tasks {
            for line in format_checklist(blueprint, state).lines() {
                if line.is_empty() {
                    continue;
                }
                let _ = writeln!(out, "    {line}");
            }
            out.push('\n');
        }
    }
    out
}

/// Sections with their identifiers and numbered tasks.
pub(super) fn format_blueprint(blueprint: &Blueprint) -> String {
    let mut out = format!(
        "{} sections, {} tasks a day\n\n",
        blueprint.sections.len(),
        blueprint.task_count()
    );
    for section in &blueprint.sections {
        let _ = writeln!(out, "{}  ({} tasks)", section.id, section.tasks.len());
        let _ = writeln!(out, "  {}", section.title);
        for (index, task) in section.tasks.iter().enumerate() {
            match &task.time {
                Some(time) => {
                    let _ = writeln!(out, "  {:>2}. {time}  {}", index + 1, task.label);
                }
                None => {
                    let _ = writeln!(out, "  {:>2}. {}", index + 1, task.label);
                }
            }
        }
    }
    out
}

/// One line describing what a transition did.
pub(super) fn format_transition(transition: &Transition, day: DayId, label: &str) -> String {
    match *transition {
        Transition::Completed {
            streak,
            advanced_to,
        } => {
            if advanced_to == day {
                format!("Day {day} complete. Streak: {streak}. That was the final day.")
            } else {
                format!("Day {day} complete. Streak: {streak}. Now on day {advanced_to}.")
            }
        }
        Transition::Reopened { streak } => {
            format!("Unchecked {label}. Day {day} reopened. Streak: {streak}.")
        }
        Transition::Toggled { checked } => {
            let mark = if checked { "[x]" } else { "[ ]" };
            format!("{mark} {label}")
        }
        Transition::HistoryEdited { day, completed } => {
            let status = if completed {
                "completed"
            } else {
                "incomplete"
            };
            format!("Edited day {day}: now {status}. Streak unchanged.")
        }
        Transition::Skipped { from, to } => {
            if from == to {
                format!("Day {from} marked missed. That was the final day.")
            } else {
                format!("Day {from} marked missed. Now on day {to}.")
            }
        }
    }
}
