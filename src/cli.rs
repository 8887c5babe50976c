//! CLI interface for the mission tracker.
//!
//! Each subcommand is non-interactive: it opens the saved state, performs at
//! most one transition, saves only if something changed, and prints the result. Running with no
//! subcommand shows today's checklist.

mod format;

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::calendar;
use crate::config::{Config, MAX_HORIZON};
use crate::model::{Blueprint, Day, DayId};
use crate::storage::Storage;
use crate::tracker::{Origin, Tracker};

use format::{format_blueprint, format_checklist, format_header, format_log, format_transition};

/// Mission — one checklist, every day, keep the streak.
#[derive(Debug, Parser)]
#[command(name = "mission", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Override the configured horizon length, in days.
    #[arg(long, global = true)]
    horizon: Option<u32>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

const WORKFLOW_HELP: &str = r"A day:
  1. mission                            → today's checklist, day number, streak
  2. mission toggle morning_workout 1   → check off the first morning task
  3. ...check every task: the day completes, the streak grows, tomorrow begins
  4. mission skip                       → give up on today and move on

History:
  mission log --tasks
  mission toggle afternoon_work 2 --day 3   (edits history, streak untouched)";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current day: day number, streak, date, and checklist.
    Status {
        /// Print the full saved state as JSON instead.
        #[arg(long)]
        json: bool,
    },

    /// Check or uncheck one task.
    ///
    /// Completing every task on the current day increments the streak and
    /// advances to the next day. Unchecking a task on a completed current
    /// day takes the streak back down. Edits to other days never touch the
    /// streak.
    Toggle {
        /// Section identifier (see `mission blueprint`).
        section: String,

        /// Task number within the section, starting at 1.
        task: usize,

        /// Day to edit. Defaults to the current day.
        #[arg(long)]
        day: Option<DayId>,
    },

    /// Mark the current day missed and advance. The streak is kept.
    Skip,

    /// List every day up to the current one with its outcome.
    Log {
        /// Include each day's task checklist.
        #[arg(long)]
        tasks: bool,
    },

    /// Print the blueprint: sections, identifiers, and tasks.
    Blueprint,
}

/// Everything a command needs, opened once per invocation.
struct Session {
    blueprint: Blueprint,
    days: Vec<Day>,
    /// `None` when nothing may be written: the storage root couldn't be
    /// created, or it holds a snapshot for another blueprint or horizon.
    storage: Option<Storage>,
    tracker: Tracker,
}

impl Session {
    /// Opens the saved state. Nothing is written until a mutation.
    fn open(config: &Config, horizon_override: Option<u32>) -> Result<Self, String> {
        let horizon = resolve_horizon(config, horizon_override)?;
        let blueprint = config.blueprint()?;
        let root = config.storage_root()?;
        let days = calendar::generate(config.start_date(), horizon);

        let storage = match Storage::new(&root) {
            Ok(storage) => Some(storage),
            Err(e) => {
                warn!(error = %e, path = %root.display(), "storage unavailable, state will not be saved");
                None
            }
        };
        let (tracker, storage) = match storage {
            Some(storage) => {
                let (tracker, origin) = Tracker::open(&storage, &blueprint, horizon);
                if let Origin::Unfit(e) = origin {
                    warn!(
                        error = %e,
                        path = %storage.slot_path().display(),
                        "saved state was written for another blueprint or horizon; \
                         leaving it untouched, changes will not be saved"
                    );
                    (tracker, None)
                } else {
                    (tracker, Some(storage))
                }
            }
            None => (Tracker::initialize(&blueprint, horizon), None),
        };

        Ok(Self {
            blueprint,
            days,
            storage,
            tracker,
        })
    }

    /// Best-effort write of the full state. Failure is logged and ignored.
    fn persist(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(e) = storage.save(&self.tracker.snapshot()) {
            warn!(error = %e, path = %storage.slot_path().display(), "failed to save state");
        }
    }

    fn print_current_day(&self) {
        let current = self.tracker.current_day_id();
        println!("{}", format_header(&self.tracker, &self.days));
        println!();
        if let Some(state) = self.tracker.day_state(current) {
            print!("{}", format_checklist(&self.blueprint, state));
        }
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run(config: &Config) -> Result<(), String> {
    let cli = Cli::parse();
    let mut session = Session::open(config, cli.horizon)?;

    match cli.command.unwrap_or(Command::Status { json: false }) {
        Command::Status { json } => cmd_status(&session, json),
        Command::Toggle { section, task, day } => cmd_toggle(&mut session, &section, task, day),
        Command::Skip => {
            cmd_skip(&mut session);
            Ok(())
        }
        Command::Log { tasks } => {
            print!("{}", format_log(&session.blueprint, &session.tracker, &session.days, tasks));
            Ok(())
        }
        Command::Blueprint => {
            print!("{}", format_blueprint(&session.blueprint));
            Ok(())
        }
    }
}

fn cmd_status(session: &Session, json: bool) -> Result<(), String> {
    if json {
        let json = serde_json::to_string_pretty(&session.tracker.snapshot())
            .map_err(|e| format!("failed to serialize state: {e}"))?;
        println!("{json}");
    } else {
        session.print_current_day();
    }
    Ok(())
}

fn cmd_toggle(
    session: &mut Session,
    section_id: &str,
    task_number: usize,
    day: Option<DayId>,
) -> Result<(), String> {
    let (task_index, label) = resolve_task(&session.blueprint, section_id, task_number)?;
    let day_id = resolve_day(day, session.tracker.current_day_id(), session.tracker.horizon())?;

    let transition = session
        .tracker
        .toggle_task(day_id, section_id, task_index)
        .map_err(|e| e.to_string())?;
    session.persist();

    println!("{}", format_transition(&transition, day_id, &label));
    Ok(())
}

fn cmd_skip(session: &mut Session) {
    let day_id = session.tracker.current_day_id();
    let transition = session.tracker.mark_missed_and_advance();
    session.persist();

    println!("{}", format_transition(&transition, day_id, ""));
}

/// The horizon for this run: `--horizon` if given, else the configured one.
fn resolve_horizon(config: &Config, horizon_override: Option<u32>) -> Result<u32, String> {
    let horizon = horizon_override.unwrap_or(config.horizon);
    if horizon == 0 || horizon > MAX_HORIZON {
        return Err(format!(
            "horizon must be between 1 and {MAX_HORIZON}, got {horizon}"
        ));
    }
    Ok(horizon)
}

/// Maps a section id and 1-based task number to a 0-based task index and
/// that task's label.
fn resolve_task(
    blueprint: &Blueprint,
    section_id: &str,
    task_number: usize,
) -> Result<(usize, String), String> {
    let section = blueprint.section(section_id).ok_or_else(|| {
        let known: Vec<&str> = blueprint.sections.iter().map(|s| s.id.as_str()).collect();
        format!(
            "unknown section '{section_id}' (expected one of: {})",
            known.join(", ")
        )
    })?;

    if task_number == 0 || task_number > section.tasks.len() {
        return Err(format!(
            "section '{section_id}' has tasks 1 to {}, got {task_number}",
            section.tasks.len()
        ));
    }
    let index = task_number - 1;
    Ok((index, section.tasks[index].label.clone()))
}

/// The day to edit: `--day` if given, else the current day.
fn resolve_day(day: Option<DayId>, current: DayId, horizon: u32) -> Result<DayId, String> {
    let day_id = day.unwrap_or(current);
    if day_id == 0 || day_id > horizon {
        return Err(format!("day must be between 1 and {horizon}, got {day_id}"));
    }
    Ok(day_id)
}
