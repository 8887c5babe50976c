mod blueprint;
mod calendar;
mod cli;
mod config;
mod model;
mod storage;
mod tracker;

use std::process;

use tracing_subscriber::EnvFilter;

use config::Config;

/// Environment variable holding the log filter (e.g. `mission=debug`).
const LOG_ENV: &str = "MISSION_LOG";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(&config) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
