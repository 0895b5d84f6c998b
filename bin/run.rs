//! Schedule one examination term.
//!
//! Reads a term file and a hall file, searches for a schedule and writes
//! the day/time/hall grid as CSV.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;
use log::{error, info};
use thiserror::Error;

use exam_scheduler::input::{load_halls, load_term};
use exam_scheduler::{
    logging, ConfigError, ExportError, InputError, Outcome, ScheduleError, ScheduleGrid,
    Scheduler, SchedulerConfig,
};

#[derive(Debug, Parser)]
#[command(author, version, about, arg_required_else_help = true)]
struct Args {
    /// The term: `{ "durationDays": .., "exams": [..] }`.
    term_path: PathBuf,

    /// The hall inventory: a JSON array of halls.
    halls_path: PathBuf,

    /// Where to write the schedule grid.  Defaults to the term file
    /// with a `.csv` extension.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with scheduler parameters (start date, start times,
    /// study-year position, idle marker, day label).
    #[arg(long)]
    config: Option<PathBuf>,

    /// First day of the term, overriding the config file.
    #[arg(long, value_name = "YYYY-MM-DD")]
    start_date: Option<NaiveDate>,

    /// Log debug messages.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

fn run(args: Args) -> Result<bool, RunError> {
    let mut config = match &args.config {
        Some(path) => SchedulerConfig::load(path)?,
        None => SchedulerConfig::default(),
    };
    if let Some(start) = args.start_date {
        config = config.with_term_start(start);
    }

    let term = load_term(&args.term_path, &config)?;
    let halls = load_halls(&args.halls_path)?;

    let scheduler = Scheduler::new(config);
    let schedule = match scheduler.solve(&term, &halls)? {
        Outcome::Solved(schedule) => schedule,
        Outcome::NoSolution => return Ok(false),
    };

    let output = args
        .output
        .unwrap_or_else(|| args.term_path.with_extension("csv"));
    ScheduleGrid::build(&schedule, &term, &halls, scheduler.config()).save(&output)?;
    info!("wrote {}", output.display());

    Ok(true)
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            error!("no solution exists for this input");
            ExitCode::from(2)
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
