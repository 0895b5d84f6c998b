use std::path::PathBuf;

use thiserror::Error;

/// A contradiction found during the search.
#[derive(Debug, Error)]
pub enum Error {
    #[error("contradiction")]
    Contradiction,
}

/// Invalid scheduler parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("at least one daily start time is required")]
    NoStartTimes,

    #[error("start time {0} is listed more than once")]
    DuplicateStartTime(String),
}

/// Malformed term or hall records.
///
/// Raised while parsing, before any scheduling logic runs.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("term duration must be at least one day")]
    EmptyTerm,

    #[error("exam {subject}: applicant count must be positive")]
    NoApplicants { subject: String },

    #[error("exam {subject} is listed more than once")]
    DuplicateExam { subject: String },

    #[error("exam {subject}: no study-year digit at position {position}")]
    StudyYear { subject: String, position: usize },

    #[error("hall {name}: capacity must be positive")]
    NoCapacity { name: String },

    #[error("hall {name} is listed more than once")]
    DuplicateHall { name: String },
}

/// Failures while rendering or reading a schedule grid.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("grid row {row}: {message}")]
    Grid { row: usize, message: String },
}

/// The search returned an assignment the rules reject.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("solver produced an inconsistent schedule: {0}")]
    Inconsistent(#[from] crate::rules::Violation),
}
