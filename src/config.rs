//! Scheduler parameters.
//!
//! Nothing here is global: every run carries its own configuration into
//! the slot generator, the rules and the exporter.

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::ConfigError;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SchedulerConfig {
    /// First calendar day of the term.
    pub term_start: NaiveDate,

    /// The daily start times an exam may begin at.
    pub start_times: Vec<NaiveTime>,

    /// Character index of the study-year digit in a subject identifier,
    /// used when a record does not give the year explicitly.
    pub year_position: usize,

    /// Grid cell written for a hall with no exam.
    pub idle_marker: String,

    /// Prefix of the per-day header cell.
    pub day_label: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            term_start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or(NaiveDate::MIN),
            start_times: default_start_times(),
            year_position: 5,
            idle_marker: "X".to_owned(),
            day_label: "Day".to_owned(),
        }
    }
}

fn default_start_times() -> Vec<NaiveTime> {
    [(8, 0), (11, 30), (15, 0), (18, 30)]
        .iter()
        .filter_map(|&(h, m)| NaiveTime::from_hms_opt(h, m, 0))
        .collect()
}

impl SchedulerConfig {
    /// Read a JSON config file.  Missing keys keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SchedulerConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()
    }

    /// Check the start times, and sort them.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        if self.start_times.is_empty() {
            return Err(ConfigError::NoStartTimes);
        }

        self.start_times.sort();
        for pair in self.start_times.windows(2) {
            if pair[0] == pair[1] {
                return Err(ConfigError::DuplicateStartTime(
                    pair[0].format("%H:%M").to_string(),
                ));
            }
        }

        Ok(self)
    }

    pub fn with_term_start(mut self, term_start: NaiveDate) -> Self {
        self.term_start = term_start;
        self
    }
}
