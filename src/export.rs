//! Day/time/hall grid rendering.
//!
//! One block per day: a header row with the day label and the hall
//! names, then one row per start time (`HH:MM`) holding the subject of
//! the exam in each hall, or the idle marker.  A blank line follows
//! every block.

use chrono::NaiveTime;
use std::fs;
use std::io;
use std::path::Path;

use crate::model::{Hall, Term};
use crate::scheduler::Schedule;
use crate::{ExportError, SchedulerConfig};

const TIME_FORMAT: &str = "%H:%M";

#[derive(Clone, Debug, Eq, PartialEq)]
struct DayBlock {
    label: String,
    rows: Vec<(NaiveTime, Vec<String>)>,
}

/// A rendered schedule.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduleGrid {
    halls: Vec<String>,
    days: Vec<DayBlock>,
}

impl ScheduleGrid {
    /// Lay out `schedule`, with hall columns in inventory order.
    pub fn build(schedule: &Schedule, term: &Term, halls: &[Hall], config: &SchedulerConfig) -> Self {
        let days = term
            .days(config.term_start)
            .enumerate()
            .map(|(index, date)| DayBlock {
                label: format!("{}{}", config.day_label, index),
                rows: config
                    .start_times
                    .iter()
                    .map(|&time| {
                        let start = date.and_time(time);
                        let cells = halls
                            .iter()
                            .map(|hall| match schedule.exam_at(start, hall) {
                                Some(exam) => exam.subject().to_owned(),
                                None => config.idle_marker.clone(),
                            })
                            .collect();
                        (time, cells)
                    })
                    .collect(),
            })
            .collect();

        ScheduleGrid {
            halls: halls.iter().map(|h| h.name().to_owned()).collect(),
            days,
        }
    }

    pub fn halls(&self) -> &[String] {
        &self.halls
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn day_label(&self, day: usize) -> Option<&str> {
        self.days.get(day).map(|block| block.label.as_str())
    }

    /// The cell for `hall` at `time` on the `day`-th day.
    pub fn cell(&self, day: usize, time: NaiveTime, hall: &str) -> Option<&str> {
        let column = self.halls.iter().position(|h| h == hall)?;
        self.days
            .get(day)?
            .rows
            .iter()
            .find(|(t, _)| *t == time)
            .and_then(|(_, cells)| cells.get(column))
            .map(String::as_str)
    }

    pub fn write_csv<W: io::Write>(&self, mut out: W) -> Result<(), ExportError> {
        for block in self.days.iter() {
            let mut writer = csv::Writer::from_writer(&mut out);

            let mut header = Vec::with_capacity(self.halls.len() + 1);
            header.push(block.label.as_str());
            header.extend(self.halls.iter().map(String::as_str));
            writer.write_record(&header)?;

            for (time, cells) in block.rows.iter() {
                let time = time.format(TIME_FORMAT).to_string();
                writer.write_record(std::iter::once(&time).chain(cells.iter()))?;
            }

            writer.flush().map_err(csv::Error::from)?;
            drop(writer);
            out.write_all(b"\n").map_err(csv::Error::from)?;
        }

        Ok(())
    }

    /// The whole grid as CSV text.
    pub fn render(&self) -> Result<String, ExportError> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf).map_err(|e| ExportError::Grid {
            row: 0,
            message: e.to_string(),
        })
    }

    /// Write the grid to `path`.  The file is only touched once the
    /// whole grid has been rendered.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ExportError> {
        let path = path.as_ref();
        let text = self.render()?;
        fs::write(path, text).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read a grid written by [`ScheduleGrid::write_csv`].
    pub fn read_csv<R: io::Read>(input: R) -> Result<Self, ExportError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input);

        let mut halls: Option<Vec<String>> = None;
        let mut days: Vec<DayBlock> = Vec::new();

        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let first = record.get(0).unwrap_or_default();
            let rest: Vec<String> = record.iter().skip(1).map(str::to_owned).collect();

            match NaiveTime::parse_from_str(first, TIME_FORMAT) {
                Ok(time) => {
                    let columns = halls.as_ref().map_or(0, Vec::len);
                    let block = days.last_mut().ok_or_else(|| ExportError::Grid {
                        row,
                        message: "time row before any day header".to_owned(),
                    })?;
                    if rest.len() != columns {
                        return Err(ExportError::Grid {
                            row,
                            message: format!("expected {} cells, found {}", columns, rest.len()),
                        });
                    }
                    block.rows.push((time, rest));
                }
                Err(_) => {
                    if halls.is_none() {
                        halls = Some(rest);
                    } else if halls.as_ref() != Some(&rest) {
                        return Err(ExportError::Grid {
                            row,
                            message: "hall columns differ between days".to_owned(),
                        });
                    }
                    days.push(DayBlock {
                        label: first.to_owned(),
                        rows: Vec::new(),
                    });
                }
            }
        }

        Ok(ScheduleGrid {
            halls: halls.unwrap_or_default(),
            days,
        })
    }
}
