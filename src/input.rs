//! Term and hall records.
//!
//! The records mirror the JSON input files; `into_*` conversions
//! validate them into the model before any scheduling runs.  Keys of
//! the faculty's legacy data files are accepted as aliases.

use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::model::{Exam, Hall, Term};
use crate::{InputError, SchedulerConfig};

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermRecord {
    #[serde(alias = "trajanje_u_danima")]
    pub duration_days: u32,
    #[serde(alias = "ispiti")]
    pub exams: Vec<ExamRecord>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamRecord {
    #[serde(alias = "sifra")]
    pub subject_id: String,
    #[serde(alias = "prijavljeni")]
    pub applicant_count: u32,
    #[serde(alias = "racunari")]
    pub needs_computers: bool,
    #[serde(alias = "odseci")]
    pub departments: Vec<String>,
    /// Overrides the digit read from `subject_id`.
    #[serde(default)]
    pub study_year: Option<u8>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HallRecord {
    #[serde(alias = "naziv")]
    pub name: String,
    #[serde(alias = "kapacitet")]
    pub capacity: u32,
    #[serde(alias = "racunari")]
    pub has_computers: bool,
    #[serde(alias = "dezurni")]
    pub proctor_count: u32,
    #[serde(alias = "etf")]
    pub belongs_to_faculty: bool,
}

impl TermRecord {
    pub fn into_term(self, config: &SchedulerConfig) -> Result<Term, InputError> {
        if self.duration_days == 0 {
            return Err(InputError::EmptyTerm);
        }

        let mut seen = HashSet::new();
        let mut exams = Vec::with_capacity(self.exams.len());
        for record in self.exams {
            let exam = record.into_exam(config.year_position)?;
            if !seen.insert(exam.clone()) {
                return Err(InputError::DuplicateExam {
                    subject: exam.subject().to_owned(),
                });
            }
            exams.push(exam);
        }

        Ok(Term::new(self.duration_days, exams))
    }
}

impl ExamRecord {
    /// `year_position` locates the study-year digit in the subject id.
    pub fn into_exam(self, year_position: usize) -> Result<Exam, InputError> {
        if self.applicant_count == 0 {
            return Err(InputError::NoApplicants {
                subject: self.subject_id,
            });
        }

        let study_year = match self.study_year {
            Some(year) => year,
            None => study_year_digit(&self.subject_id, year_position).ok_or_else(|| {
                InputError::StudyYear {
                    subject: self.subject_id.clone(),
                    position: year_position,
                }
            })?,
        };

        Ok(
            Exam::new(self.subject_id, self.applicant_count, study_year, self.departments)
                .with_computers(self.needs_computers),
        )
    }
}

impl HallRecord {
    pub fn into_hall(self) -> Result<Hall, InputError> {
        if self.capacity == 0 {
            return Err(InputError::NoCapacity { name: self.name });
        }

        Ok(Hall::new(self.name, self.capacity)
            .with_computers(self.has_computers)
            .with_proctors(self.proctor_count)
            .with_faculty(self.belongs_to_faculty))
    }
}

/// The decimal digit at character `position` of a subject id.
pub fn study_year_digit(subject: &str, position: usize) -> Option<u8> {
    subject
        .chars()
        .nth(position)
        .and_then(|c| c.to_digit(10))
        .and_then(|d| u8::try_from(d).ok())
}

/// Parse a term from JSON text.
pub fn parse_term(json: &str, config: &SchedulerConfig) -> Result<Term, InputError> {
    let record: TermRecord = from_json(json, "term")?;
    record.into_term(config)
}

/// Parse a hall inventory from JSON text, keeping input order.
pub fn parse_halls(json: &str) -> Result<Vec<Hall>, InputError> {
    let records: Vec<HallRecord> = from_json(json, "halls")?;
    halls_from_records(records)
}

pub fn load_term<P: AsRef<Path>>(path: P, config: &SchedulerConfig) -> Result<Term, InputError> {
    let path = path.as_ref();
    let record: TermRecord = from_json(&read(path)?, &path.display().to_string())?;
    let term = record.into_term(config)?;
    debug!(
        "loaded {} exams over {} days from {}",
        term.exams().len(),
        term.duration_days(),
        path.display()
    );
    Ok(term)
}

pub fn load_halls<P: AsRef<Path>>(path: P) -> Result<Vec<Hall>, InputError> {
    let path = path.as_ref();
    let records: Vec<HallRecord> = from_json(&read(path)?, &path.display().to_string())?;
    let halls = halls_from_records(records)?;
    debug!("loaded {} halls from {}", halls.len(), path.display());
    Ok(halls)
}

fn halls_from_records(records: Vec<HallRecord>) -> Result<Vec<Hall>, InputError> {
    let mut names = HashSet::new();
    let mut halls = Vec::with_capacity(records.len());
    for record in records {
        if !names.insert(record.name.clone()) {
            return Err(InputError::DuplicateHall { name: record.name });
        }
        halls.push(record.into_hall()?);
    }

    Ok(halls)
}

fn read(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn from_json<T: DeserializeOwned>(text: &str, origin: &str) -> Result<T, InputError> {
    serde_json::from_str(text).map_err(|source| InputError::Json {
        origin: origin.to_owned(),
        source,
    })
}
