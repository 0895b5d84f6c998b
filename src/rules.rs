//! The hard scheduling rules.
//!
//! [`ScheduleRules`] decides whether a partial or complete binding of
//! exams to slots can still be part of a valid schedule:
//!
//! 1. the halls of a slot seat every applicant,
//! 2. the slot starts at one of the daily start times,
//! 3. a hall hosts at most one exam per start time,
//! 4. computer exams only use computer-equipped halls,
//! 5. per day, at most one exam for each (department, study year).
//!
//! The check is pure and re-examines the whole binding on every call.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use thiserror::Error;

use crate::model::{Assignment, Exam, ScheduleSlot};
use crate::SchedulerConfig;

/// A broken scheduling rule.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Violation {
    #[error("exam {subject}: {enrollment} applicants exceed {capacity} seats")]
    Capacity {
        subject: String,
        enrollment: u32,
        capacity: u64,
    },

    #[error("exam {subject}: {time} is not a start time")]
    StartTime { subject: String, time: NaiveTime },

    #[error("exams {first} and {second} both use hall {hall} at {start}")]
    DoubleBooked {
        first: String,
        second: String,
        hall: String,
        start: NaiveDateTime,
    },

    #[error("exam {subject} needs computers, hall {hall} has none")]
    Equipment { subject: String, hall: String },

    #[error("exams {first} and {second} are both year {year} of {department} on {day}")]
    DepartmentYear {
        first: String,
        second: String,
        department: String,
        year: u8,
        day: NaiveDate,
    },
}

/// The scheduling constraint evaluator.
#[derive(Clone, Debug)]
pub struct ScheduleRules {
    start_times: Vec<NaiveTime>,
}

impl ScheduleRules {
    pub fn new<I: IntoIterator<Item = NaiveTime>>(start_times: I) -> Self {
        ScheduleRules {
            start_times: start_times.into_iter().collect(),
        }
    }

    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::new(config.start_times.iter().copied())
    }

    /// True if no rule is broken.
    pub fn is_consistent(&self, assignment: &Assignment) -> bool {
        self.check(assignment).is_ok()
    }

    /// Check a binding, reporting the first broken rule found.
    ///
    /// Whether an error is returned does not depend on iteration
    /// order, but which violation is reported may.
    pub fn check<'a, I>(&self, assignment: I) -> Result<(), Violation>
    where
        I: IntoIterator<Item = (&'a Exam, &'a ScheduleSlot)>,
    {
        match self.scan(assignment, true).pop() {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }

    /// Every broken rule of a binding.
    pub fn violations<'a, I>(&self, assignment: I) -> Vec<Violation>
    where
        I: IntoIterator<Item = (&'a Exam, &'a ScheduleSlot)>,
    {
        self.scan(assignment, false)
    }

    fn scan<'a, I>(&self, assignment: I, first_only: bool) -> Vec<Violation>
    where
        I: IntoIterator<Item = (&'a Exam, &'a ScheduleSlot)>,
    {
        let mut found = Vec::new();

        // Rebuilt on every call.
        let mut occupied: HashMap<(NaiveDateTime, &str), &Exam> = HashMap::new();
        let mut dept_years: HashMap<(NaiveDate, &str, u8), &Exam> = HashMap::new();

        for (exam, slot) in assignment {
            let capacity = slot.total_capacity();
            if u64::from(exam.expected_enrollment()) > capacity {
                found.push(Violation::Capacity {
                    subject: exam.subject().to_owned(),
                    enrollment: exam.expected_enrollment(),
                    capacity,
                });
            }

            if !self.start_times.contains(&slot.time()) {
                found.push(Violation::StartTime {
                    subject: exam.subject().to_owned(),
                    time: slot.time(),
                });
            }

            if exam.requires_computers() {
                if let Some(hall) = slot.halls().iter().find(|h| !h.has_computers()) {
                    found.push(Violation::Equipment {
                        subject: exam.subject().to_owned(),
                        hall: hall.name().to_owned(),
                    });
                }
            }

            for hall in slot.halls().iter() {
                match occupied.entry((slot.start(), hall.name())) {
                    Entry::Vacant(e) => {
                        e.insert(exam);
                    }
                    Entry::Occupied(e) if *e.get() != exam => {
                        found.push(Violation::DoubleBooked {
                            first: e.get().subject().to_owned(),
                            second: exam.subject().to_owned(),
                            hall: hall.name().to_owned(),
                            start: slot.start(),
                        });
                    }
                    Entry::Occupied(_) => (),
                }
            }

            for department in exam.departments() {
                match dept_years.entry((slot.day(), department, exam.study_year())) {
                    Entry::Vacant(e) => {
                        e.insert(exam);
                    }
                    Entry::Occupied(e) if *e.get() != exam => {
                        found.push(Violation::DepartmentYear {
                            first: e.get().subject().to_owned(),
                            second: exam.subject().to_owned(),
                            department: department.to_owned(),
                            year: exam.study_year(),
                            day: slot.day(),
                        });
                    }
                    Entry::Occupied(_) => (),
                }
            }

            if first_only && !found.is_empty() {
                found.truncate(1);
                break;
            }
        }

        found
    }
}
