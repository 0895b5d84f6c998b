//! The scheduling universe: exams, halls, terms and candidate slots.
//!
//! All types are immutable values with structural equality, so they
//! can be used as map keys and set members.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// One examination to be scheduled.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Exam {
    subject: String,
    expected_enrollment: u32,
    requires_computers: bool,
    departments: BTreeSet<String>,
    study_year: u8,
}

impl Exam {
    pub fn new<S, I, D>(subject: S, expected_enrollment: u32, study_year: u8, departments: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = D>,
        D: Into<String>,
    {
        Exam {
            subject: subject.into(),
            expected_enrollment,
            requires_computers: false,
            departments: departments.into_iter().map(Into::into).collect(),
            study_year,
        }
    }

    /// Mark the exam as one that must be held in computer-equipped halls.
    pub fn with_computers(mut self, requires_computers: bool) -> Self {
        self.requires_computers = requires_computers;
        self
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn expected_enrollment(&self) -> u32 {
        self.expected_enrollment
    }

    pub fn requires_computers(&self) -> bool {
        self.requires_computers
    }

    /// The departments offering this subject.
    pub fn departments(&self) -> impl Iterator<Item = &str> + '_ {
        self.departments.iter().map(String::as_str)
    }

    pub fn study_year(&self) -> u8 {
        self.study_year
    }
}

impl fmt::Display for Exam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.subject)
    }
}

/// A physical room usable for examinations.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Hall {
    name: String,
    capacity: u32,
    has_computers: bool,
    proctor_count: u32,
    belongs_to_faculty: bool,
}

impl Hall {
    pub fn new<S: Into<String>>(name: S, capacity: u32) -> Self {
        Hall {
            name: name.into(),
            capacity,
            has_computers: false,
            proctor_count: 0,
            belongs_to_faculty: false,
        }
    }

    pub fn with_computers(mut self, has_computers: bool) -> Self {
        self.has_computers = has_computers;
        self
    }

    pub fn with_proctors(mut self, proctor_count: u32) -> Self {
        self.proctor_count = proctor_count;
        self
    }

    pub fn with_faculty(mut self, belongs_to_faculty: bool) -> Self {
        self.belongs_to_faculty = belongs_to_faculty;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn has_computers(&self) -> bool {
        self.has_computers
    }

    /// Informational only, no rule reads it.
    pub fn proctor_count(&self) -> u32 {
        self.proctor_count
    }

    /// Informational only, no rule reads it.
    pub fn belongs_to_faculty(&self) -> bool {
        self.belongs_to_faculty
    }
}

impl fmt::Display for Hall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The scheduling period.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Term {
    duration_days: u32,
    exams: Vec<Exam>,
}

impl Term {
    pub fn new(duration_days: u32, exams: Vec<Exam>) -> Self {
        Term {
            duration_days,
            exams,
        }
    }

    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }

    pub fn exams(&self) -> &[Exam] {
        &self.exams
    }

    /// The calendar dates of the term, starting at `first_day`.
    pub fn days(&self, first_day: NaiveDate) -> impl Iterator<Item = NaiveDate> {
        first_day.iter_days().take(self.duration_days as usize)
    }
}

/// One candidate (time, rooms) binding for an exam.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ScheduleSlot {
    start: NaiveDateTime,
    halls: BTreeSet<Hall>,
}

impl ScheduleSlot {
    /// Build a slot, or `None` if no halls are given.
    pub fn new<I>(start: NaiveDateTime, halls: I) -> Option<Self>
    where
        I: IntoIterator<Item = Hall>,
    {
        let halls: BTreeSet<Hall> = halls.into_iter().collect();
        if halls.is_empty() {
            return None;
        }

        Some(ScheduleSlot { start, halls })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// The calendar day of the start.
    pub fn day(&self) -> NaiveDate {
        self.start.date()
    }

    /// The time-of-day of the start.
    pub fn time(&self) -> NaiveTime {
        self.start.time()
    }

    pub fn halls(&self) -> &BTreeSet<Hall> {
        &self.halls
    }

    pub fn contains(&self, hall: &Hall) -> bool {
        self.halls.contains(hall)
    }

    /// Combined seating of every hall in the slot.
    pub fn total_capacity(&self) -> u64 {
        self.halls.iter().map(|h| u64::from(h.capacity)).sum()
    }

    pub fn all_halls_have_computers(&self) -> bool {
        self.halls.iter().all(Hall::has_computers)
    }

    /// True if both slots start together and use a common hall.
    pub fn shares_hall_with(&self, other: &ScheduleSlot) -> bool {
        self.start == other.start && !self.halls.is_disjoint(&other.halls)
    }
}

impl fmt::Display for ScheduleSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.start.format("%Y-%m-%d %H:%M"))?;
        for (i, hall) in self.halls.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", hall)?;
        }
        write!(f, "]")
    }
}

/// A (partial or complete) binding of exams to slots.
pub type Assignment = HashMap<Exam, ScheduleSlot>;
