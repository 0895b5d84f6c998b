//! The scheduling pipeline: candidate domain, search, verification.

use chrono::NaiveDateTime;
use log::{info, warn};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::csp;
use crate::model::{Assignment, Exam, Hall, ScheduleSlot, Term};
use crate::rules::ScheduleRules;
use crate::slots::{domain_size, generate_slots};
use crate::{ScheduleError, SchedulerConfig};

/// The result of a scheduling run.
#[derive(Clone, Debug)]
pub enum Outcome {
    Solved(Schedule),
    /// No assignment of every exam satisfies the rules.
    NoSolution,
}

impl Outcome {
    pub fn schedule(self) -> Option<Schedule> {
        match self {
            Outcome::Solved(schedule) => Some(schedule),
            Outcome::NoSolution => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved(_))
    }
}

/// A complete assignment that satisfies every rule.
///
/// Exams are kept in term order.
#[derive(Clone, Debug, PartialEq)]
pub struct Schedule {
    entries: Vec<(Exam, ScheduleSlot)>,
}

impl Schedule {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Exam, &ScheduleSlot)> + '_ {
        self.entries.iter().map(|(exam, slot)| (exam, slot))
    }

    pub fn slot(&self, exam: &Exam) -> Option<&ScheduleSlot> {
        self.iter().find(|(e, _)| *e == exam).map(|(_, slot)| slot)
    }

    /// Every exam that starts at `start`, with its slot.
    pub fn exams_at(&self, start: NaiveDateTime) -> impl Iterator<Item = (&Exam, &ScheduleSlot)> + '_ {
        self.iter().filter(move |(_, slot)| slot.start() == start)
    }

    /// The exam held in `hall` at `start`, if any.
    pub fn exam_at(&self, start: NaiveDateTime, hall: &Hall) -> Option<&Exam> {
        self.exams_at(start)
            .find(|(_, slot)| slot.contains(hall))
            .map(|(exam, _)| exam)
    }

    pub fn to_assignment(&self) -> Assignment {
        self.entries.iter().cloned().collect()
    }
}

/// Runs the search for one term and hall inventory.
#[derive(Clone, Debug)]
pub struct Scheduler {
    config: SchedulerConfig,
    rules: ScheduleRules,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        let rules = ScheduleRules::from_config(&config);
        Scheduler { config, rules }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn rules(&self) -> &ScheduleRules {
        &self.rules
    }

    /// Find any schedule for `term` in `halls`.
    ///
    /// Infeasibility is reported as [`Outcome::NoSolution`]; an error
    /// means the search returned something the rules reject.
    pub fn solve(&self, term: &Term, halls: &[Hall]) -> Result<Outcome, ScheduleError> {
        let slots: Vec<Rc<ScheduleSlot>> = generate_slots(&self.config, term.duration_days(), halls)
            .into_iter()
            .map(Rc::new)
            .collect();

        let mut seen = HashSet::new();
        let exams: Vec<Exam> = term
            .exams()
            .iter()
            .filter(|exam| seen.insert(*exam))
            .cloned()
            .collect();

        info!(
            "scheduling {} exams over {} days in {} halls ({} candidate slots each)",
            exams.len(),
            term.duration_days(),
            halls.len(),
            domain_size(term.duration_days(), self.config.start_times.len(), halls.len())
                .map_or_else(|| "overflowing".to_owned(), |n| n.to_string())
        );

        let domains: HashMap<Exam, Vec<Rc<ScheduleSlot>>> = exams
            .iter()
            .map(|exam| (exam.clone(), slots.clone()))
            .collect();

        let rules = self.rules.clone();
        let found = csp::solve(&exams, &domains, move |bound: &[(&Exam, &Rc<ScheduleSlot>)]| {
            rules.check(bound.iter().map(|&(exam, slot)| (exam, &**slot))).is_ok()
        });

        let found = match found {
            Some(found) => found,
            None => {
                warn!("no schedule satisfies every rule");
                return Ok(Outcome::NoSolution);
            }
        };

        self.rules
            .check(found.iter().map(|(exam, slot)| (exam, &**slot)))?;

        let entries = exams
            .into_iter()
            .filter_map(|exam| {
                let slot = ScheduleSlot::clone(found.get(&exam)?);
                Some((exam, slot))
            })
            .collect();

        info!("found a schedule");
        Ok(Outcome::Solved(Schedule { entries }))
    }
}
