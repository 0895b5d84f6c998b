//! This crate assigns examinations to time slots and halls.
//! The scheduling rules are expressed as constraints, and a
//! backtracking search looks for any assignment that satisfies them.

pub mod config;
pub mod constraint;
pub mod csp;
pub mod export;
pub mod input;
pub mod logging;
pub mod model;
pub mod rules;
pub mod scheduler;
pub mod slots;

mod error;
mod puzzle;

use std::ops;

pub use config::SchedulerConfig;
pub use constraint::Constraint;
pub use error::{ConfigError, Error, ExportError, InputError, ScheduleError};
pub use export::ScheduleGrid;
pub use model::{Assignment, Exam, Hall, ScheduleSlot, Term};
pub use puzzle::Puzzle;
pub use puzzle::PuzzleSearch;
pub use rules::{ScheduleRules, Violation};
pub use scheduler::{Outcome, Schedule, Scheduler};

/// A puzzle variable token.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct VarToken(usize);

/// The type of a puzzle variable's value (i.e. the candidate type).
pub type Val = i32;

/// A result during a puzzle solution search (Err = contradiction).
pub type PsResult<T> = Result<T, Error>;

/// A dictionary mapping puzzle variables to the solution value.
#[derive(Debug)]
pub struct Solution {
    vars: Vec<Val>,
}

impl ops::Index<VarToken> for Solution {
    type Output = Val;
    fn index(&self, var: VarToken) -> &Val {
        let VarToken(idx) = var;
        &self.vars[idx]
    }
}
