//! The search state and rules.

use bit_set::BitSet;
use std::cell::Cell;
use std::collections::BTreeSet;
use std::fmt;
use std::mem;
use std::ops;
use std::ops::Range;
use std::rc::Rc;

use crate::Error;
use crate::{Constraint, PsResult, Solution, Val, VarToken};

/// The candidates of a variable, shared between search states until
/// one of them assigns it.
type Candidates = Rc<BTreeSet<Val>>;

/// The state of a variable during the solution search.
#[derive(Clone, Debug)]
enum VarState {
    Assigned(Val),
    Unassigned(Candidates),
}

/// The puzzle to be solved.
pub struct Puzzle {
    // The number of variables in the puzzle.
    num_vars: usize,

    // The number of guesses to solve the puzzle.
    num_guesses: Cell<u32>,

    // The list of candidates for each variable.
    candidates: Vec<Candidates>,

    // The list of puzzle constraints.
    constraints: Vec<Rc<dyn Constraint>>,
}

/// The puzzle constraints, and the variables that wake them up.
struct PuzzleConstraints {
    // The list of puzzle constraints.
    constraints: Vec<Rc<dyn Constraint>>,

    // The list of constraints that each variable affects.  These will
    // be woken up when the variable is assigned.
    wake: Vec<BitSet>,
}

/// Intermediate puzzle search state.
#[derive(Clone)]
pub struct PuzzleSearch<'a> {
    puzzle: &'a Puzzle,
    constraints: Rc<PuzzleConstraints>,
    vars: Vec<VarState>,

    // The list of constraints that need to be re-evaluated.
    wake: BitSet,
}

/*--------------------------------------------------------------*/

impl Puzzle {
    /// Allocate a new puzzle.
    ///
    /// # Examples
    ///
    /// ```
    /// exam_scheduler::Puzzle::new();
    /// ```
    pub fn new() -> Self {
        Puzzle {
            num_vars: 0,
            num_guesses: Cell::new(0),
            candidates: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Allocate a new puzzle variable whose candidates are `range`.
    pub fn new_var(&mut self, range: Range<Val>) -> VarToken {
        let var = VarToken(self.num_vars);
        self.num_vars += 1;
        self.candidates.push(Rc::new(range.collect()));
        var
    }

    /// Add a constraint to the puzzle solution.
    pub fn add_constraint<T>(&mut self, constraint: T)
    where
        T: Constraint + 'static,
    {
        self.constraints.push(Rc::new(constraint));
    }

    /// Find any solution to the given puzzle.
    ///
    /// Candidates are tried in ascending order, so the first solution
    /// found is the smallest in variable order.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut puzzle = exam_scheduler::Puzzle::new();
    /// let a = puzzle.new_var(1..3);
    /// let b = puzzle.new_var(3..5);
    ///
    /// let solution = puzzle.solve_any().expect("solution");
    /// assert_eq!((solution[a], solution[b]), (1, 3));
    /// ```
    pub fn solve_any(&mut self) -> Option<Solution> {
        let mut solutions = Vec::with_capacity(1);

        self.num_guesses.set(0);
        if self.num_vars > 0 {
            let mut search = PuzzleSearch::new(self);
            search.solve(1, &mut solutions);
        } else {
            solutions.push(Solution { vars: Vec::new() });
        }

        solutions.pop()
    }

    /// Get the number of guesses taken to solve the last puzzle.
    pub fn num_guesses(&self) -> u32 {
        self.num_guesses.get()
    }
}

impl Default for Puzzle {
    fn default() -> Self {
        Self::new()
    }
}

/*--------------------------------------------------------------*/

impl PuzzleConstraints {
    /// Allocate a new puzzle constraint container.
    fn new(puzzle: &Puzzle) -> Self {
        let wake = Self::init_wake(&puzzle.constraints, puzzle.num_vars);
        PuzzleConstraints {
            constraints: puzzle.constraints.clone(),
            wake,
        }
    }

    /// Determine which variables wake up which constraints.
    fn init_wake(constraints: &[Rc<dyn Constraint>], num_vars: usize) -> Vec<BitSet> {
        let mut wake = vec![BitSet::new(); num_vars];
        for (cidx, constraint) in constraints.iter().enumerate() {
            for &VarToken(idx) in constraint.vars() {
                wake[idx].insert(cidx);
            }
        }

        wake
    }
}

/*--------------------------------------------------------------*/

impl<'a> PuzzleSearch<'a> {
    /// Allocate a new puzzle searcher.
    fn new(puzzle: &'a Puzzle) -> Self {
        let constraints = PuzzleConstraints::new(puzzle);
        let vars = puzzle
            .candidates
            .iter()
            .map(|cs| VarState::Unassigned(Rc::clone(cs)))
            .collect();
        let mut wake = BitSet::new();

        for cidx in 0..constraints.constraints.len() {
            wake.insert(cidx);
        }

        PuzzleSearch {
            puzzle,
            constraints: Rc::new(constraints),
            vars,
            wake,
        }
    }

    /// Get the value assigned to a variable, or None.
    ///
    /// This should be used if the variable may potentially be
    /// unassigned.  For example, when implementing constraints.
    pub fn get_assigned(&self, var: VarToken) -> Option<Val> {
        let VarToken(idx) = var;
        match &self.vars[idx] {
            VarState::Assigned(val) => Some(*val),
            VarState::Unassigned(_) => None,
        }
    }

    /// Solve the puzzle, finding up to count solutions.
    fn solve(&mut self, count: usize, solutions: &mut Vec<Solution>) {
        if self.constrain().is_err() {
            return;
        }

        let next_unassigned = self
            .vars
            .iter()
            .enumerate()
            .min_by_key(|&(_, vs)| match vs {
                VarState::Unassigned(ref cs) => cs.len(),
                _ => usize::MAX,
            });

        if let Some((idx, &VarState::Unassigned(ref cs))) = next_unassigned {
            for &val in cs.iter() {
                let num_guesses = self.puzzle.num_guesses.get() + 1;
                self.puzzle.num_guesses.set(num_guesses);

                let mut new = self.clone();
                if new.assign(idx, val).is_err() {
                    continue;
                }

                new.solve(count, solutions);
                if solutions.len() >= count {
                    // Reached desired number of solutions.
                    return;
                }
            }
        } else {
            // No unassigned variables remaining.
            let vars = (0..self.puzzle.num_vars)
                .map(|idx| self[VarToken(idx)])
                .collect();
            solutions.push(Solution { vars });
        }
    }

    /// Assign a variable (given by index) to a value.
    fn assign(&mut self, idx: usize, val: Val) -> PsResult<()> {
        let var = VarToken(idx);
        self.vars[idx] = VarState::Assigned(val);
        self.wake.union_with(&self.constraints.wake[idx]);

        for cidx in 0..self.constraints.constraints.len() {
            if self.constraints.wake[idx].contains(cidx) {
                let constraint = self.constraints.constraints[cidx].clone();
                constraint.on_assigned(self, var, val)?;
            }
        }

        Ok(())
    }

    /// Take any obvious non-choices, using the constraints to
    /// eliminate candidates.  Stops when it must start guessing.
    fn constrain(&mut self) -> PsResult<()> {
        loop {
            // "Gimme" phase:
            // - abort if any variables with 0 candidates,
            // - assign variables with only 1 candidate.
            // - repeat until no more gimmes found.
            let cycle = self.vars.len();
            let mut idx = 0;
            let mut last_gimme = cycle - 1;
            loop {
                let gimme = match self.vars[idx] {
                    VarState::Assigned(_) => None,
                    VarState::Unassigned(ref cs) => match cs.len() {
                        0 => return Err(Error::Contradiction),
                        1 => cs.iter().next().copied(),
                        _ => None,
                    },
                };

                if let Some(val) = gimme {
                    self.assign(idx, val)?;
                    last_gimme = idx;
                } else if idx == last_gimme {
                    break;
                }

                idx = if idx + 1 >= cycle { 0 } else { idx + 1 };
            }

            // Apply constraints.
            if self.wake.is_empty() {
                return Ok(());
            }

            let wake = mem::replace(&mut self.wake, BitSet::new());
            for cidx in wake.iter() {
                let constraint = self.constraints.constraints[cidx].clone();
                constraint.on_updated(self)?;
            }
        }
    }
}

impl fmt::Debug for PuzzleSearch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "PuzzleSearch={{")?;
        for (idx, var) in self.vars.iter().enumerate() {
            writeln!(f)?;

            match var {
                VarState::Assigned(val) => {
                    write!(f, "  var {}: {}", idx, val)?;
                }
                VarState::Unassigned(ref cs) => {
                    write!(f, "  var {}:", idx)?;
                    for val in cs.iter() {
                        write!(f, " {}", val)?;
                    }
                }
            }
        }
        write!(f, "}}")?;
        Ok(())
    }
}

impl ops::Index<VarToken> for PuzzleSearch<'_> {
    type Output = Val;

    /// Get the value assigned to a variable.
    ///
    /// # Panics
    ///
    /// Panics if the variable has not been assigned.
    fn index(&self, var: VarToken) -> &Val {
        let VarToken(idx) = var;
        match self.vars[idx] {
            VarState::Assigned(ref val) => val,
            VarState::Unassigned(_) => panic!("unassigned"),
        }
    }
}
