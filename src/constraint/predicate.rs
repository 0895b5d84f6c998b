//! Opaque consistency predicate.

use std::fmt;

use crate::{Constraint, Error, PsResult, PuzzleSearch, Val, VarToken};

/// A constraint defined by a closure over the assigned variables.
///
/// The closure receives one `(position, value)` pair per assigned
/// variable, where `position` is the variable's index in the list
/// given to [`Predicate::new`].  It is re-run over the whole partial
/// assignment every time one of the variables is assigned.
pub struct Predicate<F> {
    vars: Vec<VarToken>,
    check: F,
}

impl<F> Predicate<F>
where
    F: Fn(&[(usize, Val)]) -> bool,
{
    pub fn new<'a, I>(vars: I, check: F) -> Self
    where
        I: IntoIterator<Item = &'a VarToken>,
    {
        Predicate {
            vars: vars.into_iter().copied().collect(),
            check,
        }
    }

    fn holds(&self, search: &PuzzleSearch) -> bool {
        let bound: Vec<(usize, Val)> = self
            .vars
            .iter()
            .enumerate()
            .filter_map(|(pos, &var)| search.get_assigned(var).map(|val| (pos, val)))
            .collect();

        (self.check)(&bound)
    }
}

impl<F> Constraint for Predicate<F>
where
    F: Fn(&[(usize, Val)]) -> bool,
{
    fn vars<'a>(&'a self) -> Box<dyn Iterator<Item = &'a VarToken> + 'a> {
        Box::new(self.vars.iter())
    }

    fn on_assigned(&self, search: &mut PuzzleSearch, _var: VarToken, _val: Val) -> PsResult<()> {
        if self.holds(search) {
            Ok(())
        } else {
            Err(Error::Contradiction)
        }
    }
}

impl<F> fmt::Debug for Predicate<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Predicate").field("vars", &self.vars).finish()
    }
}
