//! Constraint trait, and the constraints shipped with the search.

use crate::{PsResult, PuzzleSearch, Val, VarToken};

pub use self::predicate::Predicate;

/// Constraint trait.
pub trait Constraint {
    /// An iterator over the variables that are involved in the constraint.
    fn vars<'a>(&'a self) -> Box<dyn Iterator<Item = &'a VarToken> + 'a>;

    /// Applied after a variable has been assigned.
    fn on_assigned(&self, _search: &mut PuzzleSearch, _var: VarToken, _val: Val) -> PsResult<()> {
        Ok(())
    }

    /// Applied after a variable's candidates have been modified.
    fn on_updated(&self, _search: &mut PuzzleSearch) -> PsResult<()> {
        Ok(())
    }
}

mod predicate;
