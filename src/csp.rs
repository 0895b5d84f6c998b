//! Generic constraint satisfaction over arbitrary variables and values.

use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

use log::debug;

use crate::constraint::Predicate;
use crate::{Puzzle, Val};

/// Find any assignment of every variable to a value of its domain for
/// which `is_consistent` holds.
///
/// `is_consistent` receives the partial assignment built so far, as
/// `(variable, value)` pairs, after every tentative binding; it must
/// reject any binding that cannot be extended to a solution.  Returns
/// `None` when no complete assignment satisfies it, or when a domain
/// has more values than the search can index.  A variable missing from
/// `domains` has an empty domain.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use exam_scheduler::csp::solve;
///
/// let vars = ["a", "b"];
/// let domains: HashMap<_, _> = vars.iter().map(|&v| (v, vec![1, 2])).collect();
/// let solution = solve(&vars, &domains, |bound: &[(&&str, &i32)]| {
///     bound.len() < 2 || bound.iter().map(|&(_, &x)| x).sum::<i32>() == 3
/// })
/// .expect("solution");
/// assert_eq!(solution["a"] + solution["b"], 3);
/// ```
pub fn solve<V, D, F>(variables: &[V], domains: &HashMap<V, Vec<D>>, is_consistent: F) -> Option<HashMap<V, D>>
where
    V: Clone + Eq + Hash + 'static,
    D: Clone + 'static,
    F: Fn(&[(&V, &D)]) -> bool + 'static,
{
    let variables: Rc<Vec<V>> = Rc::new(variables.to_vec());
    let values: Rc<Vec<Vec<D>>> = Rc::new(
        variables
            .iter()
            .map(|var| domains.get(var).cloned().unwrap_or_default())
            .collect(),
    );

    let mut puzzle = Puzzle::new();
    let mut tokens = Vec::with_capacity(values.len());
    for domain in values.iter() {
        let size = Val::try_from(domain.len()).ok()?;
        tokens.push(puzzle.new_var(0..size));
    }

    {
        let variables = Rc::clone(&variables);
        let values = Rc::clone(&values);
        puzzle.add_constraint(Predicate::new(&tokens, move |bound: &[(usize, Val)]| {
            let pairs: Vec<(&V, &D)> = bound
                .iter()
                .map(|&(pos, val)| (&variables[pos], &values[pos][val as usize]))
                .collect();
            is_consistent(&pairs)
        }));
    }

    let solution = puzzle.solve_any();
    debug!("search made {} guesses", puzzle.num_guesses());

    let solution = solution?;
    Some(
        tokens
            .iter()
            .enumerate()
            .map(|(pos, &token)| {
                let val = solution[token] as usize;
                (variables[pos].clone(), values[pos][val].clone())
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_variables() {
        let domains: HashMap<u8, Vec<u8>> = HashMap::new();
        let solution = solve(&[], &domains, |_: &[(&u8, &u8)]| true).unwrap();
        assert!(solution.is_empty());
    }

    #[test]
    fn test_missing_domain_has_no_solution() {
        let domains: HashMap<u8, Vec<u8>> = HashMap::new();
        assert!(solve(&[1], &domains, |_: &[(&u8, &u8)]| true).is_none());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_oversized_domain_is_refused() {
        let size = Val::MAX as usize + 1;
        let domains: HashMap<u8, Vec<()>> = [(0, vec![(); size])].into_iter().collect();
        assert!(solve(&[0], &domains, |_: &[(&u8, &())]| true).is_none());
    }

    #[test]
    fn test_graph_colouring() {
        // Triangle plus a pendant vertex, three colours.
        let edges = [(0, 1), (1, 2), (0, 2), (2, 3)];
        let vars: Vec<u8> = (0..4).collect();
        let domains: HashMap<u8, Vec<&str>> =
            vars.iter().map(|&v| (v, vec!["red", "green", "blue"])).collect();

        let solution = solve(&vars, &domains, move |bound: &[(&u8, &&str)]| {
            let colour: HashMap<u8, &str> = bound.iter().map(|&(&v, &c)| (v, c)).collect();
            edges.iter().all(|(a, b)| match (colour.get(a), colour.get(b)) {
                (Some(x), Some(y)) => x != y,
                _ => true,
            })
        })
        .expect("colouring");

        for (a, b) in edges.iter() {
            assert_ne!(solution[a], solution[b]);
        }
    }

    #[test]
    fn test_predicate_sees_every_binding() {
        use std::cell::Cell;

        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let domains: HashMap<u8, Vec<u8>> = [(0, vec![0, 1]), (1, vec![0, 1])].into_iter().collect();
        let solution = solve(&[0, 1], &domains, move |bound: &[(&u8, &u8)]| {
            counter.set(counter.get() + 1);
            bound.iter().all(|&(_, &x)| x == 1)
        })
        .unwrap();

        assert_eq!(solution[&0], 1);
        assert_eq!(solution[&1], 1);
        assert!(calls.get() >= 2);
    }

    #[test]
    fn test_pigeonhole_is_infeasible() {
        let vars = [0u8, 1, 2];
        let domains: HashMap<u8, Vec<u8>> = vars.iter().map(|&v| (v, vec![7, 8])).collect();
        let result = solve(&vars, &domains, |bound: &[(&u8, &u8)]| {
            let mut seen: Vec<u8> = bound.iter().map(|&(_, &x)| x).collect();
            seen.sort_unstable();
            seen.dedup();
            seen.len() == bound.len()
        });
        assert!(result.is_none());
    }
}
