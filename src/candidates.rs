//! Trying several (start, end) candidate pairs.
//!
//! The core search accepts exactly one pair. This module provides the simple
//! policy of trying pairs in the order the candidates are given until one of
//! them succeeds.
use log::trace;

use crate::{
    core::{Outcome, SearchStats, Solved, Solver},
    error::InvalidInput,
    heuristic::{MoveOrder, Prune},
};

/// Iterate over the distinct (start, end) pairs drawn from `inputs` ×
/// `outputs`, in input-major order.
///
/// Repeated candidates are skipped. `start == end` pairs are skipped unless
/// `single_cell` is set.
pub fn pairs<'a>(
    inputs: &'a [usize],
    outputs: &'a [usize],
    single_cell: bool,
) -> impl Iterator<Item = (usize, usize)> + 'a {
    let distinct = |list: &'a [usize]| {
        list.iter()
            .enumerate()
            .filter(move |&(i, cell)| !list[..i].contains(cell))
            .map(|(_, &cell)| cell)
    };
    distinct(inputs).flat_map(move |start| {
        distinct(outputs)
            .filter(move |&end| single_cell || end != start)
            .map(move |end| (start, end))
    })
}

/// Search each pair produced by [`pairs`] in turn and return the first path
/// found.
///
/// The solver's budget is shared by all attempts. The result is
/// [`Outcome::Infeasible`] only if every pair is infeasible, and
/// [`Outcome::Cancelled`] as soon as the budget runs out. The returned
/// statistics cover all attempts.
pub fn first_feasible<O, P>(
    solver: &Solver<O, P>,
    inputs: &[usize],
    outputs: &[usize],
) -> Result<Solved, InvalidInput>
where
    O: MoveOrder,
    P: Prune,
{
    solver.check_candidates(inputs, outputs)?;
    let single_cell = solver.grid().num_cells() == 1;

    let mut total = SearchStats::default();
    let mut tried = 0;
    for (start, end) in pairs(inputs, outputs, single_cell) {
        trace!("trying pair #{}: {} → {}", tried, start, end);
        tried += 1;

        let solved = solver.search(start, end, total.steps);
        total += solved.stats;
        match solved.outcome {
            Outcome::Infeasible => continue,
            outcome => {
                return Ok(Solved {
                    outcome,
                    stats: total,
                })
            }
        }
    }

    if tried == 0 {
        // Every pair had `start == end`, so the candidates hold one cell
        return Err(InvalidInput::SameStartAndEnd { cell: inputs[0] });
    }

    Ok(Solved {
        outcome: Outcome::Infeasible,
        stats: total,
    })
}
