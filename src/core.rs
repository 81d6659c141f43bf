//! The core implementation of the search.
use log::debug;

use crate::{
    budget::Budget,
    error::InvalidInput,
    grid::Grid,
    heuristic::{MoveOrder, Prune, SearchView, StandardPrune, Warnsdorff},
    path::Path,
};

/// How a search for one (start, end) pair ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A Hamiltonian path from the start to the end.
    Path(Path),
    /// The search space was exhausted: no such path exists.
    Infeasible,
    /// The [`Budget`] ran out before the search concluded. Nothing is known
    /// about whether a path exists.
    Cancelled,
}

impl Outcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Outcome::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            Outcome::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_infeasible(&self) -> bool {
        *self == Outcome::Infeasible
    }

    pub fn is_cancelled(&self) -> bool {
        *self == Outcome::Cancelled
    }
}

/// Counters describing the work done by a search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// The number of cells added to the path, including the start.
    pub steps: u64,
    /// The number of cells removed from the path.
    pub backtracks: u64,
    /// The number of moves rejected before being explored.
    pub pruned: u64,
}

impl std::ops::AddAssign for SearchStats {
    fn add_assign(&mut self, rhs: Self) {
        self.steps += rhs.steps;
        self.backtracks += rhs.backtracks;
        self.pruned += rhs.pruned;
    }
}

/// An [`Outcome`] together with the [`SearchStats`] of the search that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solved {
    pub outcome: Outcome,
    pub stats: SearchStats,
}

/// A decision point of the search.
#[derive(Debug, Clone, Copy)]
struct Frame {
    cell: usize,
    /// Unvisited neighbors of `cell` in the order they are tried.
    moves: [usize; 4],
    num_moves: u8,
    /// The index of the next untried element of `moves`.
    next: u8,
}

/// Finds Hamiltonian paths on a specific grid.
///
/// `O` decides the order in which moves are tried and `P` rejects partial
/// paths that cannot be completed. A `Solver` holds no search state, so one
/// instance can serve any number of (possibly concurrent) searches.
#[derive(Debug, Clone)]
pub struct Solver<O = Warnsdorff, P = StandardPrune> {
    grid: Grid,
    order: O,
    prune: P,
    budget: Budget,
}

impl Solver {
    /// Construct a `Solver` using [`Warnsdorff`] move ordering,
    /// [`StandardPrune`] and an unlimited [`Budget`].
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            order: Warnsdorff,
            prune: StandardPrune,
            budget: Budget::unlimited(),
        }
    }
}

impl<O, P> Solver<O, P>
where
    O: MoveOrder,
    P: Prune,
{
    /// Replace the move ordering strategy.
    pub fn with_move_order<O2: MoveOrder>(self, order: O2) -> Solver<O2, P> {
        Solver {
            grid: self.grid,
            order,
            prune: self.prune,
            budget: self.budget,
        }
    }

    /// Replace the pruning strategy.
    pub fn with_prune<P2: Prune>(self, prune: P2) -> Solver<O, P2> {
        Solver {
            grid: self.grid,
            order: self.order,
            prune,
            budget: self.budget,
        }
    }

    pub fn with_budget(self, budget: Budget) -> Self {
        Self { budget, ..self }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    /// Find a path starting in `inputs` and ending in `outputs`.
    ///
    /// Exactly one pair is searched: the first start candidate and the first
    /// end candidate different from it. Use
    /// [`first_feasible`](crate::candidates::first_feasible) to try every
    /// pair.
    pub fn solve(&self, inputs: &[usize], outputs: &[usize]) -> Result<Outcome, InvalidInput> {
        self.check_candidates(inputs, outputs)?;
        let start = inputs[0];
        let single = self.grid.num_cells() == 1;
        let end = outputs
            .iter()
            .copied()
            .find(|&end| single || end != start)
            .ok_or(InvalidInput::SameStartAndEnd { cell: start })?;
        Ok(self.search(start, end, 0).outcome)
    }

    /// Search for a path from `start` to `end`.
    pub fn solve_pair(&self, start: usize, end: usize) -> Result<Solved, InvalidInput> {
        self.check_pair(start, end)?;
        Ok(self.search(start, end, 0))
    }

    pub(crate) fn check_candidates(
        &self,
        inputs: &[usize],
        outputs: &[usize],
    ) -> Result<(), InvalidInput> {
        if inputs.is_empty() {
            return Err(InvalidInput::NoInputs);
        }
        if outputs.is_empty() {
            return Err(InvalidInput::NoOutputs);
        }
        for &cell in inputs.iter().chain(outputs.iter()) {
            self.grid.check_cell(cell)?;
        }
        Ok(())
    }

    fn check_pair(&self, start: usize, end: usize) -> Result<(), InvalidInput> {
        self.grid.check_cell(start)?;
        self.grid.check_cell(end)?;
        if start == end && self.grid.num_cells() > 1 {
            return Err(InvalidInput::SameStartAndEnd { cell: start });
        }
        Ok(())
    }

    /// Run the search on a validated pair. `spent` is the number of steps
    /// already charged to `self.budget` by earlier searches.
    pub(crate) fn search(&self, start: usize, end: usize, spent: u64) -> Solved {
        debug!(
            "searching {:?} for a path {} → {}",
            self.grid.size(),
            start,
            end
        );
        let mut stats = SearchStats::default();
        let outcome = self.search_inner(start, end, spent, &mut stats);
        debug!(
            "search {} → {} finished: {} ({:?})",
            start,
            end,
            match &outcome {
                Outcome::Path(_) => "found",
                Outcome::Infeasible => "infeasible",
                Outcome::Cancelled => "cancelled",
            },
            stats
        );
        Solved { outcome, stats }
    }

    fn search_inner(
        &self,
        start: usize,
        end: usize,
        spent: u64,
        stats: &mut SearchStats,
    ) -> Outcome {
        let grid = &self.grid;
        let num_cells = grid.num_cells();

        if num_cells > 1 && !parity_allows(grid, start, end) {
            debug!("{} → {} is ruled out by checkerboard parity", start, end);
            return Outcome::Infeasible;
        }

        if self.budget.is_exceeded_at(spent + 1, true) {
            debug!("budget exceeded before the first step");
            return Outcome::Cancelled;
        }

        if num_cells == 1 {
            stats.steps = 1;
            return Outcome::Path(Path::from_cells(vec![start]));
        }

        let mut visited = vec![false; num_cells];
        let mut path = Vec::with_capacity(num_cells);
        let mut stack: Vec<Frame> = Vec::with_capacity(num_cells);

        visited[start] = true;
        path.push(start);
        stats.steps = 1;
        {
            let view = SearchView {
                grid,
                visited: &visited,
                head: start,
                prev: None,
                end,
                remaining: num_cells - 1,
            };
            if !self.prune.viable(&view) {
                stats.pruned += 1;
                return Outcome::Infeasible;
            }
            stack.push(self.frame(&view));
        }

        while let Some(frame) = stack.last_mut() {
            let cell = frame.cell;

            if frame.next == frame.num_moves {
                // Every move from `cell` failed
                stack.pop();
                visited[cell] = false;
                path.pop();
                stats.backtracks += 1;
                continue;
            }

            let next = frame.moves[frame.next as usize];
            frame.next += 1;

            // The number of unvisited cells once `next` is visited
            let remaining = num_cells - path.len() - 1;
            if next == end && remaining != 0 {
                stats.pruned += 1;
                continue;
            }

            let step = spent + stats.steps + 1;
            if self.budget.is_exceeded_at(step, false) {
                debug!("budget exceeded at step {}", step);
                return Outcome::Cancelled;
            }

            visited[next] = true;
            path.push(next);
            stats.steps += 1;

            if remaining == 0 {
                // The end is never visited early, so it must be the last cell
                debug_assert_eq!(next, end);
                return Outcome::Path(Path::from_cells(path));
            }

            let view = SearchView {
                grid,
                visited: &visited,
                head: next,
                prev: Some(cell),
                end,
                remaining,
            };
            if self.prune.viable(&view) {
                let frame = self.frame(&view);
                stack.push(frame);
            } else {
                visited[next] = false;
                path.pop();
                stats.pruned += 1;
            }
        }

        Outcome::Infeasible
    }

    /// Create a decision point at the head of `view`.
    fn frame(&self, view: &SearchView<'_>) -> Frame {
        let mut moves = [0; 4];
        let mut num_moves = 0;
        for cell in view.unvisited_neighbors(view.head) {
            moves[num_moves] = cell;
            num_moves += 1;
        }
        self.order.order(view, &mut moves[..num_moves]);
        Frame {
            cell: view.head,
            moves,
            num_moves: num_moves as u8,
            next: 0,
        }
    }
}

/// Check the checkerboard coloring argument.
///
/// A path over all cells alternates between the two colors. With an even
/// cell count, it must start and end on different colors. With an odd cell
/// count, both dimensions are odd and it must start and end on the majority
/// color (`0`, which the corners have).
fn parity_allows(grid: &Grid, start: usize, end: usize) -> bool {
    let (a, b) = (grid.color(start), grid.color(end));
    if grid.num_cells() % 2 == 0 {
        a != b
    } else {
        a == 0 && b == 0
    }
}

/// Find a path over a `width × height` grid starting in `inputs` and
/// ending in `outputs`, with the default strategies and no budget.
///
/// See [`Solver::solve`].
pub fn solve(
    width: usize,
    height: usize,
    inputs: &[usize],
    outputs: &[usize],
) -> Result<Outcome, InvalidInput> {
    let grid = Grid::new([width, height])?;
    Solver::new(grid).solve(inputs, outputs)
}
