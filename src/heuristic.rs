//! Move ordering and pruning strategies.
//!
//! The search loop of [`Solver`](crate::Solver) only decides *when* to move and
//! backtrack. Which neighbor to try first ([`MoveOrder`]) and which partial
//! paths can never be completed ([`Prune`]) are supplied by the strategies
//! defined here.
use crate::grid::Grid;

/// A read-only snapshot of the search state handed to the strategies.
#[derive(Debug, Clone, Copy)]
pub struct SearchView<'a> {
    pub(crate) grid: &'a Grid,
    pub(crate) visited: &'a [bool],
    pub(crate) head: usize,
    pub(crate) prev: Option<usize>,
    pub(crate) end: usize,
    pub(crate) remaining: usize,
}

impl<'a> SearchView<'a> {
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// The last cell of the partial path.
    pub fn head(&self) -> usize {
        self.head
    }

    /// The cell before [`head`](Self::head), or `None` if the head is the
    /// start cell.
    pub fn prev(&self) -> Option<usize> {
        self.prev
    }

    /// The designated end cell.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The number of cells not on the path yet.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_visited(&self, cell: usize) -> bool {
        self.visited[cell]
    }

    /// Iterate over the unvisited 4-connected neighbors of `cell`.
    pub fn unvisited_neighbors(&self, cell: usize) -> impl Iterator<Item = usize> + 'a {
        let visited = self.visited;
        self.grid
            .neighbors(cell)
            .into_iter()
            .flatten()
            .filter(move |&n| !visited[n])
    }

    /// The number of unvisited neighbors of `cell`.
    pub fn unvisited_degree(&self, cell: usize) -> usize {
        self.unvisited_neighbors(cell).count()
    }

    /// The number of ways the path could still pass through the unvisited
    /// `cell`: its unvisited neighbors, plus one if it touches the head.
    pub fn exits(&self, cell: usize) -> usize {
        self.unvisited_degree(cell) + self.grid.is_adjacent(cell, self.head) as usize
    }
}

/// Decides the order in which the unvisited neighbors of the head are tried.
pub trait MoveOrder {
    /// Reorder `moves`, which is given in [`DIR_ORDER`](crate::grid::DIR_ORDER),
    /// into the order they should be tried.
    fn order(&self, view: &SearchView<'_>, moves: &mut [usize]);
}

/// Tries neighbors in [`DIR_ORDER`](crate::grid::DIR_ORDER).
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedOrder;

impl MoveOrder for FixedOrder {
    fn order(&self, _view: &SearchView<'_>, _moves: &mut [usize]) {}
}

/// Warnsdorff's rule: try the neighbor with the fewest unvisited neighbors
/// first. Ties keep [`DIR_ORDER`](crate::grid::DIR_ORDER).
#[derive(Debug, Default, Clone, Copy)]
pub struct Warnsdorff;

impl MoveOrder for Warnsdorff {
    fn order(&self, view: &SearchView<'_>, moves: &mut [usize]) {
        // `sort_by_key` is stable
        moves.sort_by_key(|&cell| view.unvisited_degree(cell));
    }
}

/// Rejects partial paths that provably cannot be completed.
///
/// `viable` is called right after the head has moved onto a new cell (and
/// once for the start cell, with `view.prev() == None`). The end cell is
/// never the head while other cells remain; the search loop enforces that
/// itself.
pub trait Prune {
    fn viable(&self, view: &SearchView<'_>) -> bool;
}

/// Rejects moves that leave the end cell unenterable.
#[derive(Debug, Default, Clone, Copy)]
pub struct EndReachable;

impl Prune for EndReachable {
    fn viable(&self, view: &SearchView<'_>) -> bool {
        let end = view.end;
        if view.remaining == 0 {
            return view.head == end;
        }
        if view.remaining == 1 {
            // Only the end is left
            return view.grid.is_adjacent(view.head, end);
        }
        view.unvisited_neighbors(end).next().is_some()
    }
}

/// Rejects moves that leave an unvisited non-end cell with fewer than two
/// exits. Such a cell could only be entered and never left.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeadEnds;

impl DeadEnds {
    fn is_dead_end(view: &SearchView<'_>, cell: usize) -> bool {
        cell != view.end && !view.visited[cell] && view.exits(cell) < 2
    }
}

impl Prune for DeadEnds {
    fn viable(&self, view: &SearchView<'_>) -> bool {
        let grid = view.grid;
        match view.prev {
            // Only the cells around the old and the new head have lost
            // exits since the last check.
            Some(prev) => !grid
                .neighbors(prev)
                .iter()
                .chain(grid.neighbors(view.head).iter())
                .flatten()
                .any(|&cell| Self::is_dead_end(view, cell)),
            None => !(0..grid.num_cells()).any(|cell| Self::is_dead_end(view, cell)),
        }
    }
}

/// Rejects moves that split the unvisited cells into more than one
/// 4-connected region, or that leave them out of the head's reach.
#[derive(Debug, Default, Clone, Copy)]
pub struct Connectivity;

impl Prune for Connectivity {
    fn viable(&self, view: &SearchView<'_>) -> bool {
        if view.remaining == 0 {
            return true;
        }

        let mut head_neighbors = view.unvisited_neighbors(view.head);
        let seed = match head_neighbors.next() {
            Some(cell) => cell,
            None => return false,
        };

        // Invariant: the unvisited region was connected before this move.
        // Removing the new head from it can only split it if the head
        // touched it from more than one side.
        if view.prev.is_some() && head_neighbors.next().is_none() {
            return true;
        }

        let grid = view.grid;
        let mut reached = view.visited.to_vec();
        let mut stack = vec![seed];
        reached[seed] = true;
        let mut count = 1;
        while let Some(cell) = stack.pop() {
            for n in grid.neighbors(cell).iter().flatten() {
                if !reached[*n] {
                    reached[*n] = true;
                    count += 1;
                    stack.push(*n);
                }
            }
        }

        count == view.remaining
    }
}

/// [`EndReachable`], [`DeadEnds`] and [`Connectivity`], cheapest first.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardPrune;

impl Prune for StandardPrune {
    fn viable(&self, view: &SearchView<'_>) -> bool {
        EndReachable.viable(view) && DeadEnds.viable(view) && Connectivity.viable(view)
    }
}

/// Accepts every partial path. Useful as a baseline.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPrune;

impl Prune for NoPrune {
    fn viable(&self, _view: &SearchView<'_>) -> bool {
        true
    }
}

impl<T: MoveOrder + ?Sized> MoveOrder for &T {
    fn order(&self, view: &SearchView<'_>, moves: &mut [usize]) {
        (**self).order(view, moves)
    }
}

impl<T: MoveOrder + ?Sized> MoveOrder for Box<T> {
    fn order(&self, view: &SearchView<'_>, moves: &mut [usize]) {
        (**self).order(view, moves)
    }
}

impl<T: Prune + ?Sized> Prune for &T {
    fn viable(&self, view: &SearchView<'_>) -> bool {
        (**self).viable(view)
    }
}

impl<T: Prune + ?Sized> Prune for Box<T> {
    fn viable(&self, view: &SearchView<'_>) -> bool {
        (**self).viable(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a view of `grid` where `path` has been walked.
    fn view_of<'a>(
        grid: &'a Grid,
        visited: &'a mut Vec<bool>,
        path: &[usize],
        end: usize,
    ) -> SearchView<'a> {
        for &cell in path {
            visited[cell] = true;
        }
        SearchView {
            grid,
            visited,
            head: *path.last().unwrap(),
            prev: if path.len() > 1 {
                Some(path[path.len() - 2])
            } else {
                None
            },
            end,
            remaining: grid.num_cells() - path.len(),
        }
    }

    #[test]
    fn warnsdorff_prefers_constrained_cells() {
        //  0  1  2
        //  3 [4] 5
        //  6  7  8
        let grid = Grid::new([3u32, 3]).unwrap();
        let mut visited = vec![false; 9];
        let view = view_of(&grid, &mut visited, &[0, 1, 4], 8);
        let mut moves = [3, 5, 7];
        Warnsdorff.order(&view, &mut moves);
        // 3 → {6}, 5 → {2, 8}, 7 → {6, 8}
        assert_eq!(moves, [3, 5, 7]);

        let mut visited = vec![false; 9];
        let view = view_of(&grid, &mut visited, &[2, 1, 4], 6);
        let mut moves = [3, 5, 7];
        Warnsdorff.order(&view, &mut moves);
        // 3 → {0, 6}, 5 → {8}, 7 → {6, 8}
        assert_eq!(moves, [5, 3, 7]);
    }

    #[test]
    fn fixed_order_keeps_moves() {
        let grid = Grid::new([3u32, 3]).unwrap();
        let mut visited = vec![false; 9];
        let view = view_of(&grid, &mut visited, &[4], 0);
        let mut moves = [1, 3, 5, 7];
        FixedOrder.order(&view, &mut moves);
        assert_eq!(moves, [1, 3, 5, 7]);
    }

    #[test]
    fn end_reachable_detects_walled_in_end() {
        //  0  1  2
        //  3  4  5
        // End is 0; the path 1 → 4 → 3 cuts it off
        let grid = Grid::new([3u32, 2]).unwrap();
        let mut visited = vec![false; 6];
        let view = view_of(&grid, &mut visited, &[2, 1, 4, 3], 0);
        assert!(!EndReachable.viable(&view));

        let mut visited = vec![false; 6];
        let view = view_of(&grid, &mut visited, &[2, 5, 4, 3], 0);
        assert!(EndReachable.viable(&view));
    }

    #[test]
    fn end_reachable_last_cell_must_touch_head() {
        let grid = Grid::new([2u32, 2]).unwrap();
        let mut visited = vec![false; 4];
        let view = view_of(&grid, &mut visited, &[0, 1, 3], 2);
        assert!(EndReachable.viable(&view));

        // In a single row, walking away from the end strands it
        let grid = Grid::new([3u32, 1]).unwrap();
        let mut visited = vec![false; 3];
        let view = view_of(&grid, &mut visited, &[1, 2], 0);
        assert!(!EndReachable.viable(&view));
    }

    #[test]
    fn dead_ends_detects_stranded_corner() {
        //  0  1  2
        //  3  4  5
        //  6  7  8
        // Path 1 → 4 → 3 leaves corner 0 with only the head as an exit
        let grid = Grid::new([3u32, 3]).unwrap();
        let mut visited = vec![false; 9];
        let view = view_of(&grid, &mut visited, &[1, 4, 3], 8);
        assert!(!DeadEnds.viable(&view));

        // ... unless corner 0 is the end
        let mut visited = vec![false; 9];
        let view = view_of(&grid, &mut visited, &[1, 4, 3], 0);
        assert!(DeadEnds.viable(&view));
    }

    #[test]
    fn dead_ends_full_scan_at_start() {
        // In a single row starting mid-way, both ends have one exit
        let grid = Grid::new([5u32, 1]).unwrap();
        let mut visited = vec![false; 5];
        let view = view_of(&grid, &mut visited, &[2], 4);
        assert!(!DeadEnds.viable(&view));

        let mut visited = vec![false; 5];
        let view = view_of(&grid, &mut visited, &[0], 4);
        assert!(DeadEnds.viable(&view));
    }

    #[test]
    fn connectivity_detects_split() {
        //  0  1  2  3
        //  4  5  6  7
        //  8  9 10 11
        // The path 1 → 5 → 9 splits {0, 4, 8} from {2, 3, 6, 7, 10, 11}
        let grid = Grid::new([4u32, 3]).unwrap();
        let mut visited = vec![false; 12];
        let view = view_of(&grid, &mut visited, &[1, 5, 9], 11);
        assert!(!Connectivity.viable(&view));

        let mut visited = vec![false; 12];
        let view = view_of(&grid, &mut visited, &[0, 4, 8, 9], 11);
        assert!(Connectivity.viable(&view));
    }

    #[test]
    fn connectivity_detects_split_at_start() {
        let grid = Grid::new([3u32, 1]).unwrap();
        let mut visited = vec![false; 3];
        let view = view_of(&grid, &mut visited, &[1], 0);
        assert!(!Connectivity.viable(&view));
    }

    #[test]
    fn connectivity_requires_head_contact() {
        // The head has spiralled into corner 0 with 6, 7, 8 left
        let grid = Grid::new([3u32, 3]).unwrap();
        let mut visited = vec![false; 9];
        let view = view_of(&grid, &mut visited, &[1, 2, 5, 4, 3, 0], 8);
        assert!(!Connectivity.viable(&view));
    }

    #[test]
    fn standard_prune_accepts_snake_prefix() {
        let grid = Grid::new([3u32, 3]).unwrap();
        let snake = [0, 1, 2, 5, 4, 3, 6, 7, 8];
        for len in 1..snake.len() {
            let mut visited = vec![false; 9];
            let view = view_of(&grid, &mut visited, &snake[..len], 8);
            assert!(StandardPrune.viable(&view), "rejected prefix {:?}", &snake[..len]);
        }
    }
}
