//! The solver's successful result.
use num::NumCast;
use thiserror::Error;

use crate::grid::Grid;

/// An ordered sequence of cell indices.
///
/// Paths returned by the solver visit every cell of the grid exactly once,
/// and consecutive cells always share an edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    cells: Vec<usize>,
}

/// A reason why a sequence of cells is not a Hamiltonian path satisfying
/// the given candidate sets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathDefect {
    #[error("path has {len} cells, expected {expected}")]
    WrongLength { len: usize, expected: usize },
    #[error("cell {cell} is outside the grid")]
    OutOfRange { cell: usize },
    #[error("cell {cell} is visited more than once")]
    Revisited { cell: usize },
    #[error("cells {from} and {to} are not adjacent")]
    NotAdjacent { from: usize, to: usize },
    #[error("path starts at cell {cell}, which is not a start candidate")]
    BadStart { cell: usize },
    #[error("path ends at cell {cell}, which is not an end candidate")]
    BadEnd { cell: usize },
}

impl Path {
    pub(crate) fn from_cells(cells: Vec<usize>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn first(&self) -> Option<usize> {
        self.cells.first().copied()
    }

    pub fn last(&self) -> Option<usize> {
        self.cells.last().copied()
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.cells
    }

    /// Convert the path into `[x, y]` coordinates on `grid`.
    ///
    /// Returns `None` if a coordinate does not fit in `T`.
    pub fn coords<T: NumCast>(&self, grid: &Grid) -> Option<Vec<[T; 2]>> {
        self.cells
            .iter()
            .map(|&cell| {
                let [x, y] = grid.coords(cell);
                Some([T::from(x)?, T::from(y)?])
            })
            .collect()
    }

    /// Check that the path visits every cell of `grid` exactly once, moving
    /// between adjacent cells only, starting in `inputs` and ending in
    /// `outputs`.
    pub fn verify(
        &self,
        grid: &Grid,
        inputs: &[usize],
        outputs: &[usize],
    ) -> Result<(), PathDefect> {
        let expected = grid.num_cells();
        if self.cells.len() != expected {
            return Err(PathDefect::WrongLength {
                len: self.cells.len(),
                expected,
            });
        }

        let mut seen = vec![false; expected];
        for &cell in &self.cells {
            if !grid.contains(cell) {
                return Err(PathDefect::OutOfRange { cell });
            }
            if seen[cell] {
                return Err(PathDefect::Revisited { cell });
            }
            seen[cell] = true;
        }

        if let Some(w) = self.cells.windows(2).find(|w| !grid.is_adjacent(w[0], w[1])) {
            return Err(PathDefect::NotAdjacent {
                from: w[0],
                to: w[1],
            });
        }

        // `expected` is never zero, so neither is the path
        let (first, last) = (self.cells[0], self.cells[expected - 1]);
        if !inputs.contains(&first) {
            return Err(PathDefect::BadStart { cell: first });
        }
        if !outputs.contains(&last) {
            return Err(PathDefect::BadEnd { cell: last });
        }
        Ok(())
    }
}

impl IntoIterator for Path {
    type Item = usize;
    type IntoIter = std::vec::IntoIter<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl AsRef<[usize]> for Path {
    fn as_ref(&self) -> &[usize] {
        &self.cells
    }
}

impl From<Path> for Vec<usize> {
    fn from(path: Path) -> Self {
        path.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_3x2() -> Grid {
        //  0  1  2
        //  3  4  5
        Grid::new([3u32, 2]).unwrap()
    }

    #[test]
    fn accepts_snake() {
        let path = Path::from_cells(vec![0, 1, 2, 5, 4, 3]);
        assert_eq!(path.verify(&grid_3x2(), &[0], &[3]), Ok(()));
    }

    #[test]
    fn reports_each_defect() {
        let grid = grid_3x2();
        let cases = vec![
            (vec![0, 1, 2], PathDefect::WrongLength { len: 3, expected: 6 }),
            (vec![0, 1, 2, 5, 4, 9], PathDefect::OutOfRange { cell: 9 }),
            (vec![0, 1, 2, 5, 4, 4], PathDefect::Revisited { cell: 4 }),
            (vec![0, 1, 2, 3, 4, 5], PathDefect::NotAdjacent { from: 2, to: 3 }),
            (vec![1, 0, 3, 4, 5, 2], PathDefect::BadStart { cell: 1 }),
            (vec![0, 3, 4, 1, 2, 5], PathDefect::BadEnd { cell: 5 }),
        ];
        for (cells, defect) in cases {
            let path = Path::from_cells(cells);
            assert_eq!(path.verify(&grid, &[0], &[2, 3]), Err(defect));
        }
    }

    #[test]
    fn coords_sanity() {
        let path = Path::from_cells(vec![0, 1, 2, 5, 4, 3]);
        let coords: Vec<[u8; 2]> = path.coords(&grid_3x2()).unwrap();
        assert_eq!(coords, vec![[0, 0], [1, 0], [2, 0], [2, 1], [1, 1], [0, 1]]);
    }
}
