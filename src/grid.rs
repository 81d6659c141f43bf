//! Grid geometry: cell indexing, coordinates and 4-connected adjacency.
use bitflags::bitflags;
use num::{PrimInt, Unsigned};

use crate::error::InvalidInput;

bitflags! {
    /// A set of 4-connected directions.
    ///
    /// ```text
    ///         UP
    ///   LEFT  []  RIGHT
    ///        DOWN
    /// ```
    pub struct Dirs: u8 {
        const UP = 0b0001;
        const LEFT = 0b0010;
        const RIGHT = 0b0100;
        const DOWN = 0b1000;
    }
}

/// The fixed direction order used for neighbor enumeration and tie-breaking.
pub const DIR_ORDER: [Dirs; 4] = [Dirs::UP, Dirs::LEFT, Dirs::RIGHT, Dirs::DOWN];

/// A rectangular grid of `size[0] × size[1]` cells.
///
/// Cells are numbered in row-major order: cell `0` is the upper-left corner
/// and indices proceed left-to-right, top-to-bottom. Coordinates are given
/// as `[x, y]` (column, row), matching the `[width, height]` order of the
/// size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    size: [usize; 2],
    num_cells: usize,
}

impl Grid {
    /// Construct a `Grid` of the given `[width, height]`.
    ///
    /// Both sides must be non-zero and the cell count must fit in `usize`.
    pub fn new<T: PrimInt + Unsigned>(size: [T; 2]) -> Result<Self, InvalidInput> {
        if size[0] == T::zero() || size[1] == T::zero() {
            return Err(InvalidInput::ZeroSize);
        }
        let width = size[0].to_usize().ok_or(InvalidInput::TooLarge)?;
        let height = size[1].to_usize().ok_or(InvalidInput::TooLarge)?;
        let num_cells = width.checked_mul(height).ok_or(InvalidInput::TooLarge)?;
        Ok(Self {
            size: [width, height],
            num_cells,
        })
    }

    pub fn width(&self) -> usize {
        self.size[0]
    }

    pub fn height(&self) -> usize {
        self.size[1]
    }

    pub fn size(&self) -> [usize; 2] {
        self.size
    }

    /// The number of cells, `width * height`. Never zero.
    pub fn num_cells(&self) -> usize {
        self.num_cells
    }

    pub fn contains(&self, cell: usize) -> bool {
        cell < self.num_cells
    }

    /// Fail with [`InvalidInput::CellOutOfRange`] unless `cell` is in the grid.
    pub fn check_cell(&self, cell: usize) -> Result<(), InvalidInput> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(InvalidInput::CellOutOfRange {
                cell,
                len: self.num_cells,
            })
        }
    }

    /// Get the `[x, y]` coordinates of `cell`.
    pub fn coords(&self, cell: usize) -> [usize; 2] {
        debug_assert!(self.contains(cell));
        [cell % self.size[0], cell / self.size[0]]
    }

    /// Get the cell at `[x, y]`, or `None` if it lies outside the grid.
    pub fn index(&self, [x, y]: [usize; 2]) -> Option<usize> {
        if x < self.size[0] && y < self.size[1] {
            Some(y * self.size[0] + x)
        } else {
            None
        }
    }

    /// Get the neighbor of `cell` in direction `dir`.
    ///
    /// `dir` must be a single direction; anything else yields `None`.
    pub fn neighbor(&self, cell: usize, dir: Dirs) -> Option<usize> {
        let [x, y] = self.coords(cell);
        let width = self.size[0];
        match dir {
            Dirs::UP if y > 0 => Some(cell - width),
            Dirs::LEFT if x > 0 => Some(cell - 1),
            Dirs::RIGHT if x + 1 < width => Some(cell + 1),
            Dirs::DOWN if y + 1 < self.size[1] => Some(cell + width),
            _ => None,
        }
    }

    /// Get the 4-connected neighbors of `cell` in [`DIR_ORDER`].
    pub fn neighbors(&self, cell: usize) -> [Option<usize>; 4] {
        DIR_ORDER.map(|dir| self.neighbor(cell, dir))
    }

    /// Check if two cells share an edge.
    pub fn is_adjacent(&self, a: usize, b: usize) -> bool {
        let [ax, ay] = self.coords(a);
        let [bx, by] = self.coords(b);
        ax.max(bx) - ax.min(bx) + ay.max(by) - ay.min(by) == 1
    }

    /// The checkerboard color of `cell`: `0` if `x + y` is even, `1` otherwise.
    ///
    /// Every move changes the color, so a path over all cells alternates
    /// colors and its endpoints are constrained by the cell count.
    pub fn color(&self, cell: usize) -> u8 {
        let [x, y] = self.coords(cell);
        ((x + y) & 1) as u8
    }
}
