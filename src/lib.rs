//! This crate finds a Hamiltonian path over a rectangular grid of cells: a
//! single stroke that visits every cell exactly once, entering at one of
//! a set of start cells and leaving at one of a set of end cells.
//!
//! ```text
//!   S ,-, E      S  start cell
//!   | | | |      E  end cell
//!   '-' '-'
//! ```
//!
//! Cells are numbered in row-major order. Cell `0` is the upper-left
//! corner and indices proceed left-to-right, top-to-bottom.
//!
//! # Algorithm
//!
//! The solver runs a depth-first search with an explicit stack. Moves are
//! ordered by Warnsdorff's rule (the neighbor with the fewest unvisited
//! neighbors first, ties broken by the direction order up, left, right,
//! down), and partial paths are discarded as soon as they
//!
//!  - wall in the end cell,
//!  - leave a cell that could be entered but never left, or
//!  - split the unvisited cells into more than one region.
//!
//! Before searching, pairs ruled out by the checkerboard coloring of the
//! grid are rejected without taking a single step.
//!
//! Finding a Hamiltonian path is NP-complete in general. [`Budget`] bounds
//! the work done by one search; running out of budget is reported as
//! [`Outcome::Cancelled`], which is distinct from [`Outcome::Infeasible`].
//!
//! # Example
//!
//! ```
//! use grid_hampath::{solve, Outcome};
//!
//! //  0  1  2
//! //  3  4  5
//! let outcome = solve(3, 2, &[0], &[3]).unwrap();
//! assert_eq!(outcome.into_path().unwrap().into_vec(), vec![0, 1, 2, 5, 4, 3]);
//!
//! // The corners of a 2×2 grid have the same color, so no path joins them
//! assert_eq!(solve(2, 2, &[0], &[3]).unwrap(), Outcome::Infeasible);
//! ```
mod budget;
pub mod candidates;
mod core;
mod error;
pub mod grid;
pub mod heuristic;
mod path;

pub use self::{
    budget::*,
    core::{solve, Outcome, SearchStats, Solved, Solver},
    error::InvalidInput,
    grid::Grid,
    path::{Path, PathDefect},
};
