use thiserror::Error;

/// A malformed solve request, rejected before any search work is done.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("grid width and height must both be at least 1")]
    ZeroSize,
    #[error("grid has more cells than can be indexed")]
    TooLarge,
    #[error("no start candidates were given")]
    NoInputs,
    #[error("no end candidates were given")]
    NoOutputs,
    #[error("cell {cell} is outside the grid of {len} cells")]
    CellOutOfRange { cell: usize, len: usize },
    #[error("cell {cell} cannot be both the start and the end of a path over more than one cell")]
    SameStartAndEnd { cell: usize },
}
