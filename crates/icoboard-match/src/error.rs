//! Error types for icoboard-match.

use icoboard_topology::TriangleId;
use thiserror::Error;

/// Result type for match operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while playing a turn.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The underlying mesh rejected an operation.
    #[error("topology error: {0}")]
    Topology(#[from] icoboard_topology::Error),

    /// Only edge neighbours may be swapped.
    #[error("triangles {a} and {b} are not adjacent")]
    NotAdjacent { a: TriangleId, b: TriangleId },

    /// The id is not part of the board.
    #[error("unknown triangle {0}")]
    UnknownTriangle(TriangleId),
}
