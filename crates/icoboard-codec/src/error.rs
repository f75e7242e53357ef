//! Error types for icoboard-codec.

use icoboard_topology::TriangleId;
use thiserror::Error;

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a document cannot be written or turned back into a mesh.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid graph document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The rebuilt triangles do not form a consistent mesh.
    #[error("inconsistent mesh: {0}")]
    Topology(#[from] icoboard_topology::Error),

    /// A `type` value outside the facet enumeration.
    #[error("unknown facet type {0}")]
    UnknownType(u8),

    /// An adjacency entry names a triangle the document does not contain.
    #[error("triangle {triangle} lists missing neighbour {adjacent}")]
    DanglingAdjacent {
        triangle: TriangleId,
        adjacent: TriangleId,
    },

    #[error("triangle {0} appears more than once")]
    DuplicateTriangle(TriangleId),

    /// An adjacency entry names a triangle that does not share an edge.
    #[error("triangle {triangle} lists {adjacent} as a neighbour but they share no edge")]
    NotNeighbours {
        triangle: TriangleId,
        adjacent: TriangleId,
    },
}
