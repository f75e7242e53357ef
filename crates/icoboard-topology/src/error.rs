//! Error types for icoboard-topology.

use thiserror::Error;

use crate::{TriangleId, Vertex};

/// Result type for topology operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Construction-time failures. Any of these leaves the mesh unusable.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Two triangles share all three vertices.
    #[error("triangles {first} and {second} share {shared} vertices (duplicate geometry)")]
    DuplicateGeometry {
        first: TriangleId,
        second: TriangleId,
        shared: usize,
    },

    /// An edge slot is claimed by two different neighbours.
    #[error("edge {edge} of triangle {triangle} already borders {existing}, cannot also border {incoming}")]
    EdgeConflict {
        triangle: TriangleId,
        edge: usize,
        existing: TriangleId,
        incoming: TriangleId,
    },

    /// Closure check failed: the triangle has empty edge slots.
    #[error("triangle {triangle} is missing neighbours on edges {missing:?}")]
    OpenMesh {
        triangle: TriangleId,
        missing: Vec<usize>,
    },

    /// An adjacency link is not mirrored by the other side.
    #[error("triangle {from} lists {to} as a neighbour but not the other way around")]
    OneSidedAdjacency { from: TriangleId, to: TriangleId },

    /// Two triangles carry the same id.
    #[error("duplicate triangle id {0}")]
    DuplicateId(TriangleId),

    /// Lookup of an id that is not part of the mesh.
    #[error("unknown triangle {0}")]
    UnknownTriangle(TriangleId),

    /// No id is left after `last`.
    #[error("triangle id space exhausted after {last}")]
    IdSpaceExhausted { last: u64 },

    /// A zero-length vector has no direction on the sphere.
    #[error("cannot project degenerate vertex {0} onto the unit sphere")]
    DegenerateVertex(Vertex),
}
