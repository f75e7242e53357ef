//! Icoboard Mesh Topology
//!
//! A subdivided icosahedron of triangular facets with edge-slot adjacency.
//!
//! # Geometry
//!
//! The base solid has 12 vertices (golden-ratio coordinates projected onto
//! the unit sphere) and 20 faces. Each 1-to-4 subdivision splits every face
//! at its sphere-projected edge midpoints, so after `n` steps the mesh has
//! `20 · 4ⁿ` triangles, all vertices on the unit sphere.
//!
//! # Adjacency
//!
//! Every triangle has three edge slots. Slot `i` holds the id of the triangle
//! across the edge from vertex `i` to vertex `(i + 1) % 3`. Links are found
//! purely from coordinates: two triangles are adjacent iff exactly two of
//! their vertices coincide within [`EPSILON`]. Every link is reciprocal, and
//! on a closed mesh every slot is filled.
//!
//! # Facet Types
//!
//! Each facet carries a [`FacetType`]. New types come from an injected
//! [`TypeOracle`], never from a global generator, so geometry stays
//! deterministic under test.

mod adjacency;
mod base;
mod error;
mod facet;
mod mesh;
mod subdivide;
mod triangle;
mod vertex;

pub use adjacency::{
    compute_adjacency, index_by_id, verify_closure, verify_distinct_geometry, verify_reciprocity,
    AdjacencyStats,
};
pub use base::{base_vertices, build_base_icosahedron, FACES, PHI};
pub use error::{Error, Result};
pub use facet::{CycleOracle, FacetType, FixedOracle, RandomOracle, TypeOracle};
pub use mesh::{Icosahedron, ReferenceTriangle, TrianglesChanged};
pub use subdivide::{IdCounter, Subdivision};
pub use triangle::{edge_slot, edges_at_vertex, SharedVertices, Triangle, TriangleId};
pub use vertex::Vertex;

/// Distance below which two vertices are the same point.
///
/// Absorbs rounding from normalization on a unit sphere; far below the
/// shortest edge at any supported subdivision depth.
pub const EPSILON: f64 = 1e-6;

/// Vertices of the base icosahedron.
pub const BASE_VERTICES: usize = 12;

/// Faces of the base icosahedron.
pub const BASE_TRIANGLES: usize = 20;

/// Edges of the base icosahedron.
pub const BASE_EDGES: usize = 30;

/// Children per triangle in a 1-to-4 split.
pub const CHILDREN_PER_SPLIT: usize = 4;

// Euler characteristic of a sphere: V - E + F = 2
const _: () = assert!(BASE_VERTICES + BASE_TRIANGLES - BASE_EDGES == 2);

/// Triangle count after `levels` 1-to-4 subdivisions of the base solid.
pub const fn triangles_at_level(levels: u32) -> usize {
    BASE_TRIANGLES * CHILDREN_PER_SPLIT.pow(levels)
}

/// Distinct vertices after `levels` 1-to-4 subdivisions: `10 · 4ⁿ + 2`.
pub const fn vertices_at_level(levels: u32) -> usize {
    10 * CHILDREN_PER_SPLIT.pow(levels) + 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euler_characteristic() {
        assert_eq!(BASE_VERTICES + BASE_TRIANGLES - BASE_EDGES, 2);
    }

    #[test]
    fn level_formulas() {
        assert_eq!(triangles_at_level(0), 20);
        assert_eq!(triangles_at_level(1), 80);
        assert_eq!(triangles_at_level(3), 1280);

        assert_eq!(vertices_at_level(0), 12);
        assert_eq!(vertices_at_level(1), 42);
        assert_eq!(vertices_at_level(2), 162);
    }
}
