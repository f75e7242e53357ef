//! Triangles and their edge slots.
//!
//! Vertex order is significant. Edge slot `i` runs from vertex `i` to vertex
//! `(i + 1) % 3`:
//!
//! ```text
//! edge 0 = p1-p2    edge 1 = p2-p3    edge 2 = p3-p1
//! ```
//!
//! Adjacency is stored per edge slot as the id of the neighbour, never as an
//! owning link. The owning [`Icosahedron`](crate::Icosahedron) resolves ids.

use crate::{FacetType, Vertex, EPSILON};

/// Unique, never-reused identifier of a triangle within one mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriangleId(pub u64);

impl TriangleId {
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TriangleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Map two distinct vertex indices to the edge slot joining them.
///
/// The sum of the pair identifies the edge regardless of order:
/// `{0,1}` sums to 1 (edge 0), `{1,2}` to 3 (edge 1), `{2,0}` to 2 (edge 2).
pub fn edge_slot(i: usize, j: usize) -> Option<usize> {
    if i == j || i > 2 || j > 2 {
        return None;
    }
    match i + j {
        1 => Some(0),
        3 => Some(1),
        2 => Some(2),
        _ => None,
    }
}

/// The two edge slots that meet at vertex `index`.
///
/// Edge `index` leaves the vertex, edge `(index + 2) % 3` arrives at it.
pub const fn edges_at_vertex(index: usize) -> [usize; 2] {
    [index % 3, (index + 2) % 3]
}

/// Indices of one triangle's vertices that coincide with another's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SharedVertices {
    indices: [usize; 3],
    len: usize,
}

impl SharedVertices {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices[..self.len]
    }

    /// The edge slot spanned by the shared vertices, when exactly two match.
    pub fn edge(&self) -> Option<usize> {
        match self.as_slice() {
            [i, j] => edge_slot(*i, *j),
            _ => None,
        }
    }

    fn push(&mut self, index: usize) {
        self.indices[self.len] = index;
        self.len += 1;
    }
}

/// A facet of the mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    id: TriangleId,
    vertices: [Vertex; 3],
    facet_type: FacetType,
    adjacents: [Option<TriangleId>; 3],
}

impl Triangle {
    /// Create a triangle with no neighbours yet.
    pub fn new(id: TriangleId, vertices: [Vertex; 3], facet_type: FacetType) -> Self {
        Self {
            id,
            vertices,
            facet_type,
            adjacents: [None; 3],
        }
    }

    /// Set all three edge slots at once, e.g. when rebuilding a stored mesh.
    ///
    /// Links are not checked here; [`crate::Icosahedron::from_parts`] does.
    pub fn with_adjacents(mut self, adjacents: [Option<TriangleId>; 3]) -> Self {
        self.adjacents = adjacents;
        self
    }

    #[inline]
    pub fn id(&self) -> TriangleId {
        self.id
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex; 3] {
        &self.vertices
    }

    #[inline]
    pub fn vertex(&self, index: usize) -> Vertex {
        self.vertices[index % 3]
    }

    #[inline]
    pub fn facet_type(&self) -> FacetType {
        self.facet_type
    }

    pub fn set_facet_type(&mut self, facet_type: FacetType) {
        self.facet_type = facet_type;
    }

    /// Neighbour ids by edge slot.
    #[inline]
    pub fn adjacents(&self) -> &[Option<TriangleId>; 3] {
        &self.adjacents
    }

    #[inline]
    pub fn adjacent(&self, edge: usize) -> Option<TriangleId> {
        self.adjacents.get(edge).copied().flatten()
    }

    /// Present neighbours in edge slot order.
    pub fn neighbours(&self) -> impl Iterator<Item = TriangleId> + '_ {
        self.adjacents.iter().filter_map(|a| *a)
    }

    /// Number of occupied edge slots.
    pub fn neighbour_count(&self) -> usize {
        self.neighbours().count()
    }

    /// Edge slot through which `other` is reached, if it is a neighbour.
    pub fn edge_towards(&self, other: TriangleId) -> Option<usize> {
        self.adjacents.iter().position(|a| *a == Some(other))
    }

    pub(crate) fn set_adjacent(&mut self, edge: usize, neighbour: Option<TriangleId>) {
        self.adjacents[edge] = neighbour;
    }

    pub(crate) fn clear_adjacents(&mut self) {
        self.adjacents = [None; 3];
    }

    /// End points of an edge slot.
    pub fn edge(&self, edge: usize) -> (Vertex, Vertex) {
        let i = edge % 3;
        (self.vertices[i], self.vertices[(i + 1) % 3])
    }

    /// Index of the vertex coinciding with `point`, if any.
    pub fn vertex_index(&self, point: &Vertex) -> Option<usize> {
        self.vertices.iter().position(|v| v.coincides(point))
    }

    /// True when one of the corners coincides with `point`.
    pub fn touches(&self, point: &Vertex) -> bool {
        self.vertex_index(point).is_some()
    }

    /// Which of this triangle's vertices coincide with any vertex of `other`.
    pub fn shared_vertex_indices(&self, other: &Triangle) -> SharedVertices {
        let mut shared = SharedVertices::default();
        for (i, v) in self.vertices.iter().enumerate() {
            if other.vertices.iter().any(|w| v.coincides(w)) {
                shared.push(i);
            }
        }
        shared
    }

    /// Chord lengths of edges 0, 1 and 2.
    pub fn edge_lengths(&self) -> [f64; 3] {
        [0, 1, 2].map(|e| {
            let (a, b) = self.edge(e);
            a.distance(&b)
        })
    }

    /// True when all three edges agree within `tolerance`.
    pub fn is_equilateral(&self, tolerance: f64) -> bool {
        let [a, b, c] = self.edge_lengths();
        (a - b).abs() < tolerance && (b - c).abs() < tolerance && (c - a).abs() < tolerance
    }

    pub fn centroid(&self) -> Vertex {
        let [a, b, c] = self.vertices;
        (a + b + c).scale(1.0 / 3.0)
    }

    /// Outward-pointing when the winding is counter-clockwise seen from outside.
    pub fn normal(&self) -> Vertex {
        let [a, b, c] = self.vertices;
        (b - a).cross(&(c - a))
    }

    /// True when the winding is counter-clockwise seen from the origin's outside.
    pub fn faces_outward(&self) -> bool {
        self.normal().dot(&self.centroid()) > EPSILON * EPSILON
    }
}
