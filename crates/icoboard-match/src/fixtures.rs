//! Shared test meshes.

use icoboard_topology::{FacetType, FixedOracle, Icosahedron, TriangleId, Vertex};

/// A once-subdivided mesh (80 faces) painted a single type.
pub(crate) fn level_one(fill: FacetType) -> Icosahedron {
    Icosahedron::with_subdivisions(1, &mut FixedOracle(fill)).unwrap()
}

/// A vertex created by subdivision: six triangles meet there.
pub(crate) fn interior_vertex(mesh: &Icosahedron) -> Vertex {
    // First child of the first face is [corner, midpoint, midpoint].
    mesh.triangles()[0].vertex(1)
}

/// One of the 12 original corners: only five triangles meet there.
pub(crate) fn corner_vertex(mesh: &Icosahedron) -> Vertex {
    mesh.triangles()[0].vertex(0)
}

/// Every triangle touching `centre`, in mesh order.
pub(crate) fn ring_around(mesh: &Icosahedron, centre: &Vertex) -> Vec<TriangleId> {
    mesh.triangles()
        .iter()
        .filter(|t| t.touches(centre))
        .map(|t| t.id())
        .collect()
}

pub(crate) fn paint(mesh: &mut Icosahedron, ids: &[TriangleId], facet_type: FacetType) {
    for id in ids {
        mesh.set_type(*id, facet_type).unwrap();
    }
}

pub(crate) fn sorted(mut ids: Vec<TriangleId>) -> Vec<TriangleId> {
    ids.sort();
    ids
}
