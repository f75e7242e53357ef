//! The regular icosahedron.
//!
//! Twelve vertices are the cyclic permutations of `(0, ±a, ±b)` with `a = 1`
//! and `b = 1/φ`, projected onto the unit sphere. The face table below is a
//! constant of the solid: every face is wound counter-clockwise seen from
//! outside, and every edge is shared by exactly two faces.

use crate::error::Result;
use crate::{Triangle, TypeOracle, Vertex, BASE_TRIANGLES, BASE_VERTICES};

/// The golden ratio.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Vertex indices of the 20 faces, outward counter-clockwise winding.
pub const FACES: [[usize; 3]; BASE_TRIANGLES] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// The 12 corners of the icosahedron on the unit sphere.
pub fn base_vertices() -> Result<[Vertex; BASE_VERTICES]> {
    let a = 1.0;
    let b = 1.0 / PHI;
    let raw = [
        Vertex::new(-b, a, 0.0),
        Vertex::new(b, a, 0.0),
        Vertex::new(-b, -a, 0.0),
        Vertex::new(b, -a, 0.0),
        Vertex::new(0.0, -b, a),
        Vertex::new(0.0, b, a),
        Vertex::new(0.0, -b, -a),
        Vertex::new(0.0, b, -a),
        Vertex::new(a, 0.0, -b),
        Vertex::new(a, 0.0, b),
        Vertex::new(-a, 0.0, -b),
        Vertex::new(-a, 0.0, b),
    ];

    let mut out = [Vertex::ORIGIN; BASE_VERTICES];
    for (slot, v) in out.iter_mut().zip(raw.iter()) {
        *slot = v.normalized()?;
    }
    Ok(out)
}

/// Build the 12 vertices and 20 unlinked base triangles.
///
/// `make` turns three corners and a type into a triangle, which is how the
/// owning mesh hands out ids. Adjacency is left empty.
pub fn build_base_icosahedron<O, F>(
    oracle: &mut O,
    mut make: F,
) -> Result<([Vertex; BASE_VERTICES], Vec<Triangle>)>
where
    O: TypeOracle + ?Sized,
    F: FnMut([Vertex; 3], crate::FacetType) -> Result<Triangle>,
{
    let vertices = base_vertices()?;
    let triangles = FACES
        .iter()
        .map(|&[i, j, k]| make([vertices[i], vertices[j], vertices[k]], oracle.random_type()))
        .collect::<Result<Vec<_>>>()?;
    Ok((vertices, triangles))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FacetType, FixedOracle, TriangleId};

    fn base() -> Vec<Triangle> {
        let mut next = 0;
        let (_, triangles) = build_base_icosahedron(&mut FixedOracle(FacetType::Red), |v, t| {
            next += 1;
            Ok(Triangle::new(TriangleId(next), v, t))
        })
        .unwrap();
        triangles
    }

    #[test]
    fn golden_ratio_constant() {
        assert!((PHI - (1.0 + 5.0_f64.sqrt()) / 2.0).abs() < 1e-15);
    }

    #[test]
    fn vertices_on_unit_sphere() {
        for v in base_vertices().unwrap() {
            assert!(v.is_on_unit_sphere(), "{} off sphere", v);
        }
    }

    #[test]
    fn vertices_are_distinct() {
        let vs = base_vertices().unwrap();
        for i in 0..vs.len() {
            for j in (i + 1)..vs.len() {
                assert!(!vs[i].coincides(&vs[j]), "vertices {} and {} coincide", i, j);
            }
        }
    }

    #[test]
    fn twenty_equilateral_faces() {
        let triangles = base();
        assert_eq!(triangles.len(), 20);

        let edge = triangles[0].edge_lengths()[0];
        for t in &triangles {
            assert!(t.is_equilateral(1e-9));
            assert!((t.edge_lengths()[0] - edge).abs() < 1e-9);
        }
    }

    #[test]
    fn consistent_outward_winding() {
        for t in base() {
            assert!(t.faces_outward(), "face {} wound inward", t.id());
        }
    }

    #[test]
    fn every_edge_shared_by_two_faces() {
        for (f, face) in FACES.iter().enumerate() {
            for e in 0..3 {
                let (a, b) = (face[e], face[(e + 1) % 3]);
                let sharing = FACES
                    .iter()
                    .filter(|other| other.contains(&a) && other.contains(&b))
                    .count();
                assert_eq!(sharing, 2, "edge {}-{} of face {}", a, b, f);
            }
        }
    }

    #[test]
    fn each_vertex_has_degree_five() {
        for v in 0..BASE_VERTICES {
            let degree = FACES.iter().filter(|f| f.contains(&v)).count();
            assert_eq!(degree, 5, "vertex {}", v);
        }
    }
}
