//! Edge-slot adjacency from raw vertex coordinates.
//!
//! Two triangles are adjacent iff exactly two of their vertices coincide
//! within [`EPSILON`](crate::EPSILON). The shared pair of vertex indices
//! names the edge slot on each side (see [`edge_slot`](crate::edge_slot)).
//!
//! Resolution compares every pair of triangles, O(n²). The supported
//! subdivision depths keep n in the low thousands and resolution runs once
//! per subdivision step, so the quadratic pass is acceptable.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::{Triangle, TriangleId};

/// Summary of one resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdjacencyStats {
    /// Number of triangles examined.
    pub triangles: usize,
    /// Number of adjacent pairs found (each pair counted once).
    pub links: usize,
}

/// Recompute every triangle's edge slots from scratch.
///
/// Triangles sharing fewer than two vertices stay unlinked. Sharing all three
/// vertices, or two different neighbours claiming the same edge, is malformed
/// geometry and aborts the pass.
///
/// This does not require the set to be closed; call [`verify_closure`] for
/// that.
pub fn compute_adjacency(triangles: &mut [Triangle]) -> Result<AdjacencyStats> {
    for t in triangles.iter_mut() {
        t.clear_adjacents();
    }

    let mut links = 0;
    for i in 0..triangles.len() {
        for j in (i + 1)..triangles.len() {
            let (a, b) = (&triangles[i], &triangles[j]);
            let shared = a.shared_vertex_indices(b);

            match shared.len() {
                0 | 1 => continue,
                2 => {}
                n => {
                    return Err(Error::DuplicateGeometry {
                        first: a.id(),
                        second: b.id(),
                        shared: n,
                    })
                }
            }

            let back = b.shared_vertex_indices(a);
            let (Some(edge_a), Some(edge_b)) = (shared.edge(), back.edge()) else {
                return Err(Error::DuplicateGeometry {
                    first: a.id(),
                    second: b.id(),
                    shared: back.len(),
                });
            };

            let (id_a, id_b) = (a.id(), b.id());
            link(&mut triangles[i], edge_a, id_b)?;
            link(&mut triangles[j], edge_b, id_a)?;
            links += 1;
        }
    }

    debug!(triangles = triangles.len(), links, "resolved adjacency");

    Ok(AdjacencyStats {
        triangles: triangles.len(),
        links,
    })
}

fn link(triangle: &mut Triangle, edge: usize, neighbour: TriangleId) -> Result<()> {
    match triangle.adjacent(edge) {
        Some(existing) if existing != neighbour => Err(Error::EdgeConflict {
            triangle: triangle.id(),
            edge,
            existing,
            incoming: neighbour,
        }),
        _ => {
            triangle.set_adjacent(edge, Some(neighbour));
            Ok(())
        }
    }
}

/// Reject any two triangles whose three vertices coincide.
///
/// [`compute_adjacency`] catches this while linking. Triangle sets that
/// arrive already linked need the check on its own. O(n²).
pub fn verify_distinct_geometry(triangles: &[Triangle]) -> Result<()> {
    for (i, a) in triangles.iter().enumerate() {
        for b in &triangles[i + 1..] {
            let shared = a.shared_vertex_indices(b).len();
            if shared == 3 {
                return Err(Error::DuplicateGeometry {
                    first: a.id(),
                    second: b.id(),
                    shared,
                });
            }
        }
    }
    Ok(())
}

/// Check that every triangle has all three edge slots filled.
pub fn verify_closure(triangles: &[Triangle]) -> Result<()> {
    for t in triangles {
        let missing: Vec<usize> = (0..3).filter(|&e| t.adjacent(e).is_none()).collect();
        if !missing.is_empty() {
            return Err(Error::OpenMesh {
                triangle: t.id(),
                missing,
            });
        }
    }
    Ok(())
}

/// Map ids to positions, rejecting duplicates.
pub fn index_by_id(triangles: &[Triangle]) -> Result<HashMap<TriangleId, usize>> {
    let mut index = HashMap::with_capacity(triangles.len());
    for (pos, t) in triangles.iter().enumerate() {
        if index.insert(t.id(), pos).is_some() {
            return Err(Error::DuplicateId(t.id()));
        }
    }
    Ok(index)
}

/// Check that every link points at a known triangle that links back.
///
/// Also rejects a neighbour appearing in more than one slot.
pub fn verify_reciprocity(triangles: &[Triangle]) -> Result<()> {
    let index = index_by_id(triangles)?;

    for t in triangles {
        let mut seen: Vec<TriangleId> = Vec::with_capacity(3);
        for (edge, neighbour) in t.adjacents().iter().enumerate() {
            let Some(neighbour) = *neighbour else { continue };

            if seen.contains(&neighbour) {
                return Err(Error::EdgeConflict {
                    triangle: t.id(),
                    edge,
                    existing: neighbour,
                    incoming: neighbour,
                });
            }
            seen.push(neighbour);

            let other = index
                .get(&neighbour)
                .map(|&pos| &triangles[pos])
                .ok_or(Error::UnknownTriangle(neighbour))?;

            if other.edge_towards(t.id()).is_none() {
                return Err(Error::OneSidedAdjacency {
                    from: t.id(),
                    to: neighbour,
                });
            }
        }
    }
    Ok(())
}
