//! Hexagon detection.
//!
//! A hexagon is six triangles of one type forming the complete ring around a
//! shared vertex. Detection starts from one triangle and looks at each of its
//! three corners in turn, so a seed yields at most three hexagons.
//!
//! # Walk
//!
//! For corner `v` of seed `tr`:
//!
//! 1. Take the two neighbours across the edges meeting at `v` (`adj_a`,
//!    `adj_b`). Both must exist and share `tr`'s type.
//! 2. From each of them, step to a neighbour `x` of the same type that is
//!    not `tr` and touches `v`.
//! 3. From `x`, step once more to a `y` of the same type that is not the
//!    triangle we came from and touches `v`.
//! 4. Six distinct triangles collected means the ring is complete.
//!
//! The walk is bounded: two branches of at most two steps. Where the branches
//! meet, id checks keep a triangle from being counted twice. The 12 original
//! corners have five triangles around them and never complete a hexagon.
//!
//! Missing neighbours simply mean "no hexagon here"; detection never fails
//! and never mutates the mesh.

use std::collections::BTreeSet;

use icoboard_topology::{edges_at_vertex, FacetType, Icosahedron, Triangle, TriangleId, Vertex};

/// Triangles around one vertex.
pub const HEXAGON_SIZE: usize = 6;

/// Six same-type triangles around a shared vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Hexagon {
    centre: Vertex,
    facet_type: FacetType,
    triangles: [TriangleId; HEXAGON_SIZE],
}

impl Hexagon {
    /// The shared vertex.
    pub fn centre(&self) -> Vertex {
        self.centre
    }

    pub fn facet_type(&self) -> FacetType {
        self.facet_type
    }

    /// Members in discovery order: seed, both first neighbours, then the walk.
    pub fn triangles(&self) -> &[TriangleId; HEXAGON_SIZE] {
        &self.triangles
    }

    pub fn ids(&self) -> impl Iterator<Item = TriangleId> + '_ {
        self.triangles.iter().copied()
    }

    pub fn contains(&self, id: TriangleId) -> bool {
        self.triangles.contains(&id)
    }

    /// Sorted member ids; equal for the same ring found from different seeds.
    pub fn key(&self) -> [TriangleId; HEXAGON_SIZE] {
        let mut key = self.triangles;
        key.sort();
        key
    }
}

/// Hexagons through the corners of `seed`, in corner order.
///
/// An unknown seed yields nothing.
pub fn find_hexagons(mesh: &Icosahedron, seed: TriangleId) -> Vec<Hexagon> {
    let Some(tr) = mesh.get(seed) else {
        return Vec::new();
    };

    (0..3)
        .filter_map(|corner| hexagon_at(mesh, tr, corner))
        .collect()
}

/// Distinct hexagons reachable from any of `seeds`, in discovery order.
pub fn find_hexagons_from<I>(mesh: &Icosahedron, seeds: I) -> Vec<Hexagon>
where
    I: IntoIterator<Item = TriangleId>,
{
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for seed in seeds {
        for hexagon in find_hexagons(mesh, seed) {
            if seen.insert(hexagon.key()) {
                out.push(hexagon);
            }
        }
    }
    out
}

/// Every distinct hexagon on the board.
pub fn find_all_hexagons(mesh: &Icosahedron) -> Vec<Hexagon> {
    find_hexagons_from(mesh, mesh.ids())
}

fn hexagon_at(mesh: &Icosahedron, tr: &Triangle, corner: usize) -> Option<Hexagon> {
    let centre = tr.vertex(corner);
    let facet_type = tr.facet_type();
    let [edge_a, edge_b] = edges_at_vertex(corner);

    let adj_a = mesh.neighbour(tr.id(), edge_a)?;
    let adj_b = mesh.neighbour(tr.id(), edge_b)?;
    if adj_a.facet_type() != facet_type || adj_b.facet_type() != facet_type {
        return None;
    }

    let mut shape: Vec<TriangleId> = Vec::with_capacity(HEXAGON_SIZE + 1);
    for id in [tr.id(), adj_a.id(), adj_b.id()] {
        push_unique(&mut shape, id);
    }

    for branch in [adj_a, adj_b] {
        let Some(x) = step(mesh, branch, facet_type, tr.id(), &centre) else {
            continue;
        };
        push_unique(&mut shape, x.id());

        if let Some(y) = step(mesh, x, facet_type, branch.id(), &centre) {
            push_unique(&mut shape, y.id());
        }
    }

    let triangles: [TriangleId; HEXAGON_SIZE] = shape.try_into().ok()?;
    Some(Hexagon {
        centre,
        facet_type,
        triangles,
    })
}

/// First neighbour of `from` (edge slot order) of the given type that is not
/// `came_from` and touches `centre`.
fn step<'a>(
    mesh: &'a Icosahedron,
    from: &Triangle,
    facet_type: FacetType,
    came_from: TriangleId,
    centre: &Vertex,
) -> Option<&'a Triangle> {
    from.neighbours()
        .filter_map(|id| mesh.get(id))
        .find(|x| x.facet_type() == facet_type && x.id() != came_from && x.touches(centre))
}

fn push_unique(shape: &mut Vec<TriangleId>, id: TriangleId) {
    if !shape.contains(&id) {
        shape.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{corner_vertex, interior_vertex, level_one, paint, ring_around, sorted};
    use icoboard_topology::FixedOracle;

    #[test]
    fn painted_ring_is_found_from_every_member() {
        let mut mesh = level_one(FacetType::Green);
        let centre = interior_vertex(&mesh);
        let ring = ring_around(&mesh, &centre);
        assert_eq!(ring.len(), 6);
        paint(&mut mesh, &ring, FacetType::Red);

        for &seed in &ring {
            let found = find_hexagons(&mesh, seed);
            assert_eq!(found.len(), 1, "seed {}", seed);

            let hexagon = &found[0];
            assert_eq!(sorted(hexagon.triangles().to_vec()), sorted(ring.clone()));
            assert_eq!(hexagon.triangles()[0], seed);
            assert_eq!(hexagon.facet_type(), FacetType::Red);
            assert!(hexagon.centre().coincides(&centre));
        }
    }

    #[test]
    fn members_are_distinct_and_touch_centre() {
        let mut mesh = level_one(FacetType::Green);
        let centre = interior_vertex(&mesh);
        let ring = ring_around(&mesh, &centre);
        paint(&mut mesh, &ring, FacetType::Blue);

        let hexagon = find_hexagons(&mesh, ring[0]).remove(0);
        let distinct: BTreeSet<_> = hexagon.triangles().iter().collect();
        assert_eq!(distinct.len(), HEXAGON_SIZE);
        for id in hexagon.triangles() {
            let t = mesh.get(*id).unwrap();
            assert!(t.touches(&hexagon.centre()));
            assert_eq!(t.facet_type(), FacetType::Blue);
        }
    }

    #[test]
    fn original_corners_never_form_hexagons() {
        let mut mesh = level_one(FacetType::Green);
        let corner = corner_vertex(&mesh);
        let ring = ring_around(&mesh, &corner);
        assert_eq!(ring.len(), 5);
        paint(&mut mesh, &ring, FacetType::Red);

        for &seed in &ring {
            assert!(find_hexagons(&mesh, seed).is_empty(), "seed {}", seed);
        }
    }

    #[test]
    fn uniform_base_solid_has_no_hexagons() {
        let mesh = Icosahedron::new(&mut FixedOracle(FacetType::Red)).unwrap();
        assert!(find_all_hexagons(&mesh).is_empty());
    }

    #[test]
    fn uniform_level_one_has_one_hexagon_per_interior_vertex() {
        let mesh = level_one(FacetType::Purple);
        // 42 vertices, 12 of them original corners.
        assert_eq!(find_all_hexagons(&mesh).len(), 30);
    }

    #[test]
    fn one_odd_member_breaks_the_ring() {
        let mut mesh = level_one(FacetType::Green);
        let centre = interior_vertex(&mesh);
        let ring = ring_around(&mesh, &centre);
        paint(&mut mesh, &ring, FacetType::Red);
        mesh.set_type(ring[3], FacetType::Yellow).unwrap();

        for &seed in &ring {
            assert!(find_hexagons(&mesh, seed).is_empty(), "seed {}", seed);
        }
    }

    #[test]
    fn ring_with_a_hole_is_not_a_hexagon() {
        let full = level_one(FacetType::Red);
        let centre = interior_vertex(&full);
        let ring = ring_around(&full, &centre);

        let partial: Vec<Triangle> = ring[1..]
            .iter()
            .map(|id| full.get(*id).unwrap().clone())
            .collect();
        let mesh = Icosahedron::from_triangles(partial).unwrap();

        for &seed in &ring[1..] {
            assert!(find_hexagons(&mesh, seed).is_empty());
        }
    }

    #[test]
    fn isolated_ring_is_still_a_hexagon() {
        let full = level_one(FacetType::Red);
        let centre = interior_vertex(&full);
        let ring = ring_around(&full, &centre);

        let only_ring: Vec<Triangle> = ring.iter().map(|id| full.get(*id).unwrap().clone()).collect();
        let mesh = Icosahedron::from_triangles(only_ring).unwrap();

        assert_eq!(find_all_hexagons(&mesh).len(), 1);
    }

    #[test]
    fn unknown_seed_finds_nothing() {
        let mesh = level_one(FacetType::Red);
        assert!(find_hexagons(&mesh, TriangleId(9_999)).is_empty());
    }

    #[test]
    fn seeds_converging_on_one_ring_report_it_once() {
        let mut mesh = level_one(FacetType::Green);
        let centre = interior_vertex(&mesh);
        let ring = ring_around(&mesh, &centre);
        paint(&mut mesh, &ring, FacetType::Orange);

        let found = find_hexagons_from(&mesh, ring.iter().copied());
        assert_eq!(found.len(), 1);
    }
}
