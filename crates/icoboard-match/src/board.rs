//! Turns on a board: swap two neighbours, clear hexagons, refill.
//!
//! A turn runs to completion before the next one starts:
//!
//! 1. The swapped pair (or every triangle, when settling) seeds detection.
//! 2. All hexagons found form one batch; their distinct members get fresh
//!    types from the oracle.
//! 3. The listener on the mesh fires once with that batch.
//! 4. The re-typed triangles seed the next round.
//!
//! Fresh types can complete new hexagons, so the loop is bounded by
//! [`BoardConfig::max_cascade_rounds`].

use icoboard_topology::{Icosahedron, TriangleId, TypeOracle};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::hexagon::{find_hexagons_from, Hexagon};

/// Default bound on match rounds per turn.
pub const DEFAULT_MAX_CASCADE_ROUNDS: usize = 8;

/// Board tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    /// Match batches a single turn may resolve before giving up
    pub max_cascade_rounds: usize,
}

impl BoardConfig {
    pub fn with_max_cascade_rounds(mut self, rounds: usize) -> Self {
        self.max_cascade_rounds = rounds;
        self
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            max_cascade_rounds: DEFAULT_MAX_CASCADE_ROUNDS,
        }
    }
}

/// Hexagons cleared together in one round.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchBatch {
    /// Distinct hexagons found this round
    pub hexagons: Vec<Hexagon>,
    /// Every re-typed triangle, each once, in discovery order
    pub changed: Vec<TriangleId>,
}

/// What a turn did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnOutcome {
    /// One entry per round that found hexagons
    pub batches: Vec<MatchBatch>,
    /// The round limit was hit while hexagons remained
    pub exhausted: bool,
}

impl TurnOutcome {
    pub fn is_quiet(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn total_hexagons(&self) -> usize {
        self.batches.iter().map(|b| b.hexagons.len()).sum()
    }

    /// Re-typed triangles across all rounds; a triangle may appear more
    /// than once if it matched in several rounds.
    pub fn changed_ids(&self) -> impl Iterator<Item = TriangleId> + '_ {
        self.batches.iter().flat_map(|b| b.changed.iter().copied())
    }
}

/// A mesh, the oracle that refills it, and the turn rules.
#[derive(Debug)]
pub struct Board<O> {
    mesh: Icosahedron,
    oracle: O,
    config: BoardConfig,
}

impl<O: TypeOracle> Board<O> {
    pub fn new(mesh: Icosahedron, oracle: O) -> Self {
        Self::with_config(mesh, oracle, BoardConfig::default())
    }

    pub fn with_config(mesh: Icosahedron, oracle: O, config: BoardConfig) -> Self {
        Self {
            mesh,
            oracle,
            config,
        }
    }

    pub fn mesh(&self) -> &Icosahedron {
        &self.mesh
    }

    /// Direct access, e.g. to register a listener.
    pub fn mesh_mut(&mut self) -> &mut Icosahedron {
        &mut self.mesh
    }

    pub fn into_mesh(self) -> Icosahedron {
        self.mesh
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Exchange the types of two edge neighbours and resolve any matches.
    ///
    /// The swap itself does not notify the listener; only match batches do.
    pub fn swap(&mut self, a: TriangleId, b: TriangleId) -> Result<TurnOutcome> {
        let type_a = self.mesh.get(a).ok_or(Error::UnknownTriangle(a))?.facet_type();
        let type_b = self.mesh.get(b).ok_or(Error::UnknownTriangle(b))?.facet_type();
        if a == b || !self.mesh.are_adjacent(a, b) {
            return Err(Error::NotAdjacent { a, b });
        }

        self.mesh.set_type(a, type_b)?;
        self.mesh.set_type(b, type_a)?;
        debug!(%a, %b, from = %type_a, to = %type_b, "Swapped facet types");

        self.resolve(vec![a, b])
    }

    /// Clear every hexagon already on the board, e.g. after generation.
    pub fn settle(&mut self) -> Result<TurnOutcome> {
        let seeds = self.mesh.ids().collect();
        self.resolve(seeds)
    }

    fn resolve(&mut self, mut seeds: Vec<TriangleId>) -> Result<TurnOutcome> {
        let mut outcome = TurnOutcome::default();

        loop {
            let hexagons = find_hexagons_from(&self.mesh, seeds.iter().copied());
            if hexagons.is_empty() {
                return Ok(outcome);
            }
            if outcome.batches.len() >= self.config.max_cascade_rounds {
                warn!(
                    rounds = outcome.batches.len(),
                    pending = hexagons.len(),
                    "Cascade limit reached, leaving hexagons on the board"
                );
                outcome.exhausted = true;
                return Ok(outcome);
            }

            let changed = distinct_members(&hexagons);
            for id in &changed {
                let fresh = self.oracle.random_type();
                self.mesh.set_type(*id, fresh)?;
            }
            self.mesh.notify_triangles_changed(&changed);

            debug!(
                round = outcome.batches.len() + 1,
                hexagons = hexagons.len(),
                changed = changed.len(),
                "Cleared match batch"
            );

            seeds = changed.clone();
            outcome.batches.push(MatchBatch { hexagons, changed });
        }
    }
}

fn distinct_members(hexagons: &[Hexagon]) -> Vec<TriangleId> {
    let mut out: Vec<TriangleId> = Vec::with_capacity(hexagons.len() * 6);
    for id in hexagons.iter().flat_map(Hexagon::ids) {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{interior_vertex, level_one, paint, ring_around, sorted};
    use crate::hexagon::find_all_hexagons;
    use icoboard_topology::{CycleOracle, FacetType, FixedOracle, RandomOracle, Triangle};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// A Red ring with one Blue gap `r`, and a Red triangle `o` across the
    /// edge of `r` facing away from the centre. Swapping `r` and `o`
    /// completes the ring.
    fn almost_ring() -> (Icosahedron, Vec<TriangleId>, TriangleId, TriangleId) {
        let mut mesh = level_one(FacetType::Green);
        let centre = interior_vertex(&mesh);
        let ring = ring_around(&mesh, &centre);
        paint(&mut mesh, &ring, FacetType::Red);

        let r = ring[2];
        mesh.set_type(r, FacetType::Blue).unwrap();

        let corner = mesh.get(r).unwrap().vertex_index(&centre).unwrap();
        let o = mesh.neighbour(r, (corner + 1) % 3).unwrap().id();
        assert!(!ring.contains(&o));
        mesh.set_type(o, FacetType::Red).unwrap();

        (mesh, ring, r, o)
    }

    #[test]
    fn swap_completing_a_ring_clears_it_once() {
        let (mesh, ring, r, o) = almost_ring();
        let mut board = Board::new(mesh, CycleOracle::new());

        let calls: Rc<RefCell<Vec<Vec<TriangleId>>>> = Rc::default();
        let sink = Rc::clone(&calls);
        board
            .mesh_mut()
            .set_on_triangles_changed(move |changed: &[Triangle]| {
                sink.borrow_mut().push(changed.iter().map(Triangle::id).collect());
            });

        let outcome = board.swap(r, o).unwrap();

        assert!(!outcome.exhausted);
        assert_eq!(outcome.batches.len(), 1);
        assert_eq!(outcome.total_hexagons(), 1);

        let batch = &outcome.batches[0];
        assert_eq!(sorted(batch.changed.clone()), sorted(ring.clone()));
        assert_eq!(board.mesh().get(o).unwrap().facet_type(), FacetType::Blue);

        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(sorted(calls[0].clone()), sorted(ring.clone()));
    }

    #[test]
    fn refilled_ring_gets_oracle_types() {
        let (mesh, ring, r, o) = almost_ring();
        let mut board = Board::new(mesh, CycleOracle::new());
        board.swap(r, o).unwrap();

        let mut types: Vec<FacetType> = ring
            .iter()
            .map(|id| board.mesh().get(*id).unwrap().facet_type())
            .collect();
        types.sort_by_key(|t| t.index());
        assert_eq!(types, FacetType::ALL.to_vec());
    }

    #[test]
    fn swap_without_match_is_quiet() {
        let (mesh, ring, r, _) = almost_ring();
        let corner = mesh.get(r).unwrap().vertex_index(&interior_vertex(&mesh)).unwrap();
        let inside = mesh.neighbour(r, corner).unwrap().id();
        assert!(ring.contains(&inside));

        let mut board = Board::new(mesh, FixedOracle(FacetType::Yellow));
        let outcome = board.swap(r, inside).unwrap();

        assert!(outcome.is_quiet());
        assert!(!outcome.exhausted);
        assert_eq!(board.mesh().get(r).unwrap().facet_type(), FacetType::Red);
        assert_eq!(board.mesh().get(inside).unwrap().facet_type(), FacetType::Blue);
    }

    #[test]
    fn swap_rejects_non_neighbours() {
        let mesh = level_one(FacetType::Green);
        let centre = interior_vertex(&mesh);
        let ring = ring_around(&mesh, &centre);
        let first = mesh.get(ring[0]).unwrap().clone();
        let stranger = mesh
            .ids()
            .find(|id| *id != first.id() && first.edge_towards(*id).is_none())
            .unwrap();

        let mut board = Board::new(mesh, FixedOracle(FacetType::Red));
        assert_eq!(
            board.swap(first.id(), stranger),
            Err(Error::NotAdjacent {
                a: first.id(),
                b: stranger
            })
        );
        assert!(matches!(
            board.swap(first.id(), first.id()),
            Err(Error::NotAdjacent { .. })
        ));
    }

    #[test]
    fn swap_rejects_unknown_ids() {
        let mesh = level_one(FacetType::Green);
        let known = mesh.triangles()[0].id();
        let mut board = Board::new(mesh, FixedOracle(FacetType::Red));

        assert_eq!(
            board.swap(known, TriangleId(10_000)),
            Err(Error::UnknownTriangle(TriangleId(10_000)))
        );
    }

    #[test]
    fn failed_swap_leaves_types_alone() {
        let (mesh, _, r, _) = almost_ring();
        let before: Vec<FacetType> = mesh.triangles().iter().map(Triangle::facet_type).collect();
        let first = mesh.get(r).unwrap().clone();
        let stranger = mesh
            .ids()
            .find(|id| *id != r && first.edge_towards(*id).is_none())
            .unwrap();

        let mut board = Board::new(mesh, FixedOracle(FacetType::Red));
        assert!(board.swap(r, stranger).is_err());

        let after: Vec<FacetType> = board
            .mesh()
            .triangles()
            .iter()
            .map(Triangle::facet_type)
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn settle_clears_a_uniform_board() {
        let mesh = level_one(FacetType::Purple);
        let mut board = Board::new(mesh, CycleOracle::new());

        let outcome = board.settle().unwrap();
        assert!(!outcome.is_quiet());
        assert_eq!(outcome.batches[0].hexagons.len(), 30);
        if !outcome.exhausted {
            assert!(find_all_hexagons(board.mesh()).is_empty());
        }
    }

    #[test]
    fn cascade_limit_stops_a_fixed_oracle() {
        // Refilling with the same type recreates every ring forever.
        let mesh = level_one(FacetType::Red);
        let config = BoardConfig::default().with_max_cascade_rounds(3);
        let mut board = Board::with_config(mesh, FixedOracle(FacetType::Red), config);

        let outcome = board.settle().unwrap();
        assert!(outcome.exhausted);
        assert_eq!(outcome.batches.len(), 3);
    }

    #[test]
    fn zero_rounds_only_detects() {
        let mesh = level_one(FacetType::Red);
        let config = BoardConfig::default().with_max_cascade_rounds(0);
        let mut board = Board::with_config(mesh, FixedOracle(FacetType::Blue), config);

        let outcome = board.settle().unwrap();
        assert!(outcome.exhausted);
        assert!(outcome.is_quiet());
        assert!(board
            .mesh()
            .triangles()
            .iter()
            .all(|t| t.facet_type() == FacetType::Red));
    }

    #[test]
    fn settle_on_random_board_is_deterministic() {
        let build = || {
            let mesh = Icosahedron::with_subdivisions(1, &mut RandomOracle::seeded(7)).unwrap();
            let mut board = Board::new(mesh, RandomOracle::seeded(8));
            let outcome = board.settle().unwrap();
            let types: Vec<FacetType> = board
                .mesh()
                .triangles()
                .iter()
                .map(Triangle::facet_type)
                .collect();
            (outcome, types)
        };
        assert_eq!(build(), build());
    }
}
