//! The icosahedron arena.
//!
//! [`Icosahedron`] owns every triangle in insertion order plus an id index.
//! Adjacency inside the triangles is id-based, so the arena is the only
//! owner and there are no reference cycles to break.
//!
//! The mesh is not thread-safe and holds no locks. One logical turn (type
//! mutation, detection, re-randomization) must finish before the next one
//! starts; serializing turns is the caller's job.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::adjacency::{
    compute_adjacency, index_by_id, verify_closure, verify_distinct_geometry, verify_reciprocity,
};
use crate::base::build_base_icosahedron;
use crate::error::{Error, Result};
use crate::subdivide::{IdCounter, Subdivision};
use crate::{FacetType, Triangle, TriangleId, TypeOracle, Vertex, EPSILON};

/// Listener invoked with snapshots of the triangles whose type changed.
pub type TrianglesChanged = Box<dyn FnMut(&[Triangle])>;

/// A triangle usable as a scale reference by renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceTriangle {
    pub id: TriangleId,
    /// False when no equilateral triangle exists and an arbitrary one was picked.
    pub equilateral: bool,
}

/// A closed triangle mesh on the unit sphere.
pub struct Icosahedron {
    triangles: Vec<Triangle>,
    index: HashMap<TriangleId, usize>,
    ids: IdCounter,
    on_triangles_changed: Option<TrianglesChanged>,
}

impl Icosahedron {
    /// The 20-face base solid, linked and closure-checked.
    pub fn new<O>(oracle: &mut O) -> Result<Self>
    where
        O: TypeOracle + ?Sized,
    {
        let mut ids = IdCounter::new();
        let (_, mut triangles) =
            build_base_icosahedron(oracle, |v, t| Ok(Triangle::new(ids.allocate()?, v, t)))?;

        compute_adjacency(&mut triangles)?;
        verify_closure(&triangles)?;
        let index = index_by_id(&triangles)?;

        debug!(triangles = triangles.len(), "built base icosahedron");

        Ok(Self {
            triangles,
            index,
            ids,
            on_triangles_changed: None,
        })
    }

    /// Base solid refined `levels` times with [`Subdivision::OneToFour`].
    pub fn with_subdivisions<O>(levels: u32, oracle: &mut O) -> Result<Self>
    where
        O: TypeOracle + ?Sized,
    {
        let mut mesh = Self::new(oracle)?;
        for _ in 0..levels {
            mesh.subdivide(Subdivision::OneToFour, oracle)?;
        }
        Ok(mesh)
    }

    /// Rebuild a mesh whose adjacency is already encoded in the triangles.
    ///
    /// Ids must be distinct, no two triangles may share all three vertices,
    /// and every link must be mirrored. The id counter resumes after the
    /// largest id, or at `next_id` if that is later.
    pub fn from_parts(triangles: Vec<Triangle>, next_id: Option<TriangleId>) -> Result<Self> {
        let index = index_by_id(&triangles)?;
        verify_distinct_geometry(&triangles)?;
        verify_reciprocity(&triangles)?;

        let last = triangles.iter().map(|t| t.id().value()).max().unwrap_or(0);
        let ids = match next_id {
            Some(next) if next.value() > last => IdCounter::starting_after(next.value() - 1)?,
            _ => IdCounter::starting_after(last)?,
        };

        Ok(Self {
            triangles,
            index,
            ids,
            on_triangles_changed: None,
        })
    }

    /// Link an arbitrary triangle set by geometry. Closure is not required.
    pub fn from_triangles(mut triangles: Vec<Triangle>) -> Result<Self> {
        compute_adjacency(&mut triangles)?;
        Self::from_parts(triangles, None)
    }

    /// Replace every triangle by its children and relink the whole set.
    ///
    /// On error the mesh keeps its previous triangles; ids handed out to the
    /// discarded children are not reused.
    pub fn subdivide<O>(&mut self, strategy: Subdivision, oracle: &mut O) -> Result<()>
    where
        O: TypeOracle + ?Sized,
    {
        let mut children = strategy.subdivide(&self.triangles, &mut self.ids, oracle)?;
        compute_adjacency(&mut children)?;
        verify_closure(&children)?;

        self.index = index_by_id(&children)?;
        self.triangles = children;
        Ok(())
    }

    /// All triangles in insertion order.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn ids(&self) -> impl Iterator<Item = TriangleId> + '_ {
        self.triangles.iter().map(|t| t.id())
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// The id the next created triangle will receive.
    pub fn next_triangle_id(&self) -> TriangleId {
        self.ids.peek()
    }

    pub fn get(&self, id: TriangleId) -> Option<&Triangle> {
        self.index.get(&id).map(|&pos| &self.triangles[pos])
    }

    pub fn try_get(&self, id: TriangleId) -> Result<&Triangle> {
        self.get(id).ok_or(Error::UnknownTriangle(id))
    }

    pub fn contains(&self, id: TriangleId) -> bool {
        self.index.contains_key(&id)
    }

    /// The triangle across edge slot `edge` of `id`.
    pub fn neighbour(&self, id: TriangleId, edge: usize) -> Option<&Triangle> {
        self.get(id)?.adjacent(edge).and_then(|n| self.get(n))
    }

    pub fn are_adjacent(&self, a: TriangleId, b: TriangleId) -> bool {
        self.get(a).is_some_and(|t| t.edge_towards(b).is_some())
    }

    /// Change one facet's type, returning the previous one.
    ///
    /// This does not notify the listener; batches are reported by the caller
    /// through [`Icosahedron::notify_triangles_changed`].
    pub fn set_type(&mut self, id: TriangleId, facet_type: FacetType) -> Result<FacetType> {
        let pos = *self.index.get(&id).ok_or(Error::UnknownTriangle(id))?;
        let t = &mut self.triangles[pos];
        let previous = t.facet_type();
        t.set_facet_type(facet_type);
        Ok(previous)
    }

    /// True when every triangle has three neighbours.
    pub fn is_closed(&self) -> bool {
        self.triangles.iter().all(|t| t.neighbour_count() == 3)
    }

    /// Closure and reciprocity together.
    pub fn verify(&self) -> Result<()> {
        verify_closure(&self.triangles)?;
        verify_reciprocity(&self.triangles)
    }

    /// Distinct vertex positions (12, 42, 162, ... for closed meshes).
    pub fn vertex_count(&self) -> usize {
        let mut unique: Vec<Vertex> = Vec::new();
        for v in self.triangles.iter().flat_map(|t| t.vertices().iter()) {
            if !unique.iter().any(|u| u.coincides(v)) {
                unique.push(*v);
            }
        }
        unique.len()
    }

    /// First equilateral triangle, for renderers that need a scale reference.
    ///
    /// Falls back to the first triangle with a warning when none qualifies.
    /// Returns `None` only for an empty mesh.
    pub fn reference_triangle(&self) -> Option<ReferenceTriangle> {
        if let Some(t) = self.triangles.iter().find(|t| t.is_equilateral(EPSILON)) {
            return Some(ReferenceTriangle {
                id: t.id(),
                equilateral: true,
            });
        }

        let fallback = self.triangles.first()?;
        warn!(
            triangle = %fallback.id(),
            "no equilateral reference triangle, falling back to first triangle"
        );
        Some(ReferenceTriangle {
            id: fallback.id(),
            equilateral: false,
        })
    }

    /// Register the single "triangles changed" listener, replacing any
    /// previous one. Only one listener is supported at a time.
    pub fn set_on_triangles_changed<F>(&mut self, listener: F)
    where
        F: FnMut(&[Triangle]) + 'static,
    {
        self.on_triangles_changed = Some(Box::new(listener));
    }

    /// Remove the listener, returning it.
    pub fn clear_on_triangles_changed(&mut self) -> Option<TrianglesChanged> {
        self.on_triangles_changed.take()
    }

    pub fn has_listener(&self) -> bool {
        self.on_triangles_changed.is_some()
    }

    /// Hand snapshots of `changed` to the listener, once. Unknown ids are
    /// skipped. Does nothing without a listener or with an empty batch.
    pub fn notify_triangles_changed(&mut self, changed: &[TriangleId]) {
        let Some(listener) = self.on_triangles_changed.as_mut() else {
            return;
        };
        let snapshots: Vec<Triangle> = changed
            .iter()
            .filter_map(|id| self.index.get(id).map(|&pos| self.triangles[pos].clone()))
            .collect();
        if snapshots.is_empty() {
            return;
        }
        listener(&snapshots);
    }
}

impl std::fmt::Debug for Icosahedron {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Icosahedron")
            .field("triangles", &self.triangles.len())
            .field("next_id", &self.ids.peek())
            .field("has_listener", &self.on_triangles_changed.is_some())
            .finish()
    }
}
