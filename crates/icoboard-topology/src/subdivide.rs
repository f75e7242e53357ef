//! Subdivision strategies.
//!
//! The strategy set is closed, so it is an enum rather than a trait object.
//! A strategy only produces child triangles. It never links them: midpoints
//! of a shared edge are computed independently by both parents, and only a
//! global adjacency pass can match them up.

use tracing::debug;

use crate::error::{Error, Result};
use crate::{Triangle, TriangleId, TypeOracle, Vertex, CHILDREN_PER_SPLIT};

/// Monotonic triangle id source. Starts at 1 and never hands out an id twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdCounter {
    next: u64,
}

impl IdCounter {
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Resume after the given id. Fails if `last` is the largest id.
    pub fn starting_after(last: u64) -> Result<Self> {
        let next = last
            .checked_add(1)
            .ok_or(Error::IdSpaceExhausted { last })?;
        Ok(Self { next })
    }

    /// The id the next call to [`IdCounter::allocate`] will return.
    pub const fn peek(&self) -> TriangleId {
        TriangleId(self.next)
    }

    pub fn allocate(&mut self) -> Result<TriangleId> {
        let id = TriangleId(self.next);
        self.next = self
            .next
            .checked_add(1)
            .ok_or(Error::IdSpaceExhausted { last: self.next })?;
        Ok(id)
    }
}

impl Default for IdCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// How a triangle is refined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Subdivision {
    /// Split every edge at its (sphere-projected) midpoint: one triangle
    /// becomes three corner triangles plus the central one.
    #[default]
    OneToFour,
}

impl Subdivision {
    /// Children produced per input triangle.
    pub const fn children_per_triangle(&self) -> usize {
        match self {
            Self::OneToFour => CHILDREN_PER_SPLIT,
        }
    }

    /// Refine every triangle. Children carry fresh ids and fresh types and
    /// have no adjacency.
    pub fn subdivide<O>(
        &self,
        triangles: &[Triangle],
        ids: &mut IdCounter,
        oracle: &mut O,
    ) -> Result<Vec<Triangle>>
    where
        O: TypeOracle + ?Sized,
    {
        let mut out = Vec::with_capacity(triangles.len() * self.children_per_triangle());
        for t in triangles {
            match self {
                Self::OneToFour => split_one_to_four(t, ids, oracle, &mut out)?,
            }
        }

        debug!(
            strategy = ?self,
            parents = triangles.len(),
            children = out.len(),
            "subdivided"
        );
        Ok(out)
    }
}

fn split_one_to_four<O>(
    parent: &Triangle,
    ids: &mut IdCounter,
    oracle: &mut O,
    out: &mut Vec<Triangle>,
) -> Result<()>
where
    O: TypeOracle + ?Sized,
{
    let [p1, p2, p3] = *parent.vertices();
    let m12 = p1.midpoint_on_sphere(&p2)?;
    let m23 = p2.midpoint_on_sphere(&p3)?;
    let m31 = p3.midpoint_on_sphere(&p1)?;

    // Same winding as the parent.
    let children: [[Vertex; 3]; 4] = [
        [p1, m12, m31],
        [m12, p2, m23],
        [m31, m23, p3],
        [m12, m23, m31],
    ];

    for vertices in children {
        out.push(Triangle::new(ids.allocate()?, vertices, oracle.random_type()));
    }
    Ok(())
}
