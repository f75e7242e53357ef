//! Mesh <-> document conversion and JSON files.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use icoboard_topology::{Error as TopologyError, FacetType, Icosahedron, Triangle, TriangleId};
use tracing::{debug, warn};

use crate::document::{AdjacentRecord, GraphDocument, TriangleRecord, CURRENT_VERSION};
use crate::error::{Error, Result};

/// Something odd about a document that did not stop it from loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
    /// Written by a different format version; read as-is.
    VersionMismatch { found: String, expected: String },
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VersionMismatch { found, expected } => {
                write!(f, "document version {} differs from {}", found, expected)
            }
        }
    }
}

/// A rebuilt mesh and any warnings raised on the way.
#[derive(Debug)]
pub struct Decoded {
    pub icosahedron: Icosahedron,
    pub warnings: Vec<DecodeWarning>,
}

impl Decoded {
    pub fn version_mismatch(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, DecodeWarning::VersionMismatch { .. }))
    }

    pub fn into_icosahedron(self) -> Icosahedron {
        self.icosahedron
    }
}

/// Snapshot a mesh in arena order.
pub fn encode(mesh: &Icosahedron) -> GraphDocument {
    let triangles = mesh
        .triangles()
        .iter()
        .map(|t| TriangleRecord {
            triangle_id: t.id(),
            facet_type: t.facet_type().code(),
            vertices: *t.vertices(),
            adjacents: t
                .neighbours()
                .map(|triangle_id| AdjacentRecord { triangle_id })
                .collect(),
        })
        .collect();

    GraphDocument {
        json_serializer_version: CURRENT_VERSION.to_string(),
        triangles,
    }
}

/// Rebuild a mesh from a document.
///
/// Edge slots are recomputed from shared vertices rather than taken from
/// list position, so a record listing fewer than three neighbours still puts
/// each one on the right edge. A version other than [`CURRENT_VERSION`] is
/// reported as a warning only.
pub fn decode(doc: GraphDocument) -> Result<Decoded> {
    let mut warnings = Vec::new();
    if !doc.is_current() {
        warn!(
            found = %doc.json_serializer_version,
            expected = CURRENT_VERSION,
            "Graph document version mismatch, reading as-is"
        );
        warnings.push(DecodeWarning::VersionMismatch {
            found: doc.json_serializer_version.clone(),
            expected: CURRENT_VERSION.to_string(),
        });
    }

    let mut positions: HashMap<TriangleId, usize> = HashMap::with_capacity(doc.triangles.len());
    let mut bare = Vec::with_capacity(doc.triangles.len());
    for (pos, record) in doc.triangles.iter().enumerate() {
        let facet_type = FacetType::from_code(record.facet_type)
            .ok_or(Error::UnknownType(record.facet_type))?;
        if positions.insert(record.triangle_id, pos).is_some() {
            return Err(Error::DuplicateTriangle(record.triangle_id));
        }
        bare.push(Triangle::new(record.triangle_id, record.vertices, facet_type));
    }

    let mut triangles = Vec::with_capacity(bare.len());
    for (record, triangle) in doc.triangles.iter().zip(&bare) {
        let slots = link_slots(triangle, &record.adjacents, &positions, &bare)?;
        triangles.push(triangle.clone().with_adjacents(slots));
    }

    let icosahedron = Icosahedron::from_parts(triangles, None)?;
    debug!(
        triangles = icosahedron.len(),
        next_id = %icosahedron.next_triangle_id(),
        "Decoded graph document"
    );

    Ok(Decoded {
        icosahedron,
        warnings,
    })
}

fn link_slots(
    triangle: &Triangle,
    adjacents: &[AdjacentRecord],
    positions: &HashMap<TriangleId, usize>,
    bare: &[Triangle],
) -> Result<[Option<TriangleId>; 3]> {
    let mut slots = [None; 3];

    for adjacent in adjacents {
        let other = positions
            .get(&adjacent.triangle_id)
            .map(|&pos| &bare[pos])
            .ok_or(Error::DanglingAdjacent {
                triangle: triangle.id(),
                adjacent: adjacent.triangle_id,
            })?;

        let edge = triangle
            .shared_vertex_indices(other)
            .edge()
            .ok_or(Error::NotNeighbours {
                triangle: triangle.id(),
                adjacent: adjacent.triangle_id,
            })?;

        match slots[edge] {
            Some(existing) if existing != adjacent.triangle_id => {
                return Err(TopologyError::EdgeConflict {
                    triangle: triangle.id(),
                    edge,
                    existing,
                    incoming: adjacent.triangle_id,
                }
                .into());
            }
            _ => slots[edge] = Some(adjacent.triangle_id),
        }
    }

    Ok(slots)
}

pub fn to_json_string(mesh: &Icosahedron) -> Result<String> {
    Ok(serde_json::to_string(&encode(mesh))?)
}

pub fn to_json_pretty(mesh: &Icosahedron) -> Result<String> {
    Ok(serde_json::to_string_pretty(&encode(mesh))?)
}

pub fn from_json_str(json: &str) -> Result<Decoded> {
    let doc: GraphDocument = serde_json::from_str(json)?;
    decode(doc)
}

/// Write a mesh as pretty-printed JSON.
pub fn save(mesh: &Icosahedron, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, to_json_pretty(mesh)?)?;
    debug!(path = %path.display(), triangles = mesh.len(), "Saved mesh");
    Ok(())
}

pub fn load(path: impl AsRef<Path>) -> Result<Decoded> {
    let json = std::fs::read_to_string(path)?;
    from_json_str(&json)
}
