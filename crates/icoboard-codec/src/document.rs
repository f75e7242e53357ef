//! The stored shape of a mesh.
//!
//! ```json
//! {
//!   "jsonSerializerVersion": "1.0.0",
//!   "triangles": [
//!     { "triangleId": 1, "type": 3,
//!       "vertices": [ {"_x": 0.0, "_y": 0.0, "_z": 1.0}, ... ],
//!       "adjacents": [ {"triangleId": 2}, ... ] }
//!   ]
//! }
//! ```
//!
//! Neighbours are stored by id only. `adjacents` lists the occupied edge
//! slots in slot order; empty slots are left out rather than written as
//! `null`.

use icoboard_topology::{TriangleId, Vertex};
use serde::{Deserialize, Serialize};

/// Version this build writes and expects to read.
pub const CURRENT_VERSION: &str = "1.0.0";

/// Vertices are stored as `{"_x", "_y", "_z"}`.
pub type VertexRecord = Vertex;

/// A whole mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDocument {
    pub json_serializer_version: String,
    pub triangles: Vec<TriangleRecord>,
}

impl GraphDocument {
    /// An empty document at the current version.
    pub fn new() -> Self {
        Self {
            json_serializer_version: CURRENT_VERSION.to_string(),
            triangles: Vec::new(),
        }
    }

    pub fn is_current(&self) -> bool {
        self.json_serializer_version == CURRENT_VERSION
    }
}

impl Default for GraphDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// One facet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriangleRecord {
    pub triangle_id: TriangleId,
    /// Index into the facet type enumeration.
    #[serde(rename = "type")]
    pub facet_type: u8,
    pub vertices: [VertexRecord; 3],
    #[serde(default)]
    pub adjacents: Vec<AdjacentRecord>,
}

/// A neighbour reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjacentRecord {
    pub triangle_id: TriangleId,
}
