//! Icoboard Graph Documents
//!
//! Persists an [`icoboard_topology::Icosahedron`] as a versioned JSON
//! document and rebuilds it.
//!
//! Triangles reference their neighbours by id only, so the cyclic adjacency
//! graph flattens into a plain list. On the way back in, every reference is
//! checked against the stored geometry and the mesh is validated before it is
//! handed out. A document written by another format version still loads; the
//! difference is logged and reported in [`Decoded::warnings`].
//!
//! ```no_run
//! use icoboard_codec::{load, save};
//! use icoboard_topology::{Icosahedron, RandomOracle};
//!
//! # fn main() -> icoboard_codec::Result<()> {
//! let mesh = Icosahedron::with_subdivisions(1, &mut RandomOracle::seeded(1))?;
//! save(&mesh, "board.json")?;
//! let restored = load("board.json")?.into_icosahedron();
//! assert_eq!(restored.len(), 80);
//! # Ok(())
//! # }
//! ```

mod codec;
mod document;
mod error;

pub use codec::{
    decode, encode, from_json_str, load, save, to_json_pretty, to_json_string, DecodeWarning,
    Decoded,
};
pub use document::{AdjacentRecord, GraphDocument, TriangleRecord, VertexRecord, CURRENT_VERSION};
pub use error::{Error, Result};
