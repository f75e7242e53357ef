//! Icoboard Matching
//!
//! The game layer over an [`icoboard_topology::Icosahedron`].
//!
//! # Hexagons
//!
//! Six triangles of one type around a shared vertex form a hexagon. Only
//! vertices created by subdivision have six triangles around them; the 12
//! original corners have five and can never match.
//!
//! # Turns
//!
//! A turn swaps the types of two edge neighbours. Any hexagon through either
//! of them is cleared: its members get fresh types from the board's oracle
//! and the mesh listener hears about the batch once. Fresh types may complete
//! further hexagons, which are cleared the same way up to a configured number
//! of rounds.
//!
//! Detection never mutates the mesh; only [`Board`] does.

mod board;
mod error;
mod hexagon;

#[cfg(test)]
mod fixtures;

pub use board::{Board, BoardConfig, MatchBatch, TurnOutcome, DEFAULT_MAX_CASCADE_ROUNDS};
pub use error::{Error, Result};
pub use hexagon::{find_all_hexagons, find_hexagons, find_hexagons_from, Hexagon, HEXAGON_SIZE};
