//! # CLI Command Implementations
//!
//! Each command returns a report that prints either as text or as JSON.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::path::Path;

use icoboard_codec::{load, save};
use icoboard_match::{find_all_hexagons, Board, TurnOutcome};
use icoboard_topology::{FacetType, Icosahedron, TriangleId};
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;

// =============================================================================
// REPORTS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    /// Sorted member ids per hexagon
    pub hexagons: Vec<Vec<u64>>,
    pub changed: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnReport {
    pub batches: Vec<BatchReport>,
    pub hexagons_total: usize,
    pub exhausted: bool,
}

impl From<&TurnOutcome> for TurnReport {
    fn from(outcome: &TurnOutcome) -> Self {
        let batches = outcome
            .batches
            .iter()
            .map(|batch| BatchReport {
                hexagons: batch
                    .hexagons
                    .iter()
                    .map(|h| h.key().iter().map(|id| id.value()).collect())
                    .collect(),
                changed: batch.changed.iter().map(|id| id.value()).collect(),
            })
            .collect();

        Self {
            batches,
            hexagons_total: outcome.total_hexagons(),
            exhausted: outcome.exhausted,
        }
    }
}

impl fmt::Display for TurnReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.batches.is_empty() && !self.exhausted {
            return writeln!(f, "  No hexagons");
        }
        for (round, batch) in self.batches.iter().enumerate() {
            writeln!(
                f,
                "  Round {}: {} hexagon(s), {} triangle(s) re-typed",
                round + 1,
                batch.hexagons.len(),
                batch.changed.len()
            )?;
            for hexagon in &batch.hexagons {
                writeln!(f, "    {:?}", hexagon)?;
            }
        }
        if self.exhausted {
            writeln!(f, "  Round limit reached; hexagons remain on the board")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateReport {
    pub output: String,
    pub seed: Option<u64>,
    pub subdivisions: u32,
    pub triangles: usize,
    pub vertices: usize,
    pub settled: Option<TurnReport>,
}

impl fmt::Display for GenerateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generated {}", self.output)?;
        writeln!(f, "  Subdivisions: {}", self.subdivisions)?;
        writeln!(f, "  Triangles:    {}", self.triangles)?;
        writeln!(f, "  Vertices:     {}", self.vertices)?;
        match self.seed {
            Some(seed) => writeln!(f, "  Seed:         {}", seed)?,
            None => writeln!(f, "  Seed:         (entropy)")?,
        }
        if let Some(turn) = &self.settled {
            writeln!(f, "Settled:")?;
            write!(f, "{}", turn)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferenceReport {
    pub id: u64,
    pub equilateral: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectReport {
    pub warnings: Vec<String>,
    pub triangles: usize,
    pub vertices: usize,
    pub next_id: u64,
    pub closed: bool,
    pub reciprocal: bool,
    pub hexagons: usize,
    pub types: BTreeMap<String, usize>,
    pub reference: Option<ReferenceReport>,
}

impl InspectReport {
    fn of(mesh: &Icosahedron, warnings: Vec<String>) -> Self {
        let mut types: BTreeMap<String, usize> =
            FacetType::ALL.iter().map(|t| (t.to_string(), 0)).collect();
        for t in mesh.triangles() {
            *types.entry(t.facet_type().to_string()).or_default() += 1;
        }

        Self {
            warnings,
            triangles: mesh.len(),
            vertices: mesh.vertex_count(),
            next_id: mesh.next_triangle_id().value(),
            closed: mesh.is_closed(),
            reciprocal: icoboard_topology::verify_reciprocity(mesh.triangles()).is_ok(),
            hexagons: find_all_hexagons(mesh).len(),
            types,
            reference: mesh.reference_triangle().map(|r| ReferenceReport {
                id: r.id.value(),
                equilateral: r.equilateral,
            }),
        }
    }
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for warning in &self.warnings {
            writeln!(f, "Warning: {}", warning)?;
        }
        writeln!(f, "Board:")?;
        writeln!(f, "  Triangles:  {}", self.triangles)?;
        writeln!(f, "  Vertices:   {}", self.vertices)?;
        writeln!(f, "  Next id:    {}", self.next_id)?;
        writeln!(f, "  Closed:     {}", self.closed)?;
        writeln!(f, "  Reciprocal: {}", self.reciprocal)?;
        writeln!(f, "  Hexagons:   {}", self.hexagons)?;
        match &self.reference {
            Some(r) if r.equilateral => writeln!(f, "  Reference:  #{}", r.id)?,
            Some(r) => writeln!(f, "  Reference:  #{} (not equilateral)", r.id)?,
            None => writeln!(f, "  Reference:  none")?,
        }
        writeln!(f, "Types:")?;
        for (name, count) in &self.types {
            writeln!(f, "  {:<8} {}", name, count)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwapReport {
    pub a: u64,
    pub b: u64,
    pub output: String,
    pub turn: TurnReport,
}

impl fmt::Display for SwapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Swapped #{} and #{} -> {}", self.a, self.b, self.output)?;
        write!(f, "{}", self.turn)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettleReport {
    pub output: String,
    pub turn: TurnReport,
}

impl fmt::Display for SettleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Settled -> {}", self.output)?;
        write!(f, "{}", self.turn)
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Build a board at the configured depth and save it.
pub fn cmd_generate(
    config: &CliConfig,
    output: &Path,
    settle: bool,
) -> Result<GenerateReport, Box<dyn Error>> {
    let mut oracle = config.oracle();
    let mesh = Icosahedron::with_subdivisions(config.subdivisions, &mut oracle)?;

    let (mesh, settled) = if settle {
        let mut board = Board::with_config(mesh, oracle, config.board_config());
        let outcome = board.settle()?;
        (board.into_mesh(), Some(TurnReport::from(&outcome)))
    } else {
        (mesh, None)
    };

    save(&mesh, output)?;
    info!(path = %output.display(), triangles = mesh.len(), "Generated board");

    Ok(GenerateReport {
        output: output.display().to_string(),
        seed: config.seed,
        subdivisions: config.subdivisions,
        triangles: mesh.len(),
        vertices: mesh.vertex_count(),
        settled,
    })
}

pub fn cmd_inspect(file: &Path) -> Result<InspectReport, Box<dyn Error>> {
    let decoded = load(file)?;
    let warnings = decoded.warnings.iter().map(|w| w.to_string()).collect();
    Ok(InspectReport::of(&decoded.icosahedron, warnings))
}

/// Play one turn and write the board to `output`.
pub fn cmd_swap(
    config: &CliConfig,
    file: &Path,
    a: u64,
    b: u64,
    output: &Path,
) -> Result<SwapReport, Box<dyn Error>> {
    let mesh = load(file)?.into_icosahedron();
    let mut board = Board::with_config(mesh, config.oracle(), config.board_config());

    let outcome = board.swap(TriangleId(a), TriangleId(b))?;
    save(board.mesh(), output)?;
    info!(
        a,
        b,
        hexagons = outcome.total_hexagons(),
        path = %output.display(),
        "Played turn"
    );

    Ok(SwapReport {
        a,
        b,
        output: output.display().to_string(),
        turn: TurnReport::from(&outcome),
    })
}

pub fn cmd_settle(
    config: &CliConfig,
    file: &Path,
    output: &Path,
) -> Result<SettleReport, Box<dyn Error>> {
    let mesh = load(file)?.into_icosahedron();
    let mut board = Board::with_config(mesh, config.oracle(), config.board_config());

    let outcome = board.settle()?;
    save(board.mesh(), output)?;
    info!(hexagons = outcome.total_hexagons(), path = %output.display(), "Settled board");

    Ok(SettleReport {
        output: output.display().to_string(),
        turn: TurnReport::from(&outcome),
    })
}
