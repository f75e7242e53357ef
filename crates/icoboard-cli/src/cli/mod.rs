//! # Icoboard CLI Module
//!
//! ## Available Commands
//!
//! - `generate` - Build a new board and save it
//! - `inspect` - Report counts, closure and matches of a saved board
//! - `swap` - Play one turn on a saved board
//! - `settle` - Clear every hexagon on a saved board

mod commands;

use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;

use crate::config::CliConfig;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Icoboard - a match-six puzzle on a subdivided icosahedron
#[derive(Parser, Debug)]
#[command(name = "icoboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Seed for facet types (overrides ICOBOARD_SEED)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Subdivision depth for new boards (overrides ICOBOARD_SUBDIVISIONS)
    #[arg(short = 'n', long, global = true)]
    pub subdivisions: Option<u32>,

    /// Match rounds per turn (overrides ICOBOARD_MAX_CASCADE)
    #[arg(long, global = true)]
    pub max_cascade: Option<usize>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a new board
    Generate {
        /// Where to write the board
        #[arg(short, long)]
        output: PathBuf,

        /// Clear hexagons present right after generation
        #[arg(long)]
        settle: bool,
    },

    /// Describe a saved board
    Inspect {
        /// Board file
        file: PathBuf,
    },

    /// Swap the types of two neighbouring triangles
    Swap {
        /// Board file
        file: PathBuf,

        /// First triangle id
        a: u64,

        /// Second triangle id
        b: u64,

        /// Write the result here instead of back to FILE
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Clear every hexagon on a saved board
    Settle {
        /// Board file
        file: PathBuf,

        /// Write the result here instead of back to FILE
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli, env: CliConfig) -> Result<(), Box<dyn Error>> {
    let config = env.with_overrides(cli.seed, cli.subdivisions, cli.max_cascade)?;
    let json = cli.json;

    match cli.command {
        Commands::Generate { output, settle } => {
            let report = cmd_generate(&config, &output, settle)?;
            emit(&report, json)
        }
        Commands::Inspect { file } => {
            let report = cmd_inspect(&file)?;
            emit(&report, json)
        }
        Commands::Swap { file, a, b, output } => {
            let target = output.unwrap_or_else(|| file.clone());
            let report = cmd_swap(&config, &file, a, b, &target)?;
            emit(&report, json)
        }
        Commands::Settle { file, output } => {
            let target = output.unwrap_or_else(|| file.clone());
            let report = cmd_settle(&config, &file, &target)?;
            emit(&report, json)
        }
    }
}

fn emit<R>(report: &R, json: bool) -> Result<(), Box<dyn Error>>
where
    R: serde::Serialize + std::fmt::Display,
{
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}
