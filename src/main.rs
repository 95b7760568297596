use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

use pdbcube::prelude::*;
use pdbcube::scramble;

/// Scrambles a cube and solves it with IDA* over pattern databases.
#[derive(Parser)]
#[command(name = "pdbcube")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Length of the random scramble.
    #[arg(long, default_value_t = 15)]
    scramble: usize,

    /// Explicit scramble, e.g. "R U R' U'". Overrides --scramble.
    #[arg(long)]
    moves: Option<String>,

    #[arg(long, default_value_t = 20)]
    max_depth: u8,

    #[arg(long, default_value_t = 50)]
    max_iterations: usize,

    /// Directory holding corners.bin, edges_a.bin and edges_b.bin.
    #[arg(long, default_value = "pdbs")]
    pdb_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()?;

    let cli = Cli::parse();

    let scramble = match &cli.moves {
        Some(moves) => Move::parse_sequence(moves)
            .with_context(|| format!("Parsing scramble {:?}", moves))?,
        None => scramble::random_moves(&mut rand::thread_rng(), cli.scramble),
    };
    let cube = CubeState::solved().apply_all(scramble.iter().copied());

    let patterns = PatternSet::load_dir(&cli.pdb_dir);
    let config = SearchConfig {
        max_depth: cli.max_depth,
        max_iterations: cli.max_iterations,
    };
    let report = IdaStar::new(&patterns, config).solve(&cube);

    println!("Scramble: {}", Move::format_sequence(&scramble));
    println!("Nodes:    {}", report.nodes);
    println!("Time:     {:?}", report.elapsed);

    match &report.outcome {
        Outcome::Solved(solution) => {
            println!(
                "Solution: {} ({} moves)",
                Move::format_sequence(solution),
                solution.len()
            );
            let verified = cube.apply_all(solution.iter().copied()).is_solved();
            println!("Verified: {}", if verified { "yes" } else { "NO" });
            anyhow::ensure!(verified, "Solution does not solve the scramble");
        }
        Outcome::DepthExceeded { next_bound } => {
            println!(
                "No solution within {} moves (next bound {:?})",
                cli.max_depth, next_bound
            );
        }
        Outcome::IterationsExhausted { bound } => {
            println!(
                "No solution after {} iterations (bound reached {})",
                cli.max_iterations, bound
            );
        }
    }

    Ok(())
}
