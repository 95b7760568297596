use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

use pdbcube::pattern::{self, io, PatternKind};

/// Builds a pattern database by breadth-first search and writes it to disk.
#[derive(Parser)]
#[command(name = "gen_pdb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Which table to build: corners, edges_a or edges_b.
    kind: PatternKind,

    /// Where to write the raw table.
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()?;

    let cli = Cli::parse();

    let db = pattern::build(cli.kind)?;
    io::save(&db, &cli.output)?;

    println!(
        "Wrote {} ({} entries, max distance {}) to {}",
        cli.kind,
        db.as_bytes().len(),
        db.max_distance(),
        cli.output.display()
    );
    Ok(())
}
