//! Blockyard headless session runner
//!
//! Generates a world and drives one player through a fixed script (settle,
//! walk, mine, build, open the inventory) using the same intent pipeline a
//! windowed host would, then logs the outcome.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p blockyard-sim -- [OPTIONS]
//! ```
//!
//! ## Options
//!
//! - `--seed <N>`: World generation seed (default: 42)
//! - `--ticks <N>`: Number of 60 Hz ticks to simulate (default: 600)
//! - `--world-size <N>`: Side length of the world in blocks, even (default: 32)
//! - `-h, --help`: Print help message
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

mod app;

use tracing_subscriber::EnvFilter;

use crate::app::{Session, SimParams};

fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "-h" || arg == "--help") {
        print_help();
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let params = SimParams::from_args();
    let mut session = Session::new(&params)?;
    let summary = session.run(params.ticks);
    summary.log(session.world());
    Ok(())
}

fn print_help() {
    eprintln!(
        "Blockyard headless session runner

USAGE:
    cargo run -p blockyard-sim -- [OPTIONS]

OPTIONS:
    --seed <N>              World generation seed (default: 42)
    --ticks <N>             Number of 60 Hz ticks to simulate (default: 600)
    --world-size <N>        Side length of the world in blocks, even (default: 32)
    -h, --help              Print this help message

EXAMPLES:
    # Default session
    cargo run -p blockyard-sim

    # Longer run on a bigger world with per-block logging
    RUST_LOG=debug cargo run -p blockyard-sim -- --ticks 3000 --world-size 48

ENVIRONMENT VARIABLES:
    RUST_LOG                Set log level (e.g., info, debug, trace)"
    );
}
