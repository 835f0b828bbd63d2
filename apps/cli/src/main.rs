//! resumemd CLI: turn work-history markdown into a structured resume JSON document.
//!
//! Reads a contact file and a directory of numbered experience files, parses
//! each with the template its first line declares, and writes one JSON document.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
