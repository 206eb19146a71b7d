//! Three Prisoners - Iterated Prisoner's Dilemma for three players
//!
//! Runs single matches, full round-robin tournaments and multi-tournament
//! campaigns over the standard 23-strategy roster.

use clap::Parser;

mod cli;
mod commands;
mod report;

use cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    commands::run(&cli)
}
