//! Subcommand handlers

pub mod campaign;
pub mod play;
pub mod roster;
pub mod tournament;

use anyhow::Context;
use match_logic::{Roster, SeededRng};
use rand::RngCore;
use crate::cli::{Cli, Command};
use crate::report::emit;

/// Run the selected subcommand against the standard roster
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let round_config = cli.round_config().context("bad --min-rounds/--max-rounds")?;
    let seed = resolve_seed(cli.seed);
    let players = Roster::standard();

    match &cli.command {
        Command::Roster => emit(&roster::run(&players), cli.json),
        Command::Play { a, b, c, rounds } => {
            let report = play::run(&players, [a.as_str(), b.as_str(), c.as_str()], *rounds, &round_config, seed)?;
            emit(&report, cli.json)
        }
        Command::Tournament { verbose_matches } => {
            let report = tournament::run(&players, &round_config, seed, *verbose_matches)?;
            emit(&report, cli.json)
        }
        Command::Campaign { tournaments, player, threads, sequential, show_standings } => {
            let options = campaign::Options {
                tournaments: *tournaments,
                player: player.as_str(),
                threads: *threads,
                sequential: *sequential || *show_standings,
                show_standings: *show_standings,
                json: cli.json,
            };
            let report = campaign::run(&players, &options, round_config, seed)?;
            emit(&report, cli.json)
        }
    }
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(seed) => seed,
        None => {
            let seed = SeededRng::from_entropy().next_u64();
            log::info!("no --seed given, using {}", seed);
            seed
        }
    }
}
