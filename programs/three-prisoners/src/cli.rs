//! Command-line arguments

use clap::{Parser, Subcommand};
use match_logic::{ArenaError, RoundConfig};

#[derive(Debug, Parser)]
#[command(author, version, about = "Three-player iterated Prisoner's Dilemma tournaments", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Seed for every random draw; a fresh one is picked and logged if omitted
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Shortest possible match
    #[arg(long, global = true, default_value_t = 90)]
    pub min_rounds: usize,

    /// Longest possible match
    #[arg(long, global = true, default_value_t = 110)]
    pub max_rounds: usize,

    /// Print reports as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    #[command(about = "List roster slots with their strategies", alias = "ls")]
    Roster,

    #[command(about = "Play a single match between three players")]
    Play {
        /// Player in seat A (slot number or name)
        a: String,
        /// Player in seat B
        b: String,
        /// Player in seat C
        c: String,
        /// Exact match length instead of a random draw
        #[arg(long)]
        rounds: Option<usize>,
    },

    #[command(about = "Run one tournament and print the standings")]
    Tournament {
        /// Also list every match with its averages
        #[arg(long)]
        verbose_matches: bool,
    },

    #[command(about = "Run many tournaments and report one player's rank distribution")]
    Campaign {
        #[arg(long, default_value_t = 200)]
        tournaments: usize,
        /// Tracked player (slot number or name)
        #[arg(long, default_value = "22")]
        player: String,
        /// Worker threads for the parallel run
        #[arg(long)]
        threads: Option<usize>,
        /// Run on the current thread only
        #[arg(long)]
        sequential: bool,
        /// Print the standings of every tournament (implies --sequential)
        #[arg(long)]
        show_standings: bool,
    },
}

impl Cli {
    pub fn round_config(&self) -> Result<RoundConfig, ArenaError> {
        RoundConfig::new(self.min_rounds, self.max_rounds)
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["three-prisoners", "campaign"]).unwrap();
        assert_eq!(cli.seed, None);
        assert!(!cli.json);
        assert_eq!(cli.round_config(), Ok(RoundConfig::standard()));
        assert_eq!(cli.log_level(), log::LevelFilter::Warn);
        assert_eq!(
            cli.command,
            Command::Campaign {
                tournaments: 200,
                player: "22".into(),
                threads: None,
                sequential: false,
                show_standings: false,
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "three-prisoners", "tournament", "--verbose-matches", "--seed", "7", "--json", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.seed, Some(7));
        assert!(cli.json);
        assert_eq!(cli.log_level(), log::LevelFilter::Debug);
        assert_eq!(cli.command, Command::Tournament { verbose_matches: true });
    }

    #[test]
    fn test_play_arguments() {
        let cli = Cli::try_parse_from(["three-prisoners", "play", "Nice", "1", "titfortat", "--rounds", "12"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Play {
                a: "Nice".into(),
                b: "1".into(),
                c: "titfortat".into(),
                rounds: Some(12),
            }
        );
    }

    #[test]
    fn test_play_needs_three_players() {
        assert!(Cli::try_parse_from(["three-prisoners", "play", "Nice", "Nasty"]).is_err());
    }

    #[test]
    fn test_inverted_round_range() {
        let cli = Cli::try_parse_from(["three-prisoners", "roster", "--min-rounds", "120"]).unwrap();
        assert_eq!(
            cli.round_config(),
            Err(ArenaError::InvalidRoundRange { min: 120, max: 110 })
        );
    }
}
