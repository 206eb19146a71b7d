//! Rank distribution of one player over many tournaments

use anyhow::Context;
use match_logic::{run_campaign_with, CampaignConfig, RankHistogram, RoundConfig, Roster, StrategyFactory};
use crate::report::{emit, CampaignReport, StandingsReport};

pub struct Options<'a> {
    pub tournaments: usize,
    pub player: &'a str,
    pub threads: Option<usize>,
    pub sequential: bool,
    pub show_standings: bool,
    pub json: bool,
}

pub fn run(
    roster: &Roster,
    options: &Options<'_>,
    round_config: RoundConfig,
    seed: u64,
) -> anyhow::Result<CampaignReport> {
    let designated = roster
        .find(options.player)
        .with_context(|| format!("cannot track player {:?}", options.player))?;
    let mut config = CampaignConfig::new(options.tournaments, designated, seed).with_round_config(round_config);
    config.threads = options.threads;

    log::info!(
        "running {} tournaments for {} (slot {})",
        config.tournaments,
        roster.name(designated)?,
        designated
    );

    let histogram = if options.sequential {
        run_sequential(roster, &config, options)?
    } else {
        run_parallel(roster, &config)?
    };

    Ok(CampaignReport::new(roster.name(designated)?.to_string(), config, &histogram))
}

fn run_sequential(roster: &Roster, config: &CampaignConfig, options: &Options<'_>) -> anyhow::Result<RankHistogram> {
    let mut printed = Ok(());
    let histogram = run_campaign_with(roster, config, |index, result| {
        if !options.show_standings || printed.is_err() {
            return;
        }
        printed = StandingsReport::new(roster, result, config.seed, false)
            .map_err(anyhow::Error::from)
            .and_then(|report| emit(&report.numbered(index), options.json));
    })?;
    printed?;
    Ok(histogram)
}

#[cfg(feature = "parallel")]
fn run_parallel(roster: &Roster, config: &CampaignConfig) -> anyhow::Result<RankHistogram> {
    Ok(match_logic::run_campaign_parallel(roster, config)?)
}

#[cfg(not(feature = "parallel"))]
fn run_parallel(roster: &Roster, config: &CampaignConfig) -> anyhow::Result<RankHistogram> {
    if config.threads.is_some() {
        log::warn!("built without the parallel feature, ignoring --threads");
    }
    Ok(match_logic::run_campaign(roster, config)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(player: &str, sequential: bool) -> Options<'_> {
        Options {
            tournaments: 3,
            player,
            threads: Some(2),
            sequential,
            show_standings: false,
            json: false,
        }
    }

    #[test]
    fn test_report_has_one_line_per_rank() {
        let report = run(&Roster::standard(), &options("ExpectationTracker", true), RoundConfig::fixed(15), 8).unwrap();
        assert_eq!(report.ranks.len(), 23);
        assert_eq!(report.config.designated, 22);
        assert_eq!(report.ranks.iter().map(|r| r.count).sum::<u64>(), 3);
        let total: f64 = report.ranks.iter().map(|r| r.probability).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let roster = Roster::standard();
        let sequential = run(&roster, &options("22", true), RoundConfig::fixed(15), 8).unwrap();
        let parallel = run(&roster, &options("22", false), RoundConfig::fixed(15), 8).unwrap();
        let counts = |r: &CampaignReport| r.ranks.iter().map(|l| l.count).collect::<Vec<_>>();
        assert_eq!(counts(&sequential), counts(&parallel));
    }

    #[test]
    fn test_zero_tournaments_rejected() {
        let mut opts = options("Nice", true);
        opts.tournaments = 0;
        assert!(run(&Roster::standard(), &opts, RoundConfig::standard(), 1).is_err());
    }

    #[test]
    fn test_unknown_player_rejected() {
        let err = run(&Roster::standard(), &options("99", false), RoundConfig::standard(), 1).unwrap_err();
        assert!(err.to_string().contains("99"));
    }
}
