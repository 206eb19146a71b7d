//! Standings of a single tournament

use match_logic::{run_tournament, RoundConfig, Roster, SeededRng};
use crate::report::StandingsReport;

/// One tournament on stream 0 of `seed`, the same draws as the first
/// tournament of a campaign with that seed
pub fn run(
    roster: &Roster,
    round_config: &RoundConfig,
    seed: u64,
    verbose_matches: bool,
) -> anyhow::Result<StandingsReport> {
    let mut rng = SeededRng::new(seed, 0);
    let result = run_tournament(roster, round_config, &mut rng);
    Ok(StandingsReport::new(roster, &result, seed, verbose_matches)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use match_logic::{calculate_match_count, run_campaign_with, CampaignConfig};

    #[test]
    fn test_standings_cover_roster() {
        let report = run(&Roster::standard(), &RoundConfig::fixed(20), 3, true).unwrap();
        assert_eq!(report.standings.len(), 23);
        assert_eq!(report.matches.len(), calculate_match_count(23));
        assert!(report.failures.is_empty());
        for pair in report.standings.windows(2) {
            assert!(pair[0].total >= pair[1].total);
        }
    }

    #[test]
    fn test_matches_first_campaign_tournament() {
        let roster = Roster::standard();
        let config = CampaignConfig::new(1, 0, 11).with_round_config(RoundConfig::fixed(20));
        let mut first = Vec::new();
        run_campaign_with(&roster, &config, |_, result| first = result.ranking.order().to_vec()).unwrap();

        let report = run(&roster, &RoundConfig::fixed(20), 11, false).unwrap();
        let order: Vec<usize> = report.standings.iter().map(|s| s.slot).collect();
        assert_eq!(order, first);
    }
}
