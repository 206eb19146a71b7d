//! Printable results
//!
//! Every report renders as a text table through `Display` and serializes
//! to JSON for `--json`.

use std::fmt;
use serde::Serialize;
use match_logic::{
    describe_strategy, ArenaError, CampaignConfig, MatchResult, RankHistogram, RoundResult, Roster,
    StrategyFactory, TournamentResult,
};

/// Print a report as text or pretty JSON
pub fn emit<R: Serialize + fmt::Display>(report: &R, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}

fn rule(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "-------------------------------")?;
    writeln!(f, "{}", title)?;
    writeln!(f, "-------------------------------")
}

#[derive(Debug, Serialize)]
pub struct RosterEntry {
    pub slot: usize,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RosterReport {
    pub players: Vec<RosterEntry>,
}

impl RosterReport {
    pub fn new(roster: &Roster) -> Self {
        let players = roster
            .kinds()
            .iter()
            .enumerate()
            .map(|(slot, kind)| RosterEntry {
                slot,
                name: kind.name(),
                description: describe_strategy(*kind),
            })
            .collect();
        Self { players }
    }
}

impl fmt::Display for RosterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.players {
            writeln!(f, "{:>3}  {:<28}{}", p.slot, p.name, p.description)?;
        }
        Ok(())
    }
}

/// One match, round by round
#[derive(Debug, Serialize)]
pub struct MatchReport {
    pub seed: u64,
    pub players: [String; 3],
    pub round_count: usize,
    pub rounds: Vec<RoundResult>,
    pub totals: [u32; 3],
    pub averages: [f64; 3],
}

impl MatchReport {
    pub fn new(seed: u64, players: [String; 3], result: MatchResult) -> Self {
        Self {
            seed,
            players,
            round_count: result.round_count,
            rounds: result.rounds,
            totals: result.totals,
            averages: result.averages,
        }
    }
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = &self.players;
        writeln!(f, "{} vs {} vs {}, {} rounds (seed {})", a, b, c, self.round_count, self.seed)?;
        writeln!(f, "{:>5}  {:<7}{:>6}{:>6}{:>6}", "round", "moves", "A", "B", "C")?;
        for r in &self.rounds {
            writeln!(
                f,
                "{:>5}  {}{}{}    {:>6}{:>6}{:>6}",
                r.round, r.moves[0], r.moves[1], r.moves[2], r.cumulative[0], r.cumulative[1], r.cumulative[2]
            )?;
        }
        writeln!(f)?;
        for (seat, name) in self.players.iter().enumerate() {
            writeln!(f, "{} scored {:.3} points ({} total)", name, self.averages[seat], self.totals[seat])?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct Standing {
    pub position: usize,
    pub slot: usize,
    pub name: String,
    pub total: f64,
}

#[derive(Debug, Serialize)]
pub struct MatchLine {
    pub slots: [usize; 3],
    pub players: [String; 3],
    pub round_count: usize,
    pub averages: [f64; 3],
}

#[derive(Debug, Serialize)]
pub struct FailureLine {
    pub slots: [usize; 3],
    pub error: String,
}

/// Final table of one tournament
#[derive(Debug, Serialize)]
pub struct StandingsReport {
    pub seed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tournament: Option<usize>,
    pub standings: Vec<Standing>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<MatchLine>,
    pub failures: Vec<FailureLine>,
}

impl StandingsReport {
    pub fn new<F: StrategyFactory + ?Sized>(
        factory: &F,
        result: &TournamentResult,
        seed: u64,
        with_matches: bool,
    ) -> Result<Self, ArenaError> {
        let name = |slot: usize| factory.name(slot).map(str::to_string);

        let mut standings = Vec::with_capacity(result.ranking.len());
        for (position, &slot) in result.ranking.order().iter().enumerate() {
            standings.push(Standing {
                position: position + 1,
                slot,
                name: name(slot)?,
                total: result.scores.total(slot).unwrap_or_default(),
            });
        }

        let mut matches = Vec::new();
        if with_matches {
            for m in &result.matches {
                matches.push(MatchLine {
                    slots: m.slots,
                    players: [name(m.slots[0])?, name(m.slots[1])?, name(m.slots[2])?],
                    round_count: m.round_count,
                    averages: m.averages,
                });
            }
        }

        let failures = result
            .failures
            .iter()
            .map(|failure| FailureLine {
                slots: failure.slots,
                error: failure.error.to_string(),
            })
            .collect();

        Ok(Self { seed, tournament: None, standings, matches, failures })
    }

    pub fn numbered(mut self, tournament: usize) -> Self {
        self.tournament = Some(tournament);
        self
    }
}

impl fmt::Display for StandingsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(number) = self.tournament {
            rule(f, &format!("Tournament: {}", number))?;
            writeln!(f)?;
        }
        for m in &self.matches {
            writeln!(
                f,
                "{} scored {:.3} points, {} scored {:.3} points, and {} scored {:.3} points.",
                m.players[0], m.averages[0], m.players[1], m.averages[1], m.players[2], m.averages[2]
            )?;
        }
        if !self.matches.is_empty() {
            writeln!(f)?;
        }
        writeln!(f, "Tournament Results")?;
        for s in &self.standings {
            writeln!(f, "{:>3}. {:<28}{:>10.3} points", s.position, s.name, s.total)?;
        }
        for failure in &self.failures {
            writeln!(f, "skipped {:?}: {}", failure.slots, failure.error)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct RankLine {
    pub rank: usize,
    pub count: u64,
    /// Percentage of tournaments finished at this rank
    pub probability: f64,
}

/// Rank distribution of one player over a campaign
#[derive(Debug, Serialize)]
pub struct CampaignReport {
    pub player: String,
    pub config: CampaignConfig,
    pub ranks: Vec<RankLine>,
}

impl CampaignReport {
    pub fn new(player: String, config: CampaignConfig, histogram: &RankHistogram) -> Self {
        let ranks = histogram
            .counts()
            .iter()
            .zip(histogram.probabilities())
            .enumerate()
            .map(|(position, (count, probability))| RankLine {
                rank: position + 1,
                count: *count,
                probability: probability * 100.0,
            })
            .collect();
        Self { player, config, ranks }
    }
}

impl fmt::Display for CampaignReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        rule(f, "Results")?;
        writeln!(
            f,
            "{} (slot {}) over {} tournaments, seed {}",
            self.player, self.config.designated, self.config.tournaments, self.config.seed
        )?;
        for line in &self.ranks {
            writeln!(f, "Rank {:>2} with probability: {:>6.2}%", line.rank, line.probability)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use match_logic::{run_tournament, RoundConfig, SeededRng, StrategyKind};

    fn small_roster() -> Roster {
        Roster::new(vec![StrategyKind::Nice, StrategyKind::Nasty, StrategyKind::Nasty])
    }

    #[test]
    fn test_roster_report_lists_every_slot() {
        let report = RosterReport::new(&Roster::standard());
        assert_eq!(report.players.len(), 23);
        let text = report.to_string();
        assert!(text.contains("ExpectationTracker"));
        assert_eq!(text.lines().count(), 23);
    }

    #[test]
    fn test_standings_report() {
        let roster = small_roster();
        let result = run_tournament(&roster, &RoundConfig::fixed(100), &mut SeededRng::new(1, 0));
        let report = StandingsReport::new(&roster, &result, 1, true).unwrap();

        assert_eq!(report.matches.len(), 10);
        assert_eq!(report.standings[0].slot, 1);
        assert_eq!(report.standings[2].name, "Nice");
        assert_eq!(report.standings[2].total, 30.0);

        let text = report.numbered(3).to_string();
        assert!(text.starts_with("-------------------------------\nTournament: 3\n"));
        assert!(text.contains("Nice scored 0.000 points, Nasty scored 5.000 points, and Nasty scored 5.000 points."));
        assert!(text.contains("Tournament Results"));
    }

    #[test]
    fn test_standings_json_omits_empty_matches() {
        let roster = small_roster();
        let result = run_tournament(&roster, &RoundConfig::fixed(10), &mut SeededRng::new(1, 0));
        let report = StandingsReport::new(&roster, &result, 5, false).unwrap();
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["seed"], 5);
        assert!(value.get("matches").is_none());
        assert!(value.get("tournament").is_none());
        assert_eq!(value["standings"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn test_campaign_report_percentages() {
        let mut histogram = RankHistogram::new(3);
        for position in [0, 0, 1, 2] {
            histogram.record(position).unwrap();
        }
        let config = CampaignConfig::new(4, 2, 9);
        let report = CampaignReport::new("Nasty".into(), config, &histogram);

        assert_eq!(report.ranks[0].count, 2);
        assert_eq!(report.ranks[0].probability, 50.0);
        assert_eq!(report.ranks[2].probability, 25.0);

        let text = report.to_string();
        assert!(text.contains("Rank  1 with probability:  50.00%"));
        assert!(text.contains("Nasty (slot 2) over 4 tournaments, seed 9"));
    }
}
