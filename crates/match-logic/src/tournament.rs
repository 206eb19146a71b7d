//! One full round-robin tournament over a roster

use serde::Serialize;
use crate::error::ArenaError;
use crate::game::{determine_round_count, run_match, MatchResult, RoundConfig};
use crate::random::SeededRng;
use crate::ranking::{rank, Ranking};
use crate::roster::StrategyFactory;
use crate::schedule::{calculate_match_count, triples, Triple};

/// Running total score per roster slot for one tournament
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreAccumulator {
    totals: Vec<f64>,
    addends: Vec<usize>,
}

impl ScoreAccumulator {
    pub fn new(roster_size: usize) -> Self {
        Self {
            totals: vec![0.0; roster_size],
            addends: vec![0; roster_size],
        }
    }

    /// Credit one seat's match average to its slot
    pub(crate) fn add(&mut self, slot: usize, score: f64) {
        self.totals[slot] += score;
        self.addends[slot] += 1;
    }

    pub fn total(&self, slot: usize) -> Option<f64> {
        self.totals.get(slot).copied()
    }

    /// How many match averages have been added to `slot`
    pub fn addends(&self, slot: usize) -> Option<usize> {
        self.addends.get(slot).copied()
    }

    /// Totals indexed by slot
    pub fn totals(&self) -> &[f64] {
        &self.totals
    }
}

/// Summary of one played match
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchRecord {
    pub match_index: usize,
    pub slots: Triple,
    pub round_count: usize,
    pub averages: [f64; 3],
}

/// A match that could not be played; its scores are not counted
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchFailure {
    pub match_index: usize,
    pub slots: Triple,
    #[serde(serialize_with = "serialize_error")]
    pub error: ArenaError,
}

fn serialize_error<S: serde::Serializer>(error: &ArenaError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Everything a tournament produces
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TournamentResult {
    pub ranking: Ranking,
    pub scores: ScoreAccumulator,
    pub matches: Vec<MatchRecord>,
    pub failures: Vec<MatchFailure>,
}

impl TournamentResult {
    /// Finishing position of `slot` (0-based)
    pub fn position_of(&self, slot: usize) -> Option<usize> {
        self.ranking.position_of(slot)
    }
}

/// Run one complete tournament
///
/// Plays every triple of roster slots (with repetition) once, in schedule
/// order, drawing everything from `rng`: seat instances are built first,
/// then the round count is drawn, then the match runs.
///
/// A match that fails is logged and recorded in `failures`; it adds
/// nothing to the totals and the tournament carries on.
pub fn run_tournament<F>(factory: &F, round_config: &RoundConfig, rng: &mut SeededRng) -> TournamentResult
where
    F: StrategyFactory + ?Sized,
{
    let n = factory.roster_size();
    let mut scores = ScoreAccumulator::new(n);
    let mut matches = Vec::with_capacity(calculate_match_count(n));
    let mut failures = Vec::new();

    for (match_index, slots) in triples(n).enumerate() {
        match play_triple(factory, slots, round_config, rng) {
            Ok(result) => {
                for (seat, slot) in slots.into_iter().enumerate() {
                    scores.add(slot, result.averages[seat]);
                }
                log::debug!(
                    "{} scored {:.3} points, {} scored {:.3} points, and {} scored {:.3} points",
                    display_name(factory, slots[0]),
                    result.averages[0],
                    display_name(factory, slots[1]),
                    result.averages[1],
                    display_name(factory, slots[2]),
                    result.averages[2],
                );
                matches.push(MatchRecord {
                    match_index,
                    slots,
                    round_count: result.round_count,
                    averages: result.averages,
                });
            }
            Err(error) => {
                log::warn!("match {} {:?} skipped: {}", match_index, slots, error);
                failures.push(MatchFailure { match_index, slots, error });
            }
        }
    }

    let ranking = rank(scores.totals());
    log::info!(
        "tournament finished: {} matches played, {} failed",
        matches.len(),
        failures.len()
    );

    TournamentResult { ranking, scores, matches, failures }
}

fn play_triple<F>(
    factory: &F,
    slots: Triple,
    round_config: &RoundConfig,
    rng: &mut SeededRng,
) -> Result<MatchResult, ArenaError>
where
    F: StrategyFactory + ?Sized,
{
    // A fresh instance per seat, even when a slot fills several seats
    let mut a = factory.make_instance(slots[0], rng)?;
    let mut b = factory.make_instance(slots[1], rng)?;
    let mut c = factory.make_instance(slots[2], rng)?;
    let round_count = determine_round_count(rng, round_config);
    run_match(a.as_mut(), b.as_mut(), c.as_mut(), round_count, rng)
}

fn display_name<F: StrategyFactory + ?Sized>(factory: &F, slot: usize) -> &str {
    factory.name(slot).unwrap_or("?")
}
