//! Match Logic for the Three Prisoners tournament
//!
//! Core game logic for the three-player iterated Prisoner's Dilemma:
//! - payoff table and match execution
//! - round-robin schedule over every triple of roster slots
//! - stable ranking and multi-tournament rank statistics

mod error;
mod random;
mod strategy;
mod players;
mod roster;
mod game;
mod schedule;
mod ranking;
mod tournament;
mod campaign;

pub use error::ArenaError;
pub use random::SeededRng;
pub use strategy::{describe_strategy, Move, Strategy, StrategyKind};
pub use players::FINAL_ROUND;
pub use roster::{Roster, StrategyFactory};
pub use game::{determine_round_count, run_match, MatchResult, RoundConfig, RoundResult, MAX_ROUNDS};
pub use schedule::{appearances_per_slot, calculate_match_count, triples, Triple};
pub use ranking::{rank, Ranking};
pub use tournament::{run_tournament, MatchFailure, MatchRecord, ScoreAccumulator, TournamentResult};
pub use campaign::{run_campaign, run_campaign_with, CampaignConfig, RankHistogram};
#[cfg(feature = "parallel")]
pub use campaign::run_campaign_parallel;

/// Payoffs for the evaluated player, indexed `[own][first other][second other]`.
///
/// U(DCC) > U(CCC) > U(DDC) > U(CDC) > U(DDD) > U(CDD)
const PAYOFF: [[[u8; 2]; 2]; 2] = [
    [[6, 3], [3, 0]],
    [[8, 5], [5, 2]],
];

/// Lowest payoff any seat can receive in a round
pub const MIN_PAYOFF: u8 = 0;
/// Highest payoff any seat can receive in a round
pub const MAX_PAYOFF: u8 = 8;

/// Payoff to a player moving `own` while the others move `first` and `second`
pub fn payoff(own: Move, first: Move, second: Move) -> u8 {
    PAYOFF[own as usize][first as usize][second as usize]
}

/// Payoff lookup on raw actions (0 = cooperate, 1 = defect)
pub fn payoff_raw(own: u8, first: u8, second: u8) -> Result<u8, ArenaError> {
    Ok(payoff(Move::try_from(own)?, Move::try_from(first)?, Move::try_from(second)?))
}

/// Payoffs for all three seats of one round
/// Returns (score_a, score_b, score_c)
pub fn payoffs(a: Move, b: Move, c: Move) -> (u8, u8, u8) {
    (payoff(a, b, c), payoff(b, c, a), payoff(c, a, b))
}
