//! Standard roster strategies
//!
//! Most of the roster is built from three shared rules:
//! - consensus: when both opponents made the same move last round, play it
//! - tolerant: defect when the opponents' combined defections outnumber
//!   (or, with `ties_defect`, match) their cooperations
//! - rectify: cooperate while our own defection count is at least each
//!   opponent's

use crate::random::SeededRng;
use crate::strategy::{Move, Strategy};

/// Rounds at or after this index are treated as the end game
pub const FINAL_ROUND: usize = 109;

/// Rounds of unbroken cooperation before the sly variant cashes in
const SLY_WINDOW: usize = 10;

fn defections(history: &[Move]) -> usize {
    history.iter().filter(|m| **m == Move::Defect).count()
}

fn coin(rng: &mut SeededRng) -> Move {
    if rng.next_unit() < 0.5 {
        Move::Cooperate
    } else {
        Move::Defect
    }
}

fn consensus(first: &[Move], second: &[Move]) -> Option<Move> {
    match (first.last(), second.last()) {
        (Some(a), Some(b)) if a == b => Some(*a),
        _ => None,
    }
}

fn tolerant(first: &[Move], second: &[Move], ties_defect: bool) -> Move {
    let defects = defections(first) + defections(second);
    let cooperations = first.len() + second.len() - defects;
    if defects > cooperations || (ties_defect && defects == cooperations) {
        Move::Defect
    } else {
        Move::Cooperate
    }
}

fn rectify(own: &[Move], first: &[Move], second: &[Move]) -> Move {
    let mine = defections(own);
    if mine >= defections(first) && mine >= defections(second) {
        Move::Cooperate
    } else {
        Move::Defect
    }
}

fn last_or_cooperate(history: &[Move]) -> Move {
    history.last().copied().unwrap_or(Move::Cooperate)
}

/// Always cooperates
pub struct Nice;

impl Strategy for Nice {
    fn select_action(&mut self, _: usize, _: &[Move], _: &[Move], _: &[Move], _: &mut SeededRng) -> Move {
        Move::Cooperate
    }
}

/// Always defects
pub struct Nasty;

impl Strategy for Nasty {
    fn select_action(&mut self, _: usize, _: &[Move], _: &[Move], _: &[Move], _: &mut SeededRng) -> Move {
        Move::Defect
    }
}

/// Fair coin every round
pub struct RandomPlayer;

impl Strategy for RandomPlayer {
    fn select_action(&mut self, _: usize, _: &[Move], _: &[Move], _: &[Move], rng: &mut SeededRng) -> Move {
        coin(rng)
    }
}

pub struct Tolerant;

impl Strategy for Tolerant {
    fn select_action(&mut self, _: usize, _: &[Move], first: &[Move], second: &[Move], _: &mut SeededRng) -> Move {
        tolerant(first, second, false)
    }
}

/// Fixes its move for the whole match when constructed
pub struct Freaky {
    action: Move,
}

impl Freaky {
    pub fn new(rng: &mut SeededRng) -> Self {
        Self { action: coin(rng) }
    }
}

impl Strategy for Freaky {
    fn select_action(&mut self, _: usize, _: &[Move], _: &[Move], _: &[Move], _: &mut SeededRng) -> Move {
        self.action
    }
}

/// Tit-for-tat against an opponent picked at random each round
pub struct TitForTat;

impl Strategy for TitForTat {
    fn select_action(&mut self, round: usize, _: &[Move], first: &[Move], second: &[Move], rng: &mut SeededRng) -> Move {
        if round == 0 {
            return Move::Cooperate;
        }
        if rng.next_unit() < 0.5 {
            last_or_cooperate(first)
        } else {
            last_or_cooperate(second)
        }
    }
}

pub struct ConsensusMixer;

impl Strategy for ConsensusMixer {
    fn select_action(&mut self, round: usize, own: &[Move], first: &[Move], second: &[Move], rng: &mut SeededRng) -> Move {
        if round == 0 {
            return Move::Cooperate;
        }
        // Nobody can retaliate after the last round
        if round == FINAL_ROUND {
            return Move::Defect;
        }
        if let Some(agreed) = consensus(first, second) {
            return agreed;
        }
        if rng.next_unit() < 0.3 {
            return tolerant(first, second, false);
        }
        let mine = defections(own);
        if mine > defections(first) && mine > defections(second) {
            Move::Cooperate
        } else {
            Move::Defect
        }
    }
}

/// Tolerant on odd rounds, rectifying on even rounds
pub struct AlternatingTitForTat;

impl Strategy for AlternatingTitForTat {
    fn select_action(&mut self, round: usize, own: &[Move], first: &[Move], second: &[Move], _: &mut SeededRng) -> Move {
        if round == 0 {
            return Move::Cooperate;
        }
        if round >= FINAL_ROUND {
            return Move::Defect;
        }
        if let Some(agreed) = consensus(first, second) {
            return agreed;
        }
        if round % 2 == 1 {
            tolerant(first, second, false)
        } else {
            rectify(own, first, second)
        }
    }
}

pub struct ConsensusTolerant {
    pub ties_defect: bool,
}

impl Strategy for ConsensusTolerant {
    fn select_action(&mut self, round: usize, _: &[Move], first: &[Move], second: &[Move], _: &mut SeededRng) -> Move {
        if round == 0 {
            return Move::Cooperate;
        }
        consensus(first, second).unwrap_or_else(|| tolerant(first, second, self.ties_defect))
    }
}

pub struct ConsensusRectifying;

impl Strategy for ConsensusRectifying {
    fn select_action(&mut self, round: usize, own: &[Move], first: &[Move], second: &[Move], _: &mut SeededRng) -> Move {
        if round == 0 {
            return Move::Cooperate;
        }
        consensus(first, second).unwrap_or_else(|| rectify(own, first, second))
    }
}

pub struct TolerantSly {
    window: usize,
}

impl Default for TolerantSly {
    fn default() -> Self {
        Self { window: SLY_WINDOW }
    }
}

impl Strategy for TolerantSly {
    fn select_action(&mut self, round: usize, own: &[Move], first: &[Move], second: &[Move], _: &mut SeededRng) -> Move {
        if round == 0 {
            return Move::Cooperate;
        }

        if round >= self.window {
            let recent = |h: &[Move]| defections(&h[h.len().saturating_sub(self.window)..]);
            if recent(own) == 0 && recent(first) == 0 && recent(second) == 0 {
                return Move::Defect;
            }
        }

        match (first.last(), second.last(), own.last()) {
            (Some(Move::Cooperate), Some(Move::Cooperate), _) => Move::Cooperate,
            (Some(Move::Defect), Some(Move::Defect), Some(Move::Cooperate)) => Move::Defect,
            _ => tolerant(first, second, false),
        }
    }
}

/// Follows consensus, otherwise plays off its own last move
pub struct ConsensusOwnLast {
    pub invert: bool,
}

impl Strategy for ConsensusOwnLast {
    fn select_action(&mut self, round: usize, own: &[Move], first: &[Move], second: &[Move], _: &mut SeededRng) -> Move {
        if round == 0 {
            return Move::Cooperate;
        }
        if let Some(agreed) = consensus(first, second) {
            return agreed;
        }
        let last = last_or_cooperate(own);
        if self.invert {
            last.flip()
        } else {
            last
        }
    }
}

pub struct ConsensusDefault {
    pub fallback: Move,
}

impl Strategy for ConsensusDefault {
    fn select_action(&mut self, round: usize, _: &[Move], first: &[Move], second: &[Move], _: &mut SeededRng) -> Move {
        if round == 0 {
            return Move::Cooperate;
        }
        consensus(first, second).unwrap_or(self.fallback)
    }
}

pub struct HistoryRectification;

impl Strategy for HistoryRectification {
    fn select_action(&mut self, _: usize, own: &[Move], first: &[Move], second: &[Move], _: &mut SeededRng) -> Move {
        rectify(own, first, second)
    }
}

pub struct Aggressive;

impl Strategy for Aggressive {
    fn select_action(&mut self, round: usize, _: &[Move], first: &[Move], second: &[Move], _: &mut SeededRng) -> Move {
        if round == 0 {
            return Move::Cooperate;
        }
        tolerant(first, second, true)
    }
}

pub struct Lenient;

impl Strategy for Lenient {
    fn select_action(&mut self, round: usize, own: &[Move], _: &[Move], _: &[Move], _: &mut SeededRng) -> Move {
        if round == 0 {
            return Move::Cooperate;
        }
        last_or_cooperate(own).flip()
    }
}

/// Rides along with reliable cooperators, then defects in a random final stretch
pub struct Probabilistic;

impl Probabilistic {
    fn cooperation_percent(history: &[Move]) -> f32 {
        let cooperations = history.len() - defections(history);
        cooperations as f32 / history.len() as f32 * 100.0
    }
}

impl Strategy for Probabilistic {
    fn select_action(&mut self, round: usize, _: &[Move], first: &[Move], second: &[Move], rng: &mut SeededRng) -> Move {
        if round == 0 || first.is_empty() || second.is_empty() {
            return Move::Cooperate;
        }

        if Self::cooperation_percent(first) > 90.0 && Self::cooperation_percent(second) > 90.0 {
            let stretch = rng.next_between(5, 10);
            return if round > 90 + stretch {
                Move::Defect
            } else {
                Move::Cooperate
            };
        }

        Move::Defect
    }
}

/// Classifies opponents as trustworthy (< 5% defections), untrustworthy
/// (>= 20%) or neutral, and punishes accordingly
pub struct DefectionRate;

impl Strategy for DefectionRate {
    fn select_action(&mut self, round: usize, _: &[Move], first: &[Move], second: &[Move], _: &mut SeededRng) -> Move {
        if round == 0 {
            return Move::Cooperate;
        }
        if first.last() == Some(&Move::Defect) || second.last() == Some(&Move::Defect) {
            return Move::Defect;
        }

        let rate_first = defections(first) as f64 / round as f64;
        let rate_second = defections(second) as f64 / round as f64;

        if rate_first >= 0.2 || rate_second >= 0.2 {
            return Move::Defect;
        }
        if rate_first < 0.05 && rate_second < 0.05 {
            return Move::Cooperate;
        }
        if round == 1 {
            return Move::Cooperate;
        }

        // A neutral opponent who defected two rounds ago still gets punished
        let before_last = |h: &[Move]| h.len().checked_sub(2).and_then(|i| h.get(i)).copied();
        if rate_first >= 0.05 && before_last(first) == Some(Move::Defect) {
            return Move::Defect;
        }
        if rate_second >= 0.05 && before_last(second) == Some(Move::Defect) {
            return Move::Defect;
        }
        Move::Cooperate
    }
}

/// Keeps tallies that are never reset within a match: each round adds the
/// opponents' complete histories again, so the counters grow roughly
/// quadratically. The expected move is `min(1, tally / round)` with
/// integer division.
#[derive(Default)]
pub struct ExpectationTracker {
    cooperations: [u64; 2],
    defections: [u64; 2],
    expectation: [u64; 2],
}

impl Strategy for ExpectationTracker {
    fn select_action(&mut self, round: usize, own: &[Move], first: &[Move], second: &[Move], rng: &mut SeededRng) -> Move {
        if round == 0 {
            return Move::Cooperate;
        }
        if round >= FINAL_ROUND {
            return Move::Defect;
        }

        for (i, history) in [first, second].into_iter().enumerate() {
            let defected = defections(history) as u64;
            self.cooperations[i] += history.len() as u64 - defected;
            self.defections[i] += defected;
            self.expectation[i] += defected;
            self.expectation[i] = (self.expectation[i] / round as u64).min(1);
        }

        let all_cooperated = [own, first, second]
            .iter()
            .all(|h| h.last() == Some(&Move::Cooperate));
        if all_cooperated {
            return Move::Cooperate;
        }

        let threshold = 0.8 * round as f64;

        // Beware of habitual defectors
        let watched = if rng.next_unit() > 0.5 { 0 } else { 1 };
        if self.defections[watched] as f64 >= threshold {
            return Move::Defect;
        }
        // Exploit habitual cooperators
        let watched = if rng.next_unit() > 0.5 { 0 } else { 1 };
        if self.cooperations[watched] as f64 >= threshold {
            return Move::Defect;
        }

        if self.cooperations[0] + self.cooperations[1] <= self.defections[0] + self.defections[1] {
            return Move::Defect;
        }

        if self.expectation[0] == 1 {
            last_or_cooperate(first)
        } else if self.expectation[1] == 1 {
            last_or_cooperate(second)
        } else {
            Move::Defect
        }
    }
}
