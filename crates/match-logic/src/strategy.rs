//! Strategy definitions and construction

use serde::{Deserialize, Serialize};
use crate::error::ArenaError;
use crate::players::*;
use crate::random::SeededRng;

/// A move in the Prisoner's Dilemma
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Cooperate = 0,
    Defect = 1,
}

impl Move {
    /// Wire encoding: 0 = cooperate, 1 = defect
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// The other move
    pub fn flip(self) -> Self {
        match self {
            Move::Cooperate => Move::Defect,
            Move::Defect => Move::Cooperate,
        }
    }
}

impl TryFrom<u8> for Move {
    type Error = ArenaError;

    fn try_from(action: u8) -> Result<Self, Self::Error> {
        match action {
            0 => Ok(Move::Cooperate),
            1 => Ok(Move::Defect),
            other => Err(ArenaError::InvalidAction(other)),
        }
    }
}

impl From<Move> for u8 {
    fn from(m: Move) -> Self {
        m.as_u8()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Move::Cooperate => "C",
            Move::Defect => "D",
        })
    }
}

/// A player's decision procedure for one match.
///
/// Each seat of each match gets its own instance, so anything an
/// implementation remembers lives exactly as long as that match.
pub trait Strategy {
    /// Choose the move for round `round` (0-indexed).
    ///
    /// `own` is this seat's history, `first` and `second` the opponents'
    /// histories in rotated seat order. All three have length `round`.
    fn select_action(
        &mut self,
        round: usize,
        own: &[Move],
        first: &[Move],
        second: &[Move],
        rng: &mut SeededRng,
    ) -> Move;
}

/// Named strategy in the standard roster
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Always cooperate.
    Nice,
    /// Always defect.
    Nasty,
    /// Coin flip every round.
    Random,
    /// Defect only when opponents defected more than they cooperated.
    Tolerant,
    /// Coin flip at construction decides a lifetime move.
    Freaky,
    /// Copy a randomly chosen opponent's last move.
    TitForTat,
    /// Follow opponent consensus, otherwise mix tolerant and history play.
    ConsensusMixer,
    /// Follow consensus, alternate tolerant and rectifying play.
    AlternatingTitForTat,
    /// Follow consensus, otherwise tolerant.
    TolerantTitForTat,
    /// Follow consensus, otherwise tolerant with ties defecting.
    AggressiveTitForTat,
    /// Follow consensus, otherwise rectify defection counts.
    LenientRectifyingTitForTat,
    /// Follow consensus, alternate tolerant and rectifying play.
    RectifyingTitForTat,
    /// Exploit long peaceful stretches, otherwise tolerant.
    TolerantSlyTitForTat,
    /// Follow consensus, otherwise invert own last move.
    LenientRectification,
    /// Follow consensus, otherwise repeat own last move.
    AggressiveRectification,
    /// Follow consensus, otherwise cooperate.
    LenientTitForTatCooperate,
    /// Follow consensus, otherwise defect.
    LenientTitForTatDefect,
    /// Cooperate while at least as guilty as both opponents.
    HistoryRectification,
    /// Tolerant with ties defecting.
    Aggressive,
    /// Invert own last move.
    Lenient,
    /// Cooperate with cooperators, betray them near the end.
    Probabilistic,
    /// Judge opponents by their defection rate.
    DefectionRate,
    /// Rule cascade over accumulated expectation counters.
    ExpectationTracker,
}

impl StrategyKind {
    /// Every kind, in standard roster order
    pub const ALL: [StrategyKind; 23] = [
        StrategyKind::Nice,
        StrategyKind::Nasty,
        StrategyKind::Random,
        StrategyKind::Tolerant,
        StrategyKind::Freaky,
        StrategyKind::TitForTat,
        StrategyKind::ConsensusMixer,
        StrategyKind::AlternatingTitForTat,
        StrategyKind::TolerantTitForTat,
        StrategyKind::AggressiveTitForTat,
        StrategyKind::LenientRectifyingTitForTat,
        StrategyKind::RectifyingTitForTat,
        StrategyKind::TolerantSlyTitForTat,
        StrategyKind::LenientRectification,
        StrategyKind::AggressiveRectification,
        StrategyKind::LenientTitForTatCooperate,
        StrategyKind::LenientTitForTatDefect,
        StrategyKind::HistoryRectification,
        StrategyKind::Aggressive,
        StrategyKind::Lenient,
        StrategyKind::Probabilistic,
        StrategyKind::DefectionRate,
        StrategyKind::ExpectationTracker,
    ];

    /// Build a fresh instance. Construction may consume randomness.
    pub fn instantiate(self, rng: &mut SeededRng) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Nice => Box::new(Nice),
            StrategyKind::Nasty => Box::new(Nasty),
            StrategyKind::Random => Box::new(RandomPlayer),
            StrategyKind::Tolerant => Box::new(Tolerant),
            StrategyKind::Freaky => Box::new(Freaky::new(rng)),
            StrategyKind::TitForTat => Box::new(TitForTat),
            StrategyKind::ConsensusMixer => Box::new(ConsensusMixer),
            StrategyKind::AlternatingTitForTat | StrategyKind::RectifyingTitForTat => {
                Box::new(AlternatingTitForTat)
            }
            StrategyKind::TolerantTitForTat => Box::new(ConsensusTolerant { ties_defect: false }),
            StrategyKind::AggressiveTitForTat => Box::new(ConsensusTolerant { ties_defect: true }),
            StrategyKind::LenientRectifyingTitForTat => Box::new(ConsensusRectifying),
            StrategyKind::TolerantSlyTitForTat => Box::new(TolerantSly::default()),
            StrategyKind::LenientRectification => Box::new(ConsensusOwnLast { invert: true }),
            StrategyKind::AggressiveRectification => Box::new(ConsensusOwnLast { invert: false }),
            StrategyKind::LenientTitForTatCooperate => {
                Box::new(ConsensusDefault { fallback: Move::Cooperate })
            }
            StrategyKind::LenientTitForTatDefect => {
                Box::new(ConsensusDefault { fallback: Move::Defect })
            }
            StrategyKind::HistoryRectification => Box::new(HistoryRectification),
            StrategyKind::Aggressive => Box::new(Aggressive),
            StrategyKind::Lenient => Box::new(Lenient),
            StrategyKind::Probabilistic => Box::new(Probabilistic),
            StrategyKind::DefectionRate => Box::new(DefectionRate),
            StrategyKind::ExpectationTracker => Box::new(ExpectationTracker::default()),
        }
    }

    /// Display name, as used in reports and on the command line
    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Nice => "Nice",
            StrategyKind::Nasty => "Nasty",
            StrategyKind::Random => "Random",
            StrategyKind::Tolerant => "Tolerant",
            StrategyKind::Freaky => "Freaky",
            StrategyKind::TitForTat => "TitForTat",
            StrategyKind::ConsensusMixer => "ConsensusMixer",
            StrategyKind::AlternatingTitForTat => "AlternatingTitForTat",
            StrategyKind::TolerantTitForTat => "TolerantTitForTat",
            StrategyKind::AggressiveTitForTat => "AggressiveTitForTat",
            StrategyKind::LenientRectifyingTitForTat => "LenientRectifyingTitForTat",
            StrategyKind::RectifyingTitForTat => "RectifyingTitForTat",
            StrategyKind::TolerantSlyTitForTat => "TolerantSlyTitForTat",
            StrategyKind::LenientRectification => "LenientRectification",
            StrategyKind::AggressiveRectification => "AggressiveRectification",
            StrategyKind::LenientTitForTatCooperate => "LenientTitForTatCooperate",
            StrategyKind::LenientTitForTatDefect => "LenientTitForTatDefect",
            StrategyKind::HistoryRectification => "HistoryRectification",
            StrategyKind::Aggressive => "Aggressive",
            StrategyKind::Lenient => "Lenient",
            StrategyKind::Probabilistic => "Probabilistic",
            StrategyKind::DefectionRate => "DefectionRate",
            StrategyKind::ExpectationTracker => "ExpectationTracker",
        }
    }

    /// Look a kind up by display name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

/// Get a human-readable description of a strategy
pub fn describe_strategy(kind: StrategyKind) -> &'static str {
    match kind {
        StrategyKind::Nice => "Never defects. Always cooperates.",
        StrategyKind::Nasty => "Never cooperates. Always defects.",
        StrategyKind::Random => "Cooperates or defects with equal probability each round.",
        StrategyKind::Tolerant => "Defects only if opponents defected more often than they cooperated.",
        StrategyKind::Freaky => "Decides once per match to always cooperate or always defect.",
        StrategyKind::TitForTat => "Starts nice, then copies the last move of a random opponent.",
        StrategyKind::ConsensusMixer => {
            "Follows opponents when they agree; otherwise mixes tolerant and history-based play. Defects in round 109."
        }
        StrategyKind::AlternatingTitForTat => {
            "Follows opponents when they agree; tolerant on odd rounds, rectifying on even rounds."
        }
        StrategyKind::TolerantTitForTat => "Follows opponents when they agree, otherwise tolerant.",
        StrategyKind::AggressiveTitForTat => {
            "Follows opponents when they agree, otherwise tolerant with ties defecting."
        }
        StrategyKind::LenientRectifyingTitForTat => {
            "Follows opponents when they agree, otherwise evens out defection counts."
        }
        StrategyKind::RectifyingTitForTat => {
            "Follows opponents when they agree; tolerant on odd rounds, rectifying on even rounds."
        }
        StrategyKind::TolerantSlyTitForTat => {
            "Defects after ten clean rounds, cooperates along, answers joint defection."
        }
        StrategyKind::LenientRectification => {
            "Follows opponents when they agree, otherwise inverts its own last move."
        }
        StrategyKind::AggressiveRectification => {
            "Follows opponents when they agree, otherwise repeats its own last move."
        }
        StrategyKind::LenientTitForTatCooperate => "Follows opponents when they agree, otherwise cooperates.",
        StrategyKind::LenientTitForTatDefect => "Follows opponents when they agree, otherwise defects.",
        StrategyKind::HistoryRectification => {
            "Cooperates while it has defected at least as often as each opponent."
        }
        StrategyKind::Aggressive => "Defects once opponents defected at least as often as they cooperated.",
        StrategyKind::Lenient => "Starts nice, then inverts its own last move.",
        StrategyKind::Probabilistic => {
            "Cooperates with reliable cooperators until a random late round, otherwise defects."
        }
        StrategyKind::DefectionRate => "Punishes recent defection and distrusts frequent defectors.",
        StrategyKind::ExpectationTracker => {
            "Keeps cooperation streaks, exploits or avoids predictable opponents, defects from round 109."
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
