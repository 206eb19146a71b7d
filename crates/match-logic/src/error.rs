//! Error codes for match, tournament and campaign operations

use thiserror::Error;

/// Everything that can go wrong inside the engine.
///
/// A failing match never aborts its tournament: the scheduler records the
/// error next to the offending roster slots and moves on.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ArenaError {
    #[error("invalid action {0}: expected 0 (cooperate) or 1 (defect)")]
    InvalidAction(u8),

    #[error("invalid round count {0}: a match plays between 1 and {max} rounds", max = crate::game::MAX_ROUNDS)]
    InvalidRoundCount(usize),

    #[error("invalid round range {min}..={max}: minimum exceeds maximum")]
    InvalidRoundRange { min: usize, max: usize },

    #[error("unknown roster slot {slot} (roster has {size} players)")]
    UnknownSlot { slot: usize, size: usize },

    #[error("unknown player {0:?}")]
    UnknownPlayer(String),

    #[error("finishing position {position} out of range (roster has {size} players)")]
    PositionOutOfRange { position: usize, size: usize },

    #[error("a campaign needs at least one tournament")]
    NoTournaments,

    #[error("failed to start worker pool: {0}")]
    WorkerPool(String),
}
