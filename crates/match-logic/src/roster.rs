//! Competition roster and strategy construction

use crate::error::ArenaError;
use crate::random::SeededRng;
use crate::strategy::{Strategy, StrategyKind};

/// Builds strategy instances for roster slots.
///
/// The scheduler asks for a new instance for every seat of every match, so
/// implementations must never hand out shared state.
pub trait StrategyFactory {
    /// Number of roster slots
    fn roster_size(&self) -> usize;

    /// Display name of a slot
    fn name(&self, slot: usize) -> Result<&str, ArenaError>;

    /// Fresh, independently initialized instance for `slot`
    fn make_instance(&self, slot: usize, rng: &mut SeededRng) -> Result<Box<dyn Strategy>, ArenaError>;
}

/// An ordered list of strategy kinds; a kind's index is its roster slot
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roster {
    kinds: Vec<StrategyKind>,
}

impl Roster {
    pub fn new(kinds: Vec<StrategyKind>) -> Self {
        Self { kinds }
    }

    /// The full 23-player roster
    pub fn standard() -> Self {
        Self::new(StrategyKind::ALL.to_vec())
    }

    pub fn kinds(&self) -> &[StrategyKind] {
        &self.kinds
    }

    pub fn kind(&self, slot: usize) -> Result<StrategyKind, ArenaError> {
        self.kinds.get(slot).copied().ok_or(ArenaError::UnknownSlot {
            slot,
            size: self.kinds.len(),
        })
    }

    /// Resolve a slot from its index or a strategy name (case-insensitive)
    pub fn find(&self, query: &str) -> Result<usize, ArenaError> {
        if let Ok(slot) = query.trim().parse::<usize>() {
            self.kind(slot)?;
            return Ok(slot);
        }
        self.kinds
            .iter()
            .position(|kind| kind.name().eq_ignore_ascii_case(query.trim()))
            .ok_or_else(|| ArenaError::UnknownPlayer(query.to_string()))
    }
}

impl StrategyFactory for Roster {
    fn roster_size(&self) -> usize {
        self.kinds.len()
    }

    fn name(&self, slot: usize) -> Result<&str, ArenaError> {
        self.kind(slot).map(StrategyKind::name)
    }

    fn make_instance(&self, slot: usize, rng: &mut SeededRng) -> Result<Box<dyn Strategy>, ArenaError> {
        Ok(self.kind(slot)?.instantiate(rng))
    }
}
