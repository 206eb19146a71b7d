//! Match execution engine

use serde::Serialize;
use crate::error::ArenaError;
use crate::random::SeededRng;
use crate::strategy::{Move, Strategy};
use crate::payoffs;

/// Result of a single round
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoundResult {
    pub round: usize,
    pub moves: [Move; 3],
    pub scores: [u8; 3],
    pub cumulative: [u32; 3],
}

/// Result of a complete match
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchResult {
    pub rounds: Vec<RoundResult>,
    pub histories: [Vec<Move>; 3],
    pub totals: [u32; 3],
    /// Per-seat total divided by the round count
    pub averages: [f64; 3],
    pub round_count: usize,
}

/// Longest match the runner accepts; keeps histories and `u32` totals bounded
pub const MAX_ROUNDS: usize = 1_000_000;

/// Configuration for round count distribution per match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RoundConfig {
    min_rounds: usize,
    max_rounds: usize,
}

impl RoundConfig {
    /// Uniform round count in `[min_rounds, max_rounds]`
    pub fn new(min_rounds: usize, max_rounds: usize) -> Result<Self, ArenaError> {
        if min_rounds > max_rounds {
            return Err(ArenaError::InvalidRoundRange { min: min_rounds, max: max_rounds });
        }
        if max_rounds > MAX_ROUNDS {
            return Err(ArenaError::InvalidRoundCount(max_rounds));
        }
        Ok(Self { min_rounds, max_rounds })
    }

    /// Standard tournament config: 90 to 110 rounds
    pub fn standard() -> Self {
        Self { min_rounds: 90, max_rounds: 110 }
    }

    /// Every match lasts exactly `rounds` rounds
    pub fn fixed(rounds: usize) -> Self {
        Self { min_rounds: rounds, max_rounds: rounds }
    }

    pub fn min_rounds(&self) -> usize {
        self.min_rounds
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Determine how many rounds this match will have
pub fn determine_round_count(rng: &mut SeededRng, config: &RoundConfig) -> usize {
    rng.next_between(config.min_rounds, config.max_rounds)
}

/// Run a complete match between three strategies
///
/// # Arguments
/// * `a`, `b`, `c` - Fresh strategy instances for seats A, B and C
/// * `round_count` - Number of rounds to play, 1 to [`MAX_ROUNDS`]
/// * `rng` - Random source handed to the strategies
///
/// Each seat sees its own history first, then the other two in rotated
/// seat order: A sees (A, B, C), B sees (B, C, A), C sees (C, A, B).
pub fn run_match(
    a: &mut dyn Strategy,
    b: &mut dyn Strategy,
    c: &mut dyn Strategy,
    round_count: usize,
    rng: &mut SeededRng,
) -> Result<MatchResult, ArenaError> {
    if round_count == 0 || round_count > MAX_ROUNDS {
        return Err(ArenaError::InvalidRoundCount(round_count));
    }

    let mut history_a: Vec<Move> = Vec::with_capacity(round_count);
    let mut history_b: Vec<Move> = Vec::with_capacity(round_count);
    let mut history_c: Vec<Move> = Vec::with_capacity(round_count);
    let mut rounds: Vec<RoundResult> = Vec::with_capacity(round_count);
    let mut totals = [0u32; 3];

    for round in 0..round_count {
        // Moves are simultaneous: nobody sees this round's history yet
        let move_a = a.select_action(round, &history_a, &history_b, &history_c, rng);
        let move_b = b.select_action(round, &history_b, &history_c, &history_a, rng);
        let move_c = c.select_action(round, &history_c, &history_a, &history_b, rng);

        let (score_a, score_b, score_c) = payoffs(move_a, move_b, move_c);
        totals[0] += score_a as u32;
        totals[1] += score_b as u32;
        totals[2] += score_c as u32;

        rounds.push(RoundResult {
            round,
            moves: [move_a, move_b, move_c],
            scores: [score_a, score_b, score_c],
            cumulative: totals,
        });

        history_a.push(move_a);
        history_b.push(move_b);
        history_c.push(move_c);
    }

    let averages = totals.map(|total| total as f64 / round_count as f64);

    Ok(MatchResult {
        rounds,
        histories: [history_a, history_b, history_c],
        totals,
        averages,
        round_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::{Nasty, Nice, TitForTat};
    use crate::strategy::StrategyKind;
    use crate::{MAX_PAYOFF, MIN_PAYOFF};
    use proptest::prelude::*;
    use crate::strategy::Strategy;

    /// Records every history it is shown
    struct Spy {
        seen: Vec<(usize, usize, usize)>,
    }

    impl Strategy for Spy {
        fn select_action(&mut self, round: usize, own: &[Move], first: &[Move], second: &[Move], _: &mut SeededRng) -> Move {
            self.seen.push((own.len(), first.len(), second.len()));
            assert_eq!(own.len(), round);
            Move::Cooperate
        }
    }

    /// Cooperates, except seat-identifying defections in round 0
    struct Marker(Move);

    impl Strategy for Marker {
        fn select_action(&mut self, round: usize, _: &[Move], _: &[Move], _: &[Move], _: &mut SeededRng) -> Move {
            if round == 0 { self.0 } else { Move::Cooperate }
        }
    }

    /// Remembers what it saw as its opponents' round-0 moves
    struct Observer {
        first_seen: Option<(Move, Move, Move)>,
    }

    impl Strategy for Observer {
        fn select_action(&mut self, round: usize, own: &[Move], first: &[Move], second: &[Move], _: &mut SeededRng) -> Move {
            if round == 1 {
                self.first_seen = Some((own[0], first[0], second[0]));
            }
            Move::Cooperate
        }
    }

    #[test]
    fn test_round_count_standard_range() {
        let config = RoundConfig::standard();
        let mut rng = SeededRng::new(42, 0);
        for _ in 0..500 {
            let count = determine_round_count(&mut rng, &config);
            assert!((90..=110).contains(&count), "Standard round count {} out of [90,110]", count);
        }
    }

    #[test]
    fn test_round_count_standard_expected() {
        let config = RoundConfig::standard();
        let mut rng = SeededRng::new(42, 0);
        let samples = 2000;
        let total: usize = (0..samples).map(|_| determine_round_count(&mut rng, &config)).sum();
        let avg = total as f64 / samples as f64;
        assert!(avg > 98.0 && avg < 102.0, "Standard average {} not ~100", avg);
    }

    #[test]
    fn test_round_config_validation() {
        assert!(RoundConfig::new(90, 110).is_ok());
        assert!(RoundConfig::new(100, 100).is_ok());
        assert_eq!(
            RoundConfig::new(110, 90),
            Err(ArenaError::InvalidRoundRange { min: 110, max: 90 })
        );
        assert_eq!(RoundConfig::default(), RoundConfig::standard());
    }

    #[test]
    fn test_fixed_rounds() {
        let config = RoundConfig::fixed(100);
        let mut rng = SeededRng::new(7, 3);
        for _ in 0..20 {
            assert_eq!(determine_round_count(&mut rng, &config), 100);
        }
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let mut rng = SeededRng::new(42, 0);
        let result = run_match(&mut Nice, &mut Nice, &mut Nice, 0, &mut rng);
        assert_eq!(result, Err(ArenaError::InvalidRoundCount(0)));
    }

    #[test]
    fn test_oversized_round_count_rejected() {
        let mut rng = SeededRng::new(42, 0);
        let result = run_match(&mut Nice, &mut Nice, &mut Nice, usize::MAX, &mut rng);
        assert_eq!(result, Err(ArenaError::InvalidRoundCount(usize::MAX)));

        let result = run_match(&mut Nasty, &mut Nasty, &mut Nasty, MAX_ROUNDS + 1, &mut rng);
        assert_eq!(result, Err(ArenaError::InvalidRoundCount(MAX_ROUNDS + 1)));

        assert_eq!(
            RoundConfig::new(90, MAX_ROUNDS + 1),
            Err(ArenaError::InvalidRoundCount(MAX_ROUNDS + 1))
        );
        assert!(RoundConfig::new(1, MAX_ROUNDS).is_ok());
    }

    #[test]
    fn test_cooperate_vs_cooperate() {
        let mut rng = SeededRng::new(42, 0);
        let result = run_match(&mut Nice, &mut Nice, &mut Nice, 97, &mut rng).unwrap();

        for round in &result.rounds {
            assert_eq!(round.moves, [Move::Cooperate; 3]);
            assert_eq!(round.scores, [6; 3]);
        }
        assert_eq!(result.totals, [97 * 6; 3]);
        assert_eq!(result.averages, [6.0; 3]);
    }

    #[test]
    fn test_two_defectors_vs_cooperator() {
        let mut rng = SeededRng::new(42, 0);
        let result = run_match(&mut Nasty, &mut Nice, &mut Nasty, 100, &mut rng).unwrap();

        assert_eq!(result.averages, [5.0, 0.0, 5.0]);
        assert!(result.histories[1].iter().all(|m| *m == Move::Cooperate));
        assert!(result.histories[0].iter().all(|m| *m == Move::Defect));
    }

    #[test]
    fn test_all_defect() {
        let mut rng = SeededRng::new(42, 0);
        let result = run_match(&mut Nasty, &mut Nasty, &mut Nasty, 100, &mut rng).unwrap();
        assert_eq!(result.averages, [2.0; 3]);
    }

    #[test]
    fn test_histories_grow_one_per_round() {
        let mut rng = SeededRng::new(42, 0);
        let mut a = Spy { seen: Vec::new() };
        let mut b = Spy { seen: Vec::new() };
        let mut c = Spy { seen: Vec::new() };
        let result = run_match(&mut a, &mut b, &mut c, 12, &mut rng).unwrap();

        for spy in [&a, &b, &c] {
            let expected: Vec<_> = (0..12).map(|n| (n, n, n)).collect();
            assert_eq!(spy.seen, expected);
        }
        for history in &result.histories {
            assert_eq!(history.len(), 12);
        }
    }

    #[test]
    fn test_seat_rotation() {
        let mut rng = SeededRng::new(42, 0);
        // A defects in round 0, B cooperates, C is the observer
        let mut a = Marker(Move::Defect);
        let mut b = Marker(Move::Cooperate);
        let mut c = Observer { first_seen: None };
        run_match(&mut a, &mut b, &mut c, 3, &mut rng).unwrap();

        // C sees (C, A, B)
        assert_eq!(c.first_seen, Some((Move::Cooperate, Move::Defect, Move::Cooperate)));
    }

    #[test]
    fn test_cumulative_scores() {
        let mut rng = SeededRng::new(42, 0);
        let result = run_match(&mut TitForTat, &mut Nasty, &mut Nice, 50, &mut rng).unwrap();

        let mut expected = [0u32; 3];
        for round in &result.rounds {
            for seat in 0..3 {
                expected[seat] += round.scores[seat] as u32;
            }
            assert_eq!(round.cumulative, expected);
        }
        assert_eq!(result.totals, expected);
    }

    #[test]
    fn test_match_determinism() {
        let play = || {
            let mut rng = SeededRng::new(42, 5);
            let mut a = StrategyKind::Random.instantiate(&mut rng);
            let mut b = StrategyKind::TitForTat.instantiate(&mut rng);
            let mut c = StrategyKind::ConsensusMixer.instantiate(&mut rng);
            run_match(a.as_mut(), b.as_mut(), c.as_mut(), 100, &mut rng).unwrap()
        };
        assert_eq!(play(), play());
    }

    proptest! {
        #[test]
        fn prop_averages_within_payoff_bounds(
            seed in any::<u64>(),
            rounds in 1usize..150,
            ka in 0usize..23,
            kb in 0usize..23,
            kc in 0usize..23,
        ) {
            let mut rng = SeededRng::new(seed, 0);
            let mut a = StrategyKind::ALL[ka].instantiate(&mut rng);
            let mut b = StrategyKind::ALL[kb].instantiate(&mut rng);
            let mut c = StrategyKind::ALL[kc].instantiate(&mut rng);
            let result = run_match(a.as_mut(), b.as_mut(), c.as_mut(), rounds, &mut rng).unwrap();

            prop_assert_eq!(result.round_count, rounds);
            for seat in 0..3 {
                prop_assert_eq!(result.histories[seat].len(), rounds);
                prop_assert!(result.averages[seat] >= MIN_PAYOFF as f64);
                prop_assert!(result.averages[seat] <= MAX_PAYOFF as f64);
            }
        }
    }
}
