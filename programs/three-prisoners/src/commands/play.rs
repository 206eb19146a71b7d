//! Single match between three chosen players

use anyhow::Context;
use match_logic::{determine_round_count, run_match, RoundConfig, Roster, SeededRng, StrategyFactory};
use crate::report::MatchReport;

/// Play one match; `players` are slot numbers or names for seats A, B and C.
///
/// Instances are built before the round count is drawn, as in a tournament.
pub fn run(
    roster: &Roster,
    players: [&str; 3],
    rounds: Option<usize>,
    round_config: &RoundConfig,
    seed: u64,
) -> anyhow::Result<MatchReport> {
    let mut slots = [0usize; 3];
    for (seat, query) in players.into_iter().enumerate() {
        slots[seat] = roster
            .find(query)
            .with_context(|| format!("cannot seat player {:?}", query))?;
    }

    let mut rng = SeededRng::new(seed, 0);
    let mut a = roster.make_instance(slots[0], &mut rng)?;
    let mut b = roster.make_instance(slots[1], &mut rng)?;
    let mut c = roster.make_instance(slots[2], &mut rng)?;
    let round_count = rounds.unwrap_or_else(|| determine_round_count(&mut rng, round_config));

    let result = run_match(a.as_mut(), b.as_mut(), c.as_mut(), round_count, &mut rng)
        .context("match failed")?;
    let names = [
        roster.name(slots[0])?.to_string(),
        roster.name(slots[1])?.to_string(),
        roster.name(slots[2])?.to_string(),
    ];
    log::info!("{} vs {} vs {}: {:?}", names[0], names[1], names[2], result.averages);

    Ok(MatchReport::new(seed, names, result))
}
