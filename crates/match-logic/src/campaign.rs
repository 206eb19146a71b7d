//! Repeated tournaments and rank statistics for one designated player

use serde::Serialize;
use crate::error::ArenaError;
use crate::game::RoundConfig;
use crate::random::SeededRng;
use crate::roster::StrategyFactory;
use crate::tournament::{run_tournament, TournamentResult};

/// Campaign parameters
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CampaignConfig {
    pub tournaments: usize,
    /// Roster slot whose finishing position is tracked
    pub designated: usize,
    pub seed: u64,
    /// Worker threads for the parallel campaign; `None` lets rayon decide
    pub threads: Option<usize>,
    pub round_config: RoundConfig,
}

impl CampaignConfig {
    pub fn new(tournaments: usize, designated: usize, seed: u64) -> Self {
        Self {
            tournaments,
            designated,
            seed,
            threads: None,
            round_config: RoundConfig::standard(),
        }
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn with_round_config(mut self, round_config: RoundConfig) -> Self {
        self.round_config = round_config;
        self
    }

    fn validate<F: StrategyFactory + ?Sized>(&self, factory: &F) -> Result<(), ArenaError> {
        if self.tournaments == 0 {
            return Err(ArenaError::NoTournaments);
        }
        let size = factory.roster_size();
        if self.designated >= size {
            return Err(ArenaError::UnknownSlot { slot: self.designated, size });
        }
        Ok(())
    }

    /// Independent random stream for tournament `index`
    fn rng_for(&self, index: usize) -> SeededRng {
        SeededRng::new(self.seed, index as u64)
    }
}

/// How often the designated player finished in each position
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RankHistogram {
    counts: Vec<u64>,
    tournaments: u64,
}

impl RankHistogram {
    /// One bucket per finishing position
    pub fn new(roster_size: usize) -> Self {
        Self {
            counts: vec![0; roster_size],
            tournaments: 0,
        }
    }

    /// Count one tournament finished at `position` (0-based)
    pub fn record(&mut self, position: usize) -> Result<(), ArenaError> {
        let size = self.counts.len();
        let count = self
            .counts
            .get_mut(position)
            .ok_or(ArenaError::PositionOutOfRange { position, size })?;
        *count += 1;
        self.tournaments += 1;
        Ok(())
    }

    /// Fold another partial histogram into this one
    pub fn merge(&mut self, other: &RankHistogram) {
        for (mine, theirs) in self.counts.iter_mut().zip(&other.counts) {
            *mine += theirs;
        }
        self.tournaments += other.tournaments;
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn tournaments(&self) -> u64 {
        self.tournaments
    }

    /// Fraction of tournaments finished at `position`
    pub fn probability(&self, position: usize) -> Option<f64> {
        let count = *self.counts.get(position)?;
        if self.tournaments == 0 {
            return Some(0.0);
        }
        Some(count as f64 / self.tournaments as f64)
    }

    pub fn probabilities(&self) -> Vec<f64> {
        (0..self.counts.len())
            .filter_map(|position| self.probability(position))
            .collect()
    }
}

fn record_result(
    histogram: &mut RankHistogram,
    result: &TournamentResult,
    designated: usize,
) -> Result<(), ArenaError> {
    let position = result.position_of(designated).ok_or(ArenaError::UnknownSlot {
        slot: designated,
        size: result.ranking.len(),
    })?;
    histogram.record(position)
}

/// Run the campaign on the current thread
pub fn run_campaign<F>(factory: &F, config: &CampaignConfig) -> Result<RankHistogram, ArenaError>
where
    F: StrategyFactory + ?Sized,
{
    run_campaign_with(factory, config, |_, _| {})
}

/// Run the campaign on the current thread, handing every finished
/// tournament to `on_tournament` along with its index
pub fn run_campaign_with<F, T>(
    factory: &F,
    config: &CampaignConfig,
    mut on_tournament: T,
) -> Result<RankHistogram, ArenaError>
where
    F: StrategyFactory + ?Sized,
    T: FnMut(usize, &TournamentResult),
{
    config.validate(factory)?;

    let mut histogram = RankHistogram::new(factory.roster_size());
    for index in 0..config.tournaments {
        let mut rng = config.rng_for(index);
        let result = run_tournament(factory, &config.round_config, &mut rng);
        record_result(&mut histogram, &result, config.designated)?;
        on_tournament(index, &result);
    }

    log::info!(
        "campaign finished: {} tournaments, designated slot {}",
        histogram.tournaments(),
        config.designated
    );
    Ok(histogram)
}

/// Run the campaign's tournaments across a rayon pool.
///
/// Each worker folds its own partial histogram and the partials are summed
/// at the end. Tournament `t` always draws from stream `t` of the seed, so
/// the result equals [`run_campaign`] for the same config.
#[cfg(feature = "parallel")]
pub fn run_campaign_parallel<F>(factory: &F, config: &CampaignConfig) -> Result<RankHistogram, ArenaError>
where
    F: StrategyFactory + Sync + ?Sized,
{
    use rayon::prelude::*;

    config.validate(factory)?;

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = config.threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder
        .build()
        .map_err(|e| ArenaError::WorkerPool(e.to_string()))?;
    log::debug!("campaign pool started with {} threads", pool.current_num_threads());

    let size = factory.roster_size();
    let histogram = pool.install(|| {
        (0..config.tournaments)
            .into_par_iter()
            .try_fold(
                || RankHistogram::new(size),
                |mut partial, index| {
                    let mut rng = config.rng_for(index);
                    let result = run_tournament(factory, &config.round_config, &mut rng);
                    record_result(&mut partial, &result, config.designated)?;
                    Ok::<_, ArenaError>(partial)
                },
            )
            .try_reduce(
                || RankHistogram::new(size),
                |mut left, right| {
                    left.merge(&right);
                    Ok(left)
                },
            )
    })?;

    log::info!(
        "campaign finished: {} tournaments, designated slot {}",
        histogram.tournaments(),
        config.designated
    );
    Ok(histogram)
}
