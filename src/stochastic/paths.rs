//! Path Generation Driver
//!
//! Shared Monte Carlo loop for every price process. Paths are generated in
//! parallel with rayon; the caller's random source only supplies a base seed
//! and path `j` runs on its own `StdRng` seeded with `base + j`, so the
//! ensemble is identical whatever the thread count or scheduling.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::domain::{ForecastResult, PathEnsemble, SimulationConfig};

/// A discretized price process that can produce a path ensemble
pub trait PathSimulator {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    /// Simulate `config.path_count` independent paths, drawing randomness from `rng`
    fn simulate<R: Rng + ?Sized>(&self, config: &SimulationConfig, rng: &mut R) -> ForecastResult<PathEnsemble>;

    /// Simulate from a fixed seed
    fn simulate_seeded(&self, config: &SimulationConfig, seed: u64) -> ForecastResult<PathEnsemble> {
        self.simulate(config, &mut StdRng::seed_from_u64(seed))
    }
}

/// Run `step(prev, rng) -> next` for every path over the grid of `config`.
/// `config` must already be validated.
pub(crate) fn generate<R, F>(config: &SimulationConfig, rng: &mut R, step: F) -> PathEnsemble
where
    R: Rng + ?Sized,
    F: Fn(f64, &mut StdRng) -> f64 + Sync,
{
    let steps = config.steps();
    let base_seed: u64 = rng.gen();

    tracing::debug!(
        steps,
        paths = config.path_count,
        base_seed,
        "generating path ensemble"
    );

    let paths: Vec<Vec<f64>> = (0..config.path_count)
        .into_par_iter()
        .map(|j| {
            let mut path_rng = StdRng::seed_from_u64(base_seed.wrapping_add(j as u64));
            let mut path = Vec::with_capacity(steps);
            let mut s = config.initial_price;
            path.push(s);
            for _ in 1..steps {
                s = step(s, &mut path_rng);
                path.push(s);
            }
            path
        })
        .collect();

    PathEnsemble::from_paths(config.time_grid(), paths)
}
