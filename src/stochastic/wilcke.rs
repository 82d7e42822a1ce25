//! Wilcke Process Simulator
//!
//! Euler-Maruyama integration of the mean-reverting SDE with alpha-stable noise:
//!
//! S(i) = max(S(i-1) + theta (mu - S(i-1)) dt + sigma S(i-1) dL, 0.01)
//!
//! where dL ~ Stable(alpha, beta, 0, dt^(1/alpha)). The dt^(1/alpha) scale is
//! the stable self-similarity exponent and plays the role of sqrt(dt) in the
//! Gaussian case. The absorbing floor keeps prices strictly positive.

use rand::distributions::Distribution;
use rand::Rng;

use super::paths::{generate, PathSimulator};
use super::stable_noise::StableNoise;
use crate::domain::{ForecastError, ForecastResult, ModelParameters, PathEnsemble, SimulationConfig};

/// Lowest price a path can take
pub const PRICE_FLOOR: f64 = 0.01;

/// Mean-reverting process driven by alpha-stable Levy increments
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WilckeProcess {
    params: ModelParameters,
}

impl WilckeProcess {
    pub fn new(params: ModelParameters) -> ForecastResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    /// Noise increment distribution for one step of width `dt`
    fn increment(&self, dt: f64) -> ForecastResult<StableNoise> {
        let alpha = self.params.alpha;
        let scale = dt.powf(1.0 / alpha);
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ForecastError::invalid(format!(
                "alpha {} too small for step_size {}: increment scale dt^(1/alpha) is {}",
                alpha, dt, scale
            )));
        }
        StableNoise::new(alpha, self.params.beta, scale)
    }
}

impl PathSimulator for WilckeProcess {
    fn name(&self) -> &'static str {
        "wilcke"
    }

    fn simulate<R: Rng + ?Sized>(&self, config: &SimulationConfig, rng: &mut R) -> ForecastResult<PathEnsemble> {
        config.validate()?;
        self.params.validate()?;

        let dt = config.step_size;
        let noise = self.increment(dt)?;
        let ModelParameters { theta, mu, sigma, .. } = self.params;

        Ok(generate(config, rng, |s_prev, path_rng| {
            let dl = noise.sample(path_rng);
            let drift = theta * (mu - s_prev) * dt;
            let diffusion = sigma * s_prev * dl;
            (s_prev + drift + diffusion).max(PRICE_FLOOR)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use statrs::statistics::Statistics;

    fn process(theta: f64, mu: f64, sigma: f64, alpha: f64, beta: f64) -> WilckeProcess {
        WilckeProcess::new(ModelParameters::new(theta, mu, sigma, alpha, beta).unwrap()).unwrap()
    }

    #[test]
    fn test_zero_volatility_zero_reversion_is_flat() {
        let wilcke = process(0.0, 0.0, 0.0, 1.7, 0.0);
        let config = SimulationConfig::new(100.0, 1.0, 1.0 / 252.0, 5).unwrap();

        let ensemble = wilcke.simulate_seeded(&config, 42).unwrap();

        assert_eq!(ensemble.path_count(), 5);
        assert_eq!(ensemble.steps(), 252);
        for path in ensemble.paths() {
            assert!(path.iter().all(|&s| s == 100.0));
        }
    }

    #[test]
    fn test_first_row_is_initial_price() {
        let wilcke = process(0.5, 0.1, 0.3, 1.6, 0.0);
        let config = SimulationConfig::daily(37.5, 0.5, 20).unwrap();

        let ensemble = wilcke.simulate_seeded(&config, 3).unwrap();
        assert_eq!(ensemble.row(0), vec![37.5; 20]);
        assert_eq!(ensemble.times()[0], 0.0);
        assert_relative_eq!(ensemble.times()[1], 1.0 / 252.0, epsilon = 1e-15);
    }

    #[test]
    fn test_floor_holds_under_extreme_noise() {
        // huge volatility with fully negative skew drives many paths into the floor
        let wilcke = process(0.5, 0.0, 50.0, 1.1, -1.0);
        let config = SimulationConfig::daily(10.0, 1.0, 50).unwrap();

        let ensemble = wilcke.simulate_seeded(&config, 17).unwrap();
        let min = ensemble.min_value().unwrap();

        assert!(min >= PRICE_FLOOR, "value below floor: {}", min);
        assert!(ensemble.paths().iter().flatten().all(|v| v.is_finite()));
        assert!(ensemble.paths().iter().flatten().any(|&v| v == PRICE_FLOOR));
    }

    #[test]
    fn test_floor_holds_across_alpha() {
        let config = SimulationConfig::daily(1.0, 0.5, 20).unwrap();
        for &alpha in &[0.5, 1.0, 1.5, 2.0] {
            let wilcke = process(2.0, 0.0, 5.0, alpha, 0.0);
            let ensemble = wilcke.simulate_seeded(&config, 29).unwrap();
            assert!(ensemble.min_value().unwrap() >= PRICE_FLOOR);
        }
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let wilcke = process(0.5, 0.2, 0.3, 1.7, 0.1);
        let config = SimulationConfig::daily(100.0, 1.0, 30).unwrap();

        let a = wilcke.simulate(&config, &mut StdRng::seed_from_u64(2026)).unwrap();
        let b = wilcke.simulate(&config, &mut StdRng::seed_from_u64(2026)).unwrap();
        assert_eq!(a, b);

        let c = wilcke.simulate_seeded(&config, 2027).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_independent_of_thread_count() {
        let wilcke = process(0.5, 0.2, 0.3, 1.7, 0.0);
        let config = SimulationConfig::daily(100.0, 0.5, 16).unwrap();

        let single = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .unwrap()
            .install(|| wilcke.simulate_seeded(&config, 5).unwrap());
        let multi = rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .unwrap()
            .install(|| wilcke.simulate_seeded(&config, 5).unwrap());

        assert_eq!(single, multi);
    }

    #[test]
    fn test_reverts_toward_mu() {
        let wilcke = process(5.0, 120.0, 0.01, 2.0, 0.0);
        let config = SimulationConfig::daily(100.0, 2.0, 200).unwrap();

        let ensemble = wilcke.simulate_seeded(&config, 11).unwrap();
        let terminal_mean = ensemble.terminal_values().mean();
        assert_relative_eq!(terminal_mean, 120.0, max_relative = 0.01);
    }

    #[test]
    fn test_invalid_inputs_fail_fast() {
        let wilcke = process(0.5, 0.1, 0.3, 1.7, 0.0);
        let mut rng = StdRng::seed_from_u64(1);

        let zero_paths = SimulationConfig {
            initial_price: 100.0,
            horizon_years: 1.0,
            step_size: 0.01,
            path_count: 0,
        };
        assert_eq!(wilcke.simulate(&zero_paths, &mut rng), Err(ForecastError::EmptyEnsemble));

        let bad_price = SimulationConfig {
            initial_price: -5.0,
            ..zero_paths
        };
        assert!(matches!(
            wilcke.simulate(&bad_price, &mut rng),
            Err(ForecastError::NonPositivePrice { .. })
        ));

        let bad_params = ModelParameters {
            theta: 0.5,
            mu: 0.1,
            sigma: 0.3,
            alpha: 2.5,
            beta: 0.0,
        };
        assert!(WilckeProcess::new(bad_params).is_err());
    }

    #[test]
    fn test_increment_scale_follows_self_similarity() {
        let wilcke = process(0.5, 0.1, 0.3, 1.6, 0.2);
        let dt = 1.0 / 252.0;

        let noise = wilcke.increment(dt).unwrap();
        assert_eq!(noise.alpha(), wilcke.params().alpha);
        assert_eq!(noise.beta(), wilcke.params().beta);
        assert_relative_eq!(noise.scale(), dt.powf(1.0 / 1.6), max_relative = 1e-12);
    }

    #[test]
    fn test_tiny_alpha_reports_underflow() {
        // (1/252)^(1/0.004) is far below the smallest f64
        let wilcke = process(0.5, 0.1, 0.3, 0.004, 0.0);
        let config = SimulationConfig::daily(100.0, 0.1, 3).unwrap();

        match wilcke.simulate_seeded(&config, 1) {
            Err(ForecastError::InvalidParameter(msg)) => {
                assert!(msg.contains("too small for step_size"), "unexpected message: {}", msg);
            }
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }
}
