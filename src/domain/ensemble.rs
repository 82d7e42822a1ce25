//! Path Ensemble and Forecast Summary
//!
//! A `PathEnsemble` is the (steps x paths) grid of simulated prices. Paths are
//! stored one trajectory per vector, so column access is a slice and row
//! access walks across paths.

use serde::{Deserialize, Serialize};

/// Monte Carlo ensemble of simulated price paths on a shared time grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathEnsemble {
    times: Vec<f64>,
    paths: Vec<Vec<f64>>,
}

impl PathEnsemble {
    /// Assemble an ensemble from its time grid and trajectories.
    /// Every trajectory must have one value per grid point.
    pub(crate) fn from_paths(times: Vec<f64>, paths: Vec<Vec<f64>>) -> Self {
        debug_assert!(paths.iter().all(|p| p.len() == times.len()));
        Self { times, paths }
    }

    /// Grid times t_i = i * step_size
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Number of time steps N
    pub fn steps(&self) -> usize {
        self.times.len()
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Value of `path` at `step`
    pub fn value(&self, step: usize, path: usize) -> f64 {
        self.paths[path][step]
    }

    /// One full trajectory
    pub fn path(&self, path: usize) -> &[f64] {
        &self.paths[path]
    }

    pub fn paths(&self) -> &[Vec<f64>] {
        &self.paths
    }

    /// Cross-section of all paths at one step
    pub fn row(&self, step: usize) -> Vec<f64> {
        self.paths.iter().map(|p| p[step]).collect()
    }

    /// Final value of every path
    pub fn terminal_values(&self) -> Vec<f64> {
        match self.steps() {
            0 => Vec::new(),
            n => self.row(n - 1),
        }
    }

    /// Smallest value anywhere in the ensemble
    pub fn min_value(&self) -> Option<f64> {
        self.paths.iter().flatten().copied().reduce(f64::min)
    }
}

/// Mean path and empirical confidence band, aligned to the ensemble grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub times: Vec<f64>,
    pub mean_path: Vec<f64>,
    pub lower_band: Vec<f64>,
    pub upper_band: Vec<f64>,
}

impl ForecastSummary {
    pub fn len(&self) -> usize {
        self.mean_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean_path.is_empty()
    }

    /// (mean, lower, upper) at the last step
    pub fn terminal(&self) -> Option<(f64, f64, f64)> {
        let last = self.len().checked_sub(1)?;
        Some((self.mean_path[last], self.lower_band[last], self.upper_band[last]))
    }
}
