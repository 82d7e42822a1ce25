//! Forecast Summarizer
//!
//! Reduces a path ensemble to its cross-path mean and an empirical
//! 5th/95th percentile envelope at every step. Percentiles interpolate
//! linearly between order statistics (rank = p/100 * (n - 1)).

use rayon::prelude::*;
use statrs::statistics::Statistics;

use crate::domain::{ForecastError, ForecastResult, ForecastSummary, PathEnsemble};

/// Lower edge of the default 90% band
pub const LOWER_PERCENTILE: f64 = 5.0;
/// Upper edge of the default 90% band
pub const UPPER_PERCENTILE: f64 = 95.0;

/// Linear-interpolated percentile of an ascending slice
fn percentile_sorted(sorted: &[f64], pct: f64) -> f64 {
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Mean path and 90% band
pub fn summarize(ensemble: &PathEnsemble) -> ForecastResult<ForecastSummary> {
    summarize_with(ensemble, LOWER_PERCENTILE, UPPER_PERCENTILE)
}

/// Mean path and a custom percentile band
pub fn summarize_with(ensemble: &PathEnsemble, lower_pct: f64, upper_pct: f64) -> ForecastResult<ForecastSummary> {
    if ensemble.path_count() == 0 {
        return Err(ForecastError::EmptyEnsemble);
    }
    if !(0.0..=100.0).contains(&lower_pct) || !(0.0..=100.0).contains(&upper_pct) || lower_pct > upper_pct {
        return Err(ForecastError::invalid(format!(
            "percentile band [{}, {}] must satisfy 0 <= lower <= upper <= 100",
            lower_pct, upper_pct
        )));
    }

    let rows: Vec<(f64, f64, f64)> = (0..ensemble.steps())
        .into_par_iter()
        .map(|step| {
            let mut row = ensemble.row(step);
            let mean = row.iter().mean();
            row.sort_by(|a, b| a.total_cmp(b));
            (
                mean,
                percentile_sorted(&row, lower_pct),
                percentile_sorted(&row, upper_pct),
            )
        })
        .collect();

    let mut summary = ForecastSummary {
        times: ensemble.times().to_vec(),
        mean_path: Vec::with_capacity(rows.len()),
        lower_band: Vec::with_capacity(rows.len()),
        upper_band: Vec::with_capacity(rows.len()),
    };
    for (mean, lower, upper) in rows {
        summary.mean_path.push(mean);
        summary.lower_band.push(lower);
        summary.upper_band.push(upper);
    }
    Ok(summary)
}
