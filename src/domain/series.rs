//! Price and Return Series
//!
//! `PriceSeries` guarantees strictly positive, finite values so log-price and
//! log-return computations never see a zero or negative input.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{ForecastError, ForecastResult};

/// Time-ordered sequence of strictly positive prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    values: Vec<f64>,
}

impl PriceSeries {
    /// Build a series, rejecting the first non-positive or non-finite value
    pub fn new(values: Vec<f64>) -> ForecastResult<Self> {
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(v.is_finite() && **v > 0.0))
        {
            return Err(ForecastError::NonPositivePrice { index, value });
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Most recent observation, used as the simulation starting price
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Natural log of every price
    pub fn log_prices(&self) -> Vec<f64> {
        self.values.iter().map(|p| p.ln()).collect()
    }

    /// Log returns `ln(p[i] / p[i-1])`, one shorter than the price series
    pub fn log_returns(&self) -> ReturnSeries {
        let returns = self
            .values
            .windows(2)
            .map(|w| (w[1] / w[0]).ln())
            .collect();
        ReturnSeries::new(returns)
    }
}

/// Time-ordered log returns with no gaps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    values: Vec<f64>,
}

impl ReturnSeries {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Price series paired with its observation dates, as delivered by a price source
#[derive(Debug, Clone, PartialEq)]
pub struct DatedPriceSeries {
    /// Asset symbol
    pub symbol: String,
    /// Observation dates, ascending
    pub dates: Vec<NaiveDate>,
    /// Prices aligned with `dates`
    pub prices: PriceSeries,
}

impl DatedPriceSeries {
    pub fn new(symbol: impl Into<String>, dates: Vec<NaiveDate>, prices: PriceSeries) -> ForecastResult<Self> {
        if dates.len() != prices.len() {
            return Err(ForecastError::invalid(format!(
                "{} dates for {} prices",
                dates.len(),
                prices.len()
            )));
        }
        Ok(Self {
            symbol: symbol.into(),
            dates,
            prices,
        })
    }

    /// Date of the last observation
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }
}

/// Forecast horizon in years between two dates (calendar days / 365.25)
pub fn horizon_years(start: NaiveDate, end: NaiveDate) -> ForecastResult<f64> {
    let days = (end - start).num_days();
    if days <= 0 {
        return Err(ForecastError::invalid(format!(
            "forecast end {} must be after start {}",
            end, start
        )));
    }
    Ok(days as f64 / 365.25)
}

/// Map a grid time in years back to a calendar date
pub fn date_at(start: NaiveDate, t_years: f64) -> NaiveDate {
    let days = (t_years * 365.25).round() as i64;
    start + chrono::Duration::days(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_price_series_rejects_non_positive() {
        assert!(PriceSeries::new(vec![1.0, 2.0, 3.0]).is_ok());

        let err = PriceSeries::new(vec![1.0, 0.0, 3.0]).unwrap_err();
        assert_eq!(err, ForecastError::NonPositivePrice { index: 1, value: 0.0 });

        let err = PriceSeries::new(vec![1.0, 2.0, -4.0]).unwrap_err();
        assert!(matches!(err, ForecastError::NonPositivePrice { index: 2, .. }));

        assert!(PriceSeries::new(vec![1.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_log_returns() {
        let prices = PriceSeries::new(vec![100.0, 110.0, 99.0]).unwrap();
        let returns = prices.log_returns();

        assert_eq!(returns.len(), 2);
        assert_relative_eq!(returns.as_slice()[0], (1.1f64).ln(), epsilon = 1e-12);
        assert_relative_eq!(returns.as_slice()[1], (0.9f64).ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_log_returns_short_series() {
        let single = PriceSeries::new(vec![42.0]).unwrap();
        assert!(single.log_returns().is_empty());
        assert_eq!(single.last(), Some(42.0));
    }

    #[test]
    fn test_horizon_years() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();
        assert_relative_eq!(horizon_years(start, end).unwrap(), 365.0 / 365.25, epsilon = 1e-12);

        assert!(horizon_years(end, start).is_err());
        assert!(horizon_years(start, start).is_err());
    }

    #[test]
    fn test_date_at() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(date_at(start, 0.0), start);
        assert_eq!(date_at(start, 1.0), NaiveDate::from_ymd_opt(2027, 1, 1).unwrap());
    }

    #[test]
    fn test_dated_series_length_mismatch() {
        let dates = vec![NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()];
        let prices = PriceSeries::new(vec![1.0, 2.0]).unwrap();
        assert!(DatedPriceSeries::new("VALE3", dates, prices).is_err());
    }
}
