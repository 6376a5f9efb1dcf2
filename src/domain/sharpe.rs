//! Annualized Sharpe ratio of each asset against a benchmark.
//!
//! SHARPE = sqrt(periods) * mean(R_asset - R_bench) / std(R_asset - R_bench)
//!
//! Every asset is computed independently; a failure for one asset never
//! affects the others.

use crate::domain::alignment::align;
use crate::domain::error::RatioError;
use crate::domain::returns::{excess_returns, simple_returns, ReturnSeries};
use crate::domain::stats::{mean, std_dev, StdConvention};
use crate::domain::time_series::{PriceSeries, TimeSeriesTable};
use std::collections::BTreeMap;
use tracing::debug;

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Fewest excess returns a ratio is computed from.
pub const MIN_OBSERVATIONS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharpeConfig {
    pub annualization_factor: f64,
    pub std_convention: StdConvention,
}

impl SharpeConfig {
    /// Annualize by sqrt(periods_per_year).
    pub fn from_periods(periods_per_year: f64) -> Self {
        Self {
            annualization_factor: periods_per_year.sqrt(),
            std_convention: StdConvention::Sample,
        }
    }
}

impl Default for SharpeConfig {
    fn default() -> Self {
        Self::from_periods(TRADING_DAYS_PER_YEAR)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SharpeRatio {
    pub asset: String,
    pub observations: usize,
    pub mean_excess: f64,
    pub std_excess: f64,
    pub daily: f64,
    pub annual: f64,
}

pub type RatioResult = Result<SharpeRatio, RatioError>;

/// Excess return series of every asset column against the benchmark, after
/// aligning both on date.
pub fn excess_return_series(
    assets: &TimeSeriesTable,
    benchmark: &PriceSeries,
) -> BTreeMap<String, Result<ReturnSeries, RatioError>> {
    let aligned = align(assets, benchmark);
    let bench_returns = simple_returns(&aligned.benchmark);

    aligned
        .assets
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let series = PriceSeries::new(
                name.clone(),
                aligned
                    .assets
                    .rows()
                    .filter_map(|(date, row)| row[idx].map(|v| (date, v))),
            );
            let excess = match &bench_returns {
                Ok(bench) => simple_returns(&series).map(|r| excess_returns(&r, bench)),
                Err(e) => Err(e.clone().for_asset(name)),
            };
            (name.clone(), excess)
        })
        .collect()
}

/// Sharpe ratio of a single excess return series.
pub fn sharpe_from_excess(excess: &ReturnSeries, config: &SharpeConfig) -> RatioResult {
    let values = excess.values();
    let observations = values.len();
    let insufficient = || RatioError::InsufficientData {
        asset: excess.name.clone(),
        observations,
        minimum: MIN_OBSERVATIONS,
    };
    if observations < MIN_OBSERVATIONS {
        return Err(insufficient());
    }

    if let Some((date, value)) = excess.points.iter().find(|(_, v)| !v.is_finite()) {
        return Err(RatioError::InvalidInput {
            asset: excess.name.clone(),
            date: *date,
            reason: format!("return overflow, excess return is {value}"),
        });
    }

    let mean_excess = mean(&values).ok_or_else(insufficient)?;
    let std_excess = std_dev(&values, config.std_convention).ok_or_else(insufficient)?;
    if !mean_excess.is_finite() || !std_excess.is_finite() {
        // every value is finite, so only the sums overflowed
        let date = excess.points.keys().next_back().copied().ok_or_else(insufficient)?;
        return Err(RatioError::InvalidInput {
            asset: excess.name.clone(),
            date,
            reason: "return overflow in excess return statistics".into(),
        });
    }
    if std_excess == 0.0 {
        return Err(RatioError::UndefinedRatio {
            asset: excess.name.clone(),
        });
    }

    let daily = mean_excess / std_excess;
    Ok(SharpeRatio {
        asset: excess.name.clone(),
        observations,
        mean_excess,
        std_excess,
        daily,
        annual: daily * config.annualization_factor,
    })
}

/// One result per asset column of `assets`, keyed by column name.
pub fn compute_sharpe_ratios(
    assets: &TimeSeriesTable,
    benchmark: &PriceSeries,
    config: &SharpeConfig,
) -> BTreeMap<String, RatioResult> {
    excess_return_series(assets, benchmark)
        .into_iter()
        .map(|(name, excess)| {
            let result = excess.and_then(|e| sharpe_from_excess(&e, config));
            if let Err(ref e) = result {
                debug!(asset = %name, error = %e, "no ratio for asset");
            }
            (name, result)
        })
        .collect()
}
