//! Daily simple returns and excess returns.
//!
//! RET[i] = P[i] / P[i-1] - 1 for i >= 1. The first date has no return and
//! is absent from the series.

use crate::domain::error::RatioError;
use crate::domain::time_series::PriceSeries;
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    pub name: String,
    pub points: BTreeMap<NaiveDate, f64>,
}

impl ReturnSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.values().copied().collect()
    }
}

/// Fails with `InvalidInput` on the first non-positive or non-finite price.
pub fn simple_returns(prices: &PriceSeries) -> Result<ReturnSeries, RatioError> {
    if let Some((date, price)) = prices
        .points
        .iter()
        .find(|(_, p)| !p.is_finite() || **p <= 0.0)
    {
        return Err(RatioError::InvalidInput {
            asset: prices.name.clone(),
            date: *date,
            reason: format!("price must be positive and finite, got {price}"),
        });
    }

    let points = prices
        .points
        .iter()
        .zip(prices.points.iter().skip(1))
        .map(|((_, prev), (date, curr))| (*date, curr / prev - 1.0))
        .collect();

    Ok(ReturnSeries {
        name: prices.name.clone(),
        points,
    })
}

/// Asset return minus benchmark return on each date both carry.
pub fn excess_returns(asset: &ReturnSeries, benchmark: &ReturnSeries) -> ReturnSeries {
    let points = asset
        .points
        .iter()
        .filter_map(|(date, r)| benchmark.points.get(date).map(|b| (*date, r - b)))
        .collect();
    ReturnSeries {
        name: asset.name.clone(),
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2016, 1, d).unwrap()
    }

    fn prices(name: &str, values: &[f64]) -> PriceSeries {
        PriceSeries::new(
            name,
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| (date(i as u32 + 1), v)),
        )
    }

    #[test]
    fn first_date_has_no_return() {
        let rets = simple_returns(&prices("AMZN", &[100.0, 102.0, 101.0])).unwrap();
        assert_eq!(rets.len(), 2);
        assert!(!rets.points.contains_key(&date(1)));
        assert!((rets.points[&date(2)] - 0.02).abs() < 1e-12);
        assert!((rets.points[&date(3)] - (101.0 / 102.0 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn single_price_gives_empty_series() {
        let rets = simple_returns(&prices("AMZN", &[100.0])).unwrap();
        assert!(rets.is_empty());
    }

    #[test]
    fn zero_price_is_invalid() {
        let err = simple_returns(&prices("FB", &[100.0, 0.0, 101.0])).unwrap_err();
        assert!(matches!(err, RatioError::InvalidInput { asset, date: d, .. } if asset == "FB" && d == date(2)));
    }

    #[test]
    fn negative_first_price_is_invalid() {
        let err = simple_returns(&prices("FB", &[-1.0, 2.0])).unwrap_err();
        assert!(matches!(err, RatioError::InvalidInput { date: d, .. } if d == date(1)));
    }

    #[test]
    fn excess_uses_shared_dates_only() {
        let asset = simple_returns(&prices("AMZN", &[100.0, 102.0, 101.0])).unwrap();
        let mut bench = simple_returns(&prices("S&P 500", &[100.0, 101.0, 101.0])).unwrap();
        bench.points.remove(&date(3));

        let excess = excess_returns(&asset, &bench);

        assert_eq!(excess.name, "AMZN");
        assert_eq!(excess.len(), 1);
        assert!((excess.points[&date(2)] - 0.01).abs() < 1e-12);
    }
}
