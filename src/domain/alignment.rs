//! Inner join of an asset table and a benchmark series on date.

use crate::domain::time_series::{PriceSeries, TimeSeriesTable};
use tracing::debug;

/// Asset table and benchmark restricted to the same, fully populated dates.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedData {
    pub assets: TimeSeriesTable,
    pub benchmark: PriceSeries,
}

impl AlignedData {
    pub fn len(&self) -> usize {
        self.benchmark.len()
    }

    pub fn is_empty(&self) -> bool {
        self.benchmark.is_empty()
    }
}

/// Keep only dates present in both inputs where no asset cell is missing.
///
/// After alignment `assets.dates()` and `benchmark.points.keys()` are equal.
pub fn align(assets: &TimeSeriesTable, benchmark: &PriceSeries) -> AlignedData {
    let complete = assets.drop_missing();
    let mut aligned = TimeSeriesTable::new(assets.name(), assets.columns().to_vec());
    let mut bench_points = Vec::new();

    for (date, row) in complete.rows() {
        let Some(&bench) = benchmark.points.get(&date) else {
            continue;
        };
        // dates are unique in `complete`, so this insert cannot collide
        if aligned.insert_row(date, row.to_vec()).is_ok() {
            bench_points.push((date, bench));
        }
    }

    let dropped_assets = assets.len() - aligned.len();
    let dropped_bench = benchmark.len() - bench_points.len();
    if dropped_assets > 0 || dropped_bench > 0 {
        debug!(
            kept = aligned.len(),
            dropped_assets, dropped_bench, "aligned asset and benchmark dates"
        );
    }

    AlignedData {
        assets: aligned,
        benchmark: PriceSeries::new(benchmark.name.clone(), bench_points),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2016, 3, d).unwrap()
    }

    #[test]
    fn keeps_only_shared_dates() {
        let mut assets = TimeSeriesTable::new("stocks", vec!["AMZN".into()]);
        assets.insert_row(date(1), vec![Some(10.0)]).unwrap();
        assets.insert_row(date(2), vec![Some(11.0)]).unwrap();
        assets.insert_row(date(3), vec![Some(12.0)]).unwrap();
        let bench = PriceSeries::new("S&P 500", vec![(date(2), 100.0), (date(3), 101.0), (date(4), 102.0)]);

        let aligned = align(&assets, &bench);

        let dates: Vec<_> = aligned.assets.dates().collect();
        assert_eq!(dates, vec![date(2), date(3)]);
        let bench_dates: Vec<_> = aligned.benchmark.points.keys().copied().collect();
        assert_eq!(bench_dates, dates);
    }

    #[test]
    fn drops_rows_with_missing_asset_value() {
        let mut assets = TimeSeriesTable::new("stocks", vec!["AMZN".into(), "FB".into()]);
        assets.insert_row(date(1), vec![Some(10.0), Some(5.0)]).unwrap();
        assets.insert_row(date(2), vec![Some(11.0), None]).unwrap();
        assets.insert_row(date(3), vec![Some(12.0), Some(6.0)]).unwrap();
        let bench = PriceSeries::new("S&P 500", (1..=3).map(|d| (date(d), 100.0)));

        let aligned = align(&assets, &bench);

        assert_eq!(aligned.len(), 2);
        assert!(aligned.assets.row(date(2)).is_none());
        assert!(!aligned.benchmark.points.contains_key(&date(2)));
    }

    #[test]
    fn disjoint_domains_align_to_nothing() {
        let mut assets = TimeSeriesTable::new("stocks", vec!["AMZN".into()]);
        assets.insert_row(date(1), vec![Some(10.0)]).unwrap();
        let bench = PriceSeries::new("S&P 500", vec![(date(9), 100.0)]);

        let aligned = align(&assets, &bench);

        assert!(aligned.is_empty());
        assert!(aligned.assets.is_empty());
        assert_eq!(aligned.assets.columns(), &["AMZN".to_string()]);
    }
}
