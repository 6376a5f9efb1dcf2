#![allow(dead_code)]

use chrono::NaiveDate;
use sharpelab::domain::time_series::{PriceSeries, TimeSeriesTable};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const STOCK_CSV: &str = "Date,Amazon,Facebook
2016-01-04,636.99,102.22
2016-01-05,633.79,102.73
2016-01-06,632.65,102.97
2016-01-07,607.94,97.92
2016-01-08,607.05,97.33
2016-01-11,617.74,97.51
2016-01-12,617.89,99.37
2016-01-13,581.81,95.44
2016-01-14,593.00,98.37
2016-01-15,570.18,
";

pub const BENCHMARK_CSV: &str = "Date,S&P 500
2016-01-04,2012.66
2016-01-05,2016.71
2016-01-06,1990.26
2016-01-07,1943.09
2016-01-08,1922.03
2016-01-11,1923.67
2016-01-12,1938.68
2016-01-13,1890.28
2016-01-14,1921.84
2016-01-15,1880.33
";

pub const CONFIG_INI: &str = "[data]
stocks = stock_data.csv
benchmark = benchmark_data.csv
benchmark_column = S&P 500

[sharpe]
periods_per_year = 252
std_convention = sample
";

/// A temp directory holding the sample stock and benchmark files plus
/// `sharpe.ini` pointing at them.
pub fn sample_data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "stock_data.csv", STOCK_CSV);
    write_file(dir.path(), "benchmark_data.csv", BENCHMARK_CSV);
    let config = CONFIG_INI.replacen(
        "[data]\n",
        &format!("[data]\ndir = {}\n", dir.path().display()),
        1,
    );
    write_file(dir.path(), "sharpe.ini", &config);
    dir
}

pub fn write_file(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Consecutive days from 2016-01-01, one per price.
pub fn make_series(name: &str, prices: &[f64]) -> PriceSeries {
    PriceSeries::new(
        name,
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| (date(2016, 1, 1) + chrono::Duration::days(i as i64), p)),
    )
}

pub fn make_table(columns: &[&str], rows: &[Vec<f64>]) -> TimeSeriesTable {
    let mut table = TimeSeriesTable::new("stocks", columns.iter().map(|c| c.to_string()).collect());
    for (i, row) in rows.iter().enumerate() {
        table
            .insert_row(
                date(2016, 1, 1) + chrono::Duration::days(i as i64),
                row.iter().map(|v| Some(*v)).collect(),
            )
            .unwrap();
    }
    table
}
