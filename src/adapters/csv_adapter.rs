//! CSV file data adapter.
//!
//! Expects a header row, a date column first (`YYYY-MM-DD`) and one numeric
//! column per series. Blank, `NA`, `NaN` and `null` cells are missing values.

use crate::domain::error::SharpeError;
use crate::domain::time_series::TimeSeriesTable;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const MISSING_MARKERS: [&str; 4] = ["", "na", "nan", "null"];

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, source: &str) -> PathBuf {
        self.base_path.join(source)
    }
}

fn parse_cell(raw: &str, source: &str, line: u64) -> Result<Option<f64>, SharpeError> {
    let cell = raw.trim();
    if MISSING_MARKERS.contains(&cell.to_lowercase().as_str()) {
        return Ok(None);
    }
    cell.parse::<f64>()
        .map(Some)
        .map_err(|e| SharpeError::DataRead {
            source_name: source.to_string(),
            reason: format!("line {line}: invalid value '{cell}': {e}"),
        })
}

impl DataPort for CsvAdapter {
    fn fetch_table(&self, source: &str) -> Result<TimeSeriesTable, SharpeError> {
        let path = self.csv_path(source);
        let content = fs::read_to_string(&path).map_err(|e| SharpeError::DataRead {
            source_name: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = rdr.headers().map_err(|e| SharpeError::DataRead {
            source_name: source.to_string(),
            reason: format!("CSV header error: {e}"),
        })?;
        if headers.len() < 2 {
            return Err(SharpeError::DataRead {
                source_name: source.to_string(),
                reason: "expected a date column and at least one value column".into(),
            });
        }
        let columns: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();
        let mut table = TimeSeriesTable::new(source, columns);

        for result in rdr.records() {
            let record = result.map_err(|e| SharpeError::DataRead {
                source_name: source.to_string(),
                reason: format!("CSV parse error: {e}"),
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let date_str = record.get(0).unwrap_or_default();
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                SharpeError::DataRead {
                    source_name: source.to_string(),
                    reason: format!("line {line}: invalid date '{date_str}': {e}"),
                }
            })?;

            let values = record
                .iter()
                .skip(1)
                .map(|cell| parse_cell(cell, source, line))
                .collect::<Result<Vec<_>, _>>()?;

            table.insert_row(date, values)?;
        }

        debug!(source, rows = table.len(), columns = table.columns().len(), "loaded table");
        Ok(table)
    }
}
