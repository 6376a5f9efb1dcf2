//! Date-indexed price tables.
//!
//! A [`TimeSeriesTable`] holds one row per calendar day, each row carrying one
//! optional value per named column. Rows are kept in date order no matter the
//! order they were inserted in.

use crate::domain::error::SharpeError;
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesTable {
    name: String,
    columns: Vec<String>,
    rows: BTreeMap<NaiveDate, Vec<Option<f64>>>,
}

impl TimeSeriesTable {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Insert a row. Short rows are padded with missing cells. A row with
    /// more cells than columns, or a second row for the same date, is
    /// rejected.
    pub fn insert_row(
        &mut self,
        date: NaiveDate,
        mut values: Vec<Option<f64>>,
    ) -> Result<(), SharpeError> {
        if values.len() > self.columns.len() {
            return Err(SharpeError::DataRead {
                source_name: self.name.clone(),
                reason: format!(
                    "row for {date} has {} cells, table has {} columns",
                    values.len(),
                    self.columns.len()
                ),
            });
        }
        if self.rows.contains_key(&date) {
            return Err(SharpeError::DuplicateDate {
                table: self.name.clone(),
                date,
            });
        }
        values.resize(self.columns.len(), None);
        self.rows.insert(date, values);
        Ok(())
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.rows.keys().copied()
    }

    pub fn row(&self, date: NaiveDate) -> Option<&[Option<f64>]> {
        self.rows.get(&date).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = (NaiveDate, &[Option<f64>])> + '_ {
        self.rows.iter().map(|(d, v)| (*d, v.as_slice()))
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Extract one column, skipping dates where it is missing.
    pub fn column(&self, column: &str) -> Result<PriceSeries, SharpeError> {
        let idx = self
            .column_index(column)
            .ok_or_else(|| SharpeError::ColumnNotFound {
                table: self.name.clone(),
                column: column.to_string(),
            })?;
        let points = self
            .rows
            .iter()
            .filter_map(|(date, row)| row[idx].map(|v| (*date, v)))
            .collect();
        Ok(PriceSeries {
            name: column.to_string(),
            points,
        })
    }

    /// A copy without any row that has a missing cell.
    pub fn drop_missing(&self) -> Self {
        Self {
            name: self.name.clone(),
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|(_, row)| row.iter().all(Option::is_some))
                .map(|(d, row)| (*d, row.clone()))
                .collect(),
        }
    }
}

/// A single named column with every point present, ordered by date.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub name: String,
    pub points: BTreeMap<NaiveDate, f64>,
}

impl PriceSeries {
    pub fn new(name: impl Into<String>, points: impl IntoIterator<Item = (NaiveDate, f64)>) -> Self {
        Self {
            name: name.into(),
            points: points.into_iter().collect(),
        }
    }

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
