//! Data access port trait.

use crate::domain::error::SharpeError;
use crate::domain::time_series::TimeSeriesTable;

pub trait DataPort {
    /// Load a date-indexed price table. `source` names the table within the
    /// adapter (a file name for CSV).
    fn fetch_table(&self, source: &str) -> Result<TimeSeriesTable, SharpeError>;
}
