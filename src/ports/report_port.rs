//! Report generation port trait.

use crate::domain::error::SharpeError;
use crate::domain::sharpe::{RatioResult, SharpeConfig};
use std::collections::BTreeMap;
use std::path::Path;

/// Port for writing Sharpe ratio results.
pub trait ReportPort {
    fn write(
        &self,
        results: &BTreeMap<String, RatioResult>,
        config: &SharpeConfig,
        output_path: &Path,
    ) -> Result<(), SharpeError>;
}
