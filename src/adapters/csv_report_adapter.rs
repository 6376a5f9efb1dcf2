//! CSV report adapter: one row per asset.
//!
//! Columns: asset, status, observations, mean_excess, std_excess,
//! daily_sharpe, annual_sharpe, annualization_factor, std_convention, detail.
//! Numeric cells are empty when the asset has no ratio.

use crate::domain::error::SharpeError;
use crate::domain::sharpe::{RatioResult, SharpeConfig};
use crate::ports::report_port::ReportPort;
use std::collections::BTreeMap;
use std::path::Path;

const HEADER: [&str; 10] = [
    "asset",
    "status",
    "observations",
    "mean_excess",
    "std_excess",
    "daily_sharpe",
    "annual_sharpe",
    "annualization_factor",
    "std_convention",
    "detail",
];

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn render(
        results: &BTreeMap<String, RatioResult>,
        config: &SharpeConfig,
    ) -> Result<String, SharpeError> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        let write_err = |e: csv::Error| SharpeError::Io(std::io::Error::other(e));

        wtr.write_record(HEADER).map_err(write_err)?;

        let factor = config.annualization_factor.to_string();
        let convention = config.std_convention.to_string();

        for (asset, result) in results {
            let row: Vec<String> = match result {
                Ok(r) => vec![
                    asset.clone(),
                    "ok".into(),
                    r.observations.to_string(),
                    r.mean_excess.to_string(),
                    r.std_excess.to_string(),
                    r.daily.to_string(),
                    r.annual.to_string(),
                    factor.clone(),
                    convention.clone(),
                    String::new(),
                ],
                Err(e) => vec![
                    asset.clone(),
                    e.label().into(),
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                    factor.clone(),
                    convention.clone(),
                    e.to_string(),
                ],
            };
            wtr.write_record(&row).map_err(write_err)?;
        }

        let bytes = wtr
            .into_inner()
            .map_err(|e| SharpeError::Io(std::io::Error::other(e.to_string())))?;
        String::from_utf8(bytes).map_err(|e| SharpeError::Io(std::io::Error::other(e)))
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(
        &self,
        results: &BTreeMap<String, RatioResult>,
        config: &SharpeConfig,
        output_path: &Path,
    ) -> Result<(), SharpeError> {
        let content = Self::render(results, config)?;
        std::fs::write(output_path, content)?;
        Ok(())
    }
}
