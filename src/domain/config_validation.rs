//! Configuration validation.
//!
//! Validates all config fields before any data is loaded.

use crate::domain::error::SharpeError;
use crate::domain::stats::StdConvention;
use crate::ports::config_port::ConfigPort;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), SharpeError> {
    validate_data_sources(config)?;
    validate_sharpe_config(config)
}

/// Only the `[sharpe]` section, for runs whose data files come from flags.
pub fn validate_sharpe_config(config: &dyn ConfigPort) -> Result<(), SharpeError> {
    validate_periods(config)?;
    validate_annualization_factor(config)?;
    validate_std_convention(config)?;
    Ok(())
}

fn validate_data_sources(config: &dyn ConfigPort) -> Result<(), SharpeError> {
    config.require_string("data", "stocks")?;
    config.require_string("data", "benchmark")?;
    Ok(())
}

fn validate_periods(config: &dyn ConfigPort) -> Result<(), SharpeError> {
    let Some(raw) = non_blank(config, "sharpe", "periods_per_year") else {
        return Ok(());
    };
    match raw.parse::<i64>() {
        Ok(v) if v > 0 => Ok(()),
        _ => Err(SharpeError::ConfigInvalid {
            section: "sharpe".to_string(),
            key: "periods_per_year".to_string(),
            reason: "periods_per_year must be a positive integer".to_string(),
        }),
    }
}

fn validate_annualization_factor(config: &dyn ConfigPort) -> Result<(), SharpeError> {
    let Some(raw) = non_blank(config, "sharpe", "annualization_factor") else {
        return Ok(());
    };
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(()),
        _ => Err(SharpeError::ConfigInvalid {
            section: "sharpe".to_string(),
            key: "annualization_factor".to_string(),
            reason: "annualization_factor must be a positive number".to_string(),
        }),
    }
}

fn validate_std_convention(config: &dyn ConfigPort) -> Result<(), SharpeError> {
    let Some(raw) = non_blank(config, "sharpe", "std_convention") else {
        return Ok(());
    };
    raw.parse::<StdConvention>()
        .map(|_| ())
        .map_err(|reason| SharpeError::ConfigInvalid {
            section: "sharpe".to_string(),
            key: "std_convention".to_string(),
            reason,
        })
}

fn non_blank(config: &dyn ConfigPort, section: &str, key: &str) -> Option<String> {
    config
        .get_string(section, key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn config(extra: &str) -> FileConfigAdapter {
        let content = format!(
            "[data]\nstocks = stock_data.csv\nbenchmark = benchmark_data.csv\n\n[sharpe]\n{extra}"
        );
        FileConfigAdapter::from_string(&content).unwrap()
    }

    fn invalid_key(result: Result<(), SharpeError>) -> String {
        match result {
            Err(SharpeError::ConfigInvalid { key, .. }) => key,
            other => panic!("expected ConfigInvalid, got {other:?}"),
        }
    }

    #[test]
    fn minimal_config_is_valid() {
        assert!(validate_config(&config("")).is_ok());
    }

    #[test]
    fn full_config_is_valid() {
        let c = config("periods_per_year = 52\nannualization_factor = 7.2\nstd_convention = population\n");
        assert!(validate_config(&c).is_ok());
    }

    #[test]
    fn sharpe_section_alone_ignores_data() {
        let c = FileConfigAdapter::from_string("[sharpe]\nperiods_per_year = 12\n").unwrap();
        assert!(validate_sharpe_config(&c).is_ok());
        assert!(validate_config(&c).is_err());
    }

    #[test]
    fn missing_stocks() {
        let c = FileConfigAdapter::from_string("[data]\nbenchmark = b.csv\n").unwrap();
        assert!(matches!(
            validate_config(&c),
            Err(SharpeError::ConfigMissing { key, .. }) if key == "stocks"
        ));
    }

    #[test]
    fn missing_benchmark() {
        let c = FileConfigAdapter::from_string("[data]\nstocks = s.csv\n").unwrap();
        assert!(matches!(
            validate_config(&c),
            Err(SharpeError::ConfigMissing { key, .. }) if key == "benchmark"
        ));
    }

    #[test]
    fn periods_must_be_positive_integer() {
        assert_eq!(invalid_key(validate_config(&config("periods_per_year = 0\n"))), "periods_per_year");
        assert_eq!(invalid_key(validate_config(&config("periods_per_year = daily\n"))), "periods_per_year");
    }

    #[test]
    fn factor_must_be_positive() {
        assert_eq!(
            invalid_key(validate_config(&config("annualization_factor = -1\n"))),
            "annualization_factor"
        );
    }

    #[test]
    fn unknown_convention() {
        assert_eq!(
            invalid_key(validate_config(&config("std_convention = ddof2\n"))),
            "std_convention"
        );
    }
}
