//! Domain error types.

use chrono::NaiveDate;

/// Why a single asset's ratio could not be produced.
///
/// These never abort a batch: every asset gets its own `Result`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatioError {
    #[error("insufficient data for {asset}: have {observations} excess returns, need {minimum}")]
    InsufficientData {
        asset: String,
        observations: usize,
        minimum: usize,
    },

    #[error("invalid input for {asset} on {date}: {reason}")]
    InvalidInput {
        asset: String,
        date: NaiveDate,
        reason: String,
    },

    #[error("undefined ratio for {asset}: excess returns have zero standard deviation")]
    UndefinedRatio { asset: String },
}

impl RatioError {
    /// Short status label used in tables and reports.
    pub fn label(&self) -> &'static str {
        match self {
            RatioError::InsufficientData { .. } => "insufficient_data",
            RatioError::InvalidInput { .. } => "invalid_input",
            RatioError::UndefinedRatio { .. } => "undefined_ratio",
        }
    }

    /// The same error re-attributed to another asset.
    pub(crate) fn for_asset(self, asset: &str) -> Self {
        match self {
            RatioError::InsufficientData {
                observations,
                minimum,
                ..
            } => RatioError::InsufficientData {
                asset: asset.to_string(),
                observations,
                minimum,
            },
            RatioError::InvalidInput { date, reason, .. } => RatioError::InvalidInput {
                asset: asset.to_string(),
                date,
                reason,
            },
            RatioError::UndefinedRatio { .. } => RatioError::UndefinedRatio {
                asset: asset.to_string(),
            },
        }
    }
}

/// Top-level error type for sharpelab.
#[derive(Debug, thiserror::Error)]
pub enum SharpeError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("failed to read {source_name}: {reason}")]
    DataRead { source_name: String, reason: String },

    #[error("duplicate row for {date} in {table}")]
    DuplicateDate { table: String, date: NaiveDate },

    #[error("column {column} not found in {table}")]
    ColumnNotFound { table: String, column: String },

    #[error("no asset produced a ratio")]
    NoResults,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&SharpeError> for std::process::ExitCode {
    fn from(err: &SharpeError) -> Self {
        let code: u8 = match err {
            SharpeError::Io(_) => 1,
            SharpeError::ConfigParse { .. }
            | SharpeError::ConfigMissing { .. }
            | SharpeError::ConfigInvalid { .. } => 2,
            SharpeError::DataRead { .. }
            | SharpeError::DuplicateDate { .. }
            | SharpeError::ColumnNotFound { .. } => 3,
            SharpeError::NoResults => 5,
        };
        std::process::ExitCode::from(code)
    }
}
