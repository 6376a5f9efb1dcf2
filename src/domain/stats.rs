//! Sample statistics over plain `f64` slices.

use std::fmt;
use std::str::FromStr;

/// Denominator used for the standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StdConvention {
    /// Divide by N - 1.
    #[default]
    Sample,
    /// Divide by N.
    Population,
}

impl StdConvention {
    pub fn ddof(self) -> usize {
        match self {
            StdConvention::Sample => 1,
            StdConvention::Population => 0,
        }
    }
}

impl fmt::Display for StdConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StdConvention::Sample => write!(f, "sample"),
            StdConvention::Population => write!(f, "population"),
        }
    }
}

impl FromStr for StdConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sample" => Ok(StdConvention::Sample),
            "population" => Ok(StdConvention::Population),
            other => Err(format!(
                "unknown std convention '{other}' (expected sample or population)"
            )),
        }
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Two-pass standard deviation. `None` when there are not more values than
/// degrees of freedom removed.
pub fn std_dev(values: &[f64], convention: StdConvention) -> Option<f64> {
    let n = values.len();
    if n <= convention.ddof() {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((sum_sq / (n - convention.ddof()) as f64).sqrt())
}

/// Quantile with linear interpolation between closest ranks.
/// `sorted` must be ascending.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Count, mean, sample std, min, quartiles and max of a column.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl Summary {
    /// Non-finite values are ignored. Undefined statistics are NaN.
    pub fn of(values: &[f64]) -> Self {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        sorted.sort_by(f64::total_cmp);

        Summary {
            count: sorted.len(),
            mean: mean(&sorted).unwrap_or(f64::NAN),
            std: std_dev(&sorted, StdConvention::Sample).unwrap_or(f64::NAN),
            min: sorted.first().copied().unwrap_or(f64::NAN),
            q25: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }
}
