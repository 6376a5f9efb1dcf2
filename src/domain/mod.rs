//! Core domain types and logic.

pub mod time_series;
pub mod alignment;
pub mod returns;
pub mod stats;
pub mod sharpe;
pub mod config_validation;
pub mod error;
