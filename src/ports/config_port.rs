//! Configuration access port trait.

use crate::domain::error::SharpeError;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;

    /// Like `get_string`, but a blank value counts as absent and absence is
    /// an error.
    fn require_string(&self, section: &str, key: &str) -> Result<String, SharpeError> {
        self.get_string(section, key)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| SharpeError::ConfigMissing {
                section: section.to_string(),
                key: key.to_string(),
            })
    }
}
