use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

/// ledger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// installments due within this many days (inclusive) are "upcoming"
    pub upcoming_window_days: i64,
    /// largest installment count accepted when opening an account
    pub max_installments: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            upcoming_window_days: 15,
            max_installments: 120,
        }
    }
}

impl LedgerConfig {
    /// load from a json document; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LedgerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// set the upcoming window
    pub fn with_upcoming_window(mut self, days: i64) -> Self {
        self.upcoming_window_days = days;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.upcoming_window_days < 0 {
            return Err(LedgerError::InvalidConfiguration {
                message: format!(
                    "upcoming window must not be negative, got {}",
                    self.upcoming_window_days
                ),
            });
        }
        if self.max_installments == 0 {
            return Err(LedgerError::InvalidConfiguration {
                message: "max installments must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.upcoming_window_days, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = LedgerConfig::from_json(r#"{ "upcoming_window_days": 7 }"#).unwrap();
        assert_eq!(config.upcoming_window_days, 7);
        assert_eq!(config.max_installments, 120);
    }

    #[test]
    fn test_rejects_negative_window() {
        let err = LedgerConfig::from_json(r#"{ "upcoming_window_days": -1 }"#).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_rejects_zero_max_installments() {
        let err = LedgerConfig::from_json(r#"{ "max_installments": 0 }"#).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = LedgerConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, LedgerError::Serialization(_)));
    }
}
