//! Engine limits and defaults
//!
//! Every calculator reads its ceilings from [`EngineConfig`]. The defaults
//! are what the free functions in the crate root use; a JSON file can
//! override any subset of fields.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

/// Errors while loading an [`EngineConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Longest term a config may allow, in years
pub const MAX_TERM_YEARS_LIMIT: u32 = 100;

/// Limits and defaults shared by all calculators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Highest accepted annual rate, in percent
    pub max_annual_rate: f64,

    /// Longest accepted loan or savings term, in years
    pub max_term_years: u32,

    /// Allowed deviation of budget percentages from 100, in percentage points
    pub budget_tolerance_pct: f64,

    /// Convergence cap for payoff simulations
    pub max_simulation_months: u32,

    /// Extra monthly payments tried by loan payoff scenarios
    pub loan_extra_scenarios: Vec<f64>,

    /// Weeks per month for weekly savings targets
    pub weeks_per_month: f64,

    /// Minimum payment (percent of balance) assumed for debts that report none
    pub default_min_payment_pct: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_annual_rate: 100.0,
            max_term_years: 50,
            budget_tolerance_pct: 0.5,
            max_simulation_months: 1200,
            loan_extra_scenarios: vec![50.0, 100.0, 200.0],
            weeks_per_month: 4.33,
            default_min_payment_pct: 2.0,
        }
    }
}

impl EngineConfig {
    /// Load a config from a JSON file; missing fields keep their defaults
    pub fn from_json_path(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config: EngineConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject limits that would make every calculation fail or never stop
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_annual_rate.is_finite() && self.max_annual_rate > 0.0) {
            return Err(ConfigError::Invalid {
                field: "max_annual_rate",
                reason: "must be a positive number".to_string(),
            });
        }
        if self.max_term_years == 0 || self.max_term_years > MAX_TERM_YEARS_LIMIT {
            return Err(ConfigError::Invalid {
                field: "max_term_years",
                reason: format!("must be between 1 and {}", MAX_TERM_YEARS_LIMIT),
            });
        }
        if !(self.budget_tolerance_pct.is_finite() && self.budget_tolerance_pct >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "budget_tolerance_pct",
                reason: "must be a non-negative number".to_string(),
            });
        }
        if self.max_simulation_months == 0 {
            return Err(ConfigError::Invalid {
                field: "max_simulation_months",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.loan_extra_scenarios.iter().any(|x| !x.is_finite() || *x <= 0.0) {
            return Err(ConfigError::Invalid {
                field: "loan_extra_scenarios",
                reason: "every extra payment must be positive".to_string(),
            });
        }
        if !(self.weeks_per_month.is_finite() && self.weeks_per_month > 0.0) {
            return Err(ConfigError::Invalid {
                field: "weeks_per_month",
                reason: "must be a positive number".to_string(),
            });
        }
        if !(self.default_min_payment_pct.is_finite()
            && self.default_min_payment_pct > 0.0
            && self.default_min_payment_pct <= 100.0)
        {
            return Err(ConfigError::Invalid {
                field: "default_min_payment_pct",
                reason: "must be within (0, 100]".to_string(),
            });
        }
        Ok(())
    }
}
