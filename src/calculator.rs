//! Calculator runner shared by the dispatch layer and the CLI
//!
//! Holds one [`EngineConfig`] and runs any calculator against it, so a
//! config file is read once and reused for every request.

use rayon::prelude::*;
use std::path::Path;

use crate::budget::{build_budget, BudgetInput, BudgetResult};
use crate::config::{ConfigError, EngineConfig};
use crate::debt::{
    debt_payoff, portfolio_payoff, DebtPayoffInput, DebtPayoffResult, DebtPortfolioInput,
    PortfolioPayoffResult,
};
use crate::error::CalcResult;
use crate::health::{score_health, HealthScoreInput, HealthScoreResult};
use crate::loan::{amortize, loan_payoff_scenarios, LoanInput, LoanPayoffScenarios, LoanResult};
use crate::savings::{
    project_compound, required_monthly_savings, savings_goal_plan, CompoundInput, CompoundResult,
    RequiredSavingsInput, RequiredSavingsResult, SavingsGoalInput, SavingsGoalResult,
};

/// Calculator runner with a fixed engine configuration
///
/// # Example
/// ```ignore
/// let calc = Calculator::from_json_path(Path::new("finlit.json"))?;
///
/// for years in [10, 15, 30] {
///     let result = calc.loan(&LoanInput::new(250_000.0, 6.5, years))?;
///     println!("{}", result.summary());
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    config: EngineConfig,
}

impl Calculator {
    /// Create a calculator with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calculator from an already built configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Create a calculator by loading and validating a JSON config file
    pub fn from_json_path(path: &Path) -> Result<Self, ConfigError> {
        Ok(Self {
            config: EngineConfig::from_json_path(path)?,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn loan(&self, input: &LoanInput) -> CalcResult<LoanResult> {
        amortize(input, &self.config)
    }

    pub fn loan_scenarios(&self, input: &LoanInput) -> CalcResult<LoanPayoffScenarios> {
        loan_payoff_scenarios(input, &self.config)
    }

    pub fn compound(&self, input: &CompoundInput) -> CalcResult<CompoundResult> {
        project_compound(input, &self.config)
    }

    pub fn required_savings(&self, input: &RequiredSavingsInput) -> CalcResult<RequiredSavingsResult> {
        required_monthly_savings(input, &self.config)
    }

    pub fn savings_goal(&self, input: &SavingsGoalInput) -> CalcResult<SavingsGoalResult> {
        savings_goal_plan(input, &self.config)
    }

    pub fn budget(&self, input: &BudgetInput) -> CalcResult<BudgetResult> {
        build_budget(input, &self.config)
    }

    pub fn debt_payoff(&self, input: &DebtPayoffInput) -> CalcResult<DebtPayoffResult> {
        debt_payoff(input, &self.config)
    }

    pub fn debt_portfolio(&self, input: &DebtPortfolioInput) -> CalcResult<PortfolioPayoffResult> {
        portfolio_payoff(&input.debts, input.extra_payment, &self.config)
    }

    /// Health scoring has no configurable limits
    pub fn health_score(&self, input: &HealthScoreInput) -> CalcResult<HealthScoreResult> {
        score_health(input)
    }

    /// Amortize several loans in parallel; results keep the input order
    pub fn loan_batch(&self, inputs: &[LoanInput]) -> Vec<CalcResult<LoanResult>> {
        inputs.par_iter().map(|input| self.loan(input)).collect()
    }
}
