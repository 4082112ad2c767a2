//! Financial literacy engine - deterministic calculators for student money tools
//!
//! This library provides:
//! - Loan amortization with cent-exact schedules and payoff scenarios
//! - Compound savings projections and savings-goal planning
//! - Percentage budgets that reconcile to the income exactly
//! - Debt payoff simulation for single debts and small portfolios
//! - A 0-100 financial health score with letter grade
//! - JSON tool dispatch and CSV export around all of the above
//!
//! The free functions below use [`EngineConfig::default`]. Build a
//! [`Calculator`] to run with different limits.

pub mod budget;
pub mod calculator;
pub mod config;
pub mod debt;
pub mod dispatch;
pub mod error;
pub mod export;
pub mod health;
pub mod loan;
pub mod money;
pub mod savings;

use std::collections::BTreeMap;

// Re-export commonly used types
pub use budget::{BudgetInput, BudgetResult, CategoryAllocation};
pub use calculator::Calculator;
pub use config::{ConfigError, EngineConfig};
pub use debt::{DebtAccount, DebtPayoffInput, DebtPayoffResult, DebtPortfolioInput, PortfolioPayoffResult};
pub use dispatch::{ToolOutcome, ToolRequest, ToolResponse};
pub use error::{CalcError, CalcResult};
pub use export::ExportError;
pub use health::{HealthScoreInput, HealthScoreResult, LetterGrade};
pub use loan::{AmortizationRow, LoanInput, LoanPayoffScenarios, LoanResult};
pub use savings::{CompoundInput, CompoundResult, YearBalance};

/// Level monthly payment and full amortization schedule
pub fn compute_loan(principal: f64, annual_rate: f64, years: u32) -> CalcResult<LoanResult> {
    loan::amortize(&LoanInput::new(principal, annual_rate, years), &EngineConfig::default())
}

/// Month-by-month compound growth with year-end snapshots
pub fn compute_compound(
    principal: f64,
    monthly_contribution: f64,
    annual_rate: f64,
    years: u32,
) -> CalcResult<CompoundResult> {
    savings::project_compound(
        &CompoundInput::new(principal, monthly_contribution, annual_rate, years),
        &EngineConfig::default(),
    )
}

/// Split income across the default categories, or across `overrides` when given
pub fn compute_budget(
    monthly_income: f64,
    overrides: Option<BTreeMap<String, f64>>,
) -> CalcResult<BudgetResult> {
    let mut input = BudgetInput::new(monthly_income);
    input.overrides = overrides;
    budget::build_budget(&input, &EngineConfig::default())
}

/// Compare minimum-payment and accelerated payoff of one debt
pub fn compute_debt_payoff(
    balance: f64,
    annual_rate: f64,
    minimum_payment: f64,
    extra_payment: f64,
) -> CalcResult<DebtPayoffResult> {
    debt::debt_payoff(
        &DebtPayoffInput::new(balance, annual_rate, minimum_payment, extra_payment),
        &EngineConfig::default(),
    )
}

pub fn compute_health_score(input: &HealthScoreInput) -> CalcResult<HealthScoreResult> {
    health::score_health(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::money::to_cents;

    #[test]
    fn test_reference_loan() {
        let result = compute_loan(10_000.0, 5.0, 10).unwrap();
        assert_eq!(result.monthly_payment, 106.07);
        assert_eq!(result.total_cost, 12_728.40);
        assert_eq!(result.total_interest, 2_728.40);
        assert_eq!(result.amortization_schedule.len(), 120);
    }

    #[test]
    fn test_schedule_principal_sums_to_loan() {
        for (principal, rate, years) in [(10_000.0, 5.0, 10), (2_500.55, 18.9, 3), (350_000.0, 6.75, 30)] {
            let result = compute_loan(principal, rate, years).unwrap();
            let principal_cents: i64 = result
                .amortization_schedule
                .iter()
                .map(|row| to_cents(row.principal_portion))
                .sum();
            assert_eq!(principal_cents, to_cents(principal));
            assert_eq!(result.amortization_schedule.last().unwrap().remaining_balance, 0.0);
        }
    }

    #[test]
    fn test_compound_zero_rate_is_plain_sum() {
        let result = compute_compound(500.0, 50.0, 0.0, 2).unwrap();
        assert_abs_diff_eq!(result.future_value, 1_700.0, epsilon = 1e-9);
        assert_eq!(result.total_growth, 0.0);
    }

    #[test]
    fn test_budget_reconciles() {
        let result = compute_budget(1_999.99, None).unwrap();
        let cents: i64 = result.budget_categories.iter().map(|c| to_cents(c.amount)).sum();
        assert_eq!(cents, 199_999);

        let overrides = BTreeMap::from([("Needs".to_string(), 50.0), ("Wants".to_string(), 30.0)]);
        assert!(compute_budget(1_000.0, Some(overrides)).is_err());
    }

    #[test]
    fn test_extra_payment_never_hurts() {
        let result = compute_debt_payoff(5_000.0, 19.99, 150.0, 75.0).unwrap();
        assert!(result.accelerated_months <= result.baseline_months);
        assert!(result.interest_saved >= 0.0);
        assert_eq!(result.months_saved, result.baseline_months - result.accelerated_months);
    }

    #[test]
    fn test_health_score_in_range() {
        let result = compute_health_score(&HealthScoreInput {
            monthly_income: 2_500.0,
            monthly_expenses: 2_100.0,
            monthly_debt_payments: 400.0,
            emergency_fund: 1_000.0,
            current_savings: 300.0,
            savings_goal: 1_000.0,
        })
        .unwrap();
        assert!(result.overall_score <= 100);
        let total: u32 = result.component_scores.values().sum();
        assert_eq!(total, result.overall_score);
    }
}
