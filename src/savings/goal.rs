//! Savings targets: sinking-fund payments and goal plans

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{ensure_non_negative, ensure_positive, ensure_rate, ensure_years, CalcError, CalcResult};
use crate::money::{format_usd, monthly_rate, round_cents};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredSavingsInput {
    pub target_amount: f64,
    pub years: u32,
    /// Annual rate in percent earned on the deposits
    #[serde(default)]
    pub annual_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredSavingsResult {
    pub target_amount: f64,
    pub required_monthly_savings: f64,
    pub total_contributions: f64,
    pub months: u32,
}

impl RequiredSavingsResult {
    pub fn summary(&self) -> String {
        format!(
            "Saving {} per month for {} months reaches {} ({} deposited).",
            format_usd(self.required_monthly_savings),
            self.months,
            format_usd(self.target_amount),
            format_usd(self.total_contributions),
        )
    }
}

/// Monthly deposit that grows to `target_amount` by the end of the term
pub fn required_monthly_savings(
    input: &RequiredSavingsInput,
    config: &EngineConfig,
) -> CalcResult<RequiredSavingsResult> {
    ensure_positive("target_amount", input.target_amount)?;
    ensure_years("years", input.years, config.max_term_years)?;
    ensure_rate("annual_rate", input.annual_rate, config.max_annual_rate)?;

    let months = input.years.saturating_mul(12);
    let rate = monthly_rate(input.annual_rate);
    let required = if rate > 0.0 {
        input.target_amount * rate / ((1.0 + rate).powi(months as i32) - 1.0)
    } else {
        input.target_amount / months as f64
    };
    let required = round_cents(required);

    Ok(RequiredSavingsResult {
        target_amount: input.target_amount,
        required_monthly_savings: required,
        total_contributions: round_cents(required * months as f64),
        months,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoalInput {
    pub goal_amount: f64,
    pub months: u32,
    #[serde(default)]
    pub current_savings: f64,

    /// Deposit the user already plans to make each month
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_contribution: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoalResult {
    pub goal_amount: f64,
    pub remaining: f64,
    pub months: u32,
    pub monthly_required: f64,
    pub weekly_required: f64,

    /// Whether the planned contribution (if any) reaches the goal in time
    pub achievable: bool,

    /// Months needed at the planned contribution when it falls short
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_months: Option<u32>,
}

impl SavingsGoalResult {
    pub fn summary(&self) -> String {
        if self.remaining <= 0.0 {
            return format!("The {} goal is already reached.", format_usd(self.goal_amount));
        }
        let mut text = format!(
            "To save the remaining {} in {} months, set aside {} per month (about {} per week).",
            format_usd(self.remaining),
            self.months,
            format_usd(self.monthly_required),
            format_usd(self.weekly_required),
        );
        if let Some(alt) = self.alternative_months {
            text.push_str(&format!(" At the planned contribution it would take {} months.", alt));
        }
        text
    }
}

/// Straight-line plan for reaching a savings goal
pub fn savings_goal_plan(input: &SavingsGoalInput, config: &EngineConfig) -> CalcResult<SavingsGoalResult> {
    ensure_positive("goal_amount", input.goal_amount)?;
    if input.months == 0 {
        return Err(CalcError::invalid("months", "must be at least 1"));
    }
    ensure_non_negative("current_savings", input.current_savings)?;
    if let Some(c) = input.monthly_contribution {
        ensure_positive("monthly_contribution", c)?;
    }

    let remaining = round_cents((input.goal_amount - input.current_savings).max(0.0));
    let monthly_required = round_cents(remaining / input.months as f64);
    let weekly_required = round_cents(monthly_required / config.weeks_per_month);

    let (achievable, alternative_months) = match input.monthly_contribution {
        Some(c) if c * input.months as f64 + 1e-9 < remaining => {
            (false, Some((remaining / c).ceil() as u32))
        }
        _ => (true, None),
    };

    Ok(SavingsGoalResult {
        goal_amount: input.goal_amount,
        remaining,
        months: input.months,
        monthly_required,
        weekly_required,
        achievable,
        alternative_months,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    fn goal(goal_amount: f64, months: u32, current: f64, contribution: Option<f64>) -> SavingsGoalInput {
        SavingsGoalInput {
            goal_amount,
            months,
            current_savings: current,
            monthly_contribution: contribution,
        }
    }

    #[test]
    fn test_required_savings_without_interest() {
        let input = RequiredSavingsInput { target_amount: 12_000.0, years: 2, annual_rate: 0.0 };
        let result = required_monthly_savings(&input, &config()).unwrap();
        assert_eq!(result.required_monthly_savings, 500.0);
        assert_eq!(result.total_contributions, 12_000.0);
    }

    #[test]
    fn test_interest_lowers_required_savings() {
        let input = RequiredSavingsInput { target_amount: 10_000.0, years: 5, annual_rate: 6.0 };
        let result = required_monthly_savings(&input, &config()).unwrap();
        // 10000 * 0.005 / (1.005^60 - 1)
        assert_eq!(result.required_monthly_savings, 143.33);
        assert!(result.total_contributions < 10_000.0);
        assert!(result.summary().contains("$143.33"));
    }

    #[test]
    fn test_goal_plan_straight_line() {
        let result = savings_goal_plan(&goal(5_000.0, 10, 1_000.0, None), &config()).unwrap();
        assert_eq!(result.remaining, 4_000.0);
        assert_eq!(result.monthly_required, 400.0);
        assert_eq!(result.weekly_required, 92.38);
        assert!(result.achievable);
        assert_eq!(result.alternative_months, None);
    }

    #[test]
    fn test_goal_plan_with_short_contribution() {
        let result = savings_goal_plan(&goal(3_000.0, 12, 0.0, Some(200.0)), &config()).unwrap();
        assert!(!result.achievable);
        assert_eq!(result.alternative_months, Some(15));
        assert!(result.summary().contains("15 months"));

        let result = savings_goal_plan(&goal(3_000.0, 12, 0.0, Some(250.0)), &config()).unwrap();
        assert!(result.achievable);
    }

    #[test]
    fn test_goal_already_met() {
        let result = savings_goal_plan(&goal(1_000.0, 6, 1_500.0, None), &config()).unwrap();
        assert_eq!(result.remaining, 0.0);
        assert_eq!(result.monthly_required, 0.0);
        assert!(result.achievable);
        assert!(result.summary().contains("already reached"));
    }

    #[test]
    fn test_invalid_goals() {
        let cfg = config();
        assert_eq!(savings_goal_plan(&goal(0.0, 6, 0.0, None), &cfg).unwrap_err().field(), Some("goal_amount"));
        assert_eq!(savings_goal_plan(&goal(100.0, 0, 0.0, None), &cfg).unwrap_err().field(), Some("months"));
        assert_eq!(
            savings_goal_plan(&goal(100.0, 6, -5.0, None), &cfg).unwrap_err().field(),
            Some("current_savings")
        );
        assert_eq!(
            savings_goal_plan(&goal(100.0, 6, 0.0, Some(0.0)), &cfg).unwrap_err().field(),
            Some("monthly_contribution")
        );
        let input = RequiredSavingsInput { target_amount: 100.0, years: 0, annual_rate: 1.0 };
        assert_eq!(required_monthly_savings(&input, &cfg).unwrap_err().field(), Some("years"));
    }
}
