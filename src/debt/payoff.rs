//! Month-by-month debt payoff simulation

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{ensure_non_negative, ensure_positive, ensure_rate, CalcError, CalcResult};
use crate::money::{format_usd, monthly_rate, round_cents};

/// Remaining balances at or below half a cent are treated as paid off
const PAID_OFF_EPSILON: f64 = 0.005;

/// A single debt paid at its minimum, with an optional extra payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPayoffInput {
    /// Outstanding balance
    pub balance: f64,

    /// Annual rate in percent
    pub annual_rate: f64,

    /// Required monthly payment
    pub minimum_payment: f64,

    /// Additional monthly payment on top of the minimum
    #[serde(default)]
    pub extra_payment: f64,
}

impl DebtPayoffInput {
    pub fn new(balance: f64, annual_rate: f64, minimum_payment: f64, extra_payment: f64) -> Self {
        Self {
            balance,
            annual_rate,
            minimum_payment,
            extra_payment,
        }
    }
}

/// Baseline vs accelerated payoff comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPayoffResult {
    pub baseline_months: u32,
    pub accelerated_months: u32,
    pub months_saved: u32,
    pub baseline_interest: f64,
    pub accelerated_interest: f64,
    pub interest_saved: f64,
}

impl DebtPayoffResult {
    pub fn summary(&self) -> String {
        if self.months_saved == 0 && self.interest_saved <= 0.0 {
            return format!(
                "Paying the minimum clears this debt in {} months with {} in interest.",
                self.baseline_months,
                format_usd(self.baseline_interest),
            );
        }
        format!(
            "Minimum payments take {} months ({} interest). With the extra payment it takes {} months ({} interest): {} months sooner and {} saved.",
            self.baseline_months,
            format_usd(self.baseline_interest),
            self.accelerated_months,
            format_usd(self.accelerated_interest),
            self.months_saved,
            format_usd(self.interest_saved),
        )
    }
}

/// Outcome of one simulated payoff path
#[derive(Debug, Clone, Copy, PartialEq)]
struct SimulationOutcome {
    pub months: u32,
    pub total_interest: f64,
}

/// Run the payoff loop until the balance is cleared or the cap is reached
///
/// Each month accrues `balance * monthly_rate` and then applies `payment`.
/// The final month may overpay; interest for that month is still counted.
fn simulate(
    balance: f64,
    monthly_rate: f64,
    payment: f64,
    max_months: u32,
    scenario: &'static str,
) -> CalcResult<SimulationOutcome> {
    let mut balance = balance;
    let mut months = 0u32;
    let mut total_interest = 0.0;

    while balance > PAID_OFF_EPSILON {
        if months >= max_months {
            return Err(CalcError::NonConvergence {
                scenario,
                max_months,
            });
        }
        let interest = balance * monthly_rate;
        balance = balance + interest - payment;
        total_interest += interest;
        months += 1;
    }

    Ok(SimulationOutcome {
        months,
        total_interest,
    })
}

/// Compare minimum-only payoff with minimum + extra payoff
pub fn debt_payoff(input: &DebtPayoffInput, config: &EngineConfig) -> CalcResult<DebtPayoffResult> {
    ensure_positive("balance", input.balance)?;
    ensure_rate("annual_rate", input.annual_rate, config.max_annual_rate)?;
    ensure_positive("minimum_payment", input.minimum_payment)?;
    ensure_non_negative("extra_payment", input.extra_payment)?;
    let accelerated_payment = input.minimum_payment + input.extra_payment;
    if !accelerated_payment.is_finite() {
        return Err(CalcError::invalid(
            "extra_payment",
            "minimum plus extra payment must be a finite amount",
        ));
    }

    let rate = monthly_rate(input.annual_rate);
    let first_interest = input.balance * rate;
    if input.minimum_payment <= first_interest {
        return Err(CalcError::invalid(
            "minimum_payment",
            format!(
                "must exceed the monthly interest charge of {}, got {}",
                format_usd(first_interest),
                format_usd(input.minimum_payment),
            ),
        ));
    }

    let max_months = config.max_simulation_months;
    let baseline = simulate(input.balance, rate, input.minimum_payment, max_months, "baseline")?;
    let accelerated = simulate(
        input.balance,
        rate,
        accelerated_payment,
        max_months,
        "accelerated",
    )?;

    Ok(DebtPayoffResult {
        baseline_months: baseline.months,
        accelerated_months: accelerated.months,
        months_saved: baseline.months.saturating_sub(accelerated.months),
        baseline_interest: round_cents(baseline.total_interest),
        accelerated_interest: round_cents(accelerated.total_interest),
        interest_saved: round_cents(baseline.total_interest - accelerated.total_interest),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn test_zero_rate_payoff_is_exact() {
        let result = debt_payoff(&DebtPayoffInput::new(1200.0, 0.0, 100.0, 50.0), &config()).unwrap();
        assert_eq!(result.baseline_months, 12);
        assert_eq!(result.accelerated_months, 8);
        assert_eq!(result.months_saved, 4);
        assert_eq!(result.baseline_interest, 0.0);
        assert_eq!(result.interest_saved, 0.0);
    }

    #[test]
    fn test_extra_payment_saves_time_and_interest() {
        let input = DebtPayoffInput::new(5000.0, 18.0, 150.0, 100.0);
        let result = debt_payoff(&input, &config()).unwrap();

        assert!(result.accelerated_months <= result.baseline_months);
        assert!(result.months_saved > 0);
        assert!(result.interest_saved > 0.0);
        assert_abs_diff_eq!(
            result.interest_saved,
            result.baseline_interest - result.accelerated_interest,
            epsilon = 0.011
        );
    }

    #[test]
    fn test_no_extra_payment_saves_nothing() {
        let result = debt_payoff(&DebtPayoffInput::new(3000.0, 6.0, 100.0, 0.0), &config()).unwrap();
        assert_eq!(result.baseline_months, result.accelerated_months);
        assert_eq!(result.months_saved, 0);
        assert_eq!(result.interest_saved, 0.0);
        assert!(result.summary().contains("Paying the minimum"));
    }

    #[test]
    fn test_minimum_below_interest_is_invalid() {
        let err = debt_payoff(&DebtPayoffInput::new(1000.0, 24.0, 10.0, 0.0), &config()).unwrap_err();
        assert_eq!(err.field(), Some("minimum_payment"));

        // Payment equal to the interest never reduces the balance either
        assert!(debt_payoff(&DebtPayoffInput::new(1000.0, 12.0, 10.0, 0.0), &config()).is_err());
    }

    #[test]
    fn test_cap_reports_non_convergence() {
        // Converges, but only after ~44 years at the minimum payment
        let input = DebtPayoffInput::new(10_000.0, 12.0, 100.5, 0.0);
        let config = EngineConfig {
            max_simulation_months: 120,
            ..EngineConfig::default()
        };
        let err = debt_payoff(&input, &config).unwrap_err();
        assert_eq!(
            err,
            CalcError::NonConvergence { scenario: "baseline", max_months: 120 }
        );
    }

    #[test]
    fn test_rejects_bad_fields() {
        let cfg = config();
        assert_eq!(
            debt_payoff(&DebtPayoffInput::new(0.0, 5.0, 50.0, 0.0), &cfg).unwrap_err().field(),
            Some("balance")
        );
        assert_eq!(
            debt_payoff(&DebtPayoffInput::new(100.0, -1.0, 50.0, 0.0), &cfg).unwrap_err().field(),
            Some("annual_rate")
        );
        assert_eq!(
            debt_payoff(&DebtPayoffInput::new(100.0, 5.0, 50.0, -5.0), &cfg).unwrap_err().field(),
            Some("extra_payment")
        );
    }

    #[test]
    fn test_sub_cent_leftover_is_not_another_month() {
        let result = debt_payoff(&DebtPayoffInput::new(100.004, 0.0, 10.0, 0.0), &config()).unwrap();
        assert_eq!(result.baseline_months, 10);
    }

    #[test]
    fn test_overflowing_payment_is_rejected() {
        let err = debt_payoff(&DebtPayoffInput::new(1000.0, 5.0, f64::MAX, f64::MAX), &config()).unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(err.field(), Some("extra_payment"));
    }

    #[test]
    fn test_simulation_is_deterministic() {
        let input = DebtPayoffInput::new(7500.0, 22.9, 250.0, 75.0);
        let a = debt_payoff(&input, &config()).unwrap();
        let b = debt_payoff(&input, &config()).unwrap();
        assert_eq!(a, b);
    }
}
