//! Early-payoff scenarios for a fixed-payment loan
//!
//! Rolls the loan's cent-exact schedule at the level payment, then repeats
//! it with each configured extra monthly payment, so the baseline always
//! matches the amortization schedule month for month.

use serde::{Deserialize, Serialize};

use super::amortization::{payment_for, schedule, validate, AmortizationRow, LoanInput};
use crate::config::EngineConfig;
use crate::error::CalcResult;
use crate::money::{format_usd, from_cents, monthly_rate, to_cents};

/// Outcome of paying a loan at one payment level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffScenario {
    pub extra_payment: f64,
    pub monthly_payment: f64,
    pub months: u32,
    pub total_interest: f64,
    pub total_cost: f64,
    pub interest_saved: f64,
    pub months_saved: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPayoffScenarios {
    pub principal: f64,
    pub baseline: PayoffScenario,
    pub scenarios: Vec<PayoffScenario>,
}

impl LoanPayoffScenarios {
    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "Paying {} per month clears the loan in {} months with {} in interest.",
            format_usd(self.baseline.monthly_payment),
            self.baseline.months,
            format_usd(self.baseline.total_interest),
        )];
        for s in &self.scenarios {
            lines.push(format!(
                "- Extra {}/month: {} months, saves {} in interest and {} months.",
                format_usd(s.extra_payment),
                s.months,
                format_usd(s.interest_saved),
                s.months_saved,
            ));
        }
        lines.join("\n")
    }
}

/// Months and total interest (in cents) of a schedule
fn payoff_totals(rows: &[AmortizationRow]) -> (u32, i64) {
    let interest = rows.last().map_or(0, |r| to_cents(r.cumulative_interest));
    (rows.len() as u32, interest)
}

/// Baseline payoff plus one scenario per `config.loan_extra_scenarios` entry
pub fn loan_payoff_scenarios(
    input: &LoanInput,
    config: &EngineConfig,
) -> CalcResult<LoanPayoffScenarios> {
    validate(input, config)?;

    let rate = monthly_rate(input.annual_rate);
    let payment = payment_for(input)?;
    let payment_cents = to_cents(payment);
    let principal_cents = to_cents(input.principal);

    let (base_months, base_interest) = payoff_totals(&schedule(input, rate, payment_cents));
    let baseline = PayoffScenario {
        extra_payment: 0.0,
        monthly_payment: payment,
        months: base_months,
        total_interest: from_cents(base_interest),
        total_cost: from_cents(principal_cents + base_interest),
        interest_saved: 0.0,
        months_saved: 0,
    };

    let scenarios = config
        .loan_extra_scenarios
        .iter()
        .map(|&extra| {
            let accelerated = payment_cents.saturating_add(to_cents(extra));
            let (months, interest) = payoff_totals(&schedule(input, rate, accelerated));
            PayoffScenario {
                extra_payment: extra,
                monthly_payment: from_cents(accelerated),
                months,
                total_interest: from_cents(interest),
                total_cost: from_cents(principal_cents + interest),
                interest_saved: from_cents(base_interest - interest),
                months_saved: base_months.saturating_sub(months),
            }
        })
        .collect();

    Ok(LoanPayoffScenarios {
        principal: input.principal,
        baseline,
        scenarios,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::amortize;

    #[test]
    fn test_baseline_matches_loan_term() {
        let result = loan_payoff_scenarios(&LoanInput::new(10_000.0, 5.0, 10), &EngineConfig::default()).unwrap();
        assert_eq!(result.baseline.monthly_payment, 106.07);
        assert_eq!(result.baseline.months, 120);
        assert!((result.baseline.total_interest - 2_728.0).abs() < 2.0);
        assert_eq!(result.scenarios.len(), 3);
    }

    #[test]
    fn test_baseline_agrees_with_schedule() {
        let config = EngineConfig::default();
        for principal in [1_234.56, 5_000.0, 9_999.99, 27_500.0, 250_000.0] {
            for rate in [0.0, 3.25, 5.0, 6.8, 19.99] {
                for years in [1, 3, 10, 30] {
                    let input = LoanInput::new(principal, rate, years);
                    let loan = amortize(&input, &config).unwrap();
                    let result = loan_payoff_scenarios(&input, &config).unwrap();

                    assert_eq!(
                        result.baseline.months as usize,
                        loan.amortization_schedule.len(),
                        "{} at {}% for {} years",
                        principal,
                        rate,
                        years
                    );
                    assert_eq!(
                        result.baseline.total_interest,
                        loan.amortization_schedule.last().unwrap().cumulative_interest
                    );
                    assert_eq!(to_cents(result.baseline.total_cost), to_cents(loan.scheduled_total()));
                }
            }
        }
    }

    #[test]
    fn test_rejects_loan_too_small_to_repay() {
        let err = loan_payoff_scenarios(&LoanInput::new(0.5, 5.0, 30), &EngineConfig::default()).unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(err.field(), Some("principal"));
    }

    #[test]
    fn test_larger_extra_pays_off_sooner() {
        let result = loan_payoff_scenarios(&LoanInput::new(30_000.0, 6.5, 20), &EngineConfig::default()).unwrap();

        let mut prev_months = result.baseline.months;
        let mut prev_saved = 0.0;
        for s in &result.scenarios {
            assert!(s.months < prev_months);
            assert!(s.interest_saved > prev_saved);
            assert_eq!(s.months_saved, result.baseline.months - s.months);
            prev_months = s.months;
            prev_saved = s.interest_saved;
        }
        assert!(result.summary().contains("Extra $200.00/month"));
    }

    #[test]
    fn test_custom_extra_payments() {
        let config = EngineConfig {
            loan_extra_scenarios: vec![25.0],
            ..EngineConfig::default()
        };
        let result = loan_payoff_scenarios(&LoanInput::new(5_000.0, 4.0, 5), &config).unwrap();
        assert_eq!(result.scenarios.len(), 1);
        assert_eq!(result.scenarios[0].extra_payment, 25.0);
    }

    #[test]
    fn test_rejects_invalid_loan() {
        let err = loan_payoff_scenarios(&LoanInput::new(-1.0, 5.0, 10), &EngineConfig::default()).unwrap_err();
        assert_eq!(err.field(), Some("principal"));
    }
}
