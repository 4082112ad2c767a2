//! Payoff comparison across several named debts

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::payoff::{debt_payoff, DebtPayoffInput, DebtPayoffResult};
use crate::config::EngineConfig;
use crate::error::{ensure_non_negative, CalcError, CalcResult};
use crate::money::{format_usd, round_cents};

/// One debt as reported by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtAccount {
    pub name: String,
    pub balance: f64,
    pub annual_rate: f64,

    /// Monthly payment; 0 means "use the default minimum"
    #[serde(default)]
    pub monthly_payment: f64,
}

/// Debts plus the extra payment applied to each of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPortfolioInput {
    pub debts: Vec<DebtAccount>,
    #[serde(default)]
    pub extra_payment: f64,
}

/// Payoff outcome for one debt in the portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtOutcome {
    pub name: String,
    pub minimum_payment: f64,
    pub payoff: DebtPayoffResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioPayoffResult {
    pub by_debt: Vec<DebtOutcome>,
    pub extra_payment: f64,
    pub total_interest_saved: f64,
}

impl PortfolioPayoffResult {
    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "Adding {} per month to each debt saves {} in interest overall.",
            format_usd(self.extra_payment),
            format_usd(self.total_interest_saved),
        )];
        for outcome in &self.by_debt {
            lines.push(format!(
                "- {}: {} -> {} months, {} saved",
                outcome.name,
                outcome.payoff.baseline_months,
                outcome.payoff.accelerated_months,
                format_usd(outcome.payoff.interest_saved),
            ));
        }
        lines.join("\n")
    }
}

/// Simulate every debt with the same extra payment applied to each
///
/// Debts are independent, so they are simulated in parallel. Results keep
/// the input order.
pub fn portfolio_payoff(
    debts: &[DebtAccount],
    extra_payment: f64,
    config: &EngineConfig,
) -> CalcResult<PortfolioPayoffResult> {
    if debts.is_empty() {
        return Err(CalcError::invalid("debts", "at least one debt is required"));
    }
    ensure_non_negative("extra_payment", extra_payment)?;
    if let Some(debt) = debts.iter().find(|d| d.name.trim().is_empty()) {
        return Err(CalcError::invalid(
            "name",
            format!("debt with balance {} has no name", format_usd(debt.balance)),
        ));
    }

    let by_debt = debts
        .par_iter()
        .map(|debt| {
            ensure_non_negative("monthly_payment", debt.monthly_payment)?;
            let minimum_payment = if debt.monthly_payment > 0.0 {
                debt.monthly_payment
            } else {
                round_cents(debt.balance * config.default_min_payment_pct / 100.0)
            };
            let input = DebtPayoffInput::new(debt.balance, debt.annual_rate, minimum_payment, extra_payment);
            let payoff = debt_payoff(&input, config)?;
            Ok(DebtOutcome {
                name: debt.name.clone(),
                minimum_payment,
                payoff,
            })
        })
        .collect::<CalcResult<Vec<_>>>()?;

    let total_interest_saved = round_cents(by_debt.iter().map(|d| d.payoff.interest_saved).sum());

    Ok(PortfolioPayoffResult {
        by_debt,
        extra_payment,
        total_interest_saved,
    })
}
