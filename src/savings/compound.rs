//! Compound growth with monthly contributions

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{ensure_non_negative, ensure_rate, ensure_years, CalcResult};
use crate::money::{format_usd, monthly_rate, round_cents};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundInput {
    /// Starting balance
    #[serde(default)]
    pub principal: f64,

    /// Deposit added at the end of every month
    #[serde(default)]
    pub monthly_contribution: f64,

    /// Annual rate in percent, compounded monthly
    pub annual_rate: f64,

    pub years: u32,
}

impl CompoundInput {
    pub fn new(principal: f64, monthly_contribution: f64, annual_rate: f64, years: u32) -> Self {
        Self {
            principal,
            monthly_contribution,
            annual_rate,
            years,
        }
    }
}

/// Balance at the end of a projection year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearBalance {
    pub year: u32,
    pub balance: f64,
    pub contributions: f64,
    pub growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundResult {
    pub future_value: f64,
    pub total_contributions: f64,
    pub total_growth: f64,

    /// Growth as a percentage of everything contributed
    pub effective_rate: f64,

    pub yearly_breakdown: Vec<YearBalance>,
}

impl CompoundResult {
    pub fn summary(&self) -> String {
        format!(
            "After {} years the balance grows to {}: {} contributed plus {} of growth ({}% on contributions).",
            self.yearly_breakdown.len(),
            format_usd(self.future_value),
            format_usd(self.total_contributions),
            format_usd(self.total_growth),
            self.effective_rate,
        )
    }
}

/// Project the balance month by month and report year-end snapshots
pub fn project_compound(input: &CompoundInput, config: &EngineConfig) -> CalcResult<CompoundResult> {
    ensure_non_negative("principal", input.principal)?;
    ensure_non_negative("monthly_contribution", input.monthly_contribution)?;
    ensure_rate("annual_rate", input.annual_rate, config.max_annual_rate)?;
    ensure_years("years", input.years, config.max_term_years)?;

    let rate = monthly_rate(input.annual_rate);
    let months = input.years.saturating_mul(12);

    let mut balance = input.principal;
    let mut yearly_breakdown = Vec::with_capacity(input.years as usize);

    for month in 1..=months {
        balance = balance * (1.0 + rate) + input.monthly_contribution;

        if month % 12 == 0 {
            let contributed = input.principal + input.monthly_contribution * month as f64;
            yearly_breakdown.push(YearBalance {
                year: month / 12,
                balance: round_cents(balance),
                contributions: round_cents(contributed),
                growth: round_cents(balance - contributed),
            });
        }
    }

    let future_value = round_cents(balance);
    let total_contributions = round_cents(input.principal + input.monthly_contribution * months as f64);
    let total_growth = round_cents(future_value - total_contributions);
    let effective_rate = if total_contributions > 0.0 {
        round_cents(total_growth / total_contributions * 100.0)
    } else {
        0.0
    };

    Ok(CompoundResult {
        future_value,
        total_contributions,
        total_growth,
        effective_rate,
        yearly_breakdown,
    })
}
