//! Percentage-based budget allocation
//!
//! Each category gets `income * percentage`, rounded to the cent. The cents
//! lost or gained by rounding (and by percentages that sum to slightly more
//! or less than 100 within tolerance) are moved into the largest category so
//! the allocation always sums to the income exactly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::recommendations::recommend;
use crate::config::EngineConfig;
use crate::error::{ensure_positive, CalcError, CalcResult};
use crate::money::{format_usd, from_cents, to_cents};

/// Default student template: (name, percent of income, description)
pub const STUDENT_CATEGORIES: [(&str, f64, &str); 8] = [
    ("Housing", 35.0, "Rent, utilities, dorm fees"),
    ("Food", 20.0, "Meal plan, groceries, dining out"),
    ("Transportation", 10.0, "Bus pass, gas, car maintenance"),
    ("Textbooks & Supplies", 8.0, "Books, software, lab materials"),
    ("Personal Care", 5.0, "Clothing, hygiene, healthcare"),
    ("Entertainment", 7.0, "Movies, subscriptions, social activities"),
    ("Emergency Fund", 10.0, "Unexpected expenses"),
    ("Savings", 5.0, "Long-term savings goals"),
];

fn default_user_name() -> String {
    "Student".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetInput {
    pub monthly_income: f64,

    #[serde(default = "default_user_name")]
    pub user_name: String,

    /// Category name -> percent of income; replaces the default template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<BTreeMap<String, f64>>,
}

impl BudgetInput {
    pub fn new(monthly_income: f64) -> Self {
        Self {
            monthly_income,
            user_name: default_user_name(),
            overrides: None,
        }
    }

    pub fn for_user(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = user_name.into();
        self
    }

    pub fn with_overrides(mut self, overrides: BTreeMap<String, f64>) -> Self {
        self.overrides = Some(overrides);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAllocation {
    pub name: String,
    pub percentage: f64,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetResult {
    pub user_name: String,
    pub monthly_income: f64,
    pub budget_categories: Vec<CategoryAllocation>,
    pub total_allocated: f64,

    /// Income minus allocations; zero once reconciled
    pub remaining_balance: f64,

    pub recommendations: Vec<String>,
}

impl BudgetResult {
    /// Category name -> allocated amount
    pub fn category_amounts(&self) -> BTreeMap<String, f64> {
        self.budget_categories
            .iter()
            .map(|c| (c.name.clone(), c.amount))
            .collect()
    }

    pub fn amount_for(&self, name: &str) -> Option<f64> {
        self.budget_categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .map(|c| c.amount)
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "Monthly budget for {} on {} of income:",
            self.user_name,
            format_usd(self.monthly_income),
        )];
        for c in &self.budget_categories {
            lines.push(format!("- {}: {} ({}%)", c.name, format_usd(c.amount), c.percentage));
        }
        for r in &self.recommendations {
            lines.push(format!("* {}", r));
        }
        lines.join("\n")
    }
}

/// Resolve the category shares to allocate, validating any overrides
fn category_shares(input: &BudgetInput, config: &EngineConfig) -> CalcResult<Vec<(String, f64, String)>> {
    let shares: Vec<(String, f64, String)> = match &input.overrides {
        None => STUDENT_CATEGORIES
            .iter()
            .map(|(name, pct, desc)| (name.to_string(), *pct, desc.to_string()))
            .collect(),
        Some(overrides) => {
            if overrides.is_empty() {
                return Err(CalcError::invalid("overrides", "must contain at least one category"));
            }
            overrides
                .iter()
                .map(|(name, pct)| {
                    let description = STUDENT_CATEGORIES
                        .iter()
                        .find(|(n, _, _)| n.eq_ignore_ascii_case(name))
                        .map(|(_, _, d)| d.to_string())
                        .unwrap_or_default();
                    (name.clone(), *pct, description)
                })
                .collect()
        }
    };

    for (name, pct, _) in &shares {
        if name.trim().is_empty() {
            return Err(CalcError::invalid("overrides", "category names must not be empty"));
        }
        if !pct.is_finite() || *pct < 0.0 {
            return Err(CalcError::invalid(
                "overrides",
                format!("percentage for '{}' must be a non-negative number, got {}", name, pct),
            ));
        }
    }

    let total: f64 = shares.iter().map(|(_, pct, _)| pct).sum();
    if (total - 100.0).abs() > config.budget_tolerance_pct {
        return Err(CalcError::invalid(
            "overrides",
            format!(
                "percentages must sum to 100 (±{}), got {}",
                config.budget_tolerance_pct, total
            ),
        ));
    }

    Ok(shares)
}

/// Index of the largest amount; the first one listed wins ties
fn largest(cents: &[i64]) -> usize {
    cents
        .iter()
        .enumerate()
        .fold(0, |best, (i, &c)| if c > cents[best] { i } else { best })
}

/// Make the rounded amounts sum to `income_cents`
///
/// A shortfall goes to the largest category. An excess is taken back from
/// the largest categories in turn, so no amount drops below zero.
fn reconcile(cents: &mut [i64], income_cents: i64) {
    let mut remainder = income_cents - cents.iter().sum::<i64>();
    if remainder >= 0 {
        let i = largest(cents);
        cents[i] += remainder;
        return;
    }
    while remainder < 0 {
        let i = largest(cents);
        if cents[i] <= 0 {
            break;
        }
        let take = cents[i].min(-remainder);
        cents[i] -= take;
        remainder += take;
    }
}

/// Allocate monthly income across the budget categories
pub fn build_budget(input: &BudgetInput, config: &EngineConfig) -> CalcResult<BudgetResult> {
    ensure_positive("monthly_income", input.monthly_income)?;
    let income_cents = to_cents(input.monthly_income);
    if income_cents == 0 {
        return Err(CalcError::invalid("monthly_income", "must be at least one cent"));
    }

    let shares = category_shares(input, config)?;

    let mut cents: Vec<i64> = shares
        .iter()
        .map(|(_, pct, _)| (income_cents as f64 * pct / 100.0).round() as i64)
        .collect();

    reconcile(&mut cents, income_cents);

    let budget_categories: Vec<CategoryAllocation> = shares
        .into_iter()
        .zip(cents.iter())
        .map(|((name, percentage, description), &c)| CategoryAllocation {
            name,
            percentage,
            amount: from_cents(c),
            description,
        })
        .collect();

    let allocated_cents: i64 = cents.iter().sum();
    let recommendations = recommend(&budget_categories);

    Ok(BudgetResult {
        user_name: input.user_name.clone(),
        monthly_income: input.monthly_income,
        budget_categories,
        total_allocated: from_cents(allocated_cents),
        remaining_balance: from_cents(income_cents - allocated_cents),
        recommendations,
    })
}
