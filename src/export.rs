//! CSV export of calculator results
//!
//! Amounts are written with two decimals and no currency symbol so the files
//! open cleanly in a spreadsheet. Rows end in `\n` on every platform.

use std::io::Write;
use thiserror::Error;

use crate::budget::BudgetResult;
use crate::dispatch::ToolResponse;
use crate::loan::{LoanPayoffScenarios, LoanResult};
use crate::savings::CompoundResult;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("'{0}' results have no tabular form")]
    NotTabular(&'static str),
}

pub type ExportResult<T> = Result<T, ExportError>;

const AMORTIZATION_HEADER: [&str; 8] = [
    "Period",
    "Due Date",
    "Beginning Balance",
    "Payment",
    "Principal",
    "Interest",
    "Remaining Balance",
    "Cumulative Interest",
];

const YEARLY_HEADER: [&str; 4] = ["Year", "Balance", "Contributions", "Growth"];

const BUDGET_HEADER: [&str; 4] = ["Category", "Budgeted", "Description", "Percentage"];

const SCENARIO_HEADER: [&str; 7] = [
    "Extra Payment",
    "Monthly Payment",
    "Months",
    "Total Interest",
    "Total Cost",
    "Interest Saved",
    "Months Saved",
];

fn amount(value: f64) -> String {
    format!("{:.2}", value)
}

fn csv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer)
}

/// One row per scheduled payment
pub fn write_amortization_csv<W: Write>(result: &LoanResult, writer: W) -> ExportResult<()> {
    let mut csv = csv_writer(writer);
    csv.write_record(AMORTIZATION_HEADER)?;

    for row in &result.amortization_schedule {
        csv.write_record([
            row.period.to_string(),
            row.due_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            amount(row.beginning_balance),
            amount(row.payment),
            amount(row.principal_portion),
            amount(row.interest_portion),
            amount(row.remaining_balance),
            amount(row.cumulative_interest),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

pub fn write_yearly_breakdown_csv<W: Write>(result: &CompoundResult, writer: W) -> ExportResult<()> {
    let mut csv = csv_writer(writer);
    csv.write_record(YEARLY_HEADER)?;

    for year in &result.yearly_breakdown {
        csv.write_record([
            year.year.to_string(),
            amount(year.balance),
            amount(year.contributions),
            amount(year.growth),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Budget sheet: one row per category, then a total row
pub fn write_budget_csv<W: Write>(result: &BudgetResult, writer: W) -> ExportResult<()> {
    let mut csv = csv_writer(writer);
    csv.write_record(BUDGET_HEADER)?;

    for category in &result.budget_categories {
        csv.write_record([
            category.name.clone(),
            amount(category.amount),
            category.description.clone(),
            format!("{}", category.percentage),
        ])?;
    }

    let total_pct: f64 = result.budget_categories.iter().map(|c| c.percentage).sum();
    csv.write_record([
        "TOTAL".to_string(),
        amount(result.total_allocated),
        format!("Monthly income {}", amount(result.monthly_income)),
        format!("{}", total_pct),
    ])?;

    csv.flush()?;
    Ok(())
}

/// Baseline first (extra payment 0), then each accelerated scenario
pub fn write_scenarios_csv<W: Write>(result: &LoanPayoffScenarios, writer: W) -> ExportResult<()> {
    let mut csv = csv_writer(writer);
    csv.write_record(SCENARIO_HEADER)?;

    for scenario in std::iter::once(&result.baseline).chain(&result.scenarios) {
        csv.write_record([
            amount(scenario.extra_payment),
            amount(scenario.monthly_payment),
            scenario.months.to_string(),
            amount(scenario.total_interest),
            amount(scenario.total_cost),
            amount(scenario.interest_saved),
            scenario.months_saved.to_string(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Write whichever table a response carries
pub fn write_response_csv<W: Write>(response: &ToolResponse, writer: W) -> ExportResult<()> {
    match response {
        ToolResponse::Loan(r) => write_amortization_csv(r, writer),
        ToolResponse::LoanScenarios(r) => write_scenarios_csv(r, writer),
        ToolResponse::Compound(r) => write_yearly_breakdown_csv(r, writer),
        ToolResponse::Budget(r) => write_budget_csv(r, writer),
        ToolResponse::RequiredSavings(_) => Err(ExportError::NotTabular("required_savings")),
        ToolResponse::SavingsGoal(_) => Err(ExportError::NotTabular("savings_goal")),
        ToolResponse::DebtPayoff(_) => Err(ExportError::NotTabular("debt_payoff")),
        ToolResponse::DebtPortfolio(_) => Err(ExportError::NotTabular("debt_portfolio")),
        ToolResponse::HealthScore(_) => Err(ExportError::NotTabular("health_score")),
    }
}
