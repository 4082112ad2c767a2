//! Tool dispatch for the conversational layer
//!
//! A request arrives as `{"tool": "<name>", "params": {...}}` and comes back
//! as `{"tool": "<name>", "result": {...}}` together with a plain-text
//! summary. Unknown tools and malformed params fail at deserialization, so
//! every request that reaches [`Calculator::dispatch`] names a real handler.

use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::budget::{BudgetInput, BudgetResult};
use crate::calculator::Calculator;
use crate::debt::{DebtPayoffInput, DebtPayoffResult, DebtPortfolioInput, PortfolioPayoffResult};
use crate::error::CalcResult;
use crate::health::{HealthScoreInput, HealthScoreResult};
use crate::loan::{LoanInput, LoanPayoffScenarios, LoanResult};
use crate::savings::{
    CompoundInput, CompoundResult, RequiredSavingsInput, RequiredSavingsResult, SavingsGoalInput,
    SavingsGoalResult,
};

/// One calculator invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", content = "params", rename_all = "snake_case")]
pub enum ToolRequest {
    Loan(LoanInput),
    LoanScenarios(LoanInput),
    Compound(CompoundInput),
    RequiredSavings(RequiredSavingsInput),
    SavingsGoal(SavingsGoalInput),
    Budget(BudgetInput),
    DebtPayoff(DebtPayoffInput),
    DebtPortfolio(DebtPortfolioInput),
    HealthScore(HealthScoreInput),
}

impl ToolRequest {
    /// Wire name of the tool
    pub fn name(&self) -> &'static str {
        match self {
            ToolRequest::Loan(_) => "loan",
            ToolRequest::LoanScenarios(_) => "loan_scenarios",
            ToolRequest::Compound(_) => "compound",
            ToolRequest::RequiredSavings(_) => "required_savings",
            ToolRequest::SavingsGoal(_) => "savings_goal",
            ToolRequest::Budget(_) => "budget",
            ToolRequest::DebtPayoff(_) => "debt_payoff",
            ToolRequest::DebtPortfolio(_) => "debt_portfolio",
            ToolRequest::HealthScore(_) => "health_score",
        }
    }
}

/// Structured result, tagged with the tool that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", content = "result", rename_all = "snake_case")]
pub enum ToolResponse {
    Loan(LoanResult),
    LoanScenarios(LoanPayoffScenarios),
    Compound(CompoundResult),
    RequiredSavings(RequiredSavingsResult),
    SavingsGoal(SavingsGoalResult),
    Budget(BudgetResult),
    DebtPayoff(DebtPayoffResult),
    DebtPortfolio(PortfolioPayoffResult),
    HealthScore(HealthScoreResult),
}

impl ToolResponse {
    pub fn summary(&self) -> String {
        match self {
            ToolResponse::Loan(r) => r.summary(),
            ToolResponse::LoanScenarios(r) => r.summary(),
            ToolResponse::Compound(r) => r.summary(),
            ToolResponse::RequiredSavings(r) => r.summary(),
            ToolResponse::SavingsGoal(r) => r.summary(),
            ToolResponse::Budget(r) => r.summary(),
            ToolResponse::DebtPayoff(r) => r.summary(),
            ToolResponse::DebtPortfolio(r) => r.summary(),
            ToolResponse::HealthScore(r) => r.summary(),
        }
    }
}

/// Response plus the text the chat layer shows to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolOutcome {
    pub response: ToolResponse,
    pub summary: String,
}

impl Calculator {
    /// Route a request to its calculator
    pub fn dispatch(&self, request: &ToolRequest) -> CalcResult<ToolOutcome> {
        debug!("dispatching {} request", request.name());

        let response = match request {
            ToolRequest::Loan(input) => self.loan(input).map(ToolResponse::Loan),
            ToolRequest::LoanScenarios(input) => self.loan_scenarios(input).map(ToolResponse::LoanScenarios),
            ToolRequest::Compound(input) => self.compound(input).map(ToolResponse::Compound),
            ToolRequest::RequiredSavings(input) => self.required_savings(input).map(ToolResponse::RequiredSavings),
            ToolRequest::SavingsGoal(input) => self.savings_goal(input).map(ToolResponse::SavingsGoal),
            ToolRequest::Budget(input) => self.budget(input).map(ToolResponse::Budget),
            ToolRequest::DebtPayoff(input) => self.debt_payoff(input).map(ToolResponse::DebtPayoff),
            ToolRequest::DebtPortfolio(input) => self.debt_portfolio(input).map(ToolResponse::DebtPortfolio),
            ToolRequest::HealthScore(input) => self.health_score(input).map(ToolResponse::HealthScore),
        };

        let response = response.map_err(|e| {
            warn!("{} request rejected: {}", request.name(), e);
            e
        })?;

        let summary = response.summary();
        Ok(ToolOutcome { response, summary })
    }

    /// Dispatch independent requests in parallel; outcomes keep the input order
    pub fn dispatch_batch(&self, requests: &[ToolRequest]) -> Vec<CalcResult<ToolOutcome>> {
        requests.par_iter().map(|r| self.dispatch(r)).collect()
    }
}
