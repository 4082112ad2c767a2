//! Debt payoff simulation for single debts and small portfolios

mod payoff;
mod portfolio;

pub use payoff::{debt_payoff, DebtPayoffInput, DebtPayoffResult};
pub use portfolio::{
    portfolio_payoff, DebtAccount, DebtOutcome, DebtPortfolioInput, PortfolioPayoffResult,
};
