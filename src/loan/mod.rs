//! Loan amortization and early-payoff scenarios

mod amortization;
mod scenarios;

pub use amortization::{amortize, level_payment, AmortizationRow, LoanInput, LoanResult};
pub use scenarios::{loan_payoff_scenarios, LoanPayoffScenarios, PayoffScenario};
