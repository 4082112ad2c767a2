//! Budget template generation

mod recommendations;
mod template;

pub use template::{build_budget, BudgetInput, BudgetResult, CategoryAllocation, STUDENT_CATEGORIES};
