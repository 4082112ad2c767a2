//! Savings growth projections and savings-goal planning

mod compound;
mod goal;

pub use compound::{project_compound, CompoundInput, CompoundResult, YearBalance};
pub use goal::{
    required_monthly_savings, savings_goal_plan, RequiredSavingsInput, RequiredSavingsResult,
    SavingsGoalInput, SavingsGoalResult,
};
