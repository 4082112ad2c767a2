//! Financial health score (0-100) with a letter grade
//!
//! Four components, each scaled linearly within its maximum:
//! budget management 40, debt ratio 30, emergency fund 20, savings progress 10.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{ensure_non_negative, ensure_positive, CalcResult};

/// Months of expenses a full emergency fund covers
const EMERGENCY_FUND_MONTHS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthComponent {
    BudgetManagement,
    DebtRatio,
    EmergencyFund,
    SavingsProgress,
}

impl HealthComponent {
    pub const ALL: [HealthComponent; 4] = [
        HealthComponent::BudgetManagement,
        HealthComponent::DebtRatio,
        HealthComponent::EmergencyFund,
        HealthComponent::SavingsProgress,
    ];

    pub fn max_points(&self) -> u32 {
        match self {
            HealthComponent::BudgetManagement => 40,
            HealthComponent::DebtRatio => 30,
            HealthComponent::EmergencyFund => 20,
            HealthComponent::SavingsProgress => 10,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthComponent::BudgetManagement => "Budget management",
            HealthComponent::DebtRatio => "Debt ratio",
            HealthComponent::EmergencyFund => "Emergency fund",
            HealthComponent::SavingsProgress => "Savings progress",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => LetterGrade::A,
            80..=89 => LetterGrade::B,
            70..=79 => LetterGrade::C,
            60..=69 => LetterGrade::D,
            _ => LetterGrade::F,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            LetterGrade::A => "Excellent",
            LetterGrade::B => "Good",
            LetterGrade::C => "Fair",
            LetterGrade::D => "Needs Improvement",
            LetterGrade::F => "Critical",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthScoreInput {
    pub monthly_income: f64,
    pub monthly_expenses: f64,

    /// Total of all monthly debt payments
    #[serde(default)]
    pub monthly_debt_payments: f64,

    #[serde(default)]
    pub emergency_fund: f64,

    #[serde(default)]
    pub current_savings: f64,

    /// Savings target; 0 means no goal set
    #[serde(default)]
    pub savings_goal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthScoreResult {
    pub overall_score: u32,
    pub letter_grade: LetterGrade,
    pub status: String,
    pub component_scores: BTreeMap<HealthComponent, u32>,
    pub recommendations: Vec<String>,
}

impl HealthScoreResult {
    pub fn points(&self, component: HealthComponent) -> u32 {
        self.component_scores.get(&component).copied().unwrap_or(0)
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "Financial health score: {}/100 (grade {}, {}).",
            self.overall_score, self.letter_grade, self.status
        )];
        for component in HealthComponent::ALL {
            lines.push(format!(
                "- {}: {}/{} points",
                component.label(),
                self.points(component),
                component.max_points()
            ));
        }
        for r in &self.recommendations {
            lines.push(format!("* {}", r));
        }
        lines.join("\n")
    }
}

/// Ratios the components are scored from
struct Ratios {
    expense: f64,
    debt: f64,
    emergency_coverage: f64,
    savings_progress: Option<f64>,
}

impl Ratios {
    fn from_input(input: &HealthScoreInput) -> Self {
        let emergency_coverage = if input.monthly_expenses > 0.0 {
            input.emergency_fund / (EMERGENCY_FUND_MONTHS * input.monthly_expenses)
        } else {
            // Nothing to cover
            1.0
        };
        let savings_progress = if input.savings_goal > 0.0 {
            Some(input.current_savings / input.savings_goal)
        } else {
            None
        };
        Self {
            expense: input.monthly_expenses / input.monthly_income,
            debt: input.monthly_debt_payments / input.monthly_income,
            emergency_coverage,
            savings_progress,
        }
    }

    fn raw_points(&self, component: HealthComponent) -> f64 {
        let fraction = match component {
            HealthComponent::BudgetManagement => 1.0 - self.expense.clamp(0.0, 1.0),
            HealthComponent::DebtRatio => 1.0 - self.debt.clamp(0.0, 1.0),
            HealthComponent::EmergencyFund => self.emergency_coverage.min(1.0),
            HealthComponent::SavingsProgress => self.savings_progress.map_or(0.0, |p| p.min(1.0)),
        };
        fraction * component.max_points() as f64
    }
}

/// Round component points to integers that sum to the rounded total
///
/// Largest remainder: floor every component, then hand the missing points to
/// the components with the biggest fractional parts.
fn apportion(raw: &[(HealthComponent, f64)]) -> BTreeMap<HealthComponent, u32> {
    let total = raw.iter().map(|(_, p)| p).sum::<f64>().round() as u32;
    let mut points: BTreeMap<HealthComponent, u32> =
        raw.iter().map(|(c, p)| (*c, p.floor() as u32)).collect();
    let floored: u32 = points.values().sum();

    let mut by_fraction: Vec<(HealthComponent, f64)> = raw
        .iter()
        .map(|(c, p)| (*c, p - p.floor()))
        .filter(|(_, frac)| *frac > 0.0)
        .collect();
    by_fraction.sort_by(|a, b| b.1.total_cmp(&a.1));

    for (component, _) in by_fraction.into_iter().take(total.saturating_sub(floored) as usize) {
        if let Some(p) = points.get_mut(&component) {
            *p += 1;
        }
    }
    points
}

fn recommendations(ratios: &Ratios) -> Vec<String> {
    let mut recs = Vec::new();

    if ratios.expense > 1.0 {
        recs.push("Critical: expenses exceed income. An immediate budget review is needed.".to_string());
    } else if ratios.expense > 0.7 {
        recs.push("Expenses are high relative to income. Look for discretionary spending to cut.".to_string());
    }

    if ratios.debt > 0.36 {
        recs.push("Debt payments take a large share of income. Focus on paying balances down.".to_string());
    }

    if ratios.emergency_coverage < 1.0 / EMERGENCY_FUND_MONTHS {
        recs.push("Priority: start building an emergency fund now.".to_string());
    } else if ratios.emergency_coverage < 1.0 {
        recs.push("Build the emergency fund up to 3-6 months of expenses.".to_string());
    }

    match ratios.savings_progress {
        None => recs.push("Set a specific savings goal to track progress toward it.".to_string()),
        Some(p) if p < 0.5 => recs.push("Keep contributing toward the savings goal.".to_string()),
        Some(_) => {}
    }

    recs
}

/// Score income, spending, debt, emergency fund and savings progress
pub fn score_health(input: &HealthScoreInput) -> CalcResult<HealthScoreResult> {
    ensure_positive("monthly_income", input.monthly_income)?;
    ensure_non_negative("monthly_expenses", input.monthly_expenses)?;
    ensure_non_negative("monthly_debt_payments", input.monthly_debt_payments)?;
    ensure_non_negative("emergency_fund", input.emergency_fund)?;
    ensure_non_negative("current_savings", input.current_savings)?;
    ensure_non_negative("savings_goal", input.savings_goal)?;

    let ratios = Ratios::from_input(input);
    let raw: Vec<(HealthComponent, f64)> = HealthComponent::ALL
        .iter()
        .map(|c| (*c, ratios.raw_points(*c)))
        .collect();

    let component_scores = apportion(&raw);
    let overall_score: u32 = component_scores.values().sum();
    let letter_grade = LetterGrade::from_score(overall_score);

    Ok(HealthScoreResult {
        overall_score,
        letter_grade,
        status: letter_grade.status().to_string(),
        component_scores,
        recommendations: recommendations(&ratios),
    })
}
