//! Guideline checks on a finished budget allocation

use super::template::CategoryAllocation;

fn share_of(categories: &[CategoryAllocation], name: &str) -> Option<f64> {
    categories
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
        .map(|c| c.percentage)
}

/// Compare category shares against student budgeting guidelines
pub(crate) fn recommend(categories: &[CategoryAllocation]) -> Vec<String> {
    let mut recommendations = Vec::new();

    match share_of(categories, "Emergency Fund") {
        None => recommendations.push(
            "There is no emergency fund category. Setting aside even 5-10% of income builds a cushion for unexpected expenses."
                .to_string(),
        ),
        Some(pct) if pct < 8.0 => recommendations.push(
            "Emergency fund is below the recommended 10% of income. Try to increase it gradually.".to_string(),
        ),
        Some(_) => {}
    }

    if share_of(categories, "Savings").map_or(true, |pct| pct < 5.0) {
        recommendations.push("Consider saving at least 5% of income for long-term goals.".to_string());
    }

    if share_of(categories, "Food").is_some_and(|pct| pct > 25.0) {
        recommendations.push(
            "Food costs seem high. Meal prep and cooking at home can bring them down.".to_string(),
        );
    }

    if share_of(categories, "Housing").is_some_and(|pct| pct > 40.0) {
        recommendations.push(
            "Housing takes more than 40% of income. Roommates or a cheaper lease would free up room elsewhere."
                .to_string(),
        );
    }

    if recommendations.is_empty() {
        recommendations.push("This allocation follows the recommended student budgeting guidelines.".to_string());
    }

    recommendations
}
