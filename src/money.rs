//! Currency rounding helpers
//!
//! Amounts are carried as `f64` dollars at the API surface. Anything that has
//! to reconcile to the cent is done on whole cents (`i64`) and converted back.

/// Round a dollar amount to 2 decimal places
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Convert dollars to whole cents, rounding half away from zero
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Convert whole cents back to dollars
pub fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Monthly fraction for an annual percentage rate (5.0 -> 0.05 / 12)
pub fn monthly_rate(annual_rate_pct: f64) -> f64 {
    annual_rate_pct / 100.0 / 12.0
}

/// Format a dollar amount with thousands separators, e.g. `$12,728.40`
pub fn format_usd(amount: f64) -> String {
    let cents = to_cents(amount.abs());
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents != 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, frac)
}
