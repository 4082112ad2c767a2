//! Fixed-payment loan amortization
//!
//! The level payment comes from the standard annuity formula and is rounded
//! to the cent. The schedule is then rolled forward on whole cents: each
//! month's interest is rounded, the rest of the payment retires principal,
//! and the final payment absorbs whatever rounding drift is left so the
//! principal portions sum exactly to the amount borrowed.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{ensure_positive, ensure_rate, ensure_years, CalcError, CalcResult};
use crate::money::{format_usd, from_cents, monthly_rate, round_cents, to_cents};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    /// Amount borrowed
    pub principal: f64,

    /// Annual rate in percent (5.0 = 5%)
    pub annual_rate: f64,

    /// Term in years
    pub years: u32,

    /// Due date of the first payment; rows are dated monthly from here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

impl LoanInput {
    pub fn new(principal: f64, annual_rate: f64, years: u32) -> Self {
        Self {
            principal,
            annual_rate,
            years,
            start_date: None,
        }
    }

    pub fn starting(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn months(&self) -> u32 {
        self.years.saturating_mul(12)
    }
}

/// One month of the amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// Payment number (1-indexed)
    pub period: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub beginning_balance: f64,
    pub payment: f64,
    pub principal_portion: f64,
    pub interest_portion: f64,
    pub remaining_balance: f64,
    pub cumulative_interest: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub principal: f64,
    pub annual_rate: f64,
    pub years: u32,

    /// Level monthly payment
    pub monthly_payment: f64,

    /// Last scheduled payment after rounding reconciliation
    pub final_payment: f64,

    /// `monthly_payment * months`
    pub total_cost: f64,

    /// `total_cost - principal`
    pub total_interest: f64,

    pub amortization_schedule: Vec<AmortizationRow>,
}

impl LoanResult {
    pub fn months(&self) -> u32 {
        self.years.saturating_mul(12)
    }

    /// Sum of the scheduled payments, including the reconciled final one
    pub fn scheduled_total(&self) -> f64 {
        from_cents(self.amortization_schedule.iter().map(|r| to_cents(r.payment)).sum())
    }

    pub fn summary(&self) -> String {
        format!(
            "Borrowing {} at {}% for {} years costs {} per month over {} payments. \
             Total repaid: {}, of which {} is interest.",
            format_usd(self.principal),
            self.annual_rate,
            self.years,
            format_usd(self.monthly_payment),
            self.months(),
            format_usd(self.total_cost),
            format_usd(self.total_interest),
        )
    }
}

/// Level payment for `principal` over `months` at `monthly_rate`, rounded to the cent
pub fn level_payment(principal: f64, monthly_rate: f64, months: u32) -> f64 {
    if monthly_rate == 0.0 {
        return round_cents(principal / months as f64);
    }
    let growth = (1.0 + monthly_rate).powi(months as i32);
    round_cents(principal * monthly_rate * growth / (growth - 1.0))
}

pub(crate) fn validate(input: &LoanInput, config: &EngineConfig) -> CalcResult<()> {
    ensure_positive("principal", input.principal)?;
    if to_cents(input.principal) == 0 {
        return Err(CalcError::invalid("principal", "must be at least one cent"));
    }
    ensure_rate("annual_rate", input.annual_rate, config.max_annual_rate)?;
    ensure_years("years", input.years, config.max_term_years)?;
    Ok(())
}

/// Level payment for a validated loan
///
/// A principal so small that the payment rounds to zero cents cannot be
/// amortized over the term and is rejected.
pub(crate) fn payment_for(input: &LoanInput) -> CalcResult<f64> {
    let payment = level_payment(input.principal, monthly_rate(input.annual_rate), input.months());
    if to_cents(payment) == 0 {
        return Err(CalcError::invalid(
            "principal",
            format!(
                "{} is too small to repay over {} monthly payments",
                format_usd(input.principal),
                input.months()
            ),
        ));
    }
    Ok(payment)
}

/// Roll the loan forward on whole cents paying `payment_cents` each month
///
/// The last period of the term clears whatever balance is left. The
/// schedule ends early once the balance reaches zero.
pub(crate) fn schedule(input: &LoanInput, rate: f64, payment_cents: i64) -> Vec<AmortizationRow> {
    let months = input.months();
    let mut rows = Vec::with_capacity(months as usize);
    let mut balance = to_cents(input.principal);
    let mut cumulative_interest = 0i64;

    for period in 1..=months {
        let beginning = balance;
        let interest = (beginning as f64 * rate).round() as i64;
        let mut principal_part = payment_cents.saturating_sub(interest).max(0);
        if period == months || principal_part >= beginning {
            principal_part = beginning;
        }

        balance -= principal_part;
        cumulative_interest += interest;

        rows.push(AmortizationRow {
            period,
            due_date: input
                .start_date
                .and_then(|d| d.checked_add_months(Months::new(period - 1))),
            beginning_balance: from_cents(beginning),
            payment: from_cents(principal_part + interest),
            principal_portion: from_cents(principal_part),
            interest_portion: from_cents(interest),
            remaining_balance: from_cents(balance),
            cumulative_interest: from_cents(cumulative_interest),
        });

        if balance == 0 {
            break;
        }
    }

    rows
}

/// Compute the level payment, totals and full amortization schedule
pub fn amortize(input: &LoanInput, config: &EngineConfig) -> CalcResult<LoanResult> {
    validate(input, config)?;

    let months = input.months();
    let monthly_payment = payment_for(input)?;
    let schedule = schedule(input, monthly_rate(input.annual_rate), to_cents(monthly_payment));

    let final_payment = schedule.last().map(|r| r.payment).unwrap_or(0.0);
    let total_cost = round_cents(monthly_payment * months as f64);

    Ok(LoanResult {
        principal: input.principal,
        annual_rate: input.annual_rate,
        years: input.years,
        monthly_payment,
        final_payment,
        total_cost,
        total_interest: round_cents(total_cost - input.principal),
        amortization_schedule: schedule,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    fn principal_paid_cents(result: &LoanResult) -> i64 {
        result
            .amortization_schedule
            .iter()
            .map(|r| to_cents(r.principal_portion))
            .sum()
    }

    #[test]
    fn test_reference_loan() {
        let result = amortize(&LoanInput::new(10_000.0, 5.0, 10), &config()).unwrap();

        assert_eq!(result.monthly_payment, 106.07);
        assert_abs_diff_eq!(result.total_cost, 12_728.40, epsilon = 0.005);
        assert_abs_diff_eq!(result.total_interest, 2_728.40, epsilon = 0.005);
        assert_eq!(result.amortization_schedule.len(), 120);
    }

    #[test]
    fn test_schedule_retires_principal_exactly() {
        for (principal, rate, years) in [
            (10_000.0, 5.0, 10),
            (27_500.0, 6.8, 25),
            (1_234.56, 19.99, 3),
            (350_000.0, 3.25, 30),
            (500.0, 0.0, 1),
        ] {
            let result = amortize(&LoanInput::new(principal, rate, years), &config()).unwrap();
            let last = result.amortization_schedule.last().unwrap();

            assert_eq!(last.remaining_balance, 0.0);
            assert_eq!(principal_paid_cents(&result), to_cents(principal));
            assert_abs_diff_eq!(result.final_payment, last.payment, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_rows_split_payment_into_interest_and_principal() {
        let result = amortize(&LoanInput::new(10_000.0, 5.0, 10), &config()).unwrap();
        let first = &result.amortization_schedule[0];

        assert_eq!(first.beginning_balance, 10_000.0);
        assert_eq!(first.interest_portion, 41.67);
        assert_eq!(first.principal_portion, 64.40);
        assert_eq!(first.remaining_balance, 9_935.60);

        for row in &result.amortization_schedule[..119] {
            assert_abs_diff_eq!(row.payment, 106.07, epsilon = 1e-9);
            assert_abs_diff_eq!(
                row.payment,
                row.principal_portion + row.interest_portion,
                epsilon = 1e-9
            );
        }

        let total_interest: i64 = result
            .amortization_schedule
            .iter()
            .map(|r| to_cents(r.interest_portion))
            .sum();
        assert_eq!(to_cents(result.amortization_schedule[119].cumulative_interest), total_interest);
    }

    #[test]
    fn test_zero_rate_divides_evenly() {
        let result = amortize(&LoanInput::new(12_000.0, 0.0, 5), &config()).unwrap();
        assert_eq!(result.monthly_payment, 200.0);
        assert_eq!(result.total_interest, 0.0);
        assert!(result.amortization_schedule.iter().all(|r| r.interest_portion == 0.0));

        // Uneven split: the last payment absorbs the remainder
        let result = amortize(&LoanInput::new(1_000.0, 0.0, 3), &config()).unwrap();
        assert_eq!(result.monthly_payment, 27.78);
        assert_eq!(result.final_payment, 27.70);
        assert_eq!(principal_paid_cents(&result), 100_000);
    }

    #[test]
    fn test_tiny_loan_stops_when_paid() {
        let result = amortize(&LoanInput::new(1.0, 5.0, 30), &config()).unwrap();
        assert_eq!(result.monthly_payment, 0.01);
        assert!(result.amortization_schedule.len() < 360);
        assert_eq!(result.amortization_schedule.last().unwrap().remaining_balance, 0.0);
    }

    #[test]
    fn test_due_dates_follow_start_date() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        let result = amortize(&LoanInput::new(2_400.0, 4.0, 1).starting(start), &config()).unwrap();

        let dates: Vec<_> = result
            .amortization_schedule
            .iter()
            .take(3)
            .map(|r| r.due_date.unwrap())
            .collect();
        assert_eq!(dates[0], start);
        assert_eq!(dates[1], NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
        assert_eq!(dates[2], NaiveDate::from_ymd_opt(2026, 3, 31).unwrap());

        let undated = amortize(&LoanInput::new(2_400.0, 4.0, 1), &config()).unwrap();
        assert!(undated.amortization_schedule[0].due_date.is_none());
    }

    #[test]
    fn test_invalid_inputs() {
        let cfg = config();
        assert_eq!(amortize(&LoanInput::new(-100.0, 5.0, 10), &cfg).unwrap_err().field(), Some("principal"));
        assert_eq!(amortize(&LoanInput::new(0.0, 5.0, 10), &cfg).unwrap_err().field(), Some("principal"));
        assert_eq!(amortize(&LoanInput::new(0.001, 5.0, 10), &cfg).unwrap_err().field(), Some("principal"));
        assert_eq!(amortize(&LoanInput::new(1000.0, -0.5, 10), &cfg).unwrap_err().field(), Some("annual_rate"));
        assert_eq!(amortize(&LoanInput::new(1000.0, 101.0, 10), &cfg).unwrap_err().field(), Some("annual_rate"));
        assert_eq!(amortize(&LoanInput::new(1000.0, 5.0, 0), &cfg).unwrap_err().field(), Some("years"));
        assert_eq!(amortize(&LoanInput::new(f64::NAN, 5.0, 10), &cfg).unwrap_err().field(), Some("principal"));
    }

    #[test]
    fn test_payment_rounding_to_zero_is_rejected() {
        // $0.50 over 360 months is about a twentieth of a cent per month
        let err = amortize(&LoanInput::new(0.5, 5.0, 30), &config()).unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(err.field(), Some("principal"));

        let err = amortize(&LoanInput::new(1.0, 0.0, 30), &config()).unwrap_err();
        assert_eq!(err.field(), Some("principal"));

        // Just over half a cent per month still rounds up to a payable cent
        let result = amortize(&LoanInput::new(2.0, 0.0, 30), &config()).unwrap();
        assert_eq!(result.monthly_payment, 0.01);
        assert_eq!(result.amortization_schedule.len(), 200);
    }

    #[test]
    fn test_idempotent() {
        let input = LoanInput::new(18_250.0, 7.25, 15);
        assert_eq!(amortize(&input, &config()).unwrap(), amortize(&input, &config()).unwrap());
    }

    #[test]
    fn test_summary_mentions_totals() {
        let result = amortize(&LoanInput::new(10_000.0, 5.0, 10), &config()).unwrap();
        let summary = result.summary();
        assert!(summary.contains("$106.07"));
        assert!(summary.contains("$12,728.40"));
        assert!(summary.contains("$2,728.40"));
    }
}
