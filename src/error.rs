//! Error taxonomy for the calculators
//!
//! Every calculator validates its input before computing and fails fast with
//! the offending field and the constraint it violated.

use thiserror::Error;

/// Errors returned by the calculator core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// Caller-supplied value violates a precondition
    #[error("invalid input for '{field}': {constraint}")]
    InvalidInput {
        field: &'static str,
        constraint: String,
    },

    /// A payoff simulation did not terminate within the month cap
    #[error("{scenario} payoff did not converge within {max_months} months")]
    NonConvergence {
        scenario: &'static str,
        max_months: u32,
    },
}

impl CalcError {
    pub fn invalid(field: &'static str, constraint: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field,
            constraint: constraint.into(),
        }
    }

    /// Field name for input errors
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CalcError::InvalidInput { field, .. } => Some(field),
            CalcError::NonConvergence { .. } => None,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, CalcError::InvalidInput { .. })
    }
}

pub type CalcResult<T> = Result<T, CalcError>;

/// Require a finite, strictly positive amount
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid(field, "must be a finite number"));
    }
    if value <= 0.0 {
        return Err(CalcError::invalid(field, format!("must be greater than 0, got {}", value)));
    }
    Ok(())
}

/// Require a finite amount >= 0
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(CalcError::invalid(field, format!("must not be negative, got {}", value)));
    }
    Ok(())
}

/// Require an annual percentage rate within [0, ceiling]
pub(crate) fn ensure_rate(field: &'static str, value: f64, ceiling: f64) -> CalcResult<()> {
    ensure_non_negative(field, value)?;
    if value > ceiling {
        return Err(CalcError::invalid(
            field,
            format!("must not exceed {}%, got {}%", ceiling, value),
        ));
    }
    Ok(())
}

/// Require a term of 1..=max_years years
pub(crate) fn ensure_years(field: &'static str, years: u32, max_years: u32) -> CalcResult<()> {
    if years == 0 {
        return Err(CalcError::invalid(field, "must be at least 1 year"));
    }
    if years > max_years {
        return Err(CalcError::invalid(
            field,
            format!("must not exceed {} years, got {}", max_years, years),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_field() {
        let err = CalcError::invalid("principal", "must be greater than 0, got -100");
        assert_eq!(
            err.to_string(),
            "invalid input for 'principal': must be greater than 0, got -100"
        );
        assert_eq!(err.field(), Some("principal"));
        assert!(err.is_invalid_input());

        let err = CalcError::NonConvergence { scenario: "baseline", max_months: 1200 };
        assert_eq!(err.to_string(), "baseline payoff did not converge within 1200 months");
        assert_eq!(err.field(), None);
    }

    #[test]
    fn test_validators() {
        assert!(ensure_positive("x", 1.0).is_ok());
        assert!(ensure_positive("x", 0.0).is_err());
        assert!(ensure_positive("x", f64::NAN).is_err());
        assert!(ensure_non_negative("x", 0.0).is_ok());
        assert!(ensure_non_negative("x", -0.01).is_err());
        assert!(ensure_non_negative("x", f64::INFINITY).is_err());
        assert!(ensure_rate("rate", 100.0, 100.0).is_ok());
        assert!(ensure_rate("rate", 100.5, 100.0).is_err());
        assert!(ensure_years("years", 0, 50).is_err());
        assert!(ensure_years("years", 51, 50).is_err());
        assert!(ensure_years("years", 30, 50).is_ok());
    }
}
