//! Form-level validation: raw text fields in, validated `LoanInput` out.
//!
//! Failures are collected, one per field, so a caller can re-display the
//! whole form with every message at once. The computation functions assume
//! validated input and never re-check.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ValidationErrors;
use crate::types::{LoanInput, LoanRequest, TenureUnit};

/// Validate a raw request. Returns every field failure, not just the first.
pub fn validate(request: &LoanRequest) -> Result<LoanInput, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let loan_amount = positive_decimal(&request.loan_amount).unwrap_or_else(|| {
        errors.push(
            "loan_amount",
            "Loan amount is required and must be a positive number.",
        );
        Decimal::ZERO
    });

    let annual_rate_percent = positive_decimal(&request.interest_rate).unwrap_or_else(|| {
        errors.push(
            "interest_rate",
            "Interest rate is required and must be a positive number.",
        );
        Decimal::ZERO
    });

    let tenure = positive_integer(&request.tenure).unwrap_or_else(|| {
        errors.push(
            "tenure",
            "Loan tenure is required and must be a positive whole number.",
        );
        0
    });

    let tenure_unit = match parse_tenure_unit(&request.tenure_unit) {
        Ok(unit) => unit,
        Err(()) => {
            errors.push("tenure_unit", "Tenure unit must be 'months' or 'years'.");
            TenureUnit::Months
        }
    };

    // The prepayment field is optional: empty means none. A non-empty value
    // must still be a parseable, non-negative amount — Decimal has no NaN to
    // silently carry garbage through the schedule.
    let monthly_prepayment = match non_negative_decimal_or_empty(&request.prepayment) {
        Some(p) => p,
        None => {
            errors.push("prepayment", "Prepayment must be a non-negative number.");
            Decimal::ZERO
        }
    };

    let prepayment_interval_months = match positive_integer_or_empty(&request.prepayment_interval)
    {
        Some(n) => n,
        None => {
            errors.push(
                "prepayment_interval",
                "Prepayment interval must be a positive whole number of months.",
            );
            1
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(LoanInput {
        loan_amount,
        annual_rate_percent,
        tenure,
        tenure_unit,
        monthly_prepayment,
        prepayment_interval_months,
    })
}

/// Parse a required field that must be a strictly positive decimal.
fn positive_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match Decimal::from_str(trimmed) {
        Ok(value) if value > Decimal::ZERO => Some(value),
        _ => None,
    }
}

/// Parse a required field that must be a strictly positive integer.
fn positive_integer(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<u32>() {
        Ok(value) if value > 0 => Some(value),
        _ => None,
    }
}

/// Empty means zero; otherwise the value must parse and be >= 0.
fn non_negative_decimal_or_empty(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(Decimal::ZERO);
    }
    match Decimal::from_str(trimmed) {
        Ok(value) if value >= Decimal::ZERO => Some(value),
        _ => None,
    }
}

/// Empty means every month; otherwise a positive whole number of months.
fn positive_integer_or_empty(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(1);
    }
    match trimmed.parse::<u32>() {
        Ok(value) if value > 0 => Some(value),
        _ => None,
    }
}

fn parse_tenure_unit(raw: &str) -> Result<TenureUnit, ()> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(TenureUnit::Months);
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "months" => Ok(TenureUnit::Months),
        "years" => Ok(TenureUnit::Years),
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn valid_request() -> LoanRequest {
        LoanRequest {
            loan_amount: "100000".into(),
            interest_rate: "10".into(),
            tenure: "12".into(),
            tenure_unit: "months".into(),
            prepayment: String::new(),
            prepayment_interval: String::new(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let input = validate(&valid_request()).unwrap();
        assert_eq!(input.loan_amount, dec!(100000));
        assert_eq!(input.annual_rate_percent, dec!(10));
        assert_eq!(input.tenure, 12);
        assert_eq!(input.tenure_unit, TenureUnit::Months);
        assert_eq!(input.monthly_prepayment, Decimal::ZERO);
        assert_eq!(input.prepayment_interval_months, 1);
    }

    #[test]
    fn test_empty_loan_amount_rejected() {
        let mut request = valid_request();
        request.loan_amount = String::new();
        let errors = validate(&request).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.for_field("loan_amount").is_some());
    }

    #[test]
    fn test_negative_loan_amount_rejected() {
        let mut request = valid_request();
        request.loan_amount = "-1000".into();
        let errors = validate(&request).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.for_field("loan_amount").is_some());
    }

    #[test]
    fn test_all_failures_collected() {
        let request = LoanRequest {
            loan_amount: "0".into(),
            interest_rate: String::new(),
            tenure: "abc".into(),
            tenure_unit: "months".into(),
            prepayment: String::new(),
            prepayment_interval: String::new(),
        };
        let errors = validate(&request).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.for_field("loan_amount").is_some());
        assert!(errors.for_field("interest_rate").is_some());
        assert!(errors.for_field("tenure").is_some());
    }

    #[test]
    fn test_fractional_tenure_rejected() {
        let mut request = valid_request();
        request.tenure = "12.5".into();
        let errors = validate(&request).unwrap_err();
        assert!(errors.for_field("tenure").is_some());
    }

    #[test]
    fn test_unknown_tenure_unit_rejected() {
        let mut request = valid_request();
        request.tenure_unit = "fortnights".into();
        let errors = validate(&request).unwrap_err();
        assert!(errors.for_field("tenure_unit").is_some());
    }

    #[test]
    fn test_tenure_unit_case_insensitive_with_default() {
        let mut request = valid_request();
        request.tenure_unit = "Years".into();
        assert_eq!(
            validate(&request).unwrap().tenure_unit,
            TenureUnit::Years
        );

        request.tenure_unit = String::new();
        assert_eq!(
            validate(&request).unwrap().tenure_unit,
            TenureUnit::Months
        );
    }

    #[test]
    fn test_prepayment_garbage_rejected() {
        let mut request = valid_request();
        request.prepayment = "lots".into();
        let errors = validate(&request).unwrap_err();
        assert!(errors.for_field("prepayment").is_some());
    }

    #[test]
    fn test_prepayment_negative_rejected() {
        let mut request = valid_request();
        request.prepayment = "-500".into();
        let errors = validate(&request).unwrap_err();
        assert!(errors.for_field("prepayment").is_some());
    }

    #[test]
    fn test_prepayment_zero_accepted() {
        let mut request = valid_request();
        request.prepayment = "0".into();
        let input = validate(&request).unwrap();
        assert_eq!(input.monthly_prepayment, Decimal::ZERO);
    }

    #[test]
    fn test_values_trimmed() {
        let mut request = valid_request();
        request.loan_amount = "  250000  ".into();
        request.tenure = " 24 ".into();
        let input = validate(&request).unwrap();
        assert_eq!(input.loan_amount, dec!(250000));
        assert_eq!(input.tenure, 24);
    }
}
