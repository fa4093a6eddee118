//! Level-pay EMI computation and amortization schedule construction.
//!
//! The installment comes from the standard closed-form amortizing-loan
//! formula; the schedule is built month by month with an optional fixed
//! prepayment applied on a cadence, terminating early once the balance
//! reaches zero. All math in `rust_decimal::Decimal`.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::time::Instant;

use crate::types::{
    with_metadata, ComputationOutput, EmiResult, LoanInput, LoanRequest, Money, Rate,
    ScheduleEntry,
};
use crate::validation;
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Annual rate above which a warning is attached (percent).
const RATE_WARNING_PERCENT: Decimal = dec!(100);

/// Tenure beyond which a warning is attached (50 years).
const TENURE_WARNING_MONTHS: u32 = 600;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Validate a raw request and compute the full EMI result.
///
/// This is the one entry point a form or CLI surface needs: collected
/// per-field validation errors out of bad text, the complete schedule out of
/// good text.
pub fn calculate(request: &LoanRequest) -> CalcResult<ComputationOutput<EmiResult>> {
    let input = validation::validate(request)?;
    compute_result(&input)
}

/// Compute installment, schedule, and totals for validated input.
///
/// Pure and deterministic given the input; assumes `validate` has already
/// run and does not re-check.
pub fn compute_result(input: &LoanInput) -> CalcResult<ComputationOutput<EmiResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let tenure_months = input.tenure_months();
    let installment = monthly_installment(input.loan_amount, input.annual_rate_percent, tenure_months);

    if input.annual_rate_percent > RATE_WARNING_PERCENT {
        warnings.push(format!(
            "Annual rate of {}% is unusually high; results may be unreliable",
            input.annual_rate_percent
        ));
    }
    if tenure_months > TENURE_WARNING_MONTHS {
        warnings.push(format!("Tenure of {} months is unusually long", tenure_months));
    }
    if input.monthly_prepayment > Decimal::ZERO && input.monthly_prepayment >= installment {
        warnings.push(format!(
            "Monthly prepayment {} meets or exceeds the installment {}; payoff is dominated by prepayment",
            input.monthly_prepayment,
            round_display(installment)
        ));
    }

    let schedule = build_schedule(
        input.loan_amount,
        input.annual_rate_percent,
        tenure_months,
        installment,
        input.monthly_prepayment,
        input.prepayment_interval_months,
    );

    // Total interest is recomputed from the emitted schedule rows. The
    // closed-form `installment * n - principal` estimate overstates interest
    // whenever prepayment shortens the loan.
    let total_interest: Money = schedule.iter().map(|e| e.interest_portion).sum();
    let total_amount_payable = input.loan_amount + total_interest;

    let result = EmiResult {
        monthly_installment: round_display(installment),
        total_interest,
        total_amount_payable,
        monthly_prepayment: input.monthly_prepayment,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-Pay EMI Amortization Schedule",
        input,
        warnings,
        elapsed,
        result,
    ))
}

/// Fixed monthly installment for a level-pay amortizing loan.
///
/// `installment = P * r / (1 - (1 + r)^-n)` with `r` the monthly decimal
/// rate. A zero rate has no closed form (0/0); it degenerates to
/// straight-line principal, `P / n`. The validated path guarantees `r > 0`
/// and `n > 0`; the guards keep the function total for direct callers.
pub fn monthly_installment(loan_amount: Money, annual_rate_percent: Rate, tenure_months: u32) -> Money {
    if tenure_months == 0 {
        return loan_amount;
    }

    let r = monthly_rate(annual_rate_percent);
    if r <= Decimal::ZERO {
        return loan_amount / Decimal::from(tenure_months);
    }

    let denom = Decimal::ONE - iterative_pow_recip(Decimal::ONE + r, tenure_months);
    if denom <= Decimal::ZERO {
        return loan_amount;
    }

    loan_amount * r / denom
}

/// Build the month-by-month schedule.
///
/// The running balance accumulates at full `Decimal` precision; the four
/// values on each emitted row are rounded to 2 fractional digits. Rounding
/// is a presentation layer on top of the accumulator and is never fed back
/// into it.
pub fn build_schedule(
    loan_amount: Money,
    annual_rate_percent: Rate,
    tenure_months: u32,
    installment: Money,
    monthly_prepayment: Money,
    prepayment_interval_months: u32,
) -> Vec<ScheduleEntry> {
    let r = monthly_rate(annual_rate_percent);
    let interval = prepayment_interval_months.max(1);

    let mut schedule = Vec::with_capacity(tenure_months as usize);
    let mut balance = loan_amount;

    for month in 1..=tenure_months {
        let interest = balance * r;
        let principal = installment - interest;
        balance -= principal;

        if month % interval == 0 {
            balance -= monthly_prepayment;
        }
        if balance < Decimal::ZERO {
            balance = Decimal::ZERO;
        }

        schedule.push(ScheduleEntry {
            month,
            installment: round_display(installment),
            interest_portion: round_display(interest),
            principal_portion: round_display(principal),
            remaining_balance: round_display(balance),
        });

        if balance <= Decimal::ZERO {
            break;
        }
    }

    schedule
}

// ---------------------------------------------------------------------------
// Decimal helpers
// ---------------------------------------------------------------------------

/// Annual percent rate to monthly decimal rate: `r = percent / 12 / 100`.
fn monthly_rate(annual_rate_percent: Rate) -> Rate {
    annual_rate_percent / dec!(12) / dec!(100)
}

/// Round for row emission: 2 fractional digits, midpoint away from zero.
fn round_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute base^n for a positive integer exponent via iterative multiplication.
fn iterative_pow(base: Decimal, n: u32) -> Decimal {
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result *= base;
    }
    result
}

/// Compute 1 / base^n via iterative multiplication.
fn iterative_pow_recip(base: Decimal, n: u32) -> Decimal {
    let pow = iterative_pow(base, n);
    if pow.is_zero() {
        Decimal::ZERO
    } else {
        Decimal::ONE / pow
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
