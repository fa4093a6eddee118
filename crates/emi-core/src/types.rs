use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as percent per annum (10 = 10%), as collected from the
/// form surface. Converted to monthly decimals inside the engine.
pub type Rate = Decimal;

/// Loan tenure unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenureUnit {
    #[default]
    Months,
    Years,
}

/// Raw loan request exactly as a form or CLI surface collects it: text
/// fields, nothing parsed. `validate` turns this into a `LoanInput`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanRequest {
    #[serde(default)]
    pub loan_amount: String,
    #[serde(default)]
    pub interest_rate: String,
    #[serde(default)]
    pub tenure: String,
    #[serde(default)]
    pub tenure_unit: String,
    #[serde(default)]
    pub prepayment: String,
    /// Apply the prepayment every N months. Empty means every month.
    #[serde(default)]
    pub prepayment_interval: String,
}

/// Validated loan parameters. Immutable once constructed; the engine never
/// re-validates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    /// Principal borrowed. Always > 0.
    pub loan_amount: Money,
    /// Annual interest rate in percent (e.g. 10 = 10% p.a.). Always > 0.
    pub annual_rate_percent: Rate,
    /// Tenure in the unit given, before conversion. Always > 0.
    pub tenure: u32,
    pub tenure_unit: TenureUnit,
    /// Extra principal paid on cadence months. Never negative.
    pub monthly_prepayment: Money,
    /// Cadence for the prepayment: applied when month % interval == 0.
    pub prepayment_interval_months: u32,
}

impl LoanInput {
    /// Tenure expressed in months regardless of the input unit.
    pub fn tenure_months(&self) -> u32 {
        match self.tenure_unit {
            TenureUnit::Months => self.tenure,
            TenureUnit::Years => self.tenure * 12,
        }
    }
}

/// One month of the amortization schedule. All four decimal values are
/// rounded to 2 fractional digits at emission; the engine's running balance
/// is not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Month number, sequential from 1.
    pub month: u32,
    pub installment: Money,
    pub interest_portion: Money,
    pub principal_portion: Money,
    /// Outstanding principal after this month's payment. Clamped >= 0.
    pub remaining_balance: Money,
}

/// Complete EMI computation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiResult {
    /// Fixed monthly installment, rounded to 2 fractional digits.
    pub monthly_installment: Money,
    /// Sum of the schedule's interest portions. This is the authoritative
    /// total, not the closed-form `installment * n - principal` estimate,
    /// which overstates interest once prepayment shortens the loan.
    pub total_interest: Money,
    /// loan_amount + total_interest.
    pub total_amount_payable: Money,
    /// Echo of the requested monthly prepayment.
    pub monthly_prepayment: Money,
    pub schedule: Vec<ScheduleEntry>,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
