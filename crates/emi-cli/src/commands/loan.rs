use clap::Args;
use serde_json::Value;

use emi_core::amortization;
use emi_core::types::{ComputationOutput, EmiResult, LoanRequest};
use emi_core::CalcError;

use crate::input;

/// Loan parameters shared by the calculate and schedule commands.
///
/// Flags are accepted as raw text and handed to the core's validator, so a
/// request with several bad fields reports every one of them, the way the
/// form surface did.
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct LoanArgs {
    /// Principal borrowed (e.g. 250000)
    #[arg(long)]
    pub loan_amount: Option<String>,

    /// Annual interest rate in percent (e.g. 8.5)
    #[arg(long, alias = "rate")]
    pub interest_rate: Option<String>,

    /// Loan tenure, in the unit given by --tenure-unit
    #[arg(long)]
    pub tenure: Option<String>,

    /// Tenure unit: months or years
    #[arg(long, default_value = "months")]
    pub tenure_unit: String,

    /// Extra principal paid on each cadence month (optional)
    #[arg(long)]
    pub prepayment: Option<String>,

    /// Apply the prepayment every N months (default: every month)
    #[arg(long)]
    pub prepayment_interval: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

impl LoanArgs {
    fn into_request(self) -> LoanRequest {
        LoanRequest {
            loan_amount: self.loan_amount.unwrap_or_default(),
            interest_rate: self.interest_rate.unwrap_or_default(),
            tenure: self.tenure.unwrap_or_default(),
            tenure_unit: self.tenure_unit,
            prepayment: self.prepayment.unwrap_or_default(),
            prepayment_interval: self.prepayment_interval.unwrap_or_default(),
        }
    }
}

pub fn run_calculate(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let output = compute(args)?;
    Ok(serde_json::to_value(output)?)
}

pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let output = compute(args)?;
    Ok(serde_json::to_value(output.result.schedule)?)
}

fn compute(args: LoanArgs) -> Result<ComputationOutput<EmiResult>, Box<dyn std::error::Error>> {
    let request: LoanRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        args.into_request()
    };

    amortization::calculate(&request).map_err(describe)
}

/// Flatten a validation failure into one line per field for the terminal;
/// pass every other error through.
fn describe(err: CalcError) -> Box<dyn std::error::Error> {
    match err {
        CalcError::Validation(errors) => {
            let lines: Vec<String> = errors
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect();
            format!("invalid input\n  - {}", lines.join("\n  - ")).into()
        }
        other => other.to_string().into(),
    }
}
