mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::LoanArgs;

/// Loan EMI and amortization schedule calculations
#[derive(Parser)]
#[command(
    name = "emi",
    version,
    about = "Loan EMI and amortization schedule calculations",
    long_about = "A CLI for equated-monthly-installment calculations with decimal \
                  precision. Computes the fixed installment for an amortizing loan \
                  and the month-by-month schedule, with optional recurring \
                  prepayment and early-payoff handling."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the monthly installment, totals, and full schedule
    Calculate(LoanArgs),
    /// Emit only the amortization schedule rows
    Schedule(LoanArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::loan::run_calculate(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Version => {
            println!("emi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
