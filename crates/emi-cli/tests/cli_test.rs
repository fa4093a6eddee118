use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_calculate_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("emi")?;
    cmd.args([
        "calculate",
        "--loan-amount",
        "100000",
        "--interest-rate",
        "10",
        "--tenure",
        "12",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("8791.59"))
        .stdout(predicate::str::contains("Level-Pay EMI Amortization Schedule"));

    Ok(())
}

#[test]
fn test_calculate_minimal_prints_installment() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("emi")?;
    cmd.args([
        "calculate",
        "--loan-amount",
        "100000",
        "--interest-rate",
        "10",
        "--tenure",
        "1",
        "--tenure-unit",
        "years",
        "--output",
        "minimal",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("8791.59"));

    Ok(())
}

#[test]
fn test_schedule_csv_has_one_row_per_month() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("emi")?;
    cmd.args([
        "schedule",
        "--loan-amount",
        "100000",
        "--interest-rate",
        "10",
        "--tenure",
        "12",
        "--output",
        "csv",
    ]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let text = String::from_utf8(output)?;
    // Header plus 12 months
    assert_eq!(text.lines().count(), 13, "unexpected CSV:\n{text}");
    assert!(text.lines().next().unwrap().contains("month"));

    Ok(())
}

#[test]
fn test_invalid_input_reports_every_field() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("emi")?;
    cmd.args(["calculate", "--loan-amount=-1000"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("loan_amount"))
        .stderr(predicate::str::contains("interest_rate"))
        .stderr(predicate::str::contains("tenure"));

    Ok(())
}

#[test]
fn test_stdin_json_request() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("emi")?;
    cmd.arg("calculate").write_stdin(
        r#"{"loan_amount": "500000", "interest_rate": "8.5", "tenure": "240", "prepayment": "5000"}"#,
    );

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("monthly_prepayment"));

    Ok(())
}

#[test]
fn test_version_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("emi")?;
    cmd.arg("version");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("emi "));

    Ok(())
}
