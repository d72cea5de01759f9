use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::Result;
use pretty_assertions::assert_eq;

const EXPECTED_CSV: &str = "Date,Name,Amount\n\
                            06/10/2023,Transaction 1,-9999.00\n\
                            03/10/2023,Transaction 2,-2.00\n\
                            03/10/2023,Transaction 3,10001.00\n";

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn convert(args: &[&Path]) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_seb-to-goodbudget")).args(args).output()?)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_cli_default_output_path() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("export.xlsx");
    fs::copy(fixture("transactions.xlsx"), &input)?;

    let output = convert(&[input.as_path()])?;

    let expected_output = dir.path().join("export.csv");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), format!("File saved to {}.\n", expected_output.display()));
    assert_eq!(fs::read_to_string(&expected_output)?, EXPECTED_CSV);

    Ok(())
}

#[test]
fn test_cli_explicit_output_path() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let csv_file = dir.path().join("budget.csv");

    let output = convert(&[fixture("transactions.xlsx").as_path(), Path::new("-o"), csv_file.as_path()])?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(fs::read_to_string(&csv_file)?, EXPECTED_CSV);

    Ok(())
}

#[test]
fn test_cli_input_not_found() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("missing.xlsx");

    let output = convert(&[input.as_path()])?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), format!("Input file not found: {}\n", input.display()));
    assert!(!dir.path().join("missing.csv").exists());

    Ok(())
}

#[test]
fn test_cli_malformed_input() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let csv_file = dir.path().join("out.csv");

    let output = convert(&[fixture("wrong_sheet.xlsx").as_path(), Path::new("--csv_file"), csv_file.as_path()])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).starts_with("Error reading Excel file: "), "{}", stdout(&output));
    assert!(!csv_file.exists());

    Ok(())
}

#[test]
fn test_cli_output_already_exists() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let csv_file = dir.path().join("existing.csv");
    fs::write(&csv_file, "keep me\n")?;

    let output = convert(&[fixture("transactions.xlsx").as_path(), Path::new("-o"), csv_file.as_path()])?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), format!("The output file {} already exists.\n", csv_file.display()));
    assert_eq!(fs::read_to_string(&csv_file)?, "keep me\n");

    Ok(())
}
