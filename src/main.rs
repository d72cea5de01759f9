use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use log::error;

use seb_to_goodbudget::args::Args;
use seb_to_goodbudget::data::{self, SerializeError};
use seb_to_goodbudget::statement::{self, ExtractError};

fn run(args: &Args) -> Result<PathBuf> {
    let output = args.output_path();
    let table = statement::read_excel(&args.excel_file)?;
    data::write_csv(&table, &output)?;

    Ok(output)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let err = match run(&args) {
        Ok(output) => {
            println!("File saved to {}.", output.display());
            return ExitCode::SUCCESS;
        },
        Err(err) => err,
    };

    match (err.downcast_ref::<ExtractError>(), err.downcast_ref::<SerializeError>()) {
        (Some(ExtractError::NotFound(path)), _) => println!("Input file not found: {}", path.display()),
        (Some(extract_err), _) if extract_err.is_malformed_input() => {
            println!("Error reading Excel file: {}", extract_err)
        },
        (_, Some(SerializeError::AlreadyExists(path))) => {
            println!("The output file {} already exists.", path.display())
        },
        _ => {
            error!("{:?}", err);
            println!("An unexpected error occurred: {:#}", err);
        },
    }

    ExitCode::FAILURE
}
