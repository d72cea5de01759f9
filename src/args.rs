use std::path::PathBuf;

use clap::Parser;

/// Converts an SEB formatted Excel file to a CSV file for Goodbudget.
#[derive(Debug, Parser)]
#[command(name = "seb-to-goodbudget", version)]
pub struct Args {
    /// Excel file of transactions from SEB.
    pub excel_file: PathBuf,

    /// Where to write the CSV. Defaults to the Excel file name with a .csv extension.
    #[arg(short = 'o', long = "csv_file", visible_alias = "csv-file")]
    pub csv_file: Option<PathBuf>,
}

impl Args {
    pub fn output_path(&self) -> PathBuf {
        match &self.csv_file {
            Some(path) => path.clone(),
            None => self.excel_file.with_extension("csv"),
        }
    }
}
