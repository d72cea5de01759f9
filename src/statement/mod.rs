use std::path::PathBuf;

use thiserror::Error;

pub mod extractor;
pub mod layout;
pub mod transaction;


pub use extractor::{read_excel, read_excel_with_layout};
pub use layout::SheetLayout;
pub use transaction::{Transaction, TransactionTable};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read input file: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a readable xlsx workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),
    #[error("sheet '{0}' not found")]
    MissingSheet(String),
    #[error("column '{0}' not found in header row")]
    MissingColumn(String),
    #[error("row {row}, column '{column}': {reason}")]
    InvalidCell { row: u32, column: String, reason: String },
}

impl ExtractError {
    /// The file exists but does not hold the expected workbook schema.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            ExtractError::Workbook(_)
                | ExtractError::MissingSheet(_)
                | ExtractError::MissingColumn(_)
                | ExtractError::InvalidCell { .. }
        )
    }
}
