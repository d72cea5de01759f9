use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;
use tempfile::{Builder, NamedTempFile};
use thiserror::Error;

use crate::statement::{Transaction, TransactionTable};

const DATE_FORMAT: &str = "%d/%m/%Y";
const AMOUNT_DECIMALS: u32 = 2;

#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("output file {} already exists", .0.display())]
    AlreadyExists(PathBuf),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
}

/// One row of the CSV accepted by Goodbudget's transaction import.
#[derive(Debug, PartialEq, Serialize)]
pub struct GoodbudgetRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Amount")]
    pub amount: String,
}

impl From<&Transaction> for GoodbudgetRecord {
    fn from(transaction: &Transaction) -> Self {
        GoodbudgetRecord {
            date: transaction.date().format(DATE_FORMAT).to_string(),
            name: transaction.name().clone(),
            amount: format_amount(*transaction.amount()),
        }
    }
}

fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(AMOUNT_DECIMALS))
}

pub fn write_transactions<W: Write>(table: &TransactionTable, writer: W) -> Result<(), SerializeError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    // An empty table still gets its header line.
    if table.is_empty() {
        csv_writer.write_record(["Date", "Name", "Amount"])?;
    }

    for transaction in table {
        let record: GoodbudgetRecord = transaction.into();
        csv_writer.serialize(record)?;
    }

    csv_writer.flush()?;

    Ok(())
}

/// Temporary files default to 0600; ask for 0666 so the umask decides, as
/// it would for a plain create.
#[cfg(unix)]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    Builder::new()
        .permissions(std::fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    Builder::new().tempfile_in(dir)
}

/// Writes `table` to a new file at `path`. Never overwrites: the CSV is
/// written to a temporary file next to `path` and only linked into place if
/// nothing exists there yet.
pub fn write_csv<P: AsRef<Path>>(table: &TransactionTable, path: P) -> Result<(), SerializeError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = temp_file_in(dir)?;
    write_transactions(table, file.as_file_mut())?;
    file.as_file().sync_all()?;

    file.persist_noclobber(path).map_err(|err| match err.error.kind() {
        io::ErrorKind::AlreadyExists => SerializeError::AlreadyExists(path.to_path_buf()),
        _ => SerializeError::Io(err.error),
    })?;
    debug!("wrote {} transactions to {}", table.len(), path.display());

    Ok(())
}
