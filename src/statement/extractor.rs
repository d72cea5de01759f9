use std::fs;
use std::io::{self, Cursor};
use std::path::Path;
use std::str::FromStr;

use calamine::{Data, DataType, Range, Reader, Xlsx};
use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use rust_decimal::Decimal;

use super::layout::SheetLayout;
use super::transaction::{Transaction, TransactionTable};
use super::ExtractError;

/// Reads an SEB account export and returns its transactions in sheet order.
pub fn read_excel<P: AsRef<Path>>(path: P) -> Result<TransactionTable, ExtractError> {
    read_excel_with_layout(path, &SheetLayout::default())
}

pub fn read_excel_with_layout<P: AsRef<Path>>(
    path: P,
    layout: &SheetLayout,
) -> Result<TransactionTable, ExtractError> {
    let path = path.as_ref();

    // The whole file is read up front so the handle is closed before parsing starts.
    let bytes = fs::read(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ExtractError::NotFound(path.to_path_buf()),
        _ => ExtractError::Io(err),
    })?;

    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    if !workbook.sheet_names().iter().any(|name| name == &layout.sheet_name) {
        return Err(ExtractError::MissingSheet(layout.sheet_name.clone()));
    }

    let range = workbook.worksheet_range(&layout.sheet_name)?;
    let table = extract_table(&range, layout)?;
    debug!("extracted {} transactions from {}", table.len(), path.display());

    Ok(table)
}

struct Columns {
    date: u32,
    name: u32,
    amount: u32,
}

impl Columns {
    fn locate(range: &Range<Data>, layout: &SheetLayout) -> Result<Columns, ExtractError> {
        Ok(Columns {
            date: find_column(range, layout.header_row(), &layout.date_column)?,
            name: find_column(range, layout.header_row(), &layout.name_column)?,
            amount: find_column(range, layout.header_row(), &layout.amount_column)?,
        })
    }
}

fn find_column(range: &Range<Data>, header_row: u32, header: &str) -> Result<u32, ExtractError> {
    let missing = || ExtractError::MissingColumn(header.to_string());
    let (start, end) = range.start().zip(range.end()).ok_or_else(missing)?;

    (start.1..=end.1)
        .find(|&col| matches!(range.get_value((header_row, col)), Some(Data::String(name)) if name == header))
        .ok_or_else(missing)
}

fn extract_table(range: &Range<Data>, layout: &SheetLayout) -> Result<TransactionTable, ExtractError> {
    let columns = Columns::locate(range, layout)?;
    let last_row = match range.end() {
        Some((row, _)) => row,
        None => return Ok(TransactionTable::new()),
    };

    let mut table = TransactionTable::new();
    for row in (layout.header_row() + 1)..=last_row {
        let date = range.get_value((row, columns.date));
        let name = range.get_value((row, columns.name));
        let amount = range.get_value((row, columns.amount));

        if [date, name, amount].into_iter().all(is_blank) {
            debug!("skipping blank row {}", row + 1);
            continue;
        }

        let invalid = |column: &str, reason: String| ExtractError::InvalidCell {
            row: row + 1,
            column: column.to_string(),
            reason,
        };

        table.push(Transaction::new(
            parse_date(date).map_err(|reason| invalid(&layout.date_column, reason))?,
            parse_name(name).map_err(|reason| invalid(&layout.name_column, reason))?,
            parse_amount(amount).map_err(|reason| invalid(&layout.amount_column, reason))?,
        ));
    }

    Ok(table)
}

fn is_blank(cell: Option<&Data>) -> bool {
    matches!(cell, None | Some(Data::Empty))
}

pub(super) fn parse_date(cell: Option<&Data>) -> Result<NaiveDate, String> {
    match cell {
        None | Some(Data::Empty) => Err("empty cell".to_string()),
        Some(Data::String(text)) => parse_date_text(text),
        Some(cell @ (Data::DateTime(_) | Data::DateTimeIso(_))) => {
            cell.as_date().ok_or_else(|| format!("invalid date '{cell}'"))
        },
        Some(other) => Err(format!("expected a date, found '{other}'")),
    }
}

fn parse_date_text(text: &str) -> Result<NaiveDate, String> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").map(|datetime| datetime.date()))
        .map_err(|err| format!("invalid date '{text}': {err}"))
}

pub(super) fn parse_name(cell: Option<&Data>) -> Result<String, String> {
    match cell {
        None | Some(Data::Empty) => Err("empty cell".to_string()),
        Some(Data::String(text)) => Ok(text.clone()),
        Some(Data::Error(err)) => Err(format!("cell error {err}")),
        Some(other) => Ok(other.to_string()),
    }
}

/// Floats go through their shortest round-trip rendering, never through
/// `Decimal::from_f64_retain`, so `0.1` stays `0.1`.
pub(super) fn parse_amount(cell: Option<&Data>) -> Result<Decimal, String> {
    match cell {
        None | Some(Data::Empty) => Err("empty cell".to_string()),
        Some(Data::Int(value)) => Ok(Decimal::from(*value)),
        Some(Data::Float(value)) if value.is_finite() => {
            Decimal::from_str(&value.to_string()).map_err(|err| format!("invalid amount '{value}': {err}"))
        },
        Some(Data::String(text)) => {
            let text = text.trim();
            Decimal::from_str_exact(text).map_err(|err| format!("invalid amount '{text}': {err}"))
        },
        Some(other) => Err(format!("expected a number, found '{other}'")),
    }
}
