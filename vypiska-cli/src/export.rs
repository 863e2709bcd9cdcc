//! Serialization of the transaction table to xlsx or csv.

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};
use std::path::Path;

use vypiska_core::time::{OPERATION_DATETIME_FORMAT, PROCESSING_DATE_FORMAT};
use vypiska_core::{Transaction, TransactionTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFileType {
    Xlsx,
    Csv,
}

impl OutputFileType {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFileType::Xlsx => "xlsx",
            OutputFileType::Csv => "csv",
        }
    }
}

pub fn write_table(
    table: &TransactionTable,
    path: &Path,
    file_type: OutputFileType,
    sheet_name: &str,
) -> Result<()> {
    let written = match file_type {
        OutputFileType::Xlsx => write_xlsx(table, path, sheet_name),
        OutputFileType::Csv => write_csv(table, path),
    };
    written.with_context(|| format!("write {}", path.display()))
}

fn write_xlsx(table: &TransactionTable, path: &Path, sheet_name: &str) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;

    let header = Format::new().set_bold();
    let datetime = Format::new().set_num_format("dd.mm.yyyy hh:mm");
    let date = Format::new().set_num_format("dd.mm.yyyy");

    for (col, name) in TransactionTable::COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    for (i, t) in table.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_datetime_with_format(row, 0, &t.operation_datetime, &datetime)?;
        sheet.write_datetime_with_format(row, 1, &t.processing_date, &date)?;
        sheet.write_string(row, 2, t.authorisation_code.as_str())?;
        sheet.write_string(row, 3, t.description.as_str())?;
        sheet.write_string(row, 4, t.category.as_str())?;
        sheet.write_number(row, 5, t.value_account_currency)?;
        if let Some(op) = &t.operational {
            sheet.write_number(row, 6, op.value)?;
            sheet.write_string(row, 7, op.currency.as_str())?;
        }
        sheet.write_number(row, 8, t.remainder_account_currency)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_csv(table: &TransactionTable, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(TransactionTable::COLUMNS)?;
    for t in table {
        wtr.write_record(csv_row(t))?;
    }
    wtr.flush()?;
    Ok(())
}

fn csv_row(t: &Transaction) -> [String; 9] {
    [
        t.operation_datetime.format(OPERATION_DATETIME_FORMAT).to_string(),
        t.processing_date.format(PROCESSING_DATE_FORMAT).to_string(),
        t.authorisation_code.clone(),
        t.description.clone(),
        t.category.clone(),
        format!("{:.2}", t.value_account_currency),
        t.value_operational_currency()
            .map(|v| format!("{v:.2}"))
            .unwrap_or_default(),
        t.operational_currency().unwrap_or_default().to_string(),
        format!("{:.2}", t.remainder_account_currency),
    ]
}
