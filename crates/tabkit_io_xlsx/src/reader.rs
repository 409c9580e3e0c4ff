//! Validated tabular input.
//!
//! Reads the first worksheet of an XLSX source, first row as header, and
//! checks a required-columns contract before handing the table to callers.

use std::collections::BTreeSet;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};

use crate::error::EnumExportError;
use crate::spec::{EnumCellValue, SpecTable};

/// Read and validate one table from `path`.
///
/// Fails with `NotFound` when the source is missing or unparsable, and with
/// `Validation` (carrying the sorted missing and available column sets) when
/// a non-empty `required_columns` is not a subset of the source's columns.
pub fn read_table(
    path: impl AsRef<Path>,
    required_columns: &[String],
) -> Result<SpecTable, EnumExportError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(EnumExportError::not_found(
            path.display().to_string(),
            "file does not exist",
        ));
    }

    let mut workbook = open_workbook_auto(path).map_err(|err| {
        EnumExportError::not_found(
            path.display().to_string(),
            format!("cannot open workbook: {err}"),
        )
    })?;

    let c_sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| {
            EnumExportError::not_found(path.display().to_string(), "workbook has no sheets")
        })?;

    let range = workbook.worksheet_range(&c_sheet_name).map_err(|err| {
        EnumExportError::not_found(
            path.display().to_string(),
            format!("cannot read sheet {c_sheet_name:?}: {err}"),
        )
    })?;

    let l_columns = derive_header_row(&range);
    validate_required_columns(&l_columns, required_columns)?;

    let (n_rows, n_cols) = range.get_size();
    let mut l_rows = Vec::new();
    for n_idx_row in 1..n_rows {
        let mut l_row = Vec::with_capacity(n_cols);
        for n_idx_col in 0..n_cols {
            l_row.push(convert_cell_value(range.get((n_idx_row, n_idx_col))));
        }
        l_rows.push(l_row);
    }

    let table = SpecTable::new(l_columns, l_rows)?;
    log::info!(
        "read {}: {} data rows, {} columns",
        path.display(),
        table.height(),
        table.width()
    );
    Ok(table)
}

fn derive_header_row(range: &Range<Data>) -> Vec<String> {
    let (_, n_cols) = range.get_size();
    let mut l_columns = Vec::with_capacity(n_cols);
    for n_idx_col in 0..n_cols {
        let c_header = match range.get((0, n_idx_col)) {
            None | Some(Data::Empty) => String::new(),
            Some(Data::String(val)) => val.clone(),
            Some(other) => other.to_string(),
        };
        l_columns.push(c_header);
    }
    l_columns
}

fn validate_required_columns(
    columns: &[String],
    required_columns: &[String],
) -> Result<(), EnumExportError> {
    if required_columns.is_empty() {
        return Ok(());
    }

    let set_available: BTreeSet<&String> = columns.iter().collect();
    let l_missing: Vec<String> = required_columns
        .iter()
        .filter(|c_name| !set_available.contains(*c_name))
        .cloned()
        .collect();

    if l_missing.is_empty() {
        return Ok(());
    }
    Err(EnumExportError::missing_columns(
        l_missing,
        columns.to_vec(),
    ))
}

fn convert_cell_value(cell: Option<&Data>) -> EnumCellValue {
    match cell {
        None => EnumCellValue::None,
        Some(data) => match data {
            Data::Empty => EnumCellValue::None,
            Data::String(val) => EnumCellValue::String(val.clone()),
            Data::Float(val) => EnumCellValue::Number(*val),
            Data::Int(val) => EnumCellValue::Number(*val as f64),
            Data::Bool(val) => EnumCellValue::Bool(*val),
            // Serial date numbers keep the catalog's date formats applicable.
            Data::DateTime(val) => EnumCellValue::Number(val.as_f64()),
            Data::DateTimeIso(val) => EnumCellValue::String(val.clone()),
            Data::DurationIso(val) => EnumCellValue::String(val.clone()),
            Data::Error(err) => EnumCellValue::String(format!("#{err:?}")),
        },
    }
}
