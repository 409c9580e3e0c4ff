//! Stateless helper utilities shared by the reader, formatter and writer.

use std::collections::{BTreeMap, BTreeSet};

use crate::conf::{
    N_LEN_CONTENT_EMPTY_MIN, N_LEN_EXCEL_SHEET_NAME_MAX, N_WIDTH_CONTENT_PADDING,
    TUP_EXCEL_ILLEGAL,
};
use crate::error::EnumExportError;
use crate::spec::EnumCellValue;

////////////////////////////////////////////////////////////////////////////////
// #region ColumnValidation

/// Validate that `columns` has no duplicated names.
pub fn validate_unique_columns(columns: &[String]) -> Result<(), EnumExportError> {
    if columns.len() == columns.iter().collect::<BTreeSet<_>>().len() {
        return Ok(());
    }

    let mut dict_pos: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (n_idx, c_name) in columns.iter().enumerate() {
        dict_pos.entry(c_name).or_default().push(n_idx);
    }

    let c_msg = dict_pos
        .iter()
        .filter_map(|(c_name, l_pos)| {
            if l_pos.len() > 1 {
                Some(format!("{c_name:?} x{} at indices {l_pos:?}", l_pos.len()))
            } else {
                None
            }
        })
        .collect::<Vec<_>>()
        .join("; ");

    Err(EnumExportError::validation(
        "columns",
        format!("duplicate column names detected: {c_msg}"),
    ))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to a valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellAddressing

/// Parse an A1-style anchor cell into zero-based `(row, col)` coordinates.
///
/// `"B2"` parses to `(1, 1)`: freezing there keeps one row and one column
/// visible on scroll.
pub fn parse_cell_anchor(anchor: &str) -> Result<(u32, u16), EnumExportError> {
    let c_anchor = anchor.trim().to_ascii_uppercase();

    let n_split = c_anchor
        .char_indices()
        .find(|(_, chr)| chr.is_ascii_digit())
        .map(|(n_idx, _)| n_idx)
        .ok_or_else(|| {
            EnumExportError::config(format!("anchor cell {anchor:?} has no row digits"))
        })?;

    let (c_col_letters, c_row_digits) = c_anchor.split_at(n_split);
    if c_col_letters.is_empty() || !c_col_letters.chars().all(|chr| chr.is_ascii_uppercase()) {
        return Err(EnumExportError::config(format!(
            "anchor cell {anchor:?} has an invalid column reference"
        )));
    }

    let mut n_col: u32 = 0;
    for chr in c_col_letters.chars() {
        n_col = n_col * 26 + (chr as u32 - 'A' as u32 + 1);
    }

    let n_row: u32 = c_row_digits
        .parse()
        .map_err(|_| EnumExportError::config(format!("anchor cell {anchor:?} has an invalid row")))?;
    if n_row == 0 {
        return Err(EnumExportError::config(format!(
            "anchor cell {anchor:?} addresses row 0"
        )));
    }

    let n_col_zero_based = u16::try_from(n_col - 1).map_err(|_| {
        EnumExportError::config(format!("anchor cell {anchor:?} column out of range"))
    })?;

    Ok((n_row - 1, n_col_zero_based))
}

/// Cast a zero-based row index into the worksheet row type.
pub fn cast_row_num(value: usize) -> Result<u32, EnumExportError> {
    u32::try_from(value)
        .map_err(|_| EnumExportError::validation("row", format!("row index overflow: {value}")))
}

/// Cast a zero-based column index into the worksheet column type.
pub fn cast_col_num(value: usize) -> Result<u16, EnumExportError> {
    u16::try_from(value)
        .map_err(|_| EnumExportError::validation("col", format!("column index overflow: {value}")))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WidthSizing

/// Render one cell value the way it counts toward column width.
pub fn stringify_cell_value(value: &EnumCellValue) -> String {
    match value {
        EnumCellValue::None => String::new(),
        EnumCellValue::String(val) => val.clone(),
        EnumCellValue::Number(val) => val.to_string(),
        EnumCellValue::Bool(val) => if *val { "True" } else { "False" }.to_string(),
    }
}

/// Final width for a column whose longest content is `n_len_content_max`.
///
/// An entirely empty column counts as [`N_LEN_CONTENT_EMPTY_MIN`] characters.
pub fn calculate_adjusted_width(n_len_content_max: usize, n_width_max: usize) -> usize {
    let n_len = if n_len_content_max == 0 {
        N_LEN_CONTENT_EMPTY_MIN
    } else {
        n_len_content_max
    };
    usize::min(n_len + N_WIDTH_CONTENT_PADDING, n_width_max)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
