//! Per-sheet formatting pipeline.
//!
//! Fixed order: header/body styling, per-column type styling, auto-filter,
//! column width auto-sizing, freeze panes. The first two steps are structural
//! and abort the pipeline; the last three are cosmetic and individually
//! guarded so a failure in one never blocks the rest or the final save.

use rust_xlsxwriter::{Worksheet, XlsxError};

use crate::conf::{C_NAME_STYLE_BODY, C_NAME_STYLE_HEADER};
use crate::error::EnumExportError;
use crate::spec::{SpecStyleCatalog, SpecTable};
use crate::style::{resolve_style_name, SpecStyleRegistry};
use crate::util::{
    calculate_adjusted_width, cast_col_num, cast_row_num, parse_cell_anchor, stringify_cell_value,
};

/// Applies registered styles and structural sheet features to one worksheet.
///
/// Holds read-only references to the document's registry and catalog; one
/// formatter serves every sheet of one export run.
pub struct SheetFormatter<'a> {
    registry: &'a SpecStyleRegistry,
    catalog: &'a SpecStyleCatalog,
}

impl<'a> SheetFormatter<'a> {
    /// Bind a formatter to one document's registry and catalog.
    pub fn new(registry: &'a SpecStyleRegistry, catalog: &'a SpecStyleCatalog) -> Self {
        Self { registry, catalog }
    }

    /// Run the full pipeline for a sheet already holding header + data rows.
    pub fn run_pipeline(
        &self,
        worksheet: &mut Worksheet,
        table: &SpecTable,
    ) -> Result<(), EnumExportError> {
        let n_rows_total = table.height() + 1;
        let n_cols_total = table.width();
        log::debug!(
            "formatting pipeline start: {n_rows_total} rows (header included), {n_cols_total} columns"
        );

        self.apply_header_body(worksheet, n_rows_total, n_cols_total)?;
        self.apply_type_styles(worksheet, table.columns(), table.height())?;

        if let Err(err) = self.apply_filter(worksheet, n_rows_total, n_cols_total) {
            log::error!("auto-filter step failed, continuing: {err}");
        }
        if let Err(err) = self.auto_size_columns(worksheet, table) {
            log::error!("column auto-size step failed, continuing: {err}");
        }
        if let Err(err) = self.apply_freeze_panes(worksheet) {
            log::error!("freeze-panes step failed, continuing: {err}");
        }

        log::debug!("formatting pipeline completed");
        Ok(())
    }

    /// Assign the header style to row 1 and the body style to rows
    /// 2..`n_rows_total`, across all columns. Row/column totals are 1-indexed
    /// counts; `n_rows_total` includes the header row.
    pub fn apply_header_body(
        &self,
        worksheet: &mut Worksheet,
        n_rows_total: usize,
        n_cols_total: usize,
    ) -> Result<(), EnumExportError> {
        if n_rows_total < 1 || n_cols_total < 1 {
            return Err(EnumExportError::validation(
                "dimensions",
                format!(
                    "rows ({n_rows_total}) and columns ({n_cols_total}) must both be positive"
                ),
            ));
        }

        let n_idx_col_last = cast_col_num(n_cols_total - 1)?;
        let fmt_header = self.registry.get(C_NAME_STYLE_HEADER)?;
        worksheet
            .set_range_format(0, 0, 0, n_idx_col_last, fmt_header)
            .map_err(derive_sheet_error)?;

        if n_rows_total > 1 {
            let fmt_body = self.registry.get(C_NAME_STYLE_BODY)?;
            worksheet
                .set_range_format(1, 0, cast_row_num(n_rows_total - 1)?, n_idx_col_last, fmt_body)
                .map_err(derive_sheet_error)?;
        }

        log::debug!("header/body styling done: {n_rows_total} rows, {n_cols_total} columns");
        Ok(())
    }

    /// Assign each column's resolved data-type style to its data cells
    /// (rows 2..`n_rows_data`+1). An empty column list is a warned no-op.
    pub fn apply_type_styles(
        &self,
        worksheet: &mut Worksheet,
        column_names: &[String],
        n_rows_data: usize,
    ) -> Result<(), EnumExportError> {
        if column_names.is_empty() {
            log::warn!("empty column list provided; skipping type styling");
            return Ok(());
        }

        for (n_idx_col, c_column) in column_names.iter().enumerate() {
            let c_style_name = resolve_style_name(self.catalog, c_column);
            let fmt_column = self.registry.get(&c_style_name)?;
            log::debug!("column {c_column:?} -> style {c_style_name:?} at index {n_idx_col}");

            if n_rows_data > 0 {
                let n_col = cast_col_num(n_idx_col)?;
                worksheet
                    .set_range_format(1, n_col, cast_row_num(n_rows_data)?, n_col, fmt_column)
                    .map_err(derive_sheet_error)?;
            }
        }

        log::debug!("type styling done for {} columns", column_names.len());
        Ok(())
    }

    /// Enable the auto-filter over the sheet's used range when toggled on.
    pub fn apply_filter(
        &self,
        worksheet: &mut Worksheet,
        n_rows_total: usize,
        n_cols_total: usize,
    ) -> Result<(), EnumExportError> {
        if !self.catalog.toggles.filter.mode_on {
            log::debug!("auto-filter disabled in config");
            return Ok(());
        }
        if n_rows_total < 1 || n_cols_total < 1 {
            log::debug!("auto-filter skipped: sheet has no used range");
            return Ok(());
        }

        worksheet
            .autofilter(
                0,
                0,
                cast_row_num(n_rows_total - 1)?,
                cast_col_num(n_cols_total - 1)?,
            )
            .map_err(derive_sheet_error)?;
        log::debug!("auto-filter enabled over {n_rows_total} rows x {n_cols_total} columns");
        Ok(())
    }

    /// Size every column to `min(longest content + padding, max width)`,
    /// counting the header cell; an all-empty column uses the minimum
    /// content length.
    pub fn auto_size_columns(
        &self,
        worksheet: &mut Worksheet,
        table: &SpecTable,
    ) -> Result<(), EnumExportError> {
        let toggle = &self.catalog.toggles.auto_adjust;
        if !toggle.auto_adjust_width {
            log::debug!("column auto-size disabled in config");
            return Ok(());
        }

        for (n_idx_col, c_column) in table.columns().iter().enumerate() {
            let mut n_len_content_max = c_column.chars().count();
            for row in table.rows() {
                n_len_content_max = usize::max(
                    n_len_content_max,
                    stringify_cell_value(&row[n_idx_col]).chars().count(),
                );
            }

            let n_width = calculate_adjusted_width(n_len_content_max, toggle.max_column_width);
            worksheet
                .set_column_width(cast_col_num(n_idx_col)?, n_width as f64)
                .map_err(derive_sheet_error)?;
        }

        log::debug!(
            "column widths adjusted (max width {})",
            toggle.max_column_width
        );
        Ok(())
    }

    /// Freeze panes at the configured anchor cell when toggled on.
    pub fn apply_freeze_panes(&self, worksheet: &mut Worksheet) -> Result<(), EnumExportError> {
        let toggle = &self.catalog.toggles.freeze;
        if !toggle.mode_on {
            log::debug!("freeze panes disabled in config");
            return Ok(());
        }

        let (n_row, n_col) = parse_cell_anchor(&toggle.freeze_cell)?;
        worksheet
            .set_freeze_panes(n_row, n_col)
            .map_err(derive_sheet_error)?;
        log::debug!("freeze panes enabled at {:?}", toggle.freeze_cell);
        Ok(())
    }
}

fn derive_sheet_error(err: XlsxError) -> EnumExportError {
    EnumExportError::validation("sheet", format!("worksheet operation failed: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::EnumCellValue;

    fn derive_test_table() -> SpecTable {
        SpecTable::new(
            vec![
                "Name".to_string(),
                "number_decimal".to_string(),
                "number_no_decimal".to_string(),
            ],
            vec![
                vec![
                    EnumCellValue::String("Laptop".to_string()),
                    EnumCellValue::Number(9909.0),
                    EnumCellValue::Number(15430.0),
                ],
                vec![
                    EnumCellValue::String("Phone".to_string()),
                    EnumCellValue::Number(0.699),
                    EnumCellValue::Number(25.0),
                ],
            ],
        )
        .unwrap()
    }

    fn derive_written_worksheet(table: &SpecTable) -> Worksheet {
        let mut worksheet = Worksheet::new();
        for (n_idx_col, c_column) in table.columns().iter().enumerate() {
            worksheet
                .write_string(0, n_idx_col as u16, c_column)
                .unwrap();
        }
        for (n_idx_row, row) in table.rows().iter().enumerate() {
            for (n_idx_col, value) in row.iter().enumerate() {
                match value {
                    EnumCellValue::String(val) => {
                        worksheet
                            .write_string(n_idx_row as u32 + 1, n_idx_col as u16, val)
                            .unwrap();
                    }
                    EnumCellValue::Number(val) => {
                        worksheet
                            .write_number(n_idx_row as u32 + 1, n_idx_col as u16, *val)
                            .unwrap();
                    }
                    _ => {}
                }
            }
        }
        worksheet
    }

    #[test]
    fn test_run_pipeline_succeeds_on_written_sheet() {
        let catalog = SpecStyleCatalog::default();
        let registry = SpecStyleRegistry::build(&catalog).unwrap();
        let formatter = SheetFormatter::new(&registry, &catalog);

        let table = derive_test_table();
        let mut worksheet = derive_written_worksheet(&table);
        formatter.run_pipeline(&mut worksheet, &table).unwrap();
    }

    #[test]
    fn test_apply_header_body_rejects_empty_dimensions() {
        let catalog = SpecStyleCatalog::default();
        let registry = SpecStyleRegistry::build(&catalog).unwrap();
        let formatter = SheetFormatter::new(&registry, &catalog);
        let mut worksheet = Worksheet::new();

        assert!(matches!(
            formatter.apply_header_body(&mut worksheet, 0, 3),
            Err(EnumExportError::Validation { field, .. }) if field == "dimensions"
        ));
        assert!(matches!(
            formatter.apply_header_body(&mut worksheet, 3, 0),
            Err(EnumExportError::Validation { .. })
        ));
    }

    #[test]
    fn test_apply_type_styles_empty_columns_is_warned_noop() {
        let catalog = SpecStyleCatalog::default();
        let registry = SpecStyleRegistry::build(&catalog).unwrap();
        let formatter = SheetFormatter::new(&registry, &catalog);
        let mut worksheet = Worksheet::new();

        formatter.apply_type_styles(&mut worksheet, &[], 5).unwrap();
    }

    #[test]
    fn test_disabled_toggles_are_noops_that_never_raise() {
        let mut catalog = SpecStyleCatalog::default();
        catalog.toggles.filter.mode_on = false;
        catalog.toggles.auto_adjust.auto_adjust_width = false;
        catalog.toggles.freeze.mode_on = false;

        let registry = SpecStyleRegistry::build(&catalog).unwrap();
        let formatter = SheetFormatter::new(&registry, &catalog);
        let table = derive_test_table();
        let mut worksheet = derive_written_worksheet(&table);

        formatter.apply_filter(&mut worksheet, 3, 3).unwrap();
        formatter.auto_size_columns(&mut worksheet, &table).unwrap();
        formatter.apply_freeze_panes(&mut worksheet).unwrap();
    }

    #[test]
    fn test_malformed_freeze_cell_fails_step_but_not_pipeline() {
        let mut catalog = SpecStyleCatalog::default();
        catalog.toggles.freeze.freeze_cell = "not-a-cell".to_string();

        let registry = SpecStyleRegistry::build(&catalog).unwrap();
        let formatter = SheetFormatter::new(&registry, &catalog);
        let table = derive_test_table();
        let mut worksheet = derive_written_worksheet(&table);

        assert!(formatter.apply_freeze_panes(&mut worksheet).is_err());
        // The pipeline suppresses the cosmetic failure.
        formatter.run_pipeline(&mut worksheet, &table).unwrap();
    }

    #[test]
    fn test_missing_registered_style_aborts_structural_steps() {
        let catalog = SpecStyleCatalog::default();
        let mut catalog_unregistered = catalog.clone();
        catalog_unregistered.visual_styles.clear();
        // Registry without header/body styles, catalog still asking for them.
        let registry = SpecStyleRegistry::build(&catalog_unregistered).unwrap();
        let formatter = SheetFormatter::new(&registry, &catalog);
        let mut worksheet = Worksheet::new();

        assert!(matches!(
            formatter.apply_header_body(&mut worksheet, 2, 2),
            Err(EnumExportError::Config { .. })
        ));
    }
}
