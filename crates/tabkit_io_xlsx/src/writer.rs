//! Styled XLSX export.
//!
//! [`XlsxExporter`] owns one output workbook: it builds the style registry
//! from its catalog up front, writes tables sheet by sheet through the
//! formatting pipeline, and saves once into its output directory.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;

use crate::conf::N_LEN_EXCEL_SHEET_NAME_MAX;
use crate::error::EnumExportError;
use crate::formatter::SheetFormatter;
use crate::spec::{EnumCellValue, SpecStyleCatalog, SpecTable};
use crate::style::SpecStyleRegistry;
use crate::util::{cast_col_num, cast_row_num, sanitize_sheet_name};

////////////////////////////////////////////////////////////////////////////////
// #region Exporter

/// Writes styled tables into one XLSX document under an output directory.
pub struct XlsxExporter {
    dir_out: PathBuf,
    workbook: Workbook,
    catalog: SpecStyleCatalog,
    registry: SpecStyleRegistry,
    set_sheet_names_existing: BTreeSet<String>,
    if_closed: bool,
}

impl XlsxExporter {
    /// Create an exporter with the default style catalog.
    pub fn new(dir_out: impl AsRef<Path>) -> Result<Self, EnumExportError> {
        Self::with_catalog(dir_out, SpecStyleCatalog::default())
    }

    /// Create an exporter with a caller-supplied catalog.
    ///
    /// The catalog is validated and the full style registry built here, so
    /// configuration mistakes surface before any sheet is written.
    pub fn with_catalog(
        dir_out: impl AsRef<Path>,
        catalog: SpecStyleCatalog,
    ) -> Result<Self, EnumExportError> {
        catalog.validate()?;
        let registry = SpecStyleRegistry::build(&catalog)?;
        log::info!(
            "exporter ready: {} registered styles, output dir {:?}",
            registry.len(),
            dir_out.as_ref()
        );

        Ok(Self {
            dir_out: dir_out.as_ref().to_path_buf(),
            workbook: Workbook::new(),
            catalog,
            registry,
            set_sheet_names_existing: BTreeSet::new(),
            if_closed: false,
        })
    }

    /// Registered style names, in registration order.
    pub fn style_names(&self) -> &[String] {
        self.registry.names()
    }

    /// Append one table as a new formatted sheet.
    ///
    /// The requested name is sanitized and de-duplicated against sheets
    /// already in the workbook.
    pub fn add_sheet(
        &mut self,
        table: &SpecTable,
        sheet_name: &str,
    ) -> Result<(), EnumExportError> {
        if self.if_closed {
            return Err(EnumExportError::config(
                "workbook already saved; no further sheets can be added",
            ));
        }

        let c_name = self.derive_unique_sheet_name(&sanitize_sheet_name(sheet_name, "_"));
        self.set_sheet_names_existing.insert(c_name.clone());

        let worksheet = self.workbook.add_worksheet();
        worksheet
            .set_name(&c_name)
            .map_err(|err| EnumExportError::config(format!("invalid sheet name {c_name:?}: {err}")))?;

        for (n_idx_col, c_column) in table.columns().iter().enumerate() {
            worksheet
                .write_string(0, cast_col_num(n_idx_col)?, c_column)
                .map_err(|err| {
                    EnumExportError::validation("sheet", format!("header write failed: {err}"))
                })?;
        }
        for (n_idx_row, row) in table.rows().iter().enumerate() {
            let n_row = cast_row_num(n_idx_row + 1)?;
            for (n_idx_col, value) in row.iter().enumerate() {
                let n_col = cast_col_num(n_idx_col)?;
                let result = match value {
                    EnumCellValue::None => continue,
                    EnumCellValue::String(val) => worksheet.write_string(n_row, n_col, val),
                    EnumCellValue::Number(val) => worksheet.write_number(n_row, n_col, *val),
                    EnumCellValue::Bool(val) => worksheet.write_boolean(n_row, n_col, *val),
                };
                result.map_err(|err| {
                    EnumExportError::validation("sheet", format!("cell write failed: {err}"))
                })?;
            }
        }

        SheetFormatter::new(&self.registry, &self.catalog).run_pipeline(worksheet, table)?;
        log::info!(
            "sheet {c_name:?} written: {} data rows, {} columns",
            table.height(),
            table.width()
        );
        Ok(())
    }

    /// Save the workbook as `file_name` inside the output directory.
    ///
    /// Idempotent: a second call returns the target path without rewriting.
    pub fn save(&mut self, file_name: &str) -> Result<PathBuf, EnumExportError> {
        let path_out = self.dir_out.join(file_name);
        if self.if_closed {
            log::debug!("workbook already saved, returning {path_out:?}");
            return Ok(path_out);
        }

        fs::create_dir_all(&self.dir_out).map_err(|err| {
            EnumExportError::not_found(
                self.dir_out.display().to_string(),
                format!("cannot create output directory: {err}"),
            )
        })?;
        self.workbook.save(&path_out).map_err(|err| {
            EnumExportError::not_found(
                path_out.display().to_string(),
                format!("cannot save workbook: {err}"),
            )
        })?;

        self.if_closed = true;
        log::info!("workbook saved to {path_out:?}");
        Ok(path_out)
    }

    /// Export `tables` into one document and save it.
    ///
    /// Sheet names come from `sheet_names` where provided; a table without a
    /// supplied name gets `Sheet{i+1}`. An empty `file_name` fails before any
    /// sheet or file is touched.
    pub fn export_tables(
        &mut self,
        file_name: &str,
        tables: &[SpecTable],
        sheet_names: Option<&[String]>,
    ) -> Result<PathBuf, EnumExportError> {
        if file_name.trim().is_empty() {
            return Err(EnumExportError::config("output file name must not be empty"));
        }

        for (n_idx, table) in tables.iter().enumerate() {
            let c_name = sheet_names
                .and_then(|l_names| l_names.get(n_idx))
                .cloned()
                .unwrap_or_else(|| format!("Sheet{}", n_idx + 1));
            self.add_sheet(table, &c_name)?;
        }

        self.save(file_name)
    }

    /// Suffix a sanitized name until it is unique within this workbook,
    /// keeping the result inside the sheet name length limit.
    fn derive_unique_sheet_name(&self, sheet_name: &str) -> String {
        if !self.set_sheet_names_existing.contains(sheet_name) {
            return sheet_name.to_string();
        }

        let mut n_suffix: usize = 2;
        loop {
            let c_suffix = format!("__{n_suffix}");
            let n_len_base = N_LEN_EXCEL_SHEET_NAME_MAX.saturating_sub(c_suffix.len());
            let c_base: String = sheet_name.chars().take(n_len_base).collect();
            let c_candidate = format!("{c_base}{c_suffix}");
            if !self.set_sheet_names_existing.contains(&c_candidate) {
                return c_candidate;
            }
            n_suffix += 1;
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::io::Read as _;

    use calamine::{open_workbook_auto, Data, Reader};

    fn derive_people_table() -> SpecTable {
        SpecTable::new(
            vec!["Name".to_string(), "Age".to_string(), "City".to_string()],
            vec![
                vec![
                    EnumCellValue::String("Alice".to_string()),
                    EnumCellValue::Number(25.0),
                    EnumCellValue::String("New York".to_string()),
                ],
                vec![
                    EnumCellValue::String("Bob".to_string()),
                    EnumCellValue::Number(30.0),
                    EnumCellValue::String("London".to_string()),
                ],
                vec![
                    EnumCellValue::String("Charlie".to_string()),
                    EnumCellValue::Number(35.0),
                    EnumCellValue::String("Paris".to_string()),
                ],
            ],
        )
        .unwrap()
    }

    fn derive_products_table() -> SpecTable {
        SpecTable::new(
            vec![
                "Product".to_string(),
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
                vec![
                    EnumCellValue::String("Tablet".to_string()),
                    EnumCellValue::Number(1.399),
                    EnumCellValue::Number(15.0),
                ],
            ],
        )
        .unwrap()
    }

    fn derive_xml_attr(c_tag: &str, c_attr: &str) -> Option<String> {
        let c_marker = format!("{c_attr}=\"");
        let n_start = c_tag.find(&c_marker)? + c_marker.len();
        let n_len = c_tag[n_start..].find('"')?;
        Some(c_tag[n_start..n_start + n_len].to_string())
    }

    fn derive_archive_entry(path: &Path, c_entry: &str) -> String {
        let file = fs::File::open(path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut c_xml = String::new();
        archive
            .by_name(c_entry)
            .unwrap()
            .read_to_string(&mut c_xml)
            .unwrap();
        c_xml
    }

    /// Resolve a cell reference of the first sheet to its number-format code
    /// via `xl/styles.xml` (cell `s` index -> `cellXfs` entry -> `numFmt`).
    fn derive_cell_format_code(path: &Path, c_cell_ref: &str) -> String {
        let c_styles = derive_archive_entry(path, "xl/styles.xml");
        let c_sheet = derive_archive_entry(path, "xl/worksheets/sheet1.xml");

        let mut dict_codes: BTreeMap<String, String> = BTreeMap::new();
        for c_tag in c_styles.split("<numFmt ").skip(1) {
            dict_codes.insert(
                derive_xml_attr(c_tag, "numFmtId").unwrap(),
                derive_xml_attr(c_tag, "formatCode").unwrap(),
            );
        }

        let c_cell_xfs = c_styles
            .split("<cellXfs")
            .nth(1)
            .unwrap()
            .split("</cellXfs>")
            .next()
            .unwrap();
        let l_num_fmt_ids: Vec<String> = c_cell_xfs
            .split("<xf ")
            .skip(1)
            .map(|c_tag| derive_xml_attr(c_tag, "numFmtId").unwrap_or_else(|| "0".to_string()))
            .collect();

        let c_cell_tag = c_sheet
            .split(&format!("<c r=\"{c_cell_ref}\""))
            .nth(1)
            .unwrap()
            .split('>')
            .next()
            .unwrap();
        let n_style_idx: usize = derive_xml_attr(c_cell_tag, "s")
            .unwrap_or_else(|| "0".to_string())
            .parse()
            .unwrap();

        let c_num_fmt_id = &l_num_fmt_ids[n_style_idx];
        dict_codes.get(c_num_fmt_id).cloned().unwrap_or_else(|| {
            // Builtin id 0 is the implicit General format.
            assert_eq!(c_num_fmt_id, "0", "unexpected builtin format id");
            "General".to_string()
        })
    }

    #[test]
    fn test_export_tables_rejects_empty_file_name_before_io() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = XlsxExporter::new(dir.path()).unwrap();

        let result = exporter.export_tables("   ", &[derive_people_table()], None);
        assert!(matches!(result, Err(EnumExportError::Config { .. })));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_tables_end_to_end_readback() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = XlsxExporter::new(dir.path()).unwrap();

        let l_names = vec!["People".to_string(), "Products".to_string()];
        let path = exporter
            .export_tables(
                "demo_output.xlsx",
                &[derive_people_table(), derive_products_table()],
                Some(&l_names),
            )
            .unwrap();
        assert!(path.exists());

        let mut workbook = open_workbook_auto(&path).unwrap();
        assert_eq!(workbook.sheet_names(), ["People", "Products"]);

        let range = workbook.worksheet_range("People").unwrap();
        assert_eq!(range.get((0, 0)), Some(&Data::String("Name".to_string())));
        assert_eq!(range.get((1, 1)), Some(&Data::Float(25.0)));
        assert_eq!(
            range.get((3, 2)),
            Some(&Data::String("Paris".to_string()))
        );
    }

    #[test]
    fn test_export_tables_defaults_sheet_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = XlsxExporter::new(dir.path()).unwrap();

        let path = exporter
            .export_tables(
                "unnamed.xlsx",
                &[derive_people_table(), derive_products_table()],
                None,
            )
            .unwrap();

        let workbook = open_workbook_auto(&path).unwrap();
        assert_eq!(workbook.sheet_names(), ["Sheet1", "Sheet2"]);
    }

    #[test]
    fn test_duplicate_sheet_names_are_suffixed() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = XlsxExporter::new(dir.path()).unwrap();

        let l_names = vec!["Data".to_string(), "Data".to_string()];
        let path = exporter
            .export_tables(
                "dup.xlsx",
                &[derive_people_table(), derive_products_table()],
                Some(&l_names),
            )
            .unwrap();

        let workbook = open_workbook_auto(&path).unwrap();
        assert_eq!(workbook.sheet_names(), ["Data", "Data__2"]);
    }

    #[test]
    fn test_add_sheet_after_save_is_rejected_and_save_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = XlsxExporter::new(dir.path()).unwrap();

        exporter.add_sheet(&derive_people_table(), "People").unwrap();
        let path_first = exporter.save("once.xlsx").unwrap();
        let path_second = exporter.save("once.xlsx").unwrap();
        assert_eq!(path_first, path_second);

        assert!(matches!(
            exporter.add_sheet(&derive_products_table(), "Late"),
            Err(EnumExportError::Config { .. })
        ));
    }

    #[test]
    fn test_saved_document_carries_resolved_number_formats() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = XlsxExporter::new(dir.path()).unwrap();

        for c_style_name in ["header_style", "body_style", "int_style", "float_style"] {
            assert!(
                exporter.style_names().contains(&c_style_name.to_string()),
                "style {c_style_name:?} not registered"
            );
        }

        let path = exporter
            .export_tables("formats.xlsx", &[derive_products_table()], None)
            .unwrap();

        // Data row 2: declared columns carry their type formats, the
        // undeclared `Product` column falls back to General.
        assert_eq!(derive_cell_format_code(&path, "B2"), "#,##0.00");
        assert_eq!(derive_cell_format_code(&path, "C2"), "#,##0");
        assert_eq!(derive_cell_format_code(&path, "A2"), "General");
    }

    #[test]
    fn test_sheet_names_are_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = XlsxExporter::new(dir.path()).unwrap();

        let l_names = vec!["a/b:c".to_string()];
        let path = exporter
            .export_tables("sanitized.xlsx", &[derive_people_table()], Some(&l_names))
            .unwrap();

        let workbook = open_workbook_auto(&path).unwrap();
        assert_eq!(workbook.sheet_names(), ["a_b_c"]);
    }
}
