//! `tabkit_io_xlsx`: styled XLSX export for tabular data.
//!
//! - `conf`: default style catalogs, constants and feature toggle presets.
//! - `spec`: table, cell value, data type and catalog types.
//! - `util`: column validation, sheet name sanitation, widths, cell anchors.
//! - `style`: named format registry and column data-type resolution.
//! - `formatter`: the per-sheet formatting pipeline.
//! - `reader`: validated tabular input from XLSX sources.
//! - `writer`: the workbook exporter.
//! - `error`: the crate-wide error type.

pub mod conf;
pub mod error;
pub mod formatter;
pub mod reader;
pub mod spec;
pub mod style;
pub mod util;
pub mod writer;

pub use conf::{C_NAME_STYLE_BODY, C_NAME_STYLE_DEFAULT, C_NAME_STYLE_HEADER, N_WIDTH_COLUMN_MAX};
pub use error::EnumExportError;
pub use formatter::SheetFormatter;
pub use reader::read_table;
pub use spec::{EnumCellValue, EnumDataType, SpecStyleCatalog, SpecTable};
pub use style::{build_style_definitions, resolve_style_name, SpecStyleRegistry};
pub use writer::XlsxExporter;
