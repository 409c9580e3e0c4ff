//! Shared table and style-catalog models.

use std::collections::BTreeMap;

use crate::conf::{
    derive_default_data_type_declarations, derive_default_data_type_formats,
    derive_default_feature_toggles, derive_default_style_names_by_data_type,
    derive_default_visual_styles, C_CELL_FREEZE_DEFAULT, C_NAME_STYLE_BODY, C_NAME_STYLE_HEADER,
    N_WIDTH_COLUMN_MAX,
};
use crate::error::EnumExportError;
use crate::util::validate_unique_columns;

////////////////////////////////////////////////////////////////////////////////
// #region TableModel

/// Normalized cell value carried through the read/write pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Missing/blank value.
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Bool(bool),
}

/// Rectangular table: ordered unique column names plus ordered data rows.
///
/// The header row is not stored as a data row; it is the `columns` sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecTable {
    columns: Vec<String>,
    rows: Vec<Vec<EnumCellValue>>,
}

impl SpecTable {
    /// Build a table, validating column uniqueness and rectangular shape.
    pub fn new(
        columns: Vec<String>,
        rows: Vec<Vec<EnumCellValue>>,
    ) -> Result<Self, EnumExportError> {
        validate_unique_columns(&columns)?;

        let n_width = columns.len();
        for (n_idx_row, row) in rows.iter().enumerate() {
            if row.len() != n_width {
                return Err(EnumExportError::validation(
                    "rows",
                    format!(
                        "row {n_idx_row} has {} cells, expected {n_width}",
                        row.len()
                    ),
                ));
            }
        }

        Ok(Self { columns, rows })
    }

    /// Ordered column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Ordered data rows (header excluded).
    pub fn rows(&self) -> &[Vec<EnumCellValue>] {
        &self.rows
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of data rows (header excluded).
    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StyleCatalogModels

/// Semantic data type tag declared per column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum EnumDataType {
    /// Calendar date.
    Date,
    /// Date with time of day.
    DateTime,
    /// Whole number.
    Int,
    /// Decimal number.
    Float,
    /// Monetary amount.
    Currency,
    /// Ratio rendered as percent.
    Percentage,
    /// Unspecified; resolves to the default style.
    #[default]
    Default,
}

/// Font attribute group. Missing sub-attributes take documented defaults
/// (Calibri, 11 pt, black, no emphasis) when the group is present.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecFontAttrs {
    /// Font family name.
    pub name: Option<String>,
    /// Font size in points.
    pub size: Option<f64>,
    /// Bold emphasis.
    pub bold: Option<bool>,
    /// Italic emphasis.
    pub italic: Option<bool>,
    /// Single underline.
    pub underline: Option<bool>,
    /// Strikethrough.
    pub strike: Option<bool>,
    /// Font color as RGB hex.
    pub color: Option<String>,
}

/// Fill attribute group. A `fill_type` of `None` keeps the cell unfilled,
/// matching a pattern fill with no pattern.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecFillAttrs {
    /// Pattern type; only `"solid"` produces a visible fill.
    pub fill_type: Option<String>,
    /// Visible color of a solid fill, RGB hex.
    pub start_color: Option<String>,
    /// Pattern foreground color, RGB hex.
    pub end_color: Option<String>,
}

/// Alignment attribute group. Missing sub-attributes default to left/top/no-wrap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecAlignmentAttrs {
    /// Horizontal alignment keyword (`left`, `center`, `right`, ...).
    pub horizontal: Option<String>,
    /// Vertical alignment keyword (`top`, `center`, `bottom`).
    pub vertical: Option<String>,
    /// Wrap text inside the cell.
    pub wrap_text: Option<bool>,
}

/// Visual style entry: attribute groups set only when the catalog entry
/// carries them; an absent group leaves the rendering default untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecVisualStyle {
    /// Font group.
    pub font: Option<SpecFontAttrs>,
    /// Fill group.
    pub fill: Option<SpecFillAttrs>,
    /// Alignment group.
    pub alignment: Option<SpecAlignmentAttrs>,
}

/// Number-format style entry for one data type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecDataTypeFormat {
    /// Number-format pattern; `General` when absent.
    pub num_format: Option<String>,
}

/// Registrable style definition produced from one catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecStyleDefinition {
    /// Registry key.
    pub name: String,
    /// Visual attribute groups, for visual-catalog entries.
    pub visual: Option<SpecVisualStyle>,
    /// Number-format pattern, for data-type-catalog entries.
    pub num_format: Option<String>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FeatureToggles

/// Auto-filter toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecFilterToggle {
    /// Enable the header-range dropdown filter.
    pub mode_on: bool,
}

impl Default for SpecFilterToggle {
    fn default() -> Self {
        Self { mode_on: true }
    }
}

/// Column width auto-sizing toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecAutoAdjustToggle {
    /// Enable content-based column width sizing.
    pub auto_adjust_width: bool,
    /// Upper bound for any sized column width.
    pub max_column_width: usize,
}

impl Default for SpecAutoAdjustToggle {
    fn default() -> Self {
        Self {
            auto_adjust_width: true,
            max_column_width: N_WIDTH_COLUMN_MAX,
        }
    }
}

/// Freeze-panes toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecFreezeToggle {
    /// Enable frozen panes.
    pub mode_on: bool,
    /// Anchor cell; everything above and left of it stays visible.
    pub freeze_cell: String,
}

impl Default for SpecFreezeToggle {
    fn default() -> Self {
        Self {
            mode_on: true,
            freeze_cell: C_CELL_FREEZE_DEFAULT.to_string(),
        }
    }
}

/// Cosmetic feature toggles read by the formatting pipeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecFeatureToggles {
    /// Auto-filter configuration.
    pub filter: SpecFilterToggle,
    /// Column auto-sizing configuration.
    pub auto_adjust: SpecAutoAdjustToggle,
    /// Freeze-panes configuration.
    pub freeze: SpecFreezeToggle,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StyleCatalog

/// Complete static styling configuration for one export run.
///
/// Replaceable wholesale; there is no per-call override surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecStyleCatalog {
    /// Style name → visual attribute bundle.
    pub visual_styles: BTreeMap<String, SpecVisualStyle>,
    /// Style name → number-format entry.
    pub data_type_formats: BTreeMap<String, SpecDataTypeFormat>,
    /// Column name → declared data type.
    pub data_types_by_column: BTreeMap<String, EnumDataType>,
    /// Data type → style name carrying its number format.
    pub style_names_by_data_type: BTreeMap<EnumDataType, String>,
    /// Cosmetic feature toggles.
    pub toggles: SpecFeatureToggles,
}

impl Default for SpecStyleCatalog {
    fn default() -> Self {
        Self {
            visual_styles: derive_default_visual_styles(),
            data_type_formats: derive_default_data_type_formats(),
            data_types_by_column: derive_default_data_type_declarations(),
            style_names_by_data_type: derive_default_style_names_by_data_type(),
            toggles: derive_default_feature_toggles(),
        }
    }
}

impl SpecStyleCatalog {
    /// Validate the catalog once at load time.
    ///
    /// Hard requirements: the header and body styles the pipeline assigns
    /// unconditionally, and the `Default` fallback of the data-type map.
    /// A data-type mapping that references a style name absent from the
    /// number-format catalog is reported as a warning, not a failure.
    pub fn validate(&self) -> Result<(), EnumExportError> {
        for c_name_required in [C_NAME_STYLE_HEADER, C_NAME_STYLE_BODY] {
            if !self.visual_styles.contains_key(c_name_required) {
                return Err(EnumExportError::config(format!(
                    "visual style catalog is missing required entry {c_name_required:?}"
                )));
            }
        }

        if !self
            .style_names_by_data_type
            .contains_key(&EnumDataType::Default)
        {
            return Err(EnumExportError::config(
                "data-type style map is missing the `Default` fallback entry",
            ));
        }

        for (data_type, c_style_name) in &self.style_names_by_data_type {
            if !self.data_type_formats.contains_key(c_style_name) {
                log::warn!(
                    "style {c_style_name:?} mapped from {data_type:?} has no number-format entry"
                );
            }
        }

        Ok(())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
