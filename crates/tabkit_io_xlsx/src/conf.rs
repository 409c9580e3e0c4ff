//! Static style catalogs, constants and default preset factories.

use std::collections::BTreeMap;

use crate::spec::{
    EnumDataType, SpecAlignmentAttrs, SpecAutoAdjustToggle, SpecDataTypeFormat,
    SpecFeatureToggles, SpecFillAttrs, SpecFilterToggle, SpecFontAttrs, SpecFreezeToggle,
    SpecVisualStyle,
};

/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Upper bound for auto-sized column widths.
pub const N_WIDTH_COLUMN_MAX: usize = 60;
/// Padding added to the longest content length when sizing a column.
pub const N_WIDTH_CONTENT_PADDING: usize = 8;
/// Content length assumed for an entirely empty column.
pub const N_LEN_CONTENT_EMPTY_MIN: usize = 5;

/// Header row style key; required in every visual catalog.
pub const C_NAME_STYLE_HEADER: &str = "header_style";
/// Body range style key; required in every visual catalog.
pub const C_NAME_STYLE_BODY: &str = "body_style";
/// Fallback number-format style key.
pub const C_NAME_STYLE_DEFAULT: &str = "default_style";
/// Default freeze anchor: one header row and one label column stay visible.
pub const C_CELL_FREEZE_DEFAULT: &str = "B2";

/// Build the default visual style catalog.
pub fn derive_default_visual_styles() -> BTreeMap<String, SpecVisualStyle> {
    let mut dict_styles = BTreeMap::new();

    dict_styles.insert(
        C_NAME_STYLE_HEADER.to_string(),
        SpecVisualStyle {
            font: Some(SpecFontAttrs {
                name: Some("Calibri".to_string()),
                size: Some(12.0),
                bold: Some(true),
                italic: Some(false),
                underline: Some(false),
                strike: Some(false),
                color: Some("FFFFFF".to_string()),
            }),
            fill: Some(SpecFillAttrs {
                fill_type: Some("solid".to_string()),
                start_color: Some("366092".to_string()),
                end_color: Some("366092".to_string()),
            }),
            alignment: Some(SpecAlignmentAttrs {
                horizontal: Some("center".to_string()),
                vertical: Some("center".to_string()),
                wrap_text: Some(false),
            }),
        },
    );

    dict_styles.insert(
        C_NAME_STYLE_BODY.to_string(),
        SpecVisualStyle {
            font: Some(SpecFontAttrs {
                name: Some("Calibri".to_string()),
                size: Some(11.0),
                bold: Some(false),
                italic: Some(false),
                underline: Some(false),
                strike: Some(false),
                color: Some("000000".to_string()),
            }),
            fill: Some(SpecFillAttrs {
                fill_type: None,
                start_color: Some("FFFFFF".to_string()),
                end_color: Some("FFFFFF".to_string()),
            }),
            alignment: Some(SpecAlignmentAttrs {
                horizontal: Some("left".to_string()),
                vertical: Some("top".to_string()),
                wrap_text: Some(false),
            }),
        },
    );

    // Registered but never assigned to cells; kept for catalog completeness.
    dict_styles.insert(
        "alternating_style".to_string(),
        SpecVisualStyle {
            font: None,
            fill: Some(SpecFillAttrs {
                fill_type: None,
                start_color: Some("F8F9FA".to_string()),
                end_color: Some("FFFFFF".to_string()),
            }),
            alignment: None,
        },
    );

    dict_styles
}

/// Build the default data-type number-format catalog.
pub fn derive_default_data_type_formats() -> BTreeMap<String, SpecDataTypeFormat> {
    let mut dict_formats = BTreeMap::new();

    dict_formats.insert(
        "date_style".to_string(),
        SpecDataTypeFormat {
            num_format: Some("dd/mm/yyyy".to_string()),
        },
    );
    dict_formats.insert(
        "date_time_style".to_string(),
        SpecDataTypeFormat {
            num_format: Some("dd/mm/yyyy hh:mm:ss".to_string()),
        },
    );
    dict_formats.insert(
        "int_style".to_string(),
        SpecDataTypeFormat {
            num_format: Some("#,##0".to_string()),
        },
    );
    dict_formats.insert(
        "float_style".to_string(),
        SpecDataTypeFormat {
            num_format: Some("#,##0.00".to_string()),
        },
    );
    dict_formats.insert(
        "currency_style".to_string(),
        SpecDataTypeFormat {
            num_format: Some("\"$\"#,##0;[Red]-#,##0".to_string()),
        },
    );
    dict_formats.insert(
        "percentage_style".to_string(),
        SpecDataTypeFormat {
            num_format: Some("0.00%".to_string()),
        },
    );
    dict_formats.insert(
        C_NAME_STYLE_DEFAULT.to_string(),
        SpecDataTypeFormat {
            num_format: Some("General".to_string()),
        },
    );

    dict_formats
}

/// Build the default column-name → data-type declaration map.
pub fn derive_default_data_type_declarations() -> BTreeMap<String, EnumDataType> {
    let mut dict_types = BTreeMap::new();

    dict_types.insert("dated_created".to_string(), EnumDataType::DateTime);
    dict_types.insert("date_modified".to_string(), EnumDataType::Date);
    dict_types.insert("date_checked".to_string(), EnumDataType::DateTime);
    dict_types.insert("date".to_string(), EnumDataType::DateTime);
    dict_types.insert("number_no_decimal".to_string(), EnumDataType::Int);
    dict_types.insert("number_decimal".to_string(), EnumDataType::Float);
    dict_types.insert("currency".to_string(), EnumDataType::Currency);
    dict_types.insert("percentage".to_string(), EnumDataType::Percentage);

    dict_types
}

/// Build the default data-type → style-name map.
///
/// Must carry an [`EnumDataType::Default`] entry; catalog validation enforces it.
pub fn derive_default_style_names_by_data_type() -> BTreeMap<EnumDataType, String> {
    let mut dict_names = BTreeMap::new();

    dict_names.insert(EnumDataType::Date, "date_style".to_string());
    dict_names.insert(EnumDataType::DateTime, "date_time_style".to_string());
    dict_names.insert(EnumDataType::Int, "int_style".to_string());
    dict_names.insert(EnumDataType::Float, "float_style".to_string());
    dict_names.insert(EnumDataType::Currency, "currency_style".to_string());
    dict_names.insert(EnumDataType::Percentage, "percentage_style".to_string());
    dict_names.insert(EnumDataType::Default, C_NAME_STYLE_DEFAULT.to_string());

    dict_names
}

/// Build the default cosmetic feature toggles.
pub fn derive_default_feature_toggles() -> SpecFeatureToggles {
    SpecFeatureToggles {
        filter: SpecFilterToggle { mode_on: true },
        auto_adjust: SpecAutoAdjustToggle {
            auto_adjust_width: true,
            max_column_width: N_WIDTH_COLUMN_MAX,
        },
        freeze: SpecFreezeToggle {
            mode_on: true,
            freeze_cell: C_CELL_FREEZE_DEFAULT.to_string(),
        },
    }
}
