//! Style registry construction and column data-type resolution.

use std::collections::BTreeMap;

use rust_xlsxwriter::{Format, FormatAlign, FormatUnderline};

use crate::conf::C_NAME_STYLE_DEFAULT;
use crate::error::EnumExportError;
use crate::spec::{EnumDataType, SpecStyleCatalog, SpecStyleDefinition};

////////////////////////////////////////////////////////////////////////////////
// #region StyleDefinitionBuild

/// Build a definition from one visual catalog entry.
///
/// A lookup miss yields `None` and a warning; the bulk build continues.
pub fn derive_visual_style_definition(
    style_name: &str,
    catalog: &SpecStyleCatalog,
) -> Option<SpecStyleDefinition> {
    let Some(visual) = catalog.visual_styles.get(style_name) else {
        log::warn!("style {style_name:?} not found in the visual catalog");
        return None;
    };

    Some(SpecStyleDefinition {
        name: style_name.to_string(),
        visual: Some(visual.clone()),
        num_format: None,
    })
}

/// Build a definition from one data-type-format catalog entry.
pub fn derive_data_type_style_definition(
    style_name: &str,
    catalog: &SpecStyleCatalog,
) -> Option<SpecStyleDefinition> {
    let Some(entry) = catalog.data_type_formats.get(style_name) else {
        log::warn!("style {style_name:?} not found in the data-type format catalog");
        return None;
    };

    Some(SpecStyleDefinition {
        name: style_name.to_string(),
        visual: None,
        num_format: Some(
            entry
                .num_format
                .clone()
                .unwrap_or_else(|| "General".to_string()),
        ),
    })
}

/// Build all registrable definitions: visual entries first, then number-format
/// entries, each in catalog iteration order.
pub fn build_style_definitions(catalog: &SpecStyleCatalog) -> Vec<SpecStyleDefinition> {
    let mut l_defs = Vec::new();

    for c_name in catalog.visual_styles.keys() {
        if let Some(def) = derive_visual_style_definition(c_name, catalog) {
            l_defs.push(def);
        }
    }
    for c_name in catalog.data_type_formats.keys() {
        if let Some(def) = derive_data_type_style_definition(c_name, catalog) {
            l_defs.push(def);
        }
    }

    l_defs
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StyleRegistry

/// Named [`Format`] objects for one output document.
///
/// Built once per document, then read-only while sheets are formatted.
pub struct SpecStyleRegistry {
    dict_formats: BTreeMap<String, Format>,
    l_names: Vec<String>,
}

impl SpecStyleRegistry {
    /// Build the registry from both catalogs.
    ///
    /// A duplicate style name aborts construction: later formatting steps
    /// depend on full registration.
    pub fn build(catalog: &SpecStyleCatalog) -> Result<Self, EnumExportError> {
        let mut registry = Self {
            dict_formats: BTreeMap::new(),
            l_names: Vec::new(),
        };

        for def in build_style_definitions(catalog) {
            registry.register(def)?;
        }
        log::debug!("registered {} named styles", registry.len());

        Ok(registry)
    }

    fn register(&mut self, def: SpecStyleDefinition) -> Result<(), EnumExportError> {
        if self.dict_formats.contains_key(&def.name) {
            return Err(EnumExportError::registry(def.name));
        }

        let format = derive_rust_xlsx_format(&def);
        self.l_names.push(def.name.clone());
        self.dict_formats.insert(def.name, format);
        Ok(())
    }

    /// Look up a registered format; a miss is a config failure.
    pub fn get(&self, style_name: &str) -> Result<&Format, EnumExportError> {
        self.dict_formats.get(style_name).ok_or_else(|| {
            EnumExportError::config(format!("style {style_name:?} is not registered"))
        })
    }

    /// Whether `style_name` is registered.
    pub fn contains(&self, style_name: &str) -> bool {
        self.dict_formats.contains_key(style_name)
    }

    /// Registered style names in registration order.
    pub fn names(&self) -> &[String] {
        &self.l_names
    }

    /// Number of registered styles.
    pub fn len(&self) -> usize {
        self.l_names.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.l_names.is_empty()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region TypeResolution

/// Resolve a column name to the style name carrying its number format.
///
/// Two-stage fail-open fallback: an undeclared column resolves to the default
/// data type, and an unmapped data type resolves to the default style, so any
/// input string resolves to a registered style.
pub fn resolve_style_name(catalog: &SpecStyleCatalog, column_name: &str) -> String {
    let data_type = catalog
        .data_types_by_column
        .get(column_name)
        .copied()
        .unwrap_or(EnumDataType::Default);

    catalog
        .style_names_by_data_type
        .get(&data_type)
        .cloned()
        .unwrap_or_else(|| C_NAME_STYLE_DEFAULT.to_string())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FormatConversion

/// Convert a style definition into a concrete [`Format`].
///
/// Attribute groups absent from the definition leave the rendering defaults
/// untouched; sub-attributes missing from a present group take the documented
/// defaults (Calibri 11 black; white solid fill; left/top/no-wrap).
pub fn derive_rust_xlsx_format(def: &SpecStyleDefinition) -> Format {
    let mut format = Format::new();

    if let Some(visual) = &def.visual {
        if let Some(font) = &visual.font {
            format = format
                .set_font_name(font.name.clone().unwrap_or_else(|| "Calibri".to_string()))
                .set_font_size(font.size.unwrap_or(11.0))
                .set_font_color(font.color.as_deref().unwrap_or("000000"));
            if font.bold.unwrap_or(false) {
                format = format.set_bold();
            }
            if font.italic.unwrap_or(false) {
                format = format.set_italic();
            }
            if font.underline.unwrap_or(false) {
                format = format.set_underline(FormatUnderline::Single);
            }
            if font.strike.unwrap_or(false) {
                format = format.set_font_strikethrough();
            }
        }

        if let Some(fill) = &visual.fill {
            // A pattern type of `None` means no visible fill.
            if fill.fill_type.as_deref() == Some("solid") {
                format =
                    format.set_background_color(fill.start_color.as_deref().unwrap_or("FFFFFF"));
            }
        }

        if let Some(alignment) = &visual.alignment {
            if let Some(align) =
                derive_format_align_horizontal(alignment.horizontal.as_deref().unwrap_or("left"))
            {
                format = format.set_align(align);
            }
            if let Some(align) =
                derive_format_align_vertical(alignment.vertical.as_deref().unwrap_or("top"))
            {
                format = format.set_align(align);
            }
            if alignment.wrap_text.unwrap_or(false) {
                format = format.set_text_wrap();
            }
        }
    }

    if let Some(num_format) = &def.num_format {
        format = format.set_num_format(num_format.clone());
    }

    format
}

fn derive_format_align_horizontal(align: &str) -> Option<FormatAlign> {
    match align.trim().to_ascii_lowercase().as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "fill" => Some(FormatAlign::Fill),
        "justify" => Some(FormatAlign::Justify),
        "center_across" => Some(FormatAlign::CenterAcross),
        "distributed" => Some(FormatAlign::Distributed),
        _ => None,
    }
}

fn derive_format_align_vertical(align: &str) -> Option<FormatAlign> {
    match align.trim().to_ascii_lowercase().as_str() {
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "center" | "vcenter" => Some(FormatAlign::VerticalCenter),
        "justify" | "vjustify" => Some(FormatAlign::VerticalJustify),
        "distributed" | "vdistributed" => Some(FormatAlign::VerticalDistributed),
        _ => None,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
