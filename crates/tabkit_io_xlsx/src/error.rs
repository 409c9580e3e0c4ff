//! Error taxonomy for the export kernel.

use thiserror::Error;

/// Tagged error kinds raised by the reader, style registry, formatter and writer.
#[derive(Debug, Error)]
pub enum EnumExportError {
    /// Source unreadable/missing, or destination unwritable.
    #[error("not found: {path}: {message}")]
    NotFound {
        /// Offending file path.
        path: String,
        /// Underlying failure description.
        message: String,
    },

    /// Required columns missing, or structurally invalid pipeline input.
    #[error("validation failed ({field}): {message}")]
    Validation {
        /// Field or aspect that failed validation.
        field: String,
        /// Failure description.
        message: String,
        /// Missing required column names, sorted.
        missing: Vec<String>,
        /// Available column names, sorted.
        available: Vec<String>,
    },

    /// Required export parameter absent, or style configuration invalid.
    #[error("config error: {message}")]
    Config {
        /// Failure description.
        message: String,
    },

    /// Duplicate style registration into one output document.
    #[error("duplicate style registration: {style_name:?}")]
    Registry {
        /// Name of the style registered twice.
        style_name: String,
    },
}

impl EnumExportError {
    /// Build a [`EnumExportError::NotFound`].
    pub fn not_found(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Build a [`EnumExportError::Validation`] without column context.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
            missing: vec![],
            available: vec![],
        }
    }

    /// Build a [`EnumExportError::Validation`] for a required-column miss.
    ///
    /// Both sets are sorted before they are stored or rendered.
    pub fn missing_columns(missing: Vec<String>, available: Vec<String>) -> Self {
        let mut l_missing = missing;
        let mut l_available = available;
        l_missing.sort();
        l_available.sort();
        Self::Validation {
            field: "columns".to_string(),
            message: format!(
                "missing required columns: {l_missing:?}; available columns: {l_available:?}"
            ),
            missing: l_missing,
            available: l_available,
        }
    }

    /// Build a [`EnumExportError::Config`].
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Build a [`EnumExportError::Registry`].
    pub fn registry(style_name: impl Into<String>) -> Self {
        Self::Registry {
            style_name: style_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_sorts_both_sets() {
        let err = EnumExportError::missing_columns(
            vec!["phone".to_string(), "id".to_string()],
            vec!["name".to_string(), "city".to_string()],
        );
        match err {
            EnumExportError::Validation {
                field,
                missing,
                available,
                ..
            } => {
                assert_eq!(field, "columns");
                assert_eq!(missing, vec!["id".to_string(), "phone".to_string()]);
                assert_eq!(available, vec!["city".to_string(), "name".to_string()]);
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_display_carries_kind_context() {
        let err = EnumExportError::registry("header_style");
        assert_eq!(
            err.to_string(),
            "duplicate style registration: \"header_style\""
        );
    }
}
