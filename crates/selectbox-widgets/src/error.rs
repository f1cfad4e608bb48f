//! Error types for select configuration.

use crate::option::OptionValue;
use thiserror::Error;

/// Errors from loading or building a select from configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured mode differs from the one requested.
    #[error("mode mismatch: expected {expected} select, config describes {found}")]
    ModeMismatch {
        /// Mode the caller asked for
        expected: &'static str,
        /// Mode the config describes
        found: &'static str,
    },

    /// Two options share a value.
    #[error("duplicate option value {0}")]
    DuplicateOption(OptionValue),

    /// A selected value names no option.
    #[error("selected value {0} matches no option")]
    UnknownSelection(OptionValue),

    /// The same value is selected twice.
    #[error("value {0} selected more than once")]
    DuplicateSelection(OptionValue),

    /// A single select lists several selected values.
    #[error("single select has {0} selected values")]
    TooManySelected(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::ModeMismatch {
            expected: "single",
            found: "multiple",
        };
        assert_eq!(
            err.to_string(),
            "mode mismatch: expected single select, config describes multiple"
        );

        let err = ConfigError::UnknownSelection("nz".into());
        assert_eq!(err.to_string(), "selected value \"nz\" matches no option");

        let err = ConfigError::DuplicateOption(7.into());
        assert_eq!(err.to_string(), "duplicate option value 7");

        let err = ConfigError::TooManySelected(2);
        assert_eq!(err.to_string(), "single select has 2 selected values");
    }

    #[test]
    fn test_config_error_from_json() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: ConfigError = json_err.into();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_config_error_from_yaml() {
        let yaml_err = serde_yaml_ng::from_str::<u32>("[1, 2").unwrap_err();
        let err: ConfigError = yaml_err.into();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }
}
