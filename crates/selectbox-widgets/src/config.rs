//! Declarative select configuration.
//!
//! ```yaml
//! multiple: true
//! placeholder: Pick fruit
//! options:
//!   - { label: Apple, value: apple }
//!   - { label: Banana, value: 2 }
//! selected: [2]
//! ```
//!
//! Selected entries refer to options by value. The built widget holds
//! handles into its own option list, so the initial value is resolved to
//! those handles rather than to copies.

use crate::error::ConfigError;
use crate::mode::{Multiple, SelectionMode, Single};
use crate::option::{OptionList, OptionRef, OptionValue, SelectOption};
use crate::select::{Select, SelectStyle};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// One configured option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionConfig {
    /// Display label
    pub label: String,
    /// Underlying value
    pub value: OptionValue,
}

impl From<OptionConfig> for SelectOption {
    fn from(config: OptionConfig) -> Self {
        Self::new(config.label, config.value)
    }
}

/// Configuration of a single or multiple select.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectConfig {
    /// Allow many selected options
    pub multiple: bool,
    /// Options in display order
    pub options: Vec<OptionConfig>,
    /// Values of the initially selected options, in selection order
    pub selected: Vec<OptionValue>,
    /// Placeholder text
    pub placeholder: Option<String>,
    /// Start disabled
    pub disabled: bool,
    /// Test ID
    pub test_id: Option<String>,
    /// Accessible name
    pub accessible_name: Option<String>,
    /// Colors and font size
    pub style: Option<SelectStyle>,
}

/// A select of either mode, as described by a [`SelectConfig`].
#[derive(Debug)]
pub enum AnySelect {
    /// Single-choice select
    Single(Select<Single>),
    /// Multiple-choice select
    Multiple(Select<Multiple>),
}

impl AnySelect {
    /// Whether this is a multiple select.
    #[must_use]
    pub const fn is_multiple(&self) -> bool {
        matches!(self, Self::Multiple(_))
    }

    /// Labels of the selected options in selection order.
    #[must_use]
    pub fn selected_labels(&self) -> Vec<&str> {
        match self {
            Self::Single(s) => s.selected_labels(),
            Self::Multiple(s) => s.selected_labels(),
        }
    }
}

impl SelectConfig {
    /// Parse from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or has unknown fields.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Parse from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or has unknown fields.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Name of the configured mode.
    #[must_use]
    pub const fn mode_name(&self) -> &'static str {
        if self.multiple {
            Multiple::NAME
        } else {
            Single::NAME
        }
    }

    /// Check option values are unique and the selection is valid for the mode.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut values = HashSet::with_capacity(self.options.len());
        for option in &self.options {
            if !values.insert(&option.value) {
                return Err(ConfigError::DuplicateOption(option.value.clone()));
            }
        }

        if !self.multiple && self.selected.len() > 1 {
            return Err(ConfigError::TooManySelected(self.selected.len()));
        }

        let mut seen = HashSet::with_capacity(self.selected.len());
        for value in &self.selected {
            if !values.contains(value) {
                return Err(ConfigError::UnknownSelection(value.clone()));
            }
            if !seen.insert(value) {
                return Err(ConfigError::DuplicateSelection(value.clone()));
            }
        }
        Ok(())
    }

    /// Validate and build a select of the configured mode.
    ///
    /// # Errors
    ///
    /// Returns an error if [`Self::validate`] fails.
    pub fn build(&self) -> Result<AnySelect, ConfigError> {
        if self.multiple {
            self.build_mode::<Multiple>().map(AnySelect::Multiple)
        } else {
            self.build_mode::<Single>().map(AnySelect::Single)
        }
    }

    /// Build a single select.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ModeMismatch`] if the config is multiple, or a
    /// validation error.
    pub fn build_single(&self) -> Result<Select<Single>, ConfigError> {
        self.expect_mode::<Single>()?;
        self.build_mode()
    }

    /// Build a multiple select.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ModeMismatch`] if the config is single, or a
    /// validation error.
    pub fn build_multiple(&self) -> Result<Select<Multiple>, ConfigError> {
        self.expect_mode::<Multiple>()?;
        self.build_mode()
    }

    fn expect_mode<M: SelectionMode>(&self) -> Result<(), ConfigError> {
        if self.multiple == M::MULTIPLE {
            Ok(())
        } else {
            Err(ConfigError::ModeMismatch {
                expected: M::NAME,
                found: self.mode_name(),
            })
        }
    }

    fn build_mode<M: SelectionMode>(&self) -> Result<Select<M>, ConfigError> {
        self.validate()?;

        let options = OptionList::new(self.options.iter().cloned().map(SelectOption::from));
        let selected: Vec<OptionRef> = self
            .selected
            .iter()
            .filter_map(|value| options.find_value(value).cloned())
            .collect();
        let value = M::from_selected(selected)
            .ok_or(ConfigError::TooManySelected(self.selected.len()))?;

        debug!(
            mode = M::NAME,
            options = options.len(),
            selected = self.selected.len(),
            "select built from config"
        );

        let mut select = Select::<M>::new(options)
            .value(value)
            .disabled(self.disabled);
        if let Some(placeholder) = &self.placeholder {
            select = select.placeholder(placeholder.as_str());
        }
        if let Some(test_id) = &self.test_id {
            select = select.with_test_id(test_id.as_str());
        }
        if let Some(name) = &self.accessible_name {
            select = select.with_accessible_name(name.as_str());
        }
        if let Some(style) = &self.style {
            select = select.style(style.clone());
        }
        Ok(select)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const FRUIT_YAML: &str = r"
multiple: true
placeholder: Pick fruit
options:
  - { label: Apple, value: apple }
  - { label: Banana, value: 2 }
  - { label: Cherry, value: cherry }
selected: [cherry, apple]
";

    #[test]
    fn test_parse_yaml() {
        let config = SelectConfig::from_yaml(FRUIT_YAML).unwrap();
        assert!(config.multiple);
        assert_eq!(config.options.len(), 3);
        assert_eq!(config.options[1].value, OptionValue::from(2));
        assert_eq!(config.selected, vec![OptionValue::from("cherry"), OptionValue::from("apple")]);
        assert_eq!(config.placeholder.as_deref(), Some("Pick fruit"));
    }

    #[test]
    fn test_parse_json() {
        let config = SelectConfig::from_json(
            r#"{"options": [{"label": "One", "value": 1}, {"label": "Two", "value": "two"}], "selected": [1]}"#,
        )
        .unwrap();
        assert!(!config.multiple);
        assert_eq!(config.mode_name(), "single");
        assert_eq!(config.selected, vec![OptionValue::from(1)]);
    }

    #[test]
    fn test_parse_empty_yaml_is_default() {
        let config = SelectConfig::from_yaml("{}").unwrap();
        assert_eq!(config, SelectConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = SelectConfig::from_yaml("multiple: true\ncolour: red\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = SelectConfig::from_yaml(FRUIT_YAML).unwrap();
        let again = SelectConfig::from_yaml(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(config, again);
    }

    #[test]
    fn test_build_multiple_resolves_handles_in_order() {
        let config = SelectConfig::from_yaml(FRUIT_YAML).unwrap();
        let select = config.build_multiple().unwrap();
        assert_eq!(select.selected_labels(), vec!["Cherry", "Apple"]);
        assert_eq!(select.get_placeholder(), "Pick fruit");

        let options = select.get_options();
        assert!(Arc::ptr_eq(&select.get_value()[0], &options.as_slice()[2]));
        assert!(select.controller().is_option_selected(&options.as_slice()[0]));
    }

    #[test]
    fn test_build_dispatches_on_mode() {
        let config = SelectConfig::from_yaml(FRUIT_YAML).unwrap();
        let built = config.build().unwrap();
        assert!(built.is_multiple());
        assert_eq!(built.selected_labels(), vec!["Cherry", "Apple"]);

        let single = SelectConfig {
            multiple: false,
            selected: vec!["apple".into()],
            ..config
        };
        let built = single.build().unwrap();
        assert!(!built.is_multiple());
        assert_eq!(built.selected_labels(), vec!["Apple"]);
    }

    #[test]
    fn test_build_mode_mismatch() {
        let config = SelectConfig::from_yaml(FRUIT_YAML).unwrap();
        let err = config.build_single().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ModeMismatch {
                expected: "single",
                found: "multiple"
            }
        ));

        let err = SelectConfig::default().build_multiple().unwrap_err();
        assert!(matches!(err, ConfigError::ModeMismatch { expected: "multiple", .. }));
    }

    #[test]
    fn test_duplicate_option_value() {
        let config = SelectConfig::from_yaml(
            "options:\n  - { label: A, value: 1 }\n  - { label: B, value: 1 }\n",
        )
        .unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateOption(_))));
    }

    #[test]
    fn test_unknown_selection() {
        let config = SelectConfig::from_yaml(
            "options:\n  - { label: A, value: a }\nselected: [b]\n",
        )
        .unwrap();
        let err = config.build().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSelection(OptionValue::Text(ref v)) if v == "b"));
    }

    #[test]
    fn test_too_many_selected_in_single_mode() {
        let config = SelectConfig::from_yaml(
            "options:\n  - { label: A, value: a }\n  - { label: B, value: b }\nselected: [a, b]\n",
        )
        .unwrap();
        assert!(matches!(config.build(), Err(ConfigError::TooManySelected(2))));
    }

    #[test]
    fn test_duplicate_selection() {
        let config = SelectConfig::from_yaml(
            "multiple: true\noptions:\n  - { label: A, value: a }\nselected: [a, a]\n",
        )
        .unwrap();
        assert!(matches!(config.build(), Err(ConfigError::DuplicateSelection(_))));
    }

    #[test]
    fn test_number_and_text_values_are_distinct() {
        let config = SelectConfig::from_yaml(
            "options:\n  - { label: One, value: 1 }\n  - { label: One text, value: \"1\" }\nselected: [\"1\"]\n",
        )
        .unwrap();
        let select = config.build_single().unwrap();
        assert_eq!(select.selected_labels(), vec!["One text"]);
    }

    #[test]
    fn test_build_applies_presentation_fields() {
        let config = SelectConfig::from_yaml(
            "disabled: true\ntest_id: country\naccessible_name: Country\nstyle:\n  font_size: 12.0\n",
        )
        .unwrap();
        let select = config.build_single().unwrap();
        assert!(select.is_disabled());
        assert!(select.is_empty());
        assert_eq!(selectbox_core::Widget::test_id(&select), Some("country"));
        assert_eq!(selectbox_core::Widget::accessible_name(&select), Some("Country"));
    }
}
