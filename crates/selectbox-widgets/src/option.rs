//! Selectable options and identity-keyed lookups over them.
//!
//! Options are handed out as shared handles ([`OptionRef`]). Two handles
//! refer to "the same option" only when they point at the same allocation:
//! a list may legitimately contain entries with equal labels and values that
//! must still be selected independently.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Underlying value of an option: either text or a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Numeric value
    Number(serde_json::Number),
    /// Text value
    Text(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for OptionValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

/// A selectable option: display label plus underlying value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Display label
    pub label: String,
    /// Underlying value
    pub value: OptionValue,
}

impl SelectOption {
    /// Create a new option.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Create an option whose value is its label.
    #[must_use]
    pub fn simple(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            value: OptionValue::Text(text.clone()),
            label: text,
        }
    }
}

/// Shared handle to an option. Identity is the allocation, not the contents.
pub type OptionRef = Arc<SelectOption>;

/// Identity key of an [`OptionRef`].
///
/// Only meaningful while some handle to the option is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionKey(usize);

impl OptionKey {
    /// Key of the option behind `option`.
    #[must_use]
    pub fn of(option: &OptionRef) -> Self {
        Self(Arc::as_ptr(option) as usize)
    }
}

/// Identity-keyed set of selected options, built from a selection value.
#[derive(Debug, Clone, Default)]
pub struct SelectedSet {
    keys: HashSet<OptionKey>,
}

impl SelectedSet {
    /// Build from the options currently selected.
    pub fn from_selected<'a>(selected: impl IntoIterator<Item = &'a OptionRef>) -> Self {
        Self {
            keys: selected.into_iter().map(OptionKey::of).collect(),
        }
    }

    /// Check membership by identity.
    #[must_use]
    pub fn contains(&self, option: &OptionRef) -> bool {
        self.keys.contains(&OptionKey::of(option))
    }

    /// Number of selected options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Fixed, ordered, shared list of options.
///
/// Cloning is cheap and preserves identity: a clone is the same list.
#[derive(Debug, Clone)]
pub struct OptionList(Arc<[OptionRef]>);

impl OptionList {
    /// Build a list from plain options, allocating one handle per option.
    pub fn new(options: impl IntoIterator<Item = SelectOption>) -> Self {
        options.into_iter().map(Arc::new).collect()
    }

    /// Build a list from `(label, value)` pairs.
    pub fn from_pairs<L, V>(pairs: impl IntoIterator<Item = (L, V)>) -> Self
    where
        L: Into<String>,
        V: Into<OptionValue>,
    {
        Self::new(pairs.into_iter().map(|(l, v)| SelectOption::new(l, v)))
    }

    /// Build a list where each value equals its label.
    pub fn from_labels(labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::new(labels.into_iter().map(SelectOption::simple))
    }

    /// Number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Option handle at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&OptionRef> {
        self.0.get(index)
    }

    /// Iterate option handles in order.
    pub fn iter(&self) -> std::slice::Iter<'_, OptionRef> {
        self.0.iter()
    }

    /// Slice of option handles.
    #[must_use]
    pub fn as_slice(&self) -> &[OptionRef] {
        &self.0
    }

    /// First option carrying `value`.
    #[must_use]
    pub fn find_value(&self, value: &OptionValue) -> Option<&OptionRef> {
        self.0.iter().find(|o| &o.value == value)
    }

    /// Identity key of the list itself.
    #[must_use]
    pub(crate) fn identity(&self) -> usize {
        self.0.as_ptr() as usize
    }
}

impl Default for OptionList {
    fn default() -> Self {
        Self(Arc::from(Vec::new()))
    }
}

impl FromIterator<OptionRef> for OptionList {
    fn from_iter<I: IntoIterator<Item = OptionRef>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<SelectOption>> for OptionList {
    fn from(options: Vec<SelectOption>) -> Self {
        Self::new(options)
    }
}

impl<'a> IntoIterator for &'a OptionList {
    type Item = &'a OptionRef;
    type IntoIter = std::slice::Iter<'a, OptionRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
