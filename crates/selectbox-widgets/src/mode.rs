//! Selection modes.
//!
//! A select is either single-choice or multiple-choice for its whole
//! lifetime. The mode is a type parameter, so the shape of the value and of
//! the change callback always matches it: a single select cannot be handed a
//! collection and a multiple select cannot be handed a lone option.

use crate::option::{OptionKey, OptionRef};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Capability shared by [`Single`] and [`Multiple`].
pub trait SelectionMode: Send + Sync + 'static {
    /// Shape of the host-owned selection value in this mode.
    type Value: Clone + Default + PartialEq + fmt::Debug + Send + Sync + 'static;

    /// Whether this mode selects many options.
    const MULTIPLE: bool;

    /// Human-readable mode name.
    const NAME: &'static str;

    /// The value that results from committing `option` against `current`.
    ///
    /// `None` means the commit changes nothing and the host must not be
    /// notified.
    fn commit(current: &Self::Value, option: &OptionRef) -> Option<Self::Value>;

    /// Options in `value`, in selection order.
    fn selected(value: &Self::Value) -> &[OptionRef];

    /// Build a value from options in selection order.
    ///
    /// Returns `None` if the options do not fit the mode.
    fn from_selected(options: Vec<OptionRef>) -> Option<Self::Value>;

    /// The empty value.
    fn cleared() -> Self::Value {
        Self::Value::default()
    }

    /// Identity membership of `option` in `value`.
    fn contains(value: &Self::Value, option: &OptionRef) -> bool {
        Self::selected(value).iter().any(|o| Arc::ptr_eq(o, option))
    }
}

/// At most one option is selected. Committing the current option is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Single;

impl SelectionMode for Single {
    type Value = Option<OptionRef>;

    const MULTIPLE: bool = false;
    const NAME: &'static str = "single";

    fn commit(current: &Self::Value, option: &OptionRef) -> Option<Self::Value> {
        match current {
            Some(selected) if Arc::ptr_eq(selected, option) => None,
            _ => Some(Some(Arc::clone(option))),
        }
    }

    fn selected(value: &Self::Value) -> &[OptionRef] {
        value.as_slice()
    }

    fn from_selected(mut options: Vec<OptionRef>) -> Option<Self::Value> {
        match options.len() {
            0 => Some(None),
            1 => Some(options.pop()),
            _ => None,
        }
    }
}

/// Zero or more options, ordered by selection. Committing toggles membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Multiple;

impl SelectionMode for Multiple {
    type Value = Vec<OptionRef>;

    const MULTIPLE: bool = true;
    const NAME: &'static str = "multiple";

    fn commit(current: &Self::Value, option: &OptionRef) -> Option<Self::Value> {
        let next = if Self::contains(current, option) {
            current
                .iter()
                .filter(|o| !Arc::ptr_eq(o, option))
                .cloned()
                .collect()
        } else {
            let mut next = Vec::with_capacity(current.len() + 1);
            next.extend(current.iter().cloned());
            next.push(Arc::clone(option));
            next
        };
        Some(next)
    }

    fn selected(value: &Self::Value) -> &[OptionRef] {
        value
    }

    fn from_selected(options: Vec<OptionRef>) -> Option<Self::Value> {
        let mut seen = HashSet::with_capacity(options.len());
        options
            .iter()
            .all(|o| seen.insert(OptionKey::of(o)))
            .then_some(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::{OptionList, SelectOption};
    use proptest::prelude::*;

    fn abc() -> OptionList {
        OptionList::from_labels(["A", "B", "C"])
    }

    fn at(list: &OptionList, i: usize) -> OptionRef {
        Arc::clone(&list.as_slice()[i])
    }

    #[test]
    fn test_single_commit_replaces() {
        let list = abc();
        let next = Single::commit(&Some(at(&list, 0)), &at(&list, 1)).unwrap();
        assert!(Arc::ptr_eq(next.as_ref().unwrap(), &at(&list, 1)));
    }

    #[test]
    fn test_single_commit_from_empty() {
        let list = abc();
        let next = Single::commit(&None, &at(&list, 2)).unwrap();
        assert_eq!(next.unwrap().label, "C");
    }

    #[test]
    fn test_single_commit_same_is_noop() {
        let list = abc();
        assert!(Single::commit(&Some(at(&list, 0)), &at(&list, 0)).is_none());
    }

    #[test]
    fn test_single_commit_equal_but_distinct_replaces() {
        let list = abc();
        let lookalike = Arc::new(SelectOption::simple("A"));
        assert!(Single::commit(&Some(at(&list, 0)), &lookalike).is_some());
    }

    #[test]
    fn test_single_selected_and_contains() {
        let list = abc();
        let value = Some(at(&list, 1));
        assert_eq!(Single::selected(&value).len(), 1);
        assert!(Single::contains(&value, &at(&list, 1)));
        assert!(!Single::contains(&value, &at(&list, 0)));
        assert!(!Single::contains(&None, &at(&list, 0)));
        assert_eq!(Single::cleared(), None);
    }

    #[test]
    fn test_single_from_selected() {
        let list = abc();
        assert_eq!(Single::from_selected(vec![]), Some(None));
        assert!(Single::from_selected(vec![at(&list, 0)]).unwrap().is_some());
        assert!(Single::from_selected(vec![at(&list, 0), at(&list, 1)]).is_none());
    }

    #[test]
    fn test_multiple_commit_appends() {
        let list = abc();
        let next = Multiple::commit(&vec![at(&list, 2)], &at(&list, 0)).unwrap();
        let labels: Vec<_> = next.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["C", "A"]);
    }

    #[test]
    fn test_multiple_commit_removes_preserving_order() {
        let list = abc();
        let current = vec![at(&list, 2), at(&list, 0), at(&list, 1)];
        let next = Multiple::commit(&current, &at(&list, 0)).unwrap();
        let labels: Vec<_> = next.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["C", "B"]);
    }

    #[test]
    fn test_multiple_commit_does_not_mutate_current() {
        let list = abc();
        let current = vec![at(&list, 0)];
        let _ = Multiple::commit(&current, &at(&list, 1));
        assert_eq!(current.len(), 1);
    }

    #[test]
    fn test_multiple_lookalikes_are_distinct() {
        let list = OptionList::new([SelectOption::simple("X"), SelectOption::simple("X")]);
        let current = vec![at(&list, 0)];

        let added = Multiple::commit(&current, &at(&list, 1)).unwrap();
        assert_eq!(added.len(), 2);

        let removed = Multiple::commit(&added, &at(&list, 1)).unwrap();
        assert_eq!(removed.len(), 1);
        assert!(Arc::ptr_eq(&removed[0], &at(&list, 0)));
    }

    #[test]
    fn test_multiple_from_selected_rejects_duplicates() {
        let list = abc();
        assert!(Multiple::from_selected(vec![at(&list, 0), at(&list, 1)]).is_some());
        assert!(Multiple::from_selected(vec![at(&list, 0), at(&list, 0)]).is_none());
        assert_eq!(Multiple::cleared(), Vec::<OptionRef>::new());
    }

    #[test]
    fn test_mode_constants() {
        assert!(!Single::MULTIPLE);
        assert!(Multiple::MULTIPLE);
        assert_eq!(Single::NAME, "single");
        assert_eq!(Multiple::NAME, "multiple");
    }

    proptest! {
        #[test]
        fn prop_multiple_commit_sequence_stays_duplicate_free(picks in proptest::collection::vec(0usize..5, 0..40)) {
            let list = OptionList::from_labels(["a", "b", "c", "d", "e"]);
            let mut value: Vec<OptionRef> = Vec::new();
            for i in picks {
                value = Multiple::commit(&value, &at(&list, i)).unwrap();
                let set = crate::option::SelectedSet::from_selected(&value);
                prop_assert_eq!(set.len(), value.len());
            }
        }

        #[test]
        fn prop_multiple_double_commit_restores(start in proptest::collection::hash_set(0usize..5, 0..5), pick in 0usize..5) {
            let list = OptionList::from_labels(["a", "b", "c", "d", "e"]);
            let value: Vec<OptionRef> = start.into_iter().map(|i| at(&list, i)).collect();
            let once = Multiple::commit(&value, &at(&list, pick)).unwrap();
            let twice = Multiple::commit(&once, &at(&list, pick)).unwrap();
            if Multiple::contains(&value, &at(&list, pick)) {
                // Removal then re-append moves the option to the end
                prop_assert_eq!(twice.len(), value.len());
                prop_assert!(Arc::ptr_eq(twice.last().unwrap(), &at(&list, pick)));
            } else {
                prop_assert_eq!(twice, value);
            }
        }
    }
}
