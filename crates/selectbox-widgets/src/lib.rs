//! Single and multiple choice select widgets.
//!
//! The selection value is owned by the host. Widgets report proposed values
//! through a change handler and a returned message, and display whatever the
//! host supplies back.
//!
//! ```
//! use selectbox_widgets::{OptionList, SelectionController, Single};
//! use selectbox_core::{Key, WidgetId};
//!
//! let scope = WidgetId::new(7);
//! let options = OptionList::from_labels(["A", "B", "C"]);
//! let mut select = SelectionController::<Single>::new(scope, options, None);
//!
//! select.handle_key(Key::Enter, scope);
//! select.handle_key(Key::Down, scope);
//! let committed = select.handle_key(Key::Enter, scope);
//!
//! assert_eq!(committed.flatten().map(|o| o.label.clone()), Some("B".to_string()));
//! assert!(!select.is_open());
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod listener;
pub mod mode;
pub mod option;
pub mod select;

pub use config::{AnySelect, OptionConfig, SelectConfig};
pub use controller::{ChangeHandler, InteractionState, SelectionController};
pub use error::ConfigError;
pub use listener::{KeyListener, ListenerDeps};
pub use mode::{Multiple, SelectionMode, Single};
pub use option::{OptionKey, OptionList, OptionRef, OptionValue, SelectOption, SelectedSet};
pub use select::{
    MultipleSelectionChanged, Select, SelectStyle, SelectionChanged, SingleSelectionChanged,
};
