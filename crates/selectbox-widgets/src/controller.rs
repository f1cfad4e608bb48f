//! Selection interaction state machine.
//!
//! [`SelectionController`] owns the transient UI state of a select (whether
//! the list is open and which row is highlighted) and turns pointer and
//! keyboard input into mode-correct change notifications. It never owns the
//! selection itself: the host supplies the current value, receives every
//! proposed replacement through the change handler, and re-supplies the value
//! it decided to keep with [`SelectionController::set_value`].

use crate::listener::{KeyListener, ListenerDeps};
use crate::mode::SelectionMode;
use crate::option::{OptionList, OptionRef};
use selectbox_core::{Key, WidgetId};
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, trace};

/// Callback receiving every committed selection value.
pub type ChangeHandler<V> = Box<dyn FnMut(V) + Send + Sync>;

/// Transient interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionState {
    /// Whether the option list is visible
    pub is_open: bool,
    /// Keyboard-focused row; only meaningful while open
    pub highlighted_index: usize,
}

/// Drives open/highlight state and commits selections for one select.
pub struct SelectionController<M: SelectionMode> {
    options: OptionList,
    value: M::Value,
    on_change: Option<ChangeHandler<M::Value>>,
    state: InteractionState,
    listener: KeyListener,
    _mode: PhantomData<fn() -> M>,
}

impl<M: SelectionMode> SelectionController<M> {
    /// Create a closed controller for the focus container `scope`.
    #[must_use]
    pub fn new(scope: WidgetId, options: OptionList, value: M::Value) -> Self {
        let mut controller = Self {
            options,
            value,
            on_change: None,
            state: InteractionState::default(),
            listener: KeyListener::new(scope),
            _mode: PhantomData,
        };
        controller.resubscribe();
        controller
    }

    /// Set the change handler.
    #[must_use]
    pub fn with_on_change(mut self, handler: impl FnMut(M::Value) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    /// Replace the change handler.
    pub fn set_on_change(&mut self, handler: impl FnMut(M::Value) + Send + Sync + 'static) {
        self.on_change = Some(Box::new(handler));
    }

    /// Current value as last supplied by the host.
    #[must_use]
    pub const fn value(&self) -> &M::Value {
        &self.value
    }

    /// Re-supply the host's value.
    pub fn set_value(&mut self, value: M::Value) {
        self.value = value;
    }

    /// Current option list.
    #[must_use]
    pub const fn options(&self) -> &OptionList {
        &self.options
    }

    /// Re-supply the option list. The highlight is clamped into the new list.
    pub fn set_options(&mut self, options: OptionList) {
        self.options = options;
        let last = self.options.len().saturating_sub(1);
        self.state.highlighted_index = self.state.highlighted_index.min(last);
        self.resubscribe();
    }

    /// Interaction state snapshot.
    #[must_use]
    pub const fn state(&self) -> InteractionState {
        self.state
    }

    /// Whether the option list is visible.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.state.is_open
    }

    /// Highlighted row index.
    #[must_use]
    pub const fn highlighted_index(&self) -> usize {
        self.state.highlighted_index
    }

    /// Option under the highlight, if the list has one there.
    #[must_use]
    pub fn highlighted_option(&self) -> Option<&OptionRef> {
        self.options.get(self.state.highlighted_index)
    }

    /// Focus scope whose key presses this controller handles.
    #[must_use]
    pub const fn scope(&self) -> WidgetId {
        self.listener.scope()
    }

    /// Bind to another focus scope.
    pub fn set_scope(&mut self, scope: WidgetId) {
        self.listener.rescope(scope);
        self.resubscribe();
    }

    /// Keyboard listener backing [`Self::handle_key`].
    #[must_use]
    pub const fn listener(&self) -> &KeyListener {
        &self.listener
    }

    /// Stop handling keys until [`Self::attach_keys`] is called.
    ///
    /// State changes in between leave the listener detached.
    pub fn detach_keys(&mut self) {
        self.listener.suspend();
    }

    /// Resume handling keys.
    pub fn attach_keys(&mut self) {
        self.listener.resume();
        self.resubscribe();
    }

    /// Flip the list open or closed. Opening always highlights the first row.
    pub fn toggle_open(&mut self) {
        self.set_open(!self.state.is_open);
    }

    /// Force the list closed. Idempotent.
    pub fn close(&mut self) {
        self.set_open(false);
    }

    /// Highlight row `index` without opening or closing.
    ///
    /// Out-of-range indices are ignored. Returns whether the highlight moved.
    pub fn highlight(&mut self, index: usize) -> bool {
        if index >= self.options.len() || index == self.state.highlighted_index {
            return false;
        }
        trace!(from = self.state.highlighted_index, to = index, "highlight");
        self.state.highlighted_index = index;
        self.resubscribe();
        true
    }

    /// Commit `option`.
    ///
    /// Single mode replaces the value unless `option` already is the value.
    /// Multiple mode toggles membership, appending or removing by identity.
    /// Returns the value the host was notified with, if any.
    pub fn select_option(&mut self, option: &OptionRef) -> Option<M::Value> {
        let Some(next) = M::commit(&self.value, option) else {
            trace!(label = %option.label, "option already selected");
            return None;
        };
        Some(self.notify(next))
    }

    /// Notify the host with the empty value, whatever the current value is.
    pub fn clear_selection(&mut self) -> M::Value {
        self.notify(M::cleared())
    }

    /// Identity membership of `option` in the current value.
    #[must_use]
    pub fn is_option_selected(&self, option: &OptionRef) -> bool {
        M::contains(&self.value, option)
    }

    /// Interpret a key pressed inside the focus container `origin`.
    ///
    /// Keys from any other container are ignored. Returns the committed
    /// value, if the key committed one.
    pub fn handle_key(&mut self, key: Key, origin: WidgetId) -> Option<M::Value> {
        if !self.listener.accepts(origin, &self.deps()) {
            trace!(?key, origin = origin.0, scope = self.scope().0, "key ignored");
            return None;
        }

        match key {
            Key::Enter | Key::Space => {
                let was_open = self.state.is_open;
                self.toggle_open();
                if was_open {
                    let option = self.highlighted_option().cloned()?;
                    return self.select_option(&option);
                }
                None
            }
            Key::Up | Key::Down => {
                if self.state.is_open {
                    self.step(key == Key::Down);
                } else {
                    self.set_open(true);
                }
                None
            }
            Key::Escape => {
                self.close();
                None
            }
            _ => None,
        }
    }

    fn step(&mut self, forward: bool) {
        let current = self.state.highlighted_index;
        let next = if forward {
            current.checked_add(1)
        } else {
            current.checked_sub(1)
        };
        if let Some(next) = next.filter(|&n| n < self.options.len()) {
            self.highlight(next);
        }
    }

    fn set_open(&mut self, open: bool) {
        if open == self.state.is_open {
            return;
        }
        self.state.is_open = open;
        if open {
            self.state.highlighted_index = 0;
        }
        trace!(open, "list visibility changed");
        self.resubscribe();
    }

    fn notify(&mut self, value: M::Value) -> M::Value {
        debug!(mode = M::NAME, selected = M::selected(&value).len(), "selection changed");
        if let Some(handler) = self.on_change.as_mut() {
            handler(value.clone());
        }
        value
    }

    fn deps(&self) -> ListenerDeps {
        ListenerDeps {
            is_open: self.state.is_open,
            highlighted_index: self.state.highlighted_index,
            options: self.options.identity(),
        }
    }

    fn resubscribe(&mut self) {
        let deps = self.deps();
        if self.listener.sync(deps) {
            debug!(scope = self.scope().0, ?deps, "key listener resubscribed");
        }
    }
}

impl<M: SelectionMode> fmt::Debug for SelectionController<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionController")
            .field("mode", &M::NAME)
            .field("options", &self.options.len())
            .field("value", &self.value)
            .field("state", &self.state)
            .field("listener", &self.listener)
            .finish_non_exhaustive()
    }
}
