//! Scoped keyboard subscription for a select's focus container.
//!
//! A listener is bound to one focus scope and to a snapshot of the state the
//! key handler depends on. Whenever that state changes the listener is
//! detached and attached again with the new snapshot, and it is detached for
//! good when dropped. Key presses are only interpreted through an attached
//! listener whose snapshot matches the live state and whose scope matches the
//! key's origin. A suspended listener stays detached through state changes
//! until it is resumed.

use selectbox_core::WidgetId;
use tracing::trace;

/// State the key handler reads, captured at attach time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerDeps {
    /// Whether the list is open
    pub is_open: bool,
    /// Highlighted row
    pub highlighted_index: usize,
    /// Identity of the option list
    pub options: usize,
}

/// Keyboard listener attached to a focus container.
#[derive(Debug)]
pub struct KeyListener {
    scope: WidgetId,
    deps: Option<ListenerDeps>,
    attachments: u64,
    suspended: bool,
}

impl KeyListener {
    /// Create a detached listener for `scope`.
    #[must_use]
    pub const fn new(scope: WidgetId) -> Self {
        Self {
            scope,
            deps: None,
            attachments: 0,
            suspended: false,
        }
    }

    /// Focus scope this listener serves.
    #[must_use]
    pub const fn scope(&self) -> WidgetId {
        self.scope
    }

    /// Move the listener to another focus scope, detaching it.
    pub fn rescope(&mut self, scope: WidgetId) {
        if scope != self.scope {
            self.detach();
            self.scope = scope;
        }
    }

    /// Attach with `deps`, replacing a stale attachment.
    ///
    /// Returns `true` if a (re)attachment happened. Does nothing while
    /// suspended.
    pub fn sync(&mut self, deps: ListenerDeps) -> bool {
        if self.suspended || self.deps == Some(deps) {
            return false;
        }
        self.detach();
        self.deps = Some(deps);
        self.attachments += 1;
        trace!(scope = self.scope.0, generation = self.attachments, ?deps, "key listener attached");
        true
    }

    /// Detach. Idempotent.
    pub fn detach(&mut self) {
        if let Some(deps) = self.deps.take() {
            trace!(scope = self.scope.0, generation = self.attachments, ?deps, "key listener detached");
        }
    }

    /// Detach and ignore [`Self::sync`] until [`Self::resume`].
    pub fn suspend(&mut self) {
        self.suspended = true;
        self.detach();
    }

    /// Allow the next [`Self::sync`] to attach again.
    pub fn resume(&mut self) {
        self.suspended = false;
    }

    /// Whether the listener is suspended.
    #[must_use]
    pub const fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Whether the listener is currently attached.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.deps.is_some()
    }

    /// Number of attachments so far.
    #[must_use]
    pub const fn attachments(&self) -> u64 {
        self.attachments
    }

    /// Check that a key from `origin` may be handled against `live` state.
    #[must_use]
    pub fn accepts(&self, origin: WidgetId, live: &ListenerDeps) -> bool {
        origin == self.scope && self.deps.as_ref() == Some(live)
    }
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCOPE: WidgetId = WidgetId::new(1);

    fn deps(is_open: bool, highlighted_index: usize) -> ListenerDeps {
        ListenerDeps {
            is_open,
            highlighted_index,
            options: 0x1000,
        }
    }

    #[test]
    fn test_new_listener_is_detached() {
        let listener = KeyListener::new(SCOPE);
        assert!(!listener.is_attached());
        assert_eq!(listener.attachments(), 0);
        assert!(!listener.accepts(SCOPE, &deps(false, 0)));
    }

    #[test]
    fn test_sync_attaches_once_per_snapshot() {
        let mut listener = KeyListener::new(SCOPE);
        assert!(listener.sync(deps(false, 0)));
        assert!(!listener.sync(deps(false, 0)));
        assert_eq!(listener.attachments(), 1);

        assert!(listener.sync(deps(true, 0)));
        assert_eq!(listener.attachments(), 2);
    }

    #[test]
    fn test_stale_snapshot_is_rejected() {
        let mut listener = KeyListener::new(SCOPE);
        listener.sync(deps(true, 1));
        assert!(listener.accepts(SCOPE, &deps(true, 1)));
        assert!(!listener.accepts(SCOPE, &deps(true, 2)));
    }

    #[test]
    fn test_foreign_origin_is_rejected() {
        let mut listener = KeyListener::new(SCOPE);
        listener.sync(deps(false, 0));
        assert!(!listener.accepts(WidgetId::new(2), &deps(false, 0)));
    }

    #[test]
    fn test_detach_is_idempotent() {
        let mut listener = KeyListener::new(SCOPE);
        listener.sync(deps(false, 0));
        listener.detach();
        listener.detach();
        assert!(!listener.is_attached());
        assert!(!listener.accepts(SCOPE, &deps(false, 0)));
    }

    #[test]
    fn test_suspended_listener_ignores_sync() {
        let mut listener = KeyListener::new(SCOPE);
        listener.sync(deps(false, 0));
        listener.suspend();
        assert!(listener.is_suspended());
        assert!(!listener.is_attached());

        assert!(!listener.sync(deps(true, 0)));
        assert!(!listener.accepts(SCOPE, &deps(true, 0)));
        assert_eq!(listener.attachments(), 1);

        listener.rescope(WidgetId::new(9));
        assert!(!listener.sync(deps(true, 0)));

        listener.resume();
        assert!(listener.sync(deps(true, 0)));
        assert!(listener.accepts(WidgetId::new(9), &deps(true, 0)));
    }

    #[test]
    fn test_rescope_detaches() {
        let mut listener = KeyListener::new(SCOPE);
        listener.sync(deps(false, 0));
        listener.rescope(WidgetId::new(9));
        assert_eq!(listener.scope(), WidgetId::new(9));
        assert!(!listener.is_attached());

        listener.sync(deps(false, 0));
        listener.rescope(WidgetId::new(9));
        assert!(listener.is_attached());
    }
}
