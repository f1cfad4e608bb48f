//! Input events for widgets.

use crate::geometry::Point;
use crate::widget::WidgetId;
use serde::{Deserialize, Serialize};

/// Input event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Mouse moved to position
    MouseMove {
        /// New position
        position: Point,
    },
    /// Mouse button pressed
    MouseDown {
        /// Position of click
        position: Point,
        /// Button pressed
        button: MouseButton,
    },
    /// Mouse button released
    MouseUp {
        /// Position of release
        position: Point,
        /// Button released
        button: MouseButton,
    },
    /// Key pressed
    KeyDown {
        /// Key pressed
        key: Key,
        /// Widget whose focus container the key was pressed in.
        ///
        /// `None` means the runtime routed the event straight to the
        /// receiving widget.
        target: Option<WidgetId>,
    },
    /// Widget gained focus
    FocusIn,
    /// Widget lost focus
    FocusOut,
    /// Mouse left widget bounds
    MouseLeave,
}

impl Event {
    /// Key press routed directly to the receiving widget.
    #[must_use]
    pub const fn key(key: Key) -> Self {
        Self::KeyDown { key, target: None }
    }

    /// Key press observed inside the focus container of `target`.
    #[must_use]
    pub const fn key_in(key: Key, target: WidgetId) -> Self {
        Self::KeyDown {
            key,
            target: Some(target),
        }
    }

    /// Left button press at `position`.
    #[must_use]
    pub const fn click(position: Point) -> Self {
        Self::MouseDown {
            position,
            button: MouseButton::Left,
        }
    }

    /// Check if this is a mouse event.
    #[must_use]
    pub const fn is_mouse(&self) -> bool {
        matches!(
            self,
            Self::MouseMove { .. } | Self::MouseDown { .. } | Self::MouseUp { .. } | Self::MouseLeave
        )
    }

    /// Check if this is a keyboard event.
    #[must_use]
    pub const fn is_keyboard(&self) -> bool {
        matches!(self, Self::KeyDown { .. })
    }

    /// Check if this is a focus event.
    #[must_use]
    pub const fn is_focus(&self) -> bool {
        matches!(self, Self::FocusIn | Self::FocusOut)
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Primary button
    Left,
    /// Secondary button
    Right,
    /// Wheel button
    Middle,
}

/// Keyboard keys the widgets distinguish between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Enter / Return
    Enter,
    /// Space bar
    Space,
    /// Escape
    Escape,
    /// Tab
    Tab,
    /// Backspace
    Backspace,
    /// Delete
    Delete,
    /// Arrow up
    Up,
    /// Arrow down
    Down,
    /// Arrow left
    Left,
    /// Arrow right
    Right,
    /// Home
    Home,
    /// End
    End,
    /// Page up
    PageUp,
    /// Page down
    PageDown,
    /// Any printable character
    Char(char),
}

impl Key {
    /// Parse a physical key code name as reported by web runtimes
    /// (`"Enter"`, `"Space"`, `"ArrowDown"`, ...).
    ///
    /// Returns `None` for codes without a mapping.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let key = match code {
            "Enter" => Self::Enter,
            "Space" => Self::Space,
            "Escape" => Self::Escape,
            "Tab" => Self::Tab,
            "Backspace" => Self::Backspace,
            "Delete" => Self::Delete,
            "ArrowUp" => Self::Up,
            "ArrowDown" => Self::Down,
            "ArrowLeft" => Self::Left,
            "ArrowRight" => Self::Right,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            _ => {
                let letter = code.strip_prefix("Key").or_else(|| code.strip_prefix("Digit"))?;
                let mut chars = letter.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c.to_ascii_lowercase()),
                    _ => return None,
                }
            }
        };
        Some(key)
    }
}
