//! Input handling for terminal applications.

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, MouseButton as CtMouseButton,
    MouseEvent, MouseEventKind,
};
use selectbox_core::{Event, Key, MouseButton, Point, Size, WidgetId};
use tracing::trace;

/// Converts crossterm events to widget events.
///
/// Mouse cells are scaled by the cell size, so widgets can be laid out in
/// the same units they are painted in. Key events are addressed to the
/// focused container when one is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputHandler {
    cell_size: Size,
    focus: Option<WidgetId>,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self {
            cell_size: Size::new(1.0, 1.0),
            focus: None,
        }
    }
}

impl InputHandler {
    /// Create a handler with 1x1 cells and no focus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size of one terminal cell in layout units.
    #[must_use]
    pub fn with_cell_size(mut self, cell_size: Size) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Size of one terminal cell.
    #[must_use]
    pub const fn cell_size(&self) -> Size {
        self.cell_size
    }

    /// Address subsequent key events to `focus`, or route them directly
    /// when `None`.
    pub fn set_focus(&mut self, focus: Option<WidgetId>) {
        self.focus = focus;
    }

    /// Focused container, if any.
    #[must_use]
    pub const fn focus(&self) -> Option<WidgetId> {
        self.focus
    }

    /// Convert a crossterm event. Events widgets do not consume yield `None`.
    #[must_use]
    pub fn convert(&self, event: CrosstermEvent) -> Option<Event> {
        match event {
            CrosstermEvent::Key(key) => self.convert_key(key),
            CrosstermEvent::Mouse(mouse) => self.convert_mouse(mouse),
            CrosstermEvent::FocusGained => Some(Event::FocusIn),
            CrosstermEvent::FocusLost => Some(Event::FocusOut),
            other => {
                trace!(event = ?other, "terminal event ignored");
                None
            }
        }
    }

    fn convert_key(&self, key: KeyEvent) -> Option<Event> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let key = match key.code {
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Tab | KeyCode::BackTab => Key::Tab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Char(' ') => Key::Space,
            KeyCode::Char(c) => Key::Char(c),
            // Unknown keys are ignored
            _ => return None,
        };

        Some(Event::KeyDown {
            key,
            target: self.focus,
        })
    }

    fn convert_mouse(&self, mouse: MouseEvent) -> Option<Event> {
        let position = Point::new(
            f32::from(mouse.column) * self.cell_size.width,
            f32::from(mouse.row) * self.cell_size.height,
        );

        let event = match mouse.kind {
            MouseEventKind::Down(button) => Event::MouseDown {
                position,
                button: convert_button(button),
            },
            MouseEventKind::Up(button) => Event::MouseUp {
                position,
                button: convert_button(button),
            },
            MouseEventKind::Moved | MouseEventKind::Drag(_) => Event::MouseMove { position },
            MouseEventKind::ScrollUp
            | MouseEventKind::ScrollDown
            | MouseEventKind::ScrollLeft
            | MouseEventKind::ScrollRight => return None,
        };
        Some(event)
    }
}

const fn convert_button(button: CtMouseButton) -> MouseButton {
    match button {
        CtMouseButton::Left => MouseButton::Left,
        CtMouseButton::Right => MouseButton::Right,
        CtMouseButton::Middle => MouseButton::Middle,
    }
}
