//! Widget trait and related types.
//!
//! Widgets follow a measure-layout-paint cycle driven by the host runtime:
//!
//! 1. **Measure**: compute intrinsic size given constraints
//! 2. **Layout**: record the bounds allocated by the parent
//! 3. **Paint**: emit draw calls onto a [`Canvas`]
//!
//! Input reaches a widget through [`Widget::event`], which may return a
//! message for the host to downcast.
//!
//! ```
//! use selectbox_core::{TypeId, WidgetId};
//!
//! let id = WidgetId::new(42);
//! assert_eq!(id.0, 42);
//! assert_ne!(TypeId::of::<String>(), TypeId::of::<i32>());
//! ```

use crate::constraints::Constraints;
use crate::event::Event;
use crate::geometry::{Point, Rect, Size};
use crate::Color;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a widget instance.
///
/// Also names the widget's focus container when routing keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Create a new widget ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Allocate an ID not handed out by any earlier call in this process.
    #[must_use]
    pub fn unique() -> Self {
        Self(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Type identifier for widget types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(std::any::TypeId);

impl TypeId {
    /// Get the type ID for a type.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self(std::any::TypeId::of::<T>())
    }
}

/// Result of laying out a widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutResult {
    /// Computed size after layout
    pub size: Size,
}

/// Core widget trait that all UI elements implement.
pub trait Widget: Send + Sync {
    /// Get the type identifier for this widget type.
    fn type_id(&self) -> TypeId;

    /// Compute intrinsic size constraints.
    fn measure(&self, constraints: Constraints) -> Size;

    /// Record the allocated bounds.
    fn layout(&mut self, bounds: Rect) -> LayoutResult;

    /// Generate draw commands for rendering.
    fn paint(&self, canvas: &mut dyn Canvas);

    /// Handle an input event, optionally producing a message.
    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>>;

    /// Identifier of this widget's focus container, if it has one.
    fn id(&self) -> Option<WidgetId> {
        None
    }

    /// Check if this widget is interactive (can receive focus/events).
    fn is_interactive(&self) -> bool {
        false
    }

    /// Check if this widget can receive keyboard focus.
    fn is_focusable(&self) -> bool {
        false
    }

    /// Get the accessible name for screen readers.
    fn accessible_name(&self) -> Option<&str> {
        None
    }

    /// Get the accessible role.
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Generic
    }

    /// Get the test ID for this widget (if any).
    fn test_id(&self) -> Option<&str> {
        None
    }

    /// Get the current bounds of this widget.
    fn bounds(&self) -> Rect {
        Rect::default()
    }
}

/// Canvas trait for paint operations.
///
/// This is a minimal abstraction over the rendering backend.
pub trait Canvas {
    /// Draw a filled rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a stroked rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);

    /// Draw text with its top-left corner at `position`.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);

    /// Draw a line between two points.
    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32);

    /// Restrict subsequent drawing to `rect`.
    fn push_clip(&mut self, rect: Rect);

    /// Pop the clip region.
    fn pop_clip(&mut self);
}

/// Text style for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
    /// Font weight
    pub weight: FontWeight,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 16.0,
            color: Color::BLACK,
            weight: FontWeight::Normal,
        }
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontWeight {
    /// Normal (400)
    #[default]
    Normal,
    /// Bold (700)
    Bold,
}

/// Accessible role for screen readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccessibleRole {
    /// Generic element
    #[default]
    Generic,
    /// Button
    Button,
    /// List box
    ListBox,
    /// Option within a list box
    Option,
    /// Combo box / dropdown select
    ComboBox,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_id_eq_and_hash() {
        use std::collections::HashSet;
        let set: HashSet<_> = [WidgetId::new(1), WidgetId::new(1), WidgetId::new(2)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&WidgetId::new(2)));
    }

    #[test]
    fn test_widget_id_unique() {
        let a = WidgetId::unique();
        let b = WidgetId::unique();
        assert_ne!(a, b);
    }

    #[test]
    fn test_type_id() {
        assert_eq!(TypeId::of::<u32>(), TypeId::of::<u32>());
        assert_ne!(TypeId::of::<u32>(), TypeId::of::<String>());
    }

    #[test]
    fn test_text_style_default() {
        let style = TextStyle::default();
        assert_eq!(style.size, 16.0);
        assert_eq!(style.color, Color::BLACK);
        assert_eq!(style.weight, FontWeight::Normal);
    }

    #[test]
    fn test_accessible_role_default() {
        assert_eq!(AccessibleRole::default(), AccessibleRole::Generic);
    }
}
