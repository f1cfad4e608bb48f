//! Select/Dropdown widget for choosing one or many options.

use crate::controller::SelectionController;
use crate::mode::{Multiple, SelectionMode, Single};
use crate::option::{OptionList, OptionRef, SelectedSet};
use selectbox_core::{
    widget::{AccessibleRole, LayoutResult, TextStyle},
    Canvas, Color, Constraints, Event, MouseButton, Point, Rect, Size, TypeId, Widget, WidgetId,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Width of the clear control and of the caret box.
const CONTROL_WIDTH: f32 = 24.0;
/// Horizontal text padding.
const PADDING: f32 = 8.0;
/// Vertical inset of badges inside the header.
const BADGE_INSET: f32 = 4.0;
/// Gap between badges.
const BADGE_GAP: f32 = 4.0;
/// Glyph on the clear control and on badge remove controls.
const REMOVE_GLYPH: &str = "×";
/// Mark drawn on selected rows.
const SELECTED_MARK: &str = "✓";

/// Message emitted when a committed interaction changes the selection.
///
/// Carries the same value the change handler received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChanged<V> {
    /// Proposed new selection value
    pub value: V,
}

/// Message type of a single select.
pub type SingleSelectionChanged = SelectionChanged<Option<OptionRef>>;

/// Message type of a multiple select.
pub type MultipleSelectionChanged = SelectionChanged<Vec<OptionRef>>;

/// Colors and font size of a select.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectStyle {
    /// Header and list background
    pub background: Color,
    /// Header and list border
    pub border: Color,
    /// Label color
    pub text: Color,
    /// Placeholder color
    pub placeholder: Color,
    /// Highlighted row background
    pub highlighted: Color,
    /// Selected row background
    pub selected: Color,
    /// Badge background
    pub badge: Color,
    /// Divider between clear control and caret
    pub divider: Color,
    /// Background when disabled
    pub disabled: Color,
    /// Font size in pixels
    pub font_size: f32,
}

impl Default for SelectStyle {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            border: Color::new(0.8, 0.8, 0.8, 1.0),
            text: Color::BLACK,
            placeholder: Color::new(0.6, 0.6, 0.6, 1.0),
            highlighted: Color::new(0.85, 0.92, 1.0, 1.0),
            selected: Color::new(0.95, 0.95, 0.95, 1.0),
            badge: Color::new(0.9, 0.9, 0.9, 1.0),
            divider: Color::new(0.8, 0.8, 0.8, 1.0),
            disabled: Color::new(0.7, 0.7, 0.7, 1.0),
            font_size: 16.0,
        }
    }
}

/// Select/Dropdown widget.
///
/// The widget is controlled: it shows the value the host last supplied and
/// reports proposed changes both through the change handler and as a
/// [`SelectionChanged`] message from [`Widget::event`]. The host adopts a
/// change by passing it back through [`Select::set_value`].
#[derive(Debug)]
pub struct Select<M: SelectionMode> {
    controller: SelectionController<M>,
    id: WidgetId,
    placeholder: String,
    disabled: bool,
    min_width: f32,
    item_height: f32,
    max_visible_items: usize,
    style: SelectStyle,
    test_id_value: Option<String>,
    accessible_name_value: Option<String>,
    bounds: Rect,
    /// Index of the first visible row
    scroll_offset: usize,
}

impl Select<Single> {
    /// Create a single-choice select.
    #[must_use]
    pub fn single(options: impl Into<OptionList>) -> Self {
        Self::new(options)
    }
}

impl Select<Multiple> {
    /// Create a multiple-choice select.
    #[must_use]
    pub fn multiple(options: impl Into<OptionList>) -> Self {
        Self::new(options)
    }
}

impl<M: SelectionMode> Select<M> {
    /// Create a select with an empty value.
    #[must_use]
    pub fn new(options: impl Into<OptionList>) -> Self {
        let id = WidgetId::unique();
        Self {
            controller: SelectionController::new(id, options.into(), M::cleared()),
            id,
            placeholder: "Select...".to_string(),
            disabled: false,
            min_width: 150.0,
            item_height: 32.0,
            max_visible_items: 8,
            style: SelectStyle::default(),
            test_id_value: None,
            accessible_name_value: None,
            bounds: Rect::default(),
            scroll_offset: 0,
        }
    }

    /// Set the initial value.
    #[must_use]
    pub fn value(mut self, value: M::Value) -> Self {
        self.controller.set_value(value);
        self
    }

    /// Set the change handler.
    #[must_use]
    pub fn on_change(mut self, handler: impl FnMut(M::Value) + Send + Sync + 'static) -> Self {
        self.controller.set_on_change(handler);
        self
    }

    /// Set placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Set disabled state.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.set_disabled(disabled);
        self
    }

    /// Set minimum width.
    #[must_use]
    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = width.max(50.0);
        self
    }

    /// Set row and header height.
    #[must_use]
    pub fn item_height(mut self, height: f32) -> Self {
        self.item_height = height.max(20.0);
        self
    }

    /// Set max visible rows in the open list.
    #[must_use]
    pub fn max_visible_items(mut self, count: usize) -> Self {
        self.max_visible_items = count.max(1);
        self
    }

    /// Set colors and font size.
    #[must_use]
    pub fn style(mut self, style: SelectStyle) -> Self {
        self.style = style;
        self
    }

    /// Use `id` as the focus container identity.
    #[must_use]
    pub fn with_id(mut self, id: WidgetId) -> Self {
        self.id = id;
        self.controller.set_scope(id);
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Set accessible name.
    #[must_use]
    pub fn with_accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name_value = Some(name.into());
        self
    }

    /// Enable or disable the widget. Disabling closes the list and stops
    /// keyboard handling.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.controller.close();
            self.controller.detach_keys();
        } else {
            self.controller.attach_keys();
        }
    }

    /// Re-supply the host's value.
    pub fn set_value(&mut self, value: M::Value) {
        self.controller.set_value(value);
    }

    /// Re-supply the option list.
    pub fn set_options(&mut self, options: impl Into<OptionList>) {
        self.controller.set_options(options.into());
        self.reveal_highlight();
    }

    /// Current value as last supplied by the host.
    #[must_use]
    pub fn get_value(&self) -> &M::Value {
        self.controller.value()
    }

    /// Labels of the selected options in selection order.
    #[must_use]
    pub fn selected_labels(&self) -> Vec<&str> {
        M::selected(self.controller.value())
            .iter()
            .map(|o| o.label.as_str())
            .collect()
    }

    /// All options.
    #[must_use]
    pub fn get_options(&self) -> &OptionList {
        self.controller.options()
    }

    /// Placeholder text.
    #[must_use]
    pub fn get_placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Check if the list is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.controller.is_open()
    }

    /// Highlighted row index.
    #[must_use]
    pub const fn highlighted_index(&self) -> usize {
        self.controller.highlighted_index()
    }

    /// Check if disabled.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Focus container identity.
    #[must_use]
    pub const fn widget_id(&self) -> WidgetId {
        self.id
    }

    /// Index of the first visible row.
    #[must_use]
    pub const fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// The underlying interaction controller.
    #[must_use]
    pub const fn controller(&self) -> &SelectionController<M> {
        &self.controller
    }

    /// Mutable access to the interaction controller.
    pub fn controller_mut(&mut self) -> &mut SelectionController<M> {
        &mut self.controller
    }

    /// Check if there are no options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controller.options().is_empty()
    }

    /// Number of options.
    #[must_use]
    pub fn option_count(&self) -> usize {
        self.controller.options().len()
    }

    fn char_width(&self) -> f32 {
        self.style.font_size * 0.6
    }

    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width()
    }

    fn text_y(&self, row: Rect) -> f32 {
        row.y + (row.height - self.style.font_size) / 2.0
    }

    fn header_rect(&self) -> Rect {
        Rect::new(
            self.bounds.x,
            self.bounds.y,
            self.bounds.width,
            self.item_height,
        )
    }

    fn caret_rect(&self) -> Rect {
        let header = self.header_rect();
        Rect::new(
            header.right() - CONTROL_WIDTH,
            header.y,
            CONTROL_WIDTH,
            header.height,
        )
    }

    fn clear_rect(&self) -> Rect {
        let caret = self.caret_rect();
        Rect::new(caret.x - CONTROL_WIDTH, caret.y, CONTROL_WIDTH, caret.height)
    }

    fn value_rect(&self) -> Rect {
        let header = self.header_rect();
        let right = self.clear_rect().x;
        Rect::new(
            header.x + PADDING,
            header.y,
            (right - header.x - PADDING).max(0.0),
            header.height,
        )
    }

    /// Badges that fit in the value area, left to right. Multiple mode only.
    fn badge_rects(&self) -> Vec<(Rect, &OptionRef)> {
        if !M::MULTIPLE {
            return Vec::new();
        }

        let area = self.value_rect();
        let height = (area.height - 2.0 * BADGE_INSET).max(0.0);
        let glyph = self.text_width(REMOVE_GLYPH);
        let mut x = area.x;
        let mut badges = Vec::new();

        for option in M::selected(self.controller.value()) {
            let width = self.text_width(&option.label) + glyph + 3.0 * PADDING;
            if x + width > area.right() {
                break;
            }
            badges.push((Rect::new(x, area.y + BADGE_INSET, width, height), option));
            x += width + BADGE_GAP;
        }
        badges
    }

    fn badge_at(&self, position: &Point) -> Option<OptionRef> {
        self.badge_rects()
            .into_iter()
            .find(|(rect, _)| rect.contains_point(position))
            .map(|(_, option)| OptionRef::clone(option))
    }

    fn visible_rows(&self) -> usize {
        self.option_count().min(self.max_visible_items)
    }

    fn dropdown_rect(&self) -> Rect {
        let header = self.header_rect();
        Rect::new(
            header.x,
            header.bottom(),
            header.width,
            self.visible_rows() as f32 * self.item_height,
        )
    }

    /// Rect of the `slot`-th visible row.
    fn row_rect(&self, slot: usize) -> Rect {
        let top = self.header_rect().bottom();
        Rect::new(
            self.bounds.x,
            (slot as f32).mul_add(self.item_height, top),
            self.bounds.width,
            self.item_height,
        )
    }

    /// Option index of the row under `position`, if the list is open.
    fn row_at(&self, position: &Point) -> Option<usize> {
        if !self.controller.is_open() {
            return None;
        }

        let dropdown = self.dropdown_rect();
        if !dropdown.contains_point(position) {
            return None;
        }

        let slot = ((position.y - dropdown.y) / self.item_height) as usize;
        let index = self.scroll_offset + slot;
        (slot < self.visible_rows() && index < self.option_count()).then_some(index)
    }

    /// Keep the highlighted row inside the visible window.
    fn reveal_highlight(&mut self) {
        if !self.controller.is_open() {
            self.scroll_offset = 0;
            return;
        }

        let visible = self.visible_rows();
        let highlighted = self.controller.highlighted_index();
        if highlighted < self.scroll_offset {
            self.scroll_offset = highlighted;
        } else if visible > 0 && highlighted >= self.scroll_offset + visible {
            self.scroll_offset = highlighted + 1 - visible;
        }
        self.scroll_offset = self
            .scroll_offset
            .min(self.option_count().saturating_sub(visible));
    }

    fn click(&mut self, position: Point) -> Option<M::Value> {
        if self.clear_rect().contains_point(&position) {
            return Some(self.controller.clear_selection());
        }

        if let Some(option) = self.badge_at(&position) {
            return self.controller.select_option(&option);
        }

        if self.header_rect().contains_point(&position) {
            self.controller.toggle_open();
            return None;
        }

        let row = self
            .row_at(&position)
            .and_then(|index| self.controller.options().get(index).cloned());
        if let Some(option) = row {
            let committed = self.controller.select_option(&option);
            self.controller.close();
            return committed;
        }

        // Anything else is a click outside the widget
        self.controller.close();
        None
    }

    fn text_style(&self, color: Color) -> TextStyle {
        TextStyle {
            size: self.style.font_size,
            color,
            ..Default::default()
        }
    }

    fn paint_value(&self, canvas: &mut dyn Canvas) {
        let area = self.value_rect();
        let selected = M::selected(self.controller.value());

        canvas.push_clip(area);
        if selected.is_empty() || !M::MULTIPLE {
            let (text, color) = selected.first().map_or(
                (self.placeholder.as_str(), self.style.placeholder),
                |o| (o.label.as_str(), self.style.text),
            );
            let color = if self.disabled { self.style.disabled } else { color };
            canvas.draw_text(
                text,
                Point::new(area.x, self.text_y(area)),
                &self.text_style(color),
            );
        } else {
            let glyph = self.text_width(REMOVE_GLYPH);
            let style = self.text_style(self.style.text);
            for (rect, option) in self.badge_rects() {
                canvas.fill_rect(rect, self.style.badge);
                canvas.stroke_rect(rect, self.style.border, 1.0);
                let y = self.text_y(rect);
                canvas.draw_text(&option.label, Point::new(rect.x + PADDING, y), &style);
                canvas.draw_text(
                    REMOVE_GLYPH,
                    Point::new(rect.right() - PADDING - glyph, y),
                    &style,
                );
            }
        }
        canvas.pop_clip();
    }

    fn paint_controls(&self, canvas: &mut dyn Canvas) {
        let clear = self.clear_rect();
        let glyph = self.text_width(REMOVE_GLYPH);
        canvas.draw_text(
            REMOVE_GLYPH,
            Point::new(clear.center().x - glyph / 2.0, self.text_y(clear)),
            &self.text_style(self.style.placeholder),
        );

        let caret = self.caret_rect();
        canvas.draw_line(
            Point::new(caret.x, caret.y + BADGE_INSET),
            Point::new(caret.x, caret.bottom() - BADGE_INSET),
            self.style.divider,
            1.0,
        );

        let center = caret.center();
        let arrow = Rect::new(center.x - 4.0, center.y - 3.0, 8.0, 6.0);
        canvas.fill_rect(arrow, self.style.text);
    }

    fn paint_rows(&self, canvas: &mut dyn Canvas) {
        let dropdown = self.dropdown_rect();
        canvas.fill_rect(dropdown, self.style.background);
        canvas.stroke_rect(dropdown, self.style.border, 1.0);

        let selected = SelectedSet::from_selected(M::selected(self.controller.value()));
        let highlighted = self.controller.highlighted_index();
        let style = self.text_style(self.style.text);
        let mark = self.text_width(SELECTED_MARK);

        let options = self.controller.options().as_slice();
        let window = options
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(self.visible_rows());

        for (slot, (index, option)) in window.enumerate() {
            let rect = self.row_rect(slot);
            let is_selected = selected.contains(option);
            let background = if index == highlighted {
                self.style.highlighted
            } else if is_selected {
                self.style.selected
            } else {
                self.style.background
            };
            canvas.fill_rect(rect, background);

            let y = self.text_y(rect);
            canvas.draw_text(&option.label, Point::new(rect.x + PADDING, y), &style);
            if is_selected {
                canvas.draw_text(
                    SELECTED_MARK,
                    Point::new(rect.right() - PADDING - mark, y),
                    &style,
                );
            }
        }
    }
}

impl<M: SelectionMode> Widget for Select<M> {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(self.min_width, self.item_height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let header = self.header_rect();
        let background = if self.disabled {
            self.style.disabled
        } else {
            self.style.background
        };
        canvas.fill_rect(header, background);
        canvas.stroke_rect(header, self.style.border, 1.0);

        self.paint_value(canvas);
        self.paint_controls(canvas);

        if self.controller.is_open() && !self.is_empty() {
            self.paint_rows(canvas);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if self.disabled {
            return None;
        }

        let committed = match event {
            Event::MouseMove { position } => {
                if let Some(index) = self.row_at(position) {
                    self.controller.highlight(index);
                }
                None
            }
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => self.click(*position),
            Event::FocusOut => {
                self.controller.close();
                None
            }
            Event::KeyDown { key, target } => self
                .controller
                .handle_key(*key, target.unwrap_or(self.id)),
            _ => None,
        };

        self.reveal_highlight();
        committed.map(|value| Box::new(SelectionChanged { value }) as Box<dyn Any + Send>)
    }

    fn id(&self) -> Option<WidgetId> {
        Some(self.id)
    }

    fn is_interactive(&self) -> bool {
        !self.disabled
    }

    fn is_focusable(&self) -> bool {
        !self.disabled
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value.as_deref()
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::ComboBox
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
