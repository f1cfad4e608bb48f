//! Driving a select with crossterm events.

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use selectbox_core::{Rect, Size, Widget};
use selectbox_terminal::InputHandler;
use selectbox_widgets::{OptionList, Select, SingleSelectionChanged};

fn press(code: KeyCode) -> CrosstermEvent {
    CrosstermEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn click(column: u16, row: u16) -> CrosstermEvent {
    CrosstermEvent::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

#[test]
fn keyboard_selection_through_terminal_events() {
    let mut select = Select::single(OptionList::from_labels(["Red", "Green", "Blue"]));
    select.layout(Rect::new(0.0, 0.0, 200.0, 32.0));

    let mut input = InputHandler::new();
    input.set_focus(Some(select.widget_id()));

    let mut messages = Vec::new();
    for code in [KeyCode::Enter, KeyCode::Down, KeyCode::Char(' ')] {
        let event = input.convert(press(code)).unwrap();
        messages.extend(select.event(&event));
    }

    assert_eq!(messages.len(), 1);
    let changed = messages.pop().unwrap().downcast::<SingleSelectionChanged>().unwrap();
    assert_eq!(changed.value.unwrap().label, "Green");
    assert!(!select.is_open());
}

#[test]
fn focus_on_another_widget_leaves_select_alone() {
    let mut select = Select::single(OptionList::from_labels(["Red"]));
    let other = Select::single(OptionList::from_labels(["Blue"]));

    let mut input = InputHandler::new();
    input.set_focus(Some(other.widget_id()));
    let event = input.convert(press(KeyCode::Enter)).unwrap();
    select.event(&event);
    assert!(!select.is_open());
}

#[test]
fn mouse_cells_hit_rows() {
    let mut select = Select::single(OptionList::from_labels(["Red", "Green", "Blue"]));
    // 10x16 cells: a 20x2 cell header
    select.layout(Rect::new(0.0, 0.0, 200.0, 32.0));
    let input = InputHandler::new().with_cell_size(Size::new(10.0, 16.0));

    select.event(&input.convert(click(5, 1)).unwrap());
    assert!(select.is_open());

    // Terminal row 3 lies in the first option row (y 32..64)
    let message = select.event(&input.convert(click(5, 3)).unwrap()).unwrap();
    let changed = message.downcast::<SingleSelectionChanged>().unwrap();
    assert_eq!(changed.value.unwrap().label, "Red");
    assert!(!select.is_open());

    select.event(&input.convert(click(5, 1)).unwrap());
    select.event(&input.convert(CrosstermEvent::FocusLost).unwrap());
    assert!(!select.is_open());
}
