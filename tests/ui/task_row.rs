use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{buffer::Buffer, layout::Rect, style::Modifier};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};
use swipetodo::config::Config;
use swipetodo::gesture::SwipeState;
use swipetodo::theme::{ColorMode, DefaultTheme, ThemeResolver};
use swipetodo::ui::components::{CheckedState, LabelMode, RowEvent, RowRegion, TaskRow, TaskRowCallbacks, TaskRowProps};

const AREA: Rect = Rect {
    x: 0,
    y: 0,
    width: 20,
    height: 1,
};

fn ms(t0: Instant, millis: u64) -> Instant {
    t0 + Duration::from_millis(millis)
}

fn mouse(kind: MouseEventKind, column: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row: 0,
        modifiers: KeyModifiers::NONE,
    }
}

/// Counts of each callback a row fired
#[derive(Default)]
struct Fired {
    toggles: Cell<u32>,
    label_presses: Cell<u32>,
    removes: Cell<u32>,
    subjects: RefCell<Vec<String>>,
    finishes: Cell<u32>,
}

fn counting_callbacks(fired: &Rc<Fired>) -> TaskRowCallbacks {
    let (a, b, c, d, e) = (fired.clone(), fired.clone(), fired.clone(), fired.clone(), fired.clone());
    TaskRowCallbacks::new()
        .on_toggle_checkbox(move || a.toggles.set(a.toggles.get() + 1))
        .on_press_label(move || b.label_presses.set(b.label_presses.get() + 1))
        .on_remove(move || c.removes.set(c.removes.get() + 1))
        .on_change_subject(move |subject| d.subjects.borrow_mut().push(subject.to_string()))
        .on_finish_editing(move || e.finishes.set(e.finishes.get() + 1))
}

fn row(props: TaskRowProps, t0: Instant) -> (TaskRow, Rc<Fired>) {
    let fired = Rc::new(Fired::default());
    let mut row = TaskRow::new(props, counting_callbacks(&fired), &Config::default(), t0);
    row.set_width(AREA.width);
    (row, fired)
}

fn swipe(row: &mut TaskRow, to: u16, t0: Instant) -> Vec<RowEvent> {
    row.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 19), AREA, t0);
    row.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 16), AREA, ms(t0, 100));
    row.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), to), AREA, ms(t0, 400));
    row.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), to), AREA, ms(t0, 800))
}

#[test]
fn test_tapping_checkbox_toggles_once() {
    let t0 = Instant::now();
    let (mut row, fired) = row(TaskRowProps::new("Buy milk"), t0);

    row.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 2), AREA, t0);
    let events = row.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 2), AREA, ms(t0, 50));

    assert_eq!(events, vec![RowEvent::ToggleCheckbox]);
    assert_eq!(row.checked(), CheckedState::Checked);
    assert_eq!(fired.toggles.get(), 1);
    assert_eq!(fired.removes.get(), 0);
}

#[test]
fn test_long_swipe_removes_row() {
    let t0 = Instant::now();
    let (mut row, fired) = row(TaskRowProps::new("Buy milk"), t0);

    let events = swipe(&mut row, 3, t0);
    assert_eq!(events, vec![RowEvent::Remove]);
    assert_eq!(fired.removes.get(), 1);
    assert_eq!(fired.toggles.get(), 0);

    row.tick(ms(t0, 2_000));
    assert_eq!(row.swipe_state(), SwipeState::Idle { offset: -20.0 });
    assert_eq!(row.offset(ms(t0, 2_000)), -20.0);
}

#[test]
fn test_short_swipe_snaps_back() {
    let t0 = Instant::now();
    let (mut row, fired) = row(TaskRowProps::new("Buy milk"), t0);

    let events = swipe(&mut row, 15, t0);
    assert!(events.is_empty());
    assert_eq!(row.swipe_state(), SwipeState::Cancelling);

    row.tick(ms(t0, 2_000));
    assert_eq!(row.offset(ms(t0, 2_000)), 0.0);
    assert_eq!(fired.removes.get(), 0);
}

#[test]
fn test_missing_callbacks_are_skipped() {
    let t0 = Instant::now();
    let mut row = TaskRow::new(TaskRowProps::new("Buy milk"), TaskRowCallbacks::new(), &Config::default(), t0);
    row.set_width(AREA.width);

    assert_eq!(row.press_checkbox(t0), vec![RowEvent::ToggleCheckbox]);
    assert_eq!(row.press_label(), vec![RowEvent::PressLabel]);
    assert_eq!(swipe(&mut row, 2, ms(t0, 10)), vec![RowEvent::Remove]);
}

#[test]
fn test_editing_flow() {
    let t0 = Instant::now();
    let (mut row, fired) = row(TaskRowProps::new("Buy milk"), t0);

    assert_eq!(row.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), t0), vec![RowEvent::PressLabel]);
    assert_eq!(fired.label_presses.get(), 1);
    assert_eq!(row.label_mode(), LabelMode::Display);

    row.set_props(TaskRowProps::new("Buy milk").editing(true), t0);
    assert_eq!(row.label_mode(), LabelMode::Editing);
    assert_eq!(row.label().field().text, "Buy milk");

    for c in " now".chars() {
        row.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE), t0);
    }
    assert_eq!(fired.subjects.borrow().last().map(String::as_str), Some("Buy milk now"));
    assert_eq!(fired.subjects.borrow().len(), 4);
    // Space goes to the text field, not the checkbox
    assert_eq!(fired.toggles.get(), 0);

    assert_eq!(row.blur(), vec![RowEvent::FinishEditing]);
    assert!(row.blur().is_empty());
    assert_eq!(fired.finishes.get(), 1);
}

#[test]
fn test_space_toggles_when_not_editing() {
    let t0 = Instant::now();
    let (mut row, fired) = row(TaskRowProps::new("Buy milk"), t0);
    row.handle_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE), t0);
    row.handle_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE), t0);
    assert_eq!(fired.toggles.get(), 2);
    assert_eq!(row.checked(), CheckedState::Unchecked);
}

#[test]
fn test_regions() {
    let t0 = Instant::now();
    let (row, _) = row(TaskRowProps::new("Buy milk"), t0);
    assert_eq!(row.region_at(0, 20), RowRegion::Padding);
    assert_eq!(row.region_at(1, 20), RowRegion::Checkbox);
    assert_eq!(row.region_at(4, 20), RowRegion::Checkbox);
    assert_eq!(row.region_at(5, 20), RowRegion::Label);
    assert_eq!(row.region_at(19, 20), RowRegion::Padding);
}

#[test]
fn test_render_at_rest_hides_backdrop() {
    let t0 = Instant::now();
    let (row, _) = row(TaskRowProps::new("Buy milk").done(true), t0);
    let colors = DefaultTheme.row_colors(ColorMode::Dark);

    let mut buf = Buffer::empty(AREA);
    row.render(AREA, &mut buf, &colors, t0);
    assert_eq!(buf[(1, 0)].symbol(), "[");
    assert_eq!(buf[(5, 0)].symbol(), "B");
    assert!(buf[(5, 0)].modifier.contains(Modifier::CROSSED_OUT));
    assert_eq!(buf[(18, 0)].symbol(), " ");
    assert_eq!(buf[(18, 0)].bg, colors.background);
}

#[test]
fn test_render_while_dragging_reveals_backdrop() {
    let t0 = Instant::now();
    let (mut row, _) = row(TaskRowProps::new("Buy milk"), t0);
    let colors = DefaultTheme.row_colors(ColorMode::Dark);

    row.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 19), AREA, t0);
    row.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 16), AREA, ms(t0, 10));
    row.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 15), AREA, ms(t0, 20));
    assert_eq!(row.offset(ms(t0, 20)), -4.0);

    let mut buf = Buffer::empty(AREA);
    row.render(AREA, &mut buf, &colors, ms(t0, 20));
    // The front moved four columns left
    assert_eq!(buf[(1, 0)].symbol(), "B");
    assert_eq!(buf[(18, 0)].symbol(), "✕");
    assert_eq!(buf[(18, 0)].bg, colors.backdrop);
}

#[test]
fn test_host_cancel_mid_drag_does_not_remove() {
    let t0 = Instant::now();
    let (mut row, fired) = row(TaskRowProps::new("Buy milk"), t0);

    row.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 19), AREA, t0);
    row.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 2), AREA, ms(t0, 10));
    assert!(row.cancel_gesture(ms(t0, 20)).is_empty());
    assert!(row
        .handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 2), AREA, ms(t0, 30))
        .is_empty());

    row.tick(ms(t0, 1_000));
    assert_eq!(row.offset(ms(t0, 1_000)), 0.0);
    assert_eq!(fired.removes.get(), 0);
}

#[test]
fn test_reset_after_commit_returns_to_rest() {
    let t0 = Instant::now();
    let (mut row, fired) = row(TaskRowProps::new("Buy milk"), t0);

    swipe(&mut row, 2, t0);
    row.tick(ms(t0, 2_000));
    assert_eq!(row.offset(ms(t0, 2_000)), -20.0);

    row.reset_swipe(ms(t0, 2_000));
    assert_eq!(row.swipe_state(), SwipeState::default());
    assert_eq!(row.offset(ms(t0, 2_000)), 0.0);

    // The row can be swiped again
    assert_eq!(swipe(&mut row, 2, ms(t0, 3_000)), vec![RowEvent::Remove]);
    assert_eq!(fired.removes.get(), 2);
}
