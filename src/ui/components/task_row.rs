//! Swipeable task row
//!
//! Lays out a fixed-width checkbox and a flexible label over a swipeable
//! surface, with the delete backdrop underneath. The row reads its props and
//! reports user intent through optional callbacks; the only state it owns is
//! the checkbox's local checked flag and the transient swipe offset.

use super::checkbox::{CheckboxToggle, CheckedState};
use super::editable_label::{EditableLabel, LabelEvent, LabelMode};
use crate::config::Config;
use crate::constants::{CHECKBOX_WIDTH, GLYPH_TRASH, ROW_PADDING_X};
use crate::gesture::{GestureResponse, SimultaneousHandlers, SwipeEngine, SwipeState};
use crate::theme::RowColors;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};
use std::time::{Duration, Instant};

/// Immutable description of one row, owned by the parent list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskRowProps {
    pub subject: String,
    pub is_done: bool,
    pub is_editing: bool,
}

impl TaskRowProps {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..Default::default()
        }
    }

    pub fn done(mut self, is_done: bool) -> Self {
        self.is_done = is_done;
        self
    }

    pub fn editing(mut self, is_editing: bool) -> Self {
        self.is_editing = is_editing;
        self
    }
}

type Callback = Box<dyn FnMut()>;

/// Optional callbacks; any that are absent are skipped
#[derive(Default)]
pub struct TaskRowCallbacks {
    pub on_toggle_checkbox: Option<Callback>,
    pub on_press_label: Option<Callback>,
    pub on_remove: Option<Callback>,
    pub on_change_subject: Option<Box<dyn FnMut(&str)>>,
    pub on_finish_editing: Option<Callback>,
}

impl TaskRowCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_toggle_checkbox(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_toggle_checkbox = Some(Box::new(f));
        self
    }

    pub fn on_press_label(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_press_label = Some(Box::new(f));
        self
    }

    pub fn on_remove(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_remove = Some(Box::new(f));
        self
    }

    pub fn on_change_subject(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_change_subject = Some(Box::new(f));
        self
    }

    pub fn on_finish_editing(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_finish_editing = Some(Box::new(f));
        self
    }
}

/// A callback the row fired
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowEvent {
    ToggleCheckbox,
    PressLabel,
    Remove,
    ChangeSubject(String),
    FinishEditing,
}

/// Regions of the row content, in row-local columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRegion {
    Checkbox,
    Label,
    Padding,
}

pub struct TaskRow {
    props: TaskRowProps,
    checkbox: CheckboxToggle,
    label: EditableLabel,
    swipe: SwipeEngine,
    on_toggle_checkbox: Option<Callback>,
    on_press_label: Option<Callback>,
    on_change_subject: Option<Box<dyn FnMut(&str)>>,
    on_finish_editing: Option<Callback>,
    /// Left edge of the row's area during the current pointer sequence
    origin: (u16, u16),
}

impl std::fmt::Debug for TaskRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskRow")
            .field("props", &self.props)
            .field("checkbox", &self.checkbox)
            .field("swipe", &self.swipe)
            .finish_non_exhaustive()
    }
}

impl TaskRow {
    pub fn new(props: TaskRowProps, callbacks: TaskRowCallbacks, config: &Config, now: Instant) -> Self {
        let TaskRowCallbacks {
            on_toggle_checkbox,
            on_press_label,
            on_remove,
            on_change_subject,
            on_finish_editing,
        } = callbacks;

        let checkbox = CheckboxToggle::new(
            props.is_done,
            config.checkbox.reconcile,
            Duration::from_millis(config.checkbox.animation_ms),
            now,
        );

        let mut label = EditableLabel::new(
            config.label.placeholder.clone(),
            Duration::from_millis(config.label.animation_ms),
            now,
        );
        label.sync_props(&props.subject, props.is_done, props.is_editing, now);
        label.finish_animation(now);

        let mut swipe = SwipeEngine::new(&config.swipe, now);
        swipe.set_on_swipe_left(on_remove);

        Self {
            props,
            checkbox,
            label,
            swipe,
            on_toggle_checkbox,
            on_press_label,
            on_change_subject,
            on_finish_editing,
            origin: (0, 0),
        }
    }

    /// Share gesture arbitration with the recognizers of an ancestor.
    pub fn with_simultaneous_handlers(mut self, handlers: SimultaneousHandlers) -> Self {
        self.swipe.attach(handlers);
        self
    }

    pub fn props(&self) -> &TaskRowProps {
        &self.props
    }

    pub fn checked(&self) -> CheckedState {
        self.checkbox.state()
    }

    pub fn checkbox(&self) -> &CheckboxToggle {
        &self.checkbox
    }

    pub fn label(&self) -> &EditableLabel {
        &self.label
    }

    pub fn label_mode(&self) -> LabelMode {
        self.label.mode()
    }

    pub fn swipe(&self) -> &SwipeEngine {
        &self.swipe
    }

    pub fn swipe_state(&self) -> SwipeState {
        self.swipe.state()
    }

    pub fn offset(&self, now: Instant) -> f32 {
        self.swipe.offset(now)
    }

    /// The parent re-rendered this row with new props.
    pub fn set_props(&mut self, props: TaskRowProps, now: Instant) {
        self.checkbox.sync_external(props.is_done, now);
        self.label.sync_props(&props.subject, props.is_done, props.is_editing, now);
        self.props = props;
    }

    pub fn set_width(&mut self, width: u16) {
        self.swipe.set_width(f32::from(width));
    }

    /// Which part of the row content a row-local column falls on
    pub fn region_at(&self, column: u16, width: u16) -> RowRegion {
        let label_start = ROW_PADDING_X + CHECKBOX_WIDTH;
        let label_end = width.saturating_sub(ROW_PADDING_X);
        if column >= ROW_PADDING_X && column < label_start {
            RowRegion::Checkbox
        } else if column >= label_start && column < label_end {
            RowRegion::Label
        } else {
            RowRegion::Padding
        }
    }

    pub fn press_checkbox(&mut self, now: Instant) -> Vec<RowEvent> {
        let state = self.checkbox.press(now);
        log::debug!("Checkbox for '{}' is now {:?}", self.props.subject, state);
        self.dispatch(RowEvent::ToggleCheckbox);
        vec![RowEvent::ToggleCheckbox]
    }

    pub fn press_label(&mut self) -> Vec<RowEvent> {
        let events = self.label.tap().into_iter().map(Self::from_label).collect();
        self.dispatch_all(events)
    }

    /// Focus left the text field, e.g. the user clicked elsewhere.
    pub fn blur(&mut self) -> Vec<RowEvent> {
        let events = self.label.blur().into_iter().map(Self::from_label).collect();
        self.dispatch_all(events)
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Vec<RowEvent> {
        if let Some(events) = self.label.handle_key(key) {
            let events = events.into_iter().map(Self::from_label).collect();
            return self.dispatch_all(events);
        }
        match key.code {
            KeyCode::Char(' ') => self.press_checkbox(now),
            KeyCode::Enter => self.press_label(),
            _ => Vec::new(),
        }
    }

    /// Mouse input in screen coordinates. `area` is where the row is drawn.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, area: Rect, now: Instant) -> Vec<RowEvent> {
        self.set_width(area.width);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.origin = (area.x, area.y);
                let (x, y) = self.local(mouse.column, mouse.row);
                let response = self.swipe.pointer_down(x, y, now);
                self.resolve(response, now)
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let (x, y) = self.local(mouse.column, mouse.row);
                let response = self.swipe.pointer_move(x, y, now);
                self.resolve(response, now)
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (x, y) = self.local(mouse.column, mouse.row);
                let response = self.swipe.pointer_up(x, y, now);
                self.resolve(response, now)
            }
            _ => Vec::new(),
        }
    }

    /// The host gave the pointer to another gesture.
    pub fn cancel_gesture(&mut self, now: Instant) -> Vec<RowEvent> {
        let response = self.swipe.cancel(now);
        self.resolve(response, now)
    }

    /// Advance the swipe animation.
    pub fn tick(&mut self, now: Instant) {
        self.swipe.tick(now);
    }

    /// Return to the resting position after a commit the parent declined.
    pub fn reset_swipe(&mut self, now: Instant) {
        self.swipe.reset(now);
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.swipe.is_animating(now)
            || self.swipe.state().is_dragging()
            || self.checkbox.is_animating(now)
            || self.label.is_animating(now)
    }

    fn local(&self, column: u16, row: u16) -> (f32, f32) {
        (
            f32::from(column) - f32::from(self.origin.0),
            f32::from(row) - f32::from(self.origin.1),
        )
    }

    fn resolve(&mut self, response: GestureResponse, now: Instant) -> Vec<RowEvent> {
        match response {
            GestureResponse::Committed => {
                log::info!("Swiped away '{}'", self.props.subject);
                vec![RowEvent::Remove]
            }
            GestureResponse::Cancelled => {
                log::debug!("Swipe on '{}' snapped back", self.props.subject);
                Vec::new()
            }
            GestureResponse::Tap { x, .. } => {
                let column = x.max(0.0) as u16;
                let width = self.swipe.width() as u16;
                match self.region_at(column, width) {
                    RowRegion::Checkbox => self.press_checkbox(now),
                    RowRegion::Label => self.press_label(),
                    RowRegion::Padding => Vec::new(),
                }
            }
            GestureResponse::None => Vec::new(),
        }
    }

    fn from_label(event: LabelEvent) -> RowEvent {
        match event {
            LabelEvent::PressLabel => RowEvent::PressLabel,
            LabelEvent::ChangeSubject(subject) => RowEvent::ChangeSubject(subject),
            LabelEvent::FinishEditing => RowEvent::FinishEditing,
        }
    }

    fn dispatch_all(&mut self, events: Vec<RowEvent>) -> Vec<RowEvent> {
        for event in &events {
            self.dispatch(event.clone());
        }
        events
    }

    fn dispatch(&mut self, event: RowEvent) {
        let callback: Option<&mut Callback> = match &event {
            RowEvent::ToggleCheckbox => self.on_toggle_checkbox.as_mut(),
            RowEvent::PressLabel => self.on_press_label.as_mut(),
            RowEvent::FinishEditing => self.on_finish_editing.as_mut(),
            RowEvent::ChangeSubject(subject) => {
                if let Some(callback) = self.on_change_subject.as_mut() {
                    callback(subject);
                }
                None
            }
            // Fired by the swipe engine as on_swipe_left.
            RowEvent::Remove => None,
        };
        if let Some(callback) = callback {
            callback();
        }
    }

    /// Draw the backdrop, then the front content shifted by the swipe offset.
    pub fn render(&self, area: Rect, buf: &mut Buffer, colors: &RowColors, now: Instant) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let area = Rect { height: 1, ..area };

        // Back view
        let backdrop = Style::default().bg(colors.backdrop).fg(colors.checkmark);
        buf.set_style(area, backdrop);
        let trash_x = area.right().saturating_sub(ROW_PADDING_X + 1).max(area.x);
        buf.set_string(trash_x, area.y, GLYPH_TRASH, backdrop.add_modifier(Modifier::BOLD));

        // Front view, drawn off-screen and copied in at the offset
        let shift = (-self.offset(now)).round().clamp(0.0, f32::from(area.width)) as u16;
        if shift >= area.width {
            return;
        }
        let front_area = Rect::new(0, 0, area.width, 1);
        let mut front = Buffer::empty(front_area);
        self.render_front(front_area, &mut front, colors, now);

        for column in shift..area.width {
            if let (Some(src), Some(dst)) = (
                front.cell((column, 0)),
                buf.cell_mut((area.x + column - shift, area.y)),
            ) {
                *dst = src.clone();
            }
        }
    }

    fn render_front(&self, area: Rect, buf: &mut Buffer, colors: &RowColors, now: Instant) {
        buf.set_style(area, Style::default().bg(colors.background));

        let checkbox_area = Rect::new(
            area.x + ROW_PADDING_X,
            area.y,
            CHECKBOX_WIDTH.min(area.width.saturating_sub(ROW_PADDING_X)),
            1,
        );
        self.checkbox.render(checkbox_area, buf, colors, now);

        let label_x = area.x + ROW_PADDING_X + CHECKBOX_WIDTH;
        let label_width = area.width.saturating_sub(label_x - area.x + ROW_PADDING_X);
        if label_width > 0 {
            self.label.render(Rect::new(label_x, area.y, label_width, 1), buf, colors, now);
        }
    }
}
