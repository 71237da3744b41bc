//! Task list hosting one [`TaskRow`] per task
//!
//! The list owns the tasks and is the only place they change. Rows report
//! intent through callbacks that send [`Action`]s over a channel; the list
//! drains it, updates its tasks, and re-renders the affected rows with new
//! props. Vertical drags scroll the list through a recognizer registered in
//! the same arbiter as the rows' swipe recognizers.

use super::task_row::{TaskRow, TaskRowCallbacks, TaskRowProps};
use crate::config::Config;
use crate::constants::{LOG_TASK_REMOVED, LOG_TASK_RENAMED, LOG_TASK_TOGGLED};
use crate::gesture::{Axis, HandlerId, PanEvent, PanRecognizer, SimultaneousHandlers, SwipeState};
use crate::logger::Logger;
use crate::theme::{ConfiguredTheme, DefaultTheme, ThemeResolver};
use crate::ui::core::{Action, Component, TaskId};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};
use std::collections::{HashMap, HashSet};
use std::time::Instant;
use tokio::sync::mpsc;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub subject: String,
    pub is_done: bool,
}

impl Task {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject: subject.into(),
            is_done: false,
        }
    }
}

pub struct TaskListComponent {
    tasks: Vec<Task>,
    rows: HashMap<TaskId, TaskRow>,
    /// Committed rows finishing their swipe animation before unmounting
    removing: HashSet<TaskId>,
    editing: Option<TaskId>,
    selected: usize,
    scroll_offset: usize,
    area: Rect,
    config: Config,
    theme: Box<dyn ThemeResolver>,
    handlers: SimultaneousHandlers,
    scroll: PanRecognizer,
    scroll_handler: HandlerId,
    scroll_origin: usize,
    /// Row under the pointer since the last button press, and its area
    pointer_row: Option<(TaskId, Rect)>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    logger: Logger,
}

impl TaskListComponent {
    pub fn new(config: Config, logger: Logger) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let handlers = SimultaneousHandlers::new();
        let scroll_handler = handlers.register(Axis::Vertical);
        let scroll = PanRecognizer::new(Axis::Vertical, config.swipe.activation_slop);
        let theme = Box::new(ConfiguredTheme::new(DefaultTheme, &config.theme));

        Self {
            tasks: Vec::new(),
            rows: HashMap::new(),
            removing: HashSet::new(),
            editing: None,
            selected: 0,
            scroll_offset: 0,
            area: Rect::default(),
            config,
            theme,
            handlers,
            scroll,
            scroll_handler,
            scroll_origin: 0,
            pointer_row: None,
            action_tx,
            action_rx,
            logger,
        }
    }

    pub fn with_theme(mut self, theme: Box<dyn ThemeResolver>) -> Self {
        self.theme = theme;
        self
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn row(&self, id: TaskId) -> Option<&TaskRow> {
        self.rows.get(&id)
    }

    pub fn editing(&self) -> Option<TaskId> {
        self.editing
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn handlers(&self) -> &SimultaneousHandlers {
        &self.handlers
    }

    /// Sender for actions the list should apply on its next update
    pub fn action_sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    /// Append a task and mount its row.
    pub fn add_task(&mut self, subject: impl Into<String>) -> TaskId {
        let task = Task::new(subject);
        let id = task.id;
        self.tasks.push(task);
        self.mount_row(id, Instant::now());
        id
    }

    fn props_for(&self, task: &Task) -> TaskRowProps {
        TaskRowProps {
            subject: task.subject.clone(),
            is_done: task.is_done,
            is_editing: self.editing == Some(task.id),
        }
    }

    fn mount_row(&mut self, id: TaskId, now: Instant) {
        let Some(task) = self.tasks.iter().find(|t| t.id == id) else {
            return;
        };
        let props = self.props_for(task);

        let send = |action: Action| {
            let tx = self.action_tx.clone();
            move || {
                let _ = tx.send(action.clone());
            }
        };
        let subject_tx = self.action_tx.clone();
        let callbacks = TaskRowCallbacks::new()
            .on_toggle_checkbox(send(Action::ToggleTask(id)))
            .on_press_label(send(Action::EditTask(id)))
            .on_remove(send(Action::RemoveTask(id)))
            .on_change_subject(move |subject| {
                let _ = subject_tx.send(Action::ChangeSubject {
                    id,
                    subject: subject.to_string(),
                });
            })
            .on_finish_editing(send(Action::FinishEditing(id)));

        let row = TaskRow::new(props, callbacks, &self.config, now).with_simultaneous_handlers(self.handlers.clone());
        if let Some(row_handler) = row.swipe().handler_id() {
            // Swiping a row must not starve list scrolling.
            self.handlers.allow_simultaneous(row_handler, self.scroll_handler);
        }
        self.rows.insert(id, row);
    }

    fn refresh_row(&mut self, id: TaskId, now: Instant) {
        let Some(props) = self.tasks.iter().find(|t| t.id == id).map(|t| self.props_for(t)) else {
            return;
        };
        if let Some(row) = self.rows.get_mut(&id) {
            row.set_props(props, now);
        }
    }

    fn remove_task(&mut self, id: TaskId) {
        self.rows.remove(&id);
        self.removing.remove(&id);
        if let Some(index) = self.tasks.iter().position(|t| t.id == id) {
            let task = self.tasks.remove(index);
            self.logger.log(format!("{}: {}", LOG_TASK_REMOVED, task.subject));
        }
        if self.editing == Some(id) {
            self.editing = None;
        }
        if self.pointer_row.is_some_and(|(pointer_id, _)| pointer_id == id) {
            self.pointer_row = None;
        }
        self.selected = self.selected.min(self.tasks.len().saturating_sub(1));
        self.scroll_offset = self.scroll_offset.min(self.tasks.len().saturating_sub(1));
    }

    fn start_editing(&mut self, id: TaskId, now: Instant) {
        if let Some(previous) = self.editing.filter(|previous| *previous != id) {
            if let Some(row) = self.rows.get_mut(&previous) {
                row.blur();
            }
            self.editing = None;
            self.refresh_row(previous, now);
        }
        self.editing = Some(id);
        self.refresh_row(id, now);
    }

    /// Apply one action coming from a row callback or a key binding.
    pub fn apply(&mut self, action: Action, now: Instant) -> Action {
        match action {
            Action::ToggleTask(id) => {
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                    task.is_done = !task.is_done;
                    let message = format!("{}: {} ({})", LOG_TASK_TOGGLED, task.subject, task.is_done);
                    self.logger.log(message);
                }
                self.refresh_row(id, now);
                Action::None
            }
            Action::EditTask(id) => {
                self.start_editing(id, now);
                Action::None
            }
            Action::ChangeSubject { id, subject } => {
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                    task.subject = subject;
                }
                self.refresh_row(id, now);
                Action::None
            }
            Action::FinishEditing(id) => {
                if self.editing == Some(id) {
                    self.editing = None;
                }
                let subject = self.tasks.iter().find(|t| t.id == id).map(|t| t.subject.trim().to_string());
                match subject {
                    Some(subject) if subject.is_empty() => self.remove_task(id),
                    Some(subject) => {
                        self.logger.log(format!("{}: {}", LOG_TASK_RENAMED, subject));
                        self.refresh_row(id, now);
                    }
                    None => {}
                }
                Action::None
            }
            Action::RemoveTask(id) => {
                // Unmounted once the commit animation settles.
                self.removing.insert(id);
                Action::None
            }
            Action::AddTask => {
                let id = self.add_task("");
                self.selected = self.tasks.len().saturating_sub(1);
                self.start_editing(id, now);
                Action::None
            }
            Action::NextTask => {
                if self.selected + 1 < self.tasks.len() {
                    self.selected += 1;
                }
                Action::None
            }
            Action::PreviousTask => {
                self.selected = self.selected.saturating_sub(1);
                Action::None
            }
            other => other,
        }
    }

    /// Drain actions sent by row callbacks.
    pub fn process_actions(&mut self, now: Instant) -> Vec<Action> {
        let mut passthrough = Vec::new();
        while let Ok(action) = self.action_rx.try_recv() {
            let result = self.apply(action, now);
            if result != Action::None {
                passthrough.push(result);
            }
        }
        passthrough
    }

    /// Advance row animations and unmount rows whose removal settled.
    pub fn tick(&mut self, now: Instant) -> Vec<Action> {
        let passthrough = self.process_actions(now);
        for row in self.rows.values_mut() {
            row.tick(now);
        }
        let settled: Vec<TaskId> = self
            .removing
            .iter()
            .filter(|id| {
                self.rows
                    .get(*id)
                    .map_or(true, |row| matches!(row.swipe_state(), SwipeState::Idle { .. }))
            })
            .copied()
            .collect();
        for id in settled {
            self.remove_task(id);
        }
        passthrough
    }

    /// Host cancellation: every engaged row gesture snaps back and the
    /// scroll pan is dropped.
    pub fn cancel_gestures(&mut self, now: Instant) {
        let engaged = self.handlers.active_on(Axis::Horizontal);
        let pointer = self.pointer_row.take().map(|(id, _)| id);
        for (id, row) in self.rows.iter_mut() {
            let is_engaged = row.swipe().handler_id().is_some_and(|handler| engaged.contains(&handler));
            if is_engaged || pointer == Some(*id) {
                log::debug!("Cancelling gesture on '{}'", row.props().subject);
                row.cancel_gesture(now);
            }
        }
        self.scroll.fail();
        self.scroll.pointer_up();
        self.handlers.deactivate(self.scroll_handler);
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        !self.removing.is_empty() || self.rows.values().any(|row| row.is_animating(now))
    }

    fn inner_area(&self) -> Rect {
        Block::default().borders(Borders::ALL).inner(self.area)
    }

    /// Screen area of the task at `index`, if visible
    pub fn row_area(&self, index: usize) -> Option<Rect> {
        let inner = self.inner_area();
        let visible = index.checked_sub(self.scroll_offset)?;
        if visible >= inner.height as usize || index >= self.tasks.len() {
            return None;
        }
        Some(Rect::new(inner.x, inner.y + visible as u16, inner.width, 1))
    }

    fn index_at(&self, column: u16, row: u16) -> Option<usize> {
        let inner = self.inner_area();
        if column < inner.x || column >= inner.right() || row < inner.y || row >= inner.bottom() {
            return None;
        }
        let index = self.scroll_offset + (row - inner.y) as usize;
        (index < self.tasks.len()).then_some(index)
    }

    fn max_scroll(&self) -> usize {
        self.tasks
            .len()
            .saturating_sub(self.inner_area().height as usize)
    }

    pub fn handle_mouse_at(&mut self, mouse: MouseEvent, now: Instant) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // The previous release never arrived.
                if self.pointer_row.is_some() {
                    self.cancel_gestures(now);
                }

                let hit = self.index_at(mouse.column, mouse.row);
                let hit_id = hit.map(|index| self.tasks[index].id);

                // Pressing anywhere but the edited row takes focus away from it.
                if let Some(editing) = self.editing.filter(|editing| Some(*editing) != hit_id) {
                    if let Some(row) = self.rows.get_mut(&editing) {
                        row.blur();
                    }
                }

                self.scroll.pointer_down(f32::from(mouse.column), f32::from(mouse.row));
                self.scroll_origin = self.scroll_offset;

                if let Some(index) = hit {
                    self.selected = index;
                    let id = self.tasks[index].id;
                    if let (Some(area), Some(row)) = (self.row_area(index), self.rows.get_mut(&id)) {
                        row.handle_mouse(mouse, area, now);
                        self.pointer_row = Some((id, area));
                    }
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some((id, area)) = self.pointer_row {
                    if let Some(row) = self.rows.get_mut(&id) {
                        row.handle_mouse(mouse, area, now);
                    }
                }
                self.drag_scroll(mouse);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some((id, area)) = self.pointer_row.take() {
                    if let Some(row) = self.rows.get_mut(&id) {
                        row.handle_mouse(mouse, area, now);
                    }
                }
                self.scroll.pointer_up();
                self.handlers.deactivate(self.scroll_handler);
            }
            MouseEventKind::ScrollDown => {
                self.scroll_offset = (self.scroll_offset + 1).min(self.max_scroll());
            }
            MouseEventKind::ScrollUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn drag_scroll(&mut self, mouse: MouseEvent) {
        let translation = match self.scroll.pointer_move(f32::from(mouse.column), f32::from(mouse.row)) {
            PanEvent::Began { translation } => {
                if !self.handlers.try_activate(self.scroll_handler) {
                    self.scroll.fail();
                    return;
                }
                translation
            }
            PanEvent::Changed { translation } => translation,
            _ => return,
        };
        let target = self.scroll_origin as f32 - translation;
        self.scroll_offset = (target.round().max(0.0) as usize).min(self.max_scroll());
    }

    fn selected_id(&self) -> Option<TaskId> {
        self.tasks.get(self.selected).map(|t| t.id)
    }
}

impl Component for TaskListComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        let now = Instant::now();

        if let Some(id) = self.editing {
            if let Some(row) = self.rows.get_mut(&id) {
                if row.label().is_focused() {
                    row.handle_key(key, now);
                    return Action::None;
                }
            }
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Action::NextTask,
            KeyCode::Char('k') | KeyCode::Up => Action::PreviousTask,
            KeyCode::Char('a') => Action::AddTask,
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(id) = self.selected_id() {
                    if let Some(row) = self.rows.get_mut(&id) {
                        row.handle_key(key, now);
                    }
                }
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Action {
        self.handle_mouse_at(mouse, Instant::now());
        Action::None
    }

    fn update(&mut self, action: Action) -> Action {
        let now = Instant::now();
        let action = self.apply(action, now);
        if action != Action::None {
            return action;
        }
        let mut passthrough = self.process_actions(now).into_iter();
        let first = passthrough.next().unwrap_or(Action::None);
        // The rest wait for the next drain.
        for action in passthrough {
            let _ = self.action_tx.send(action);
        }
        first
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let now = Instant::now();
        self.area = rect;
        let colors = self.theme.row_colors(self.config.ui.color_mode);

        let title = format!(" Tasks ({}) ", self.tasks.len());
        f.render_widget(Block::default().borders(Borders::ALL).title(title), rect);

        for index in 0..self.tasks.len() {
            let Some(area) = self.row_area(index) else {
                continue;
            };
            let id = self.tasks[index].id;
            if let Some(row) = self.rows.get_mut(&id) {
                row.set_width(area.width);
                row.render(area, f.buffer_mut(), &colors, now);
            }
            if index == self.selected && area.width > 0 {
                if let Some(cell) = f.buffer_mut().cell_mut((area.x, area.y)) {
                    cell.set_symbol("›")
                        .set_style(Style::default().fg(colors.highlight).add_modifier(Modifier::BOLD));
                }
            }
        }
    }
}
