//! Root component: the task list above a status bar

use crate::config::Config;
use crate::logger::Logger;
use crate::ui::components::{StatusBar, TaskListComponent};
use crate::ui::core::{Action, Component, EventType};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};
use std::time::Instant;

/// Tasks shown on first launch
const SAMPLE_TASKS: [&str; 4] = [
    "Buy groceries",
    "Reply to the landlord",
    "Water the plants",
    "Book a dentist appointment",
];

pub struct App {
    task_list: TaskListComponent,
    logger: Logger,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let logger = Logger::new();
        let mut task_list = TaskListComponent::new(config, logger.clone());
        for subject in SAMPLE_TASKS {
            task_list.add_task(subject);
        }
        Self {
            task_list,
            logger,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn task_list(&self) -> &TaskListComponent {
        &self.task_list
    }

    pub fn is_animating(&self) -> bool {
        self.task_list.is_animating(Instant::now())
    }

    /// Route one terminal event through the component hierarchy
    pub fn handle_event(&mut self, event: EventType) {
        let now = Instant::now();
        let actions = match event {
            EventType::Key(key) => vec![self.handle_key_events(key)],
            EventType::Mouse(mouse) => vec![self.handle_mouse_events(mouse)],
            EventType::Tick => self.task_list.tick(now),
            // Row geometry or pointer ownership changed under an open gesture
            EventType::Resize(_, _) | EventType::FocusLost => {
                self.task_list.cancel_gestures(now);
                Vec::new()
            }
            EventType::Other => Vec::new(),
        };
        for action in actions {
            if self.update(action) == Action::Quit {
                self.should_quit = true;
            }
        }
    }
}

impl Component for App {
    fn init(&mut self) -> anyhow::Result<()> {
        log::info!("Started with {} tasks", self.task_list.tasks().len());
        Ok(())
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }
        self.task_list.handle_key_events(key)
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Action {
        self.task_list.handle_mouse_events(mouse)
    }

    fn update(&mut self, action: Action) -> Action {
        self.task_list.update(action)
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let [list_area, status_area] = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(rect);
        self.task_list.render(f, list_area);
        StatusBar::render(f, status_area, &self.logger);
    }
}
