use super::actions::Action;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

pub trait Component {
    fn init(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Action;

    fn handle_mouse_events(&mut self, _mouse: MouseEvent) -> Action {
        Action::None
    }

    fn update(&mut self, action: Action) -> Action {
        // Default implementation passes action through
        action
    }

    fn render(&mut self, f: &mut Frame, rect: Rect);
}
