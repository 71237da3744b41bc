//! Status bar component

use crate::constants::STATUS_HINTS;
use crate::logger::Logger;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Status bar component
pub struct StatusBar;

impl StatusBar {
    /// Key hints, followed by the most recent event when there is one
    pub fn text(logger: &Logger) -> Line<'static> {
        let mut spans = vec![Span::styled(STATUS_HINTS, Style::default().fg(Color::Gray))];
        if let Some(latest) = logger.latest() {
            spans.push(Span::raw(" • "));
            spans.push(Span::styled(latest, Style::default().fg(Color::Yellow)));
        }
        Line::from(spans)
    }

    /// Render the status bar
    pub fn render(f: &mut Frame, area: Rect, logger: &Logger) {
        let status_bar = Paragraph::new(Self::text(logger)).alignment(Alignment::Center);
        f.render_widget(status_bar, area);
    }
}
