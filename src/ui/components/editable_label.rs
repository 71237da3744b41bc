//! Task label that switches to a text field while editing
//!
//! The mode is chosen by the parent's `is_editing` flag alone. In display
//! mode the label animates between the active and done colours and forwards
//! taps. In editing mode a focused text field reports every content change
//! and reports the end of editing once per loss of focus.

use crate::animation::Tween;
use crate::theme::RowColors;
use crate::utils::color::mix;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMode {
    Display,
    Editing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelEvent {
    PressLabel,
    ChangeSubject(String),
    FinishEditing,
}

/// Single-line text buffer with a cursor counted in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    pub text: String,
    pub cursor: usize,
    pub focused: bool,
}

impl TextField {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self {
            text,
            cursor,
            focused: false,
        }
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.text
            .char_indices()
            .nth(cursor)
            .map(|(index, _)| index)
            .unwrap_or(self.text.len())
    }

    /// Replace the content, placing the cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.char_len();
    }

    pub fn insert_char(&mut self, c: char) {
        let index = self.byte_index(self.cursor);
        self.text.insert(index, c);
        self.cursor += 1;
    }

    /// Returns true if a character was removed.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let index = self.byte_index(self.cursor);
        self.text.remove(index);
        true
    }

    /// Returns true if a character was removed.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let index = self.byte_index(self.cursor);
        self.text.remove(index);
        true
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let target = self.cursor as isize + delta;
        self.cursor = target.clamp(0, self.char_len() as isize) as usize;
    }

    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor = self.char_len();
    }
}

#[derive(Debug, Clone)]
pub struct EditableLabel {
    mode: LabelMode,
    subject: String,
    field: TextField,
    finished: bool,
    done: Tween,
    is_done: bool,
    placeholder: String,
    duration: Duration,
}

impl EditableLabel {
    pub fn new(placeholder: impl Into<String>, duration: Duration, now: Instant) -> Self {
        Self {
            mode: LabelMode::Display,
            subject: String::new(),
            field: TextField::default(),
            finished: false,
            done: Tween::settled(0.0, now),
            is_done: false,
            placeholder: placeholder.into(),
            duration,
        }
    }

    pub fn mode(&self) -> LabelMode {
        self.mode
    }

    pub fn field(&self) -> &TextField {
        &self.field
    }

    pub fn is_focused(&self) -> bool {
        self.mode == LabelMode::Editing && self.field.focused
    }

    /// Apply the parent's props. The first sync snaps the done styling
    /// instead of animating it.
    pub fn sync_props(&mut self, subject: &str, is_done: bool, is_editing: bool, now: Instant) {
        self.subject = subject.to_string();

        match (self.mode, is_editing) {
            (LabelMode::Display, true) => {
                self.mode = LabelMode::Editing;
                self.field = TextField::new(subject);
                self.field.focused = true;
                self.finished = false;
            }
            (LabelMode::Editing, true) => {
                if self.field.text != subject {
                    self.field.set_text(subject);
                }
            }
            (LabelMode::Editing, false) => {
                self.mode = LabelMode::Display;
                self.field.focused = false;
            }
            (LabelMode::Display, false) => {}
        }

        if is_done != self.is_done {
            self.is_done = is_done;
            let target = if is_done { 1.0 } else { 0.0 };
            self.done = self.done.retarget(target, now, self.duration);
        }
    }

    /// Snap the done styling to its target without animating.
    pub fn finish_animation(&mut self, now: Instant) {
        let target = if self.is_done { 1.0 } else { 0.0 };
        self.done = Tween::settled(target, now);
    }

    /// A tap on the label region.
    pub fn tap(&mut self) -> Option<LabelEvent> {
        match self.mode {
            LabelMode::Display => Some(LabelEvent::PressLabel),
            LabelMode::Editing => {
                self.field.focused = true;
                self.finished = false;
                None
            }
        }
    }

    /// Drop focus from the text field.
    pub fn blur(&mut self) -> Option<LabelEvent> {
        if self.mode != LabelMode::Editing || self.finished {
            return None;
        }
        self.field.focused = false;
        self.finished = true;
        Some(LabelEvent::FinishEditing)
    }

    /// Keyboard input for the focused field. Returns `None` if not consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Vec<LabelEvent>> {
        if !self.is_focused() {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let changed = match key.code {
            KeyCode::Char(c) if !ctrl => {
                self.field.insert_char(c);
                true
            }
            KeyCode::Backspace => self.field.delete_back(),
            KeyCode::Delete => self.field.delete_forward(),
            KeyCode::Left => {
                self.field.move_cursor(-1);
                false
            }
            KeyCode::Right => {
                self.field.move_cursor(1);
                false
            }
            KeyCode::Home => {
                self.field.move_to_start();
                false
            }
            KeyCode::End => {
                self.field.move_to_end();
                false
            }
            // Submitting blurs the field.
            KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => {
                return Some(self.blur().into_iter().collect());
            }
            _ => return None,
        };

        if changed {
            Some(vec![LabelEvent::ChangeSubject(self.field.text.clone())])
        } else {
            Some(Vec::new())
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        !self.done.is_finished(now)
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, colors: &RowColors, now: Instant) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let base = Style::default().bg(colors.background);
        match self.mode {
            LabelMode::Display => {
                let t = self.done.value_at(now);
                let mut style = base.fg(mix(colors.active_text, colors.done_text, t));
                if t >= 0.5 {
                    style = style.add_modifier(Modifier::CROSSED_OUT);
                }
                buf.set_stringn(area.x, area.y, &self.subject, area.width as usize, style);
            }
            LabelMode::Editing => {
                if self.field.text.is_empty() {
                    let style = base.fg(colors.done_text);
                    buf.set_stringn(area.x, area.y, &self.placeholder, area.width as usize, style);
                } else {
                    let style = base.fg(colors.active_text);
                    buf.set_stringn(area.x, area.y, &self.field.text, area.width as usize, style);
                }
                if self.field.focused {
                    let column = (self.field.cursor as u16).min(area.width.saturating_sub(1));
                    if let Some(cell) = buf.cell_mut((area.x + column, area.y)) {
                        cell.set_style(Style::default().add_modifier(Modifier::REVERSED));
                    }
                }
            }
        }
    }
}
