//! Animated checkbox with optimistic local state
//!
//! A press flips the local state immediately and unconditionally. The
//! parent's `is_done` flag is tracked in a separate slot; whether it ever
//! overwrites the local state is decided by the [`ReconcilePolicy`].

use crate::animation::{Easing, Tween};
use crate::constants::{GLYPH_CHECKMARK, GLYPH_CHECKBOX_UNCHECKED};
use crate::theme::RowColors;
use crate::utils::color::mix;
use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckedState {
    #[default]
    Unchecked,
    Checked,
}

impl CheckedState {
    pub fn toggled(self) -> Self {
        match self {
            Self::Unchecked => Self::Checked,
            Self::Checked => Self::Unchecked,
        }
    }

    pub fn is_checked(self) -> bool {
        self == Self::Checked
    }

    fn progress(self) -> f32 {
        if self.is_checked() {
            1.0
        } else {
            0.0
        }
    }
}

impl From<bool> for CheckedState {
    fn from(checked: bool) -> Self {
        if checked {
            Self::Checked
        } else {
            Self::Unchecked
        }
    }
}

/// How the local checked state follows the parent's `is_done`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcilePolicy {
    /// Local state starts unchecked and is only ever changed by presses
    #[default]
    Never,
    /// Start from `is_done`; later `is_done` values overwrite the local state
    /// only when no press is waiting for confirmation
    WhenIdle,
    /// Start from `is_done` and always follow it
    Always,
}

/// Colours of the checkbox at one point of its transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckboxVisual {
    pub stroke: ratatui::style::Color,
    pub fill: ratatui::style::Color,
    pub checkmark: ratatui::style::Color,
    pub checkmark_opacity: f32,
}

#[derive(Debug, Clone)]
pub struct CheckboxToggle {
    local: CheckedState,
    confirmed: bool,
    pending: bool,
    policy: ReconcilePolicy,
    transition: Tween,
    duration: Duration,
}

impl CheckboxToggle {
    pub fn new(is_done: bool, policy: ReconcilePolicy, duration: Duration, now: Instant) -> Self {
        let local = match policy {
            ReconcilePolicy::Never => CheckedState::Unchecked,
            ReconcilePolicy::WhenIdle | ReconcilePolicy::Always => CheckedState::from(is_done),
        };
        Self {
            local,
            confirmed: is_done,
            pending: false,
            policy,
            transition: Tween::settled(local.progress(), now),
            duration,
        }
    }

    pub fn state(&self) -> CheckedState {
        self.local
    }

    pub fn is_checked(&self) -> bool {
        self.local.is_checked()
    }

    /// Last `is_done` value received from the parent
    pub fn confirmed(&self) -> bool {
        self.confirmed
    }

    /// True while a press has not been confirmed by the parent
    pub fn has_pending_edit(&self) -> bool {
        self.pending
    }

    pub fn policy(&self) -> ReconcilePolicy {
        self.policy
    }

    /// Flip the local state. Never debounced.
    pub fn press(&mut self, now: Instant) -> CheckedState {
        self.set_local(self.local.toggled(), now);
        self.pending = true;
        self.local
    }

    /// Feed the parent's current `is_done` value.
    pub fn sync_external(&mut self, is_done: bool, now: Instant) {
        self.confirmed = is_done;
        match self.policy {
            ReconcilePolicy::Never => {}
            ReconcilePolicy::WhenIdle => {
                if self.pending {
                    if self.local.is_checked() == is_done {
                        self.pending = false;
                    }
                } else {
                    self.set_local(CheckedState::from(is_done), now);
                }
            }
            ReconcilePolicy::Always => {
                self.pending = false;
                self.set_local(CheckedState::from(is_done), now);
            }
        }
    }

    fn set_local(&mut self, state: CheckedState, now: Instant) {
        if state == self.local {
            return;
        }
        self.local = state;
        self.transition = Tween::new(
            self.transition.value_at(now),
            state.progress(),
            now,
            self.duration,
            Easing::EaseInOut,
        );
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        !self.transition.is_finished(now)
    }

    /// Interpolated colours at `now`
    pub fn visual(&self, colors: &RowColors, now: Instant) -> CheckboxVisual {
        let t = self.transition.value_at(now);
        CheckboxVisual {
            stroke: mix(colors.box_stroke, colors.highlight, t),
            fill: mix(colors.background, colors.highlight, t),
            checkmark: mix(colors.highlight, colors.checkmark, t),
            checkmark_opacity: t,
        }
    }

    /// Draw `[x]` into the first three columns of `area`.
    pub fn render(&self, area: Rect, buf: &mut Buffer, colors: &RowColors, now: Instant) {
        if area.width < 3 || area.height == 0 {
            return;
        }
        let visual = self.visual(colors, now);
        let stroke = Style::default().fg(visual.stroke).bg(colors.background);
        buf.set_string(area.x, area.y, GLYPH_CHECKBOX_UNCHECKED, stroke);

        let inner = if visual.checkmark_opacity >= 0.5 {
            GLYPH_CHECKMARK
        } else {
            " "
        };
        buf.set_string(
            area.x + 1,
            area.y,
            inner,
            Style::default().fg(visual.checkmark).bg(visual.fill),
        );
    }
}
