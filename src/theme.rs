//! Colour resolution for the task row
//!
//! Components never hard-code colours. They ask a [`ThemeResolver`] for a
//! [`ThemeToken`] under the current [`ColorMode`] and render whatever comes
//! back. Resolution is a pure lookup.

use crate::config::ThemeConfig;
use crate::utils::color::parse_hex;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Light or dark display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Light,
    #[default]
    Dark,
}

/// Colour slots used by the row and its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeToken {
    /// Checkbox stroke and fill when checked
    Highlight,
    /// Checkbox outline when unchecked
    BoxStroke,
    Checkmark,
    /// Label colour for open tasks
    ActiveText,
    /// Label colour for done tasks
    DoneText,
    RowBackground,
    /// Backdrop revealed behind the row while swiping
    DeleteBackdrop,
}

impl ThemeToken {
    pub const ALL: [ThemeToken; 7] = [
        ThemeToken::Highlight,
        ThemeToken::BoxStroke,
        ThemeToken::Checkmark,
        ThemeToken::ActiveText,
        ThemeToken::DoneText,
        ThemeToken::RowBackground,
        ThemeToken::DeleteBackdrop,
    ];

    /// Key used in the `[theme.light]` and `[theme.dark]` tables
    pub fn name(self) -> &'static str {
        match self {
            ThemeToken::Highlight => "highlight",
            ThemeToken::BoxStroke => "box_stroke",
            ThemeToken::Checkmark => "checkmark",
            ThemeToken::ActiveText => "active_text",
            ThemeToken::DoneText => "done_text",
            ThemeToken::RowBackground => "row_background",
            ThemeToken::DeleteBackdrop => "delete_backdrop",
        }
    }
}

/// Supplies resolved colours for a display mode
pub trait ThemeResolver {
    fn resolve(&self, token: ThemeToken, mode: ColorMode) -> Color;

    /// Resolve every row colour at once
    fn row_colors(&self, mode: ColorMode) -> RowColors {
        RowColors {
            highlight: self.resolve(ThemeToken::Highlight, mode),
            box_stroke: self.resolve(ThemeToken::BoxStroke, mode),
            checkmark: self.resolve(ThemeToken::Checkmark, mode),
            active_text: self.resolve(ThemeToken::ActiveText, mode),
            done_text: self.resolve(ThemeToken::DoneText, mode),
            background: self.resolve(ThemeToken::RowBackground, mode),
            backdrop: self.resolve(ThemeToken::DeleteBackdrop, mode),
        }
    }
}

/// Resolved colours for one render of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowColors {
    pub highlight: Color,
    pub box_stroke: Color,
    pub checkmark: Color,
    pub active_text: Color,
    pub done_text: Color,
    pub background: Color,
    pub backdrop: Color,
}

/// Built-in palette
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTheme;

impl ThemeResolver for DefaultTheme {
    fn resolve(&self, token: ThemeToken, mode: ColorMode) -> Color {
        use ColorMode::{Dark, Light};
        match (token, mode) {
            (ThemeToken::Highlight, Light) => Color::Rgb(59, 130, 246),
            (ThemeToken::Highlight, Dark) => Color::Rgb(96, 165, 250),
            (ThemeToken::BoxStroke, Light) => Color::Rgb(212, 212, 212),
            (ThemeToken::BoxStroke, Dark) => Color::Rgb(59, 130, 246),
            (ThemeToken::Checkmark, _) => Color::Rgb(255, 255, 255),
            (ThemeToken::ActiveText, Light) => Color::Rgb(0, 0, 0),
            (ThemeToken::ActiveText, Dark) => Color::Rgb(255, 255, 255),
            (ThemeToken::DoneText, Light) => Color::Rgb(163, 163, 163),
            (ThemeToken::DoneText, Dark) => Color::Rgb(82, 82, 82),
            (ThemeToken::RowBackground, Light) => Color::Rgb(250, 250, 249),
            (ThemeToken::RowBackground, Dark) => Color::Rgb(22, 78, 99),
            (ThemeToken::DeleteBackdrop, _) => Color::Rgb(239, 68, 68),
        }
    }
}

/// Applies the configured hex overrides on top of another resolver.
///
/// Entries that do not parse are skipped; `Config::validate` reports them.
#[derive(Debug, Clone)]
pub struct ConfiguredTheme<R> {
    base: R,
    light: HashMap<ThemeToken, Color>,
    dark: HashMap<ThemeToken, Color>,
}

impl<R: ThemeResolver> ConfiguredTheme<R> {
    pub fn new(base: R, config: &ThemeConfig) -> Self {
        let parse = |mode: ColorMode| -> HashMap<ThemeToken, Color> {
            let overrides = config.overrides(mode);
            ThemeToken::ALL
                .into_iter()
                .filter_map(|token| Some((token, parse_hex(overrides.get(token)?)?)))
                .collect()
        };
        Self {
            light: parse(ColorMode::Light),
            dark: parse(ColorMode::Dark),
            base,
        }
    }
}

impl<R: ThemeResolver> ThemeResolver for ConfiguredTheme<R> {
    fn resolve(&self, token: ThemeToken, mode: ColorMode) -> Color {
        let overrides = match mode {
            ColorMode::Light => &self.light,
            ColorMode::Dark => &self.dark,
        };
        overrides
            .get(&token)
            .copied()
            .unwrap_or_else(|| self.base.resolve(token, mode))
    }
}
