//! Color theme and styling definitions using ratatui colors
//!
//! Themes map the semantic span roles produced by the layout module onto
//! ratatui styles. Entry and category colours come from the catalog; themes
//! decide whether to honour them.

use crate::error::{MindlineError, Result};
use crate::render::ui::layout::SpanRole;
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Named themes selectable from the command line or config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeName {
    #[default]
    Default,
    Monochrome,
    HighContrast,
}

impl ThemeName {
    pub const VARIANTS: [&'static str; 3] = ["default", "monochrome", "high-contrast"];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Default => "default",
            ThemeName::Monochrome => "monochrome",
            ThemeName::HighContrast => "high-contrast",
        }
    }

    pub fn theme(self) -> ColorTheme {
        match self {
            ThemeName::Default => ColorTheme::default(),
            ThemeName::Monochrome => ColorTheme::monochrome(),
            ThemeName::HighContrast => ColorTheme::high_contrast(),
        }
    }
}

impl FromStr for ThemeName {
    type Err = MindlineError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "default" => Ok(ThemeName::Default),
            "monochrome" => Ok(ThemeName::Monochrome),
            "high-contrast" => Ok(ThemeName::HighContrast),
            other => Err(MindlineError::invalid_argument(format!(
                "unknown theme '{other}' (expected one of: {})",
                Self::VARIANTS.join(", ")
            ))),
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color theme for terminal UI elements
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Normal text color (None uses terminal default)
    pub normal_text: Option<Color>,

    /// Header title
    pub title: Style,

    /// Central rail and spacer lines
    pub rail: Color,

    /// Era rules and labels
    pub era_rule: Color,
    pub era_label: Style,

    /// Year labels beside the rail
    pub year: Style,

    /// Entry card text
    pub entry_title: Style,
    pub author: Style,
    pub description: Option<Color>,
    pub source: Style,
    pub hint: Style,

    /// Background of the focused entry's card
    pub focus: Style,

    /// Active chip in the category bar
    pub active_chip: Style,
    pub inactive_chip: Style,

    /// Status line background
    pub status_bg: Color,

    /// Status line text
    pub status_fg: Color,

    /// Empty-state message
    pub empty_text: Color,

    /// Use catalog colours for dots, categories and chips
    pub use_entry_colors: bool,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            normal_text: None, // Use terminal default
            title: Style::default().add_modifier(Modifier::BOLD),
            rail: Color::DarkGray,
            era_rule: Color::DarkGray,
            era_label: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            year: Style::default().fg(Color::Gray),
            entry_title: Style::default().add_modifier(Modifier::BOLD),
            author: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
            description: None,
            source: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::UNDERLINED),
            hint: Style::default().fg(Color::DarkGray),
            focus: Style::default().bg(Color::Indexed(236)),
            active_chip: Style::default().fg(Color::Black).bg(Color::White),
            inactive_chip: Style::default().fg(Color::Gray),
            status_bg: Color::Blue,
            status_fg: Color::White,
            empty_text: Color::Gray,
            use_entry_colors: true,
        }
    }
}

impl ColorTheme {
    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            normal_text: None,
            title: Style::default().add_modifier(Modifier::BOLD),
            rail: Color::Reset,
            era_rule: Color::Reset,
            era_label: Style::default().add_modifier(Modifier::BOLD),
            year: Style::default(),
            entry_title: Style::default().add_modifier(Modifier::BOLD),
            author: Style::default().add_modifier(Modifier::ITALIC),
            description: None,
            source: Style::default().add_modifier(Modifier::UNDERLINED),
            hint: Style::default().add_modifier(Modifier::DIM),
            focus: Style::default().add_modifier(Modifier::REVERSED),
            active_chip: Style::default().add_modifier(Modifier::REVERSED),
            inactive_chip: Style::default(),
            status_bg: Color::Black,
            status_fg: Color::White,
            empty_text: Color::Reset,
            use_entry_colors: false,
        }
    }

    /// Create a high-contrast theme for accessibility
    pub fn high_contrast() -> Self {
        Self {
            normal_text: Some(Color::White),
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            rail: Color::White,
            era_rule: Color::White,
            era_label: Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
            year: Style::default().fg(Color::LightYellow),
            entry_title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            author: Style::default().fg(Color::White),
            description: Some(Color::White),
            source: Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::UNDERLINED),
            hint: Style::default().fg(Color::LightGreen),
            focus: Style::default().fg(Color::Black).bg(Color::White),
            active_chip: Style::default().fg(Color::Black).bg(Color::LightYellow),
            inactive_chip: Style::default().fg(Color::White),
            status_bg: Color::White,
            status_fg: Color::Black,
            empty_text: Color::White,
            use_entry_colors: true,
        }
    }

    fn text(&self) -> Style {
        match self.normal_text {
            Some(color) => Style::default().fg(color),
            None => Style::default(),
        }
    }

    /// Catalog colour as a foreground, when the theme honours it
    pub fn entry_color(&self, rgb: Option<(u8, u8, u8)>) -> Option<Color> {
        match rgb {
            Some((r, g, b)) if self.use_entry_colors => Some(Color::Rgb(r, g, b)),
            _ => None,
        }
    }

    /// Style for a laid-out span
    pub fn span_style(&self, role: SpanRole, focused: bool) -> Style {
        let style = match role {
            SpanRole::Plain => self.text(),
            SpanRole::Rail => Style::default().fg(self.rail),
            SpanRole::Dot(rgb) => match self.entry_color(rgb) {
                Some(color) => Style::default().fg(color),
                None => self.text(),
            },
            SpanRole::EraRule => Style::default().fg(self.era_rule),
            SpanRole::EraLabel => self.era_label,
            SpanRole::Year => self.year,
            SpanRole::Category(rgb) => match self.entry_color(rgb) {
                Some(color) => Style::default().fg(color),
                None => self.text(),
            },
            SpanRole::Title => self.entry_title,
            SpanRole::Author => self.author,
            SpanRole::Description => match self.description {
                Some(color) => Style::default().fg(color),
                None => self.text(),
            },
            SpanRole::Source => self.source,
            SpanRole::Hint => self.hint,
            SpanRole::EmptyTitle => Style::default()
                .fg(self.empty_text)
                .add_modifier(Modifier::BOLD),
            SpanRole::EmptyHint => Style::default().fg(self.empty_text),
        };

        if focused && role.is_card() {
            style.patch(self.focus)
        } else {
            style
        }
    }

    /// Style for a category chip in the header
    pub fn chip_style(&self, rgb: Option<(u8, u8, u8)>, active: bool) -> Style {
        if active {
            return self.active_chip;
        }
        match self.entry_color(rgb) {
            Some(color) => self.inactive_chip.fg(color),
            None => self.inactive_chip,
        }
    }

    pub fn status_style(&self) -> Style {
        Style::default().bg(self.status_bg).fg(self.status_fg)
    }
}
