//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// Every semantic UI role and its `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Header / footer --
    pub brand_title: Style,
    pub brand_tagline: Style,
    pub footer: Style,

    // -- Input card --
    pub card_border: Style,
    pub card_border_focused: Style,
    pub input_label: Style,
    pub input_text: Style,
    pub input_placeholder: Style,
    pub input_disabled: Style,

    // -- Primary control --
    pub button: Style,
    pub button_focused: Style,
    pub button_busy: Style,

    // -- Result panel --
    pub result_heading: Style,
    pub result_link: Style,
    pub copy_idle: Style,
    pub copy_done: Style,
    pub secondary_action: Style,

    // -- Toasts --
    pub toast_normal: Style,
    pub toast_destructive: Style,

    // -- Chrome --
    pub status_bar: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            brand_title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            brand_tagline: Style::default().fg(Color::Gray),
            footer: Style::default().fg(Color::DarkGray),

            card_border: Style::default().fg(Color::DarkGray),
            card_border_focused: Style::default().fg(Color::Cyan),
            input_label: Style::default().add_modifier(Modifier::BOLD),
            input_text: Style::default().fg(Color::White),
            input_placeholder: Style::default().fg(Color::DarkGray),
            input_disabled: Style::default().fg(Color::Gray),

            button: Style::default().bg(Color::Blue).fg(Color::White),
            button_focused: Style::default()
                .bg(Color::LightBlue)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            button_busy: Style::default().bg(Color::DarkGray).fg(Color::White),

            result_heading: Style::default().add_modifier(Modifier::BOLD),
            result_link: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            copy_idle: Style::default().fg(Color::Gray),
            copy_done: Style::default().fg(Color::Green),
            secondary_action: Style::default().fg(Color::Gray),

            toast_normal: Style::default().bg(Color::Black).fg(Color::White),
            toast_destructive: Style::default().bg(Color::Red).fg(Color::White),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
        }
    }

    fn light() -> Self {
        Self {
            brand_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            brand_tagline: Style::default().fg(Color::DarkGray),
            footer: Style::default().fg(Color::DarkGray),

            card_border: Style::default().fg(Color::Gray),
            card_border_focused: Style::default().fg(Color::Blue),
            input_label: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            input_text: Style::default().fg(Color::Black),
            input_placeholder: Style::default().fg(Color::Gray),
            input_disabled: Style::default().fg(Color::DarkGray),

            button: Style::default().bg(Color::Blue).fg(Color::White),
            button_focused: Style::default()
                .bg(Color::Magenta)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            button_busy: Style::default().bg(Color::Gray).fg(Color::Black),

            result_heading: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            result_link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            copy_idle: Style::default().fg(Color::DarkGray),
            copy_done: Style::default().fg(Color::Green),
            secondary_action: Style::default().fg(Color::DarkGray),

            toast_normal: Style::default().bg(Color::White).fg(Color::Black),
            toast_destructive: Style::default().bg(Color::Red).fg(Color::White),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
        }
    }
}

// ============================================================================
// Style Map
// ============================================================================

/// String-keyed style lookup built from a `ColorPalette`.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 21] = [
    "brand_title",
    "brand_tagline",
    "footer",
    "card_border",
    "card_border_focused",
    "input_label",
    "input_text",
    "input_placeholder",
    "input_disabled",
    "button",
    "button_focused",
    "button_busy",
    "result_heading",
    "result_link",
    "copy_idle",
    "copy_done",
    "secondary_action",
    "toast_normal",
    "toast_destructive",
    "status_bar",
    "help_heading",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 21] = [
            p.brand_title,
            p.brand_tagline,
            p.footer,
            p.card_border,
            p.card_border_focused,
            p.input_label,
            p.input_text,
            p.input_placeholder,
            p.input_disabled,
            p.button,
            p.button_focused,
            p.button_busy,
            p.result_heading,
            p.result_link,
            p.copy_idle,
            p.copy_done,
            p.secondary_action,
            p.toast_normal,
            p.toast_destructive,
            p.status_bar,
            // Help headings reuse the result heading weight.
            p.result_heading,
        ];

        let mut map = HashMap::with_capacity(ROLE_NAMES.len());
        for (name, style) in ROLE_NAMES.iter().zip(styles.iter()) {
            map.insert(*name, *style);
        }

        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
