// src/ui.rs
use iced::Color;
use once_cell::sync::Lazy;

use crate::loader::Severity;
use crate::theme::ThemePreference;

pub struct Styles {
    pub muted_fg: Color,
    pub status_loading: Color,
    pub status_ok: Color,
    pub status_error: Color,
}

impl Styles {
    pub fn status_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Loading => self.status_loading,
            Severity::Ok => self.status_ok,
            Severity::Error => self.status_error,
        }
    }
}

pub static DARK_THEME: Lazy<Styles> = Lazy::new(|| Styles {
    muted_fg: Color::from_rgb(0.6, 0.6, 0.6),
    status_loading: Color::from_rgb(0.4, 0.7, 1.0),
    status_ok: Color::from_rgb(0.4, 0.85, 0.5),
    status_error: Color::from_rgb(1.0, 0.45, 0.45),
});

pub static LIGHT_THEME: Lazy<Styles> = Lazy::new(|| Styles {
    muted_fg: Color::from_rgb(0.4, 0.4, 0.4),
    status_loading: Color::from_rgb(0.0078, 0.325, 0.6118), // #02539c
    status_ok: Color::from_rgb(0.1, 0.5, 0.2),
    status_error: Color::from_rgb(0.75, 0.1, 0.1),
});

pub fn styles(theme: ThemePreference) -> &'static Styles {
    match theme {
        ThemePreference::Light => &LIGHT_THEME,
        ThemePreference::Dark => &DARK_THEME,
    }
}

/// Label for the theme toggle: offers the other mode.
pub fn toggle_label(theme: ThemePreference) -> &'static str {
    match theme {
        ThemePreference::Light => "Dark mode",
        ThemePreference::Dark => "Light mode",
    }
}
