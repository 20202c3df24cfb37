//! Colours used across screens, resolved once from `[theme]`.

use std::str::FromStr;

use log::warn;
use ratatui::style::{Color, Modifier, Style};

use crate::core::config::ThemeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub accent: Color,
    pub get: Color,
    pub post: Color,
    pub put: Color,
    pub patch: Color,
    pub delete: Color,
    pub deprecated: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Indexed(70),
            get: Color::Indexed(33),
            post: Color::Indexed(35),
            put: Color::Indexed(148),
            patch: Color::Indexed(218),
            delete: Color::Indexed(172),
            deprecated: Color::Indexed(246),
        }
    }
}

impl Theme {
    /// Unset or unparsable colours keep their default; the latter log a warning.
    pub fn from_config(config: &ThemeConfig) -> Self {
        let defaults = Self::default();
        Self {
            accent: parse_color("accent", config.accent.as_deref(), defaults.accent),
            get: parse_color("get", config.get.as_deref(), defaults.get),
            post: parse_color("post", config.post.as_deref(), defaults.post),
            put: parse_color("put", config.put.as_deref(), defaults.put),
            patch: parse_color("patch", config.patch.as_deref(), defaults.patch),
            delete: parse_color("delete", config.delete.as_deref(), defaults.delete),
            deprecated: parse_color("deprecated", config.deprecated.as_deref(), defaults.deprecated),
        }
    }

    pub fn method_color(&self, method: &str) -> Color {
        match method.to_ascii_uppercase().as_str() {
            "GET" => self.get,
            "POST" => self.post,
            "PUT" => self.put,
            "PATCH" => self.patch,
            "DELETE" => self.delete,
            _ => Color::Gray,
        }
    }

    pub fn method_style(&self, method: &str) -> Style {
        Style::default()
            .fg(self.method_color(method))
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn deprecated_style(&self) -> Style {
        Style::default()
            .fg(self.deprecated)
            .add_modifier(Modifier::CROSSED_OUT)
    }
}

fn parse_color(key: &str, raw: Option<&str>, fallback: Color) -> Color {
    let Some(raw) = raw else {
        return fallback;
    };
    Color::from_str(raw.trim()).unwrap_or_else(|_| {
        warn!("theme.{key}: cannot parse colour {raw:?}, using default");
        fallback
    })
}
