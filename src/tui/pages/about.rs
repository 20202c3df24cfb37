use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::core::navigation::APP_NAME;
use crate::tui::theme::Theme;

pub fn about_text(theme: &Theme) -> Text<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    Text::from(vec![
        Line::from(vec![
            Span::styled(APP_NAME, theme.accent_style().add_modifier(Modifier::BOLD)),
            Span::styled(format!(" {}", env!("CARGO_PKG_VERSION")), dim),
        ]),
        Line::from(env!("CARGO_PKG_DESCRIPTION")),
        Line::default(),
        Line::from(vec![
            Span::styled("Repository: ", dim),
            Span::raw(env!("CARGO_PKG_REPOSITORY")),
        ]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_about_shows_name_and_version() {
        let text = about_text(&Theme::default());
        let first: String = text.lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(first, format!("apinav {}", env!("CARGO_PKG_VERSION")));
        let repo: String = text.lines[3].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(repo.starts_with("Repository: https://"));
    }
}
