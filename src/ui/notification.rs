use crate::app::state::{AppState, NotificationLevel};
use crate::ui::layout::centered;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

/// Popup width for `message`: padded, then clamped to 30..=70 columns.
fn popup_width(message: &str) -> u16 {
    let chars = u16::try_from(message.chars().count()).unwrap_or(u16::MAX);
    chars.saturating_add(6).clamp(30, 70)
}

pub fn render(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let Some(note) = &state.notification else {
        return;
    };

    let popup_area = centered(frame.area(), popup_width(&note.message), 7);

    // Clear background
    frame.render_widget(Clear, popup_area);

    let border = match note.level {
        NotificationLevel::Info => theme.border_focused(),
        NotificationLevel::Error => theme.error(),
    };
    let block = Block::default()
        .title(format!(" {} ", note.title))
        .title_style(theme.title())
        .title_bottom(Line::from(" Enter to close ").right_aligned())
        .borders(Borders::ALL)
        .border_style(border)
        .style(theme.background());

    let lines = vec![
        Line::from(Span::styled(note.message.clone(), theme.text())),
        Line::default(),
        Line::from(Span::styled(note.timestamp.clone(), theme.muted())),
    ];
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_width_is_clamped() {
        assert_eq!(popup_width("ok"), 30);
        assert_eq!(popup_width(&"x".repeat(50)), 56);
        assert_eq!(popup_width(&"x".repeat(65_540)), 70);
    }
}
