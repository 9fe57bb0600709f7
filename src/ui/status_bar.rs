use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts: Vec<Span> = Vec::new();

    // Status text
    parts.push(Span::styled(
        format!(" {} ", state.status_line()),
        theme.status_bar(),
    ));

    if state.camera.error.is_some() && !state.camera.active {
        parts.push(Span::styled(
            " ! ",
            theme.status_bar().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    // Screen indicator
    let screen_name = state.screen.title().to_uppercase();
    // Pad to fill remaining space
    let used: usize = parts.iter().map(|s| s.content.chars().count()).sum();
    let remaining = (area.width as usize).saturating_sub(used + screen_name.len() + 3);
    parts.push(Span::styled(" ".repeat(remaining), theme.status_bar()));
    parts.push(Span::styled(
        format!(" [{}] ", screen_name),
        theme.status_bar().fg(theme.accent()),
    ));

    let line = Line::from(parts);
    let paragraph = Paragraph::new(line);
    frame.render_widget(paragraph, area);
}
