use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let deck = &state.presentation;
    let status = Line::from(vec![
        Span::styled(format!(" {}/{} ", deck.current(), deck.total()), theme.highlight()),
        Span::styled(format!("{} · {} ", deck.status(), deck.last_action().label()), theme.muted()),
    ]);
    let block = Block::default()
        .title(" Presentation ")
        .title_style(theme.title())
        .title_bottom(status.right_aligned())
        .borders(Borders::ALL)
        .border_style(if deck.is_playing() {
            theme.border_focused()
        } else {
            theme.border()
        });

    let mut lines = Vec::new();
    if let Some(slide) = deck.slide() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(slide.title, theme.title())).centered());
        lines.push(Line::default());
        for bullet in slide.bullets {
            lines.push(Line::from(Span::styled(format!("• {}", bullet), theme.text())));
        }
    }
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
