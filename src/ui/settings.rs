use crate::app::state::AppState;
use crate::config::settings::{MAX_SENSITIVITY, MIN_SENSITIVITY};
use crate::ui::layout::centered;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let panel = centered(area, 60, 12);
    let block = Block::default()
        .title(" Settings ")
        .title_style(theme.title())
        .title_bottom(Line::from(" ←/→ sensitivity · t theme · Enter save ").right_aligned())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Label
            Constraint::Length(1), // Gauge
            Constraint::Length(1),
            Constraint::Length(1), // Theme
            Constraint::Min(0),
        ])
        .split(inner);

    let sensitivity = state.settings.gesture_sensitivity;
    frame.render_widget(
        Paragraph::new(Span::styled("Gesture sensitivity", theme.text())),
        rows[0],
    );
    let span = (MAX_SENSITIVITY - MIN_SENSITIVITY) as f64;
    let ratio = (sensitivity.saturating_sub(MIN_SENSITIVITY)) as f64 / span;
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme.accent()))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{}/{}", sensitivity, MAX_SENSITIVITY));
    frame.render_widget(gauge, rows[1]);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Theme: ", theme.text()),
            Span::styled(state.settings.theme.as_str(), theme.highlight()),
        ])),
        rows[3],
    );
}
